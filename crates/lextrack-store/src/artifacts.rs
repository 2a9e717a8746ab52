//! Artifact and notification persistence
//!
//! Drafts, notices, research entries, summaries, uploads and notifications.
//! All reads are owner-scoped; lists return the newest 20 rows.

#![allow(clippy::result_large_err)]

use chrono::DateTime;
use rusqlite::{Connection, OptionalExtension, Row};

use lextrack_core::model::{Draft, Notice, Notification, ResearchEntry, Summary, UploadedFile};

use crate::errors::{from_rusqlite, Result};

/// Page size for artifact list queries
pub const LIST_LIMIT: u32 = 20;

pub fn insert_draft(conn: &Connection, draft: &Draft) -> Result<()> {
    conn.execute(
        "INSERT INTO drafts (id, user_id, case_id, draft_type, title, content, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        rusqlite::params![
            draft.id,
            draft.user_id,
            draft.case_id,
            draft.draft_type,
            draft.title,
            draft.content,
            draft.created_at.timestamp(),
        ],
    )
    .map_err(from_rusqlite)?;
    Ok(())
}

pub fn list_drafts(conn: &Connection, user_id: &str) -> Result<Vec<Draft>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, user_id, case_id, draft_type, title, content, created_at
             FROM drafts WHERE user_id = ?1
             ORDER BY created_at DESC, rowid DESC LIMIT ?2",
        )
        .map_err(from_rusqlite)?;
    let rows = stmt
        .query_map(rusqlite::params![user_id, LIST_LIMIT], map_draft_row)
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;
    Ok(rows)
}

fn map_draft_row(row: &Row<'_>) -> rusqlite::Result<Draft> {
    let created_at: i64 = row.get(6)?;
    Ok(Draft {
        id: row.get(0)?,
        user_id: row.get(1)?,
        case_id: row.get(2)?,
        draft_type: row.get(3)?,
        title: row.get(4)?,
        content: row.get(5)?,
        created_at: DateTime::from_timestamp(created_at, 0).unwrap_or_default(),
    })
}

pub fn insert_notice(conn: &Connection, notice: &Notice) -> Result<()> {
    conn.execute(
        "INSERT INTO notices (id, user_id, case_id, notice_type, recipient, subject, content, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        rusqlite::params![
            notice.id,
            notice.user_id,
            notice.case_id,
            notice.notice_type,
            notice.recipient,
            notice.subject,
            notice.content,
            notice.created_at.timestamp(),
        ],
    )
    .map_err(from_rusqlite)?;
    Ok(())
}

pub fn list_notices(conn: &Connection, user_id: &str) -> Result<Vec<Notice>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, user_id, case_id, notice_type, recipient, subject, content, created_at
             FROM notices WHERE user_id = ?1
             ORDER BY created_at DESC, rowid DESC LIMIT ?2",
        )
        .map_err(from_rusqlite)?;
    let rows = stmt
        .query_map(rusqlite::params![user_id, LIST_LIMIT], map_notice_row)
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;
    Ok(rows)
}

fn map_notice_row(row: &Row<'_>) -> rusqlite::Result<Notice> {
    let created_at: i64 = row.get(7)?;
    Ok(Notice {
        id: row.get(0)?,
        user_id: row.get(1)?,
        case_id: row.get(2)?,
        notice_type: row.get(3)?,
        recipient: row.get(4)?,
        subject: row.get(5)?,
        content: row.get(6)?,
        created_at: DateTime::from_timestamp(created_at, 0).unwrap_or_default(),
    })
}

pub fn insert_research(conn: &Connection, entry: &ResearchEntry) -> Result<()> {
    conn.execute(
        "INSERT INTO research_entries (id, user_id, case_id, query, response, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        rusqlite::params![
            entry.id,
            entry.user_id,
            entry.case_id,
            entry.query,
            entry.response,
            entry.created_at.timestamp(),
        ],
    )
    .map_err(from_rusqlite)?;
    Ok(())
}

pub fn list_research(conn: &Connection, user_id: &str) -> Result<Vec<ResearchEntry>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, user_id, case_id, query, response, created_at
             FROM research_entries WHERE user_id = ?1
             ORDER BY created_at DESC, rowid DESC LIMIT ?2",
        )
        .map_err(from_rusqlite)?;
    let rows = stmt
        .query_map(rusqlite::params![user_id, LIST_LIMIT], map_research_row)
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;
    Ok(rows)
}

fn map_research_row(row: &Row<'_>) -> rusqlite::Result<ResearchEntry> {
    let created_at: i64 = row.get(5)?;
    Ok(ResearchEntry {
        id: row.get(0)?,
        user_id: row.get(1)?,
        case_id: row.get(2)?,
        query: row.get(3)?,
        response: row.get(4)?,
        created_at: DateTime::from_timestamp(created_at, 0).unwrap_or_default(),
    })
}

pub fn insert_summary(conn: &Connection, summary: &Summary) -> Result<()> {
    conn.execute(
        "INSERT INTO summaries (id, user_id, case_id, title, content, source_chars, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        rusqlite::params![
            summary.id,
            summary.user_id,
            summary.case_id,
            summary.title,
            summary.content,
            summary.source_chars,
            summary.created_at.timestamp(),
        ],
    )
    .map_err(from_rusqlite)?;
    Ok(())
}

pub fn list_summaries(conn: &Connection, user_id: &str) -> Result<Vec<Summary>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, user_id, case_id, title, content, source_chars, created_at
             FROM summaries WHERE user_id = ?1
             ORDER BY created_at DESC, rowid DESC LIMIT ?2",
        )
        .map_err(from_rusqlite)?;
    let rows = stmt
        .query_map(rusqlite::params![user_id, LIST_LIMIT], map_summary_row)
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;
    Ok(rows)
}

fn map_summary_row(row: &Row<'_>) -> rusqlite::Result<Summary> {
    let created_at: i64 = row.get(6)?;
    Ok(Summary {
        id: row.get(0)?,
        user_id: row.get(1)?,
        case_id: row.get(2)?,
        title: row.get(3)?,
        content: row.get(4)?,
        source_chars: row.get(5)?,
        created_at: DateTime::from_timestamp(created_at, 0).unwrap_or_default(),
    })
}

pub fn insert_upload(conn: &Connection, file: &UploadedFile) -> Result<()> {
    conn.execute(
        "INSERT INTO uploaded_files (id, user_id, case_id, filename, mime_type, size_bytes, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        rusqlite::params![
            file.id,
            file.user_id,
            file.case_id,
            file.filename,
            file.mime_type,
            file.size_bytes,
            file.created_at.timestamp(),
        ],
    )
    .map_err(from_rusqlite)?;
    Ok(())
}

pub fn list_uploads_for_case(conn: &Connection, case_id: &str) -> Result<Vec<UploadedFile>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, user_id, case_id, filename, mime_type, size_bytes, created_at
             FROM uploaded_files WHERE case_id = ?1
             ORDER BY created_at DESC, rowid DESC",
        )
        .map_err(from_rusqlite)?;
    let rows = stmt
        .query_map([case_id], map_upload_row)
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;
    Ok(rows)
}

fn map_upload_row(row: &Row<'_>) -> rusqlite::Result<UploadedFile> {
    let created_at: i64 = row.get(6)?;
    Ok(UploadedFile {
        id: row.get(0)?,
        user_id: row.get(1)?,
        case_id: row.get(2)?,
        filename: row.get(3)?,
        mime_type: row.get(4)?,
        size_bytes: row.get(5)?,
        created_at: DateTime::from_timestamp(created_at, 0).unwrap_or_default(),
    })
}

pub fn insert_notification(conn: &Connection, n: &Notification) -> Result<()> {
    conn.execute(
        "INSERT INTO notifications (id, user_id, title, message, read, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        rusqlite::params![
            n.id,
            n.user_id,
            n.title,
            n.message,
            n.read as i32,
            n.created_at.timestamp(),
        ],
    )
    .map_err(from_rusqlite)?;
    Ok(())
}

pub fn list_notifications(conn: &Connection, user_id: &str) -> Result<Vec<Notification>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, user_id, title, message, read, created_at
             FROM notifications WHERE user_id = ?1
             ORDER BY created_at DESC, rowid DESC LIMIT ?2",
        )
        .map_err(from_rusqlite)?;
    let rows = stmt
        .query_map(rusqlite::params![user_id, LIST_LIMIT], map_notification_row)
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;
    Ok(rows)
}

fn map_notification_row(row: &Row<'_>) -> rusqlite::Result<Notification> {
    let read: i32 = row.get(4)?;
    let created_at: i64 = row.get(5)?;
    Ok(Notification {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        message: row.get(3)?,
        read: read != 0,
        created_at: DateTime::from_timestamp(created_at, 0).unwrap_or_default(),
    })
}

/// Mark a notification read, owner-scoped; `false` if no row matched
pub fn mark_notification_read(conn: &Connection, user_id: &str, id: &str) -> Result<bool> {
    let rows = conn
        .execute(
            "UPDATE notifications SET read = 1 WHERE id = ?1 AND user_id = ?2",
            rusqlite::params![id, user_id],
        )
        .map_err(from_rusqlite)?;
    Ok(rows > 0)
}

/// Set the user's active-case pointer
pub fn set_active_case(conn: &Connection, user_id: &str, case_id: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO active_cases (user_id, case_id, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(user_id) DO UPDATE SET case_id = excluded.case_id, updated_at = excluded.updated_at",
        rusqlite::params![user_id, case_id, chrono::Utc::now().timestamp()],
    )
    .map_err(from_rusqlite)?;
    Ok(())
}

/// Read the user's active-case pointer
pub fn active_case(conn: &Connection, user_id: &str) -> Result<Option<String>> {
    conn.query_row(
        "SELECT case_id FROM active_cases WHERE user_id = ?1",
        [user_id],
        |row| row.get(0),
    )
    .optional()
    .map_err(from_rusqlite)
}

/// Clear the user's active-case pointer
pub fn clear_active_case(conn: &Connection, user_id: &str) -> Result<()> {
    conn.execute("DELETE FROM active_cases WHERE user_id = ?1", [user_id])
        .map_err(from_rusqlite)?;
    Ok(())
}
