//! Append-only activity log writer and reader
//!
//! The writer is deliberately infallible at its signature: [`record`] returns
//! `bool` and never an error. Timeline writes ride along with primary
//! operations (draft saved, hearing updated) and must never fail those
//! operations; a lost timeline entry is acceptable, a lost draft is not.

#![allow(clippy::result_large_err)]

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};
use uuid::Uuid;

use lextrack_core::health::EngagementCounters;
use lextrack_core::model::activity::{
    clamp_chars, Activity, ActivityDraft, FALLBACK_CONTENT_CHARS, MAX_CONTENT_CHARS,
    MAX_TITLE_CHARS,
};

use crate::errors::{from_rusqlite, Result};

/// Record one activity against a case
///
/// Returns `true` if the event was persisted on either path, `false` if it
/// was dropped. Missing case/user ids are a silent no-op (`false`, nothing
/// touched). If the canonical `case_activities` surface is unavailable (a
/// pre-cut-over database), falls back to overwriting the single
/// `lastActivity` summary in the legacy tracker's details blob. The fallback
/// retains only the newest event per case; that loss is accepted.
///
/// At-most-once: no retries on either path.
pub fn record(conn: &Connection, draft: &ActivityDraft) -> bool {
    if draft.case_id.trim().is_empty() || draft.user_id.trim().is_empty() {
        tracing::warn!(
            activity_type = draft.kind.as_str(),
            "activity dropped: missing case or user id"
        );
        return false;
    }

    let title = clamp_chars(draft.title.trim(), MAX_TITLE_CHARS);
    let content = clamp_chars(&draft.content, MAX_CONTENT_CHARS);
    let now = Utc::now();

    let metadata_json = draft
        .metadata
        .as_ref()
        .and_then(|m| serde_json::to_string(m).ok());

    let inserted = conn.execute(
        "INSERT INTO case_activities
            (id, case_id, user_id, type, feature, title, content, metadata, reference_id, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        rusqlite::params![
            Uuid::now_v7().to_string(),
            draft.case_id,
            draft.user_id,
            draft.kind.as_str(),
            draft.feature.map(|f| f.as_str()),
            title,
            content,
            metadata_json,
            draft.reference_id,
            now.timestamp(),
        ],
    );

    match inserted {
        Ok(_) => {
            // Best-effort recency touch; failure here does not demote the write
            let touched = conn.execute(
                "UPDATE cases SET updated_at = ?1 WHERE id = ?2",
                rusqlite::params![now.timestamp(), draft.case_id],
            );
            if let Err(e) = touched {
                tracing::debug!(case_id = %draft.case_id, error = %e, "updated_at touch failed");
            }
            true
        }
        Err(primary_err) => {
            tracing::debug!(
                case_id = %draft.case_id,
                error = %primary_err,
                "primary activity insert failed, trying legacy fallback"
            );
            record_legacy_fallback(conn, draft, &title, now.timestamp())
        }
    }
}

/// Fallback write into the legacy tracker's details JSON
///
/// Merges a `lastActivity` object into the existing details blob (other keys
/// such as `caseType` and `respondent` must survive for the read-time
/// mapper). Only the newest event is retained.
fn record_legacy_fallback(
    conn: &Connection,
    draft: &ActivityDraft,
    title: &str,
    at_epoch: i64,
) -> bool {
    let existing: Option<Option<String>> = conn
        .query_row(
            "SELECT details FROM case_trackers WHERE id = ?1 AND user_id = ?2",
            rusqlite::params![draft.case_id, draft.user_id],
            |row| row.get(0),
        )
        .optional()
        .unwrap_or(None);

    let Some(details_raw) = existing else {
        tracing::warn!(case_id = %draft.case_id, "activity dropped: no tracker row for fallback");
        return false;
    };

    let mut details: serde_json::Value = details_raw
        .as_deref()
        .and_then(|s| serde_json::from_str(s).ok())
        .unwrap_or_else(|| serde_json::json!({}));
    if !details.is_object() {
        details = serde_json::json!({});
    }

    details["lastActivity"] = serde_json::json!({
        "type": draft.kind.as_str(),
        "title": title,
        "content": clamp_chars(&draft.content, FALLBACK_CONTENT_CHARS),
        "at": at_epoch,
    });

    let serialized = match serde_json::to_string(&details) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(case_id = %draft.case_id, error = %e, "activity dropped: details serialization failed");
            return false;
        }
    };

    match conn.execute(
        "UPDATE case_trackers SET details = ?1, updated_at = ?2 WHERE id = ?3 AND user_id = ?4",
        rusqlite::params![serialized, at_epoch, draft.case_id, draft.user_id],
    ) {
        Ok(rows) if rows > 0 => true,
        Ok(_) => false,
        Err(e) => {
            tracing::warn!(case_id = %draft.case_id, error = %e, "activity dropped: fallback update failed");
            false
        }
    }
}

/// Load a case's activities, newest first
pub fn list_for_case(conn: &Connection, case_id: &str) -> Result<Vec<Activity>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, case_id, user_id, type, feature, title, content, metadata, reference_id, created_at
             FROM case_activities
             WHERE case_id = ?1
             ORDER BY created_at DESC, rowid DESC",
        )
        .map_err(from_rusqlite)?;

    let rows = stmt
        .query_map([case_id], map_activity_row)
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;

    Ok(rows)
}

fn map_activity_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Activity> {
    let metadata: Option<String> = row.get(7)?;
    let created_at: i64 = row.get(9)?;
    Ok(Activity {
        id: row.get(0)?,
        case_id: row.get(1)?,
        user_id: row.get(2)?,
        kind: row.get(3)?,
        feature: row.get(4)?,
        title: row.get(5)?,
        content: row.get(6)?,
        metadata: metadata.and_then(|m| serde_json::from_str(&m).ok()),
        reference_id: row.get(8)?,
        created_at: chrono::DateTime::from_timestamp(created_at, 0).unwrap_or_default(),
    })
}

/// Count timeline entries for a case
pub fn count_for_case(conn: &Connection, case_id: &str) -> Result<u32> {
    conn.query_row(
        "SELECT COUNT(*) FROM case_activities WHERE case_id = ?1",
        [case_id],
        |row| row.get(0),
    )
    .map_err(from_rusqlite)
}

/// Gather the engagement counters the health scorer consumes
///
/// Artifact counts are user-scoped (they measure the user's engagement with
/// the product); the timeline count is case-scoped.
pub fn count_engagement(
    conn: &Connection,
    case_id: &str,
    user_id: &str,
) -> Result<EngagementCounters> {
    let documents_generated: u32 = conn
        .query_row(
            "SELECT COUNT(*) FROM drafts WHERE user_id = ?1",
            [user_id],
            |row| row.get(0),
        )
        .map_err(from_rusqlite)?;

    let ai_assists: u32 = conn
        .query_row(
            "SELECT
                (SELECT COUNT(*) FROM research_entries WHERE user_id = ?1) +
                (SELECT COUNT(*) FROM summaries WHERE user_id = ?1)",
            [user_id],
            |row| row.get(0),
        )
        .map_err(from_rusqlite)?;

    let files_uploaded: u32 = conn
        .query_row(
            "SELECT COUNT(*) FROM uploaded_files WHERE user_id = ?1",
            [user_id],
            |row| row.get(0),
        )
        .map_err(from_rusqlite)?;

    let timeline_entries = count_for_case(conn, case_id)?;

    Ok(EngagementCounters {
        documents_generated,
        ai_assists,
        files_uploaded,
        timeline_entries,
    })
}
