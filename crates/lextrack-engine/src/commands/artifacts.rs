//! Feature command handlers: drafts, notices, research, summaries, uploads,
//! notes, notifications
//!
//! AI content generation happens at the surface layer (it is async); these
//! commands receive the finished content and own validation, persistence and
//! timeline logging. A case timeline is only written for authenticated actors
//! against a case they own - anonymous pseudo-identities own artifacts, never
//! timeline entries.

#![allow(clippy::result_large_err)]

use std::collections::BTreeMap;

use chrono::Utc;
use rusqlite::Connection;
use uuid::Uuid;

use lextrack_core::errors::{ErrorKind, LexError, ValidationError};
use lextrack_core::model::activity::clamp_chars;
use lextrack_core::model::{Draft, Notice, Notification, ResearchEntry, Summary, UploadedFile};
use lextrack_core::{log_op_end, log_op_error, log_op_start};
use lextrack_store::artifacts;
use lextrack_store::errors::Result;
use lextrack_store::repo::CaseRepo;

use crate::commands::case::not_found;
use crate::loggers;
use crate::templates;

/// The caller identity commands act on behalf of
///
/// `user_id` is either a real account id or an `ip-{addr}` pseudo-identity;
/// only the former may touch case timelines.
#[derive(Debug, Clone)]
pub struct Actor {
    pub user_id: String,
    pub authenticated: bool,
}

impl Actor {
    pub fn authenticated(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            authenticated: true,
        }
    }

    pub fn anonymous(pseudo_id: impl Into<String>) -> Self {
        Self {
            user_id: pseudo_id.into(),
            authenticated: false,
        }
    }
}

/// True when the actor may write to this case's timeline
fn owns_case(conn: &Connection, actor: &Actor, case_id: &str) -> bool {
    if !actor.authenticated {
        return false;
    }
    matches!(
        CaseRepo::get_case(conn, &actor.user_id, case_id),
        Ok(Some(_))
    )
}

/// Inputs for offline draft generation
#[derive(Debug, Clone, Default)]
pub struct DraftRequest {
    pub draft_type: String,
    pub inputs: BTreeMap<String, String>,
    pub title: Option<String>,
    pub case_id: Option<String>,
}

/// Generate a draft from an offline template and persist it
///
/// ## Errors
///
/// - `InvalidInput`: unknown template kind
/// - `Persistence`: database error
pub fn draft_create(conn: &Connection, actor: &Actor, req: DraftRequest) -> Result<Draft> {
    log_op_start!("draft_create", draft_type = &req.draft_type);
    let start = std::time::Instant::now();

    let result = draft_create_impl(conn, actor, req).map_err(|e| {
        log_op_error!(
            "draft_create",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "draft_create",
        duration_ms = start.elapsed().as_millis() as u64,
        reference_id = &result.id
    );

    Ok(result)
}

fn draft_create_impl(conn: &Connection, actor: &Actor, req: DraftRequest) -> Result<Draft> {
    let template_name = templates::template_name(&req.draft_type).ok_or_else(|| {
        LexError::new(ErrorKind::InvalidInput)
            .with_message(format!("unknown draft type: {}", req.draft_type))
    })?;

    let inputs: BTreeMap<String, String> = req
        .inputs
        .into_iter()
        .filter(|(_, v)| !v.trim().is_empty())
        .map(|(k, v)| (k, clamp_chars(v.trim(), 2_000)))
        .collect();

    let content = templates::generate_document(&req.draft_type, &inputs).ok_or_else(|| {
        LexError::new(ErrorKind::InvalidInput)
            .with_message(format!("unknown draft type: {}", req.draft_type))
    })?;

    let now = Utc::now();
    let title = req
        .title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| format!("{template_name} - {}", now.format("%d/%m/%Y")));

    let draft = Draft {
        id: Uuid::now_v7().to_string(),
        user_id: actor.user_id.clone(),
        case_id: req.case_id.clone(),
        draft_type: req.draft_type.clone(),
        title,
        content,
        created_at: now,
    };
    artifacts::insert_draft(conn, &draft)?;

    if let Some(case_id) = &req.case_id {
        if owns_case(conn, actor, case_id) {
            loggers::log_draft_created(
                conn,
                case_id,
                &actor.user_id,
                template_name,
                &draft.title,
                &draft.id,
            );
        }
    }

    Ok(draft)
}

/// Inputs for saving a generated notice
#[derive(Debug, Clone, Default)]
pub struct NoticeRequest {
    pub notice_type: Option<String>,
    pub recipient: String,
    pub subject: String,
    pub content: String,
    pub case_id: Option<String>,
}

/// Persist a generated legal notice
///
/// ## Errors
///
/// - `InvalidInput`: missing recipient or subject
/// - `Persistence`: database error
pub fn notice_save(conn: &Connection, actor: &Actor, req: NoticeRequest) -> Result<Notice> {
    log_op_start!("notice_save");
    let start = std::time::Instant::now();

    let result = notice_save_impl(conn, actor, req).map_err(|e| {
        log_op_error!(
            "notice_save",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "notice_save",
        duration_ms = start.elapsed().as_millis() as u64,
        reference_id = &result.id
    );

    Ok(result)
}

fn notice_save_impl(conn: &Connection, actor: &Actor, req: NoticeRequest) -> Result<Notice> {
    if req.recipient.trim().is_empty() {
        return Err(ValidationError::MissingField("recipient").into());
    }
    if req.subject.trim().is_empty() {
        return Err(ValidationError::MissingField("subject").into());
    }

    let notice_type = req
        .notice_type
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| "legal".to_string());

    let notice = Notice {
        id: Uuid::now_v7().to_string(),
        user_id: actor.user_id.clone(),
        case_id: req.case_id.clone(),
        notice_type: notice_type.clone(),
        recipient: req.recipient.trim().to_string(),
        subject: req.subject.trim().to_string(),
        content: req.content,
        created_at: Utc::now(),
    };
    artifacts::insert_notice(conn, &notice)?;

    if let Some(case_id) = &req.case_id {
        if owns_case(conn, actor, case_id) {
            loggers::log_notice_created(
                conn,
                case_id,
                &actor.user_id,
                &notice_type,
                &notice.recipient,
                &notice.id,
            );
        }
    }

    Ok(notice)
}

/// Persist a research query and its generated answer
///
/// ## Errors
///
/// - `InvalidInput`: query under 2 characters
/// - `Persistence`: database error
pub fn research_save(
    conn: &Connection,
    actor: &Actor,
    query: &str,
    response: String,
    case_id: Option<String>,
) -> Result<ResearchEntry> {
    log_op_start!("research_save");
    let start = std::time::Instant::now();

    let result = research_save_impl(conn, actor, query, response, case_id).map_err(|e| {
        log_op_error!(
            "research_save",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "research_save",
        duration_ms = start.elapsed().as_millis() as u64,
        reference_id = &result.id
    );

    Ok(result)
}

fn research_save_impl(
    conn: &Connection,
    actor: &Actor,
    query: &str,
    response: String,
    case_id: Option<String>,
) -> Result<ResearchEntry> {
    let query = clamp_chars(query.trim(), 500);
    if query.chars().count() < 2 {
        return Err(ValidationError::LengthOutOfRange {
            field: "query",
            min: 2,
            max: 500,
        }
        .into());
    }

    let entry = ResearchEntry {
        id: Uuid::now_v7().to_string(),
        user_id: actor.user_id.clone(),
        case_id: case_id.clone(),
        query: query.clone(),
        response,
        created_at: Utc::now(),
    };
    artifacts::insert_research(conn, &entry)?;

    if let Some(case_id) = &case_id {
        if owns_case(conn, actor, case_id) {
            loggers::log_research(conn, case_id, &actor.user_id, &query, &entry.response, &entry.id);
        }
    }

    Ok(entry)
}

/// Persist a generated document summary
///
/// ## Errors
///
/// - `InvalidInput`: title empty or over 200 chars
/// - `Persistence`: database error
pub fn summary_save(
    conn: &Connection,
    actor: &Actor,
    title: &str,
    content: String,
    source_chars: u32,
    case_id: Option<String>,
) -> Result<Summary> {
    log_op_start!("summary_save");
    let start = std::time::Instant::now();

    let result =
        summary_save_impl(conn, actor, title, content, source_chars, case_id).map_err(|e| {
            log_op_error!(
                "summary_save",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            e
        })?;

    log_op_end!(
        "summary_save",
        duration_ms = start.elapsed().as_millis() as u64,
        reference_id = &result.id
    );

    Ok(result)
}

fn summary_save_impl(
    conn: &Connection,
    actor: &Actor,
    title: &str,
    content: String,
    source_chars: u32,
    case_id: Option<String>,
) -> Result<Summary> {
    let title = title.trim();
    if title.is_empty() || title.chars().count() > 200 {
        return Err(ValidationError::LengthOutOfRange {
            field: "title",
            min: 1,
            max: 200,
        }
        .into());
    }

    let summary = Summary {
        id: Uuid::now_v7().to_string(),
        user_id: actor.user_id.clone(),
        case_id: case_id.clone(),
        title: title.to_string(),
        content,
        source_chars,
        created_at: Utc::now(),
    };
    artifacts::insert_summary(conn, &summary)?;

    if let Some(case_id) = &case_id {
        if owns_case(conn, actor, case_id) {
            loggers::log_summary_created(
                conn,
                case_id,
                &actor.user_id,
                &summary.title,
                &summary.content,
                &summary.id,
            );
        }
    }

    Ok(summary)
}

/// Record an uploaded file against an owned case
///
/// Unlike the other artifacts, uploads require ownership of the case; the
/// file feeds the documents counter.
///
/// ## Errors
///
/// - `InvalidInput`: blank filename
/// - `NotFound`: case missing or owned by someone else
/// - `Persistence`: database error
pub fn upload_record(
    conn: &Connection,
    actor: &Actor,
    case_id: &str,
    filename: &str,
    mime_type: Option<String>,
    size_bytes: Option<u64>,
) -> Result<UploadedFile> {
    log_op_start!("upload_record", case_id = case_id);
    let start = std::time::Instant::now();

    let result = upload_record_impl(conn, actor, case_id, filename, mime_type, size_bytes)
        .map_err(|e| {
            log_op_error!(
                "upload_record",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            e
        })?;

    log_op_end!(
        "upload_record",
        duration_ms = start.elapsed().as_millis() as u64,
        reference_id = &result.id
    );

    Ok(result)
}

fn upload_record_impl(
    conn: &Connection,
    actor: &Actor,
    case_id: &str,
    filename: &str,
    mime_type: Option<String>,
    size_bytes: Option<u64>,
) -> Result<UploadedFile> {
    let filename = filename.trim();
    if filename.is_empty() {
        return Err(ValidationError::MissingField("filename").into());
    }
    if !owns_case(conn, actor, case_id) {
        return Err(not_found(case_id));
    }

    let file = UploadedFile {
        id: Uuid::now_v7().to_string(),
        user_id: actor.user_id.clone(),
        case_id: case_id.to_string(),
        filename: filename.to_string(),
        mime_type,
        size_bytes,
        created_at: Utc::now(),
    };
    artifacts::insert_upload(conn, &file)?;

    loggers::log_document_uploaded(conn, case_id, &actor.user_id, filename, &file.id);

    Ok(file)
}

/// Attach a free-text note to an owned case (timeline-only, no artifact row)
///
/// ## Errors
///
/// - `InvalidInput`: blank note
/// - `NotFound`: case missing or owned by someone else
pub fn note_add(conn: &Connection, actor: &Actor, case_id: &str, note: &str) -> Result<bool> {
    log_op_start!("note_add", case_id = case_id);
    let start = std::time::Instant::now();

    let result = note_add_impl(conn, actor, case_id, note).map_err(|e| {
        log_op_error!(
            "note_add",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "note_add",
        duration_ms = start.elapsed().as_millis() as u64
    );

    Ok(result)
}

fn note_add_impl(conn: &Connection, actor: &Actor, case_id: &str, note: &str) -> Result<bool> {
    if note.trim().is_empty() {
        return Err(ValidationError::MissingField("note").into());
    }
    if !owns_case(conn, actor, case_id) {
        return Err(not_found(case_id));
    }
    Ok(loggers::log_note_added(conn, case_id, &actor.user_id, note.trim()))
}

/// Record an AI assistant exchange on an owned case's timeline
///
/// Best-effort like every timeline write; anonymous or cross-owner calls are
/// quietly dropped.
pub fn chat_log(
    conn: &Connection,
    actor: &Actor,
    case_id: &str,
    question: &str,
    answer: &str,
) -> bool {
    if !owns_case(conn, actor, case_id) {
        return false;
    }
    loggers::log_ai_chat(conn, case_id, &actor.user_id, question, answer)
}

/// List query helpers; storage failures degrade to empty collections
macro_rules! degrading_list {
    ($name:ident, $item:ty, $store_fn:path) => {
        pub fn $name(conn: &Connection, user_id: &str) -> Vec<$item> {
            match $store_fn(conn, user_id) {
                Ok(items) => items,
                Err(e) => {
                    tracing::warn!(op = stringify!($name), error = %e, "list degraded to empty");
                    Vec::new()
                }
            }
        }
    };
}

degrading_list!(list_drafts, Draft, artifacts::list_drafts);
degrading_list!(list_notices, Notice, artifacts::list_notices);
degrading_list!(list_research, ResearchEntry, artifacts::list_research);
degrading_list!(list_summaries, Summary, artifacts::list_summaries);
degrading_list!(list_notifications, Notification, artifacts::list_notifications);

/// Mark a notification read, owner-scoped
///
/// ## Errors
///
/// - `NotFound`: notification missing or owned by someone else
/// - `Persistence`: database error
pub fn notification_mark_read(conn: &Connection, user_id: &str, id: &str) -> Result<()> {
    log_op_start!("notification_mark_read");
    let start = std::time::Instant::now();

    let result = artifacts::mark_notification_read(conn, user_id, id)
        .and_then(|matched| {
            if matched {
                Ok(())
            } else {
                Err(LexError::new(ErrorKind::NotFound)
                    .with_entity_id(id)
                    .with_message("Notification not found"))
            }
        })
        .map_err(|e| {
            log_op_error!(
                "notification_mark_read",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            e
        });

    if result.is_ok() {
        log_op_end!(
            "notification_mark_read",
            duration_ms = start.elapsed().as_millis() as u64
        );
    }

    result
}

/// Case enrichment line for the notice prompt, only for owned cases
pub fn notice_case_reference(conn: &Connection, actor: &Actor, case_id: &str) -> Option<String> {
    if !actor.authenticated {
        return None;
    }
    let case = CaseRepo::get_case(conn, &actor.user_id, case_id).ok()??;
    let mut reference = format!("Case Reference: {}", case.title);
    if let Some(cnr) = &case.cnr_number {
        reference.push_str(&format!(" (CNR: {cnr})"));
    }
    Some(reference)
}

/// Case enrichment block for the research prompt, only for owned cases
pub fn research_case_context(conn: &Connection, actor: &Actor, case_id: &str) -> Option<String> {
    if !actor.authenticated {
        return None;
    }
    let case = CaseRepo::get_case(conn, &actor.user_id, case_id).ok()??;
    Some(format!(
        "[Research Context: Case \"{}\", Type: {}, Court: {}]",
        case.title,
        case.case_type.as_str(),
        case.court.as_deref().unwrap_or("N/A"),
    ))
}
