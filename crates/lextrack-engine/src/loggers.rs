//! Typed feature loggers
//!
//! One wrapper per feature, each with a fixed event type, feature tag, and
//! title/content template. Features never build `ActivityDraft`s by hand;
//! these wrappers are the only producers, which keeps the timeline vocabulary
//! stable. Each returns the writer's boolean unchanged - timeline writes are
//! best-effort everywhere.

use rusqlite::Connection;
use serde_json::json;

use lextrack_core::model::activity::{clamp_chars, DISPLAY_CONTENT_CHARS, MAX_TITLE_CHARS};
use lextrack_core::model::{ActivityDraft, ActivityKind, Feature};
use lextrack_store::activity;

/// AI assistant exchange; the question doubles as the title
pub fn log_ai_chat(
    conn: &Connection,
    case_id: &str,
    user_id: &str,
    question: &str,
    answer: &str,
) -> bool {
    let draft = ActivityDraft::new(
        case_id,
        user_id,
        ActivityKind::AiChat,
        clamp_chars(question, MAX_TITLE_CHARS),
        answer,
    )
    .with_feature(Feature::AiAssistant)
    .with_metadata(json!({ "question": question }));
    activity::record(conn, &draft)
}

pub fn log_draft_created(
    conn: &Connection,
    case_id: &str,
    user_id: &str,
    draft_type: &str,
    title: &str,
    draft_id: &str,
) -> bool {
    let draft = ActivityDraft::new(
        case_id,
        user_id,
        ActivityKind::DraftCreated,
        format!("Draft: {title}"),
        format!("Created {draft_type} document"),
    )
    .with_feature(Feature::Drafts)
    .with_metadata(json!({ "draftType": draft_type }))
    .with_reference_id(draft_id);
    activity::record(conn, &draft)
}

pub fn log_summary_created(
    conn: &Connection,
    case_id: &str,
    user_id: &str,
    doc_title: &str,
    summary: &str,
    summary_id: &str,
) -> bool {
    let draft = ActivityDraft::new(
        case_id,
        user_id,
        ActivityKind::SummaryCreated,
        format!("Summary: {doc_title}"),
        clamp_chars(summary, DISPLAY_CONTENT_CHARS),
    )
    .with_feature(Feature::JudgmentSummarizer)
    .with_metadata(json!({ "docTitle": doc_title }))
    .with_reference_id(summary_id);
    activity::record(conn, &draft)
}

pub fn log_research(
    conn: &Connection,
    case_id: &str,
    user_id: &str,
    query: &str,
    result: &str,
    research_id: &str,
) -> bool {
    let draft = ActivityDraft::new(
        case_id,
        user_id,
        ActivityKind::ResearchDone,
        format!("Research: {}", clamp_chars(query, 80)),
        clamp_chars(result, DISPLAY_CONTENT_CHARS),
    )
    .with_feature(Feature::Research)
    .with_metadata(json!({ "query": query }))
    .with_reference_id(research_id);
    activity::record(conn, &draft)
}

pub fn log_notice_created(
    conn: &Connection,
    case_id: &str,
    user_id: &str,
    notice_type: &str,
    recipient: &str,
    notice_id: &str,
) -> bool {
    let draft = ActivityDraft::new(
        case_id,
        user_id,
        ActivityKind::NoticeCreated,
        format!("Notice to {recipient}"),
        format!("Created {notice_type} notice"),
    )
    .with_feature(Feature::Notices)
    .with_metadata(json!({ "noticeType": notice_type, "recipient": recipient }))
    .with_reference_id(notice_id);
    activity::record(conn, &draft)
}

pub fn log_document_uploaded(
    conn: &Connection,
    case_id: &str,
    user_id: &str,
    filename: &str,
    file_id: &str,
) -> bool {
    let draft = ActivityDraft::new(
        case_id,
        user_id,
        ActivityKind::DocumentUploaded,
        format!("Uploaded: {filename}"),
        format!("Document \"{filename}\" was uploaded to the case"),
    )
    .with_feature(Feature::DocGenerator)
    .with_metadata(json!({ "filename": filename }))
    .with_reference_id(file_id);
    activity::record(conn, &draft)
}

pub fn log_note_added(conn: &Connection, case_id: &str, user_id: &str, note: &str) -> bool {
    let draft = ActivityDraft::new(case_id, user_id, ActivityKind::NoteAdded, "Note Added", note)
        .with_feature(Feature::CaseTracker);
    activity::record(conn, &draft)
}
