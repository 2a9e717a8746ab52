//! AI-assisted feature endpoints: drafts, notices, research, summarizer
//!
//! The completion call happens before the connection lock is taken, so a
//! slow AI backend never blocks database traffic. Anonymous callers may use
//! the guarded writes (drafts, summarizer) within the daily quota; their
//! artifacts belong to the `ip-{addr}` pseudo-identity.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use lextrack_core::errors::ValidationError;
use lextrack_core::model::activity::clamp_chars;
use lextrack_engine::commands::artifacts;
use lextrack_engine::prompts::{self, NoticeInput};

use crate::error::ApiError;
use crate::AppState;

// ---------------------------------------------------------------------------
// drafts
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftDto {
    pub draft_type: String,
    #[serde(default)]
    pub inputs: BTreeMap<String, String>,
    pub title: Option<String>,
    pub case_id: Option<String>,
}

pub async fn create_draft(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(dto): Json<DraftDto>,
) -> Result<Json<Value>, ApiError> {
    let identity = state.identity(&headers);
    identity.check_quota(&state.limiter)?;

    let conn = state.conn()?;
    let draft = artifacts::draft_create(
        &conn,
        &identity.actor,
        artifacts::DraftRequest {
            draft_type: dto.draft_type,
            inputs: dto.inputs,
            title: dto.title,
            case_id: dto.case_id,
        },
    )?;
    Ok(Json(json!({ "ok": true, "draft": draft })))
}

pub async fn list_drafts(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let identity = state.identity(&headers);
    let conn = state.conn()?;
    let drafts = artifacts::list_drafts(&conn, &identity.actor.user_id);
    Ok(Json(json!({ "ok": true, "drafts": drafts })))
}

// ---------------------------------------------------------------------------
// notices
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoticeDto {
    pub notice_type: Option<String>,
    pub recipient: String,
    pub recipient_address: Option<String>,
    pub subject: String,
    pub amount: Option<String>,
    pub due_date: Option<String>,
    pub details: Option<String>,
    pub case_id: Option<String>,
}

pub async fn create_notice(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(dto): Json<NoticeDto>,
) -> Result<Json<Value>, ApiError> {
    let identity = state.identity(&headers);
    if dto.recipient.trim().is_empty() {
        return Err(lex(ValidationError::MissingField("recipient")));
    }
    if dto.subject.trim().is_empty() {
        return Err(lex(ValidationError::MissingField("subject")));
    }

    // case enrichment needs the lock; release it before awaiting the AI
    let case_reference = match &dto.case_id {
        Some(case_id) => {
            let conn = state.conn()?;
            artifacts::notice_case_reference(&conn, &identity.actor, case_id)
        }
        None => None,
    };

    let request = prompts::notice_request(
        &NoticeInput {
            notice_type: dto.notice_type.clone(),
            recipient: dto.recipient.clone(),
            recipient_address: dto.recipient_address,
            subject: dto.subject.clone(),
            amount: dto.amount,
            due_date: dto.due_date,
            details: dto.details,
        },
        case_reference.as_deref(),
    );
    let content = state.ai.complete(&request, identity.tier()).await?;

    let conn = state.conn()?;
    let notice = artifacts::notice_save(
        &conn,
        &identity.actor,
        artifacts::NoticeRequest {
            notice_type: dto.notice_type,
            recipient: dto.recipient,
            subject: dto.subject,
            content,
            case_id: dto.case_id,
        },
    )?;
    Ok(Json(json!({ "ok": true, "notice": notice })))
}

pub async fn list_notices(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let identity = state.identity(&headers);
    let conn = state.conn()?;
    let notices = artifacts::list_notices(&conn, &identity.actor.user_id);
    Ok(Json(json!({ "ok": true, "notices": notices })))
}

// ---------------------------------------------------------------------------
// research
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchDto {
    pub query: String,
    pub case_id: Option<String>,
}

pub async fn run_research(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(dto): Json<ResearchDto>,
) -> Result<Json<Value>, ApiError> {
    let identity = state.identity(&headers);

    let query = clamp_chars(dto.query.trim(), 500);
    if query.chars().count() < 2 {
        return Err(lex(ValidationError::LengthOutOfRange {
            field: "query",
            min: 2,
            max: 500,
        }));
    }

    let case_context = match &dto.case_id {
        Some(case_id) => {
            let conn = state.conn()?;
            artifacts::research_case_context(&conn, &identity.actor, case_id)
        }
        None => None,
    };

    let request = prompts::research_request(&query, case_context.as_deref());
    let response = state.ai.complete(&request, identity.tier()).await?;

    let conn = state.conn()?;
    let entry =
        artifacts::research_save(&conn, &identity.actor, &query, response, dto.case_id)?;
    Ok(Json(json!({ "ok": true, "research": entry })))
}

pub async fn list_research(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let identity = state.identity(&headers);
    let conn = state.conn()?;
    let entries = artifacts::list_research(&conn, &identity.actor.user_id);
    Ok(Json(json!({ "ok": true, "research": entries })))
}

// ---------------------------------------------------------------------------
// summarizer
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeDto {
    pub title: String,
    pub text: String,
    pub case_id: Option<String>,
}

pub async fn summarize(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(dto): Json<SummarizeDto>,
) -> Result<Json<Value>, ApiError> {
    let identity = state.identity(&headers);
    identity.check_quota(&state.limiter)?;

    let title = dto.title.trim();
    if title.is_empty() || title.chars().count() > 200 {
        return Err(lex(ValidationError::LengthOutOfRange {
            field: "title",
            min: 1,
            max: 200,
        }));
    }
    let text_chars = dto.text.chars().count();
    if !(10..=50_000).contains(&text_chars) {
        return Err(lex(ValidationError::LengthOutOfRange {
            field: "text",
            min: 10,
            max: 50_000,
        }));
    }

    let request = prompts::summarizer_request(title, &dto.text);
    let content = state.ai.complete(&request, identity.tier()).await?;

    let conn = state.conn()?;
    let summary = artifacts::summary_save(
        &conn,
        &identity.actor,
        title,
        content,
        text_chars as u32,
        dto.case_id,
    )?;
    Ok(Json(json!({ "ok": true, "summary": summary })))
}

pub async fn list_summaries(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let identity = state.identity(&headers);
    let conn = state.conn()?;
    let summaries = artifacts::list_summaries(&conn, &identity.actor.user_id);
    Ok(Json(json!({ "ok": true, "summaries": summaries })))
}

fn lex(err: ValidationError) -> ApiError {
    ApiError::from(lextrack_core::errors::LexError::from(err))
}
