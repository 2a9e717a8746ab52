//! Case CRUD, timeline, and health endpoints
//!
//! All case endpoints require authentication: a pseudo-identity never owns a
//! case. Missing and cross-owner cases both answer 404.

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use chrono::Utc;

use lextrack_core::model::{Case, CasePatch, CaseStatus, CaseType};
use lextrack_core::{timeline, views};
use lextrack_engine::commands::{case, timeline as timeline_cmd};

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCaseDto {
    pub title: String,
    #[serde(flatten)]
    pub patch: CasePatch,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub search: Option<String>,
    pub status: Option<String>,
    pub case_type: Option<String>,
    /// Named view: open, archived, urgent or upcoming
    pub view: Option<String>,
}

fn apply_list_filters(cases: Vec<Case>, params: &ListParams) -> Result<Vec<Case>, ApiError> {
    let mut kept: Vec<Case> = match params.search.as_deref() {
        Some(q) => views::filter_by_search(&cases, q)
            .into_iter()
            .cloned()
            .collect(),
        None => cases,
    };
    if let Some(s) = params.status.as_deref() {
        let status = CaseStatus::parse(s).map_err(lextrack_core::errors::LexError::from)?;
        kept = views::filter_by_status(&kept, status)
            .into_iter()
            .cloned()
            .collect();
    }
    if let Some(t) = params.case_type.as_deref() {
        let case_type = CaseType::parse(t).map_err(lextrack_core::errors::LexError::from)?;
        kept = views::filter_by_case_type(&kept, case_type)
            .into_iter()
            .cloned()
            .collect();
    }
    if let Some(view) = params.view.as_deref() {
        kept = match view {
            "open" => views::open_cases(&kept).into_iter().cloned().collect(),
            "archived" => views::archived_cases(&kept).into_iter().cloned().collect(),
            "urgent" => views::urgent_cases(&kept).into_iter().cloned().collect(),
            "upcoming" => views::upcoming_hearings(&kept, Utc::now())
                .into_iter()
                .cloned()
                .collect(),
            other => {
                return Err(ApiError::from(
                    lextrack_core::errors::LexError::new(
                        lextrack_core::errors::ErrorKind::InvalidInput,
                    )
                    .with_message(format!("unknown view '{other}'")),
                ))
            }
        };
    }
    Ok(kept)
}

pub async fn list(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>, ApiError> {
    let identity = state.identity(&headers);
    let user_id = identity.require_user()?.to_string();
    let conn = state.conn()?;
    let cases = apply_list_filters(case::case_list(&conn, &user_id), &params)?;
    Ok(Json(json!({ "ok": true, "cases": cases })))
}

pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(dto): Json<CreateCaseDto>,
) -> Result<Json<Value>, ApiError> {
    let identity = state.identity(&headers);
    let user_id = identity.require_user()?.to_string();
    let conn = state.conn()?;
    let created = case::case_create(&conn, &user_id, &dto.title, dto.patch)?;
    Ok(Json(json!({ "ok": true, "case": created })))
}

pub async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(patch): Json<CasePatch>,
) -> Result<Json<Value>, ApiError> {
    let identity = state.identity(&headers);
    let user_id = identity.require_user()?.to_string();
    let conn = state.conn()?;
    let updated = case::case_update(&conn, &user_id, &id, patch)?;
    Ok(Json(json!({ "ok": true, "case": updated })))
}

pub async fn remove(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let identity = state.identity(&headers);
    let user_id = identity.require_user()?.to_string();
    let conn = state.conn()?;
    case::case_delete(&conn, &user_id, &id)?;
    Ok(Json(json!({ "ok": true })))
}

/// Timeline with presentation annotations (category/icon/color), newest first
pub async fn activities(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let identity = state.identity(&headers);
    let user_id = identity.require_user()?.to_string();
    let conn = state.conn()?;
    let entries = timeline_cmd::case_timeline(&conn, &user_id, &id)?;

    let annotated = timeline::assemble(&entries)
        .map(serde_json::to_value)
        .collect::<Result<Vec<Value>, _>>()
        .map_err(lextrack_core::errors::LexError::from)?;

    Ok(Json(json!({ "ok": true, "activities": annotated })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveCaseDto {
    pub case_id: String,
}

pub async fn active_case(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let identity = state.identity(&headers);
    let user_id = identity.require_user()?.to_string();
    let case_id = state.session.active(&user_id)?;
    Ok(Json(json!({ "ok": true, "caseId": case_id })))
}

/// Point the session at a case. The case must exist and belong to the
/// caller; anything else is a 404.
pub async fn set_active_case(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(dto): Json<ActiveCaseDto>,
) -> Result<Json<Value>, ApiError> {
    let identity = state.identity(&headers);
    let user_id = identity.require_user()?.to_string();
    {
        // ownership check under its own lock; the session store locks the
        // same connection internally
        let conn = state.conn()?;
        case::case_get(&conn, &user_id, &dto.case_id)?;
    }
    state.session.set_active(&user_id, &dto.case_id)?;
    Ok(Json(json!({ "ok": true, "caseId": dto.case_id })))
}

pub async fn clear_active_case(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let identity = state.identity(&headers);
    let user_id = identity.require_user()?.to_string();
    state.session.clear(&user_id)?;
    Ok(Json(json!({ "ok": true })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthParams {
    pub case_id: String,
}

pub async fn health(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<HealthParams>,
) -> Result<Json<Value>, ApiError> {
    let identity = state.identity(&headers);
    let user_id = identity.require_user()?.to_string();
    let conn = state.conn()?;
    let report = timeline_cmd::case_health(&conn, &user_id, &params.case_id)?;
    Ok(Json(json!({ "ok": true, "health": report })))
}
