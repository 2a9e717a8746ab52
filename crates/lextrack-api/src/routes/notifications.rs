//! Notification endpoints

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde_json::{json, Value};

use lextrack_engine::commands::artifacts;

use crate::error::ApiError;
use crate::AppState;

pub async fn list(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let identity = state.identity(&headers);
    let user_id = identity.require_user()?.to_string();
    let conn = state.conn()?;
    let notifications = artifacts::list_notifications(&conn, &user_id);
    Ok(Json(json!({ "ok": true, "notifications": notifications })))
}

pub async fn mark_read(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let identity = state.identity(&headers);
    let user_id = identity.require_user()?.to_string();
    let conn = state.conn()?;
    artifacts::notification_mark_read(&conn, &user_id, &id)?;
    Ok(Json(json!({ "ok": true })))
}
