//! HTTP error mapping
//!
//! One mapping from the structured domain error to a status + JSON body.
//! Validation text is surfaced verbatim (it is written to be safe); anything
//! classified as a server fault is logged here and replaced with a generic
//! message so internals never leak to callers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde_json::json;

use lextrack_core::errors::{ErrorKind, LexError};

/// Handler-level error; wraps the domain error for response rendering
#[derive(Debug)]
pub struct ApiError(LexError);

impl ApiError {
    pub fn inner(&self) -> &LexError {
        &self.0
    }
}

impl From<LexError> for ApiError {
    fn from(err: LexError) -> Self {
        Self(err)
    }
}

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
        ErrorKind::Unauthenticated => StatusCode::UNAUTHORIZED,
        // cross-owner access is indistinguishable from absence, never a 403
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = status_for(err.kind());

        let message = match err.kind() {
            ErrorKind::RateLimited => {
                let hours_left = err
                    .retry_at()
                    .map(|at| {
                        let secs = (at - Utc::now()).num_seconds().max(0);
                        (secs + 3599) / 3600
                    })
                    .unwrap_or(24);
                format!("Daily limit reached. Try again in {hours_left} hours.")
            }
            ErrorKind::Unauthenticated => "Authentication required".to_string(),
            _ if status == StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!(
                    err_kind = ?err.kind(),
                    err_code = err.code(),
                    op = err.op().unwrap_or(""),
                    "request failed"
                );
                "Internal server error".to_string()
            }
            _ => err.message().to_string(),
        };

        let body = json!({
            "ok": false,
            "message": message,
            "code": err.code(),
        });
        (status, Json(body)).into_response()
    }
}
