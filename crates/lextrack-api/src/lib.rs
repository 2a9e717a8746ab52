//! HTTP surface
//!
//! Thin async shell over the synchronous engine: handlers resolve the caller,
//! run any AI completion first, then take the connection lock for the
//! synchronous command. Cross-owner reads surface as 404, storage failures on
//! list endpoints degrade to empty collections, and the activity log never
//! fails a request.

pub mod ai;
pub mod auth;
pub mod error;
pub mod rate_limit;
pub mod routes;

use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::Request;
use axum::http::{HeaderMap, HeaderValue};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, patch};
use axum::Router;
use rusqlite::Connection;
use tracing::Instrument;

use lextrack_core_types::{RequestContext, TraceId};

use lextrack_core::errors::{ErrorKind, LexError};
use lextrack_engine::commands::Actor;
use lextrack_engine::session::{ActiveCaseStore, SqliteActiveCaseStore};

use crate::ai::{AiService, AiTier};
use crate::auth::AuthProvider;
use crate::error::ApiError;
use crate::rate_limit::{Decision, IpRateLimiter, ANON_DAILY_LIMIT};

/// Shared state for all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
    pub auth: Arc<dyn AuthProvider>,
    pub ai: Arc<dyn AiService>,
    pub limiter: Arc<IpRateLimiter>,
    pub session: Arc<dyn ActiveCaseStore>,
}

impl AppState {
    pub fn new(
        db: Arc<Mutex<Connection>>,
        auth: Arc<dyn AuthProvider>,
        ai: Arc<dyn AiService>,
    ) -> Self {
        let session = Arc::new(SqliteActiveCaseStore::new(db.clone()));
        Self {
            db,
            auth,
            ai,
            limiter: Arc::new(IpRateLimiter::new(ANON_DAILY_LIMIT)),
            session,
        }
    }

    pub(crate) fn conn(&self) -> Result<MutexGuard<'_, Connection>, ApiError> {
        self.db.lock().map_err(|_| {
            ApiError::from(
                LexError::new(ErrorKind::Internal).with_message("connection lock poisoned"),
            )
        })
    }

    /// Resolve the caller: authenticated user or `ip-{addr}` pseudo-identity
    pub(crate) fn identity(&self, headers: &HeaderMap) -> Identity {
        let ip = auth::client_ip(headers);
        match self.auth.authenticate(headers) {
            Some(user) => Identity {
                actor: Actor::authenticated(user.id),
                ip,
            },
            None => Identity {
                actor: Actor::anonymous(auth::pseudo_identity(&ip)),
                ip,
            },
        }
    }
}

/// Resolved caller for one request
pub(crate) struct Identity {
    pub actor: Actor,
    pub ip: String,
}

impl Identity {
    pub fn tier(&self) -> AiTier {
        if self.actor.authenticated {
            AiTier::Pro
        } else {
            AiTier::Free
        }
    }

    /// The user id, or 401 for anonymous callers
    pub fn require_user(&self) -> Result<&str, ApiError> {
        if self.actor.authenticated {
            Ok(&self.actor.user_id)
        } else {
            Err(ApiError::from(LexError::new(ErrorKind::Unauthenticated)))
        }
    }

    /// Consume anonymous quota; authenticated callers pass for free
    pub fn check_quota(&self, limiter: &IpRateLimiter) -> Result<(), ApiError> {
        if self.actor.authenticated {
            return Ok(());
        }
        match limiter.check(&self.ip) {
            Decision::Allowed => Ok(()),
            Decision::Limited { retry_at } => Err(ApiError::from(
                LexError::new(ErrorKind::RateLimited).with_retry_at(retry_at),
            )),
        }
    }
}

/// Assign a correlation id at the boundary
///
/// Every log line emitted while the request is handled carries the id
/// through the request span, and the caller gets it back in `x-request-id`
/// so a support report can be matched to its log trail. An inbound
/// `x-trace-id` from an upstream proxy is adopted into the same span.
async fn correlate(req: Request, next: Next) -> Response {
    let mut ctx = RequestContext::new();
    if let Some(trace) = req
        .headers()
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
    {
        ctx = ctx.with_trace_id(TraceId::from_string(trace.to_string()));
    }

    let span = tracing::info_span!(
        "request",
        request_id = %ctx.request_id,
        trace_id = ctx.trace_id.as_ref().map(|t| t.as_str()).unwrap_or(""),
    );
    let mut response = next.run(req).instrument(span).await;
    if let Ok(value) = HeaderValue::from_str(ctx.request_id.as_str()) {
        response.headers_mut().insert("x-request-id", value);
    }
    response
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/cases", get(routes::cases::list).post(routes::cases::create))
        .route(
            "/cases/:id",
            patch(routes::cases::update).delete(routes::cases::remove),
        )
        .route("/cases/:id/activities", get(routes::cases::activities))
        .route("/case-tracker/health", get(routes::cases::health))
        .route(
            "/drafts",
            get(routes::features::list_drafts).post(routes::features::create_draft),
        )
        .route(
            "/notices",
            get(routes::features::list_notices).post(routes::features::create_notice),
        )
        .route(
            "/research",
            get(routes::features::list_research).post(routes::features::run_research),
        )
        .route(
            "/summarizer",
            get(routes::features::list_summaries).post(routes::features::summarize),
        )
        .route(
            "/active-case",
            get(routes::cases::active_case)
                .put(routes::cases::set_active_case)
                .delete(routes::cases::clear_active_case),
        )
        .route("/notifications", get(routes::notifications::list))
        .route(
            "/notifications/:id/read",
            patch(routes::notifications::mark_read),
        )
        .layer(middleware::from_fn(correlate))
        .with_state(state)
}
