//! Caller identity resolution
//!
//! Authentication is a seam: the provider trait maps request headers to a
//! user, and the rest of the surface only sees `AuthUser`. Anonymous callers
//! get an `ip-{addr}` pseudo-identity that scopes their artifacts and quota;
//! a pseudo-identity never owns cases and never writes to a case timeline.

use std::collections::HashMap;

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;

/// Subscription plan, selects the AI tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    Free,
    Pro,
}

/// A resolved, authenticated caller
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: String,
    pub plan: Plan,
}

/// Maps request headers to a caller, or `None` for anonymous
pub trait AuthProvider: Send + Sync {
    fn authenticate(&self, headers: &HeaderMap) -> Option<AuthUser>;
}

/// Bearer-token provider backed by a static table
///
/// Backs development and tests; a deployment wires in a real verifier behind
/// the same trait.
#[derive(Default)]
pub struct StaticTokenAuth {
    tokens: HashMap<String, AuthUser>,
}

impl StaticTokenAuth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, token: impl Into<String>, user: AuthUser) -> Self {
        self.tokens.insert(token.into(), user);
        self
    }
}

impl AuthProvider for StaticTokenAuth {
    fn authenticate(&self, headers: &HeaderMap) -> Option<AuthUser> {
        let token = headers
            .get(AUTHORIZATION)?
            .to_str()
            .ok()?
            .strip_prefix("Bearer ")?;
        self.tokens.get(token).cloned()
    }
}

/// Best-effort client address: first hop of `x-forwarded-for`
pub fn client_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|ip| ip.trim().to_string())
        .filter(|ip| !ip.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Artifact/quota owner id for an anonymous caller
pub fn pseudo_identity(ip: &str) -> String {
    format!("ip-{ip}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_static_token_auth() {
        let auth = StaticTokenAuth::new().with_token(
            "tok-1",
            AuthUser {
                id: "user-1".to_string(),
                plan: Plan::Pro,
            },
        );

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer tok-1"));
        let user = auth.authenticate(&headers).unwrap();
        assert_eq!(user.id, "user-1");

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer nope"));
        assert!(auth.authenticate(&headers).is_none());

        assert!(auth.authenticate(&HeaderMap::new()).is_none());
    }

    #[test]
    fn test_client_ip_takes_first_forwarded_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.9, 10.0.0.1"),
        );
        assert_eq!(client_ip(&headers), "203.0.113.9");

        assert_eq!(client_ip(&HeaderMap::new()), "unknown");
    }

    #[test]
    fn test_pseudo_identity_format() {
        assert_eq!(pseudo_identity("203.0.113.9"), "ip-203.0.113.9");
    }
}
