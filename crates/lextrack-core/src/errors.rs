use chrono::{DateTime, Utc};
use thiserror::Error;

/// Result type alias using LexError
pub type Result<T> = std::result::Result<T, LexError>;

/// Canonical error kind taxonomy
///
/// This taxonomy provides a stable, structured classification of all errors
/// in the LexTrack system. Each kind maps to a stable error code that can be
/// used for programmatic error handling, testing, and the HTTP surface's
/// status mapping (400/401/404/429/500).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    // Structural/Validation
    InvalidInput,
    NotFound,

    // Auth
    Unauthenticated,

    // Quota
    RateLimited,

    // Integration/IO
    Io,
    Serialization,
    Persistence,
    ExternalService,

    // Internal
    Internal,
}

impl ErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ErrorKind::NotFound => "ERR_NOT_FOUND",
            ErrorKind::Unauthenticated => "ERR_UNAUTHENTICATED",
            ErrorKind::RateLimited => "RATE_LIMIT_EXCEEDED",
            ErrorKind::Io => "ERR_IO",
            ErrorKind::Serialization => "ERR_SERIALIZATION",
            ErrorKind::Persistence => "ERR_PERSISTENCE",
            ErrorKind::ExternalService => "ERR_EXTERNAL_SERVICE",
            ErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries classification plus context for debugging. Free-form message text
/// must never contain raw AI inputs/outputs or party names; identifiers and
/// lengths only.
#[derive(Debug, Clone)]
pub struct LexError {
    kind: ErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    message: String,
    retry_at: Option<DateTime<Utc>>,
}

impl LexError {
    /// Create a new error with the specified kind
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            message: String::new(),
            retry_at: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the id of the entity the operation was acting on
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add the earliest retry time (populated on RateLimited)
    pub fn with_retry_at(mut self, retry_at: DateTime<Utc>) -> Self {
        self.retry_at = Some(retry_at);
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity id context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the earliest retry time, if any (populated on RateLimited)
    pub fn retry_at(&self) -> Option<DateTime<Utc>> {
        self.retry_at
    }
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for LexError {}

/// Validation errors raised when parsing the canonical enum vocabulary or
/// checking required fields
///
/// These convert into `LexError` with kind `InvalidInput`; the reason text is
/// safe to surface verbatim to the caller (400 responses).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Unknown case status string
    #[error("unknown case status: {0}")]
    UnknownStatus(String),

    /// Unknown case type string
    #[error("unknown case type: {0}")]
    UnknownCaseType(String),

    /// Unknown case stage string
    #[error("unknown case stage: {0}")]
    UnknownStage(String),

    /// Unknown priority string
    #[error("unknown priority: {0}")]
    UnknownPriority(String),

    /// Title was empty or whitespace-only
    #[error("title cannot be empty")]
    EmptyTitle,

    /// A required field was missing or blank
    #[error("{0} is required")]
    MissingField(&'static str),

    /// A text field fell outside its permitted length range
    #[error("{field} must be between {min} and {max} characters")]
    LengthOutOfRange {
        field: &'static str,
        min: usize,
        max: usize,
    },
}

impl From<ValidationError> for LexError {
    fn from(err: ValidationError) -> Self {
        LexError::new(ErrorKind::InvalidInput).with_message(err.to_string())
    }
}

/// Conversion from serde_json::Error to LexError
impl From<serde_json::Error> for LexError {
    fn from(err: serde_json::Error) -> Self {
        LexError::new(ErrorKind::Serialization).with_message(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes_are_stable() {
        let cases = [
            (ErrorKind::InvalidInput, "ERR_INVALID_INPUT"),
            (ErrorKind::NotFound, "ERR_NOT_FOUND"),
            (ErrorKind::Unauthenticated, "ERR_UNAUTHENTICATED"),
            (ErrorKind::RateLimited, "RATE_LIMIT_EXCEEDED"),
            (ErrorKind::Persistence, "ERR_PERSISTENCE"),
            (ErrorKind::ExternalService, "ERR_EXTERNAL_SERVICE"),
            (ErrorKind::Internal, "ERR_INTERNAL"),
        ];
        for (kind, expected_code) in cases {
            assert_eq!(kind.code(), expected_code, "Wrong code for {:?}", kind);
        }
    }

    #[test]
    fn test_error_builder_context() {
        let err = LexError::new(ErrorKind::NotFound)
            .with_op("case_get")
            .with_entity_id("case-9")
            .with_message("Case not found");

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.op(), Some("case_get"));
        assert_eq!(err.entity_id(), Some("case-9"));
        let rendered = err.to_string();
        assert!(rendered.contains("ERR_NOT_FOUND"));
        assert!(rendered.contains("case_get"));
    }

    #[test]
    fn test_validation_error_maps_to_invalid_input() {
        let err: LexError = ValidationError::EmptyTitle.into();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(err.message(), "title cannot be empty");
    }

    #[test]
    fn test_retry_at_defaults_to_none() {
        let err = LexError::new(ErrorKind::RateLimited);
        assert!(err.retry_at().is_none());
    }
}
