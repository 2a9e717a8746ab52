//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";
pub const FIELD_TRACE_ID: &str = "trace_id";

// Entity identifiers
pub const FIELD_CASE_ID: &str = "case_id";
pub const FIELD_USER_ID: &str = "user_id";
pub const FIELD_ACTIVITY_TYPE: &str = "activity_type";
pub const FIELD_REFERENCE_ID: &str = "reference_id";

// Collection sizes (log lengths, never content)
pub const FIELD_CASE_COUNT: &str = "case_count";
pub const FIELD_ACTIVITY_COUNT: &str = "activity_count";
pub const FIELD_CONTENT_LEN: &str = "content_len";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
