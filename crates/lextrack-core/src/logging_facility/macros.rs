//! Canonical logging macros
//!
//! These macros provide a structured, consistent way to log operations.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use lextrack_core::log_op_start;
/// log_op_start!("case_create");
/// log_op_start!("case_create", case_id = "c123");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = lextrack_core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = lextrack_core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use lextrack_core::log_op_end;
/// log_op_end!("case_create", duration_ms = 42);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = lextrack_core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = lextrack_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// # Example
///
/// ```
/// # use lextrack_core::log_op_error;
/// # use lextrack_core::errors::{ErrorKind, LexError};
/// let err = LexError::new(ErrorKind::NotFound).with_entity_id("case-1");
/// log_op_error!("case_get", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        use $crate::errors::LexError;
        let lex_err: LexError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = lextrack_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?lex_err.kind(),
            err_code = lex_err.code(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        use $crate::errors::LexError;
        let lex_err: LexError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = lextrack_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?lex_err.kind(),
            err_code = lex_err.code(),
            $($field)*
        );
    }};
}
