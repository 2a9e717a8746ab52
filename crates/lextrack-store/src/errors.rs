//! Error handling for lextrack-store
//!
//! Wraps lextrack-core LexError with store-specific helpers

use lextrack_core::errors::{ErrorKind, LexError};

/// Result type alias using LexError
pub type Result<T> = std::result::Result<T, LexError>;

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> LexError {
    LexError::new(ErrorKind::Persistence)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> LexError {
    LexError::new(ErrorKind::Persistence)
        .with_op("migration_checksum")
        .with_message(format!(
            "Checksum mismatch for migration {}: expected {}, got {}",
            migration_id, expected, actual
        ))
}

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> LexError {
    LexError::new(ErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}
