//! Migration framework
//!
//! Provides:
//! - Migration runner with checksums and gap detection
//! - Idempotent application
//! - Staged application for cut-over testing
//! - Embedded SQL migrations

mod checksums;
mod embedded;
mod runner;

pub use runner::{apply_migrations, apply_migrations_through};
