//! LexTrack Store - SQLite persistence layer
//!
//! Provides:
//! - SQLite connection helpers and embedded migrations with checksums
//! - Staged migration application (models the legacy-to-canonical cut-over)
//! - Case repository with canonical-first load and legacy tracker fallback
//! - The append-only activity log writer with its lossy legacy fallback
//! - Artifact and notification persistence

pub mod activity;
pub mod artifacts;
pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;

// Re-export key types
pub use errors::Result;
