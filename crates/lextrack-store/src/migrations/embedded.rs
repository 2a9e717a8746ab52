//! Embedded SQL migrations
//!
//! Migrations are embedded at compile time using include_str!

/// Migration metadata
pub struct Migration {
    pub id: &'static str,
    pub sql: &'static str,
}

/// Get all embedded migrations in order
///
/// 001 is the legacy tracker schema; 002 is the canonical case ledger
/// (the cut-over point the activity writer's fallback cares about); 003 is
/// the artifact tables.
pub fn get_migrations() -> Vec<Migration> {
    vec![
        Migration {
            id: "001_legacy_tracker",
            sql: include_str!("../../migrations/001_legacy_tracker.sql"),
        },
        Migration {
            id: "002_case_ledger",
            sql: include_str!("../../migrations/002_case_ledger.sql"),
        },
        Migration {
            id: "003_artifacts",
            sql: include_str!("../../migrations/003_artifacts.sql"),
        },
    ]
}
