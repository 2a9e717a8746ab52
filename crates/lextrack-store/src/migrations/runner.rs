//! Migration runner
//!
//! Applies migrations with checksums, gap detection, and idempotency

#![allow(clippy::result_large_err)]

use crate::errors::{checksum_mismatch, from_rusqlite, migration_error, Result};
use crate::migrations::checksums::compute_checksum;
use crate::migrations::embedded::get_migrations;
use rusqlite::Connection;

/// Apply all pending migrations to the database
pub fn apply_migrations(conn: &mut Connection) -> Result<()> {
    apply_up_to(conn, None)
}

/// Apply migrations up to and including `last_id`
///
/// Used to stand up a pre-cut-over database in tests (e.g. legacy tracker
/// only, no `case_activities`). Unknown ids are a hard error.
pub fn apply_migrations_through(conn: &mut Connection, last_id: &str) -> Result<()> {
    if !get_migrations().iter().any(|m| m.id == last_id) {
        return Err(migration_error(last_id, "unknown migration id"));
    }
    apply_up_to(conn, Some(last_id))
}

fn apply_up_to(conn: &mut Connection, last_id: Option<&str>) -> Result<()> {
    create_schema_version_table(conn)?;

    let migrations = get_migrations();
    verify_applied(conn, &migrations)?;

    for migration in &migrations {
        apply_migration(conn, migration.id, migration.sql)?;
        if last_id == Some(migration.id) {
            break;
        }
    }

    Ok(())
}

/// Verify already-applied migrations against the embedded set
///
/// Detects two corruption modes: an applied migration the binary does not
/// know (gap/downgrade) and an applied migration whose recorded checksum no
/// longer matches the embedded SQL (tampering).
fn verify_applied(conn: &Connection, migrations: &[super::embedded::Migration]) -> Result<()> {
    let mut stmt = conn
        .prepare("SELECT migration_id, checksum FROM schema_version ORDER BY id")
        .map_err(from_rusqlite)?;
    let applied: Vec<(String, Option<String>)> = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;

    for (idx, (applied_id, recorded_checksum)) in applied.iter().enumerate() {
        let Some(embedded) = migrations.get(idx) else {
            return Err(migration_error(applied_id, "applied but not embedded"));
        };
        if embedded.id != applied_id {
            return Err(migration_error(
                applied_id,
                &format!("order gap: expected {} at position {}", embedded.id, idx),
            ));
        }
        if let Some(recorded) = recorded_checksum {
            let expected = compute_checksum(embedded.sql);
            if recorded != &expected {
                return Err(checksum_mismatch(applied_id, &expected, recorded));
            }
        }
    }

    Ok(())
}

/// Create the schema_version table if it doesn't exist
fn create_schema_version_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            id INTEGER PRIMARY KEY,
            migration_id TEXT NOT NULL UNIQUE,
            applied_at INTEGER NOT NULL,
            checksum TEXT
        )",
        [],
    )
    .map_err(from_rusqlite)?;

    Ok(())
}

/// Apply a single migration if not already applied
fn apply_migration(conn: &mut Connection, migration_id: &str, sql: &str) -> Result<()> {
    // Check if migration already applied
    let already_applied: bool = conn
        .query_row(
            "SELECT 1 FROM schema_version WHERE migration_id = ?",
            [migration_id],
            |_| Ok(true),
        )
        .unwrap_or(false);

    if already_applied {
        // Idempotent: already applied
        return Ok(());
    }

    // Compute checksum
    let checksum = compute_checksum(sql);

    // Start transaction
    let tx = conn.transaction().map_err(from_rusqlite)?;

    // Execute migration SQL
    tx.execute_batch(sql)
        .map_err(|e| migration_error(migration_id, &e.to_string()))?;

    // Record migration
    let now = chrono::Utc::now().timestamp();
    tx.execute(
        "INSERT INTO schema_version (migration_id, applied_at, checksum) VALUES (?, ?, ?)",
        rusqlite::params![migration_id, now, checksum],
    )
    .map_err(from_rusqlite)?;

    // Commit transaction
    tx.commit().map_err(from_rusqlite)?;

    Ok(())
}
