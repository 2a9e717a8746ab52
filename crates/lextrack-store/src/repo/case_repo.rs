//! Case repository
//!
//! Reads resolve against two schemas: the canonical `cases` table first, then
//! the legacy `case_trackers` table for accounts that predate the cut-over.
//! The legacy path is a one-way, read-time shim; rows are never migrated
//! forward and mutations only ever touch the canonical table.

#![allow(clippy::result_large_err)]

use chrono::DateTime;
use rusqlite::{Connection, OptionalExtension, Row};

use lextrack_core::model::{Case, CaseStatus, CaseType, Priority};
use lextrack_core::model::case::CaseStage;

use crate::errors::{from_rusqlite, Result};

const CASE_COLUMNS: &str = "id, user_id, title, cnr_number, case_number, case_type, court, judge, \
     petitioner, respondent, client_id, client_name, status, stage, priority, \
     filing_date, next_hearing, notes, ai_summary, ai_prediction, created_at, updated_at";

/// SQLite repository for cases
pub struct CaseRepo;

impl CaseRepo {
    /// Load all cases owned by a user, most recently updated first
    ///
    /// Canonical table first; if the user has no canonical rows, fall back to
    /// mapping their legacy tracker rows. Derived counts are recomputed from
    /// the activity log and upload table on every load.
    pub fn load_cases(conn: &Connection, user_id: &str) -> Result<Vec<Case>> {
        let mut cases = Self::load_canonical(conn, user_id)?;
        if cases.is_empty() {
            cases = Self::load_legacy(conn, user_id)?;
            if !cases.is_empty() {
                tracing::debug!(
                    user_id = %user_id,
                    case_count = cases.len(),
                    "serving cases from legacy tracker schema"
                );
            }
        }
        for case in &mut cases {
            refresh_counts(conn, case);
        }
        Ok(cases)
    }

    /// Load a single case by id, owner-scoped; both schemas consulted
    pub fn get_case(conn: &Connection, user_id: &str, case_id: &str) -> Result<Option<Case>> {
        let sql = format!("SELECT {CASE_COLUMNS} FROM cases WHERE id = ?1 AND user_id = ?2");
        let canonical = conn
            .query_row(&sql, rusqlite::params![case_id, user_id], map_case_row)
            .optional()
            .map_err(from_rusqlite)?;

        let mut found = match canonical {
            Some(c) => Some(c),
            None => conn
                .query_row(
                    "SELECT id, user_id, party_name, cnr, case_number, court, status, next_date, details, created_at, updated_at
                     FROM case_trackers WHERE id = ?1 AND user_id = ?2",
                    rusqlite::params![case_id, user_id],
                    map_tracker_row,
                )
                .optional()
                .map_err(from_rusqlite)?,
        };

        if let Some(case) = &mut found {
            refresh_counts(conn, case);
        }
        Ok(found)
    }

    /// Insert a new case into the canonical table
    pub fn create_case(conn: &Connection, case: &Case) -> Result<()> {
        conn.execute(
            &format!(
                "INSERT INTO cases ({CASE_COLUMNS})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22)"
            ),
            rusqlite::params![
                case.id,
                case.user_id,
                case.title,
                case.cnr_number,
                case.case_number,
                case.case_type.as_str(),
                case.court,
                case.judge,
                case.petitioner,
                case.respondent,
                case.client_id,
                case.client_name,
                case.status.as_str(),
                case.stage.map(|s| s.as_str()),
                case.priority.as_str(),
                case.filing_date.map(|d| d.timestamp()),
                case.next_hearing.map(|d| d.timestamp()),
                case.notes,
                case.ai_summary,
                case.ai_prediction,
                case.created_at.timestamp(),
                case.updated_at.timestamp(),
            ],
        )
        .map_err(from_rusqlite)?;

        Ok(())
    }

    /// Persist an updated case, owner-scoped
    ///
    /// Returns `false` when no canonical row matched (missing or not owned).
    pub fn update_case(conn: &Connection, case: &Case) -> Result<bool> {
        let rows = conn
            .execute(
                "UPDATE cases SET
                    title = ?3, cnr_number = ?4, case_number = ?5, case_type = ?6,
                    court = ?7, judge = ?8, petitioner = ?9, respondent = ?10,
                    client_id = ?11, client_name = ?12, status = ?13, stage = ?14,
                    priority = ?15, filing_date = ?16, next_hearing = ?17, notes = ?18,
                    ai_summary = ?19, ai_prediction = ?20, updated_at = ?21
                 WHERE id = ?1 AND user_id = ?2",
                rusqlite::params![
                    case.id,
                    case.user_id,
                    case.title,
                    case.cnr_number,
                    case.case_number,
                    case.case_type.as_str(),
                    case.court,
                    case.judge,
                    case.petitioner,
                    case.respondent,
                    case.client_id,
                    case.client_name,
                    case.status.as_str(),
                    case.stage.map(|s| s.as_str()),
                    case.priority.as_str(),
                    case.filing_date.map(|d| d.timestamp()),
                    case.next_hearing.map(|d| d.timestamp()),
                    case.notes,
                    case.ai_summary,
                    case.ai_prediction,
                    case.updated_at.timestamp(),
                ],
            )
            .map_err(from_rusqlite)?;

        Ok(rows > 0)
    }

    /// Delete a case, owner-scoped
    ///
    /// Activities and artifacts are weak references and stay behind.
    pub fn delete_case(conn: &Connection, user_id: &str, case_id: &str) -> Result<bool> {
        let rows = conn
            .execute(
                "DELETE FROM cases WHERE id = ?1 AND user_id = ?2",
                rusqlite::params![case_id, user_id],
            )
            .map_err(from_rusqlite)?;

        Ok(rows > 0)
    }

    fn load_canonical(conn: &Connection, user_id: &str) -> Result<Vec<Case>> {
        let sql = format!(
            "SELECT {CASE_COLUMNS} FROM cases WHERE user_id = ?1 ORDER BY updated_at DESC"
        );
        let mut stmt = conn.prepare(&sql).map_err(from_rusqlite)?;
        let rows = stmt
            .query_map([user_id], map_case_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(rows)
    }

    fn load_legacy(conn: &Connection, user_id: &str) -> Result<Vec<Case>> {
        let mut stmt = conn
            .prepare(
                "SELECT id, user_id, party_name, cnr, case_number, court, status, next_date, details, created_at, updated_at
                 FROM case_trackers WHERE user_id = ?1 ORDER BY updated_at DESC",
            )
            .map_err(from_rusqlite)?;
        let rows = stmt
            .query_map([user_id], map_tracker_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(rows)
    }
}

/// Map a canonical `cases` row into a `Case`
///
/// Lenient on enum fields: an unrecognized stored value falls back to the
/// default rather than failing the whole load.
pub fn map_case_row(row: &Row<'_>) -> rusqlite::Result<Case> {
    let case_type: String = row.get(5)?;
    let status: String = row.get(12)?;
    let stage: Option<String> = row.get(13)?;
    let priority: String = row.get(14)?;
    let filing_date: Option<i64> = row.get(15)?;
    let next_hearing: Option<i64> = row.get(16)?;
    let created_at: i64 = row.get(20)?;
    let updated_at: i64 = row.get(21)?;

    Ok(Case {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        cnr_number: row.get(3)?,
        case_number: row.get(4)?,
        case_type: CaseType::parse(&case_type).unwrap_or_default(),
        court: row.get(6)?,
        judge: row.get(7)?,
        petitioner: row.get(8)?,
        respondent: row.get(9)?,
        client_id: row.get(10)?,
        client_name: row.get(11)?,
        status: CaseStatus::parse(&status).unwrap_or(CaseStatus::Open),
        stage: stage.as_deref().and_then(|s| CaseStage::parse(s).ok()),
        priority: Priority::parse(&priority).unwrap_or_default(),
        filing_date: filing_date.and_then(|t| DateTime::from_timestamp(t, 0)),
        next_hearing: next_hearing.and_then(|t| DateTime::from_timestamp(t, 0)),
        notes: row.get(17)?,
        ai_summary: row.get(18)?,
        ai_prediction: row.get(19)?,
        created_at: DateTime::from_timestamp(created_at, 0).unwrap_or_default(),
        updated_at: DateTime::from_timestamp(updated_at, 0).unwrap_or_default(),
        activities_count: 0,
        hearings_count: 0,
        documents_count: 0,
    })
}

/// Map a legacy `case_trackers` row into a `Case`
///
/// Field mapping per the legacy schema: `party_name` doubles as title and
/// petitioner, `cnr` becomes the CNR number, `details` is a JSON blob that
/// may carry `caseType` and `respondent`. Missing values take the canonical
/// defaults (GENERAL / OPEN / MEDIUM).
pub fn map_tracker_row(row: &Row<'_>) -> rusqlite::Result<Case> {
    let party_name: Option<String> = row.get(2)?;
    let status: Option<String> = row.get(6)?;
    let next_date: Option<i64> = row.get(7)?;
    let details_raw: Option<String> = row.get(8)?;
    let created_at: i64 = row.get(9)?;
    let updated_at: i64 = row.get(10)?;

    let details: serde_json::Value = details_raw
        .as_deref()
        .and_then(|s| serde_json::from_str(s).ok())
        .unwrap_or(serde_json::Value::Null);

    let case_type = details["caseType"]
        .as_str()
        .and_then(|s| CaseType::parse(s).ok())
        .unwrap_or_default();
    let respondent = details["respondent"].as_str().map(str::to_string);

    let title = party_name.clone().unwrap_or_else(|| "Untitled case".to_string());

    Ok(Case {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title,
        cnr_number: row.get(3)?,
        case_number: row.get(4)?,
        case_type,
        court: row.get(5)?,
        judge: None,
        petitioner: party_name,
        respondent,
        client_id: None,
        client_name: None,
        status: status
            .as_deref()
            .and_then(|s| CaseStatus::parse(s).ok())
            .unwrap_or(CaseStatus::Open),
        stage: None,
        priority: Priority::Medium,
        filing_date: None,
        next_hearing: next_date.and_then(|t| DateTime::from_timestamp(t, 0)),
        notes: None,
        ai_summary: None,
        ai_prediction: None,
        created_at: DateTime::from_timestamp(created_at, 0).unwrap_or_default(),
        updated_at: DateTime::from_timestamp(updated_at, 0).unwrap_or_default(),
        activities_count: 0,
        hearings_count: 0,
        documents_count: 0,
    })
}

/// Recompute the derived counts from the event log and upload table
///
/// Counts degrade to zero when a table is unavailable (pre-cut-over
/// databases); they are projections, never authoritative.
fn refresh_counts(conn: &Connection, case: &mut Case) {
    case.activities_count = scalar_count(
        conn,
        "SELECT COUNT(*) FROM case_activities WHERE case_id = ?1",
        &case.id,
    );
    case.hearings_count = scalar_count(
        conn,
        "SELECT COUNT(*) FROM case_activities WHERE case_id = ?1 AND type IN ('HEARING_ADDED', 'HEARING_UPDATED')",
        &case.id,
    );
    case.documents_count = scalar_count(
        conn,
        "SELECT COUNT(*) FROM uploaded_files WHERE case_id = ?1",
        &case.id,
    );
}

fn scalar_count(conn: &Connection, sql: &str, id: &str) -> u32 {
    match conn.query_row(sql, [id], |row| row.get::<_, u32>(0)) {
        Ok(n) => n,
        Err(e) => {
            tracing::debug!(case_id = %id, error = %e, "derived count unavailable");
            0
        }
    }
}
