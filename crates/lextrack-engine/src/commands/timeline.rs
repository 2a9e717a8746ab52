//! Timeline and engagement-health queries, owner-scoped

#![allow(clippy::result_large_err)]

use rusqlite::Connection;

use lextrack_core::health::{self, CaseHealth};
use lextrack_core::model::Activity;
use lextrack_core::{log_op_end, log_op_error, log_op_start};
use lextrack_store::activity;
use lextrack_store::errors::Result;
use lextrack_store::repo::CaseRepo;

use crate::commands::case::not_found;

/// Fetch a case's activity timeline, newest first
///
/// ## Errors
///
/// - `NotFound`: case missing or owned by someone else
/// - `Persistence`: database error
pub fn case_timeline(conn: &Connection, user_id: &str, case_id: &str) -> Result<Vec<Activity>> {
    log_op_start!("case_timeline", case_id = case_id);
    let start = std::time::Instant::now();

    let result = case_timeline_impl(conn, user_id, case_id).map_err(|e| {
        log_op_error!(
            "case_timeline",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "case_timeline",
        duration_ms = start.elapsed().as_millis() as u64,
        activity_count = result.len()
    );

    Ok(result)
}

fn case_timeline_impl(conn: &Connection, user_id: &str, case_id: &str) -> Result<Vec<Activity>> {
    if CaseRepo::get_case(conn, user_id, case_id)?.is_none() {
        return Err(not_found(case_id));
    }
    activity::list_for_case(conn, case_id)
}

/// Compute the engagement health score for a case
///
/// Counters are recomputed from stored artifacts on every call; nothing is
/// cached, so the score reflects what the database holds right now.
///
/// ## Errors
///
/// - `NotFound`: case missing or owned by someone else
/// - `Persistence`: database error
pub fn case_health(conn: &Connection, user_id: &str, case_id: &str) -> Result<CaseHealth> {
    log_op_start!("case_health", case_id = case_id);
    let start = std::time::Instant::now();

    let result = case_health_impl(conn, user_id, case_id).map_err(|e| {
        log_op_error!(
            "case_health",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "case_health",
        duration_ms = start.elapsed().as_millis() as u64,
        score = result.score
    );

    Ok(result)
}

fn case_health_impl(conn: &Connection, user_id: &str, case_id: &str) -> Result<CaseHealth> {
    if CaseRepo::get_case(conn, user_id, case_id)?.is_none() {
        return Err(not_found(case_id));
    }
    let counters = activity::count_engagement(conn, case_id, user_id)?;
    Ok(health::score(counters))
}
