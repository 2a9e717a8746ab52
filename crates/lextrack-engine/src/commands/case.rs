//! Case command handlers with boundary logging
//!
//! Mutations propagate storage errors; the list query degrades to an empty
//! collection because a dashboard with zero cases beats a dead dashboard.
//! Every mutation feeds the timeline through the activity writer, and those
//! writes are best-effort by contract.

#![allow(clippy::result_large_err)]

use rusqlite::Connection;
use uuid::Uuid;

use lextrack_core::errors::{ErrorKind, LexError, ValidationError};
use lextrack_core::model::case::PatchOutcome;
use lextrack_core::model::{ActivityDraft, ActivityKind, Case, CasePatch, Feature};
use lextrack_core::{log_op_end, log_op_error, log_op_start};
use lextrack_store::activity;
use lextrack_store::errors::Result;
use lextrack_store::repo::CaseRepo;

/// Create a new case for a user
///
/// ## Errors
///
/// - `InvalidInput`: empty title
/// - `Persistence`: database error
pub fn case_create(
    conn: &Connection,
    user_id: &str,
    title: &str,
    patch: CasePatch,
) -> Result<Case> {
    log_op_start!("case_create", user_id = user_id);
    let start = std::time::Instant::now();

    let result = case_create_impl(conn, user_id, title, patch).map_err(|e| {
        log_op_error!(
            "case_create",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "case_create",
        duration_ms = start.elapsed().as_millis() as u64,
        case_id = &result.id
    );

    Ok(result)
}

fn case_create_impl(
    conn: &Connection,
    user_id: &str,
    title: &str,
    patch: CasePatch,
) -> Result<Case> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationError::EmptyTitle.into());
    }

    let mut case = Case::new(
        Uuid::now_v7().to_string(),
        user_id.to_string(),
        title.to_string(),
    );
    patch.apply_to(&mut case);

    CaseRepo::create_case(conn, &case)?;

    // Best-effort timeline seed; the case exists either way
    let draft = ActivityDraft::new(
        &case.id,
        user_id,
        ActivityKind::CaseCreated,
        "Case Created",
        &case.title,
    )
    .with_feature(Feature::CaseTracker);
    activity::record(conn, &draft);

    Ok(case)
}

/// Apply a partial update to a case, owner-scoped
///
/// Emits the matching timeline events for status changes, hearing moves and
/// client links; plain field edits emit a generic update event.
///
/// ## Errors
///
/// - `NotFound`: case missing or owned by someone else
/// - `Persistence`: database error
pub fn case_update(
    conn: &Connection,
    user_id: &str,
    case_id: &str,
    patch: CasePatch,
) -> Result<Case> {
    log_op_start!("case_update", case_id = case_id);
    let start = std::time::Instant::now();

    let result = case_update_impl(conn, user_id, case_id, patch).map_err(|e| {
        log_op_error!(
            "case_update",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "case_update",
        duration_ms = start.elapsed().as_millis() as u64
    );

    Ok(result)
}

fn case_update_impl(
    conn: &Connection,
    user_id: &str,
    case_id: &str,
    patch: CasePatch,
) -> Result<Case> {
    let mut case = CaseRepo::get_case(conn, user_id, case_id)?
        .ok_or_else(|| not_found(case_id))?;

    let outcome = patch.apply_to(&mut case);

    if !CaseRepo::update_case(conn, &case)? {
        // Legacy-only rows have no canonical counterpart to update
        return Err(not_found(case_id));
    }

    record_patch_activities(conn, &case, &outcome);

    Ok(case)
}

fn record_patch_activities(conn: &Connection, case: &Case, outcome: &PatchOutcome) {
    let mut specific = false;

    if let Some((old, new)) = &outcome.status_change {
        specific = true;
        let draft = ActivityDraft::new(
            &case.id,
            &case.user_id,
            ActivityKind::StatusChanged,
            format!("Status changed to {}", new.as_str()),
            format!("Status updated from {} to {}", old.as_str(), new.as_str()),
        )
        .with_feature(Feature::CaseTracker);
        activity::record(conn, &draft);
    }

    if outcome.hearing_added || outcome.hearing_updated {
        specific = true;
        let (kind, title) = if outcome.hearing_added {
            (ActivityKind::HearingAdded, "Hearing Scheduled")
        } else {
            (ActivityKind::HearingUpdated, "Hearing Rescheduled")
        };
        let when = case
            .next_hearing
            .map(|d| d.format("%d/%m/%Y").to_string())
            .unwrap_or_default();
        let draft = ActivityDraft::new(
            &case.id,
            &case.user_id,
            kind,
            title,
            format!("Next hearing on {when}"),
        )
        .with_feature(Feature::CaseTracker);
        activity::record(conn, &draft);
    }

    if outcome.client_linked {
        specific = true;
        let client = case.client_name.as_deref().unwrap_or("client");
        let draft = ActivityDraft::new(
            &case.id,
            &case.user_id,
            ActivityKind::ClientLinked,
            "Client Linked",
            format!("Case linked to {client}"),
        )
        .with_feature(Feature::Crm);
        activity::record(conn, &draft);
    }

    if !specific {
        let draft = ActivityDraft::new(
            &case.id,
            &case.user_id,
            ActivityKind::CaseUpdated,
            "Case Updated",
            "Case details were updated",
        )
        .with_feature(Feature::CaseTracker);
        activity::record(conn, &draft);
    }
}

/// Delete a case, owner-scoped
///
/// ## Errors
///
/// - `NotFound`: case missing or owned by someone else
/// - `Persistence`: database error
pub fn case_delete(conn: &Connection, user_id: &str, case_id: &str) -> Result<()> {
    log_op_start!("case_delete", case_id = case_id);
    let start = std::time::Instant::now();

    let deleted = CaseRepo::delete_case(conn, user_id, case_id).map_err(|e| {
        log_op_error!(
            "case_delete",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    if !deleted {
        let err = not_found(case_id);
        log_op_error!(
            "case_delete",
            err.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        return Err(err);
    }

    log_op_end!(
        "case_delete",
        duration_ms = start.elapsed().as_millis() as u64
    );

    Ok(())
}

/// List a user's cases, most recently updated first
///
/// Storage failures degrade to an empty collection; the failure is logged
/// here and the caller serves what it has.
pub fn case_list(conn: &Connection, user_id: &str) -> Vec<Case> {
    log_op_start!("case_list", user_id = user_id);
    let start = std::time::Instant::now();

    match CaseRepo::load_cases(conn, user_id) {
        Ok(cases) => {
            log_op_end!(
                "case_list",
                duration_ms = start.elapsed().as_millis() as u64,
                case_count = cases.len()
            );
            cases
        }
        Err(e) => {
            log_op_error!(
                "case_list",
                e,
                duration_ms = start.elapsed().as_millis() as u64
            );
            Vec::new()
        }
    }
}

/// Fetch one case, owner-scoped
///
/// ## Errors
///
/// - `NotFound`: case missing or owned by someone else
/// - `Persistence`: database error
pub fn case_get(conn: &Connection, user_id: &str, case_id: &str) -> Result<Case> {
    log_op_start!("case_get", case_id = case_id);
    let start = std::time::Instant::now();

    let result = CaseRepo::get_case(conn, user_id, case_id)
        .and_then(|found| found.ok_or_else(|| not_found(case_id)))
        .map_err(|e| {
            log_op_error!(
                "case_get",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            e
        })?;

    log_op_end!(
        "case_get",
        duration_ms = start.elapsed().as_millis() as u64
    );

    Ok(result)
}

pub(crate) fn not_found(case_id: &str) -> LexError {
    LexError::new(ErrorKind::NotFound)
        .with_entity_id(case_id)
        .with_message("Case not found")
}
