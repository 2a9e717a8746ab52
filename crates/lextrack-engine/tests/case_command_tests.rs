// Integration tests for case command handlers.
// Covers create, update, delete, list, get, and the timeline events each
// mutation leaves behind.

use chrono::{TimeZone, Utc};
use rusqlite::Connection;
use tempfile::TempDir;

use lextrack_core::errors::ErrorKind;
use lextrack_core::model::{CasePatch, CaseStatus};
use lextrack_engine::commands::case::{
    case_create, case_delete, case_get, case_list, case_update,
};
use lextrack_engine::commands::timeline::case_timeline;

fn setup_db() -> (TempDir, Connection) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let mut conn = Connection::open(&db_path).unwrap();
    lextrack_store::migrations::apply_migrations(&mut conn).unwrap();
    (temp_dir, conn)
}

// ---------------------------------------------------------------------------
// case_create
// ---------------------------------------------------------------------------

#[test]
fn test_case_create_happy_path() {
    let (_tmp, conn) = setup_db();

    let case = case_create(&conn, "user-1", "Sharma v. Verma", CasePatch::default()).unwrap();

    assert!(!case.id.is_empty());
    assert_eq!(case.title, "Sharma v. Verma");
    assert_eq!(case.status, CaseStatus::Open);

    // the creation itself lands on the timeline
    let timeline = case_timeline(&conn, "user-1", &case.id).unwrap();
    assert_eq!(timeline.len(), 1);
    assert_eq!(timeline[0].kind, "CASE_CREATED");
    assert_eq!(timeline[0].title, "Case Created");
    assert_eq!(timeline[0].content, "Sharma v. Verma");
}

#[test]
fn test_case_create_trims_title() {
    let (_tmp, conn) = setup_db();

    let case = case_create(&conn, "user-1", "  Estate of Rao  ", CasePatch::default()).unwrap();
    assert_eq!(case.title, "Estate of Rao");
}

#[test]
fn test_case_create_rejects_blank_title() {
    let (_tmp, conn) = setup_db();

    let err = case_create(&conn, "user-1", "   ", CasePatch::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[test]
fn test_case_create_applies_patch_fields() {
    let (_tmp, conn) = setup_db();

    let patch = CasePatch {
        cnr_number: Some("DLHC010012342023".to_string()),
        court: Some("Delhi High Court".to_string()),
        ..Default::default()
    };
    let case = case_create(&conn, "user-1", "Writ Petition 42", patch).unwrap();

    let fetched = case_get(&conn, "user-1", &case.id).unwrap();
    assert_eq!(fetched.cnr_number.as_deref(), Some("DLHC010012342023"));
    assert_eq!(fetched.court.as_deref(), Some("Delhi High Court"));
}

// ---------------------------------------------------------------------------
// case_update
// ---------------------------------------------------------------------------

#[test]
fn test_case_update_status_change_hits_timeline() {
    let (_tmp, conn) = setup_db();
    let case = case_create(&conn, "user-1", "Sharma v. Verma", CasePatch::default()).unwrap();

    let patch = CasePatch {
        status: Some(CaseStatus::Hearing),
        ..Default::default()
    };
    let updated = case_update(&conn, "user-1", &case.id, patch).unwrap();
    assert_eq!(updated.status, CaseStatus::Hearing);

    let timeline = case_timeline(&conn, "user-1", &case.id).unwrap();
    // newest first
    assert_eq!(timeline[0].kind, "STATUS_CHANGED");
    assert_eq!(timeline[0].title, "Status changed to HEARING");
    assert_eq!(timeline[0].content, "Status updated from OPEN to HEARING");
}

#[test]
fn test_case_update_first_hearing_is_scheduled_then_rescheduled() {
    let (_tmp, conn) = setup_db();
    let case = case_create(&conn, "user-1", "Sharma v. Verma", CasePatch::default()).unwrap();

    let first = Utc.with_ymd_and_hms(2026, 9, 14, 10, 0, 0).unwrap();
    let patch = CasePatch {
        next_hearing: Some(first),
        ..Default::default()
    };
    case_update(&conn, "user-1", &case.id, patch).unwrap();

    let timeline = case_timeline(&conn, "user-1", &case.id).unwrap();
    assert_eq!(timeline[0].kind, "HEARING_ADDED");
    assert_eq!(timeline[0].title, "Hearing Scheduled");
    assert_eq!(timeline[0].content, "Next hearing on 14/09/2026");

    let second = Utc.with_ymd_and_hms(2026, 10, 2, 10, 0, 0).unwrap();
    let patch = CasePatch {
        next_hearing: Some(second),
        ..Default::default()
    };
    case_update(&conn, "user-1", &case.id, patch).unwrap();

    let timeline = case_timeline(&conn, "user-1", &case.id).unwrap();
    assert_eq!(timeline[0].kind, "HEARING_UPDATED");
    assert_eq!(timeline[0].title, "Hearing Rescheduled");
    assert_eq!(timeline[0].content, "Next hearing on 02/10/2026");
}

#[test]
fn test_case_update_client_link_hits_timeline() {
    let (_tmp, conn) = setup_db();
    let case = case_create(&conn, "user-1", "Sharma v. Verma", CasePatch::default()).unwrap();

    let patch = CasePatch {
        client_id: Some("client-7".to_string()),
        client_name: Some("Asha Mehta".to_string()),
        ..Default::default()
    };
    case_update(&conn, "user-1", &case.id, patch).unwrap();

    let timeline = case_timeline(&conn, "user-1", &case.id).unwrap();
    assert_eq!(timeline[0].kind, "CLIENT_LINKED");
    assert_eq!(timeline[0].content, "Case linked to Asha Mehta");
}

#[test]
fn test_case_update_plain_field_edit_emits_generic_event() {
    let (_tmp, conn) = setup_db();
    let case = case_create(&conn, "user-1", "Sharma v. Verma", CasePatch::default()).unwrap();

    let patch = CasePatch {
        judge: Some("Hon. Justice Iyer".to_string()),
        ..Default::default()
    };
    case_update(&conn, "user-1", &case.id, patch).unwrap();

    let timeline = case_timeline(&conn, "user-1", &case.id).unwrap();
    assert_eq!(timeline[0].kind, "CASE_UPDATED");
    assert_eq!(timeline[0].content, "Case details were updated");
}

#[test]
fn test_case_update_cross_owner_is_not_found() {
    let (_tmp, conn) = setup_db();
    let case = case_create(&conn, "user-1", "Sharma v. Verma", CasePatch::default()).unwrap();

    let patch = CasePatch {
        status: Some(CaseStatus::Closed),
        ..Default::default()
    };
    let err = case_update(&conn, "user-2", &case.id, patch).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    // untouched
    let fetched = case_get(&conn, "user-1", &case.id).unwrap();
    assert_eq!(fetched.status, CaseStatus::Open);
}

// ---------------------------------------------------------------------------
// case_delete / case_get / case_list
// ---------------------------------------------------------------------------

#[test]
fn test_case_delete_owner_scoped() {
    let (_tmp, conn) = setup_db();
    let case = case_create(&conn, "user-1", "Sharma v. Verma", CasePatch::default()).unwrap();

    let err = case_delete(&conn, "user-2", &case.id).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    case_delete(&conn, "user-1", &case.id).unwrap();
    let err = case_get(&conn, "user-1", &case.id).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_case_list_only_own_cases() {
    let (_tmp, conn) = setup_db();
    case_create(&conn, "user-1", "Case A", CasePatch::default()).unwrap();
    case_create(&conn, "user-1", "Case B", CasePatch::default()).unwrap();
    case_create(&conn, "user-2", "Case C", CasePatch::default()).unwrap();

    let cases = case_list(&conn, "user-1");
    assert_eq!(cases.len(), 2);
    assert!(cases.iter().all(|c| c.user_id == "user-1"));
}

#[test]
fn test_case_get_missing_is_not_found() {
    let (_tmp, conn) = setup_db();
    let err = case_get(&conn, "user-1", "no-such-case").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}
