// Integration tests for timeline and health queries through the command
// layer: ownership gates, counter sourcing, and the score arithmetic end to
// end against real stored artifacts.

use std::collections::BTreeMap;

use rusqlite::Connection;
use tempfile::TempDir;

use lextrack_core::errors::ErrorKind;
use lextrack_core::model::CasePatch;
use lextrack_engine::commands::artifacts::{
    draft_create, note_add, research_save, summary_save, upload_record, Actor, DraftRequest,
};
use lextrack_engine::commands::case::case_create;
use lextrack_engine::commands::timeline::{case_health, case_timeline};

fn setup_db() -> (TempDir, Connection) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let mut conn = Connection::open(&db_path).unwrap();
    lextrack_store::migrations::apply_migrations(&mut conn).unwrap();
    (temp_dir, conn)
}

#[test]
fn test_case_timeline_owner_gate() {
    let (_tmp, conn) = setup_db();
    let case = case_create(&conn, "user-1", "Sharma v. Verma", CasePatch::default()).unwrap();

    let err = case_timeline(&conn, "user-2", &case.id).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = case_timeline(&conn, "user-1", "no-such-case").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_case_health_baseline_for_untouched_case() {
    let (_tmp, conn) = setup_db();
    let case = case_create(&conn, "user-1", "Sharma v. Verma", CasePatch::default()).unwrap();

    let health = case_health(&conn, "user-1", &case.id).unwrap();
    // the creation event counts as one timeline entry: 20 + 2*1
    assert_eq!(health.score, 22);
}

#[test]
fn test_case_health_owner_gate() {
    let (_tmp, conn) = setup_db();
    let case = case_create(&conn, "user-1", "Sharma v. Verma", CasePatch::default()).unwrap();

    let err = case_health(&conn, "user-2", &case.id).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

// Reference engagement scenario: 2 drafts, 3 AI assists, 1 upload and 4
// timeline entries score 68 with 47 minutes saved.
#[test]
fn test_case_health_reference_scenario() {
    let (_tmp, conn) = setup_db();
    let actor = Actor::authenticated("user-1");
    let case = case_create(&conn, "user-1", "Sharma v. Verma", CasePatch::default()).unwrap();

    // wipe the creation event so timeline entries are exactly the ones below
    conn.execute("DELETE FROM case_activities WHERE case_id = ?1", [&case.id])
        .unwrap();

    // 2 documents generated; each also logs a timeline entry
    for _ in 0..2 {
        draft_create(
            &conn,
            &actor,
            DraftRequest {
                draft_type: "nda".to_string(),
                inputs: BTreeMap::new(),
                title: None,
                case_id: Some(case.id.clone()),
            },
        )
        .unwrap();
    }

    // 3 AI assists: 2 research entries + 1 summary (no case link, so no
    // timeline entries from these)
    research_save(&conn, &actor, "limitation period", "3 years".to_string(), None).unwrap();
    research_save(&conn, &actor, "specific relief", "...".to_string(), None).unwrap();
    summary_save(&conn, &actor, "Judgment", "held...".to_string(), 900, None).unwrap();

    // 1 upload, which logs the 3rd timeline entry
    upload_record(&conn, &actor, &case.id, "evidence.pdf", None, None).unwrap();

    // 4th timeline entry
    note_add(&conn, &actor, &case.id, "Prepare for cross-examination").unwrap();

    let health = case_health(&conn, "user-1", &case.id).unwrap();
    // 20 + min(10*2,30) + min(5*3,25) + min(5*1,15) + min(2*4,10) = 68
    assert_eq!(health.score, 68);
    // 15*2 + 5*3 + 2*1 = 47
    assert_eq!(health.estimated_time_saved, 47);
    assert_eq!(health.counters.documents_generated, 2);
    assert_eq!(health.counters.ai_assists, 3);
    assert_eq!(health.counters.files_uploaded, 1);
    assert_eq!(health.counters.timeline_entries, 4);
}
