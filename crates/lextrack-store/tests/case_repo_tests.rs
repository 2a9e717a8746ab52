// Integration tests for the case repository:
// canonical reads, legacy fallback mapping, owner scoping, derived counts

use chrono::Utc;
use rusqlite::Connection;

use lextrack_core::model::{ActivityDraft, ActivityKind, Case, CaseStatus, CaseType, Priority};
use lextrack_store::repo::CaseRepo;

fn migrated_db() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    lextrack_store::migrations::apply_migrations(&mut conn).unwrap();
    conn
}

fn sample_case(id: &str, user_id: &str, title: &str) -> Case {
    Case::new(id.to_string(), user_id.to_string(), title.to_string())
}

fn seed_tracker(conn: &Connection, id: &str, user_id: &str) {
    conn.execute(
        "INSERT INTO case_trackers (id, user_id, party_name, cnr, case_number, court, status, next_date, details, created_at, updated_at)
         VALUES (?1, ?2, 'Sharma vs. Gupta', 'DLHC010012342023', 'CS/123/2023', 'Delhi High Court',
                 'pending', 1893456000, '{\"caseType\":\"CIVIL\",\"respondent\":\"Gupta\"}', 1700000000, 1700000000)",
        rusqlite::params![id, user_id],
    )
    .unwrap();
}

#[test]
fn test_create_and_load_round_trip() {
    let conn = migrated_db();
    let mut case = sample_case("case-1", "user-1", "State vs. Rao");
    case.case_type = CaseType::Criminal;
    case.priority = Priority::High;
    CaseRepo::create_case(&conn, &case).unwrap();

    let cases = CaseRepo::load_cases(&conn, "user-1").unwrap();
    assert_eq!(cases.len(), 1);
    assert_eq!(cases[0].title, "State vs. Rao");
    assert_eq!(cases[0].case_type, CaseType::Criminal);
    assert_eq!(cases[0].priority, Priority::High);
    assert_eq!(cases[0].status, CaseStatus::Open);
}

#[test]
fn test_load_is_owner_scoped() {
    let conn = migrated_db();
    CaseRepo::create_case(&conn, &sample_case("case-1", "user-1", "Mine")).unwrap();
    CaseRepo::create_case(&conn, &sample_case("case-2", "user-2", "Theirs")).unwrap();

    let cases = CaseRepo::load_cases(&conn, "user-1").unwrap();
    assert_eq!(cases.len(), 1);
    assert_eq!(cases[0].id, "case-1");

    // Cross-owner point read resolves to nothing
    assert!(CaseRepo::get_case(&conn, "user-1", "case-2")
        .unwrap()
        .is_none());
}

#[test]
fn test_legacy_fallback_mapping() {
    // Given: A user with tracker rows only
    let conn = migrated_db();
    seed_tracker(&conn, "trk-1", "user-1");

    // When: Their cases are loaded
    let cases = CaseRepo::load_cases(&conn, "user-1").unwrap();

    // Then: The tracker row maps onto the canonical shape
    assert_eq!(cases.len(), 1);
    let c = &cases[0];
    assert_eq!(c.title, "Sharma vs. Gupta");
    assert_eq!(c.petitioner.as_deref(), Some("Sharma vs. Gupta"));
    assert_eq!(c.respondent.as_deref(), Some("Gupta"));
    assert_eq!(c.cnr_number.as_deref(), Some("DLHC010012342023"));
    assert_eq!(c.case_type, CaseType::Civil);
    assert_eq!(c.status, CaseStatus::Pending); // upper-cased on read
    assert_eq!(c.priority, Priority::Medium); // legacy default
    assert!(c.next_hearing.is_some());
}

#[test]
fn test_canonical_rows_shadow_legacy() {
    // Given: A user with rows in both schemas
    let conn = migrated_db();
    seed_tracker(&conn, "trk-1", "user-1");
    CaseRepo::create_case(&conn, &sample_case("case-1", "user-1", "Canonical")).unwrap();

    // Then: Only the canonical rows are served
    let cases = CaseRepo::load_cases(&conn, "user-1").unwrap();
    assert_eq!(cases.len(), 1);
    assert_eq!(cases[0].id, "case-1");
}

#[test]
fn test_legacy_row_with_malformed_details() {
    let conn = migrated_db();
    conn.execute(
        "INSERT INTO case_trackers (id, user_id, party_name, status, details, created_at, updated_at)
         VALUES ('trk-1', 'user-1', 'Solo Party', 'open', 'not json at all', 1700000000, 1700000000)",
        [],
    )
    .unwrap();

    let cases = CaseRepo::load_cases(&conn, "user-1").unwrap();
    assert_eq!(cases.len(), 1);
    assert_eq!(cases[0].case_type, CaseType::General);
    assert!(cases[0].respondent.is_none());
}

#[test]
fn test_update_case_owner_scoped() {
    let conn = migrated_db();
    let mut case = sample_case("case-1", "user-1", "Before");
    CaseRepo::create_case(&conn, &case).unwrap();

    case.title = "After".to_string();
    case.status = CaseStatus::Hearing;
    case.updated_at = Utc::now();
    assert!(CaseRepo::update_case(&conn, &case).unwrap());

    let loaded = CaseRepo::get_case(&conn, "user-1", "case-1").unwrap().unwrap();
    assert_eq!(loaded.title, "After");
    assert_eq!(loaded.status, CaseStatus::Hearing);

    // A different owner cannot update the row
    case.user_id = "user-2".to_string();
    assert!(!CaseRepo::update_case(&conn, &case).unwrap());
}

#[test]
fn test_delete_case_owner_scoped() {
    let conn = migrated_db();
    CaseRepo::create_case(&conn, &sample_case("case-1", "user-1", "Mine")).unwrap();

    assert!(!CaseRepo::delete_case(&conn, "user-2", "case-1").unwrap());
    assert!(CaseRepo::delete_case(&conn, "user-1", "case-1").unwrap());
    assert!(CaseRepo::get_case(&conn, "user-1", "case-1").unwrap().is_none());
}

#[test]
fn test_derived_counts_recomputed_on_load() {
    let conn = migrated_db();
    CaseRepo::create_case(&conn, &sample_case("case-1", "user-1", "Counted")).unwrap();

    for kind in [
        ActivityKind::NoteAdded,
        ActivityKind::HearingAdded,
        ActivityKind::HearingUpdated,
    ] {
        let draft = ActivityDraft::new("case-1", "user-1", kind, "t", "c");
        assert!(lextrack_store::activity::record(&conn, &draft));
    }
    conn.execute(
        "INSERT INTO uploaded_files (id, user_id, case_id, filename, created_at)
         VALUES ('f1', 'user-1', 'case-1', 'petition.pdf', 1700000000)",
        [],
    )
    .unwrap();

    let case = CaseRepo::get_case(&conn, "user-1", "case-1").unwrap().unwrap();
    assert_eq!(case.activities_count, 3);
    assert_eq!(case.hearings_count, 2);
    assert_eq!(case.documents_count, 1);
}
