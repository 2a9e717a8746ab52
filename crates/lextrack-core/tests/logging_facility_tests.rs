#![allow(clippy::unwrap_used, clippy::expect_used)]

use lextrack_core::errors::{ErrorKind, LexError};
use lextrack_core::logging_facility::test_capture::init_test_capture;
use lextrack_core::{log_op_end, log_op_error, log_op_start};
use lextrack_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    let events = capture.events();
    let start_events: Vec<_> = events
        .iter()
        .filter(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_START))
        .collect();

    assert!(
        !start_events.is_empty(),
        "Should have captured at least one start event"
    );
}

#[test]
fn test_log_op_end_macro_carries_duration() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let events = capture.events();
    let end_events: Vec<_> = events
        .iter()
        .filter(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END))
        .collect();

    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(
        end_events[0].fields.get("duration_ms"),
        Some(&"42".to_string())
    );
}

#[test]
fn test_log_op_error_includes_stable_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = LexError::new(ErrorKind::NotFound).with_entity_id("case-9");
    log_op_error!(op_name, err, duration_ms = 10);

    let events = capture.events();
    let error_events: Vec<_> = events
        .iter()
        .filter(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END_ERROR))
        .collect();

    assert_eq!(error_events.len(), 1, "Should have exactly one error event");
    assert_eq!(
        error_events[0].fields.get("err_code"),
        Some(&"ERR_NOT_FOUND".to_string())
    );
}

#[test]
fn test_boundary_ownership_single_start_end() {
    let capture = init_test_capture();
    let op_name = "test_boundary_ownership_unique_4";

    log_op_start!(op_name, case_id = "case-1");
    log_op_end!(op_name, duration_ms = 7);

    let starts = capture.count_events(|e| {
        e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_START)
    });
    let ends = capture.count_events(|e| {
        e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END)
    });

    assert_eq!(starts, 1, "Should have exactly one start event");
    assert_eq!(ends, 1, "Should have exactly one end event");
}

#[test]
fn test_log_macros_with_extra_fields() {
    let capture = init_test_capture();
    let op_name = "test_extra_fields_unique_5";

    log_op_start!(op_name, case_id = "case-1", user_id = "user-1");
    log_op_end!(op_name, duration_ms = 3, case_count = 2);

    capture.assert_event_exists(op_name, EVENT_START);
    capture.assert_event_exists(op_name, EVENT_END);

    let events = capture.events();
    let start = events
        .iter()
        .find(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_START))
        .expect("start event");
    assert_eq!(start.fields.get("case_id"), Some(&"case-1".to_string()));
    assert_eq!(start.fields.get("user_id"), Some(&"user-1".to_string()));
}

#[test]
fn test_rate_limit_error_keeps_wire_code() {
    let capture = init_test_capture();
    let op_name = "test_rate_limit_code_unique_6";

    let err = LexError::new(ErrorKind::RateLimited);
    log_op_error!(op_name, err, duration_ms = 1);

    let events = capture.events();
    let error_event = events
        .iter()
        .find(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END_ERROR))
        .expect("error event");
    assert_eq!(
        error_event.fields.get("err_code"),
        Some(&"RATE_LIMIT_EXCEEDED".to_string())
    );
}
