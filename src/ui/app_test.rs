use serde_json::json;

use super::*;

fn state() -> ConsoleState {
    ConsoleState::new("/api/rules", &json!({"title": {"max_length": 150}}))
}

#[test]
fn new_state_pretty_prints_document() {
    let state = state();
    assert!(state.buffer.contains("\n"));
    assert_eq!(validate_document(&state.buffer), Validity::Valid);
    assert_eq!(state.validity, Validity::Valid);
}

#[test]
fn edits_mark_validity_pending() {
    let mut state = state();
    state.insert_char(' ');
    assert_eq!(state.validity, Validity::Pending);

    let mut empty = ConsoleState::new("/x", &json!(null));
    empty.buffer.clear();
    empty.validity = Validity::Valid;
    empty.backspace();
    assert_eq!(empty.validity, Validity::Valid);
}

#[test]
fn edits_clear_the_previous_status() {
    let mut state = state();
    state.status = Some(StatusLine::info("Rules saved successfully"));
    state.insert_char(' ');
    assert_eq!(state.status, None);

    state.status = Some(StatusLine::error("Save failed"));
    state.insert_str("  ");
    assert_eq!(state.status, None);

    state.status = Some(StatusLine::info("Copied to clipboard"));
    state.backspace();
    assert_eq!(state.status, None);
}

#[test]
fn backspace_on_empty_buffer_keeps_the_status() {
    let mut state = ConsoleState::new("/x", &json!(null));
    state.buffer.clear();
    state.status = Some(StatusLine::info("Saved"));
    state.backspace();
    assert_eq!(state.status, Some(StatusLine::info("Saved")));
}

#[test]
fn stale_validation_is_discarded() {
    let mut state = state();
    let snapshot = state.buffer.clone();
    state.insert_str("garbage");

    assert!(!state.apply_validation(&snapshot, Validity::Valid));
    assert_eq!(state.validity, Validity::Pending);

    let current = state.buffer.clone();
    let result = validate_document(&current);
    assert!(matches!(result, Validity::Invalid(_)));
    assert!(state.apply_validation(&current, result));
    assert!(matches!(state.validity, Validity::Invalid(_)));
}

#[test]
fn size_label_uses_byte_formatter() {
    let mut state = ConsoleState::new("/x", &json!(null));
    state.buffer = "x".repeat(1536);
    assert_eq!(state.size_label(1), "1.5 KB");
    state.buffer = String::from("{}");
    assert_eq!(state.size_label(2), "2 Bytes");
}

#[test]
fn server_replies_become_status_lines() {
    assert_eq!(
        status_from_response(&json!({"status": "success", "message": "Rules saved successfully"})),
        StatusLine::info("Rules saved successfully")
    );
    assert_eq!(
        status_from_response(&json!({"status": "error", "message": "No input file specified"})),
        StatusLine::error("No input file specified")
    );
    assert_eq!(status_from_response(&json!({})), StatusLine::info("Saved"));
}
