//! Behavioral tests for the mobile menu state and fragment anchors

use crate::navigation::{MenuState, fragment_id};

// ============================================================================
// MENU STATE BEHAVIORS
// ============================================================================

#[test]
fn given_closed_menu_when_toggled_twice_then_closed_again() {
    let state = MenuState::Closed;
    assert_eq!(state.toggled().toggled(), MenuState::Closed);
}

#[test]
fn given_missing_aria_expanded_when_read_then_closed() {
    assert_eq!(MenuState::from_aria(None), MenuState::Closed);
}

#[test]
fn given_closed_menu_when_toggled_then_aria_reads_true() {
    assert_eq!(MenuState::Closed.toggled().as_aria(), "true");
}

#[test]
fn given_garbage_aria_value_when_toggled_then_opens() {
    // anything but "true" counts as closed, so the first click opens
    let state = MenuState::from_aria(Some("yes"));
    assert!(state.toggled().is_open());
}

// ============================================================================
// FRAGMENT BEHAVIORS
// ============================================================================

#[test]
fn given_fragment_href_when_parsed_then_id_without_hash() {
    assert_eq!(fragment_id("#download"), Some("download"));
}

#[test]
fn given_bare_hash_when_parsed_then_no_target() {
    assert_eq!(fragment_id("#"), None);
}

#[test]
fn given_absolute_url_when_parsed_then_not_a_fragment() {
    assert_eq!(fragment_id("https://example.test/#news"), None);
}
