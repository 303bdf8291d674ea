//! Integration tests for the G-key session state machine and polling.

mod common;

use std::sync::Arc;

use lgsdk_core::{Error, ShutdownReason, ShutdownSignal};
use lgsdk_gkey::GkeySession;
use lgsdk_gkey::mock::{GkeyCall, MockGkey};

#[test]
fn test_init_registers_callback() {
    let (mut session, mock, _signal) = common::session();
    assert!(session.init().unwrap());
    assert_eq!(mock.calls(), vec![GkeyCall::Init { with_callback: true }]);
    assert!(mock.has_callback());
}

#[test]
fn test_init_twice_fails() {
    let (mut session, mock, _signal) = common::initialized();
    let error = session.init().unwrap_err();
    assert!(matches!(error, Error::AlreadyInitialized { api: "G-key" }));
    assert!(mock.calls().is_empty());
}

#[test]
fn test_failed_init() {
    let mock = Arc::new(MockGkey::new().with_init_failure());
    let mut session = GkeySession::new(Arc::clone(&mock), ShutdownSignal::new());

    assert!(!session.init().unwrap());
    assert!(!session.is_initialized());
    assert!(!session.shutdown());
    assert_eq!(mock.count_calls(|call| *call == GkeyCall::Shutdown), 0);
}

#[test]
fn test_queries_require_init() {
    let (session, mock, _signal) = common::session();
    assert!(session.is_mouse_button_pressed(1).unwrap_err().is_invalid_state());
    assert!(session.get_mouse_button_string(1).unwrap_err().is_invalid_state());
    assert!(session.is_keyboard_gkey_pressed(1, 1).unwrap_err().is_invalid_state());
    assert!(session.get_keyboard_gkey_string(1, 1).unwrap_err().is_invalid_state());
    assert!(session.pressed_gkeys().unwrap_err().is_invalid_state());
    assert!(session.pressed_mouse_buttons().unwrap_err().is_invalid_state());
    assert!(mock.calls().is_empty());
}

#[test]
fn test_invalid_ids_never_reach_native() {
    let (session, mock, _signal) = common::initialized();
    assert!(session.is_mouse_button_pressed(21).unwrap_err().is_invalid_argument());
    assert!(session.get_keyboard_gkey_string(30, 1).unwrap_err().is_invalid_argument());
    assert!(session.is_keyboard_gkey_pressed(1, 0).unwrap_err().is_invalid_argument());
    assert!(mock.calls().is_empty());
}

#[test]
fn test_strings() {
    let (session, _mock, _signal) = common::initialized();
    assert_eq!(session.get_keyboard_gkey_string(5, 1).unwrap(), "G5/M1");
    assert_eq!(session.get_mouse_button_string(8).unwrap(), "Mouse Btn 8");
}

#[test]
fn test_pressed_gkeys_scans_every_id() {
    let (session, mock, _signal) = common::initialized();
    mock.hold_gkey(4, 1);
    mock.hold_gkey(29, 3);

    assert_eq!(session.pressed_gkeys().unwrap(), vec![(4, 1), (29, 3)]);
    let queries = mock.count_calls(|call| matches!(call, GkeyCall::IsKeyboardGkeyPressed { .. }));
    assert_eq!(queries, 30 * 3);
}

#[test]
fn test_pressed_mouse_buttons() {
    let (session, mock, _signal) = common::initialized();
    mock.hold_mouse_button(0);
    mock.hold_mouse_button(20);
    assert_eq!(session.pressed_mouse_buttons().unwrap(), vec![0, 20]);

    mock.release_all();
    assert!(session.pressed_mouse_buttons().unwrap().is_empty());
}

#[test]
fn test_shutdown_and_reinit() {
    let (mut session, mock, signal) = common::initialized();
    assert!(session.shutdown());
    assert!(!session.shutdown());

    assert!(session.init().unwrap());
    assert!(mock.has_callback());
    assert_eq!(signal.subscriber_count(), 1);
}

#[test]
fn test_shutdown_signal_releases_once() {
    let (mut session, mock, signal) = common::initialized();
    signal.trigger(ShutdownReason::Panic);
    assert!(!session.is_initialized());
    assert!(!session.shutdown());

    assert_eq!(mock.calls(), vec![GkeyCall::Shutdown]);
}

#[test]
fn test_init_after_shutdown_signal_is_refused() {
    let (mut session, mock, signal) = common::session();
    signal.trigger(ShutdownReason::Exit);

    assert!(!session.init().unwrap());
    assert!(!session.is_initialized());
    assert!(!mock.has_callback());
    assert!(mock.calls().is_empty());
}
