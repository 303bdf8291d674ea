//! Shared helpers for the LED integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use lgsdk_core::{LightingColor, ShutdownSignal};
use lgsdk_led::LedSession;
use lgsdk_led::mock::MockLed;

/// A session over a fresh mock, not yet initialized.
pub fn session() -> (LedSession<MockLed>, Arc<MockLed>, ShutdownSignal) {
    let mock = Arc::new(MockLed::new());
    let signal = ShutdownSignal::new();
    let session = LedSession::new(Arc::clone(&mock), signal.clone());
    (session, mock, signal)
}

/// An initialized session over a fresh mock, with the init call forgotten.
pub fn initialized() -> (LedSession<MockLed>, Arc<MockLed>, ShutdownSignal) {
    let (mut session, mock, signal) = session();
    assert!(session.init().expect("first init"));
    mock.clear_calls();
    (session, mock, signal)
}

pub fn color(red: u8, green: u8, blue: u8) -> LightingColor {
    LightingColor::new(red, green, blue).expect("valid percentages")
}
