//! Shared helpers for the LCD integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use lgsdk_core::ShutdownSignal;
use lgsdk_lcd::mock::MockLcd;
use lgsdk_lcd::{LcdSession, LcdType};

/// Applet name used across tests.
pub const APPLET: &str = "Integration";

/// A session over `mock` that has not been initialized.
pub fn session(mock: MockLcd) -> (LcdSession<MockLcd>, ShutdownSignal) {
    let signal = ShutdownSignal::new();
    (LcdSession::new(Arc::new(mock), signal.clone()), signal)
}

/// An initialized session over `mock`, with the init calls forgotten.
pub fn initialized(mock: MockLcd) -> (LcdSession<MockLcd>, ShutdownSignal) {
    let (mut lcd, signal) = session(mock);
    assert!(lcd.init(APPLET, LcdType::ANY).expect("first init"));
    lcd.native().clear_calls();
    (lcd, signal)
}
