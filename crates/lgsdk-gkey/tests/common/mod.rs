//! Shared helpers for the G-key integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use lgsdk_core::ShutdownSignal;
use lgsdk_gkey::mock::MockGkey;
use lgsdk_gkey::{GkeySession, KeyEvent, Listener, listener};
use parking_lot::Mutex;

/// Events received by a recording listener, tagged with its name.
pub type Received = Arc<Mutex<Vec<(String, KeyEvent)>>>;

/// A session over a fresh mock, not yet initialized.
pub fn session() -> (GkeySession<MockGkey>, Arc<MockGkey>, ShutdownSignal) {
    let mock = Arc::new(MockGkey::new());
    let signal = ShutdownSignal::new();
    let session = GkeySession::new(Arc::clone(&mock), signal.clone());
    (session, mock, signal)
}

/// An initialized session over a fresh mock, with the init call forgotten.
pub fn initialized() -> (GkeySession<MockGkey>, Arc<MockGkey>, ShutdownSignal) {
    let (mut session, mock, signal) = session();
    assert!(session.init().expect("first init"));
    mock.clear_calls();
    (session, mock, signal)
}

/// A listener that appends `(name, event)` to `received`.
pub fn recording(received: &Received, name: &str) -> Listener {
    let received = Arc::clone(received);
    let name = name.to_string();
    listener(move |event| received.lock().push((name.clone(), *event)))
}

/// Names of the listeners that fired, in order.
pub fn names(received: &Received) -> Vec<String> {
    received.lock().iter().map(|(name, _)| name.clone()).collect()
}
