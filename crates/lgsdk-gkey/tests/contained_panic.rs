//! A listener panic caught at the callback boundary must not shut anything
//! down. Kept in its own test binary: the `Ctrl+C` handler can only be
//! installed once per process.

mod common;

use std::ffi::c_void;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use lgsdk_core::wide::to_wide;
use lgsdk_gkey::mock::GkeyCall;
use lgsdk_gkey::native::trampoline;
use lgsdk_gkey::{KeyEvent, KeySink, RawGkeyCode, listener};

use common::initialized;

#[test]
fn test_listener_panic_keeps_sessions_alive() {
    let (session, mock, signal) = initialized();
    let guard = signal.install_process_hooks().expect("hooks installed");

    let after_panic = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&after_panic);
    session.add_event_listener("keyDown", listener(|_| panic!("faulty listener")));
    session.add_event_listener(
        "keyUp",
        listener(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }),
    );

    let sink: KeySink = session.listeners().sink();
    let context = (&sink as *const KeySink).cast_mut().cast::<c_void>();
    let label = to_wide("G1/M1");

    for event in [KeyEvent::gkey(1, 1, true), KeyEvent::gkey(1, 1, false)] {
        // SAFETY: `sink` outlives both calls and `label` is nul-terminated.
        unsafe { trampoline(RawGkeyCode::encode(&event), label.as_ptr(), context) };
    }

    assert!(!signal.is_triggered());
    assert!(session.is_initialized());
    assert_eq!(after_panic.load(Ordering::SeqCst), 1);
    assert!(mock.calls().is_empty());

    drop(guard);
    assert!(signal.is_triggered());
    assert!(!session.is_initialized());
    assert_eq!(mock.calls(), vec![GkeyCall::Shutdown]);
}
