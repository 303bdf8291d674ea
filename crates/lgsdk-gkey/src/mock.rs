//! Recording G-key double.
//!
//! [`MockGkey`] records every call, answers polling queries from held
//! keys and buttons, and lets tests fire key events through the sink passed
//! to `init`, exactly as the SDK callback would.
//!
//! Events are encoded to [`RawGkeyCode`] and decoded again on the way to the
//! sink, so the bitfield path is exercised too.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::code::{KeyEvent, RawGkeyCode};
use crate::native::{GkeyNative, KeySink};

/// A call received by [`MockGkey`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GkeyCall {
    Init { with_callback: bool },
    IsMouseButtonPressed(i32),
    GetMouseButtonString(i32),
    IsKeyboardGkeyPressed { gkey: i32, mode: i32 },
    GetKeyboardGkeyString { gkey: i32, mode: i32 },
    Shutdown,
}

type SharedSink = Arc<dyn Fn(KeyEvent, &str) + Send + Sync>;

#[derive(Default)]
struct State {
    calls: Vec<GkeyCall>,
    init_fails: bool,
    held_gkeys: HashSet<(i32, i32)>,
    held_buttons: HashSet<i32>,
    sink: Option<SharedSink>,
}

/// Mock G-key SDK.
#[derive(Default)]
pub struct MockGkey {
    state: Mutex<State>,
}

impl MockGkey {
    /// Create a mock whose init succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make init report failure.
    pub fn with_init_failure(self) -> Self {
        self.state.lock().init_fails = true;
        self
    }

    /// Hold a G-key down for polling queries.
    pub fn hold_gkey(&self, gkey: i32, mode: i32) {
        self.state.lock().held_gkeys.insert((gkey, mode));
    }

    /// Hold a mouse button down for polling queries.
    pub fn hold_mouse_button(&self, button: i32) {
        self.state.lock().held_buttons.insert(button);
    }

    /// Release every held key and button.
    pub fn release_all(&self) {
        let mut state = self.state.lock();
        state.held_gkeys.clear();
        state.held_buttons.clear();
    }

    /// Whether a callback is registered.
    pub fn has_callback(&self) -> bool {
        self.state.lock().sink.is_some()
    }

    /// Deliver a raw native event to the registered callback.
    ///
    /// Returns `false` if no callback is registered.
    pub fn emit_raw(&self, code: RawGkeyCode, label: &str) -> bool {
        // Cloned out so a listener can call back into the mock.
        let Some(sink) = self.state.lock().sink.clone() else {
            return false;
        };
        sink(code.decode(), label);
        true
    }

    /// Deliver `event` with `label`.
    pub fn emit(&self, event: KeyEvent, label: &str) -> bool {
        self.emit_raw(RawGkeyCode::encode(&event), label)
    }

    /// Press G-key `gkey` in `mode`, labelled `G<gkey>/M<mode>`.
    pub fn key_down(&self, gkey: u8, mode: u8) -> bool {
        self.emit(KeyEvent::gkey(gkey, mode, true), &gkey_label(gkey, mode))
    }

    /// Release G-key `gkey` in `mode`.
    pub fn key_up(&self, gkey: u8, mode: u8) -> bool {
        self.emit(KeyEvent::gkey(gkey, mode, false), &gkey_label(gkey, mode))
    }

    /// Press mouse button `button`, labelled `Mouse Btn <button>`.
    pub fn mouse_down(&self, button: u8) -> bool {
        self.emit(KeyEvent::mouse_button(button, true), &mouse_label(button))
    }

    /// Release mouse button `button`.
    pub fn mouse_up(&self, button: u8) -> bool {
        self.emit(KeyEvent::mouse_button(button, false), &mouse_label(button))
    }

    /// Calls received so far, in order.
    pub fn calls(&self) -> Vec<GkeyCall> {
        self.state.lock().calls.clone()
    }

    /// Number of calls matching `predicate`.
    pub fn count_calls(&self, predicate: impl Fn(&GkeyCall) -> bool) -> usize {
        self.state.lock().calls.iter().filter(|call| predicate(call)).count()
    }

    /// Forget recorded calls.
    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }
}

fn gkey_label(gkey: impl std::fmt::Display, mode: impl std::fmt::Display) -> String {
    format!("G{gkey}/M{mode}")
}

fn mouse_label(button: impl std::fmt::Display) -> String {
    format!("Mouse Btn {button}")
}

impl std::fmt::Debug for MockGkey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("MockGkey")
            .field("calls", &state.calls)
            .field("callback_registered", &state.sink.is_some())
            .finish_non_exhaustive()
    }
}

impl GkeyNative for MockGkey {
    fn init(&self, sink: Option<KeySink>) -> bool {
        let mut state = self.state.lock();
        state.calls.push(GkeyCall::Init {
            with_callback: sink.is_some(),
        });
        if state.init_fails {
            return false;
        }
        state.sink = sink.map(SharedSink::from);
        true
    }

    fn is_mouse_button_pressed(&self, button: i32) -> bool {
        let mut state = self.state.lock();
        state.calls.push(GkeyCall::IsMouseButtonPressed(button));
        state.held_buttons.contains(&button)
    }

    fn get_mouse_button_string(&self, button: i32) -> String {
        self.state.lock().calls.push(GkeyCall::GetMouseButtonString(button));
        mouse_label(button)
    }

    fn is_keyboard_gkey_pressed(&self, gkey: i32, mode: i32) -> bool {
        let mut state = self.state.lock();
        state.calls.push(GkeyCall::IsKeyboardGkeyPressed { gkey, mode });
        state.held_gkeys.contains(&(gkey, mode))
    }

    fn get_keyboard_gkey_string(&self, gkey: i32, mode: i32) -> String {
        self.state
            .lock()
            .calls
            .push(GkeyCall::GetKeyboardGkeyString { gkey, mode });
        gkey_label(gkey, mode)
    }

    fn shutdown(&self) {
        let mut state = self.state.lock();
        state.calls.push(GkeyCall::Shutdown);
        state.sink = None;
    }
}
