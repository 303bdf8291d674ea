//! Stateful G-key session.
//!
//! [`GkeySession`] always initializes the SDK with a callback that feeds its
//! [`ListenerRegistry`]. Listeners may be registered before or after init.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use lgsdk_core::ShutdownSignal;
//! use lgsdk_gkey::{GkeySession, listener};
//! use lgsdk_gkey::mock::MockGkey;
//!
//! let mock = Arc::new(MockGkey::new());
//! let mut gkeys = GkeySession::new(Arc::clone(&mock), ShutdownSignal::new());
//!
//! let presses = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&presses);
//! gkeys.add_event_listener("keyDown", listener(move |_| {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! }));
//!
//! assert!(gkeys.init().unwrap());
//! mock.key_down(4, 1);
//! mock.key_up(4, 1);
//! assert_eq!(presses.load(Ordering::SeqCst), 1);
//! ```

use std::fmt;
use std::sync::Arc;

use lgsdk_core::validation::{MAX_GKEYS, MAX_M_STATES, MAX_MOUSE_BUTTONS};
use lgsdk_core::{Result, SessionState, ShutdownSignal};
use tracing::info;

use crate::api;
use crate::dispatch::{EventType, Listener, ListenerRegistry};
use crate::native::GkeyNative;

/// G-key session bound to one native implementation.
pub struct GkeySession<N: GkeyNative + 'static> {
    native: Arc<N>,
    signal: ShutdownSignal,
    state: SessionState,
    listeners: ListenerRegistry,
}

impl<N: GkeyNative + 'static> GkeySession<N> {
    /// Create an uninitialized session with no listeners.
    pub fn new(native: Arc<N>, signal: ShutdownSignal) -> Self {
        Self {
            native,
            signal,
            state: SessionState::new("G-key"),
            listeners: ListenerRegistry::new(),
        }
    }

    /// Initialize the SDK with a callback into the listener registry.
    ///
    /// Returns `Ok(false)` if the native init fails or the shutdown signal
    /// has already fired.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyInitialized`](lgsdk_core::Error::AlreadyInitialized)
    /// if the session is initialized.
    pub fn init(&mut self) -> Result<bool> {
        self.state.ensure_uninitialized()?;
        if self.signal.is_triggered() {
            info!("G-key init refused, shutdown already signalled");
            return Ok(false);
        }

        if !api::init(&*self.native, Some(self.listeners.sink())) {
            info!("G-key init failed");
            return Ok(false);
        }
        self.state.mark_initialized();

        let native = Arc::clone(&self.native);
        self.state
            .subscribe_shutdown(&self.signal, move || api::shutdown(&*native));
        if !self.state.is_initialized() {
            // The signal fired between the native init and the subscription.
            return Ok(false);
        }

        info!("G-key SDK initialized");
        Ok(true)
    }

    /// Check whether the session is initialized.
    pub fn is_initialized(&self) -> bool {
        self.state.is_initialized()
    }

    /// Register `listener` for `event_type`, e.g. `"keyDown"`, `"G4"` or
    /// `"G4/M1"`.
    pub fn add_event_listener(&self, event_type: impl Into<EventType>, listener: Listener) {
        self.listeners.add(event_type, listener);
    }

    /// Remove every registration of `listener` for `event_type`.
    ///
    /// Returns `false` if none was found.
    pub fn remove_event_listener(&self, event_type: impl Into<EventType>, listener: &Listener) -> bool {
        self.listeners.remove(event_type, listener)
    }

    /// Remove the listeners of one event type, or all listeners.
    pub fn remove_all_event_listeners(&self, event_type: Option<EventType>) {
        self.listeners.remove_all(event_type);
    }

    /// The listener registry fed by this session.
    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    /// See [`api::is_mouse_button_pressed`].
    ///
    /// # Errors
    ///
    /// Fails before init or for a button outside 0-20.
    pub fn is_mouse_button_pressed(&self, button: i32) -> Result<bool> {
        self.state.ensure_initialized()?;
        api::is_mouse_button_pressed(&*self.native, button)
    }

    /// See [`api::get_mouse_button_string`].
    ///
    /// # Errors
    ///
    /// Fails before init or for a button outside 0-20.
    pub fn get_mouse_button_string(&self, button: i32) -> Result<String> {
        self.state.ensure_initialized()?;
        api::get_mouse_button_string(&*self.native, button)
    }

    /// See [`api::is_keyboard_gkey_pressed`].
    ///
    /// # Errors
    ///
    /// Fails before init, for a G-key outside 0-29 or a mode outside 1-3.
    pub fn is_keyboard_gkey_pressed(&self, gkey: i32, mode: i32) -> Result<bool> {
        self.state.ensure_initialized()?;
        api::is_keyboard_gkey_pressed(&*self.native, gkey, mode)
    }

    /// See [`api::get_keyboard_gkey_string`].
    ///
    /// # Errors
    ///
    /// Fails before init, for a G-key outside 0-29 or a mode outside 1-3.
    pub fn get_keyboard_gkey_string(&self, gkey: i32, mode: i32) -> Result<String> {
        self.state.ensure_initialized()?;
        api::get_keyboard_gkey_string(&*self.native, gkey, mode)
    }

    /// Poll every G-key in every mode and return the pressed
    /// `(gkey, mode)` pairs.
    ///
    /// # Errors
    ///
    /// Fails before init.
    pub fn pressed_gkeys(&self) -> Result<Vec<(i32, i32)>> {
        self.state.ensure_initialized()?;
        let mut pressed = Vec::new();
        for mode in 1..=MAX_M_STATES {
            for gkey in 0..=MAX_GKEYS {
                if api::is_keyboard_gkey_pressed(&*self.native, gkey, mode)? {
                    pressed.push((gkey, mode));
                }
            }
        }
        Ok(pressed)
    }

    /// Poll every mouse button and return the pressed ones.
    ///
    /// # Errors
    ///
    /// Fails before init.
    pub fn pressed_mouse_buttons(&self) -> Result<Vec<i32>> {
        self.state.ensure_initialized()?;
        let mut pressed = Vec::new();
        for button in 0..=MAX_MOUSE_BUTTONS {
            if api::is_mouse_button_pressed(&*self.native, button)? {
                pressed.push(button);
            }
        }
        Ok(pressed)
    }

    /// Shut the SDK down.
    ///
    /// Returns `false` without a native call if the session is not
    /// initialized. Listeners are kept for the next init.
    pub fn shutdown(&mut self) -> bool {
        if !self.state.release() {
            return false;
        }
        api::shutdown(&*self.native);
        info!("G-key SDK shut down");
        true
    }

    /// Native implementation backing this session.
    pub fn native(&self) -> &Arc<N> {
        &self.native
    }
}

impl<N: GkeyNative + 'static> fmt::Debug for GkeySession<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GkeySession")
            .field("initialized", &self.is_initialized())
            .field("listeners", &self.listeners)
            .finish_non_exhaustive()
    }
}
