//! Embeddable init/shutdown guard.
//!
//! Every device session follows the same two-state lifecycle:
//!
//! ```text
//!                init()
//!  ┌───────────────┐ ───────► ┌─────────────┐
//!  │ Uninitialized │          │ Initialized │
//!  └───────────────┘ ◄─────── └─────────────┘
//!         shutdown() / shutdown signal
//! ```
//!
//! [`SessionState`] holds the flag and the guards; the device sessions embed
//! it and call the guards at the top of each operation.
//!
//! # Examples
//!
//! ```
//! use lgsdk_core::SessionState;
//!
//! let mut state = SessionState::new("LCD");
//! assert!(state.ensure_initialized().is_err());
//!
//! state.ensure_uninitialized().unwrap();
//! state.mark_initialized();
//! assert!(state.ensure_uninitialized().is_err());
//!
//! assert!(state.release());
//! assert!(!state.release());
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::error::{Error, Result};
use crate::shutdown::ShutdownSignal;

/// Initialized flag plus the guards built on it.
///
/// The flag is shared with the shutdown handler registered through
/// [`SessionState::subscribe_shutdown`], so whichever of an explicit
/// `shutdown()` or the process hook comes first wins the release.
#[derive(Debug)]
pub struct SessionState {
    api: &'static str,
    initialized: Arc<AtomicBool>,
    hook_registered: bool,
}

impl SessionState {
    /// Create an uninitialized state for the named API ("LCD", "G-key", ...).
    pub fn new(api: &'static str) -> Self {
        Self {
            api,
            initialized: Arc::new(AtomicBool::new(false)),
            hook_registered: false,
        }
    }

    /// Name used in state errors.
    pub fn api(&self) -> &'static str {
        self.api
    }

    /// Check whether the session is initialized.
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    /// Fail unless the session is initialized.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`].
    pub fn ensure_initialized(&self) -> Result<()> {
        if !self.is_initialized() {
            return Err(Error::not_initialized(self.api));
        }
        Ok(())
    }

    /// Fail if the session is already initialized.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyInitialized`].
    pub fn ensure_uninitialized(&self) -> Result<()> {
        if self.is_initialized() {
            return Err(Error::already_initialized(self.api));
        }
        Ok(())
    }

    /// Record a successful native init.
    pub fn mark_initialized(&mut self) {
        self.initialized.store(true, Ordering::SeqCst);
        debug!("{} session initialized", self.api);
    }

    /// Return to the uninitialized state.
    ///
    /// Returns `true` if the session was initialized, i.e. the caller now
    /// owns the release of native resources. Returns `false` otherwise.
    pub fn release(&mut self) -> bool {
        let was_initialized = self.initialized.swap(false, Ordering::SeqCst);
        if was_initialized {
            debug!("{} session released", self.api);
        }
        was_initialized
    }

    /// Register `release_fn` with the shutdown signal.
    ///
    /// Registration happens once per session, however many times the
    /// session is re-initialized. When the signal fires, `release_fn` runs
    /// only if the session is initialized at that moment.
    pub fn subscribe_shutdown<F>(&mut self, signal: &ShutdownSignal, release_fn: F)
    where
        F: Fn() + Send + 'static,
    {
        if self.hook_registered {
            return;
        }
        self.hook_registered = true;

        let api = self.api;
        let initialized = Arc::clone(&self.initialized);
        signal.subscribe(move |reason| {
            if initialized.swap(false, Ordering::SeqCst) {
                debug!("Releasing {} session on {}", api, reason);
                release_fn();
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shutdown::ShutdownReason;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_new_state_is_uninitialized() {
        let state = SessionState::new("LED");
        assert!(!state.is_initialized());
        assert_eq!(state.api(), "LED");

        let error = state.ensure_initialized().unwrap_err();
        assert!(matches!(error, Error::NotInitialized { api: "LED" }));
    }

    #[test]
    fn test_reinit_after_release() {
        let mut state = SessionState::new("LCD");
        state.mark_initialized();
        assert!(state.ensure_initialized().is_ok());

        assert!(state.release());
        assert!(state.ensure_uninitialized().is_ok());

        state.mark_initialized();
        assert!(state.is_initialized());
    }

    #[test]
    fn test_shutdown_signal_releases_once() {
        let signal = ShutdownSignal::new();
        let released = Arc::new(AtomicUsize::new(0));

        let mut state = SessionState::new("G-key");
        state.mark_initialized();

        for _ in 0..2 {
            let counter = Arc::clone(&released);
            state.subscribe_shutdown(&signal, move || {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }
        assert_eq!(signal.subscriber_count(), 1);

        signal.trigger(ShutdownReason::Exit);
        assert_eq!(released.load(Ordering::SeqCst), 1);
        assert!(!state.is_initialized());
        assert!(!state.release());
    }

    #[test]
    fn test_shutdown_signal_skips_released_session() {
        let signal = ShutdownSignal::new();
        let released = Arc::new(AtomicUsize::new(0));

        let mut state = SessionState::new("LCD");
        state.mark_initialized();
        let counter = Arc::clone(&released);
        state.subscribe_shutdown(&signal, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(state.release());
        signal.trigger(ShutdownReason::Interrupt);
        assert_eq!(released.load(Ordering::SeqCst), 0);
    }
}
