//! Process-lifetime shutdown signal.
//!
//! The vendor libraries hold device handles and callback registrations that
//! must be released before the process goes away. The application creates a
//! single [`ShutdownSignal`] at startup and hands a clone to every session.
//! Each session subscribes a release handler; the signal fires exactly once
//! and runs every handler.
//!
//! Once [`ShutdownSignal::install_process_hooks`] has been called, the signal
//! fires when:
//!
//! - the returned [`ShutdownGuard`] is dropped, either on return from `main`
//!   or while an uncaught panic unwinds out of it,
//! - `Ctrl+C` arrives (the process then exits with status 130).
//!
//! Panics caught further down, such as a G-key listener panic contained at
//! the SDK callback boundary, leave the signal alone.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use lgsdk_core::{ShutdownReason, ShutdownSignal};
//!
//! let signal = ShutdownSignal::new();
//! let released = Arc::new(AtomicUsize::new(0));
//!
//! let counter = Arc::clone(&released);
//! signal.subscribe(move |_reason| {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! assert!(signal.trigger(ShutdownReason::Exit));
//! assert!(!signal.trigger(ShutdownReason::Interrupt));
//! assert_eq!(released.load(Ordering::SeqCst), 1);
//! ```

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Exit status used after an interrupt.
pub const INTERRUPT_EXIT_CODE: i32 = 130;

/// Why the shutdown signal fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    /// The process is exiting normally.
    Exit,

    /// The process received an interrupt (`Ctrl+C`).
    Interrupt,

    /// An uncaught panic is unwinding out of `main`.
    Panic,
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exit => write!(f, "exit"),
            Self::Interrupt => write!(f, "interrupt"),
            Self::Panic => write!(f, "panic"),
        }
    }
}

type Handler = Box<dyn FnOnce(ShutdownReason) + Send>;

#[derive(Default)]
struct Inner {
    fired: AtomicBool,
    handlers: Mutex<Vec<Handler>>,
}

/// Shared one-shot shutdown signal.
///
/// Cloning is cheap; all clones observe the same state.
#[derive(Clone, Default)]
pub struct ShutdownSignal {
    inner: Arc<Inner>,
}

impl ShutdownSignal {
    /// Create a new signal that has not fired yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler to run when the signal fires.
    ///
    /// Handlers run in subscription order. A handler subscribed after the
    /// signal already fired runs immediately.
    pub fn subscribe<F>(&self, handler: F)
    where
        F: FnOnce(ShutdownReason) + Send + 'static,
    {
        let mut handlers = self.inner.handlers.lock();
        if self.inner.fired.load(Ordering::SeqCst) {
            drop(handlers);
            handler(ShutdownReason::Exit);
            return;
        }
        handlers.push(Box::new(handler));
    }

    /// Fire the signal.
    ///
    /// Returns `true` if this call fired it, `false` if it had already fired.
    pub fn trigger(&self, reason: ShutdownReason) -> bool {
        let handlers = {
            let mut handlers = self.inner.handlers.lock();
            if self.inner.fired.swap(true, Ordering::SeqCst) {
                return false;
            }
            std::mem::take(&mut *handlers)
        };

        info!("Shutdown signal fired ({}), releasing {} session(s)", reason, handlers.len());
        for handler in handlers {
            handler(reason);
        }
        true
    }

    /// Check whether the signal has fired.
    pub fn is_triggered(&self) -> bool {
        self.inner.fired.load(Ordering::SeqCst)
    }

    /// Number of handlers waiting for the signal.
    pub fn subscriber_count(&self) -> usize {
        self.inner.handlers.lock().len()
    }

    /// Hook the signal into the process lifecycle.
    ///
    /// Installs a `Ctrl+C` handler and returns a guard that fires the signal
    /// when dropped. Keep the guard alive for the whole of `main`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShutdownHook`] if a `Ctrl+C` handler was already
    /// installed for this process.
    pub fn install_process_hooks(&self) -> Result<ShutdownGuard> {
        let interrupt = self.clone();
        ctrlc::set_handler(move || {
            interrupt.trigger(ShutdownReason::Interrupt);
            std::process::exit(INTERRUPT_EXIT_CODE);
        })
        .map_err(|e| Error::ShutdownHook(e.to_string()))?;

        debug!("Process shutdown hooks installed");
        Ok(ShutdownGuard {
            signal: self.clone(),
        })
    }
}

impl fmt::Debug for ShutdownSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShutdownSignal")
            .field("fired", &self.is_triggered())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Fires the shutdown signal when dropped: with [`ShutdownReason::Panic`]
/// while the thread is unwinding, [`ShutdownReason::Exit`] otherwise.
#[derive(Debug)]
#[must_use = "dropping the guard fires the shutdown signal immediately"]
pub struct ShutdownGuard {
    signal: ShutdownSignal,
}

impl ShutdownGuard {
    /// The signal this guard fires.
    pub fn signal(&self) -> &ShutdownSignal {
        &self.signal
    }
}

impl Drop for ShutdownGuard {
    fn drop(&mut self) {
        let reason = if std::thread::panicking() {
            ShutdownReason::Panic
        } else {
            ShutdownReason::Exit
        };
        self.signal.trigger(reason);
    }
}
