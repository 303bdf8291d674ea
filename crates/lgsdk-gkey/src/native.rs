//! Native G-key entry points and the callback trampoline.
//!
//! The SDK reports key transitions through a C callback invoked on a thread
//! it owns. [`GkeyLibrary::init`] boxes the Rust [`KeySink`], hands its
//! address to `LogiGkeyInit` as the callback context, and registers
//! [`trampoline`] as the callback. The trampoline turns the raw arguments
//! back into a [`KeyEvent`] and a label, then calls the sink.
//!
//! The boxed sink outlives the registration: it is dropped only after
//! `LogiGkeyShutdown` returns.

use std::ffi::{c_int, c_void};
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::Path;

use lgsdk_core::library::{NativeLibrary, SdkConfig, SdkLibrary};
use lgsdk_core::wide::{WChar, from_wide_ptr};
use lgsdk_core::Result;
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::code::{KeyEvent, RawGkeyCode};

/// Receiver of decoded key events: the event and its label, e.g. `"G4/M1"`
/// or `"Mouse Btn 8"`.
///
/// Called on an SDK thread.
pub type KeySink = Box<dyn Fn(KeyEvent, &str) + Send + Sync>;

/// Native callback signature (`logiGkeyCB`).
pub type LogiGkeyCb = unsafe extern "C" fn(RawGkeyCode, *const WChar, *mut c_void);

/// Native callback registration (`logiGkeyCBContext`).
#[repr(C)]
#[derive(Debug)]
pub struct LogiGkeyCbContext {
    pub gkey_call_back: Option<LogiGkeyCb>,
    pub gkey_context: *mut c_void,
}

/// Raw G-key operations, one per vendor entry point.
pub trait GkeyNative: Send + Sync {
    /// `LogiGkeyInit` with a callback context when `sink` is set,
    /// `LogiGkeyInitWithoutCallback` otherwise.
    fn init(&self, sink: Option<KeySink>) -> bool;

    /// `LogiGkeyIsMouseButtonPressed`
    fn is_mouse_button_pressed(&self, button: i32) -> bool;

    /// `LogiGkeyGetMouseButtonString`
    fn get_mouse_button_string(&self, button: i32) -> String;

    /// `LogiGkeyIsKeyboardGkeyPressed`
    fn is_keyboard_gkey_pressed(&self, gkey: i32, mode: i32) -> bool;

    /// `LogiGkeyGetKeyboardGkeyString`
    fn get_keyboard_gkey_string(&self, gkey: i32, mode: i32) -> String;

    /// `LogiGkeyShutdown`
    fn shutdown(&self);
}

/// Callback registered with `LogiGkeyInit`.
///
/// # Safety
///
/// `context` must be null or the address of a live `KeySink`, and `label`
/// must be null or a nul-terminated wide string.
pub unsafe extern "C" fn trampoline(code: RawGkeyCode, label: *const WChar, context: *mut c_void) {
    if context.is_null() {
        return;
    }
    // SAFETY: guaranteed by the caller, see above.
    let sink = unsafe { &*(context as *const KeySink) };
    let label = unsafe { from_wide_ptr(label) };
    let event = code.decode();

    // Unwinding into the SDK is undefined behavior.
    if catch_unwind(AssertUnwindSafe(|| sink(event, &label))).is_err() {
        warn!("G-key listener panicked while handling '{}'", label);
    }
}

struct Registration {
    context: Box<LogiGkeyCbContext>,
    _sink: Box<KeySink>,
}

// SAFETY: the raw pointer in `context` points into `_sink`, which is itself
// Send + Sync, and is only dereferenced by `trampoline`.
unsafe impl Send for Registration {}

impl Registration {
    fn new(sink: KeySink) -> Self {
        let mut sink = Box::new(sink);
        let context = Box::new(LogiGkeyCbContext {
            gkey_call_back: Some(trampoline),
            gkey_context: (&mut *sink as *mut KeySink).cast::<c_void>(),
        });
        Self {
            context,
            _sink: sink,
        }
    }
}

type InitFn = unsafe extern "C" fn(*mut LogiGkeyCbContext) -> bool;
type InitWithoutCallbackFn = unsafe extern "C" fn() -> bool;
type InitWithoutContextFn = unsafe extern "C" fn(Option<LogiGkeyCb>) -> bool;
type IsMouseButtonPressedFn = unsafe extern "C" fn(c_int) -> bool;
type GetMouseButtonStringFn = unsafe extern "C" fn(c_int) -> *const WChar;
type IsKeyboardGkeyPressedFn = unsafe extern "C" fn(c_int, c_int) -> bool;
type GetKeyboardGkeyStringFn = unsafe extern "C" fn(c_int, c_int) -> *const WChar;
type ShutdownFn = unsafe extern "C" fn();

/// Binding table over `LogitechGkeyEnginesWrapper`.
pub struct GkeyLibrary {
    init: InitFn,
    init_without_callback: InitWithoutCallbackFn,
    init_without_context: InitWithoutContextFn,
    is_mouse_button_pressed: IsMouseButtonPressedFn,
    get_mouse_button_string: GetMouseButtonStringFn,
    is_keyboard_gkey_pressed: IsKeyboardGkeyPressedFn,
    get_keyboard_gkey_string: GetKeyboardGkeyStringFn,
    shutdown: ShutdownFn,
    registration: Mutex<Option<Registration>>,
    library: NativeLibrary,
}

impl GkeyLibrary {
    /// Load the G-key wrapper described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the library cannot be loaded or lacks an export.
    pub fn load(config: &SdkConfig) -> Result<Self> {
        Self::from_library(NativeLibrary::open_sdk(config, SdkLibrary::Gkey)?)
    }

    /// Resolve every entry point of an already opened library.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingSymbol`](lgsdk_core::Error::MissingSymbol) for
    /// the first export that cannot be found.
    pub fn from_library(library: NativeLibrary) -> Result<Self> {
        // SAFETY: the types above mirror the declarations of LogitechGkeyLib.h.
        let table = unsafe {
            Self {
                init: library.symbol("LogiGkeyInit\0")?,
                init_without_callback: library.symbol("LogiGkeyInitWithoutCallback\0")?,
                init_without_context: library.symbol("LogiGkeyInitWithoutContext\0")?,
                is_mouse_button_pressed: library.symbol("LogiGkeyIsMouseButtonPressed\0")?,
                get_mouse_button_string: library.symbol("LogiGkeyGetMouseButtonString\0")?,
                is_keyboard_gkey_pressed: library.symbol("LogiGkeyIsKeyboardGkeyPressed\0")?,
                get_keyboard_gkey_string: library.symbol("LogiGkeyGetKeyboardGkeyString\0")?,
                shutdown: library.symbol("LogiGkeyShutdown\0")?,
                registration: Mutex::new(None),
                library,
            }
        };
        debug!("G-key entry points resolved from {}", table.library.path().display());
        Ok(table)
    }

    /// Initialize with a bare C callback and no context
    /// (`LogiGkeyInitWithoutContext`).
    ///
    /// The callback receives a null context, so it cannot reach a
    /// [`KeySink`]; this exists for callers that manage their own state.
    pub fn init_without_context(&self, callback: LogiGkeyCb) -> bool {
        // SAFETY: `callback` has the signature the SDK expects.
        unsafe { (self.init_without_context)(Some(callback)) }
    }

    /// Path the library was loaded from.
    pub fn path(&self) -> &Path {
        self.library.path()
    }
}

impl fmt::Debug for GkeyLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GkeyLibrary")
            .field("library", &self.library)
            .field("callback_registered", &self.registration.lock().is_some())
            .finish_non_exhaustive()
    }
}

impl GkeyNative for GkeyLibrary {
    fn init(&self, sink: Option<KeySink>) -> bool {
        let Some(sink) = sink else {
            // SAFETY: no arguments.
            return unsafe { (self.init_without_callback)() };
        };

        let mut slot = self.registration.lock();
        let mut registration = Registration::new(sink);
        // SAFETY: the context and the sink it points to are kept alive in
        // `self.registration` until after `LogiGkeyShutdown`.
        let initialized = unsafe { (self.init)(&mut *registration.context) };
        if initialized {
            *slot = Some(registration);
        }
        initialized
    }

    fn is_mouse_button_pressed(&self, button: i32) -> bool {
        // SAFETY: plain integer arguments.
        unsafe { (self.is_mouse_button_pressed)(button) }
    }

    fn get_mouse_button_string(&self, button: i32) -> String {
        // SAFETY: the SDK returns null or a nul-terminated string it owns.
        unsafe { from_wide_ptr((self.get_mouse_button_string)(button)) }
    }

    fn is_keyboard_gkey_pressed(&self, gkey: i32, mode: i32) -> bool {
        // SAFETY: plain integer arguments.
        unsafe { (self.is_keyboard_gkey_pressed)(gkey, mode) }
    }

    fn get_keyboard_gkey_string(&self, gkey: i32, mode: i32) -> String {
        // SAFETY: the SDK returns null or a nul-terminated string it owns.
        unsafe { from_wide_ptr((self.get_keyboard_gkey_string)(gkey, mode)) }
    }

    fn shutdown(&self) {
        let mut slot = self.registration.lock();
        // SAFETY: no arguments.
        unsafe { (self.shutdown)() };
        if slot.take().is_some() {
            debug!("G-key callback context released");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lgsdk_core::wide::to_wide;
    use std::sync::Arc;

    fn capture() -> (KeySink, Arc<Mutex<Vec<(KeyEvent, String)>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink_seen = Arc::clone(&seen);
        let sink: KeySink = Box::new(move |event, label| {
            sink_seen.lock().push((event, label.to_string()));
        });
        (sink, seen)
    }

    #[test]
    fn test_trampoline_routes_to_sink() {
        let (sink, seen) = capture();
        let registration = Registration::new(sink);
        let label = to_wide("G4/M1");
        let code = RawGkeyCode::encode(&KeyEvent::gkey(4, 1, true));

        let callback = registration.context.gkey_call_back.unwrap();
        unsafe { callback(code, label.as_ptr(), registration.context.gkey_context) };

        assert_eq!(*seen.lock(), vec![(KeyEvent::gkey(4, 1, true), "G4/M1".to_string())]);
    }

    #[test]
    fn test_trampoline_ignores_null_context() {
        let label = to_wide("G1/M1");
        unsafe { trampoline(RawGkeyCode(0), label.as_ptr(), std::ptr::null_mut()) };
    }

    #[test]
    fn test_trampoline_contains_panics() {
        let registration = Registration::new(Box::new(|_, _| panic!("listener failure")));
        unsafe {
            trampoline(
                RawGkeyCode(0),
                std::ptr::null(),
                registration.context.gkey_context,
            )
        };
    }
}
