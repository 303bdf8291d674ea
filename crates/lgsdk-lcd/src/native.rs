//! Native LCD entry points.
//!
//! [`LcdNative`] is the seam between the bindings and the vendor library:
//! [`LcdLibrary`] implements it over the real DLL, and
//! [`MockLcd`](crate::mock::MockLcd) records calls for tests.

use std::ffi::c_int;
use std::fmt;
use std::path::Path;

use lgsdk_core::library::{NativeLibrary, SdkConfig, SdkLibrary};
use lgsdk_core::wide::{WChar, to_wide};
use lgsdk_core::Result;
use tracing::debug;

use crate::config::LcdType;

/// Raw LCD operations, one per vendor entry point.
///
/// Implementations forward arguments unchanged. Validation happens in the
/// [`api`](crate::api) layer above.
pub trait LcdNative: Send + Sync {
    /// `LogiLcdInit`
    fn init(&self, name: &str, lcd_type: LcdType) -> bool;

    /// `LogiLcdIsConnected`
    fn is_connected(&self, lcd_type: LcdType) -> bool;

    /// `LogiLcdIsButtonPressed`
    fn is_button_pressed(&self, button: i32) -> bool;

    /// `LogiLcdUpdate`
    fn update(&self);

    /// `LogiLcdShutdown`
    fn shutdown(&self);

    /// `LogiLcdMonoSetBackground`
    fn mono_set_background(&self, bitmap: &[u8]) -> bool;

    /// `LogiLcdMonoSetText`
    fn mono_set_text(&self, line: i32, text: &str) -> bool;

    /// `LogiLcdColorSetBackground`
    fn color_set_background(&self, bitmap: &[u8]) -> bool;

    /// `LogiLcdColorSetTitle`
    fn color_set_title(&self, text: &str, red: i32, green: i32, blue: i32) -> bool;

    /// `LogiLcdColorSetText`
    fn color_set_text(&self, line: i32, text: &str, red: i32, green: i32, blue: i32) -> bool;
}

type InitFn = unsafe extern "C" fn(*const WChar, c_int) -> bool;
type IsConnectedFn = unsafe extern "C" fn(c_int) -> bool;
type IsButtonPressedFn = unsafe extern "C" fn(c_int) -> bool;
type VoidFn = unsafe extern "C" fn();
type SetBackgroundFn = unsafe extern "C" fn(*const u8) -> bool;
type MonoSetTextFn = unsafe extern "C" fn(c_int, *const WChar) -> bool;
type ColorSetTitleFn = unsafe extern "C" fn(*const WChar, c_int, c_int, c_int) -> bool;
type ColorSetTextFn = unsafe extern "C" fn(c_int, *const WChar, c_int, c_int, c_int) -> bool;

/// Binding table over `LogitechLcdEnginesWrapper`.
pub struct LcdLibrary {
    init: InitFn,
    is_connected: IsConnectedFn,
    is_button_pressed: IsButtonPressedFn,
    update: VoidFn,
    shutdown: VoidFn,
    mono_set_background: SetBackgroundFn,
    mono_set_text: MonoSetTextFn,
    color_set_background: SetBackgroundFn,
    color_set_title: ColorSetTitleFn,
    color_set_text: ColorSetTextFn,
    // Keeps the function pointers above valid.
    library: NativeLibrary,
}

impl LcdLibrary {
    /// Load the LCD wrapper described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the library cannot be loaded or lacks an export.
    pub fn load(config: &SdkConfig) -> Result<Self> {
        Self::from_library(NativeLibrary::open_sdk(config, SdkLibrary::Lcd)?)
    }

    /// Resolve every entry point of an already opened library.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingSymbol`](lgsdk_core::Error::MissingSymbol) for
    /// the first export that cannot be found.
    pub fn from_library(library: NativeLibrary) -> Result<Self> {
        // SAFETY: the types above mirror the declarations of LogitechLCDLib.h.
        let table = unsafe {
            Self {
                init: library.symbol("LogiLcdInit\0")?,
                is_connected: library.symbol("LogiLcdIsConnected\0")?,
                is_button_pressed: library.symbol("LogiLcdIsButtonPressed\0")?,
                update: library.symbol("LogiLcdUpdate\0")?,
                shutdown: library.symbol("LogiLcdShutdown\0")?,
                mono_set_background: library.symbol("LogiLcdMonoSetBackground\0")?,
                mono_set_text: library.symbol("LogiLcdMonoSetText\0")?,
                color_set_background: library.symbol("LogiLcdColorSetBackground\0")?,
                color_set_title: library.symbol("LogiLcdColorSetTitle\0")?,
                color_set_text: library.symbol("LogiLcdColorSetText\0")?,
                library,
            }
        };
        debug!("LCD entry points resolved from {}", table.library.path().display());
        Ok(table)
    }

    /// Path the library was loaded from.
    pub fn path(&self) -> &Path {
        self.library.path()
    }
}

impl fmt::Debug for LcdLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LcdLibrary")
            .field("library", &self.library)
            .finish_non_exhaustive()
    }
}

// SAFETY (all calls below): pointers come from live buffers owned by this
// frame, and the bitmap lengths are checked by the api layer before any call.
impl LcdNative for LcdLibrary {
    fn init(&self, name: &str, lcd_type: LcdType) -> bool {
        let name = to_wide(name);
        unsafe { (self.init)(name.as_ptr(), lcd_type.bits()) }
    }

    fn is_connected(&self, lcd_type: LcdType) -> bool {
        unsafe { (self.is_connected)(lcd_type.bits()) }
    }

    fn is_button_pressed(&self, button: i32) -> bool {
        unsafe { (self.is_button_pressed)(button) }
    }

    fn update(&self) {
        unsafe { (self.update)() }
    }

    fn shutdown(&self) {
        unsafe { (self.shutdown)() }
    }

    fn mono_set_background(&self, bitmap: &[u8]) -> bool {
        unsafe { (self.mono_set_background)(bitmap.as_ptr()) }
    }

    fn mono_set_text(&self, line: i32, text: &str) -> bool {
        let text = to_wide(text);
        unsafe { (self.mono_set_text)(line, text.as_ptr()) }
    }

    fn color_set_background(&self, bitmap: &[u8]) -> bool {
        unsafe { (self.color_set_background)(bitmap.as_ptr()) }
    }

    fn color_set_title(&self, text: &str, red: i32, green: i32, blue: i32) -> bool {
        let text = to_wide(text);
        unsafe { (self.color_set_title)(text.as_ptr(), red, green, blue) }
    }

    fn color_set_text(&self, line: i32, text: &str, red: i32, green: i32, blue: i32) -> bool {
        let text = to_wide(text);
        unsafe { (self.color_set_text)(line, text.as_ptr(), red, green, blue) }
    }
}
