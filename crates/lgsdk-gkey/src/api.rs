//! Functional G-key API.
//!
//! Key and button numbers are validated before the native call:
//!
//! - mouse buttons: 0-20 (e.g. 6-20 on a G600),
//! - G-keys: 0-29 (e.g. 1-6 on a G710+, 1-29 on a G13),
//! - modes: 1-3.
//!
//! # Examples
//!
//! ```
//! use lgsdk_gkey::api;
//! use lgsdk_gkey::mock::MockGkey;
//!
//! let gkey = MockGkey::new();
//! assert!(api::init(&gkey, None));
//! assert_eq!(api::get_keyboard_gkey_string(&gkey, 5, 1).unwrap(), "G5/M1");
//! assert!(api::is_keyboard_gkey_pressed(&gkey, 5, 4).is_err());
//! ```

use lgsdk_core::Result;
use lgsdk_core::validation::{self, ArgumentKind};

use crate::native::{GkeyNative, KeySink};

/// Initialize the SDK.
///
/// With a sink, every key transition is delivered to it. Without one, only
/// the polling functions below report state.
pub fn init<N: GkeyNative + ?Sized>(native: &N, sink: Option<KeySink>) -> bool {
    native.init(sink)
}

/// Check whether a mouse button is pressed.
///
/// # Errors
///
/// Returns [`Error::OutOfRange`](lgsdk_core::Error::OutOfRange) if `button`
/// is not in 0-20.
pub fn is_mouse_button_pressed<N: GkeyNative + ?Sized>(native: &N, button: i32) -> Result<bool> {
    let button = validation::check(ArgumentKind::MouseButton, button.into())?;
    Ok(native.is_mouse_button_pressed(button))
}

/// Friendly name of a mouse button, e.g. `"Mouse Btn 8"`.
///
/// # Errors
///
/// Returns [`Error::OutOfRange`](lgsdk_core::Error::OutOfRange) if `button`
/// is not in 0-20.
pub fn get_mouse_button_string<N: GkeyNative + ?Sized>(native: &N, button: i32) -> Result<String> {
    let button = validation::check(ArgumentKind::MouseButton, button.into())?;
    Ok(native.get_mouse_button_string(button))
}

/// Check whether a keyboard G-key is pressed in the given mode.
///
/// # Errors
///
/// Returns [`Error::OutOfRange`](lgsdk_core::Error::OutOfRange) if `gkey` is
/// not in 0-29 or `mode` is not in 1-3.
pub fn is_keyboard_gkey_pressed<N: GkeyNative + ?Sized>(
    native: &N,
    gkey: i32,
    mode: i32,
) -> Result<bool> {
    let (gkey, mode) = check_gkey(gkey, mode)?;
    Ok(native.is_keyboard_gkey_pressed(gkey, mode))
}

/// Friendly name of a G-key in the given mode, e.g. `"G5/M1"`.
///
/// # Errors
///
/// Returns [`Error::OutOfRange`](lgsdk_core::Error::OutOfRange) if `gkey` is
/// not in 0-29 or `mode` is not in 1-3.
pub fn get_keyboard_gkey_string<N: GkeyNative + ?Sized>(
    native: &N,
    gkey: i32,
    mode: i32,
) -> Result<String> {
    let (gkey, mode) = check_gkey(gkey, mode)?;
    Ok(native.get_keyboard_gkey_string(gkey, mode))
}

/// Shut the SDK down and release the callback registration.
pub fn shutdown<N: GkeyNative + ?Sized>(native: &N) {
    native.shutdown();
}

fn check_gkey(gkey: i32, mode: i32) -> Result<(i32, i32)> {
    Ok((
        validation::check(ArgumentKind::Gkey, gkey.into())?,
        validation::check(ArgumentKind::Mode, mode.into())?,
    ))
}
