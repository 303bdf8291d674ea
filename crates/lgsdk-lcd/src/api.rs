//! Functional LCD API.
//!
//! One function per native entry point. Each validates its arguments, then
//! forwards to the [`LcdNative`] implementation and returns its result
//! unchanged. A `false` from the device is a result, not an error.
//!
//! # Examples
//!
//! ```
//! use lgsdk_core::Color;
//! use lgsdk_lcd::{api, LcdType};
//! use lgsdk_lcd::mock::MockLcd;
//!
//! let lcd = MockLcd::color();
//! assert!(api::init(&lcd, "Demo", LcdType::COLOR));
//! assert!(api::set_color_text(&lcd, 7, "last line", Color::WHITE).unwrap());
//!
//! // Line 8 does not exist: rejected before reaching the device.
//! assert!(api::set_color_text(&lcd, 8, "overflow", Color::WHITE).is_err());
//! ```

use lgsdk_core::validation::{self, ArgumentKind};
use lgsdk_core::{Color, Error, Result};

use crate::config::{BITMAP_LENGTH_COLOR, BITMAP_LENGTH_MONO, LcdButton, LcdType};
use crate::native::LcdNative;

/// Initialize the applet.
///
/// `name` is the applet name shown by the vendor software; it cannot change
/// afterwards. `lcd_type` selects the targeted display variants.
pub fn init<N: LcdNative + ?Sized>(native: &N, name: &str, lcd_type: LcdType) -> bool {
    native.init(name, lcd_type)
}

/// Check whether a display of `lcd_type` is connected.
///
/// Returns `false` when no such device exists or `init` was not called.
pub fn is_connected<N: LcdNative + ?Sized>(native: &N, lcd_type: LcdType) -> bool {
    native.is_connected(lcd_type)
}

/// Check whether a display button is pressed.
///
/// A button is only reported while the applet is in the foreground.
///
/// # Errors
///
/// Returns [`Error::InvalidButton`] if `button` is not a known button code.
pub fn is_button_pressed<N: LcdNative + ?Sized>(native: &N, button: i32) -> Result<bool> {
    if LcdButton::from_code(button).is_none() {
        return Err(Error::invalid_button(button));
    }
    Ok(native.is_button_pressed(button))
}

/// Set the monochrome background (160×43, one byte per pixel).
///
/// The device lights pixels whose value is 128 or more.
///
/// # Errors
///
/// Returns [`Error::BitmapLength`] unless the bitmap has exactly 6880 bytes.
pub fn set_mono_background<N: LcdNative + ?Sized>(native: &N, bitmap: &[u8]) -> Result<bool> {
    validation::check_bitmap_length(bitmap, BITMAP_LENGTH_MONO)?;
    Ok(native.mono_set_background(bitmap))
}

/// Set the color background (320×240, RGBA).
///
/// # Errors
///
/// Returns [`Error::BitmapLength`] unless the bitmap has exactly 307200 bytes.
pub fn set_color_background<N: LcdNative + ?Sized>(native: &N, bitmap: &[u8]) -> Result<bool> {
    validation::check_bitmap_length(bitmap, BITMAP_LENGTH_COLOR)?;
    Ok(native.color_set_background(bitmap))
}

/// Set one of the 4 monochrome text lines.
///
/// # Errors
///
/// Returns [`Error::OutOfRange`] if `line` is not in 0-3.
pub fn set_mono_text<N: LcdNative + ?Sized>(native: &N, line: i32, text: &str) -> Result<bool> {
    let line = validation::check(ArgumentKind::MonoLine, line.into())?;
    Ok(native.mono_set_text(line, text))
}

/// Set one of the 8 color text lines.
///
/// # Errors
///
/// Returns [`Error::OutOfRange`] if `line` is not in 0-7.
pub fn set_color_text<N: LcdNative + ?Sized>(
    native: &N,
    line: i32,
    text: &str,
    color: Color,
) -> Result<bool> {
    let line = validation::check(ArgumentKind::ColorLine, line.into())?;
    let (red, green, blue) = color.components();
    Ok(native.color_set_text(line, text, red, green, blue))
}

/// Set the title of the color display, drawn in a larger font above line 0.
///
/// Infallible on arguments since every [`Color`] is valid; returns `Result`
/// for symmetry with the other setters.
pub fn set_color_title<N: LcdNative + ?Sized>(native: &N, text: &str, color: Color) -> Result<bool> {
    let (red, green, blue) = color.components();
    Ok(native.color_set_title(text, red, green, blue))
}

/// Push pending changes to the display. Call once per frame.
pub fn update<N: LcdNative + ?Sized>(native: &N) {
    native.update();
}

/// Terminate the applet and free SDK memory.
pub fn shutdown<N: LcdNative + ?Sized>(native: &N) {
    native.shutdown();
}
