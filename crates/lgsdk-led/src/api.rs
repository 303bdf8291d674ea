//! Functional LED API.
//!
//! Color arguments are intensity percentages (0-100) and are validated
//! before the native call, as is the per-key bitmap length. Durations are
//! taken as [`Duration`] and passed to the SDK in milliseconds.
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//! use lgsdk_led::{api, KeyName};
//! use lgsdk_led::mock::MockLed;
//!
//! let led = MockLed::new();
//! assert!(api::init(&led));
//! assert!(api::set_lighting(&led, 100, 0, 0).unwrap());
//! assert!(api::flash_single_key(&led, KeyName::Esc, 0, 0, 100, Duration::from_secs(2), Duration::from_millis(250)).unwrap());
//! assert!(api::set_lighting(&led, 101, 0, 0).is_err());
//! ```

use std::time::Duration;

use lgsdk_core::validation::{self, ArgumentKind};
use lgsdk_core::{Color, Result};

use crate::config::{BITMAP_SIZE, DeviceType, SdkVersion};
use crate::key_name::KeyName;
use crate::native::LedNative;

/// Initialize the SDK.
pub fn init<N: LedNative + ?Sized>(native: &N) -> bool {
    native.init()
}

/// Version of the installed SDK, or `None` if it cannot be determined.
pub fn get_sdk_version<N: LedNative + ?Sized>(native: &N) -> Option<SdkVersion> {
    native.get_sdk_version()
}

/// Read a numeric option, registering `default` for it.
pub fn get_config_option_number<N: LedNative + ?Sized>(native: &N, path: &str, default: f64) -> Option<f64> {
    native.get_config_option_number(path, default)
}

/// Read a boolean option, registering `default` for it.
pub fn get_config_option_bool<N: LedNative + ?Sized>(native: &N, path: &str, default: bool) -> Option<bool> {
    native.get_config_option_bool(path, default)
}

/// Read a color option, registering `default` for it.
///
/// Components reported outside 0-255 are clamped.
pub fn get_config_option_color<N: LedNative + ?Sized>(native: &N, path: &str, default: Color) -> Option<Color> {
    let (red, green, blue) = native.get_config_option_color(path, default.components())?;
    Some(Color::rgb(clamp_byte(red), clamp_byte(green), clamp_byte(blue)))
}

/// Read a key-input option, registering `default` for it.
///
/// `buffer_size` is the capacity, in UTF-16 units, of the buffer the SDK
/// writes the value into. It grows to fit `default` if needed.
pub fn get_config_option_key_input<N: LedNative + ?Sized>(
    native: &N,
    path: &str,
    default: &str,
    buffer_size: usize,
) -> Option<String> {
    native.get_config_option_key_input(path, default, buffer_size)
}

/// Set the label shown next to an option.
pub fn set_config_option_label<N: LedNative + ?Sized>(native: &N, path: &str, label: &str) -> bool {
    native.set_config_option_label(path, label)
}

/// Restrict the following calls to the given device classes.
pub fn set_target_device<N: LedNative + ?Sized>(native: &N, device_type: DeviceType) -> bool {
    native.set_target_device(device_type)
}

/// Save the current lighting so it can be restored later.
pub fn save_current_lighting<N: LedNative + ?Sized>(native: &N) -> bool {
    native.save_current_lighting()
}

/// Set every device to one color.
///
/// # Errors
///
/// Returns [`Error::OutOfRange`](lgsdk_core::Error::OutOfRange) if a
/// percentage is not in 0-100.
pub fn set_lighting<N: LedNative + ?Sized>(native: &N, red: i32, green: i32, blue: i32) -> Result<bool> {
    let (red, green, blue) = check_percentages(red, green, blue)?;
    Ok(native.set_lighting(red, green, blue))
}

/// Restore the lighting saved by [`save_current_lighting`].
pub fn restore_lighting<N: LedNative + ?Sized>(native: &N) -> bool {
    native.restore_lighting()
}

/// Flash every device in one color for `duration`, toggling every
/// `interval`. A zero duration flashes until [`stop_effects`].
///
/// # Errors
///
/// Fails for a percentage outside 0-100 or a duration beyond `i32::MAX` ms.
pub fn flash_lighting<N: LedNative + ?Sized>(
    native: &N,
    red: i32,
    green: i32,
    blue: i32,
    duration: Duration,
    interval: Duration,
) -> Result<bool> {
    let (red, green, blue) = check_percentages(red, green, blue)?;
    let (duration, interval) = (validation::millis(duration)?, validation::millis(interval)?);
    Ok(native.flash_lighting(red, green, blue, duration, interval))
}

/// Pulse every device in one color for `duration`, one pulse per
/// `interval`. A zero duration pulses until [`stop_effects`].
///
/// # Errors
///
/// Fails for a percentage outside 0-100 or a duration beyond `i32::MAX` ms.
pub fn pulse_lighting<N: LedNative + ?Sized>(
    native: &N,
    red: i32,
    green: i32,
    blue: i32,
    duration: Duration,
    interval: Duration,
) -> Result<bool> {
    let (red, green, blue) = check_percentages(red, green, blue)?;
    let (duration, interval) = (validation::millis(duration)?, validation::millis(interval)?);
    Ok(native.pulse_lighting(red, green, blue, duration, interval))
}

/// Stop every running effect.
pub fn stop_effects<N: LedNative + ?Sized>(native: &N) -> bool {
    native.stop_effects()
}

/// Set per-key lighting from a BGRA bitmap of
/// [`BITMAP_SIZE`](crate::config::BITMAP_SIZE) bytes.
///
/// # Errors
///
/// Returns [`Error::BitmapLength`](lgsdk_core::Error::BitmapLength) for any
/// other length.
pub fn set_lighting_from_bitmap<N: LedNative + ?Sized>(native: &N, bitmap: &[u8]) -> Result<bool> {
    validation::check_bitmap_length(bitmap, BITMAP_SIZE)?;
    Ok(native.set_lighting_from_bitmap(bitmap))
}

/// Set one key, addressed by scan code.
///
/// # Errors
///
/// Fails for a percentage outside 0-100.
pub fn set_lighting_for_key_with_scan_code<N: LedNative + ?Sized>(
    native: &N,
    key_code: i32,
    red: i32,
    green: i32,
    blue: i32,
) -> Result<bool> {
    let (red, green, blue) = check_percentages(red, green, blue)?;
    Ok(native.set_lighting_for_key_with_scan_code(key_code, red, green, blue))
}

/// Set one key, addressed by USB HID code.
///
/// # Errors
///
/// Fails for a percentage outside 0-100.
pub fn set_lighting_for_key_with_hid_code<N: LedNative + ?Sized>(
    native: &N,
    key_code: i32,
    red: i32,
    green: i32,
    blue: i32,
) -> Result<bool> {
    let (red, green, blue) = check_percentages(red, green, blue)?;
    Ok(native.set_lighting_for_key_with_hid_code(key_code, red, green, blue))
}

/// Set one key, addressed by Quartz (macOS) code.
///
/// # Errors
///
/// Fails for a percentage outside 0-100.
pub fn set_lighting_for_key_with_quartz_code<N: LedNative + ?Sized>(
    native: &N,
    key_code: i32,
    red: i32,
    green: i32,
    blue: i32,
) -> Result<bool> {
    let (red, green, blue) = check_percentages(red, green, blue)?;
    Ok(native.set_lighting_for_key_with_quartz_code(key_code, red, green, blue))
}

/// Set one key, addressed by [`KeyName`].
///
/// # Errors
///
/// Fails for a percentage outside 0-100.
pub fn set_lighting_for_key_with_key_name<N: LedNative + ?Sized>(
    native: &N,
    key: KeyName,
    red: i32,
    green: i32,
    blue: i32,
) -> Result<bool> {
    let (red, green, blue) = check_percentages(red, green, blue)?;
    Ok(native.set_lighting_for_key_with_key_name(key, red, green, blue))
}

/// Save the current lighting of one key.
pub fn save_lighting_for_key<N: LedNative + ?Sized>(native: &N, key: KeyName) -> bool {
    native.save_lighting_for_key(key)
}

/// Restore the lighting saved for `key` by [`save_lighting_for_key`].
pub fn restore_lighting_for_key<N: LedNative + ?Sized>(native: &N, key: KeyName) -> bool {
    native.restore_lighting_for_key(key)
}

/// Leave `keys` untouched by [`set_lighting_from_bitmap`].
pub fn exclude_keys_from_bitmap<N: LedNative + ?Sized>(native: &N, keys: &[KeyName]) -> bool {
    native.exclude_keys_from_bitmap(keys)
}

/// Flash one key.
///
/// # Errors
///
/// Fails for a percentage outside 0-100 or a duration beyond `i32::MAX` ms.
pub fn flash_single_key<N: LedNative + ?Sized>(
    native: &N,
    key: KeyName,
    red: i32,
    green: i32,
    blue: i32,
    duration: Duration,
    interval: Duration,
) -> Result<bool> {
    let (red, green, blue) = check_percentages(red, green, blue)?;
    let (duration, interval) = (validation::millis(duration)?, validation::millis(interval)?);
    Ok(native.flash_single_key(key, red, green, blue, duration, interval))
}

/// Pulse one key from `start` to `finish`, each an `(r, g, b)` percentage
/// triple. With `infinite`, the pulse repeats until stopped.
///
/// # Errors
///
/// Fails for a percentage outside 0-100 or a duration beyond `i32::MAX` ms.
pub fn pulse_single_key<N: LedNative + ?Sized>(
    native: &N,
    key: KeyName,
    start: (i32, i32, i32),
    finish: (i32, i32, i32),
    duration: Duration,
    infinite: bool,
) -> Result<bool> {
    let start = check_percentages(start.0, start.1, start.2)?;
    let finish = check_percentages(finish.0, finish.1, finish.2)?;
    let duration = validation::millis(duration)?;
    Ok(native.pulse_single_key(key, start, finish, duration, infinite))
}

/// Stop the effects running on one key.
pub fn stop_effects_on_key<N: LedNative + ?Sized>(native: &N, key: KeyName) -> bool {
    native.stop_effects_on_key(key)
}

/// Shut the SDK down.
pub fn shutdown<N: LedNative + ?Sized>(native: &N) {
    native.shutdown();
}

fn check_percentages(red: i32, green: i32, blue: i32) -> Result<(i32, i32, i32)> {
    Ok((
        validation::check(ArgumentKind::Percentage, red.into())?,
        validation::check(ArgumentKind::Percentage, green.into())?,
        validation::check(ArgumentKind::Percentage, blue.into())?,
    ))
}

fn clamp_byte(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{LedCall, MockLed};
    use lgsdk_core::Error;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(-1, 0, 0)]
    #[case(0, 101, 0)]
    #[case(0, 0, 255)]
    fn test_percentages_out_of_range(#[case] red: i32, #[case] green: i32, #[case] blue: i32) {
        let led = MockLed::new();
        let error = set_lighting(&led, red, green, blue).unwrap_err();
        assert!(matches!(error, Error::OutOfRange { kind: ArgumentKind::Percentage, .. }));
        assert!(set_lighting_for_key_with_key_name(&led, KeyName::A, red, green, blue).is_err());
        assert!(
            pulse_single_key(&led, KeyName::A, (0, 0, 0), (red, green, blue), Duration::ZERO, false)
                .is_err()
        );
        assert!(led.calls().is_empty());
    }

    #[test]
    fn test_durations_in_milliseconds() {
        let led = MockLed::new();
        flash_lighting(&led, 10, 20, 30, Duration::from_secs(3), Duration::from_millis(150)).unwrap();
        assert_eq!(
            led.calls(),
            vec![LedCall::FlashLighting {
                color: (10, 20, 30),
                duration_ms: 3000,
                interval_ms: 150,
            }]
        );
    }

    #[test]
    fn test_duration_too_long() {
        let led = MockLed::new();
        let forever = Duration::from_millis(i32::MAX as u64 + 1);
        assert!(pulse_lighting(&led, 0, 0, 0, forever, Duration::ZERO).is_err());
        assert!(led.calls().is_empty());
    }

    #[rstest]
    #[case(0)]
    #[case(503)]
    #[case(505)]
    fn test_bitmap_length(#[case] len: usize) {
        let led = MockLed::new();
        let error = set_lighting_from_bitmap(&led, &vec![0; len]).unwrap_err();
        assert!(matches!(error, Error::BitmapLength { expected: 504, actual } if actual == len));
        assert!(led.calls().is_empty());
    }

    #[test]
    fn test_bitmap_forwarded() {
        let led = MockLed::new();
        assert!(set_lighting_from_bitmap(&led, &[7; BITMAP_SIZE]).unwrap());
        assert_eq!(led.calls(), vec![LedCall::SetLightingFromBitmap(vec![7; BITMAP_SIZE])]);
    }

    #[test]
    fn test_restore_lighting_for_key_forwards_key() {
        let led = MockLed::new();
        restore_lighting_for_key(&led, KeyName::F5);
        assert_eq!(led.calls(), vec![LedCall::RestoreLightingForKey(KeyName::F5)]);
    }

    #[test]
    fn test_config_color_clamped() {
        let led = MockLed::new();
        led.set_config_color("theme/accent", (300, -4, 12));
        assert_eq!(
            get_config_option_color(&led, "theme/accent", Color::WHITE),
            Some(Color::rgb(255, 0, 12))
        );
    }

    proptest! {
        #[test]
        fn prop_valid_percentages_forwarded(red in 0..=100i32, green in 0..=100i32, blue in 0..=100i32) {
            let led = MockLed::new();
            prop_assert!(set_lighting(&led, red, green, blue).unwrap());
            prop_assert_eq!(led.calls(), vec![LedCall::SetLighting((red, green, blue))]);
        }
    }
}
