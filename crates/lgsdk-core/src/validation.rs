//! Argument validation for native calls.
//!
//! Every numeric argument that crosses the call boundary has a fixed closed
//! range. The checks here run before the vendor library is touched, so an
//! out-of-range id never reaches the device.
//!
//! # Ranges
//!
//! | Kind | Range |
//! |------|-------|
//! | [`ArgumentKind::MouseButton`] | 0-20 |
//! | [`ArgumentKind::Gkey`] | 0-29 |
//! | [`ArgumentKind::Mode`] | 1-3 |
//! | [`ArgumentKind::MonoLine`] | 0-3 |
//! | [`ArgumentKind::ColorLine`] | 0-7 |
//! | [`ArgumentKind::ColorByte`] | 0-255 |
//! | [`ArgumentKind::Percentage`] | 0-100 |
//! | [`ArgumentKind::Milliseconds`] | 0-`i32::MAX` |
//!
//! # Examples
//!
//! ```
//! use lgsdk_core::validation::{self, ArgumentKind};
//!
//! assert!(validation::is_valid(ArgumentKind::MouseButton, 20));
//! assert!(!validation::is_valid(ArgumentKind::MouseButton, 21));
//!
//! let mode = validation::check(ArgumentKind::Mode, 2).unwrap();
//! assert_eq!(mode, 2);
//! ```

use std::fmt;
use std::ops::RangeInclusive;
use std::time::Duration;

use crate::error::{Error, Result};

/// Highest mouse button number reported by the G-key SDK.
pub const MAX_MOUSE_BUTTONS: i32 = 20;

/// Highest G-key number reported by the G-key SDK.
pub const MAX_GKEYS: i32 = 29;

/// Highest mode (M-state) number.
pub const MAX_M_STATES: i32 = 3;

/// Kind of bounded argument accepted by a native entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgumentKind {
    /// Mouse button number.
    MouseButton,

    /// Keyboard G-key number.
    Gkey,

    /// Mode number (M1, M2, M3).
    Mode,

    /// Text line on the monochrome LCD.
    MonoLine,

    /// Text line on the color LCD.
    ColorLine,

    /// Red, green or blue component of a color LCD text color.
    ColorByte,

    /// Red, green or blue intensity of a lighting color.
    Percentage,

    /// Effect duration or interval.
    Milliseconds,
}

impl ArgumentKind {
    /// Closed range of legal values for this argument kind.
    pub const fn bounds(self) -> RangeInclusive<i64> {
        match self {
            Self::MouseButton => 0..=MAX_MOUSE_BUTTONS as i64,
            Self::Gkey => 0..=MAX_GKEYS as i64,
            Self::Mode => 1..=MAX_M_STATES as i64,
            Self::MonoLine => 0..=3,
            Self::ColorLine => 0..=7,
            Self::ColorByte => 0..=255,
            Self::Percentage => 0..=100,
            Self::Milliseconds => 0..=i32::MAX as i64,
        }
    }
}

impl fmt::Display for ArgumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MouseButton => "mouse button number",
            Self::Gkey => "G-key number",
            Self::Mode => "mode number",
            Self::MonoLine => "monochrome line number",
            Self::ColorLine => "color line number",
            Self::ColorByte => "color component",
            Self::Percentage => "lighting percentage",
            Self::Milliseconds => "duration in milliseconds",
        };
        f.write_str(name)
    }
}

/// Check whether `value` lies inside the range of `kind`.
pub fn is_valid(kind: ArgumentKind, value: i64) -> bool {
    kind.bounds().contains(&value)
}

/// Validate `value` against the range of `kind` and narrow it to the
/// native integer type.
///
/// # Errors
///
/// Returns [`Error::OutOfRange`] naming the argument kind and its range.
pub fn check(kind: ArgumentKind, value: i64) -> Result<i32> {
    if !is_valid(kind, value) {
        return Err(Error::out_of_range(kind, value));
    }
    // Every range fits in i32.
    Ok(value as i32)
}

/// Check whether a bitmap has exactly the expected length.
pub fn is_valid_bitmap_length(actual: usize, expected: usize) -> bool {
    actual == expected
}

/// Validate the length of a bitmap.
///
/// # Errors
///
/// Returns [`Error::BitmapLength`] if the lengths differ.
pub fn check_bitmap_length(bitmap: &[u8], expected: usize) -> Result<()> {
    if !is_valid_bitmap_length(bitmap.len(), expected) {
        return Err(Error::bitmap_length(expected, bitmap.len()));
    }
    Ok(())
}

/// Check whether a value fits in a bitmap byte.
pub fn is_valid_bitmap_value(value: i32) -> bool {
    (0..=255).contains(&value)
}

/// Convert loosely typed pixel values (e.g. decoded from an image library)
/// into bitmap bytes.
///
/// # Errors
///
/// Returns [`Error::BitmapValue`] for the first value outside 0-255.
///
/// # Examples
///
/// ```
/// use lgsdk_core::validation::bitmap_from_values;
///
/// assert_eq!(bitmap_from_values(&[0, 128, 255]).unwrap(), vec![0, 128, 255]);
/// assert!(bitmap_from_values(&[0, 256]).is_err());
/// assert!(bitmap_from_values(&[-1]).is_err());
/// ```
pub fn bitmap_from_values(values: &[i32]) -> Result<Vec<u8>> {
    values
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            u8::try_from(value).map_err(|_| Error::bitmap_value(index, i64::from(value)))
        })
        .collect()
}

/// Convert a duration into the millisecond count the SDK expects.
///
/// # Errors
///
/// Returns [`Error::OutOfRange`] if the duration does not fit in an `i32`.
pub fn millis(duration: Duration) -> Result<i32> {
    let ms = i64::try_from(duration.as_millis()).unwrap_or(i64::MAX);
    check(ArgumentKind::Milliseconds, ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(ArgumentKind::MouseButton, 0)]
    #[case(ArgumentKind::MouseButton, 20)]
    #[case(ArgumentKind::Gkey, 0)]
    #[case(ArgumentKind::Gkey, 29)]
    #[case(ArgumentKind::Mode, 1)]
    #[case(ArgumentKind::Mode, 3)]
    #[case(ArgumentKind::MonoLine, 3)]
    #[case(ArgumentKind::ColorLine, 7)]
    #[case(ArgumentKind::ColorByte, 255)]
    #[case(ArgumentKind::Percentage, 100)]
    fn test_valid_boundaries(#[case] kind: ArgumentKind, #[case] value: i64) {
        assert!(is_valid(kind, value));
        assert_eq!(check(kind, value).unwrap(), value as i32);
    }

    #[rstest]
    #[case(ArgumentKind::MouseButton, -1)]
    #[case(ArgumentKind::MouseButton, 21)]
    #[case(ArgumentKind::Gkey, -1)]
    #[case(ArgumentKind::Gkey, 30)]
    #[case(ArgumentKind::Mode, 0)]
    #[case(ArgumentKind::Mode, 4)]
    #[case(ArgumentKind::MonoLine, 4)]
    #[case(ArgumentKind::ColorLine, 8)]
    #[case(ArgumentKind::ColorByte, 256)]
    #[case(ArgumentKind::Percentage, 101)]
    #[case(ArgumentKind::Milliseconds, -5)]
    fn test_invalid_boundaries(#[case] kind: ArgumentKind, #[case] value: i64) {
        assert!(!is_valid(kind, value));
        let error = check(kind, value).unwrap_err();
        assert!(matches!(error, Error::OutOfRange { kind: k, .. } if k == kind));
    }

    #[test]
    fn test_bitmap_length() {
        assert!(check_bitmap_length(&[0; 4], 4).is_ok());

        let error = check_bitmap_length(&[0; 3], 4).unwrap_err();
        assert!(matches!(
            error,
            Error::BitmapLength {
                expected: 4,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_bitmap_from_values_reports_first_offender() {
        let error = bitmap_from_values(&[1, 2, 300, -4]).unwrap_err();
        assert!(matches!(
            error,
            Error::BitmapValue {
                index: 2,
                value: 300
            }
        ));
    }

    #[test]
    fn test_millis() {
        assert_eq!(millis(Duration::from_millis(250)).unwrap(), 250);
        assert!(millis(Duration::from_secs(u64::MAX)).is_err());
    }

    proptest! {
        #[test]
        fn prop_mode_range(value in -1000i64..1000) {
            prop_assert_eq!(is_valid(ArgumentKind::Mode, value), (1..=3).contains(&value));
        }

        #[test]
        fn prop_bitmap_values_accept_bytes(values in prop::collection::vec(0i32..=255, 0..64)) {
            let bytes = bitmap_from_values(&values).unwrap();
            prop_assert_eq!(bytes.len(), values.len());
        }

        #[test]
        fn prop_bitmap_values_reject_non_bytes(
            prefix in prop::collection::vec(0i32..=255, 0..16),
            bad in prop_oneof![i32::MIN..0, 256..i32::MAX],
        ) {
            let mut values = prefix.clone();
            values.push(bad);
            let error = bitmap_from_values(&values).unwrap_err();
            prop_assert!(
                matches!(error, Error::BitmapValue { index, .. } if index == prefix.len()),
                "unexpected error for value {}",
                bad
            );
        }
    }
}
