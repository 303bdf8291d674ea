//! Color value types shared by the LCD and LED bindings.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::validation::{self, ArgumentKind};

/// 24-bit RGB color for text on the color LCD.
///
/// Each component is a byte, so any `Color` is accepted by the native layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    /// White, the SDK default for text and titles.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Create a new color.
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Create a color from loosely typed components.
    ///
    /// # Errors
    ///
    /// Returns an error if any component is outside 0-255.
    pub fn try_rgb(red: i32, green: i32, blue: i32) -> Result<Self> {
        Ok(Self {
            red: validation::check(ArgumentKind::ColorByte, red.into())? as u8,
            green: validation::check(ArgumentKind::ColorByte, green.into())? as u8,
            blue: validation::check(ArgumentKind::ColorByte, blue.into())? as u8,
        })
    }

    /// Components in the order the native layer takes them.
    pub fn components(self) -> (i32, i32, i32) {
        (self.red.into(), self.green.into(), self.blue.into())
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Lighting color for LED effects, expressed as per-channel intensity
/// percentages (0-100).
///
/// # Examples
///
/// ```
/// use lgsdk_core::LightingColor;
///
/// let orange = LightingColor::new(100, 50, 0).unwrap();
/// assert_eq!(orange.green(), 50);
///
/// assert!(LightingColor::new(101, 0, 0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawLightingColor")]
pub struct LightingColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl LightingColor {
    /// Full intensity on every channel.
    pub const WHITE: Self = Self {
        red: 100,
        green: 100,
        blue: 100,
    };

    /// All channels off.
    pub const OFF: Self = Self {
        red: 0,
        green: 0,
        blue: 0,
    };

    /// Create a new lighting color.
    ///
    /// # Errors
    ///
    /// Returns an error if any percentage is greater than 100.
    pub fn new(red: u8, green: u8, blue: u8) -> Result<Self> {
        for value in [red, green, blue] {
            validation::check(ArgumentKind::Percentage, value.into())?;
        }
        Ok(Self { red, green, blue })
    }

    /// Red percentage.
    pub fn red(&self) -> u8 {
        self.red
    }

    /// Green percentage.
    pub fn green(&self) -> u8 {
        self.green
    }

    /// Blue percentage.
    pub fn blue(&self) -> u8 {
        self.blue
    }

    /// Components in the order the native layer takes them.
    pub fn components(self) -> (i32, i32, i32) {
        (self.red.into(), self.green.into(), self.blue.into())
    }
}

#[derive(Deserialize)]
struct RawLightingColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl TryFrom<RawLightingColor> for LightingColor {
    type Error = crate::Error;

    fn try_from(raw: RawLightingColor) -> Result<Self> {
        Self::new(raw.red, raw.green, raw.blue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_color_defaults_to_white() {
        assert_eq!(Color::default(), Color::WHITE);
        assert_eq!(Color::WHITE.components(), (255, 255, 255));
    }

    #[rstest]
    #[case(0, 0, 0)]
    #[case(255, 128, 1)]
    fn test_color_try_rgb_valid(#[case] r: i32, #[case] g: i32, #[case] b: i32) {
        let color = Color::try_rgb(r, g, b).unwrap();
        assert_eq!(color.components(), (r, g, b));
    }

    #[rstest]
    #[case(256, 0, 0)]
    #[case(0, -1, 0)]
    #[case(0, 0, 1000)]
    fn test_color_try_rgb_invalid(#[case] r: i32, #[case] g: i32, #[case] b: i32) {
        assert!(Color::try_rgb(r, g, b).is_err());
    }

    #[test]
    fn test_lighting_color_bounds() {
        assert!(LightingColor::new(100, 100, 100).is_ok());
        assert!(LightingColor::new(0, 101, 0).is_err());
        assert_eq!(LightingColor::WHITE.components(), (100, 100, 100));
    }
}
