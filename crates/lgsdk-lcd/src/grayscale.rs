//! Color to grayscale reduction for the monochrome display.
//!
//! Images are usually decoded as RGBA. The monochrome display takes one byte
//! per pixel and lights a pixel when its value is 128 or more, so each quad
//! is reduced to a single luminance byte. Alpha is ignored.

use serde::{Deserialize, Serialize};

/// Grayscale conversion method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrayscaleConversion {
    /// `(r + g + b) / 3`
    Average,

    /// `(max(r, g, b) + min(r, g, b)) / 2`
    Lightness,

    /// `0.21 r + 0.72 g + 0.07 b`
    #[default]
    Luminosity,
}

impl GrayscaleConversion {
    /// Reduce one pixel.
    pub fn convert(self, red: u8, green: u8, blue: u8) -> u8 {
        match self {
            Self::Average => average(red, green, blue),
            Self::Lightness => lightness(red, green, blue),
            Self::Luminosity => luminosity(red, green, blue),
        }
    }

    /// Reduce one RGBA quad.
    pub fn convert_rgba(self, rgba: [u8; 4]) -> u8 {
        let [red, green, blue, _alpha] = rgba;
        self.convert(red, green, blue)
    }

    /// Reduce a flat RGBA buffer to one byte per pixel.
    ///
    /// A trailing incomplete quad is ignored.
    pub fn convert_buffer(self, rgba: &[u8]) -> Vec<u8> {
        rgba.chunks_exact(4)
            .map(|quad| self.convert(quad[0], quad[1], quad[2]))
            .collect()
    }
}

/// Mean of the three components, rounded.
pub fn average(red: u8, green: u8, blue: u8) -> u8 {
    let sum = u16::from(red) + u16::from(green) + u16::from(blue);
    ((f64::from(sum) / 3.0).round()) as u8
}

/// Midpoint of the brightest and darkest component, rounded.
pub fn lightness(red: u8, green: u8, blue: u8) -> u8 {
    let max = red.max(green).max(blue);
    let min = red.min(green).min(blue);
    ((u16::from(max) + u16::from(min) + 1) / 2) as u8
}

/// Perceptual weighting of the components, rounded.
pub fn luminosity(red: u8, green: u8, blue: u8) -> u8 {
    let value = 0.21 * f64::from(red) + 0.72 * f64::from(green) + 0.07 * f64::from(blue);
    value.round().clamp(0.0, 255.0) as u8
}
