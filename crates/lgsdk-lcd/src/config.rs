//! LCD device variants, buttons and geometry.
//!
//! Two kinds of keyboard display exist:
//!
//! | Variant | Resolution | Bytes/pixel | Text lines | Buttons |
//! |---------|------------|-------------|------------|---------|
//! | Monochrome | 160×43 | 1 | 4 | 0-3 |
//! | Color | 320×240 | 4 (RGBA) | 8 | left, right, ok, cancel, up, down, menu |
//!
//! A session resolves one [`LcdConfig`] after a successful init by asking the
//! native layer whether a color display is connected.

use bitflags::bitflags;
use lgsdk_core::validation::ArgumentKind;

/// Monochrome display width in pixels.
pub const MONO_WIDTH: usize = 160;

/// Monochrome display height in pixels.
pub const MONO_HEIGHT: usize = 43;

/// Color display width in pixels.
pub const COLOR_WIDTH: usize = 320;

/// Color display height in pixels.
pub const COLOR_HEIGHT: usize = 240;

/// Length of a monochrome background bitmap.
pub const BITMAP_LENGTH_MONO: usize = MONO_WIDTH * MONO_HEIGHT;

/// Length of a color background bitmap.
pub const BITMAP_LENGTH_COLOR: usize = COLOR_WIDTH * COLOR_HEIGHT * 4;

/// Opaque white RGBA pixel.
pub const COLOR_WHITE: [u8; 4] = [255, 255, 255, 255];

/// Opaque black RGBA pixel.
pub const COLOR_BLACK: [u8; 4] = [0, 0, 0, 255];

bitflags! {
    /// Display variant targeted by an applet.
    ///
    /// Flags may be combined to target both variants at once.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LcdType: i32 {
        /// Monochrome display.
        const MONO = 1;

        /// Color display.
        const COLOR = 2;

        /// Either display.
        const ANY = Self::MONO.bits() | Self::COLOR.bits();
    }
}

/// Hardware button next to the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LcdButton {
    Mono0,
    Mono1,
    Mono2,
    Mono3,
    Left,
    Right,
    Ok,
    Cancel,
    Up,
    Down,
    Menu,
}

impl LcdButton {
    /// Buttons of the monochrome display.
    pub const MONO: [Self; 4] = [Self::Mono0, Self::Mono1, Self::Mono2, Self::Mono3];

    /// Buttons of the color display.
    pub const COLOR: [Self; 7] = [
        Self::Left,
        Self::Right,
        Self::Ok,
        Self::Cancel,
        Self::Up,
        Self::Down,
        Self::Menu,
    ];

    /// Native button code.
    pub const fn code(self) -> i32 {
        match self {
            Self::Mono0 => 0x0001,
            Self::Mono1 => 0x0002,
            Self::Mono2 => 0x0004,
            Self::Mono3 => 0x0008,
            Self::Left => 0x0100,
            Self::Right => 0x0200,
            Self::Ok => 0x0400,
            Self::Cancel => 0x0800,
            Self::Up => 0x1000,
            Self::Down => 0x2000,
            Self::Menu => 0x4000,
        }
    }

    /// Look up a button by its native code.
    pub fn from_code(code: i32) -> Option<Self> {
        Self::MONO
            .into_iter()
            .chain(Self::COLOR)
            .find(|button| button.code() == code)
    }

    /// Display variant the button belongs to.
    pub const fn lcd_type(self) -> LcdType {
        match self {
            Self::Mono0 | Self::Mono1 | Self::Mono2 | Self::Mono3 => LcdType::MONO,
            _ => LcdType::COLOR,
        }
    }
}

/// Geometry and button set of one display variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LcdConfig {
    /// Variant flag.
    pub lcd_type: LcdType,

    /// Width in pixels.
    pub width: usize,

    /// Height in pixels.
    pub height: usize,

    /// Bytes per pixel in a background bitmap.
    pub bytes_per_pixel: usize,

    /// Number of text lines.
    pub lines: usize,

    /// Buttons present on the device.
    pub buttons: &'static [LcdButton],
}

/// Monochrome display configuration.
pub const MONO_CONFIG: LcdConfig = LcdConfig {
    lcd_type: LcdType::MONO,
    width: MONO_WIDTH,
    height: MONO_HEIGHT,
    bytes_per_pixel: 1,
    lines: 4,
    buttons: &LcdButton::MONO,
};

/// Color display configuration.
pub const COLOR_CONFIG: LcdConfig = LcdConfig {
    lcd_type: LcdType::COLOR,
    width: COLOR_WIDTH,
    height: COLOR_HEIGHT,
    bytes_per_pixel: 4,
    lines: 8,
    buttons: &LcdButton::COLOR,
};

impl LcdConfig {
    /// Check whether this is the color variant.
    pub fn is_color(&self) -> bool {
        self.lcd_type == LcdType::COLOR
    }

    /// Exact length of a background bitmap.
    pub const fn bitmap_length(&self) -> usize {
        self.width * self.height * self.bytes_per_pixel
    }

    /// Argument kind used to validate line numbers.
    pub fn line_kind(&self) -> ArgumentKind {
        if self.is_color() {
            ArgumentKind::ColorLine
        } else {
            ArgumentKind::MonoLine
        }
    }

    /// Check whether `button` exists on this variant.
    pub fn has_button(&self, button: LcdButton) -> bool {
        self.buttons.contains(&button)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_bitmap_lengths() {
        assert_eq!(MONO_CONFIG.bitmap_length(), BITMAP_LENGTH_MONO);
        assert_eq!(MONO_CONFIG.bitmap_length(), 6880);
        assert_eq!(COLOR_CONFIG.bitmap_length(), BITMAP_LENGTH_COLOR);
        assert_eq!(COLOR_CONFIG.bitmap_length(), 307_200);
    }

    #[rstest]
    #[case(0x0001, Some(LcdButton::Mono0))]
    #[case(0x0008, Some(LcdButton::Mono3))]
    #[case(0x0100, Some(LcdButton::Left))]
    #[case(0x4000, Some(LcdButton::Menu))]
    #[case(0x0010, None)]
    #[case(0, None)]
    fn test_button_from_code(#[case] code: i32, #[case] expected: Option<LcdButton>) {
        assert_eq!(LcdButton::from_code(code), expected);
    }

    #[test]
    fn test_buttons_belong_to_one_variant() {
        for button in LcdButton::MONO {
            assert!(MONO_CONFIG.has_button(button));
            assert!(!COLOR_CONFIG.has_button(button));
            assert_eq!(button.lcd_type(), LcdType::MONO);
        }
        for button in LcdButton::COLOR {
            assert!(COLOR_CONFIG.has_button(button));
            assert!(!MONO_CONFIG.has_button(button));
        }
    }

    #[test]
    fn test_line_kinds() {
        assert_eq!(MONO_CONFIG.line_kind(), ArgumentKind::MonoLine);
        assert_eq!(COLOR_CONFIG.line_kind(), ArgumentKind::ColorLine);
    }

    #[test]
    fn test_lcd_type_bits() {
        assert_eq!(LcdType::ANY.bits(), 3);
        assert!(LcdType::ANY.contains(LcdType::COLOR));
    }
}
