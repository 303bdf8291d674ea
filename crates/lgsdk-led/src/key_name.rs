//! Per-key identifiers (`LogiLed::KeyName`).
//!
//! Values are keyboard scan codes, except the G-keys and the logo/badge
//! zones which use vendor-specific codes above the scan-code range.

use std::fmt;
use std::str::FromStr;

use lgsdk_core::{Error, Result};

macro_rules! key_names {
    ($($variant:ident = $code:literal => $name:literal,)*) => {
        /// Key addressed by the per-key lighting functions.
        #[repr(i32)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum KeyName {
            $($variant = $code,)*
        }

        impl KeyName {
            /// Every key, in header order.
            pub const ALL: &'static [KeyName] = &[$(KeyName::$variant,)*];

            /// Look a key up by its native code.
            pub fn from_code(code: i32) -> Option<Self> {
                match code {
                    $($code => Some(Self::$variant),)*
                    _ => None,
                }
            }

            /// Header constant name, e.g. `"NUM_LOCK"`.
            pub fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }
        }
    };
}

key_names! {
    Esc = 0x01 => "ESC",
    F1 = 0x3b => "F1",
    F2 = 0x3c => "F2",
    F3 = 0x3d => "F3",
    F4 = 0x3e => "F4",
    F5 = 0x3f => "F5",
    F6 = 0x40 => "F6",
    F7 = 0x41 => "F7",
    F8 = 0x42 => "F8",
    F9 = 0x43 => "F9",
    F10 = 0x44 => "F10",
    F11 = 0x57 => "F11",
    F12 = 0x58 => "F12",
    PrintScreen = 0x137 => "PRINT_SCREEN",
    ScrollLock = 0x46 => "SCROLL_LOCK",
    PauseBreak = 0x145 => "PAUSE_BREAK",
    Tilde = 0x29 => "TILDE",
    One = 0x02 => "ONE",
    Two = 0x03 => "TWO",
    Three = 0x04 => "THREE",
    Four = 0x05 => "FOUR",
    Five = 0x06 => "FIVE",
    Six = 0x07 => "SIX",
    Seven = 0x08 => "SEVEN",
    Eight = 0x09 => "EIGHT",
    Nine = 0x0a => "NINE",
    Zero = 0x0b => "ZERO",
    Minus = 0x0c => "MINUS",
    Equals = 0x0d => "EQUALS",
    Backspace = 0x0e => "BACKSPACE",
    Insert = 0x152 => "INSERT",
    Home = 0x147 => "HOME",
    PageUp = 0x149 => "PAGE_UP",
    NumLock = 0x45 => "NUM_LOCK",
    NumSlash = 0x135 => "NUM_SLASH",
    NumAsterisk = 0x37 => "NUM_ASTERISK",
    NumMinus = 0x4a => "NUM_MINUS",
    Tab = 0x0f => "TAB",
    Q = 0x10 => "Q",
    W = 0x11 => "W",
    E = 0x12 => "E",
    R = 0x13 => "R",
    T = 0x14 => "T",
    Y = 0x15 => "Y",
    U = 0x16 => "U",
    I = 0x17 => "I",
    O = 0x18 => "O",
    P = 0x19 => "P",
    OpenBracket = 0x1a => "OPEN_BRACKET",
    CloseBracket = 0x1b => "CLOSE_BRACKET",
    Backslash = 0x2b => "BACKSLASH",
    KeyboardDelete = 0x153 => "KEYBOARD_DELETE",
    End = 0x14f => "END",
    PageDown = 0x151 => "PAGE_DOWN",
    NumSeven = 0x47 => "NUM_SEVEN",
    NumEight = 0x48 => "NUM_EIGHT",
    NumNine = 0x49 => "NUM_NINE",
    NumPlus = 0x4e => "NUM_PLUS",
    CapsLock = 0x3a => "CAPS_LOCK",
    A = 0x1e => "A",
    S = 0x1f => "S",
    D = 0x20 => "D",
    F = 0x21 => "F",
    G = 0x22 => "G",
    H = 0x23 => "H",
    J = 0x24 => "J",
    K = 0x25 => "K",
    L = 0x26 => "L",
    Semicolon = 0x27 => "SEMICOLON",
    Apostrophe = 0x28 => "APOSTROPHE",
    Enter = 0x1c => "ENTER",
    NumFour = 0x4b => "NUM_FOUR",
    NumFive = 0x4c => "NUM_FIVE",
    NumSix = 0x4d => "NUM_SIX",
    LeftShift = 0x2a => "LEFT_SHIFT",
    Z = 0x2c => "Z",
    X = 0x2d => "X",
    C = 0x2e => "C",
    V = 0x2f => "V",
    B = 0x30 => "B",
    N = 0x31 => "N",
    M = 0x32 => "M",
    Comma = 0x33 => "COMMA",
    Period = 0x34 => "PERIOD",
    ForwardSlash = 0x35 => "FORWARD_SLASH",
    RightShift = 0x36 => "RIGHT_SHIFT",
    ArrowUp = 0x148 => "ARROW_UP",
    NumOne = 0x4f => "NUM_ONE",
    NumTwo = 0x50 => "NUM_TWO",
    NumThree = 0x51 => "NUM_THREE",
    NumEnter = 0x11c => "NUM_ENTER",
    LeftControl = 0x1d => "LEFT_CONTROL",
    LeftWindows = 0x15b => "LEFT_WINDOWS",
    LeftAlt = 0x38 => "LEFT_ALT",
    Space = 0x39 => "SPACE",
    RightAlt = 0x138 => "RIGHT_ALT",
    RightWindows = 0x15c => "RIGHT_WINDOWS",
    ApplicationSelect = 0x15d => "APPLICATION_SELECT",
    RightControl = 0x11d => "RIGHT_CONTROL",
    ArrowLeft = 0x14b => "ARROW_LEFT",
    ArrowDown = 0x150 => "ARROW_DOWN",
    ArrowRight = 0x14d => "ARROW_RIGHT",
    NumZero = 0x52 => "NUM_ZERO",
    NumPeriod = 0x53 => "NUM_PERIOD",
    G1 = 0xfff1 => "G_1",
    G2 = 0xfff2 => "G_2",
    G3 = 0xfff3 => "G_3",
    G4 = 0xfff4 => "G_4",
    G5 = 0xfff5 => "G_5",
    G6 = 0xfff6 => "G_6",
    G7 = 0xfff7 => "G_7",
    G8 = 0xfff8 => "G_8",
    G9 = 0xfff9 => "G_9",
    GLogo = 0xffff1 => "G_LOGO",
    GBadge = 0xffff2 => "G_BADGE",
}

impl KeyName {
    /// Native code passed to the SDK.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Whether this is one of the G1-G9 keys.
    pub fn is_gkey(self) -> bool {
        (Self::G1.code()..=Self::G9.code()).contains(&self.code())
    }
}

impl fmt::Display for KeyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for KeyName {
    type Err = Error;

    /// Parse a header constant name, ignoring case.
    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|key| key.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::config(format!("unknown key name '{s}'")))
    }
}

impl From<KeyName> for i32 {
    fn from(key: KeyName) -> Self {
        key.code()
    }
}
