//! G-key event record and its native bitfield encoding.
//!
//! The SDK reports every key or button transition as a 32-bit `GkeyCode`
//! bitfield passed by value. Read as little-endian bytes:
//!
//! ```text
//! byte 0   key index (G-key number or mouse button number)
//! byte 1   bit 0     key down (1) / key up (0)
//!          bits 1-2  mode (M1..M3)
//!          bit 3     event comes from a mouse
//!          bits 4-7  reserved1
//! byte 2-3 reserved2 (byte 2 high, byte 3 low)
//! ```

use serde::{Deserialize, Serialize};

/// Native `GkeyCode` bitfield.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RawGkeyCode(pub u32);

impl RawGkeyCode {
    /// Build a code from its in-memory bytes.
    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        Self(u32::from_le_bytes(bytes))
    }

    /// In-memory bytes of the code.
    pub fn to_bytes(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }

    /// Decode the bitfield.
    pub fn decode(self) -> KeyEvent {
        let [index, flags, high, low] = self.to_bytes();
        KeyEvent {
            key_index: index,
            key_down: flags & 0b0001 != 0,
            mode: (flags >> 1) & 0b0011,
            mouse: (flags >> 3) & 0b0001 != 0,
            reserved1: (flags >> 4) & 0b1111,
            reserved2: u16::from_be_bytes([high, low]),
        }
    }

    /// Encode an event. Fields wider than their bitfield are truncated.
    pub fn encode(event: &KeyEvent) -> Self {
        let flags = u8::from(event.key_down)
            | (event.mode & 0b0011) << 1
            | u8::from(event.mouse) << 3
            | (event.reserved1 & 0b1111) << 4;
        let [high, low] = event.reserved2.to_be_bytes();
        Self::from_bytes([event.key_index, flags, high, low])
    }
}

impl From<KeyEvent> for RawGkeyCode {
    fn from(event: KeyEvent) -> Self {
        Self::encode(&event)
    }
}

/// A G-key or mouse button transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyEvent {
    /// G-key or mouse button number, e.g. 6 for G6 or button 6.
    pub key_index: u8,

    /// `true` on press, `false` on release.
    pub key_down: bool,

    /// Active mode (1-3). Mouse events report whatever the device sends.
    pub mode: u8,

    /// Whether the event comes from a mouse.
    pub mouse: bool,

    /// Reserved by the SDK.
    pub reserved1: u8,

    /// Reserved by the SDK.
    pub reserved2: u16,
}

impl KeyEvent {
    /// A keyboard G-key transition.
    pub fn gkey(key_index: u8, mode: u8, key_down: bool) -> Self {
        Self {
            key_index,
            key_down,
            mode,
            mouse: false,
            reserved1: 0,
            reserved2: 0,
        }
    }

    /// A mouse button transition.
    pub fn mouse_button(key_index: u8, key_down: bool) -> Self {
        Self {
            key_index,
            key_down,
            mode: 0,
            mouse: true,
            reserved1: 0,
            reserved2: 0,
        }
    }
}
