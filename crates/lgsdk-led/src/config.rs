//! LED SDK constants and value types.

use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Keys per row of the per-key bitmap.
pub const BITMAP_WIDTH: usize = 21;

/// Rows of the per-key bitmap.
pub const BITMAP_HEIGHT: usize = 6;

/// Bytes per key (BGRA).
pub const BITMAP_BYTES_PER_KEY: usize = 4;

/// Length of the per-key bitmap.
pub const BITMAP_SIZE: usize = BITMAP_WIDTH * BITMAP_HEIGHT * BITMAP_BYTES_PER_KEY;

/// Buffer size used by [`LedConfigOptions::get_key_input`](crate::LedConfigOptions::get_key_input).
pub const KEY_INPUT_BUFFER_SIZE: usize = 256;

bitflags! {
    /// Device classes an effect is applied to (`LOGI_DEVICETYPE_*`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DeviceType: i32 {
        const MONOCHROME = 1 << 0;
        const RGB = 1 << 1;
        const PERKEY_RGB = 1 << 2;
        const ALL = Self::MONOCHROME.bits() | Self::RGB.bits() | Self::PERKEY_RGB.bits();
    }
}

/// Version reported by `LogiLedGetSdkVersion`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SdkVersion {
    pub major: i32,
    pub minor: i32,
    pub build: i32,
}

impl fmt::Display for SdkVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.build)
    }
}

/// Path of a user-configurable option in Logitech Gaming Software, e.g.
/// `"effects/speed"`.
///
/// Built from a single string or from segments, which are joined with `/`.
///
/// # Examples
///
/// ```
/// use lgsdk_led::ConfigPath;
///
/// assert_eq!(ConfigPath::from("effects/speed"), ConfigPath::from(["effects", "speed"]));
/// assert_eq!(ConfigPath::from(vec!["a".to_string()]).as_str(), "a");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigPath(String);

impl ConfigPath {
    /// Joined path.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ConfigPath {
    fn from(path: &str) -> Self {
        Self(path.to_string())
    }
}

impl From<String> for ConfigPath {
    fn from(path: String) -> Self {
        Self(path)
    }
}

impl<S: AsRef<str>> From<&[S]> for ConfigPath {
    fn from(segments: &[S]) -> Self {
        Self(
            segments
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<_>>()
                .join("/"),
        )
    }
}

impl<S: AsRef<str>, const N: usize> From<[S; N]> for ConfigPath {
    fn from(segments: [S; N]) -> Self {
        Self::from(&segments[..])
    }
}

impl<S: AsRef<str>> From<Vec<S>> for ConfigPath {
    fn from(segments: Vec<S>) -> Self {
        Self::from(&segments[..])
    }
}
