//! Error types shared by every device family.
//!
//! Three kinds of failure exist in the bindings:
//!
//! - **Invalid argument**: an id, line number, color component or bitmap is
//!   outside its fixed legal range. Raised before any native call happens.
//! - **Invalid session state**: a device operation was invoked before `init`,
//!   or `init` was invoked twice.
//! - **Loading**: the vendor library or one of its exports could not be found.
//!
//! A native call that reports failure (`false`, an empty string) is not an
//! error. Its result is handed back to the caller unchanged.

use std::path::PathBuf;

use crate::validation::ArgumentKind;

/// Result type alias for SDK operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the SDK bindings.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A numeric argument is outside its closed range.
    #[error("Not allowed value {value} for {kind}. Allowed values are: {min}-{max}")]
    OutOfRange {
        kind: ArgumentKind,
        value: i64,
        min: i64,
        max: i64,
    },

    /// The button code does not exist on the addressed device.
    #[error("The given button does not exist: {0:#06x}")]
    InvalidButton(i32),

    /// A bitmap does not have the exact length the device expects.
    #[error("The bitmap must contain {expected} elements, got {actual}")]
    BitmapLength { expected: usize, actual: usize },

    /// A bitmap element is not a byte.
    #[error("The bitmap must contain only bytes (0-255), got {value} at index {index}")]
    BitmapValue { index: usize, value: i64 },

    /// A device operation was invoked before a successful `init`.
    #[error("The {api} API is not yet initialized. Please call `init`.")]
    NotInitialized { api: &'static str },

    /// `init` was invoked while the session is already initialized.
    #[error("The {api} API had already been initialized.")]
    AlreadyInitialized { api: &'static str },

    /// The vendor library could not be loaded.
    #[error("Failed to load native library {}: {source}", path.display())]
    LibraryLoad {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    /// The vendor library does not export a required entry point.
    #[error("Native library does not export {symbol}: {source}")]
    MissingSymbol {
        symbol: &'static str,
        #[source]
        source: libloading::Error,
    },

    /// No vendor build exists for the running architecture.
    #[error("Architecture {0} not supported")]
    UnsupportedArchitecture(String),

    /// The process-lifetime hooks could not be installed.
    #[error("Shutdown hook error: {0}")]
    ShutdownHook(String),

    /// Invalid SDK configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a new out-of-range error for the given argument kind.
    pub fn out_of_range(kind: ArgumentKind, value: i64) -> Self {
        let bounds = kind.bounds();
        Self::OutOfRange {
            kind,
            value,
            min: *bounds.start(),
            max: *bounds.end(),
        }
    }

    /// Create a new invalid button error.
    pub fn invalid_button(code: i32) -> Self {
        Self::InvalidButton(code)
    }

    /// Create a new bitmap length error.
    pub fn bitmap_length(expected: usize, actual: usize) -> Self {
        Self::BitmapLength { expected, actual }
    }

    /// Create a new bitmap value error.
    pub fn bitmap_value(index: usize, value: i64) -> Self {
        Self::BitmapValue { index, value }
    }

    /// Create a new not-initialized error.
    pub fn not_initialized(api: &'static str) -> Self {
        Self::NotInitialized { api }
    }

    /// Create a new already-initialized error.
    pub fn already_initialized(api: &'static str) -> Self {
        Self::AlreadyInitialized { api }
    }

    /// Create a new configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Check if this error was raised by argument validation.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::OutOfRange { .. }
                | Self::InvalidButton(_)
                | Self::BitmapLength { .. }
                | Self::BitmapValue { .. }
        )
    }

    /// Check if this error was raised by a session state guard.
    pub fn is_invalid_state(&self) -> bool {
        matches!(
            self,
            Self::NotInitialized { .. } | Self::AlreadyInitialized { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_error() {
        let error = Error::out_of_range(ArgumentKind::Gkey, 30);
        assert!(matches!(
            error,
            Error::OutOfRange {
                min: 0,
                max: 29,
                ..
            }
        ));
        assert_eq!(
            error.to_string(),
            "Not allowed value 30 for G-key number. Allowed values are: 0-29"
        );
        assert!(error.is_invalid_argument());
    }

    #[test]
    fn test_invalid_button_error() {
        let error = Error::invalid_button(0x10);
        assert_eq!(error.to_string(), "The given button does not exist: 0x0010");
    }

    #[test]
    fn test_bitmap_errors() {
        let error = Error::bitmap_length(6880, 10);
        assert_eq!(
            error.to_string(),
            "The bitmap must contain 6880 elements, got 10"
        );

        let error = Error::bitmap_value(3, 256);
        assert_eq!(
            error.to_string(),
            "The bitmap must contain only bytes (0-255), got 256 at index 3"
        );
        assert!(error.is_invalid_argument());
    }

    #[test]
    fn test_session_state_errors() {
        let error = Error::not_initialized("LCD");
        assert_eq!(
            error.to_string(),
            "The LCD API is not yet initialized. Please call `init`."
        );
        assert!(error.is_invalid_state());

        let error = Error::already_initialized("G-key");
        assert_eq!(error.to_string(), "The G-key API had already been initialized.");
        assert!(error.is_invalid_state());
        assert!(!error.is_invalid_argument());
    }

    #[test]
    fn test_error_display() {
        let errors = vec![
            Error::config("missing lib_dir"),
            Error::UnsupportedArchitecture("aarch64".to_string()),
            Error::ShutdownHook("handler already set".to_string()),
        ];

        for error in errors {
            let _ = format!("{}", error);
            let _ = format!("{:?}", error);
        }
    }
}
