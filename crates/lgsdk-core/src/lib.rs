//! Shared building blocks for the Logitech G SDK bindings.
//!
//! The device crates (`lgsdk-lcd`, `lgsdk-gkey`, `lgsdk-led`) all follow the
//! same layering:
//!
//! ```text
//! host application
//!     │
//!     ▼
//! session (state guard + ergonomics)
//!     │
//!     ▼
//! functional API (argument validation)
//!     │
//!     ▼
//! native binding table (libloading)
//!     │
//!     ▼
//! vendor DLL
//! ```
//!
//! This crate holds the pieces every layer shares: the [`Error`] taxonomy,
//! the argument [`validation`] rules, wide-string marshalling, the library
//! path resolution driven by [`SdkConfig`], the embeddable [`SessionState`]
//! and the process-lifetime [`ShutdownSignal`].
//!
//! # Example
//!
//! ```
//! use lgsdk_core::validation::{self, ArgumentKind};
//!
//! assert!(validation::is_valid(ArgumentKind::Mode, 3));
//! assert!(validation::check(ArgumentKind::Gkey, 30).is_err());
//! ```

pub mod error;
pub mod library;
pub mod session;
pub mod shutdown;
pub mod types;
pub mod validation;
pub mod wide;

pub use error::{Error, Result};
pub use library::{NativeLibrary, SdkConfig, SdkLibrary};
pub use session::SessionState;
pub use shutdown::{ShutdownGuard, ShutdownReason, ShutdownSignal};
pub use types::{Color, LightingColor};
pub use validation::ArgumentKind;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
