//! Lighting bindings for the Logitech G SDK.
//!
//! Covers whole-device lighting and effects, per-key lighting on per-key RGB
//! keyboards, and the options an applet can expose to the user in Logitech
//! Gaming Software.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use lgsdk_core::{LightingColor, SdkConfig, ShutdownSignal};
//! use lgsdk_led::{DeviceType, KeyName, LedLibrary, LedSession};
//!
//! # fn main() -> lgsdk_core::Result<()> {
//! let signal = ShutdownSignal::new();
//! let _guard = signal.install_process_hooks()?;
//!
//! let library = LedLibrary::load(&SdkConfig::default().with_env_overrides())?;
//! let mut led = LedSession::new(Arc::new(library), signal);
//!
//! if led.init()? {
//!     led.set_target_device(DeviceType::PERKEY_RGB)?;
//!     led.set_lighting_for_key_with_key_name(KeyName::W, LightingColor::new(0, 100, 0)?)?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod key_name;
pub mod mock;
pub mod native;
pub mod session;

pub use config::{BITMAP_SIZE, ConfigPath, DeviceType, SdkVersion};
pub use key_name::KeyName;
pub use native::{LedLibrary, LedNative};
pub use session::{LedConfigOptions, LedSession};
