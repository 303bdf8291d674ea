//! Keyboard LCD bindings for the Logitech G SDK.
//!
//! Two layers are exposed:
//!
//! - [`api`]: one function per vendor entry point, with argument validation.
//! - [`LcdSession`]: a stateful session that tracks init/shutdown, resolves
//!   whether a monochrome or color display is attached, and offers
//!   multi-line text, auto-update and image conversion.
//!
//! Both are generic over [`LcdNative`]. Use [`LcdLibrary`] for the real
//! vendor DLL and [`mock::MockLcd`] in tests.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use lgsdk_core::{Color, SdkConfig, ShutdownSignal};
//! use lgsdk_lcd::{LcdLibrary, LcdSession, LcdType};
//!
//! # fn main() -> lgsdk_core::Result<()> {
//! let signal = ShutdownSignal::new();
//! let _guard = signal.install_process_hooks()?;
//!
//! let library = LcdLibrary::load(&SdkConfig::default().with_env_overrides())?;
//! let mut lcd = LcdSession::new(Arc::new(library), signal);
//!
//! if lcd.init("My Applet", LcdType::ANY)? {
//!     lcd.set_lines(&["Hello", "World"], Color::WHITE)?;
//!     lcd.update()?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod grayscale;
pub mod mock;
pub mod native;
pub mod session;

pub use config::{COLOR_CONFIG, LcdButton, LcdConfig, LcdType, MONO_CONFIG};
pub use grayscale::GrayscaleConversion;
pub use native::{LcdLibrary, LcdNative};
pub use session::LcdSession;
