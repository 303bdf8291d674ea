//! Locating and opening the vendor libraries.
//!
//! The vendor ships one wrapper DLL per device family and per architecture,
//! laid out as:
//!
//! ```text
//! <lib_dir>/
//! ├── x86/
//! │   ├── LogitechLcdEnginesWrapper-8.57.148.dll
//! │   └── ...
//! └── x64/
//!     ├── LogitechGkeyEnginesWrapper-8.57.148.dll
//!     └── ...
//! ```
//!
//! [`SdkConfig`] describes where the files live and which versions to use.
//! It can be built from defaults, a TOML document, or a file, and the
//! `LGSDK_LIB_DIR` environment variable overrides the directory.
//!
//! # Examples
//!
//! ```
//! use lgsdk_core::{SdkConfig, SdkLibrary};
//!
//! let config = SdkConfig::from_toml_str(r#"
//!     lib_dir = "vendor/lib"
//!     lcd_version = "8.57.148"
//! "#).unwrap();
//!
//! assert_eq!(config.version(SdkLibrary::Lcd), "8.57.148");
//! assert_eq!(
//!     SdkLibrary::Lcd.file_name(config.version(SdkLibrary::Lcd)),
//!     "LogitechLcdEnginesWrapper-8.57.148.dll"
//! );
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use libloading::Library;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Environment variable overriding [`SdkConfig::lib_dir`].
pub const LIB_DIR_ENV: &str = "LGSDK_LIB_DIR";

/// Default directory holding the per-architecture library folders.
pub const DEFAULT_LIB_DIR: &str = "./lib";

/// Default LCD wrapper version.
pub const DEFAULT_LCD_VERSION: &str = "8.57.148";

/// Default G-key wrapper version.
pub const DEFAULT_GKEY_VERSION: &str = "8.57.148";

/// Default LED wrapper version.
pub const DEFAULT_LED_VERSION: &str = "8.87.117";

/// Vendor library family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SdkLibrary {
    /// Keyboard LCD.
    Lcd,

    /// Programmable G-keys and mouse buttons.
    Gkey,

    /// Lighting.
    Led,
}

impl SdkLibrary {
    /// Name segment used in the wrapper file name.
    pub fn type_name(self) -> &'static str {
        match self {
            Self::Lcd => "Lcd",
            Self::Gkey => "Gkey",
            Self::Led => "Led",
        }
    }

    /// File name of the wrapper for a given version.
    pub fn file_name(self, version: &str) -> String {
        format!("Logitech{}EnginesWrapper-{}.dll", self.type_name(), version)
    }
}

impl fmt::Display for SdkLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lcd => write!(f, "LCD"),
            Self::Gkey => write!(f, "G-key"),
            Self::Led => write!(f, "LED"),
        }
    }
}

/// Folder name of the vendor build matching the running architecture.
///
/// # Errors
///
/// Returns [`Error::UnsupportedArchitecture`] on anything but x86 and x86_64.
pub fn arch_dir() -> Result<&'static str> {
    if cfg!(target_arch = "x86") {
        Ok("x86")
    } else if cfg!(target_arch = "x86_64") {
        Ok("x64")
    } else {
        Err(Error::UnsupportedArchitecture(
            std::env::consts::ARCH.to_string(),
        ))
    }
}

/// Location and versions of the vendor libraries.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SdkConfig {
    /// Directory containing the `x86` and `x64` folders.
    pub lib_dir: PathBuf,

    /// LCD wrapper version.
    pub lcd_version: String,

    /// G-key wrapper version.
    pub gkey_version: String,

    /// LED wrapper version.
    pub led_version: String,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            lib_dir: PathBuf::from(DEFAULT_LIB_DIR),
            lcd_version: DEFAULT_LCD_VERSION.to_string(),
            gkey_version: DEFAULT_GKEY_VERSION.to_string(),
            led_version: DEFAULT_LED_VERSION.to_string(),
        }
    }
}

impl SdkConfig {
    /// Parse a configuration from TOML. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the document is not valid TOML or has
    /// keys of the wrong type.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| Error::config(e.to_string()))
    }

    /// Read a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or [`Error::Config`]
    /// if it cannot be parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Reading SDK configuration from {}", path.display());
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Apply the `LGSDK_LIB_DIR` environment override, if set.
    pub fn with_env_overrides(self) -> Self {
        self.with_lib_dir_override(std::env::var_os(LIB_DIR_ENV).map(PathBuf::from))
    }

    fn with_lib_dir_override(mut self, lib_dir: Option<PathBuf>) -> Self {
        if let Some(lib_dir) = lib_dir {
            debug!("Library directory overridden to {}", lib_dir.display());
            self.lib_dir = lib_dir;
        }
        self
    }

    /// Configured version of a library family.
    pub fn version(&self, library: SdkLibrary) -> &str {
        match library {
            SdkLibrary::Lcd => &self.lcd_version,
            SdkLibrary::Gkey => &self.gkey_version,
            SdkLibrary::Led => &self.led_version,
        }
    }

    /// Full path of the wrapper DLL for a library family.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedArchitecture`] if no vendor build exists
    /// for the running architecture.
    pub fn library_path(&self, library: SdkLibrary) -> Result<PathBuf> {
        Ok(self
            .lib_dir
            .join(arch_dir()?)
            .join(library.file_name(self.version(library))))
    }
}

/// An opened vendor library.
///
/// The function pointers copied out of it by [`NativeLibrary::symbol`] stay
/// valid for as long as this value is alive, so binding tables keep it next
/// to their pointers.
pub struct NativeLibrary {
    library: Library,
    path: PathBuf,
}

impl NativeLibrary {
    /// Open the library at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LibraryLoad`] if the library cannot be loaded.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        info!("Loading native library from {}", path.display());

        // SAFETY: the vendor wrappers have no load-time initialisation
        // beyond the loader's own.
        let library = unsafe { Library::new(&path) }.map_err(|source| Error::LibraryLoad {
            path: path.clone(),
            source,
        })?;

        Ok(Self { library, path })
    }

    /// Open the wrapper of `library` as described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be resolved or the library cannot
    /// be loaded.
    pub fn open_sdk(config: &SdkConfig, library: SdkLibrary) -> Result<Self> {
        Self::open(config.library_path(library)?)
    }

    /// Path the library was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Copy an exported function pointer out of the library.
    ///
    /// `name` must be nul-terminated.
    ///
    /// # Safety
    ///
    /// `T` must be a function pointer type matching the export's actual
    /// signature and calling convention.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingSymbol`] if the export does not exist.
    pub unsafe fn symbol<T: Copy>(&self, name: &'static str) -> Result<T> {
        debug_assert!(name.ends_with('\0'), "symbol names must be nul-terminated");
        // SAFETY: forwarded to the caller.
        let symbol = unsafe { self.library.get::<T>(name.as_bytes()) }.map_err(|source| {
            Error::MissingSymbol {
                symbol: name.trim_end_matches('\0'),
                source,
            }
        })?;
        Ok(*symbol)
    }
}

impl fmt::Debug for NativeLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeLibrary")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
