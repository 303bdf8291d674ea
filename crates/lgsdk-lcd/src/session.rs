//! Stateful LCD session.
//!
//! [`LcdSession`] wraps the functional API with the init/shutdown guard and
//! hides the monochrome/color split: after init it knows which display is
//! attached and routes `set_background`, `set_text` and `set_title` to the
//! matching entry point.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use lgsdk_core::{Color, ShutdownSignal};
//! use lgsdk_lcd::{LcdSession, LcdType};
//! use lgsdk_lcd::mock::MockLcd;
//!
//! let signal = ShutdownSignal::new();
//! let mut lcd = LcdSession::new(Arc::new(MockLcd::color()), signal);
//!
//! assert!(lcd.init("Demo", LcdType::ANY).unwrap());
//! assert!(lcd.is_color());
//!
//! lcd.enable_auto_update();
//! assert!(lcd.set_lines(&["first", "second"], Color::WHITE).unwrap());
//! assert!(lcd.shutdown());
//! ```

use std::sync::Arc;

use lgsdk_core::validation;
use lgsdk_core::{Color, Error, Result, SessionState, ShutdownSignal};
use tracing::{debug, info};

use crate::api;
use crate::config::{
    COLOR_BLACK, COLOR_CONFIG, COLOR_WHITE, LcdButton, LcdConfig, LcdType, MONO_CONFIG,
};
use crate::grayscale::GrayscaleConversion;
use crate::native::LcdNative;

/// LCD session bound to one native implementation.
pub struct LcdSession<N: LcdNative + 'static> {
    native: Arc<N>,
    signal: ShutdownSignal,
    state: SessionState,
    name: Option<String>,
    config: Option<LcdConfig>,
    auto_update: bool,
    grayscale: GrayscaleConversion,
}

impl<N: LcdNative + 'static> LcdSession<N> {
    /// Create an uninitialized session.
    ///
    /// The session subscribes to `signal` on its first successful init.
    pub fn new(native: Arc<N>, signal: ShutdownSignal) -> Self {
        Self {
            native,
            signal,
            state: SessionState::new("LCD"),
            name: None,
            config: None,
            auto_update: false,
            grayscale: GrayscaleConversion::default(),
        }
    }

    /// Initialize the applet and resolve the attached display.
    ///
    /// Returns `Ok(false)` if the native init fails or the shutdown signal
    /// has already fired; the session then stays uninitialized.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyInitialized`] if the session is initialized.
    pub fn init(&mut self, name: &str, lcd_type: LcdType) -> Result<bool> {
        self.state.ensure_uninitialized()?;
        if self.signal.is_triggered() {
            info!("LCD init refused, shutdown already signalled");
            return Ok(false);
        }

        self.name = Some(name.to_string());
        if !api::init(&*self.native, name, lcd_type) {
            info!("LCD init failed for applet '{}'", name);
            return Ok(false);
        }
        self.state.mark_initialized();

        let config = if api::is_connected(&*self.native, LcdType::COLOR) {
            COLOR_CONFIG
        } else {
            MONO_CONFIG
        };
        self.config = Some(config);

        let native = Arc::clone(&self.native);
        self.state
            .subscribe_shutdown(&self.signal, move || api::shutdown(&*native));
        if !self.state.is_initialized() {
            // The signal fired between the native init and the subscription.
            return Ok(false);
        }

        info!(
            "LCD applet '{}' initialized ({} display)",
            name,
            if config.is_color() { "color" } else { "monochrome" }
        );
        Ok(true)
    }

    /// Check whether the session is initialized.
    pub fn is_initialized(&self) -> bool {
        self.state.is_initialized()
    }

    /// Applet name passed to the last `init`.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Configuration of the attached display, once resolved.
    pub fn config(&self) -> Option<&LcdConfig> {
        self.config.as_ref()
    }

    /// Whether the attached display is the color variant.
    pub fn is_color(&self) -> bool {
        self.config.is_some_and(|config| config.is_color())
    }

    /// Exact background bitmap length of the attached display, 0 before init.
    pub fn bitmap_length(&self) -> usize {
        self.config.map_or(0, |config| config.bitmap_length())
    }

    /// A black pixel in the attached display's format.
    pub fn black(&self) -> Vec<u8> {
        self.pixel(COLOR_BLACK)
    }

    /// A white pixel in the attached display's format.
    pub fn white(&self) -> Vec<u8> {
        self.pixel(COLOR_WHITE)
    }

    fn pixel(&self, rgba: [u8; 4]) -> Vec<u8> {
        if self.is_color() {
            rgba.to_vec()
        } else {
            vec![self.grayscale.convert_rgba(rgba)]
        }
    }

    /// A full background bitmap made of one repeated pixel.
    ///
    /// `pixel` should come from [`black`](Self::black),
    /// [`white`](Self::white) or otherwise match the display format.
    pub fn filled_bitmap(&self, pixel: &[u8]) -> Vec<u8> {
        let pixels = self.config.map_or(0, |config| config.width * config.height);
        pixel.repeat(pixels)
    }

    /// Check whether a display is connected.
    ///
    /// `None` checks the attached variant. Always `false` before init.
    pub fn is_connected(&self, lcd_type: Option<LcdType>) -> bool {
        let Some(config) = self.config.filter(|_| self.is_initialized()) else {
            return false;
        };
        api::is_connected(&*self.native, lcd_type.unwrap_or(config.lcd_type))
    }

    /// Check whether a button of the attached display is pressed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before init, and
    /// [`Error::InvalidButton`] for a button of the other display variant.
    pub fn is_button_pressed(&self, button: LcdButton) -> Result<bool> {
        let config = self.active_config()?;
        if !config.has_button(button) {
            return Err(Error::invalid_button(button.code()));
        }
        api::is_button_pressed(&*self.native, button.code())
    }

    /// Set the background bitmap.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before init, and
    /// [`Error::BitmapLength`] unless the length matches
    /// [`bitmap_length`](Self::bitmap_length).
    pub fn set_background(&self, bitmap: &[u8]) -> Result<bool> {
        let config = self.active_config()?;
        let result = if config.is_color() {
            api::set_color_background(&*self.native, bitmap)?
        } else {
            api::set_mono_background(&*self.native, bitmap)?
        };
        self.after_mutation(result);
        Ok(result)
    }

    /// Set the background from loosely typed pixel values.
    ///
    /// # Errors
    ///
    /// As [`set_background`](Self::set_background), plus
    /// [`Error::BitmapValue`] for any value outside 0-255.
    pub fn set_background_values(&self, values: &[i32]) -> Result<bool> {
        self.active_config()?;
        let bitmap = validation::bitmap_from_values(values)?;
        self.set_background(&bitmap)
    }

    /// Set one text line. `color` is ignored on the monochrome display.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before init, and
    /// [`Error::OutOfRange`] for a line the display does not have.
    pub fn set_text(&self, line: usize, text: &str, color: Color) -> Result<bool> {
        let config = self.active_config()?;
        let kind = config.line_kind();
        let line = validation::check(kind, i64::try_from(line).unwrap_or(i64::MAX))?;

        let result = if config.is_color() {
            api::set_color_text(&*self.native, line, text, color)?
        } else {
            api::set_mono_text(&*self.native, line, text)?
        };
        self.after_mutation(result);
        Ok(result)
    }

    /// Set consecutive lines starting at line 0.
    ///
    /// Every line is sent even if an earlier one fails; the result is `true`
    /// only if all of them succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] before any native call if there are more
    /// lines than the display has.
    pub fn set_lines<S: AsRef<str>>(&self, lines: &[S], color: Color) -> Result<bool> {
        let config = self.active_config()?;
        if lines.len() > config.lines {
            return Err(Error::out_of_range(
                config.line_kind(),
                i64::try_from(lines.len() - 1).unwrap_or(i64::MAX),
            ));
        }

        let mut result = true;
        for (line, text) in lines.iter().enumerate() {
            result &= self.set_text(line, text.as_ref(), color)?;
        }
        Ok(result)
    }

    /// Set the title line of the color display.
    ///
    /// Returns `Ok(false)` without a native call on the monochrome display.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before init.
    pub fn set_title(&self, text: &str, color: Color) -> Result<bool> {
        let config = self.active_config()?;
        if !config.is_color() {
            return Ok(false);
        }
        let result = api::set_color_title(&*self.native, text, color)?;
        self.after_mutation(result);
        Ok(result)
    }

    /// Push pending changes to the display.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before init.
    pub fn update(&self) -> Result<()> {
        self.state.ensure_initialized()?;
        api::update(&*self.native);
        Ok(())
    }

    /// Shut the applet down.
    ///
    /// Returns `false` without a native call if the session is not
    /// initialized.
    pub fn shutdown(&mut self) -> bool {
        if !self.state.release() {
            return false;
        }
        api::shutdown(&*self.native);
        info!("LCD applet shut down");
        true
    }

    /// Refresh the display after every successful mutation.
    pub fn enable_auto_update(&mut self) {
        self.auto_update = true;
    }

    /// Stop refreshing automatically. This is the default.
    pub fn disable_auto_update(&mut self) {
        self.auto_update = false;
    }

    /// Whether auto-update is on.
    pub fn is_auto_update_enabled(&self) -> bool {
        self.auto_update
    }

    /// Select how RGBA images are reduced for the monochrome display.
    pub fn set_grayscale_conversion(&mut self, conversion: GrayscaleConversion) {
        debug!("LCD grayscale conversion set to {:?}", conversion);
        self.grayscale = conversion;
    }

    /// Active grayscale conversion.
    pub fn grayscale_conversion(&self) -> GrayscaleConversion {
        self.grayscale
    }

    /// Convert a decoded RGBA image into a bitmap for the attached display.
    ///
    /// On the color display the first `bitmap_length` bytes are copied as
    /// is. On the monochrome display the first `bitmap_length` quads are
    /// reduced to grayscale.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before init, and
    /// [`Error::BitmapLength`] if the buffer holds less than one frame.
    pub fn convert_image(&self, rgba: &[u8]) -> Result<Vec<u8>> {
        let config = self.active_config()?;
        if config.is_color() {
            let needed = config.bitmap_length();
            if rgba.len() < needed {
                return Err(Error::bitmap_length(needed, rgba.len()));
            }
            return Ok(rgba[..needed].to_vec());
        }

        let needed = config.bitmap_length() * 4;
        if rgba.len() < needed {
            return Err(Error::bitmap_length(needed, rgba.len()));
        }
        Ok(self.grayscale.convert_buffer(&rgba[..needed]))
    }

    /// Native implementation backing this session.
    pub fn native(&self) -> &Arc<N> {
        &self.native
    }

    fn active_config(&self) -> Result<LcdConfig> {
        self.state.ensure_initialized()?;
        self.config
            .ok_or_else(|| Error::not_initialized(self.state.api()))
    }

    fn after_mutation(&self, succeeded: bool) {
        if self.auto_update && succeeded {
            api::update(&*self.native);
        }
    }
}

impl<N: LcdNative + 'static> std::fmt::Debug for LcdSession<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LcdSession")
            .field("initialized", &self.is_initialized())
            .field("name", &self.name)
            .field("config", &self.config)
            .field("auto_update", &self.auto_update)
            .field("grayscale", &self.grayscale)
            .finish_non_exhaustive()
    }
}
