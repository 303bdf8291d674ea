//! Stateful LED session.
//!
//! [`LedSession`] guards every lighting call behind a successful `init` and
//! takes structured [`LightingColor`] values instead of loose percentages.
//! User-configurable options are reached through [`LedSession::config`].
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use lgsdk_core::{LightingColor, ShutdownSignal};
//! use lgsdk_led::{KeyName, LedSession};
//! use lgsdk_led::mock::MockLed;
//!
//! let mut led = LedSession::new(Arc::new(MockLed::new()), ShutdownSignal::new());
//! assert!(led.init().unwrap());
//!
//! let red = LightingColor::new(100, 0, 0).unwrap();
//! led.save_current_lighting().unwrap();
//! led.set_lighting_for_key_with_key_name(KeyName::Esc, red).unwrap();
//! led.pulse_lighting(red, Duration::from_secs(1), Duration::from_millis(200)).unwrap();
//!
//! let speed = led.config().get_number(["effects", "speed"], 1.0).unwrap();
//! assert_eq!(speed, Some(1.0));
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use lgsdk_core::validation;
use lgsdk_core::{Color, LightingColor, Result, SessionState, ShutdownSignal};
use tracing::info;

use crate::api;
use crate::config::{ConfigPath, DeviceType, KEY_INPUT_BUFFER_SIZE, SdkVersion};
use crate::key_name::KeyName;
use crate::native::LedNative;

/// LED session bound to one native implementation.
pub struct LedSession<N: LedNative + 'static> {
    native: Arc<N>,
    signal: ShutdownSignal,
    state: SessionState,
}

impl<N: LedNative + 'static> LedSession<N> {
    /// Create an uninitialized session.
    pub fn new(native: Arc<N>, signal: ShutdownSignal) -> Self {
        Self {
            native,
            signal,
            state: SessionState::new("LED"),
        }
    }

    /// Initialize the SDK.
    ///
    /// Returns `Ok(false)` if the native init fails or the shutdown signal
    /// has already fired.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyInitialized`](lgsdk_core::Error::AlreadyInitialized)
    /// if the session is initialized.
    pub fn init(&mut self) -> Result<bool> {
        self.state.ensure_uninitialized()?;
        if self.signal.is_triggered() {
            info!("LED init refused, shutdown already signalled");
            return Ok(false);
        }

        if !api::init(&*self.native) {
            info!("LED init failed");
            return Ok(false);
        }
        self.state.mark_initialized();

        let native = Arc::clone(&self.native);
        self.state
            .subscribe_shutdown(&self.signal, move || api::shutdown(&*native));
        if !self.state.is_initialized() {
            // The signal fired between the native init and the subscription.
            return Ok(false);
        }

        info!("LED SDK initialized");
        Ok(true)
    }

    /// Check whether the session is initialized.
    pub fn is_initialized(&self) -> bool {
        self.state.is_initialized()
    }

    /// Shut the SDK down.
    ///
    /// Returns `false` without a native call if the session is not
    /// initialized.
    pub fn shutdown(&mut self) -> bool {
        if !self.state.release() {
            return false;
        }
        api::shutdown(&*self.native);
        info!("LED SDK shut down");
        true
    }

    /// Access to user-configurable options.
    pub fn config(&self) -> LedConfigOptions<'_, N> {
        LedConfigOptions { session: self }
    }

    /// See [`api::get_sdk_version`].
    ///
    /// # Errors
    ///
    /// Fails before init.
    pub fn get_sdk_version(&self) -> Result<Option<SdkVersion>> {
        self.state.ensure_initialized()?;
        Ok(api::get_sdk_version(&*self.native))
    }

    /// See [`api::set_target_device`].
    ///
    /// # Errors
    ///
    /// Fails before init.
    pub fn set_target_device(&self, device_type: DeviceType) -> Result<bool> {
        self.state.ensure_initialized()?;
        Ok(api::set_target_device(&*self.native, device_type))
    }

    /// See [`api::save_current_lighting`].
    ///
    /// # Errors
    ///
    /// Fails before init.
    pub fn save_current_lighting(&self) -> Result<bool> {
        self.state.ensure_initialized()?;
        Ok(api::save_current_lighting(&*self.native))
    }

    /// See [`api::set_lighting`].
    ///
    /// # Errors
    ///
    /// Fails before init.
    pub fn set_lighting(&self, color: LightingColor) -> Result<bool> {
        self.state.ensure_initialized()?;
        let (red, green, blue) = color.components();
        api::set_lighting(&*self.native, red, green, blue)
    }

    /// See [`api::restore_lighting`].
    ///
    /// # Errors
    ///
    /// Fails before init.
    pub fn restore_lighting(&self) -> Result<bool> {
        self.state.ensure_initialized()?;
        Ok(api::restore_lighting(&*self.native))
    }

    /// See [`api::flash_lighting`].
    ///
    /// # Errors
    ///
    /// Fails before init or for a duration beyond `i32::MAX` ms.
    pub fn flash_lighting(&self, color: LightingColor, duration: Duration, interval: Duration) -> Result<bool> {
        self.state.ensure_initialized()?;
        let (red, green, blue) = color.components();
        api::flash_lighting(&*self.native, red, green, blue, duration, interval)
    }

    /// See [`api::pulse_lighting`].
    ///
    /// # Errors
    ///
    /// Fails before init or for a duration beyond `i32::MAX` ms.
    pub fn pulse_lighting(&self, color: LightingColor, duration: Duration, interval: Duration) -> Result<bool> {
        self.state.ensure_initialized()?;
        let (red, green, blue) = color.components();
        api::pulse_lighting(&*self.native, red, green, blue, duration, interval)
    }

    /// See [`api::stop_effects`].
    ///
    /// # Errors
    ///
    /// Fails before init.
    pub fn stop_effects(&self) -> Result<bool> {
        self.state.ensure_initialized()?;
        Ok(api::stop_effects(&*self.native))
    }

    /// See [`api::set_lighting_from_bitmap`].
    ///
    /// # Errors
    ///
    /// Fails before init or if the bitmap is not 504 bytes long.
    pub fn set_lighting_from_bitmap(&self, bitmap: &[u8]) -> Result<bool> {
        self.state.ensure_initialized()?;
        api::set_lighting_from_bitmap(&*self.native, bitmap)
    }

    /// Like [`set_lighting_from_bitmap`](Self::set_lighting_from_bitmap),
    /// for loosely typed values.
    ///
    /// # Errors
    ///
    /// Fails before init, for a value outside 0-255 or a wrong length.
    pub fn set_lighting_from_bitmap_values(&self, values: &[i32]) -> Result<bool> {
        self.state.ensure_initialized()?;
        let bitmap = validation::bitmap_from_values(values)?;
        api::set_lighting_from_bitmap(&*self.native, &bitmap)
    }

    /// See [`api::set_lighting_for_key_with_scan_code`].
    ///
    /// # Errors
    ///
    /// Fails before init.
    pub fn set_lighting_for_key_with_scan_code(&self, key_code: i32, color: LightingColor) -> Result<bool> {
        self.state.ensure_initialized()?;
        let (red, green, blue) = color.components();
        api::set_lighting_for_key_with_scan_code(&*self.native, key_code, red, green, blue)
    }

    /// See [`api::set_lighting_for_key_with_hid_code`].
    ///
    /// # Errors
    ///
    /// Fails before init.
    pub fn set_lighting_for_key_with_hid_code(&self, key_code: i32, color: LightingColor) -> Result<bool> {
        self.state.ensure_initialized()?;
        let (red, green, blue) = color.components();
        api::set_lighting_for_key_with_hid_code(&*self.native, key_code, red, green, blue)
    }

    /// See [`api::set_lighting_for_key_with_quartz_code`].
    ///
    /// # Errors
    ///
    /// Fails before init.
    pub fn set_lighting_for_key_with_quartz_code(&self, key_code: i32, color: LightingColor) -> Result<bool> {
        self.state.ensure_initialized()?;
        let (red, green, blue) = color.components();
        api::set_lighting_for_key_with_quartz_code(&*self.native, key_code, red, green, blue)
    }

    /// See [`api::set_lighting_for_key_with_key_name`].
    ///
    /// # Errors
    ///
    /// Fails before init.
    pub fn set_lighting_for_key_with_key_name(&self, key: KeyName, color: LightingColor) -> Result<bool> {
        self.state.ensure_initialized()?;
        let (red, green, blue) = color.components();
        api::set_lighting_for_key_with_key_name(&*self.native, key, red, green, blue)
    }

    /// See [`api::save_lighting_for_key`].
    ///
    /// # Errors
    ///
    /// Fails before init.
    pub fn save_lighting_for_key(&self, key: KeyName) -> Result<bool> {
        self.state.ensure_initialized()?;
        Ok(api::save_lighting_for_key(&*self.native, key))
    }

    /// See [`api::restore_lighting_for_key`].
    ///
    /// # Errors
    ///
    /// Fails before init.
    pub fn restore_lighting_for_key(&self, key: KeyName) -> Result<bool> {
        self.state.ensure_initialized()?;
        Ok(api::restore_lighting_for_key(&*self.native, key))
    }

    /// See [`api::exclude_keys_from_bitmap`].
    ///
    /// # Errors
    ///
    /// Fails before init.
    pub fn exclude_keys_from_bitmap(&self, keys: &[KeyName]) -> Result<bool> {
        self.state.ensure_initialized()?;
        Ok(api::exclude_keys_from_bitmap(&*self.native, keys))
    }

    /// See [`api::flash_single_key`].
    ///
    /// # Errors
    ///
    /// Fails before init or for a duration beyond `i32::MAX` ms.
    pub fn flash_single_key(
        &self,
        key: KeyName,
        color: LightingColor,
        duration: Duration,
        interval: Duration,
    ) -> Result<bool> {
        self.state.ensure_initialized()?;
        let (red, green, blue) = color.components();
        api::flash_single_key(&*self.native, key, red, green, blue, duration, interval)
    }

    /// See [`api::pulse_single_key`].
    ///
    /// # Errors
    ///
    /// Fails before init or for a duration beyond `i32::MAX` ms.
    pub fn pulse_single_key(
        &self,
        key: KeyName,
        start: LightingColor,
        finish: LightingColor,
        duration: Duration,
        infinite: bool,
    ) -> Result<bool> {
        self.state.ensure_initialized()?;
        api::pulse_single_key(
            &*self.native,
            key,
            start.components(),
            finish.components(),
            duration,
            infinite,
        )
    }

    /// See [`api::stop_effects_on_key`].
    ///
    /// # Errors
    ///
    /// Fails before init.
    pub fn stop_effects_on_key(&self, key: KeyName) -> Result<bool> {
        self.state.ensure_initialized()?;
        Ok(api::stop_effects_on_key(&*self.native, key))
    }

    /// Native implementation backing this session.
    pub fn native(&self) -> &Arc<N> {
        &self.native
    }
}

impl<N: LedNative + 'static> fmt::Debug for LedSession<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LedSession")
            .field("initialized", &self.is_initialized())
            .finish_non_exhaustive()
    }
}

/// User-configurable options exposed in Logitech Gaming Software.
///
/// Every getter registers its default with the SDK and returns the value the
/// user chose, or `None` if the native call fails. Paths may be given whole
/// (`"effects/speed"`) or as segments (`["effects", "speed"]`).
pub struct LedConfigOptions<'a, N: LedNative + 'static> {
    session: &'a LedSession<N>,
}

impl<N: LedNative + 'static> LedConfigOptions<'_, N> {
    /// Read a numeric option.
    ///
    /// # Errors
    ///
    /// Fails before init.
    pub fn get_number(&self, path: impl Into<ConfigPath>, default: f64) -> Result<Option<f64>> {
        let native = self.native()?;
        Ok(api::get_config_option_number(native, path.into().as_str(), default))
    }

    /// Read a boolean option.
    ///
    /// # Errors
    ///
    /// Fails before init.
    pub fn get_bool(&self, path: impl Into<ConfigPath>, default: bool) -> Result<Option<bool>> {
        let native = self.native()?;
        Ok(api::get_config_option_bool(native, path.into().as_str(), default))
    }

    /// Read a color option.
    ///
    /// # Errors
    ///
    /// Fails before init.
    pub fn get_color(&self, path: impl Into<ConfigPath>, default: Color) -> Result<Option<Color>> {
        let native = self.native()?;
        Ok(api::get_config_option_color(native, path.into().as_str(), default))
    }

    /// Read a key-input option into a buffer of
    /// [`KEY_INPUT_BUFFER_SIZE`](crate::config::KEY_INPUT_BUFFER_SIZE) units.
    ///
    /// # Errors
    ///
    /// Fails before init.
    pub fn get_key_input(&self, path: impl Into<ConfigPath>, default: &str) -> Result<Option<String>> {
        let native = self.native()?;
        Ok(api::get_config_option_key_input(
            native,
            path.into().as_str(),
            default,
            KEY_INPUT_BUFFER_SIZE,
        ))
    }

    /// Set the label shown next to an option.
    ///
    /// # Errors
    ///
    /// Fails before init.
    pub fn set_label(&self, path: impl Into<ConfigPath>, label: &str) -> Result<bool> {
        let native = self.native()?;
        Ok(api::set_config_option_label(native, path.into().as_str(), label))
    }

    fn native(&self) -> Result<&N> {
        self.session.state.ensure_initialized()?;
        Ok(&*self.session.native)
    }
}

impl<N: LedNative + 'static> fmt::Debug for LedConfigOptions<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LedConfigOptions")
            .field("session", self.session)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{LedCall, MockLed};

    fn initialized() -> (LedSession<MockLed>, Arc<MockLed>) {
        let mock = Arc::new(MockLed::new());
        let mut session = LedSession::new(Arc::clone(&mock), ShutdownSignal::new());
        assert!(session.init().unwrap());
        mock.clear_calls();
        (session, mock)
    }

    #[test]
    fn test_color_components_forwarded() {
        let (session, mock) = initialized();
        let color = LightingColor::new(10, 20, 30).unwrap();
        session.set_lighting_for_key_with_hid_code(0x04, color).unwrap();
        assert_eq!(
            mock.calls(),
            vec![LedCall::SetLightingForKeyWithHidCode {
                key_code: 0x04,
                color: (10, 20, 30),
            }]
        );
    }

    #[test]
    fn test_bitmap_values() {
        let (session, mock) = initialized();
        let mut values = vec![0; 504];
        values[3] = 255;
        assert!(session.set_lighting_from_bitmap_values(&values).unwrap());

        values[3] = 256;
        assert!(session.set_lighting_from_bitmap_values(&values).is_err());
        assert_eq!(mock.calls().len(), 1);
    }

    #[test]
    fn test_config_requires_init() {
        let mock = Arc::new(MockLed::new());
        let session = LedSession::new(Arc::clone(&mock), ShutdownSignal::new());
        assert!(session.config().get_bool("a", true).unwrap_err().is_invalid_state());
        assert!(mock.calls().is_empty());
    }
}
