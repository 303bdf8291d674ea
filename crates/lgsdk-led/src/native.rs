//! Native LED entry points.
//!
//! Getters with out-parameters are folded into `Option`: `None` when the
//! native call reports failure.

use std::ffi::c_int;
use std::fmt;
use std::path::Path;

use lgsdk_core::library::{NativeLibrary, SdkConfig, SdkLibrary};
use lgsdk_core::wide::{WChar, from_wide, to_wide};
use lgsdk_core::Result;
use tracing::debug;

use crate::config::{DeviceType, SdkVersion};
use crate::key_name::KeyName;

/// Raw LED operations, one per vendor entry point.
///
/// Percentages and durations are forwarded unchanged; the
/// [`api`](crate::api) layer validates them.
pub trait LedNative: Send + Sync {
    /// `LogiLedInit`
    fn init(&self) -> bool;

    /// `LogiLedGetSdkVersion`
    fn get_sdk_version(&self) -> Option<SdkVersion>;

    /// `LogiLedGetConfigOptionNumber`
    fn get_config_option_number(&self, path: &str, default: f64) -> Option<f64>;

    /// `LogiLedGetConfigOptionBool`
    fn get_config_option_bool(&self, path: &str, default: bool) -> Option<bool>;

    /// `LogiLedGetConfigOptionColor`
    fn get_config_option_color(&self, path: &str, default: (i32, i32, i32)) -> Option<(i32, i32, i32)>;

    /// `LogiLedGetConfigOptionKeyInput`
    fn get_config_option_key_input(&self, path: &str, default: &str, buffer_size: usize) -> Option<String>;

    /// `LogiLedSetConfigOptionLabel`
    fn set_config_option_label(&self, path: &str, label: &str) -> bool;

    /// `LogiLedSetTargetDevice`
    fn set_target_device(&self, device_type: DeviceType) -> bool;

    /// `LogiLedSaveCurrentLighting`
    fn save_current_lighting(&self) -> bool;

    /// `LogiLedSetLighting`
    fn set_lighting(&self, red: i32, green: i32, blue: i32) -> bool;

    /// `LogiLedRestoreLighting`
    fn restore_lighting(&self) -> bool;

    /// `LogiLedFlashLighting`
    fn flash_lighting(&self, red: i32, green: i32, blue: i32, duration_ms: i32, interval_ms: i32) -> bool;

    /// `LogiLedPulseLighting`
    fn pulse_lighting(&self, red: i32, green: i32, blue: i32, duration_ms: i32, interval_ms: i32) -> bool;

    /// `LogiLedStopEffects`
    fn stop_effects(&self) -> bool;

    /// `LogiLedSetLightingFromBitmap`
    fn set_lighting_from_bitmap(&self, bitmap: &[u8]) -> bool;

    /// `LogiLedSetLightingForKeyWithScanCode`
    fn set_lighting_for_key_with_scan_code(&self, key_code: i32, red: i32, green: i32, blue: i32) -> bool;

    /// `LogiLedSetLightingForKeyWithHidCode`
    fn set_lighting_for_key_with_hid_code(&self, key_code: i32, red: i32, green: i32, blue: i32) -> bool;

    /// `LogiLedSetLightingForKeyWithQuartzCode`
    fn set_lighting_for_key_with_quartz_code(&self, key_code: i32, red: i32, green: i32, blue: i32) -> bool;

    /// `LogiLedSetLightingForKeyWithKeyName`
    fn set_lighting_for_key_with_key_name(&self, key: KeyName, red: i32, green: i32, blue: i32) -> bool;

    /// `LogiLedSaveLightingForKey`
    fn save_lighting_for_key(&self, key: KeyName) -> bool;

    /// `LogiLedRestoreLightingForKey`
    fn restore_lighting_for_key(&self, key: KeyName) -> bool;

    /// `LogiLedExcludeKeysFromBitmap`
    fn exclude_keys_from_bitmap(&self, keys: &[KeyName]) -> bool;

    /// `LogiLedFlashSingleKey`
    fn flash_single_key(
        &self,
        key: KeyName,
        red: i32,
        green: i32,
        blue: i32,
        duration_ms: i32,
        interval_ms: i32,
    ) -> bool;

    /// `LogiLedPulseSingleKey`
    fn pulse_single_key(
        &self,
        key: KeyName,
        start: (i32, i32, i32),
        finish: (i32, i32, i32),
        duration_ms: i32,
        infinite: bool,
    ) -> bool;

    /// `LogiLedStopEffectsOnKey`
    fn stop_effects_on_key(&self, key: KeyName) -> bool;

    /// `LogiLedShutdown`
    fn shutdown(&self);
}

type BoolFn = unsafe extern "C" fn() -> bool;
type VoidFn = unsafe extern "C" fn();
type GetSdkVersionFn = unsafe extern "C" fn(*mut c_int, *mut c_int, *mut c_int) -> bool;
type GetNumberFn = unsafe extern "C" fn(*const WChar, *mut f64) -> bool;
type GetBoolFn = unsafe extern "C" fn(*const WChar, *mut bool) -> bool;
type GetColorFn = unsafe extern "C" fn(*const WChar, *mut c_int, *mut c_int, *mut c_int) -> bool;
type GetKeyInputFn = unsafe extern "C" fn(*const WChar, *mut WChar, c_int) -> bool;
type SetLabelFn = unsafe extern "C" fn(*const WChar, *mut WChar) -> bool;
type IntFn = unsafe extern "C" fn(c_int) -> bool;
type RgbFn = unsafe extern "C" fn(c_int, c_int, c_int) -> bool;
type RgbEffectFn = unsafe extern "C" fn(c_int, c_int, c_int, c_int, c_int) -> bool;
type BitmapFn = unsafe extern "C" fn(*const u8) -> bool;
type KeyRgbFn = unsafe extern "C" fn(c_int, c_int, c_int, c_int) -> bool;
type ExcludeKeysFn = unsafe extern "C" fn(*const c_int, c_int) -> bool;
type KeyEffectFn = unsafe extern "C" fn(c_int, c_int, c_int, c_int, c_int, c_int) -> bool;
type PulseKeyFn =
    unsafe extern "C" fn(c_int, c_int, c_int, c_int, c_int, c_int, c_int, c_int, bool) -> bool;

/// Binding table over `LogitechLedEnginesWrapper`.
pub struct LedLibrary {
    init: BoolFn,
    get_sdk_version: GetSdkVersionFn,
    get_config_option_number: GetNumberFn,
    get_config_option_bool: GetBoolFn,
    get_config_option_color: GetColorFn,
    get_config_option_key_input: GetKeyInputFn,
    set_config_option_label: SetLabelFn,
    set_target_device: IntFn,
    save_current_lighting: BoolFn,
    set_lighting: RgbFn,
    restore_lighting: BoolFn,
    flash_lighting: RgbEffectFn,
    pulse_lighting: RgbEffectFn,
    stop_effects: BoolFn,
    set_lighting_from_bitmap: BitmapFn,
    set_lighting_for_key_with_scan_code: KeyRgbFn,
    set_lighting_for_key_with_hid_code: KeyRgbFn,
    set_lighting_for_key_with_quartz_code: KeyRgbFn,
    set_lighting_for_key_with_key_name: KeyRgbFn,
    save_lighting_for_key: IntFn,
    restore_lighting_for_key: IntFn,
    exclude_keys_from_bitmap: ExcludeKeysFn,
    flash_single_key: KeyEffectFn,
    pulse_single_key: PulseKeyFn,
    stop_effects_on_key: IntFn,
    shutdown: VoidFn,
    library: NativeLibrary,
}

impl LedLibrary {
    /// Load the LED wrapper described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the library cannot be loaded or lacks an export.
    pub fn load(config: &SdkConfig) -> Result<Self> {
        Self::from_library(NativeLibrary::open_sdk(config, SdkLibrary::Led)?)
    }

    /// Resolve every entry point of an already opened library.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingSymbol`](lgsdk_core::Error::MissingSymbol) for
    /// the first export that cannot be found.
    pub fn from_library(library: NativeLibrary) -> Result<Self> {
        // SAFETY: the types above mirror the declarations of LogitechLEDLib.h.
        let table = unsafe {
            Self {
                init: library.symbol("LogiLedInit\0")?,
                get_sdk_version: library.symbol("LogiLedGetSdkVersion\0")?,
                get_config_option_number: library.symbol("LogiLedGetConfigOptionNumber\0")?,
                get_config_option_bool: library.symbol("LogiLedGetConfigOptionBool\0")?,
                get_config_option_color: library.symbol("LogiLedGetConfigOptionColor\0")?,
                get_config_option_key_input: library.symbol("LogiLedGetConfigOptionKeyInput\0")?,
                set_config_option_label: library.symbol("LogiLedSetConfigOptionLabel\0")?,
                set_target_device: library.symbol("LogiLedSetTargetDevice\0")?,
                save_current_lighting: library.symbol("LogiLedSaveCurrentLighting\0")?,
                set_lighting: library.symbol("LogiLedSetLighting\0")?,
                restore_lighting: library.symbol("LogiLedRestoreLighting\0")?,
                flash_lighting: library.symbol("LogiLedFlashLighting\0")?,
                pulse_lighting: library.symbol("LogiLedPulseLighting\0")?,
                stop_effects: library.symbol("LogiLedStopEffects\0")?,
                set_lighting_from_bitmap: library.symbol("LogiLedSetLightingFromBitmap\0")?,
                set_lighting_for_key_with_scan_code: library
                    .symbol("LogiLedSetLightingForKeyWithScanCode\0")?,
                set_lighting_for_key_with_hid_code: library
                    .symbol("LogiLedSetLightingForKeyWithHidCode\0")?,
                set_lighting_for_key_with_quartz_code: library
                    .symbol("LogiLedSetLightingForKeyWithQuartzCode\0")?,
                set_lighting_for_key_with_key_name: library
                    .symbol("LogiLedSetLightingForKeyWithKeyName\0")?,
                save_lighting_for_key: library.symbol("LogiLedSaveLightingForKey\0")?,
                restore_lighting_for_key: library.symbol("LogiLedRestoreLightingForKey\0")?,
                exclude_keys_from_bitmap: library.symbol("LogiLedExcludeKeysFromBitmap\0")?,
                flash_single_key: library.symbol("LogiLedFlashSingleKey\0")?,
                pulse_single_key: library.symbol("LogiLedPulseSingleKey\0")?,
                stop_effects_on_key: library.symbol("LogiLedStopEffectsOnKey\0")?,
                shutdown: library.symbol("LogiLedShutdown\0")?,
                library,
            }
        };
        debug!("LED entry points resolved from {}", table.library.path().display());
        Ok(table)
    }

    /// Path the library was loaded from.
    pub fn path(&self) -> &Path {
        self.library.path()
    }
}

impl fmt::Debug for LedLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LedLibrary")
            .field("library", &self.library)
            .finish_non_exhaustive()
    }
}

/// Copy `text` into a nul-terminated buffer of at least `capacity` units.
fn wide_buffer(text: &str, capacity: usize) -> Vec<WChar> {
    let mut buffer = to_wide(text);
    if buffer.len() < capacity {
        buffer.resize(capacity, 0);
    }
    buffer
}

// SAFETY (all calls below): pointers come from live buffers or locals owned
// by this frame. Buffer lengths passed alongside them are their real lengths.
impl LedNative for LedLibrary {
    fn init(&self) -> bool {
        unsafe { (self.init)() }
    }

    fn get_sdk_version(&self) -> Option<SdkVersion> {
        let (mut major, mut minor, mut build) = (0, 0, 0);
        let found = unsafe { (self.get_sdk_version)(&mut major, &mut minor, &mut build) };
        found.then_some(SdkVersion {
            major,
            minor,
            build,
        })
    }

    fn get_config_option_number(&self, path: &str, default: f64) -> Option<f64> {
        let path = to_wide(path);
        let mut value = default;
        let found = unsafe { (self.get_config_option_number)(path.as_ptr(), &mut value) };
        found.then_some(value)
    }

    fn get_config_option_bool(&self, path: &str, default: bool) -> Option<bool> {
        let path = to_wide(path);
        let mut value = default;
        let found = unsafe { (self.get_config_option_bool)(path.as_ptr(), &mut value) };
        found.then_some(value)
    }

    fn get_config_option_color(&self, path: &str, default: (i32, i32, i32)) -> Option<(i32, i32, i32)> {
        let path = to_wide(path);
        let (mut red, mut green, mut blue) = default;
        let found =
            unsafe { (self.get_config_option_color)(path.as_ptr(), &mut red, &mut green, &mut blue) };
        found.then_some((red, green, blue))
    }

    fn get_config_option_key_input(&self, path: &str, default: &str, buffer_size: usize) -> Option<String> {
        let path = to_wide(path);
        let mut buffer = wide_buffer(default, buffer_size);
        let len = c_int::try_from(buffer.len()).unwrap_or(c_int::MAX);
        let found =
            unsafe { (self.get_config_option_key_input)(path.as_ptr(), buffer.as_mut_ptr(), len) };
        found.then(|| from_wide(&buffer))
    }

    fn set_config_option_label(&self, path: &str, label: &str) -> bool {
        let path = to_wide(path);
        let mut label = to_wide(label);
        unsafe { (self.set_config_option_label)(path.as_ptr(), label.as_mut_ptr()) }
    }

    fn set_target_device(&self, device_type: DeviceType) -> bool {
        unsafe { (self.set_target_device)(device_type.bits()) }
    }

    fn save_current_lighting(&self) -> bool {
        unsafe { (self.save_current_lighting)() }
    }

    fn set_lighting(&self, red: i32, green: i32, blue: i32) -> bool {
        unsafe { (self.set_lighting)(red, green, blue) }
    }

    fn restore_lighting(&self) -> bool {
        unsafe { (self.restore_lighting)() }
    }

    fn flash_lighting(&self, red: i32, green: i32, blue: i32, duration_ms: i32, interval_ms: i32) -> bool {
        unsafe { (self.flash_lighting)(red, green, blue, duration_ms, interval_ms) }
    }

    fn pulse_lighting(&self, red: i32, green: i32, blue: i32, duration_ms: i32, interval_ms: i32) -> bool {
        unsafe { (self.pulse_lighting)(red, green, blue, duration_ms, interval_ms) }
    }

    fn stop_effects(&self) -> bool {
        unsafe { (self.stop_effects)() }
    }

    fn set_lighting_from_bitmap(&self, bitmap: &[u8]) -> bool {
        unsafe { (self.set_lighting_from_bitmap)(bitmap.as_ptr()) }
    }

    fn set_lighting_for_key_with_scan_code(&self, key_code: i32, red: i32, green: i32, blue: i32) -> bool {
        unsafe { (self.set_lighting_for_key_with_scan_code)(key_code, red, green, blue) }
    }

    fn set_lighting_for_key_with_hid_code(&self, key_code: i32, red: i32, green: i32, blue: i32) -> bool {
        unsafe { (self.set_lighting_for_key_with_hid_code)(key_code, red, green, blue) }
    }

    fn set_lighting_for_key_with_quartz_code(&self, key_code: i32, red: i32, green: i32, blue: i32) -> bool {
        unsafe { (self.set_lighting_for_key_with_quartz_code)(key_code, red, green, blue) }
    }

    fn set_lighting_for_key_with_key_name(&self, key: KeyName, red: i32, green: i32, blue: i32) -> bool {
        unsafe { (self.set_lighting_for_key_with_key_name)(key.code(), red, green, blue) }
    }

    fn save_lighting_for_key(&self, key: KeyName) -> bool {
        unsafe { (self.save_lighting_for_key)(key.code()) }
    }

    fn restore_lighting_for_key(&self, key: KeyName) -> bool {
        unsafe { (self.restore_lighting_for_key)(key.code()) }
    }

    fn exclude_keys_from_bitmap(&self, keys: &[KeyName]) -> bool {
        let codes: Vec<c_int> = keys.iter().map(|key| key.code()).collect();
        let len = c_int::try_from(codes.len()).unwrap_or(c_int::MAX);
        unsafe { (self.exclude_keys_from_bitmap)(codes.as_ptr(), len) }
    }

    fn flash_single_key(
        &self,
        key: KeyName,
        red: i32,
        green: i32,
        blue: i32,
        duration_ms: i32,
        interval_ms: i32,
    ) -> bool {
        unsafe { (self.flash_single_key)(key.code(), red, green, blue, duration_ms, interval_ms) }
    }

    fn pulse_single_key(
        &self,
        key: KeyName,
        start: (i32, i32, i32),
        finish: (i32, i32, i32),
        duration_ms: i32,
        infinite: bool,
    ) -> bool {
        unsafe {
            (self.pulse_single_key)(
                key.code(),
                start.0,
                start.1,
                start.2,
                finish.0,
                finish.1,
                finish.2,
                duration_ms,
                infinite,
            )
        }
    }

    fn stop_effects_on_key(&self, key: KeyName) -> bool {
        unsafe { (self.stop_effects_on_key)(key.code()) }
    }

    fn shutdown(&self) {
        unsafe { (self.shutdown)() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_buffer_pads_to_capacity() {
        let buffer = wide_buffer("F1", 8);
        assert_eq!(buffer.len(), 8);
        assert_eq!(from_wide(&buffer), "F1");
    }

    #[test]
    fn test_wide_buffer_keeps_longer_default() {
        let buffer = wide_buffer("CTRL+F1", 2);
        assert_eq!(buffer.len(), 8);
        assert_eq!(from_wide(&buffer), "CTRL+F1");
    }
}
