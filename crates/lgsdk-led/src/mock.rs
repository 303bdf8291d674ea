//! Recording LED double.
//!
//! Config options behave like the SDK: reading an option that was never set
//! registers and returns its default.
//!
//! # Examples
//!
//! ```
//! use lgsdk_led::mock::{LedCall, MockLed};
//! use lgsdk_led::{api, KeyName};
//!
//! let led = MockLed::new();
//! led.set_config_number("effects/speed", 2.5);
//!
//! assert_eq!(api::get_config_option_number(&led, "effects/speed", 1.0), Some(2.5));
//! assert_eq!(api::get_config_option_number(&led, "effects/size", 1.0), Some(1.0));
//!
//! api::save_lighting_for_key(&led, KeyName::Space);
//! assert_eq!(led.calls().last(), Some(&LedCall::SaveLightingForKey(KeyName::Space)));
//! ```

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::config::{DeviceType, SdkVersion};
use crate::key_name::KeyName;
use crate::native::LedNative;

type Rgb = (i32, i32, i32);

/// A call received by [`MockLed`].
#[derive(Debug, Clone, PartialEq)]
pub enum LedCall {
    Init,
    GetSdkVersion,
    GetConfigOptionNumber { path: String, default: f64 },
    GetConfigOptionBool { path: String, default: bool },
    GetConfigOptionColor { path: String, default: Rgb },
    GetConfigOptionKeyInput { path: String, default: String, buffer_size: usize },
    SetConfigOptionLabel { path: String, label: String },
    SetTargetDevice(DeviceType),
    SaveCurrentLighting,
    SetLighting(Rgb),
    RestoreLighting,
    FlashLighting { color: Rgb, duration_ms: i32, interval_ms: i32 },
    PulseLighting { color: Rgb, duration_ms: i32, interval_ms: i32 },
    StopEffects,
    SetLightingFromBitmap(Vec<u8>),
    SetLightingForKeyWithScanCode { key_code: i32, color: Rgb },
    SetLightingForKeyWithHidCode { key_code: i32, color: Rgb },
    SetLightingForKeyWithQuartzCode { key_code: i32, color: Rgb },
    SetLightingForKeyWithKeyName { key: KeyName, color: Rgb },
    SaveLightingForKey(KeyName),
    RestoreLightingForKey(KeyName),
    ExcludeKeysFromBitmap(Vec<KeyName>),
    FlashSingleKey { key: KeyName, color: Rgb, duration_ms: i32, interval_ms: i32 },
    PulseSingleKey { key: KeyName, start: Rgb, finish: Rgb, duration_ms: i32, infinite: bool },
    StopEffectsOnKey(KeyName),
    Shutdown,
}

#[derive(Debug)]
struct State {
    calls: Vec<LedCall>,
    init_result: bool,
    call_result: bool,
    initialized: bool,
    sdk_version: Option<SdkVersion>,
    numbers: HashMap<String, f64>,
    bools: HashMap<String, bool>,
    colors: HashMap<String, Rgb>,
    key_inputs: HashMap<String, String>,
    labels: HashMap<String, String>,
}

/// Mock LED SDK.
#[derive(Debug)]
pub struct MockLed {
    state: Mutex<State>,
}

impl Default for MockLed {
    fn default() -> Self {
        Self::new()
    }
}

impl MockLed {
    /// Create a mock whose calls all succeed.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                calls: Vec::new(),
                init_result: true,
                call_result: true,
                initialized: false,
                sdk_version: Some(SdkVersion {
                    major: 8,
                    minor: 87,
                    build: 117,
                }),
                numbers: HashMap::new(),
                bools: HashMap::new(),
                colors: HashMap::new(),
                key_inputs: HashMap::new(),
                labels: HashMap::new(),
            }),
        }
    }

    /// Make init report failure.
    pub fn with_init_failure(self) -> Self {
        self.state.lock().init_result = false;
        self
    }

    /// Result reported by every call other than init.
    pub fn set_call_result(&self, result: bool) {
        self.state.lock().call_result = result;
    }

    /// Version reported by `get_sdk_version`.
    pub fn set_sdk_version(&self, version: Option<SdkVersion>) {
        self.state.lock().sdk_version = version;
    }

    /// Preset a numeric option.
    pub fn set_config_number(&self, path: &str, value: f64) {
        self.state.lock().numbers.insert(path.to_string(), value);
    }

    /// Preset a boolean option.
    pub fn set_config_bool(&self, path: &str, value: bool) {
        self.state.lock().bools.insert(path.to_string(), value);
    }

    /// Preset a color option.
    pub fn set_config_color(&self, path: &str, value: Rgb) {
        self.state.lock().colors.insert(path.to_string(), value);
    }

    /// Preset a key-input option.
    pub fn set_config_key_input(&self, path: &str, value: &str) {
        self.state
            .lock()
            .key_inputs
            .insert(path.to_string(), value.to_string());
    }

    /// Label set for `path`, if any.
    pub fn label(&self, path: &str) -> Option<String> {
        self.state.lock().labels.get(path).cloned()
    }

    /// Whether init succeeded and shutdown has not been called since.
    pub fn is_initialized(&self) -> bool {
        self.state.lock().initialized
    }

    /// Calls received so far, in order.
    pub fn calls(&self) -> Vec<LedCall> {
        self.state.lock().calls.clone()
    }

    /// Number of calls matching `predicate`.
    pub fn count_calls(&self, predicate: impl Fn(&LedCall) -> bool) -> usize {
        self.state.lock().calls.iter().filter(|call| predicate(call)).count()
    }

    /// Forget recorded calls.
    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    fn record(&self, call: LedCall) -> bool {
        let mut state = self.state.lock();
        state.calls.push(call);
        state.call_result
    }
}

impl LedNative for MockLed {
    fn init(&self) -> bool {
        let mut state = self.state.lock();
        state.calls.push(LedCall::Init);
        state.initialized = state.init_result;
        state.init_result
    }

    fn get_sdk_version(&self) -> Option<SdkVersion> {
        let mut state = self.state.lock();
        state.calls.push(LedCall::GetSdkVersion);
        state.sdk_version
    }

    fn get_config_option_number(&self, path: &str, default: f64) -> Option<f64> {
        let mut state = self.state.lock();
        state.calls.push(LedCall::GetConfigOptionNumber {
            path: path.to_string(),
            default,
        });
        if !state.call_result {
            return None;
        }
        Some(*state.numbers.entry(path.to_string()).or_insert(default))
    }

    fn get_config_option_bool(&self, path: &str, default: bool) -> Option<bool> {
        let mut state = self.state.lock();
        state.calls.push(LedCall::GetConfigOptionBool {
            path: path.to_string(),
            default,
        });
        if !state.call_result {
            return None;
        }
        Some(*state.bools.entry(path.to_string()).or_insert(default))
    }

    fn get_config_option_color(&self, path: &str, default: Rgb) -> Option<Rgb> {
        let mut state = self.state.lock();
        state.calls.push(LedCall::GetConfigOptionColor {
            path: path.to_string(),
            default,
        });
        if !state.call_result {
            return None;
        }
        Some(*state.colors.entry(path.to_string()).or_insert(default))
    }

    fn get_config_option_key_input(&self, path: &str, default: &str, buffer_size: usize) -> Option<String> {
        let mut state = self.state.lock();
        state.calls.push(LedCall::GetConfigOptionKeyInput {
            path: path.to_string(),
            default: default.to_string(),
            buffer_size,
        });
        if !state.call_result {
            return None;
        }
        Some(
            state
                .key_inputs
                .entry(path.to_string())
                .or_insert_with(|| default.to_string())
                .clone(),
        )
    }

    fn set_config_option_label(&self, path: &str, label: &str) -> bool {
        let mut state = self.state.lock();
        state.calls.push(LedCall::SetConfigOptionLabel {
            path: path.to_string(),
            label: label.to_string(),
        });
        if state.call_result {
            state.labels.insert(path.to_string(), label.to_string());
        }
        state.call_result
    }

    fn set_target_device(&self, device_type: DeviceType) -> bool {
        self.record(LedCall::SetTargetDevice(device_type))
    }

    fn save_current_lighting(&self) -> bool {
        self.record(LedCall::SaveCurrentLighting)
    }

    fn set_lighting(&self, red: i32, green: i32, blue: i32) -> bool {
        self.record(LedCall::SetLighting((red, green, blue)))
    }

    fn restore_lighting(&self) -> bool {
        self.record(LedCall::RestoreLighting)
    }

    fn flash_lighting(&self, red: i32, green: i32, blue: i32, duration_ms: i32, interval_ms: i32) -> bool {
        self.record(LedCall::FlashLighting {
            color: (red, green, blue),
            duration_ms,
            interval_ms,
        })
    }

    fn pulse_lighting(&self, red: i32, green: i32, blue: i32, duration_ms: i32, interval_ms: i32) -> bool {
        self.record(LedCall::PulseLighting {
            color: (red, green, blue),
            duration_ms,
            interval_ms,
        })
    }

    fn stop_effects(&self) -> bool {
        self.record(LedCall::StopEffects)
    }

    fn set_lighting_from_bitmap(&self, bitmap: &[u8]) -> bool {
        self.record(LedCall::SetLightingFromBitmap(bitmap.to_vec()))
    }

    fn set_lighting_for_key_with_scan_code(&self, key_code: i32, red: i32, green: i32, blue: i32) -> bool {
        self.record(LedCall::SetLightingForKeyWithScanCode {
            key_code,
            color: (red, green, blue),
        })
    }

    fn set_lighting_for_key_with_hid_code(&self, key_code: i32, red: i32, green: i32, blue: i32) -> bool {
        self.record(LedCall::SetLightingForKeyWithHidCode {
            key_code,
            color: (red, green, blue),
        })
    }

    fn set_lighting_for_key_with_quartz_code(&self, key_code: i32, red: i32, green: i32, blue: i32) -> bool {
        self.record(LedCall::SetLightingForKeyWithQuartzCode {
            key_code,
            color: (red, green, blue),
        })
    }

    fn set_lighting_for_key_with_key_name(&self, key: KeyName, red: i32, green: i32, blue: i32) -> bool {
        self.record(LedCall::SetLightingForKeyWithKeyName {
            key,
            color: (red, green, blue),
        })
    }

    fn save_lighting_for_key(&self, key: KeyName) -> bool {
        self.record(LedCall::SaveLightingForKey(key))
    }

    fn restore_lighting_for_key(&self, key: KeyName) -> bool {
        self.record(LedCall::RestoreLightingForKey(key))
    }

    fn exclude_keys_from_bitmap(&self, keys: &[KeyName]) -> bool {
        self.record(LedCall::ExcludeKeysFromBitmap(keys.to_vec()))
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
        self.record(LedCall::FlashSingleKey {
            key,
            color: (red, green, blue),
            duration_ms,
            interval_ms,
        })
    }

    fn pulse_single_key(
        &self,
        key: KeyName,
        start: Rgb,
        finish: Rgb,
        duration_ms: i32,
        infinite: bool,
    ) -> bool {
        self.record(LedCall::PulseSingleKey {
            key,
            start,
            finish,
            duration_ms,
            infinite,
        })
    }

    fn stop_effects_on_key(&self, key: KeyName) -> bool {
        self.record(LedCall::StopEffectsOnKey(key))
    }

    fn shutdown(&self) {
        let mut state = self.state.lock();
        state.calls.push(LedCall::Shutdown);
        state.initialized = false;
    }
}
