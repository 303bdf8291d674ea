//! Recording LCD double for tests and development without hardware.
//!
//! [`MockLcd`] implements [`LcdNative`] by recording every call and
//! answering from programmable state.
//!
//! # Examples
//!
//! ```
//! use lgsdk_lcd::mock::{LcdCall, MockLcd};
//! use lgsdk_lcd::{api, LcdType};
//!
//! let lcd = MockLcd::mono();
//! assert!(api::init(&lcd, "Test", LcdType::ANY));
//! assert!(api::is_connected(&lcd, LcdType::MONO));
//! assert!(!api::is_connected(&lcd, LcdType::COLOR));
//!
//! assert_eq!(lcd.calls()[0], LcdCall::Init {
//!     name: "Test".to_string(),
//!     lcd_type: LcdType::ANY,
//! });
//! ```

use std::collections::HashSet;

use parking_lot::Mutex;

use crate::config::LcdType;
use crate::native::LcdNative;

/// A call received by [`MockLcd`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LcdCall {
    Init { name: String, lcd_type: LcdType },
    IsConnected(LcdType),
    IsButtonPressed(i32),
    Update,
    Shutdown,
    MonoSetBackground(Vec<u8>),
    MonoSetText { line: i32, text: String },
    ColorSetBackground(Vec<u8>),
    ColorSetTitle { text: String, color: (i32, i32, i32) },
    ColorSetText { line: i32, text: String, color: (i32, i32, i32) },
}

#[derive(Debug)]
struct State {
    calls: Vec<LcdCall>,
    connected: LcdType,
    init_result: bool,
    call_result: bool,
    initialized: bool,
    pressed: HashSet<i32>,
}

/// Mock LCD device.
#[derive(Debug)]
pub struct MockLcd {
    state: Mutex<State>,
}

impl MockLcd {
    /// Create a mock with the given displays attached.
    pub fn new(connected: LcdType) -> Self {
        Self {
            state: Mutex::new(State {
                calls: Vec::new(),
                connected,
                init_result: true,
                call_result: true,
                initialized: false,
                pressed: HashSet::new(),
            }),
        }
    }

    /// Mock with a monochrome display attached.
    pub fn mono() -> Self {
        Self::new(LcdType::MONO)
    }

    /// Mock with a color display attached.
    pub fn color() -> Self {
        Self::new(LcdType::COLOR)
    }

    /// Make `LogiLcdInit` report failure.
    pub fn with_init_failure(self) -> Self {
        self.state.lock().init_result = false;
        self
    }

    /// Result returned by every setter.
    pub fn set_call_result(&self, result: bool) {
        self.state.lock().call_result = result;
    }

    /// Change the attached displays.
    pub fn set_connected(&self, connected: LcdType) {
        self.state.lock().connected = connected;
    }

    /// Hold a button down.
    pub fn press(&self, button: i32) {
        self.state.lock().pressed.insert(button);
    }

    /// Let go of a button.
    pub fn release(&self, button: i32) {
        self.state.lock().pressed.remove(&button);
    }

    /// Whether a successful init has not been followed by shutdown.
    pub fn is_initialized(&self) -> bool {
        self.state.lock().initialized
    }

    /// Calls received so far, in order.
    pub fn calls(&self) -> Vec<LcdCall> {
        self.state.lock().calls.clone()
    }

    /// Number of calls received so far.
    pub fn call_count(&self) -> usize {
        self.state.lock().calls.len()
    }

    /// Number of calls matching `predicate`.
    pub fn count_calls(&self, predicate: impl Fn(&LcdCall) -> bool) -> usize {
        self.state.lock().calls.iter().filter(|call| predicate(call)).count()
    }

    /// Forget recorded calls.
    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    fn record(&self, call: LcdCall) -> bool {
        let mut state = self.state.lock();
        state.calls.push(call);
        state.call_result
    }
}

impl Default for MockLcd {
    fn default() -> Self {
        Self::mono()
    }
}

impl LcdNative for MockLcd {
    fn init(&self, name: &str, lcd_type: LcdType) -> bool {
        let mut state = self.state.lock();
        state.calls.push(LcdCall::Init {
            name: name.to_string(),
            lcd_type,
        });
        state.initialized = state.init_result;
        state.init_result
    }

    fn is_connected(&self, lcd_type: LcdType) -> bool {
        let mut state = self.state.lock();
        state.calls.push(LcdCall::IsConnected(lcd_type));
        state.initialized && state.connected.intersects(lcd_type)
    }

    fn is_button_pressed(&self, button: i32) -> bool {
        let mut state = self.state.lock();
        state.calls.push(LcdCall::IsButtonPressed(button));
        state.pressed.contains(&button)
    }

    fn update(&self) {
        self.record(LcdCall::Update);
    }

    fn shutdown(&self) {
        let mut state = self.state.lock();
        state.calls.push(LcdCall::Shutdown);
        state.initialized = false;
    }

    fn mono_set_background(&self, bitmap: &[u8]) -> bool {
        self.record(LcdCall::MonoSetBackground(bitmap.to_vec()))
    }

    fn mono_set_text(&self, line: i32, text: &str) -> bool {
        self.record(LcdCall::MonoSetText {
            line,
            text: text.to_string(),
        })
    }

    fn color_set_background(&self, bitmap: &[u8]) -> bool {
        self.record(LcdCall::ColorSetBackground(bitmap.to_vec()))
    }

    fn color_set_title(&self, text: &str, red: i32, green: i32, blue: i32) -> bool {
        self.record(LcdCall::ColorSetTitle {
            text: text.to_string(),
            color: (red, green, blue),
        })
    }

    fn color_set_text(&self, line: i32, text: &str, red: i32, green: i32, blue: i32) -> bool {
        self.record(LcdCall::ColorSetText {
            line,
            text: text.to_string(),
            color: (red, green, blue),
        })
    }
}
