//! Integration tests for the LCD session state machine.

mod common;

use lgsdk_core::{Color, Error, ShutdownReason};
use lgsdk_lcd::mock::{LcdCall, MockLcd};
use lgsdk_lcd::{LcdButton, LcdType};
use rstest::rstest;

#[test]
fn test_init_twice_fails() {
    let (mut lcd, _signal) = common::initialized(MockLcd::mono());

    let error = lcd.init(common::APPLET, LcdType::ANY).unwrap_err();
    assert!(matches!(error, Error::AlreadyInitialized { api: "LCD" }));
    assert!(lcd.native().calls().is_empty());
}

#[test]
fn test_shutdown_when_uninitialized_is_noop() {
    let (mut lcd, _signal) = common::session(MockLcd::mono());
    assert!(!lcd.shutdown());
    assert!(lcd.native().calls().is_empty());
}

#[test]
fn test_reinit_after_shutdown() {
    let (mut lcd, _signal) = common::initialized(MockLcd::color());
    assert!(lcd.shutdown());
    assert!(!lcd.shutdown());
    assert!(!lcd.is_initialized());

    assert!(lcd.init("Again", LcdType::COLOR).unwrap());
    assert_eq!(lcd.name(), Some("Again"));
    assert!(lcd.is_color());
}

#[rstest]
#[case::background("background")]
#[case::text("text")]
#[case::lines("lines")]
#[case::title("title")]
#[case::update("update")]
#[case::button("button")]
#[case::convert("convert")]
fn test_operations_require_init(#[case] operation: &str) {
    let (lcd, _signal) = common::session(MockLcd::color());

    let error = match operation {
        "background" => lcd.set_background(&[]).unwrap_err(),
        "text" => lcd.set_text(0, "x", Color::WHITE).unwrap_err(),
        "lines" => lcd.set_lines(&["x"], Color::WHITE).unwrap_err(),
        "title" => lcd.set_title("x", Color::WHITE).unwrap_err(),
        "update" => lcd.update().unwrap_err(),
        "button" => lcd.is_button_pressed(LcdButton::Ok).unwrap_err(),
        "convert" => lcd.convert_image(&[]).unwrap_err(),
        _ => unreachable!(),
    };
    assert!(error.is_invalid_state());
    assert!(lcd.native().calls().is_empty());
}

#[test]
fn test_is_connected_before_init_is_false() {
    let (lcd, _signal) = common::session(MockLcd::color());
    assert!(!lcd.is_connected(Some(LcdType::COLOR)));
    assert!(lcd.native().calls().is_empty());
}

#[test]
fn test_shutdown_signal_releases_exactly_once() {
    let (mut lcd, signal) = common::initialized(MockLcd::mono());

    assert!(signal.trigger(ShutdownReason::Interrupt));
    assert!(!lcd.is_initialized());
    assert!(!lcd.shutdown());
    signal.trigger(ShutdownReason::Exit);

    let shutdowns = lcd.native().count_calls(|call| *call == LcdCall::Shutdown);
    assert_eq!(shutdowns, 1);
}

#[test]
fn test_shutdown_signal_after_explicit_shutdown() {
    let (mut lcd, signal) = common::initialized(MockLcd::mono());
    assert!(lcd.shutdown());
    signal.trigger(ShutdownReason::Exit);

    assert_eq!(lcd.native().calls(), vec![LcdCall::Shutdown]);
}

#[test]
fn test_reinit_subscribes_once() {
    let (mut lcd, signal) = common::initialized(MockLcd::mono());
    lcd.shutdown();
    lcd.init(common::APPLET, LcdType::ANY).unwrap();

    assert_eq!(signal.subscriber_count(), 1);
}

#[test]
fn test_init_after_shutdown_signal_is_refused() {
    let (mut lcd, signal) = common::session(MockLcd::mono());
    signal.trigger(ShutdownReason::Interrupt);

    assert!(!lcd.init(common::APPLET, LcdType::ANY).unwrap());
    assert!(!lcd.is_initialized());
    assert!(lcd.native().calls().is_empty());
}
