//! Integration tests for display routing, text and images.

mod common;

use lgsdk_core::{Color, Error};
use lgsdk_core::validation::ArgumentKind;
use lgsdk_lcd::config::{BITMAP_LENGTH_COLOR, BITMAP_LENGTH_MONO};
use lgsdk_lcd::mock::{LcdCall, MockLcd};
use lgsdk_lcd::{GrayscaleConversion, LcdButton};
use rstest::rstest;

const LINES: [&str; 4] = ["one", "two", "three", "four"];

#[test]
fn test_lines_match_sequential_calls() {
    let (lcd, _signal) = common::initialized(MockLcd::mono());
    assert!(lcd.set_lines(&LINES, Color::WHITE).unwrap());
    let batched = lcd.native().calls();

    lcd.native().clear_calls();
    for (line, text) in LINES.iter().enumerate() {
        assert!(lcd.set_text(line, text, Color::WHITE).unwrap());
    }
    assert_eq!(lcd.native().calls(), batched);

    assert_eq!(
        batched,
        LINES
            .iter()
            .enumerate()
            .map(|(line, text)| LcdCall::MonoSetText {
                line: line as i32,
                text: text.to_string(),
            })
            .collect::<Vec<_>>()
    );
}

#[test]
fn test_too_many_mono_lines_rejected_before_native() {
    let (lcd, _signal) = common::initialized(MockLcd::mono());
    let error = lcd.set_lines(&["a", "b", "c", "d", "e"], Color::WHITE).unwrap_err();

    assert!(matches!(
        error,
        Error::OutOfRange {
            kind: ArgumentKind::MonoLine,
            value: 4,
            ..
        }
    ));
    assert!(lcd.native().calls().is_empty());
}

#[test]
fn test_color_lines_carry_color() {
    let (lcd, _signal) = common::initialized(MockLcd::color());
    let lines = vec!["x".to_string(); 8];
    let red = Color::rgb(255, 0, 0);

    assert!(lcd.set_lines(&lines, red).unwrap());
    assert_eq!(lcd.native().call_count(), 8);
    assert!(lcd.native().calls().iter().all(|call| matches!(
        call,
        LcdCall::ColorSetText {
            color: (255, 0, 0),
            ..
        }
    )));
}

#[test]
fn test_lines_aggregate_without_short_circuit() {
    let (lcd, _signal) = common::initialized(MockLcd::mono());
    lcd.native().set_call_result(false);

    assert!(!lcd.set_lines(&LINES, Color::WHITE).unwrap());
    assert_eq!(lcd.native().call_count(), LINES.len());
}

#[test]
fn test_title_is_false_on_mono() {
    let (lcd, _signal) = common::initialized(MockLcd::mono());
    assert!(!lcd.set_title("Title", Color::WHITE).unwrap());
    assert!(lcd.native().calls().is_empty());
}

#[test]
fn test_title_on_color() {
    let (lcd, _signal) = common::initialized(MockLcd::color());
    assert!(lcd.set_title("Title", Color::BLACK).unwrap());
    assert_eq!(
        lcd.native().calls(),
        vec![LcdCall::ColorSetTitle {
            text: "Title".to_string(),
            color: (0, 0, 0),
        }]
    );
}

#[test]
fn test_auto_update_after_each_mutation() {
    let (mut lcd, _signal) = common::initialized(MockLcd::color());
    lcd.enable_auto_update();

    lcd.set_background(&vec![0; BITMAP_LENGTH_COLOR]).unwrap();
    lcd.set_text(1, "text", Color::WHITE).unwrap();
    lcd.set_title("title", Color::WHITE).unwrap();
    assert_eq!(lcd.native().count_calls(|call| *call == LcdCall::Update), 3);

    lcd.disable_auto_update();
    lcd.set_text(2, "text", Color::WHITE).unwrap();
    assert_eq!(lcd.native().count_calls(|call| *call == LcdCall::Update), 3);
}

#[rstest]
#[case::mono(MockLcd::mono(), BITMAP_LENGTH_COLOR)]
#[case::color(MockLcd::color(), BITMAP_LENGTH_MONO)]
fn test_background_length_follows_display(#[case] mock: MockLcd, #[case] wrong_len: usize) {
    let (lcd, _signal) = common::initialized(mock);

    let error = lcd.set_background(&vec![0; wrong_len]).unwrap_err();
    assert!(matches!(error, Error::BitmapLength { .. }));

    let bitmap = vec![0; lcd.bitmap_length()];
    assert!(lcd.set_background(&bitmap).unwrap());
}

#[test]
fn test_background_values_reject_non_bytes() {
    let (lcd, _signal) = common::initialized(MockLcd::mono());
    let mut values = vec![0; BITMAP_LENGTH_MONO];
    values[10] = 256;

    let error = lcd.set_background_values(&values).unwrap_err();
    assert!(matches!(error, Error::BitmapValue { index: 10, value: 256 }));
    assert!(lcd.native().calls().is_empty());

    values[10] = 255;
    assert!(lcd.set_background_values(&values).unwrap());
}

#[test]
fn test_button_of_other_variant_rejected() {
    let (lcd, _signal) = common::initialized(MockLcd::mono());
    lcd.native().press(LcdButton::Mono2.code());

    assert!(lcd.is_button_pressed(LcdButton::Mono2).unwrap());
    assert!(!lcd.is_button_pressed(LcdButton::Mono1).unwrap());
    let error = lcd.is_button_pressed(LcdButton::Menu).unwrap_err();
    assert!(matches!(error, Error::InvalidButton(0x4000)));
}

#[test]
fn test_convert_image_on_color_copies_one_frame() {
    let (lcd, _signal) = common::initialized(MockLcd::color());
    let mut image = vec![7u8; BITMAP_LENGTH_COLOR];
    image.extend_from_slice(&[9; 8]);

    let bitmap = lcd.convert_image(&image).unwrap();
    assert_eq!(bitmap, image[..BITMAP_LENGTH_COLOR]);
    assert!(lcd.set_background(&bitmap).unwrap());
}

#[test]
fn test_convert_image_on_color_rejects_short_buffer() {
    let (lcd, _signal) = common::initialized(MockLcd::color());
    let error = lcd.convert_image(&[7; 32]).unwrap_err();
    assert!(matches!(
        error,
        Error::BitmapLength { expected: BITMAP_LENGTH_COLOR, actual: 32 }
    ));
    assert!(lcd.native().calls().is_empty());
}

#[rstest]
#[case(GrayscaleConversion::Average, 85)]
#[case(GrayscaleConversion::Lightness, 128)]
#[case(GrayscaleConversion::Luminosity, 54)]
fn test_convert_image_on_mono(#[case] conversion: GrayscaleConversion, #[case] expected: u8) {
    let (mut lcd, _signal) = common::initialized(MockLcd::mono());
    lcd.set_grayscale_conversion(conversion);

    let image = [255u8, 0, 0, 255].repeat(BITMAP_LENGTH_MONO + 3);
    let bitmap = lcd.convert_image(&image).unwrap();

    assert_eq!(bitmap.len(), BITMAP_LENGTH_MONO);
    assert!(bitmap.iter().all(|&value| value == expected));
    assert!(lcd.set_background(&bitmap).unwrap());
}
