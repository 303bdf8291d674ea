//! Performance benchmarks for RGBA to monochrome image conversion.
//!
//! Converting a decoded image for the monochrome display reduces 6880 RGBA
//! quads per frame. Applets that animate the display do this every frame, so
//! the three conversion methods are measured on a full-frame buffer.
//!
//! # Run Benchmarks
//!
//! ```sh
//! # Run all grayscale benchmarks
//! cargo bench --bench grayscale_bench
//!
//! # Run one conversion only
//! cargo bench --bench grayscale_bench -- luminosity
//! ```

use std::hint::black_box;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use lgsdk_core::ShutdownSignal;
use lgsdk_lcd::config::BITMAP_LENGTH_MONO;
use lgsdk_lcd::mock::MockLcd;
use lgsdk_lcd::{GrayscaleConversion, LcdSession, LcdType};

/// A full monochrome frame worth of RGBA quads with varied colors.
fn frame() -> Vec<u8> {
    (0..BITMAP_LENGTH_MONO)
        .flat_map(|i| {
            let v = (i % 256) as u8;
            [v, v.wrapping_mul(3), v.wrapping_add(91), 255]
        })
        .collect()
}

/// Benchmark the per-pixel conversion functions over one frame.
fn bench_convert_buffer(c: &mut Criterion) {
    let mut group = c.benchmark_group("grayscale_convert_buffer");
    group.throughput(Throughput::Elements(BITMAP_LENGTH_MONO as u64));

    let rgba = frame();
    for (name, conversion) in [
        ("average", GrayscaleConversion::Average),
        ("lightness", GrayscaleConversion::Lightness),
        ("luminosity", GrayscaleConversion::Luminosity),
    ] {
        group.bench_with_input(BenchmarkId::new("frame", name), &rgba, |b, rgba| {
            b.iter(|| black_box(conversion.convert_buffer(black_box(rgba))));
        });
    }

    group.finish();
}

/// Benchmark the session path, including the init guard and length check.
fn bench_session_convert_image(c: &mut Criterion) {
    let mut group = c.benchmark_group("session_convert_image");
    group.throughput(Throughput::Elements(BITMAP_LENGTH_MONO as u64));

    let mut lcd = LcdSession::new(Arc::new(MockLcd::mono()), ShutdownSignal::new());
    lcd.init("bench", LcdType::MONO).expect("mock init cannot fail");

    let rgba = frame();
    group.bench_function("mono_frame", |b| {
        b.iter(|| black_box(lcd.convert_image(black_box(&rgba))));
    });

    group.finish();
}

criterion_group!(benches, bench_convert_buffer, bench_session_convert_image);
criterion_main!(benches);
