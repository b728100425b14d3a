#![allow(missing_docs, reason = "Not needed for benchmarks")]

use criterion::{criterion_group, criterion_main, Criterion};
use image::{DynamicImage, Rgba, RgbaImage};
use lumara::prelude::*;

fn test_photo(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255])
    }))
}

/// One slider tick is one full pass, so this is the interactive latency
/// that matters.
fn full_pass(c: &mut Criterion) {
    let catalog = FilterCatalog::new();
    let mut group = c.benchmark_group("full_pass");

    for kind in [
        FilterKind::SepiaTone,
        FilterKind::GaussianBlur,
        FilterKind::Pixellate,
        FilterKind::Crystallize,
        FilterKind::TwirlDistortion,
    ] {
        let descriptor = catalog.get(kind).unwrap().clone();
        group.bench_function(descriptor.id, |b| {
            let mut session = Session::new(&descriptor);
            session.load(test_photo(256, 256));
            b.iter(|| {
                session.set_parameter(ControlKind::Intensity, 0.7);
            });
        });
    }

    group.finish();
}

fn catalog_lookup(c: &mut Criterion) {
    let catalog = FilterCatalog::new();
    c.bench_function("catalog_lookup", |b| {
        b.iter(|| catalog.get_by_id("twirl-distortion").is_some());
    });
}

criterion_group!(benches, full_pass, catalog_lookup);
criterion_main!(benches);
