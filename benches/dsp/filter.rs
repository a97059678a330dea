//! Benchmarks for FIR band-pass design and block convolution.

use std::hint::black_box;

use beatgrid::dsp::{BandPass, FirKernel, Window};
use criterion::{BenchmarkId, Criterion};

use crate::BLOCK_SIZES;

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    for taps in [65, 257, 1025] {
        group.bench_with_input(BenchmarkId::new("design", taps), &taps, |b, &taps| {
            b.iter(|| FirKernel::bandpass(44_100, 400.0, 10_000.0, black_box(taps), Window::Hann))
        });
    }

    let kernel = FirKernel::bandpass(44_100, 400.0, 10_000.0, 257, Window::Hann).unwrap();

    for &size in BLOCK_SIZES {
        // Sawtooth-like ramp
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();

        let mut filter = BandPass::new(kernel.clone());
        group.bench_with_input(BenchmarkId::new("bandpass_257", size), &size, |b, _| {
            b.iter(|| filter.process(black_box(&input)))
        });
    }

    group.finish();
}
