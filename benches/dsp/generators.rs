//! Benchmarks for one hit of each generator.

use std::hint::black_box;

use beatgrid::dsp::RenderCtx;
use beatgrid::sequencing::Tempo;
use beatgrid::voices::{self, Generator, Override};
use criterion::Criterion;

pub fn bench_generators(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/generators");
    let timing = Tempo::default().timing().unwrap();
    let ctx = RenderCtx::from_timing(&timing);

    let tone = voices::tone();
    group.bench_function("tone", |b| b.iter(|| tone.generate(black_box(&ctx), None)));

    let kick = voices::kick();
    group.bench_function("kick", |b| b.iter(|| kick.generate(black_box(&ctx), None)));

    let low = Override::Frequency(60.0);
    group.bench_function("kick_override", |b| {
        b.iter(|| kick.generate(black_box(&ctx), Some(&low)))
    });

    let snare = voices::snare();
    group.bench_function("snare", |b| b.iter(|| snare.generate(black_box(&ctx), None)));

    // Metallic product plus a 257-tap convolution over one beat
    let cymbal = voices::cymbal(&timing).unwrap();
    group.bench_function("cymbal", |b| {
        b.iter(|| cymbal.generate(black_box(&ctx), None))
    });

    group.finish();
}
