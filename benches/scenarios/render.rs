//! Benchmarks for compiling and rendering whole windows.

use std::hint::black_box;

use beatgrid::render::Renderer;
use beatgrid::sequencing::{compile, EnableGrid, Instrument, Registry, Tempo};
use beatgrid::voices;
use criterion::{BenchmarkId, Criterion};

use crate::BLOCK_SIZES;

/// Demo pattern plus snare, hat and cymbal, hats on every beat.
fn full_kit() -> Registry {
    let tempo = Tempo::default();
    let timing = tempo.timing().unwrap();
    let every_beat = EnableGrid::filled(4, 4, true);
    let backbeat = EnableGrid::from_flags("snare", [[0, 1, 0, 1]; 4]).unwrap();
    let crash = EnableGrid::from_flags("cymbal", [[1, 0, 0, 0]; 4]).unwrap();

    let mut registry = Registry::demo().unwrap();
    registry
        .insert(Instrument::new("snare", voices::snare(), backbeat))
        .unwrap();
    registry
        .insert(Instrument::new("hihat", voices::hihat(), every_beat))
        .unwrap();
    registry
        .insert(Instrument::new(
            "cymbal",
            voices::cymbal(&timing).unwrap(),
            crash,
        ))
        .unwrap();
    registry
}

pub fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/render");
    let demo = Registry::demo().unwrap();
    let kit = full_kit();

    group.bench_function("compile_demo", |b| b.iter(|| compile(black_box(&demo))));

    let renderer = Renderer::new(&demo);
    group.bench_function("window_demo", |b| b.iter(|| renderer.render()));

    let kit_renderer = Renderer::new(&kit);
    group.bench_function("window_full_kit", |b| b.iter(|| kit_renderer.render()));

    // One block from the middle of the window
    for &size in BLOCK_SIZES {
        group.bench_with_input(BenchmarkId::new("block_demo", size), &size, |b, &size| {
            b.iter(|| renderer.render_block(black_box(100_000), size))
        });
    }

    group.finish();
}
