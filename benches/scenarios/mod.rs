//! Whole-pipeline benchmarks on the demo pattern and a denser kit.

mod render;

pub use render::bench_render;
