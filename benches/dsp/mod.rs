//! Benchmarks for generators and the FIR band-pass.

mod filter;
mod generators;

pub use filter::bench_filter;
pub use generators::bench_generators;
