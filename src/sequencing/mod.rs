//! Timing, grid matrices, the instrument registry and the grid compiler.

pub mod compiler;
pub mod grid;
pub mod registry;
pub mod timing;

pub use compiler::{compile, CompiledGrid, Event};
pub use grid::{EnableGrid, Grid, OverrideGrid};
pub use registry::{Instrument, Registry};
pub use timing::{Tempo, Timing};
