pub mod analysis; // Kernel and block spectra
#[cfg(feature = "serde")]
pub mod config; // TOML song files
pub mod dsp;
pub mod error;
pub mod io;
pub mod render; // Additive renderer
pub mod sequencing; // Tempo, grids and the grid compiler
pub mod voices;

pub use error::{Error, Result};
pub use render::{render, Mixdown, Renderer};
pub use sequencing::{compile, Instrument, Registry, Tempo, Timing};

/// Largest block the streaming paths (playback, block benches) hand out at once.
pub const MAX_BLOCK_SIZE: usize = 2048;
