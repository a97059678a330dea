//! Crate-wide error type.
//!
//! Every error is raised at the point of violation and aborts the render pass.
//! Nothing is downgraded to a default value.

use std::path::PathBuf;

/// Errors produced while configuring, compiling, rendering or exporting a grid.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Tempo fields that cannot produce an integer sample grid.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A matrix does not have the shape its partner (or the tempo window) requires.
    #[error("shape mismatch for '{name}': expected {expected_rows}x{expected_cols}, got {rows}x{cols}")]
    ShapeMismatch {
        name: String,
        expected_rows: usize,
        expected_cols: usize,
        rows: usize,
        cols: usize,
    },

    /// A row of a nested matrix literal is not as wide as the first row.
    #[error("ragged rows in '{name}': row {row} has {cols} cells, expected {expected_cols}")]
    RaggedRows {
        name: String,
        row: usize,
        expected_cols: usize,
        cols: usize,
    },

    /// Band edges, tap count or window selector rejected by the FIR designer.
    #[error("invalid filter spec: {0}")]
    InvalidFilterSpec(String),

    /// An override cell carries a parameter the instrument's generator ignores.
    #[error("instrument '{instrument}' does not accept override {kind} (measure {measure}, beat {beat})")]
    UnsupportedOverride {
        instrument: String,
        kind: &'static str,
        measure: usize,
        beat: usize,
    },

    /// Instrument names are registry keys and must be unique.
    #[error("instrument '{0}' is already registered")]
    DuplicateInstrument(String),

    #[error("wav export to {path:?} failed: {source}")]
    Wav {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[cfg(feature = "serde")]
    #[error("song file could not be parsed: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
