//! Snare voice.
//!
//! A 60 ms white-noise burst. No tonal body; the noise alone carries the
//! "crack".

use crate::dsp::NoiseBurst;

/// Create a snare voice.
pub fn snare() -> NoiseBurst {
    NoiseBurst::new(0.060, 0.8)
}
