//! Hi-hat voice (closed).
//!
//! The same noise burst as the snare, cut to a 20 ms decay and played
//! quieter. Longer decays open the hat up.

use crate::dsp::NoiseBurst;

/// Create a closed hi-hat voice.
pub fn hihat() -> NoiseBurst {
    NoiseBurst::new(0.020, 0.5)
}
