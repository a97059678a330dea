//! Sine tone voices.
//!
//! Plain sines sampled per hit. The sustained tone fills a whole beat; the
//! metronome is a short, high click a tenth of a beat long.

use crate::dsp::{Length, Tone};

/// A4 at half amplitude, one beat long.
pub fn tone() -> Tone {
    Tone::default()
}

/// 800 Hz click lasting a tenth of a beat.
pub fn metronome() -> Tone {
    Tone::new(800.0, 0.5, Length::Beats(0.1))
}
