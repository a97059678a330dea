//! Kick drum voice.
//!
//! A sine body whose pitch falls from 80 Hz towards 30 Hz while the level
//! dies away. The pitch drop gives the "punch", the long body the "boom".
//!
//! # Variations
//!
//! - Raise `decay_rate` for a tight, clicky kick
//! - Lower `shift_rate` for a slower, tom-like glide
//! - Raise `freq_start` for more attack

use crate::dsp::Drum;

/// Create a kick drum voice.
pub fn kick() -> Drum {
    Drum::default()
}
