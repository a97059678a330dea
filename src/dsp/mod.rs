//! Signal generators and the FIR band-pass filter.
//!
//! Every generator here is a pure function of its parameters: it allocates a
//! fresh sample vector, holds no state between calls, and produces the same
//! output for the same input. The renderer layers scheduling and mixing on top.

/// Percussive drum with independent pitch-glide and amplitude envelopes.
pub mod drum;
/// Windowed-sinc FIR band-pass design and block convolution.
pub mod filter;
/// Metallic product-of-sines noise and seeded white-noise bursts.
pub mod noise;
/// Sine tone.
pub mod oscillator;
/// Hann / Hamming tapers for kernel design.
pub mod window;

pub use drum::Drum;
pub use filter::{apply_bandpass, design_bandpass_kernel, BandPass, FirKernel};
pub use noise::{Metallic, NoiseBurst};
pub use oscillator::Tone;
pub use window::Window;

use crate::sequencing::timing::Timing;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Guards `floor(sample_rate * seconds)` against products like 13229.999999999998.
const SAMPLE_COUNT_EPSILON: f64 = 1e-9;

/// Length of a generated sound, either in beats of the current tempo or in seconds.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Beats(f64),
    Seconds(f64),
}

impl Default for Length {
    fn default() -> Self {
        Length::Beats(1.0)
    }
}

/// Context passed to generators during rendering.
///
/// Carries the sample rate and the beat length so that [`Length::Beats`]
/// durations resolve against the tempo being rendered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderCtx {
    pub sample_rate: u32,
    pub beat_len_sec: f64,
}

impl RenderCtx {
    pub fn new(sample_rate: u32, beat_len_sec: f64) -> Self {
        Self {
            sample_rate,
            beat_len_sec,
        }
    }

    pub fn from_timing(timing: &Timing) -> Self {
        Self::new(timing.sample_rate_hz(), timing.beat_len_sec())
    }

    /// Resolve a length to seconds.
    pub fn seconds(&self, length: Length) -> f64 {
        match length {
            Length::Beats(beats) => beats * self.beat_len_sec,
            Length::Seconds(seconds) => seconds,
        }
    }

    /// Number of samples a sound of `length` occupies (truncating, never negative).
    pub fn sample_count(&self, length: Length) -> usize {
        sample_count(self.sample_rate, self.seconds(length))
    }
}

/// `floor(sample_rate * duration_sec)`, clamped to zero for negative or non-finite durations.
pub fn sample_count(sample_rate: u32, duration_sec: f64) -> usize {
    let n = sample_rate as f64 * duration_sec;
    if n.is_finite() && n > 0.0 {
        (n + SAMPLE_COUNT_EPSILON).floor() as usize
    } else {
        0
    }
}

/// Largest absolute sample value, 0.0 for an empty slice.
pub fn peak(samples: &[f32]) -> f32 {
    samples.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_beat_at_200_bpm() {
        let ctx = RenderCtx::new(44_100, 60.0 / 200.0);

        assert_eq!(ctx.sample_count(Length::Beats(1.0)), 13230);
        assert_eq!(ctx.sample_count(Length::Beats(0.1)), 1323);
        assert_eq!(ctx.sample_count(Length::Seconds(0.5)), 22050);
    }

    #[test]
    fn test_degenerate_durations() {
        assert_eq!(sample_count(44_100, 0.0), 0);
        assert_eq!(sample_count(44_100, -1.0), 0);
        assert_eq!(sample_count(44_100, f64::NAN), 0);
        assert_eq!(sample_count(44_100, f64::INFINITY), 0);
    }

    #[test]
    fn test_peak() {
        assert_eq!(peak(&[]), 0.0);
        assert_eq!(peak(&[0.25, -0.75, 0.5]), 0.75);
    }
}
