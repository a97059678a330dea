use std::f32::consts::TAU;

use super::{Length, RenderCtx};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Sine Tone
=========

    y[i] = amp * sin(2π * freq * t),   t = i / sample_rate

The phase is computed directly from the sample index rather than accumulated,
so every call starts at phase zero and two calls with the same parameters
produce identical samples. Used for the sustained "tone" instrument and, with
a short duration and high pitch, for the metronome click.
*/

/// Parameters for a fixed-pitch sine tone.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub freq: f32,
    pub amp: f32,
    pub duration: Length,
}

impl Tone {
    pub fn new(freq: f32, amp: f32, duration: Length) -> Self {
        Self {
            freq,
            amp,
            duration,
        }
    }

    pub fn render(&self, ctx: &RenderCtx) -> Vec<f32> {
        tone(
            self.freq,
            self.amp,
            ctx.sample_rate,
            ctx.seconds(self.duration),
        )
    }
}

impl Default for Tone {
    /// A4 at half amplitude for one beat.
    fn default() -> Self {
        Self::new(440.0, 0.5, Length::Beats(1.0))
    }
}

/// `amp * sin(2π·freq·t)` sampled at `sample_rate` for `duration_sec`.
pub fn tone(freq: f32, amp: f32, sample_rate: u32, duration_sec: f64) -> Vec<f32> {
    let n = super::sample_count(sample_rate, duration_sec);
    let sr = sample_rate as f32;

    (0..n)
        .map(|i| {
            let t = i as f32 / sr;
            amp * (TAU * freq * t).sin()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_matches_duration() {
        assert_eq!(tone(440.0, 0.5, 44_100, 0.3).len(), 13230);
        assert_eq!(tone(440.0, 0.5, 48_000, 0.0).len(), 0);
    }

    #[test]
    fn test_starts_at_zero_and_respects_amplitude() {
        let samples = tone(440.0, 0.5, 44_100, 0.1);

        assert_eq!(samples[0], 0.0);
        let peak = crate::dsp::peak(&samples);
        assert!(peak <= 0.5 + 1e-6);
        assert!(peak > 0.49, "peak was {peak}");
    }

    #[test]
    fn test_quarter_period_hits_peak() {
        // 1 kHz at 4 kHz: sample 1 lands on the first crest
        let samples = tone(1_000.0, 1.0, 4_000, 0.01);
        assert!((samples[1] - 1.0).abs() < 1e-6);
        assert!(samples[2].abs() < 1e-5);
    }

    #[test]
    fn test_render_is_pure() {
        let ctx = RenderCtx::new(44_100, 0.3);
        let tone = Tone::default();

        assert_eq!(tone.render(&ctx), tone.render(&ctx));
    }
}
