use std::f32::consts::TAU;

use super::{Length, RenderCtx};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Noise Sources
=============

Metallic noise
--------------

Six fixed sines MULTIPLIED together, not summed:

    y(t) = Π sin(2π f_k t),   f_k ∈ {123, 219, 150, 180, 240, 261} Hz

A product of sines expands into sums and differences of every frequency
combination, so the result is a dense, inharmonic, amplitude-modulated
texture: the clang of a cymbal or cowbell rather than a chord. The raw
product is tiny (six factors each below 1), so the output is divided by its
own peak magnitude and always reaches exactly ±1 before external scaling.

Noise burst
-----------

Seeded xorshift32 white noise under an exponential decay:

    r      ← r ^ (r << 13); r ^= r >> 17; r ^= r << 5
    white  = ((r & 0xFFFF) - 32768) / 32768          ∈ [-1, 1)
    env    ← env * exp(-1 / (tau * sample_rate))     (env starts at 1)
    y      = white * env * gain

The seed is fixed, so every hit of the same voice is identical. A short tau
(20 ms) reads as a closed hi-hat, a longer one (60 ms) as a snare.
*/

/// Partials of the metallic texture, in Hz.
pub const METALLIC_PARTIALS: [f32; 6] = [123.0, 219.0, 150.0, 180.0, 240.0, 261.0];

/// Initial xorshift state for noise bursts.
pub const NOISE_SEED: u32 = 0x1234_567;

/// Product-of-sines metallic noise, peak-normalized then scaled by `gain`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metallic {
    pub gain: f32,
    pub duration: Length,
}

impl Metallic {
    pub fn render(&self, ctx: &RenderCtx) -> Vec<f32> {
        let mut samples = metallic_noise(ctx.sample_rate, ctx.seconds(self.duration));
        if self.gain != 1.0 {
            samples.iter_mut().for_each(|s| *s *= self.gain);
        }
        samples
    }
}

impl Default for Metallic {
    fn default() -> Self {
        Self {
            gain: 1.0,
            duration: Length::Beats(1.0),
        }
    }
}

/// Product of [`METALLIC_PARTIALS`] sines, normalized so the largest magnitude is 1.
///
/// An all-zero product (a single sample at t = 0) is returned unscaled.
pub fn metallic_noise(sample_rate: u32, duration_sec: f64) -> Vec<f32> {
    let n = super::sample_count(sample_rate, duration_sec);
    let sr = sample_rate as f32;

    let mut out: Vec<f32> = (0..n)
        .map(|i| {
            let t = i as f32 / sr;
            METALLIC_PARTIALS
                .iter()
                .fold(1.0f32, |acc, &freq| acc * (TAU * freq * t).sin())
        })
        .collect();

    let peak = super::peak(&out);
    if peak > 0.0 {
        out.iter_mut().for_each(|s| *s /= peak);
    }
    out
}

/// Exponentially decaying white-noise burst (snare / hat body).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseBurst {
    /// Decay time constant in seconds.
    pub tau: f32,
    pub gain: f32,
    pub duration: Length,
}

impl NoiseBurst {
    pub fn new(tau: f32, gain: f32) -> Self {
        Self {
            tau,
            gain,
            duration: Length::Beats(1.0),
        }
    }

    pub fn render(&self, ctx: &RenderCtx) -> Vec<f32> {
        let n = ctx.sample_count(self.duration);
        let k = (-1.0 / (self.tau.max(f32::MIN_POSITIVE) * ctx.sample_rate as f32)).exp();

        let mut rng = NOISE_SEED;
        let mut env = 1.0f32;

        (0..n)
            .map(|_| {
                rng ^= rng << 13;
                rng ^= rng >> 17;
                rng ^= rng << 5;
                let white = ((rng & 0xFFFF) as i32 - 32_768) as f32 / 32_768.0;
                let y = white * env * self.gain;
                env *= k;
                y
            })
            .collect()
    }
}

impl Default for NoiseBurst {
    /// Snare-like burst: 60 ms decay at 0.8.
    fn default() -> Self {
        Self::new(0.060, 0.8)
    }
}
