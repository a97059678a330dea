//! Generators and pre-built voices.
//!
//! A [`Generator`] turns a [`RenderCtx`] and an optional per-cell [`Override`]
//! into a fresh sample vector. Overrides apply to a copy of the generator's
//! parameters for that single call; nothing is shared between calls.
//!
//! # Example
//!
//! ```
//! use beatgrid::dsp::RenderCtx;
//! use beatgrid::voices::{self, Generator, Override};
//!
//! let ctx = RenderCtx::new(44_100, 0.3);
//! let kick = voices::kick();
//!
//! let default_hit = kick.generate(&ctx, None);
//! let low_hit = kick.generate(&ctx, Some(&Override::Frequency(60.0)));
//! assert_eq!(default_hit.len(), low_hit.len());
//! ```

mod cymbal;
mod hihat;
mod kick;
mod snare;
mod tone;

pub use cymbal::{cymbal, Cymbal};
pub use hihat::hihat;
pub use kick::kick;
pub use snare::snare;
pub use tone::{metronome, tone};

use std::fmt;

use crate::dsp::{Drum, Length, Metallic, NoiseBurst, RenderCtx, Tone};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single-parameter substitution for one grid cell.
///
/// A cell holds `Option<Override>`: `None` means "use the defaults", which is
/// distinct from an override whose payload happens to be zero.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Override {
    /// Tone pitch, or the drum's starting pitch.
    Frequency(f32),
    /// Drum resting pitch.
    FrequencyEnd(f32),
    /// Peak amplitude or gain.
    Amplitude(f32),
    Duration(Length),
    /// Drum amplitude decay rate, or noise-burst time constant in seconds.
    Decay(f32),
}

impl Override {
    pub fn kind(&self) -> &'static str {
        match self {
            Override::Frequency(_) => "frequency",
            Override::FrequencyEnd(_) => "frequency_end",
            Override::Amplitude(_) => "amplitude",
            Override::Duration(_) => "duration",
            Override::Decay(_) => "decay",
        }
    }
}

/// Something the renderer can trigger on a beat.
pub trait Generator: Send + Sync + fmt::Debug {
    /// Render one hit. With `Some(param)` the override replaces the matching default.
    fn generate(&self, ctx: &RenderCtx, param: Option<&Override>) -> Vec<f32>;

    /// Whether `param` names a parameter this generator has.
    fn accepts(&self, param: &Override) -> bool;
}

impl Generator for Box<dyn Generator> {
    fn generate(&self, ctx: &RenderCtx, param: Option<&Override>) -> Vec<f32> {
        (**self).generate(ctx, param)
    }

    fn accepts(&self, param: &Override) -> bool {
        (**self).accepts(param)
    }
}

impl Tone {
    pub fn with_override(&self, param: &Override) -> Self {
        let mut next = *self;
        match *param {
            Override::Frequency(freq) => next.freq = freq,
            Override::Amplitude(amp) => next.amp = amp,
            Override::Duration(duration) => next.duration = duration,
            Override::FrequencyEnd(_) | Override::Decay(_) => {}
        }
        next
    }
}

impl Generator for Tone {
    fn generate(&self, ctx: &RenderCtx, param: Option<&Override>) -> Vec<f32> {
        match param {
            Some(param) => self.with_override(param).render(ctx),
            None => self.render(ctx),
        }
    }

    fn accepts(&self, param: &Override) -> bool {
        matches!(
            param,
            Override::Frequency(_) | Override::Amplitude(_) | Override::Duration(_)
        )
    }
}

impl Drum {
    pub fn with_override(&self, param: &Override) -> Self {
        let mut next = *self;
        match *param {
            Override::Frequency(freq) => next.freq_start = freq,
            Override::FrequencyEnd(freq) => next.freq_end = freq,
            Override::Amplitude(amp) => next.amp = amp,
            Override::Duration(duration) => next.duration = duration,
            Override::Decay(rate) => next.decay_rate = rate,
        }
        next
    }
}

impl Generator for Drum {
    fn generate(&self, ctx: &RenderCtx, param: Option<&Override>) -> Vec<f32> {
        match param {
            Some(param) => self.with_override(param).render(ctx),
            None => self.render(ctx),
        }
    }

    fn accepts(&self, _param: &Override) -> bool {
        true
    }
}

impl Metallic {
    pub fn with_override(&self, param: &Override) -> Self {
        let mut next = *self;
        match *param {
            Override::Amplitude(gain) => next.gain = gain,
            Override::Duration(duration) => next.duration = duration,
            Override::Frequency(_) | Override::FrequencyEnd(_) | Override::Decay(_) => {}
        }
        next
    }
}

impl Generator for Metallic {
    fn generate(&self, ctx: &RenderCtx, param: Option<&Override>) -> Vec<f32> {
        match param {
            Some(param) => self.with_override(param).render(ctx),
            None => self.render(ctx),
        }
    }

    fn accepts(&self, param: &Override) -> bool {
        matches!(param, Override::Amplitude(_) | Override::Duration(_))
    }
}

impl NoiseBurst {
    pub fn with_override(&self, param: &Override) -> Self {
        let mut next = *self;
        match *param {
            Override::Amplitude(gain) => next.gain = gain,
            Override::Decay(tau) => next.tau = tau,
            Override::Duration(duration) => next.duration = duration,
            Override::Frequency(_) | Override::FrequencyEnd(_) => {}
        }
        next
    }
}

impl Generator for NoiseBurst {
    fn generate(&self, ctx: &RenderCtx, param: Option<&Override>) -> Vec<f32> {
        match param {
            Some(param) => self.with_override(param).render(ctx),
            None => self.render(ctx),
        }
    }

    fn accepts(&self, param: &Override) -> bool {
        matches!(
            param,
            Override::Amplitude(_) | Override::Decay(_) | Override::Duration(_)
        )
    }
}

/// Contributes nothing. Useful as a placeholder lane.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Silence;

impl Generator for Silence {
    fn generate(&self, _ctx: &RenderCtx, _param: Option<&Override>) -> Vec<f32> {
        Vec::new()
    }

    fn accepts(&self, _param: &Override) -> bool {
        false
    }
}

/// A generator backed by a closure. Accepts every override kind and leaves
/// interpretation to the closure.
pub struct FnGenerator<F> {
    label: &'static str,
    f: F,
}

/// Wrap a closure as a [`Generator`].
pub fn from_fn<F>(label: &'static str, f: F) -> FnGenerator<F>
where
    F: Fn(&RenderCtx, Option<&Override>) -> Vec<f32> + Send + Sync,
{
    FnGenerator { label, f }
}

impl<F> fmt::Debug for FnGenerator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnGenerator").field("label", &self.label).finish()
    }
}

impl<F> Generator for FnGenerator<F>
where
    F: Fn(&RenderCtx, Option<&Override>) -> Vec<f32> + Send + Sync,
{
    fn generate(&self, ctx: &RenderCtx, param: Option<&Override>) -> Vec<f32> {
        (self.f)(ctx, param)
    }

    fn accepts(&self, _param: &Override) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> RenderCtx {
        RenderCtx::new(44_100, 0.3)
    }

    #[test]
    fn test_override_applies_to_one_call_only() {
        let tone = tone();
        let before = tone.generate(&ctx(), None);
        let shifted = tone.generate(&ctx(), Some(&Override::Frequency(220.0)));
        let after = tone.generate(&ctx(), None);

        assert_ne!(before, shifted);
        assert_eq!(before, after);
        assert_eq!(tone.freq, 440.0);
    }

    #[test]
    fn test_override_matches_explicit_params() {
        let via_override = tone().generate(&ctx(), Some(&Override::Frequency(220.0)));
        let explicit = Tone::new(220.0, 0.5, Length::Beats(1.0)).render(&ctx());
        assert_eq!(via_override, explicit);
    }

    #[test]
    fn test_zero_frequency_override_is_not_absence() {
        let silent = tone().generate(&ctx(), Some(&Override::Frequency(0.0)));
        assert!(silent.iter().all(|&s| s == 0.0));
        assert!(crate::dsp::peak(&tone().generate(&ctx(), None)) > 0.4);
    }

    #[test]
    fn test_duration_override_changes_length() {
        let short = kick().generate(&ctx(), Some(&Override::Duration(Length::Beats(0.5))));
        assert_eq!(short.len(), 6615);
    }

    #[test]
    fn test_accepts() {
        assert!(tone().accepts(&Override::Frequency(1.0)));
        assert!(!tone().accepts(&Override::Decay(1.0)));
        assert!(kick().accepts(&Override::FrequencyEnd(20.0)));
        assert!(snare().accepts(&Override::Decay(0.01)));
        assert!(!snare().accepts(&Override::Frequency(100.0)));
        assert!(!Silence.accepts(&Override::Amplitude(1.0)));
    }

    #[test]
    fn test_silence_is_empty() {
        assert!(Silence.generate(&ctx(), None).is_empty());
    }

    #[test]
    fn test_closure_generator() {
        let ones = from_fn("ones", |ctx: &RenderCtx, param: Option<&Override>| {
            let level = match param {
                Some(Override::Amplitude(a)) => *a,
                _ => 1.0,
            };
            vec![level; ctx.sample_count(Length::Beats(0.5))]
        });

        assert_eq!(ones.generate(&ctx(), None), vec![1.0; 6615]);
        assert_eq!(
            ones.generate(&ctx(), Some(&Override::Amplitude(0.25)))[0],
            0.25
        );
        assert!(format!("{ones:?}").contains("ones"));
    }
}
