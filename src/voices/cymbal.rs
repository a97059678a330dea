//! Cymbal voice.
//!
//! Metallic product-of-sines noise pushed through the FIR band-pass. The
//! filter strips the low rumble of the product texture and leaves a bright
//! shimmer; the band-pass output is peak-normalized, then scaled by `gain`.
//!
//! The kernel is designed once for the tempo's sample rate.

use super::{Generator, Override};
use crate::dsp::{BandPass, FirKernel, Length, Metallic, RenderCtx, Window};
use crate::error::Result;
use crate::sequencing::timing::Timing;

/// Band-passed metallic noise.
#[derive(Debug, Clone, PartialEq)]
pub struct Cymbal {
    pub gain: f32,
    pub duration: Length,
    kernel: FirKernel,
}

impl Cymbal {
    /// Design the band-pass for `sample_rate` and build the voice.
    pub fn new(
        sample_rate: u32,
        f_lo: f64,
        f_hi: f64,
        numtaps: usize,
        window: Window,
        gain: f32,
    ) -> Result<Self> {
        Ok(Self {
            gain,
            duration: Length::Beats(1.0),
            kernel: FirKernel::bandpass(sample_rate, f_lo, f_hi, numtaps, window)?,
        })
    }

    pub fn kernel(&self) -> &FirKernel {
        &self.kernel
    }

    pub fn render(&self, ctx: &RenderCtx) -> Vec<f32> {
        let raw = Metallic {
            gain: 1.0,
            duration: self.duration,
        }
        .render(ctx);

        let mut out = BandPass::new(self.kernel.clone()).process(&raw);
        out.iter_mut().for_each(|s| *s *= self.gain);
        out
    }

    pub fn with_override(&self, param: &Override) -> Self {
        let mut next = self.clone();
        match *param {
            Override::Amplitude(gain) => next.gain = gain,
            Override::Duration(duration) => next.duration = duration,
            Override::Frequency(_) | Override::FrequencyEnd(_) | Override::Decay(_) => {}
        }
        next
    }
}

impl Generator for Cymbal {
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

/// 400 Hz - 10 kHz band, 257 Hann taps, played at a quarter of full scale.
pub fn cymbal(timing: &Timing) -> Result<Cymbal> {
    Cymbal::new(timing.sample_rate_hz(), 400.0, 10_000.0, 257, Window::Hann, 0.25)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequencing::timing::Tempo;

    #[test]
    fn test_cymbal_peak_matches_gain() {
        let timing = Tempo::default().timing().unwrap();
        let ctx = RenderCtx::from_timing(&timing);
        let cymbal = cymbal(&timing).unwrap();

        let samples = cymbal.generate(&ctx, None);
        assert_eq!(samples.len(), timing.samples_per_beat());
        assert!((crate::dsp::peak(&samples) - 0.25).abs() < 1e-6);

        let loud = cymbal.generate(&ctx, Some(&Override::Amplitude(1.0)));
        assert!((crate::dsp::peak(&loud) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_bad_band_rejected() {
        assert!(Cymbal::new(8_000, 400.0, 10_000.0, 257, Window::Hann, 1.0).is_err());
    }
}
