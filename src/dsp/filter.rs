use std::f64::consts::PI;

use super::window::Window;
use crate::error::{Error, Result};

/*
FIR Band-Pass Filter
====================

A windowed-sinc band-pass built from two ideal low-pass responses.

Vocabulary
----------

  numtaps     Kernel length. Must be odd so the kernel has a single center
              tap and is exactly symmetric (linear phase).

  n           Tap position relative to the center: i - (numtaps - 1) / 2.

  tail        The last numtaps - 1 samples of a block's full convolution.
              They belong to the NEXT block, so they are carried forward.

  group delay (numtaps - 1) / 2 samples. The output is not shifted back;
              callers that need phase alignment shift it themselves.


Kernel Design
-------------

    lp(fc)[n] = 2 fc/fs · sinc(2 fc/fs · n)        sinc(x) = sin(πx) / (πx)
    h[n]      = (lp(f_hi)[n] - lp(f_lo)[n]) · w[n]
    h         = h / Σ h

Subtracting the lower low-pass from the upper one leaves the band between
them. The window tames the ripple from truncating the infinite sinc. The final
division makes the coefficients sum to exactly one.


Block Convolution
-----------------

    full = x ⊛ h                        length len(x) + numtaps - 1
    full[..numtaps-1] += tail_in        previous block spills into this one
    tail_out = full[len(x)..]           spills into the next block
    y = full[..len(x)]

Feeding contiguous blocks through with the tail carried gives the same samples
as filtering the whole signal at once.

Peak Renormalization
--------------------

`apply_bandpass` then divides `y` by its own peak magnitude, so every block
leaves at unit peak. This is auto-leveling, not a fixed gain: successive blocks
of one long signal get different gains. `apply_bandpass_raw` returns the
samples before that step. An all-zero block is returned as zeros.
*/

/// Symmetric, sum-normalized FIR coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct FirKernel {
    taps: Vec<f64>,
}

impl FirKernel {
    /// Design a band-pass kernel for `[f_lo, f_hi]` Hz.
    pub fn bandpass(
        sample_rate: u32,
        f_lo: f64,
        f_hi: f64,
        numtaps: usize,
        window: Window,
    ) -> Result<Self> {
        let fs = sample_rate as f64;
        let nyquist = fs / 2.0;

        if !(f_lo > 0.0 && f_lo < f_hi && f_hi < nyquist) {
            return Err(Error::InvalidFilterSpec(format!(
                "band edges must satisfy 0 < f_lo < f_hi < {nyquist}, got f_lo={f_lo}, f_hi={f_hi}"
            )));
        }
        if numtaps % 2 == 0 {
            return Err(Error::InvalidFilterSpec(format!(
                "numtaps must be odd for linear phase, got {numtaps}"
            )));
        }
        if numtaps < 3 {
            return Err(Error::InvalidFilterSpec(format!(
                "numtaps must be at least 3, got {numtaps}"
            )));
        }

        let center = (numtaps - 1) as f64 / 2.0;
        let mut taps: Vec<f64> = (0..numtaps)
            .map(|i| {
                let n = i as f64 - center;
                let ideal = lowpass_tap(f_hi / fs, n) - lowpass_tap(f_lo / fs, n);
                ideal * window.at(n, numtaps)
            })
            .collect();

        let sum: f64 = taps.iter().sum();
        if !sum.is_normal() {
            return Err(Error::InvalidFilterSpec(format!(
                "kernel coefficients sum to {sum}; cannot normalize"
            )));
        }
        taps.iter_mut().for_each(|t| *t /= sum);

        Ok(Self { taps })
    }

    pub fn taps(&self) -> &[f64] {
        &self.taps
    }

    pub fn len(&self) -> usize {
        self.taps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }

    /// Length of the tail carried between blocks.
    pub fn tail_len(&self) -> usize {
        self.taps.len().saturating_sub(1)
    }

    /// Samples of delay introduced by the kernel.
    pub fn group_delay(&self) -> usize {
        self.tail_len() / 2
    }
}

/// Ideal low-pass tap at normalized cutoff `fc = cutoff / fs`.
#[inline]
fn lowpass_tap(fc: f64, n: f64) -> f64 {
    2.0 * fc * sinc(2.0 * fc * n)
}

#[inline]
fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        let px = PI * x;
        px.sin() / px
    }
}

/// Design a band-pass kernel, selecting the window by name (`"hann"` or `"hamming"`).
pub fn design_bandpass_kernel(
    sample_rate: u32,
    f_lo: f64,
    f_hi: f64,
    numtaps: usize,
    window: &str,
) -> Result<FirKernel> {
    let window: Window = window.parse()?;
    FirKernel::bandpass(sample_rate, f_lo, f_hi, numtaps, window)
}

/// Convolve one block, carrying `tail` in and returning the next tail. No renormalization.
///
/// `tail` of `None` means the block starts from silence.
pub fn apply_bandpass_raw(
    samples: &[f32],
    kernel: &FirKernel,
    tail: Option<&[f64]>,
) -> Result<(Vec<f64>, Vec<f64>)> {
    match tail {
        Some(tail) if tail.len() != kernel.tail_len() => Err(Error::InvalidFilterSpec(format!(
            "tail state has {} samples, kernel needs {}",
            tail.len(),
            kernel.tail_len()
        ))),
        Some(tail) => Ok(convolve_with_tail(samples, kernel, tail)),
        None => Ok(convolve_with_tail(samples, kernel, &[])),
    }
}

/// Filter one block and renormalize it to unit peak.
///
/// Returns the filtered block (same length as `samples`) and the tail for the
/// next contiguous block.
pub fn apply_bandpass(
    samples: &[f32],
    kernel: &FirKernel,
    tail: Option<&[f64]>,
) -> Result<(Vec<f32>, Vec<f64>)> {
    let (raw, next_tail) = apply_bandpass_raw(samples, kernel, tail)?;
    Ok((normalize_peak(&raw), next_tail))
}

/// Streaming band-pass that owns its kernel and tail across contiguous blocks.
#[derive(Debug, Clone)]
pub struct BandPass {
    kernel: FirKernel,
    tail: Vec<f64>,
}

impl BandPass {
    pub fn new(kernel: FirKernel) -> Self {
        let tail = vec![0.0; kernel.tail_len()];
        Self { kernel, tail }
    }

    pub fn kernel(&self) -> &FirKernel {
        &self.kernel
    }

    /// Filter the next block. Output is peak-normalized per call.
    pub fn process(&mut self, block: &[f32]) -> Vec<f32> {
        let (raw, next_tail) = convolve_with_tail(block, &self.kernel, &self.tail);
        self.tail = next_tail;
        normalize_peak(&raw)
    }

    /// Clear the carried tail.
    pub fn reset(&mut self) {
        self.tail.iter_mut().for_each(|z| *z = 0.0);
    }
}

/// Full convolution plus overlap-add of `tail` (empty or kernel-length), split at `len(samples)`.
fn convolve_with_tail(samples: &[f32], kernel: &FirKernel, tail: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let taps = kernel.taps();
    let mut full = vec![0.0f64; samples.len() + kernel.tail_len()];
    for (i, &x) in samples.iter().enumerate() {
        let x = x as f64;
        for (j, &h) in taps.iter().enumerate() {
            full[i + j] += x * h;
        }
    }
    for (y, &z) in full.iter_mut().zip(tail) {
        *y += z;
    }
    let next_tail = full.split_off(samples.len());
    (full, next_tail)
}

/// Divide by the block's own peak magnitude; an all-zero block stays zero.
fn normalize_peak(raw: &[f64]) -> Vec<f32> {
    let peak = raw.iter().fold(0.0f64, |acc, &y| acc.max(y.abs()));
    if peak > 0.0 {
        raw.iter().map(|&y| (y / peak) as f32).collect()
    } else {
        vec![0.0; raw.len()]
    }
}
