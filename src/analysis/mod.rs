//! Frequency-domain views of kernels and rendered blocks.
//!
//! Offline inspection only: nothing in the render path calls into here.

use std::f64::consts::PI;

use rustfft::{num_complex::Complex, FftPlanner};

use crate::dsp::FirKernel;

/// One analysis bin: center frequency in Hz and linear magnitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub freq_hz: f64,
    pub magnitude: f64,
}

impl Bin {
    /// Magnitude in dB, floored at -120.
    pub fn db(&self) -> f64 {
        to_db(self.magnitude)
    }
}

pub fn to_db(magnitude: f64) -> f64 {
    (20.0 * magnitude.max(1e-6).log10()).max(-120.0)
}

/// Magnitude of the kernel's frequency response on `fft_len / 2 + 1` bins
/// from DC to Nyquist. `fft_len` is raised to the kernel length if shorter.
pub fn magnitude_response(kernel: &FirKernel, fft_len: usize, sample_rate: u32) -> Vec<Bin> {
    let n = fft_len.max(kernel.len()).max(1);
    let mut buffer: Vec<Complex<f64>> = kernel
        .taps()
        .iter()
        .map(|&t| Complex::new(t, 0.0))
        .chain(std::iter::repeat(Complex::new(0.0, 0.0)))
        .take(n)
        .collect();

    FftPlanner::new().plan_fft_forward(n).process(&mut buffer);
    half_spectrum(&buffer, sample_rate, 1.0)
}

/// Hann-windowed magnitude spectrum of a block, scaled so a full-scale sine
/// that lands on a bin reads close to 1.
pub fn spectrum(samples: &[f32], sample_rate: u32) -> Vec<Bin> {
    let n = samples.len();
    if n == 0 {
        return Vec::new();
    }

    let window = |i: usize| {
        if n > 1 {
            0.5 * (1.0 - (2.0 * PI * i as f64 / (n - 1) as f64).cos())
        } else {
            1.0
        }
    };
    let coherent_gain: f64 = (0..n).map(window).sum::<f64>();

    let mut buffer: Vec<Complex<f64>> = samples
        .iter()
        .enumerate()
        .map(|(i, &s)| Complex::new(s as f64 * window(i), 0.0))
        .collect();

    FftPlanner::new().plan_fft_forward(n).process(&mut buffer);
    half_spectrum(&buffer, sample_rate, 2.0 / coherent_gain)
}

/// Exact response magnitude of the kernel at one frequency.
pub fn gain_at(kernel: &FirKernel, freq_hz: f64, sample_rate: u32) -> f64 {
    let w = 2.0 * PI * freq_hz / sample_rate as f64;
    let (re, im) = kernel
        .taps()
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(re, im), (i, &t)| {
            let phase = w * i as f64;
            (re + t * phase.cos(), im - t * phase.sin())
        });
    re.hypot(im)
}

fn half_spectrum(buffer: &[Complex<f64>], sample_rate: u32, scale: f64) -> Vec<Bin> {
    let n = buffer.len();
    let bin_hz = sample_rate as f64 / n as f64;
    buffer[..n / 2 + 1]
        .iter()
        .enumerate()
        .map(|(k, c)| Bin {
            freq_hz: k as f64 * bin_hz,
            magnitude: c.norm() * scale,
        })
        .collect()
}
