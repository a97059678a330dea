use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Taper applied to the ideal band-pass response before normalization.
///
/// Both are raised cosines over `numtaps` points, written around the kernel
/// center `n = i - (numtaps - 1) / 2` so `w[i] == w[numtaps - 1 - i]` exactly:
///
///   hann     w = 0.5  + 0.5  cos(2π n / (numtaps - 1))
///   hamming  w = 0.54 + 0.46 cos(2π n / (numtaps - 1))
///
/// Hann falls to zero at the edges (faster sidelobe roll-off); Hamming keeps a
/// small pedestal (lower first sidelobe).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Window {
    #[default]
    Hann,
    Hamming,
}

impl Window {
    /// Window value at centered tap position `n` of a `numtaps`-long kernel.
    ///
    /// A kernel of zero or one tap has no taper: the value is 1.
    pub fn at(self, n: f64, numtaps: usize) -> f64 {
        if numtaps <= 1 {
            return 1.0;
        }
        let c = (TAU * n / (numtaps - 1) as f64).cos();
        match self {
            Window::Hann => 0.5 + 0.5 * c,
            Window::Hamming => 0.54 + 0.46 * c,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Window::Hann => "hann",
            Window::Hamming => "hamming",
        }
    }
}

impl FromStr for Window {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hann" => Ok(Window::Hann),
            "hamming" => Ok(Window::Hamming),
            other => Err(Error::InvalidFilterSpec(format!(
                "window must be 'hann' or 'hamming', got '{other}'"
            ))),
        }
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
