use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Timing Model
============

Everything downstream works in integer samples. The only place where
floating-point tempo arithmetic happens is here:

    beats_per_sec    = bpm / 60
    beat_len_sec     = 1 / beats_per_sec
    samples_per_beat = sample_rate * 60 / bpm        (must be an integer)
    window_beats     = beats_per_meas * window_meass

Example: 44100 Hz at 200 bpm gives 44100 * 60 / 200 = 13230 samples per beat.
At 120 bpm the same rate gives 22050. At 44100 Hz and 140 bpm the result is
18900, also exact, but 44100 Hz at 128 bpm gives 20671.875 and is rejected:
fractional-sample beats would drift against the grid.
*/

/// Tempo, meter and window size for one render pass.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tempo {
    pub sample_rate_hz: u32,
    pub beats_per_min: f64,
    pub beats_per_meas: usize,
    pub window_size_meass: usize,
}

impl Tempo {
    pub fn new(
        sample_rate_hz: u32,
        beats_per_min: f64,
        beats_per_meas: usize,
        window_size_meass: usize,
    ) -> Self {
        Self {
            sample_rate_hz,
            beats_per_min,
            beats_per_meas,
            window_size_meass,
        }
    }

    /// Validate the tempo and derive its sample-domain constants.
    pub fn timing(&self) -> Result<Timing> {
        Timing::new(*self)
    }
}

impl Default for Tempo {
    /// 44.1 kHz, 200 bpm, 4/4, four measures.
    fn default() -> Self {
        Self::new(44_100, 200.0, 4, 4)
    }
}

/// Validated sample-domain constants derived from a [`Tempo`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    tempo: Tempo,
    samples_per_beat: usize,
    window_size_beats: usize,
    window_len_samples: usize,
}

impl Timing {
    pub fn new(tempo: Tempo) -> Result<Self> {
        if tempo.sample_rate_hz == 0 {
            return Err(Error::Configuration("sample rate must be positive".into()));
        }
        if !(tempo.beats_per_min.is_finite() && tempo.beats_per_min > 0.0) {
            return Err(Error::Configuration(format!(
                "beats per minute must be positive, got {}",
                tempo.beats_per_min
            )));
        }
        if tempo.beats_per_meas == 0 || tempo.window_size_meass == 0 {
            return Err(Error::Configuration(format!(
                "window must contain at least one beat, got {} beats x {} measures",
                tempo.beats_per_meas, tempo.window_size_meass
            )));
        }

        let exact = tempo.sample_rate_hz as f64 * 60.0 / tempo.beats_per_min;
        if exact.fract() != 0.0 {
            return Err(Error::Configuration(format!(
                "{} Hz at {} bpm gives {} samples per beat; beats must land on whole samples",
                tempo.sample_rate_hz, tempo.beats_per_min, exact
            )));
        }

        if exact > usize::MAX as f64 {
            return Err(Error::Configuration(format!(
                "{} bpm gives {exact} samples per beat, more than can be addressed",
                tempo.beats_per_min
            )));
        }
        let samples_per_beat = exact as usize;

        // The window is one Vec<f32>, which cannot exceed isize::MAX bytes
        let max_window = isize::MAX as usize / std::mem::size_of::<f32>();
        let window_size_beats = tempo.beats_per_meas.checked_mul(tempo.window_size_meass);
        let window_len_samples = window_size_beats
            .and_then(|beats| beats.checked_mul(samples_per_beat))
            .filter(|&len| len <= max_window);
        let (Some(window_size_beats), Some(window_len_samples)) =
            (window_size_beats, window_len_samples)
        else {
            return Err(Error::Configuration(format!(
                "{} measures of {} beats at {samples_per_beat} samples per beat is too long to render",
                tempo.window_size_meass, tempo.beats_per_meas
            )));
        };

        Ok(Self {
            tempo,
            samples_per_beat,
            window_size_beats,
            window_len_samples,
        })
    }

    pub fn tempo(&self) -> &Tempo {
        &self.tempo
    }

    pub fn sample_rate_hz(&self) -> u32 {
        self.tempo.sample_rate_hz
    }

    pub fn beats_per_sec(&self) -> f64 {
        self.tempo.beats_per_min / 60.0
    }

    pub fn beat_len_sec(&self) -> f64 {
        1.0 / self.beats_per_sec()
    }

    pub fn samples_per_beat(&self) -> usize {
        self.samples_per_beat
    }

    pub fn beats_per_meas(&self) -> usize {
        self.tempo.beats_per_meas
    }

    pub fn window_size_meass(&self) -> usize {
        self.tempo.window_size_meass
    }

    pub fn window_size_beats(&self) -> usize {
        self.window_size_beats
    }

    /// Length of the rendered window in samples.
    pub fn window_len_samples(&self) -> usize {
        self.window_len_samples
    }

    /// Absolute beat index of a grid cell.
    pub fn beat_index(&self, measure: usize, beat: usize) -> usize {
        measure * self.tempo.beats_per_meas + beat
    }

    /// Sample offset at which an absolute beat starts. Saturates for beats
    /// past the window, so the offset always lands at or after its end.
    pub fn beat_offset(&self, beat_index: usize) -> usize {
        beat_index.saturating_mul(self.samples_per_beat)
    }
}
