/*
Song Files
==========

A song file is TOML: one `[tempo]` table and any number of `[[instrument]]`
entries, in the order they should appear within a beat.

    [tempo]
    sample_rate_hz = 44100
    beats_per_min = 200.0
    beats_per_meas = 4
    window_size_meass = 4

    [[instrument]]
    name = "kick"
    voice = "kick"                                   preset by name
    enable = [[0, 1, 0, 0], [1, 1, 0, 0], ...]       0/1 or true/false
    overrides = [["none", { frequency = 60.0 }, "none", "none"], ...]

    [[instrument]]
    name = "ping"
    voice = { type = "tone", freq = 660.0, duration = { seconds = 0.05 } }
    enable = [...]

Missing tempo fields fall back to 44.1 kHz, 200 bpm, 4/4, four measures.
Missing voice parameters fall back to that voice's defaults. An override cell
is either `"none"` (or `"-"`) or a one-key table naming the parameter.

All validation happens in `into_registry`, through the same checks as
building a `Registry` by hand.
*/

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::dsp::{Drum, Length, Metallic, NoiseBurst, Tone, Window};
use crate::error::{Error, Result};
use crate::sequencing::grid::{EnableGrid, Grid, OverrideGrid};
use crate::sequencing::registry::{Instrument, Registry};
use crate::sequencing::timing::{Tempo, Timing};
use crate::voices::{self, Cymbal, Generator, Override, Silence};

/// A parsed song file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongFile {
    #[serde(default)]
    pub tempo: Tempo,
    #[serde(default, rename = "instrument")]
    pub instruments: Vec<InstrumentSpec>,
}

/// One `[[instrument]]` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentSpec {
    pub name: String,
    pub voice: VoiceSpec,
    pub enable: Vec<Vec<Flag>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<Vec<Vec<OverrideCell>>>,
}

/// A preset name or a parameter table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VoiceSpec {
    Preset(String),
    Custom(Voice),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Voice {
    Tone(Tone),
    Drum(Drum),
    Metallic(Metallic),
    Noise(NoiseBurst),
    Cymbal(CymbalSpec),
    Silence,
}

/// Band-passed metallic noise, designed at the song's sample rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CymbalSpec {
    pub f_lo: f64,
    pub f_hi: f64,
    pub numtaps: usize,
    pub window: Window,
    pub gain: f32,
    pub duration: Length,
}

impl Default for CymbalSpec {
    fn default() -> Self {
        Self {
            f_lo: 400.0,
            f_hi: 10_000.0,
            numtaps: 257,
            window: Window::Hann,
            gain: 0.25,
            duration: Length::Beats(1.0),
        }
    }
}

/// An enable cell: `0`/`1` or `false`/`true`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Flag {
    Bool(bool),
    Int(i64),
}

/// An override cell: `"none"`/`"-"` or a parameter table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OverrideCell {
    Keyword(String),
    Param(Override),
}

impl SongFile {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let song = Self::from_toml_str(&fs::read_to_string(path)?)?;
        info!(
            path = %path.display(),
            instruments = song.instruments.len(),
            "loaded song file"
        );
        Ok(song)
    }

    /// The built-in demo pattern as a song file.
    pub fn demo() -> Self {
        let rows = |r: [[i64; 4]; 4]| -> Vec<Vec<Flag>> {
            r.iter()
                .map(|row| row.iter().map(|&v| Flag::Int(v)).collect())
                .collect()
        };
        let entry = |name: &str, voice: &str, enable| InstrumentSpec {
            name: name.into(),
            voice: VoiceSpec::Preset(voice.into()),
            enable,
            overrides: None,
        };

        Self {
            tempo: Tempo::default(),
            instruments: vec![
                entry(
                    "tone",
                    "tone",
                    rows([[1, 0, 1, 0], [0, 0, 0, 0], [1, 0, 1, 0], [0, 0, 0, 0]]),
                ),
                entry(
                    "metronome",
                    "metronome",
                    rows([[1, 0, 1, 0], [1, 1, 1, 0], [1, 0, 1, 0], [1, 1, 1, 0]]),
                ),
                entry(
                    "kick",
                    "kick",
                    rows([[0, 1, 0, 0], [1, 1, 0, 0], [0, 1, 0, 0], [1, 1, 0, 0]]),
                ),
            ],
        }
    }

    /// Validate everything and build the registry.
    pub fn into_registry(&self) -> Result<Registry> {
        let timing = self.tempo.timing()?;
        let mut registry = Registry::new(timing);

        for spec in &self.instruments {
            let generator = spec.voice.build(&timing)?;
            let mut instrument = Instrument::new(spec.name.clone(), generator, spec.enable_grid()?);
            if let Some(grid) = spec.override_grid()? {
                instrument = instrument.with_overrides(grid)?;
            }
            registry.insert(instrument)?;
        }
        Ok(registry)
    }
}

impl InstrumentSpec {
    fn enable_grid(&self) -> Result<EnableGrid> {
        let rows = self
            .enable
            .iter()
            .map(|row| row.iter().map(|flag| flag.as_bool(&self.name)).collect())
            .collect::<Result<Vec<Vec<bool>>>>()?;
        Grid::from_rows(&self.name, rows)
    }

    fn override_grid(&self) -> Result<Option<OverrideGrid>> {
        let Some(rows) = &self.overrides else {
            return Ok(None);
        };
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|cell| cell.resolve(&self.name)).collect())
            .collect::<Result<Vec<Vec<Option<Override>>>>>()?;
        Grid::from_rows(&self.name, rows).map(Some)
    }
}

impl VoiceSpec {
    fn build(&self, timing: &Timing) -> Result<Box<dyn Generator>> {
        match self {
            VoiceSpec::Preset(name) => preset(name, timing),
            VoiceSpec::Custom(voice) => voice.build(timing),
        }
    }
}

impl Voice {
    fn build(&self, timing: &Timing) -> Result<Box<dyn Generator>> {
        let generator: Box<dyn Generator> = match self {
            Voice::Tone(tone) => Box::new(*tone),
            Voice::Drum(drum) => Box::new(*drum),
            Voice::Metallic(metallic) => Box::new(*metallic),
            Voice::Noise(noise) => Box::new(*noise),
            Voice::Cymbal(spec) => {
                let mut cymbal = Cymbal::new(
                    timing.sample_rate_hz(),
                    spec.f_lo,
                    spec.f_hi,
                    spec.numtaps,
                    spec.window,
                    spec.gain,
                )?;
                cymbal.duration = spec.duration;
                Box::new(cymbal)
            }
            Voice::Silence => Box::new(Silence),
        };
        Ok(generator)
    }
}

fn preset(name: &str, timing: &Timing) -> Result<Box<dyn Generator>> {
    let generator: Box<dyn Generator> = match name {
        "tone" => Box::new(voices::tone()),
        "metronome" => Box::new(voices::metronome()),
        "kick" => Box::new(voices::kick()),
        "snare" => Box::new(voices::snare()),
        "hihat" | "hat" => Box::new(voices::hihat()),
        "cymbal" => Box::new(voices::cymbal(timing)?),
        "silence" => Box::new(Silence),
        other => {
            return Err(Error::Configuration(format!(
                "unknown voice preset '{other}'"
            )))
        }
    };
    Ok(generator)
}

impl Flag {
    fn as_bool(self, instrument: &str) -> Result<bool> {
        match self {
            Flag::Bool(on) => Ok(on),
            Flag::Int(0) => Ok(false),
            Flag::Int(1) => Ok(true),
            Flag::Int(other) => Err(Error::Configuration(format!(
                "instrument '{instrument}': enable cells must be 0 or 1, got {other}"
            ))),
        }
    }
}

impl OverrideCell {
    fn resolve(&self, instrument: &str) -> Result<Option<Override>> {
        match self {
            OverrideCell::Param(param) => Ok(Some(*param)),
            OverrideCell::Keyword(word) if word == "none" || word == "-" => Ok(None),
            OverrideCell::Keyword(word) => Err(Error::Configuration(format!(
                "instrument '{instrument}': override cell '{word}' is neither \"none\" nor a parameter table"
            ))),
        }
    }
}
