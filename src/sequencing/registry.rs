/*
Instrument Registry
===================

The registry is the whole static configuration of a render pass: validated
timing plus an ordered list of instruments. It is built once and passed by
reference to the compiler and the renderer.

Each instrument is a name, a generator, an enable matrix, and optionally an
override matrix. Insertion checks, in order:

  1. the name is not already taken
  2. the enable matrix is window_size_meass x beats_per_meas
  3. the override matrix (if any) has the enable matrix's shape
  4. every override cell names a parameter the generator has

Insertion order is kept: it is the order instruments appear within a beat.
*/

use tracing::debug;

use super::grid::{EnableGrid, OverrideGrid};
use super::timing::{Tempo, Timing};
use crate::error::{Error, Result};
use crate::voices::{self, Generator, Override};

/// One named lane of the grid.
#[derive(Debug)]
pub struct Instrument {
    name: String,
    generator: Box<dyn Generator>,
    enable: EnableGrid,
    overrides: Option<OverrideGrid>,
}

impl Instrument {
    pub fn new(name: impl Into<String>, generator: impl Generator + 'static, enable: EnableGrid) -> Self {
        Self {
            name: name.into(),
            generator: Box::new(generator),
            enable,
            overrides: None,
        }
    }

    /// Attach a per-cell override matrix. Must match the enable matrix's shape
    /// and only use parameters the generator has.
    pub fn with_overrides(mut self, overrides: OverrideGrid) -> Result<Self> {
        let (measures, beats) = self.enable.shape();
        overrides.expect_shape(&self.name, measures, beats)?;

        for (measure, beat, cell) in overrides.iter() {
            if let Some(param) = cell {
                if !self.generator.accepts(param) {
                    return Err(Error::UnsupportedOverride {
                        instrument: self.name.clone(),
                        kind: param.kind(),
                        measure,
                        beat,
                    });
                }
            }
        }

        self.overrides = Some(overrides);
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn generator(&self) -> &dyn Generator {
        self.generator.as_ref()
    }

    pub fn enable(&self) -> &EnableGrid {
        &self.enable
    }

    pub fn overrides(&self) -> Option<&OverrideGrid> {
        self.overrides.as_ref()
    }

    pub fn is_enabled(&self, measure: usize, beat: usize) -> bool {
        self.enable.get(measure, beat).copied().unwrap_or(false)
    }

    /// The override for a cell; `None` when the cell has none or there is no matrix.
    pub fn override_at(&self, measure: usize, beat: usize) -> Option<&Override> {
        self.overrides
            .as_ref()
            .and_then(|grid| grid.get(measure, beat))
            .and_then(Option::as_ref)
    }
}

/// Validated timing plus the instruments to render, in insertion order.
#[derive(Debug)]
pub struct Registry {
    timing: Timing,
    instruments: Vec<Instrument>,
}

impl Registry {
    pub fn new(timing: Timing) -> Self {
        Self {
            timing,
            instruments: Vec::new(),
        }
    }

    /// Validate `tempo` and start an empty registry.
    pub fn with_tempo(tempo: Tempo) -> Result<Self> {
        Ok(Self::new(tempo.timing()?))
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    /// Add an instrument after checking its name and matrix shapes.
    pub fn insert(&mut self, instrument: Instrument) -> Result<()> {
        if self.get(&instrument.name).is_some() {
            return Err(Error::DuplicateInstrument(instrument.name));
        }

        instrument.enable.expect_shape(
            &instrument.name,
            self.timing.window_size_meass(),
            self.timing.beats_per_meas(),
        )?;

        debug!(
            instrument = %instrument.name,
            hits = instrument.enable.count_enabled(),
            overrides = instrument.overrides.is_some(),
            "registered instrument"
        );
        self.instruments.push(instrument);
        Ok(())
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, instrument: Instrument) -> Result<Self> {
        self.insert(instrument)?;
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&Instrument> {
        self.instruments.iter().find(|i| i.name == name)
    }

    /// Remove an instrument by name, returning it.
    pub fn remove(&mut self, name: &str) -> Option<Instrument> {
        let index = self.instruments.iter().position(|i| i.name == name)?;
        Some(self.instruments.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Instrument> {
        self.instruments.iter()
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    /// The built-in demo: tone, metronome and kick over four 4/4 measures at
    /// 44.1 kHz, 200 bpm.
    pub fn demo() -> Result<Self> {
        let timing = Tempo::default().timing()?;

        let tone = EnableGrid::from_flags(
            "tone",
            [[1, 0, 1, 0], [0, 0, 0, 0], [1, 0, 1, 0], [0, 0, 0, 0]],
        )?;
        let metronome = EnableGrid::from_flags(
            "metronome",
            [[1, 0, 1, 0], [1, 1, 1, 0], [1, 0, 1, 0], [1, 1, 1, 0]],
        )?;
        let kick = EnableGrid::from_flags(
            "kick",
            [[0, 1, 0, 0], [1, 1, 0, 0], [0, 1, 0, 0], [1, 1, 0, 0]],
        )?;

        Registry::new(timing)
            .with(Instrument::new("tone", voices::tone(), tone))?
            .with(Instrument::new("metronome", voices::metronome(), metronome))?
            .with(Instrument::new("kick", voices::kick(), kick))
    }
}
