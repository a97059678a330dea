/*
Grid Matrices
=============

A grid is a measure x beat matrix. Row `m` is measure `m`, column `b` is the
beat within that measure:

             beat 0  beat 1  beat 2  beat 3
    meas 0 [   x       .       x       .   ]
    meas 1 [   x       x       x       .   ]
    meas 2 [   x       .       x       .   ]
    meas 3 [   x       x       x       .   ]

Instruments carry two of these:
- an enable matrix (`Grid<bool>`) marking trigger cells
- an optional override matrix (`Grid<Option<Override>>`) of the same shape

Cells are stored row-major in a single Vec of exactly `measures * beats`
entries. Every constructor, deserialization included, checks that count.
*/

use crate::error::{Error, Result};
use crate::voices::Override;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A rectangular measure x beat matrix.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawGrid<T>"))]
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    measures: usize,
    beats: usize,
    cells: Vec<T>,
}

/// Unchecked serialized form of [`Grid`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawGrid<T> {
    measures: usize,
    beats: usize,
    cells: Vec<T>,
}

#[cfg(feature = "serde")]
impl<T> TryFrom<RawGrid<T>> for Grid<T> {
    type Error = Error;

    fn try_from(raw: RawGrid<T>) -> Result<Self> {
        let expected = raw.measures.checked_mul(raw.beats);
        if expected != Some(raw.cells.len()) {
            return Err(Error::Configuration(format!(
                "grid of {} measures x {} beats cannot hold {} cells",
                raw.measures,
                raw.beats,
                raw.cells.len()
            )));
        }
        Ok(Self {
            measures: raw.measures,
            beats: raw.beats,
            cells: raw.cells,
        })
    }
}

/// Trigger matrix for one instrument.
pub type EnableGrid = Grid<bool>;

/// Per-cell parameter overrides; `None` means "use the generator's defaults".
pub type OverrideGrid = Grid<Option<Override>>;

impl<T: Clone> Grid<T> {
    /// A `measures x beats` grid with every cell set to `value`.
    pub fn filled(measures: usize, beats: usize, value: T) -> Self {
        Self {
            measures,
            beats,
            cells: vec![value; measures * beats],
        }
    }
}

impl<T> Grid<T> {
    /// Build a grid from nested rows. Every row must have the same length.
    pub fn from_rows<R, I>(name: &str, rows: R) -> Result<Self>
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = T>,
    {
        let mut cells = Vec::new();
        let mut measures = 0;
        let mut beats = None;

        for row in rows {
            let before = cells.len();
            cells.extend(row);
            let width = cells.len() - before;

            match beats {
                None => beats = Some(width),
                Some(expected) if expected != width => {
                    return Err(Error::RaggedRows {
                        name: name.to_string(),
                        row: measures,
                        expected_cols: expected,
                        cols: width,
                    });
                }
                Some(_) => {}
            }
            measures += 1;
        }

        Ok(Self {
            measures,
            beats: beats.unwrap_or(0),
            cells,
        })
    }

    pub fn measures(&self) -> usize {
        self.measures
    }

    pub fn beats(&self) -> usize {
        self.beats
    }

    /// `(measures, beats)`
    pub fn shape(&self) -> (usize, usize) {
        (self.measures, self.beats)
    }

    pub fn get(&self, measure: usize, beat: usize) -> Option<&T> {
        if measure < self.measures && beat < self.beats {
            self.cells.get(measure * self.beats + beat)
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, measure: usize, beat: usize) -> Option<&mut T> {
        if measure < self.measures && beat < self.beats {
            self.cells.get_mut(measure * self.beats + beat)
        } else {
            None
        }
    }

    /// Overwrite one cell. Returns the previous value, or `None` when out of range.
    pub fn set(&mut self, measure: usize, beat: usize, value: T) -> Option<T> {
        self.get_mut(measure, beat)
            .map(|cell| std::mem::replace(cell, value))
    }

    /// Iterate `(measure, beat, &cell)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> + '_ {
        let beats = self.beats.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (i / beats, i % beats, cell))
    }

    /// Fail unless this grid is `measures x beats`.
    pub fn expect_shape(&self, name: &str, measures: usize, beats: usize) -> Result<()> {
        if self.shape() == (measures, beats) {
            Ok(())
        } else {
            Err(Error::ShapeMismatch {
                name: name.to_string(),
                expected_rows: measures,
                expected_cols: beats,
                rows: self.measures,
                cols: self.beats,
            })
        }
    }
}

impl EnableGrid {
    /// Parse rows of `0`/`1` flags, e.g. `[[1, 0, 1, 0], ...]`. Any non-zero value enables.
    pub fn from_flags<R, I>(name: &str, rows: R) -> Result<Self>
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = u8>,
    {
        Self::from_rows(
            name,
            rows.into_iter()
                .map(|row| row.into_iter().map(|flag| flag != 0).collect::<Vec<_>>()),
        )
    }

    /// Number of triggered cells.
    pub fn count_enabled(&self) -> usize {
        self.cells.iter().filter(|&&on| on).count()
    }
}
