/*
Grid Compiler
=============

Flattens every instrument's enable matrix into per-beat buckets:

    bucket[measure * beats_per_meas + beat] += (generator, override cell)

Instruments are visited in registry order, and cells in row-major order, so
within a bucket events appear in registry order. That order decides the
summation order in the renderer but, since mixing is addition, not the result.

Example (4 beats per measure, two measures):

    kick   [1 0 1 0]   snare [0 1 0 1]
           [1 0 1 0]         [0 1 0 0]

    bucket  0: kick      bucket 4: kick
    bucket  1: snare     bucket 5: snare
    bucket  2: kick      bucket 6: kick
    bucket  3: snare     bucket 7: -
*/

use tracing::{debug, info};

use super::registry::Registry;
use crate::voices::{Generator, Override};

/// One scheduled hit: which generator to call on which beat, and with what override.
#[derive(Debug, Clone, Copy)]
pub struct Event<'a> {
    pub beat_index: usize,
    pub instrument: &'a str,
    pub generator: &'a dyn Generator,
    pub param: Option<&'a Override>,
}

/// Events bucketed by absolute beat index.
#[derive(Debug, Clone)]
pub struct CompiledGrid<'a> {
    buckets: Vec<Vec<Event<'a>>>,
}

impl<'a> CompiledGrid<'a> {
    /// Number of beats in the window (including empty ones).
    pub fn beats(&self) -> usize {
        self.buckets.len()
    }

    /// Events starting on `beat_index`, in registry order.
    pub fn bucket(&self, beat_index: usize) -> &[Event<'a>] {
        self.buckets
            .get(beat_index)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every event in beat order.
    pub fn events(&self) -> impl Iterator<Item = &Event<'a>> {
        self.buckets.iter().flatten()
    }

    pub fn event_count(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }
}

/// Walk every instrument's enable matrix and bucket its hits by beat.
pub fn compile(registry: &Registry) -> CompiledGrid<'_> {
    let timing = registry.timing();
    let mut buckets: Vec<Vec<Event<'_>>> = vec![Vec::new(); timing.window_size_beats()];

    for instrument in registry.iter() {
        for (measure, beat, &enabled) in instrument.enable().iter() {
            if !enabled {
                continue;
            }

            let beat_index = timing.beat_index(measure, beat);
            debug!(
                instrument = instrument.name(),
                measure, beat, beat_index, "scheduled hit"
            );
            buckets[beat_index].push(Event {
                beat_index,
                instrument: instrument.name(),
                generator: instrument.generator(),
                param: instrument.override_at(measure, beat),
            });
        }
    }

    let compiled = CompiledGrid { buckets };
    info!(
        instruments = registry.len(),
        beats = compiled.beats(),
        events = compiled.event_count(),
        "compiled grid"
    );
    compiled
}
