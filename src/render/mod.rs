//! Renderer: turns a compiled grid into one finished sample buffer.
//!
//! For each beat in increasing order, every event in that beat's bucket is
//! generated (with its override, if any) and added into the window at
//! `beat_index * samples_per_beat`. The pass is synchronous and runs to
//! completion; the buffer is owned here until it is handed back as a
//! [`Mixdown`].

pub mod mix;

use tracing::{debug, info, warn};

use crate::dsp::{self, RenderCtx};
use crate::sequencing::compiler::{compile, CompiledGrid};
use crate::sequencing::registry::Registry;
use crate::sequencing::timing::Timing;

/// The rendered window: mono f32 samples at the tempo's sample rate.
///
/// Values are not clamped. See [`Mixdown::is_clipping`].
#[derive(Debug, Clone, PartialEq)]
pub struct Mixdown {
    pub samples: Vec<f32>,
    pub sample_rate_hz: u32,
}

impl Mixdown {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn peak(&self) -> f32 {
        dsp::peak(&self.samples)
    }

    /// True when any sample lies outside [-1, 1].
    pub fn is_clipping(&self) -> bool {
        self.peak() > 1.0
    }

    pub fn duration_sec(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate_hz as f64
    }

    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }
}

/// Renders a compiled grid against its timing.
pub struct Renderer<'a> {
    grid: CompiledGrid<'a>,
    timing: Timing,
    ctx: RenderCtx,
}

impl<'a> Renderer<'a> {
    /// Compile `registry` and prepare to render it.
    pub fn new(registry: &'a Registry) -> Self {
        Self::from_compiled(compile(registry), *registry.timing())
    }

    pub fn from_compiled(grid: CompiledGrid<'a>, timing: Timing) -> Self {
        Self {
            ctx: RenderCtx::from_timing(&timing),
            grid,
            timing,
        }
    }

    pub fn grid(&self) -> &CompiledGrid<'a> {
        &self.grid
    }

    /// Render the whole window.
    pub fn render(&self) -> Mixdown {
        let mut window = vec![0.0f32; self.timing.window_len_samples()];

        for beat_index in 0..self.grid.beats() {
            let offset = self.timing.beat_offset(beat_index);

            for event in self.grid.bucket(beat_index) {
                let hit = event.generator.generate(&self.ctx, event.param);
                let added = mix::mix_at(&mut window, offset, &hit);
                debug!(
                    beat_index,
                    instrument = event.instrument,
                    offset,
                    len = hit.len(),
                    added,
                    "mixed hit"
                );
            }
        }

        let mixdown = Mixdown {
            samples: window,
            sample_rate_hz: self.timing.sample_rate_hz(),
        };
        report(&mixdown, self.grid.event_count());
        mixdown
    }

    /// Render only samples `[start, start + len)` of the window, clipped to its end.
    ///
    /// Consecutive blocks concatenate to exactly what [`render`](Self::render)
    /// produces. Every hit overlapping the block is regenerated, so rendering
    /// many small blocks costs more than one full pass.
    pub fn render_block(&self, start: usize, len: usize) -> Vec<f32> {
        let window_len = self.timing.window_len_samples();
        let start = start.min(window_len);
        let len = len.min(window_len - start);
        let mut block = vec![0.0f32; len];
        if len == 0 {
            return block;
        }

        for beat_index in 0..self.grid.beats() {
            let offset = self.timing.beat_offset(beat_index);
            if offset >= start + len {
                break;
            }

            for event in self.grid.bucket(beat_index) {
                let hit = event.generator.generate(&self.ctx, event.param);
                mix::mix_into_block(&mut block, start, offset, &hit);
            }
        }
        block
    }
}

/// Compile and render `registry` in one call.
pub fn render(registry: &Registry) -> Mixdown {
    Renderer::new(registry).render()
}

fn report(mixdown: &Mixdown, events: usize) {
    let peak = mixdown.peak();
    info!(
        events,
        samples = mixdown.len(),
        seconds = mixdown.duration_sec(),
        peak,
        "rendered window"
    );
    if peak > 1.0 {
        warn!(peak, "mixdown exceeds full scale; samples are left unclamped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequencing::grid::EnableGrid;
    use crate::sequencing::registry::Instrument;
    use crate::sequencing::timing::Tempo;
    use crate::voices;

    fn single_hit_registry() -> Registry {
        let mut enable = EnableGrid::filled(4, 4, false);
        enable.set(0, 0, true);
        Registry::with_tempo(Tempo::default())
            .unwrap()
            .with(Instrument::new("metronome", voices::metronome(), enable))
            .unwrap()
    }

    #[test]
    fn test_window_length() {
        let mixdown = render(&Registry::demo().unwrap());

        assert_eq!(mixdown.len(), 211_680);
        assert_eq!(mixdown.sample_rate_hz, 44_100);
        assert!((mixdown.duration_sec() - 4.8).abs() < 1e-9);
    }

    #[test]
    fn test_single_hit_occupies_only_its_span() {
        let registry = single_hit_registry();
        let mixdown = render(&registry);
        let hit = voices::metronome().render(&RenderCtx::from_timing(registry.timing()));

        assert_eq!(hit.len(), 1323);
        assert_eq!(&mixdown.samples[..hit.len()], hit.as_slice());
        assert!(mixdown.samples[hit.len()..].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_empty_registry_is_silent() {
        let registry = Registry::with_tempo(Tempo::default()).unwrap();
        let mixdown = render(&registry);

        assert_eq!(mixdown.len(), 211_680);
        assert_eq!(mixdown.peak(), 0.0);
    }

    #[test]
    fn test_kick_clips_without_clamping() {
        // Default kick amplitude is 10, far beyond full scale
        let mut enable = EnableGrid::filled(4, 4, false);
        enable.set(0, 0, true);
        let registry = Registry::with_tempo(Tempo::default())
            .unwrap()
            .with(Instrument::new("kick", voices::kick(), enable))
            .unwrap();

        let mixdown = render(&registry);
        assert!(mixdown.is_clipping());
        assert!(mixdown.peak() > 5.0);
    }

    #[test]
    fn test_blocks_concatenate_to_full_render() {
        let registry = Registry::demo().unwrap();
        let renderer = Renderer::new(&registry);
        let full = renderer.render();

        let block = 13_230 * 3 + 17;
        let mut joined = Vec::with_capacity(full.len());
        let mut start = 0;
        while start < full.len() {
            joined.extend(renderer.render_block(start, block));
            start += block;
        }

        assert_eq!(joined, full.samples);
    }

    #[test]
    fn test_block_past_end_is_empty() {
        let registry = Registry::demo().unwrap();
        let renderer = Renderer::new(&registry);

        assert!(renderer.render_block(211_680, 64).is_empty());
        assert_eq!(renderer.render_block(211_670, 64).len(), 10);
    }
}
