use beatgrid::dsp::{Length, RenderCtx, Tone};
use beatgrid::sequencing::{EnableGrid, Grid, Instrument, OverrideGrid, Registry, Tempo};
use beatgrid::voices::{self, Generator, Override};
use beatgrid::{render, Renderer};

const SAMPLES_PER_BEAT: usize = 13_230;

fn single_cell(measure: usize, beat: usize) -> EnableGrid {
    let mut enable = EnableGrid::filled(4, 4, false);
    enable.set(measure, beat, true);
    enable
}

fn kit(order: &[&str]) -> Registry {
    let timing = Tempo::default().timing().unwrap();
    let mut registry = Registry::new(timing);

    for &name in order {
        let instrument = match name {
            "tone" => Instrument::new(
                "tone",
                voices::tone(),
                EnableGrid::from_flags("tone", [[1, 0, 1, 0], [0, 0, 0, 0], [1, 0, 1, 0], [0, 0, 0, 0]])
                    .unwrap(),
            ),
            "kick" => Instrument::new(
                "kick",
                voices::kick(),
                EnableGrid::from_flags("kick", [[0, 1, 0, 0], [1, 1, 0, 0], [0, 1, 0, 0], [1, 1, 0, 0]])
                    .unwrap(),
            ),
            "snare" => Instrument::new(
                "snare",
                voices::snare(),
                EnableGrid::from_flags("snare", [[0, 1, 0, 1]; 4]).unwrap(),
            ),
            "cymbal" => Instrument::new(
                "cymbal",
                voices::cymbal(&timing).unwrap(),
                EnableGrid::from_flags("cymbal", [[1, 0, 0, 0]; 4]).unwrap(),
            ),
            other => panic!("unknown instrument {other}"),
        };
        registry.insert(instrument).unwrap();
    }
    registry
}

#[test]
fn demo_window_has_expected_geometry() {
    let registry = Registry::demo().unwrap();
    assert_eq!(registry.timing().samples_per_beat(), SAMPLES_PER_BEAT);

    let mixdown = render(&registry);
    assert_eq!(mixdown.len(), 16 * SAMPLES_PER_BEAT);
    assert_eq!(mixdown.len(), 211_680);
}

#[test]
fn single_hit_lands_at_its_beat_offset() {
    let registry = Registry::with_tempo(Tempo::default())
        .unwrap()
        .with(Instrument::new("metronome", voices::metronome(), single_cell(2, 3)))
        .unwrap();

    let mixdown = render(&registry);
    let hit = voices::metronome().generate(&RenderCtx::from_timing(registry.timing()), None);
    let offset = (2 * 4 + 3) * SAMPLES_PER_BEAT;

    assert!(mixdown.samples[..offset].iter().all(|&s| s == 0.0));
    assert_eq!(&mixdown.samples[offset..offset + hit.len()], hit.as_slice());
    assert!(mixdown.samples[offset + hit.len()..].iter().all(|&s| s == 0.0));
}

#[test]
fn hit_past_window_end_is_truncated() {
    let long_tone = Tone::new(220.0, 0.5, Length::Beats(3.0));
    let registry = Registry::with_tempo(Tempo::default())
        .unwrap()
        .with(Instrument::new("long", long_tone, single_cell(3, 3)))
        .unwrap();

    let mixdown = render(&registry);
    let hit = long_tone.generate(&RenderCtx::from_timing(registry.timing()), None);
    let offset = 15 * SAMPLES_PER_BEAT;

    assert_eq!(mixdown.len(), 211_680);
    assert_eq!(hit.len(), 3 * SAMPLES_PER_BEAT);
    assert_eq!(&mixdown.samples[offset..], &hit[..SAMPLES_PER_BEAT]);
}

#[test]
fn instrument_order_does_not_change_the_mix() {
    let a = render(&kit(&["tone", "kick", "snare", "cymbal"]));
    let b = render(&kit(&["cymbal", "snare", "kick", "tone"]));
    let c = render(&kit(&["snare", "tone", "cymbal", "kick"]));

    for other in [&b, &c] {
        assert_eq!(a.len(), other.len());
        for (x, y) in a.samples.iter().zip(&other.samples) {
            assert!((x - y).abs() <= 1e-5 * x.abs().max(1.0), "{x} vs {y}");
        }
    }
}

#[test]
fn rendering_is_repeatable() {
    let registry = kit(&["tone", "kick", "snare", "cymbal"]);
    let renderer = Renderer::new(&registry);

    assert_eq!(renderer.render(), renderer.render());
}

#[test]
fn override_changes_only_its_cell() {
    let enable = EnableGrid::from_flags("kick", [[1, 0, 0, 0]; 4]).unwrap();
    let plain = Registry::with_tempo(Tempo::default())
        .unwrap()
        .with(Instrument::new("kick", voices::kick(), enable.clone()))
        .unwrap();

    let mut overrides: OverrideGrid = Grid::filled(4, 4, None);
    overrides.set(1, 0, Some(Override::Frequency(120.0)));
    let tweaked = Registry::with_tempo(Tempo::default())
        .unwrap()
        .with(
            Instrument::new("kick", voices::kick(), enable)
                .with_overrides(overrides)
                .unwrap(),
        )
        .unwrap();

    let a = render(&plain);
    let b = render(&tweaked);
    let measure = 4 * SAMPLES_PER_BEAT;

    assert_eq!(a.samples[..measure], b.samples[..measure]);
    assert_ne!(a.samples[measure..2 * measure], b.samples[measure..2 * measure]);
    assert_eq!(a.samples[2 * measure..], b.samples[2 * measure..]);
}

#[test]
fn overlapping_hits_sum_without_clamping() {
    let loud = Tone::new(440.0, 0.9, Length::Beats(1.0));
    let registry = Registry::with_tempo(Tempo::default())
        .unwrap()
        .with(Instrument::new("a", loud, single_cell(0, 0)))
        .unwrap()
        .with(Instrument::new("b", loud, single_cell(0, 0)))
        .unwrap();

    let mixdown = render(&registry);
    assert!(mixdown.is_clipping());
    assert!(mixdown.peak() > 1.7);
}
