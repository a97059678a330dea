use std::path::PathBuf;

use clap::Args;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;

use beatgrid::config::SongFile;
use beatgrid::io::{PlaybackSink, WavFormat, WavSink};
use beatgrid::Renderer;

use crate::playback::DeviceSink;

#[derive(Args)]
pub struct RenderArgs {
    /// Song file (TOML). Omit for the built-in demo
    #[arg(long)]
    song: Option<PathBuf>,

    /// Write the window to this WAV file
    #[arg(long)]
    out: Option<PathBuf>,

    /// Play the window once on the default output device
    #[arg(long)]
    play: bool,

    /// Export 16-bit PCM through the soft-clip limiter instead of 32-bit float
    #[arg(long)]
    pcm16: bool,
}

pub fn execute(args: RenderArgs) -> Result<()> {
    let song = match &args.song {
        Some(path) => SongFile::load(path)
            .wrap_err_with(|| format!("failed to load song {}", path.display()))?,
        None => SongFile::demo(),
    };
    let registry = song.into_registry().wrap_err("invalid song")?;

    let renderer = Renderer::new(&registry);
    let mixdown = renderer.render();

    println!(
        "{} instruments, {} events, {} samples ({:.3} s), peak {:.3}",
        registry.len(),
        renderer.grid().event_count(),
        mixdown.len(),
        mixdown.duration_sec(),
        mixdown.peak()
    );

    if let Some(path) = &args.out {
        let format = if args.pcm16 {
            WavFormat::Pcm16
        } else {
            WavFormat::Float32
        };
        WavSink::new(path, format)
            .play(&mixdown)
            .wrap_err_with(|| format!("failed to write {}", path.display()))?;
    }

    if args.play {
        DeviceSink::open()?.play(&mixdown)?;
        info!("playback finished");
    }

    Ok(())
}
