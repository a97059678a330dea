//! WAV export through `hound`.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use super::pcm::soft_clip_to_i16;
use super::PlaybackSink;
use crate::error::{Error, Result};
use crate::render::Mixdown;

/// Sample encoding for exported files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WavFormat {
    /// 32-bit float, written unclamped.
    #[default]
    Float32,
    /// 16-bit integer PCM after the soft-clip limiter.
    Pcm16,
}

/// Write `mixdown` to `path` as a mono WAV file, creating parent directories.
pub fn write_wav(path: impl AsRef<Path>, mixdown: &Mixdown, format: WavFormat) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let wav_err = |source| Error::Wav {
        path: path.to_path_buf(),
        source,
    };

    let spec = match format {
        WavFormat::Float32 => hound::WavSpec {
            channels: 1,
            sample_rate: mixdown.sample_rate_hz,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        },
        WavFormat::Pcm16 => hound::WavSpec {
            channels: 1,
            sample_rate: mixdown.sample_rate_hz,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        },
    };

    let mut writer = hound::WavWriter::create(path, spec).map_err(wav_err)?;
    match format {
        WavFormat::Float32 => {
            for &sample in &mixdown.samples {
                writer.write_sample(sample).map_err(wav_err)?;
            }
        }
        WavFormat::Pcm16 => {
            for sample in soft_clip_to_i16(&mixdown.samples) {
                writer.write_sample(sample).map_err(wav_err)?;
            }
        }
    }
    writer.finalize().map_err(wav_err)?;

    info!(
        path = %path.display(),
        ?format,
        samples = mixdown.len(),
        "wrote wav"
    );
    Ok(())
}

/// A sink that writes each mixdown it receives to one file.
#[derive(Debug, Clone)]
pub struct WavSink {
    path: PathBuf,
    format: WavFormat,
}

impl WavSink {
    pub fn new(path: impl Into<PathBuf>, format: WavFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PlaybackSink for WavSink {
    fn play(&mut self, mixdown: &Mixdown) -> Result<()> {
        write_wav(&self.path, mixdown, self.format)
    }
}
