//! Getting a finished mixdown out of the process: PCM conversion, WAV files, playback sinks.

pub mod pcm;
pub mod wav;

pub use pcm::{soft_clip, soft_clip_to_i16, to_pcm_i16};
pub use wav::{write_wav, WavFormat, WavSink};

use crate::error::Result;
use crate::render::Mixdown;

/// Terminal consumer of a finished mixdown: a file, a device, a test buffer.
///
/// The hand-off happens once per render pass and is not re-entered.
pub trait PlaybackSink {
    fn play(&mut self, mixdown: &Mixdown) -> Result<()>;
}

/// Collects every mixdown it is handed. Handy in tests and offline tools.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub received: Vec<Mixdown>,
}

impl PlaybackSink for MemorySink {
    fn play(&mut self, mixdown: &Mixdown) -> Result<()> {
        self.received.push(mixdown.clone());
        Ok(())
    }
}
