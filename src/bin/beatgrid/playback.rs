//! One-shot playback of a finished mixdown on the default output device.
//!
//! The main thread feeds samples through an `rtrb` ring; the audio callback
//! pops one sample per frame and copies it to every channel. Once the ring
//! has drained, the callback writes silence and the stream is dropped.
//! A stream error, or a device that stops pulling samples for longer than
//! the mixdown plus a grace period, ends playback with an error.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::RingBuffer;
use tracing::{error, info, warn};

use beatgrid::io::PlaybackSink;
use beatgrid::render::Mixdown;
use beatgrid::MAX_BLOCK_SIZE;

/// Blocks of headroom in the ring.
const RING_BLOCKS: usize = 8;

/// Extra time past the mixdown's length before playback is declared stuck.
const DRAIN_GRACE: Duration = Duration::from_secs(2);

pub struct DeviceSink {
    device: cpal::Device,
    config: cpal::SupportedStreamConfig,
}

impl DeviceSink {
    pub fn open() -> color_eyre::Result<Self> {
        use color_eyre::eyre::{eyre, WrapErr};

        let device = cpal::default_host()
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;
        Ok(Self { device, config })
    }
}

fn device_error(err: impl std::fmt::Display) -> beatgrid::Error {
    beatgrid::Error::Io(std::io::Error::other(err.to_string()))
}

impl PlaybackSink for DeviceSink {
    fn play(&mut self, mixdown: &Mixdown) -> beatgrid::Result<()> {
        let channels = self.config.channels() as usize;
        let device_rate = self.config.sample_rate().0;
        if device_rate != mixdown.sample_rate_hz {
            warn!(
                device_rate,
                mixdown_rate = mixdown.sample_rate_hz,
                "device sample rate differs; playback pitch will be off"
            );
        }

        let (mut tx, mut rx) = RingBuffer::<f32>::new(MAX_BLOCK_SIZE * RING_BLOCKS);
        let finished_feeding = Arc::new(AtomicBool::new(false));
        let drained = Arc::new(AtomicBool::new(false));
        let failed = Arc::new(AtomicBool::new(false));

        let feeding = finished_feeding.clone();
        let drained_flag = drained.clone();
        let failed_flag = failed.clone();
        let stream = self
            .device
            .build_output_stream(
                &self.config.clone().into(),
                move |data: &mut [f32], _| {
                    for frame in data.chunks_mut(channels) {
                        let sample = match rx.pop() {
                            Ok(s) => s,
                            Err(_) => {
                                if feeding.load(Ordering::Acquire) {
                                    drained_flag.store(true, Ordering::Release);
                                }
                                0.0
                            }
                        };
                        frame.fill(sample);
                    }
                },
                move |err| {
                    error!(%err, "audio stream error");
                    failed_flag.store(true, Ordering::Release);
                },
                None,
            )
            .map_err(device_error)?;
        stream.play().map_err(device_error)?;

        info!(
            samples = mixdown.len(),
            channels, device_rate, "playing mixdown"
        );

        let deadline = Instant::now()
            + Duration::from_secs_f64(mixdown.len() as f64 / device_rate.max(1) as f64)
            + DRAIN_GRACE;
        let wait = |interval: Duration| -> beatgrid::Result<()> {
            if failed.load(Ordering::Acquire) {
                return Err(device_error("audio stream failed during playback"));
            }
            if Instant::now() > deadline {
                return Err(device_error("audio device stopped consuming samples"));
            }
            thread::sleep(interval);
            Ok(())
        };

        for block in mixdown.samples.chunks(MAX_BLOCK_SIZE) {
            while tx.slots() < block.len() {
                wait(Duration::from_millis(5))?;
            }
            tx.write_chunk_uninit(block.len())
                .map_err(device_error)?
                .fill_from_iter(block.iter().copied());
        }
        finished_feeding.store(true, Ordering::Release);

        while !drained.load(Ordering::Acquire) {
            wait(Duration::from_millis(10))?;
        }
        Ok(())
    }
}
