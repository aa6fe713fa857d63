//! Microphone capture backed by cpal
//!
//! A dedicated capture thread owns the cpal stream and slices the callback
//! data into fixed-size PCM blocks on a bounded channel; [`read_block`] is
//! the blocking consumer side. Blocks are dropped when the consumer falls
//! behind rather than stalling the audio callback.
//!
//! [`read_block`]: crate::capture::AudioSource::read_block

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::StreamConfig;
use crossbeam_channel::{bounded, Receiver};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::capture::audio::AudioSource;
use crate::error::CaptureError;

/// Depth of the block channel between the capture thread and the reader
const BLOCK_QUEUE_DEPTH: usize = 8;

/// Real audio input device exposed as an [`AudioSource`]
pub struct CpalAudioSource {
    running: Arc<AtomicBool>,
    block_rx: Receiver<Vec<u8>>,
    error_rx: Receiver<CaptureError>,
    thread_handle: Option<JoinHandle<()>>,
    /// Bytes received but not yet handed to the caller
    pending: Vec<u8>,
}

impl CpalAudioSource {
    /// Open the host's default input device for 16-bit capture.
    pub fn open_default(
        sample_rate: u32,
        channels: u16,
        block_size: usize,
    ) -> Result<Self, CaptureError> {
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or_else(|| CaptureError::DeviceNotFound("default input".to_string()))?;

        let config = StreamConfig {
            channels,
            sample_rate: cpal::SampleRate(sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        let (block_tx, block_rx) = bounded::<Vec<u8>>(BLOCK_QUEUE_DEPTH);
        let (error_tx, error_rx) = bounded::<CaptureError>(16);
        let running = Arc::new(AtomicBool::new(true));
        let running_in_callback = running.clone();
        let running_in_loop = running.clone();

        let handle = thread::Builder::new()
            .name("mic-capture".to_string())
            .spawn(move || {
                let mut acc: Vec<u8> = Vec::with_capacity(block_size * 2);
                let stream = device.build_input_stream(
                    &config,
                    move |data: &[i16], _: &cpal::InputCallbackInfo| {
                        if !running_in_callback.load(Ordering::Relaxed) {
                            return;
                        }
                        for sample in data {
                            acc.extend_from_slice(&sample.to_le_bytes());
                        }
                        while acc.len() >= block_size {
                            let block: Vec<u8> = acc.drain(..block_size).collect();
                            // Drop the block if the reader is behind
                            let _ = block_tx.try_send(block);
                        }
                    },
                    {
                        let error_tx = error_tx.clone();
                        move |err| {
                            let _ = error_tx.try_send(CaptureError::StreamError(err.to_string()));
                        }
                    },
                    None,
                );

                match stream {
                    Ok(stream) => {
                        if let Err(e) = stream.play() {
                            let _ = error_tx.try_send(CaptureError::StreamError(e.to_string()));
                            return;
                        }
                        while running_in_loop.load(Ordering::Relaxed) {
                            thread::sleep(Duration::from_millis(10));
                        }
                        // Stream is dropped here, stopping capture
                    }
                    Err(e) => {
                        let _ = error_tx.try_send(CaptureError::StreamError(e.to_string()));
                    }
                }
            })
            .map_err(|e| CaptureError::StreamError(e.to_string()))?;

        Ok(Self {
            running,
            block_rx,
            error_rx,
            thread_handle: Some(handle),
            pending: Vec::new(),
        })
    }
}

impl AudioSource for CpalAudioSource {
    fn read_block(&mut self, buf: &mut [u8]) -> Result<usize, CaptureError> {
        if let Ok(err) = self.error_rx.try_recv() {
            return Err(err);
        }

        if self.pending.is_empty() {
            match self.block_rx.recv() {
                Ok(block) => self.pending = block,
                Err(_) => return Err(CaptureError::Disconnected),
            }
        }

        let n = buf.len().min(self.pending.len());
        buf[..n].copy_from_slice(&self.pending[..n]);
        self.pending.drain(..n);
        Ok(n)
    }
}

impl Drop for CpalAudioSource {
    fn drop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}
