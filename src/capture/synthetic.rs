//! Synthetic capture backends
//!
//! Stand-ins for the camera and microphone peripherals so the node runs, and
//! the streaming paths can be exercised, on machines without the target
//! hardware.

use std::f32::consts::TAU;
use std::thread;
use std::time::Duration;

use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;

use crate::capture::audio::AudioSource;
use crate::capture::frame::{Frame, FrameSource, PixelFormat};
use crate::error::CaptureError;

const BAR_COLORS: [[u8; 3]; 8] = [
    [255, 255, 255],
    [255, 255, 0],
    [0, 255, 255],
    [0, 255, 0],
    [255, 0, 255],
    [255, 0, 0],
    [0, 0, 255],
    [16, 16, 16],
];

/// Camera producing a scrolling color-bar test pattern as JPEG
pub struct TestPatternCamera {
    width: u32,
    height: u32,
    quality: u8,
    tick: u64,
}

impl TestPatternCamera {
    pub fn new(width: u32, height: u32, quality: u8) -> Self {
        Self {
            width,
            height,
            quality,
            tick: 0,
        }
    }
}

impl FrameSource for TestPatternCamera {
    fn acquire(&mut self) -> Result<Frame, CaptureError> {
        let (w, h) = (self.width as usize, self.height as usize);
        let bar_width = (w / BAR_COLORS.len()).max(1);
        let shift = self.tick as usize;
        self.tick = self.tick.wrapping_add(8);

        let mut rgb = vec![0u8; w * h * 3];
        for y in 0..h {
            for x in 0..w {
                let color = BAR_COLORS[((x + shift) / bar_width) % BAR_COLORS.len()];
                rgb[(y * w + x) * 3..(y * w + x) * 3 + 3].copy_from_slice(&color);
            }
        }

        let mut jpeg = Vec::new();
        let mut encoder = JpegEncoder::new_with_quality(&mut jpeg, self.quality);
        encoder
            .encode(&rgb, self.width, self.height, image::ColorType::Rgb8)
            .map_err(|e| CaptureError::StreamError(e.to_string()))?;

        Ok(Frame::new(Bytes::from(jpeg), PixelFormat::Jpeg))
    }
}

/// Tone generator standing in for the microphone.
///
/// Each read sleeps for the real-time duration of the block it returns,
/// mimicking the hardware sample clock that paces a blocking DMA read.
pub struct SineAudioSource {
    sample_rate: u32,
    channels: u16,
    frequency: f32,
    phase: f32,
}

impl SineAudioSource {
    pub fn new(sample_rate: u32, channels: u16) -> Self {
        Self {
            sample_rate,
            channels,
            frequency: 440.0,
            phase: 0.0,
        }
    }
}

impl AudioSource for SineAudioSource {
    fn read_block(&mut self, buf: &mut [u8]) -> Result<usize, CaptureError> {
        let frame_bytes = 2 * self.channels as usize;
        let frames = buf.len() / frame_bytes;
        if frames == 0 {
            return Ok(0);
        }

        let step = TAU * self.frequency / self.sample_rate as f32;
        for i in 0..frames {
            let sample = ((self.phase.sin() * 0.2) * i16::MAX as f32) as i16;
            self.phase = (self.phase + step) % TAU;
            for ch in 0..self.channels as usize {
                let offset = (i * self.channels as usize + ch) * 2;
                buf[offset..offset + 2].copy_from_slice(&sample.to_le_bytes());
            }
        }

        thread::sleep(Duration::from_secs_f64(
            frames as f64 / self.sample_rate as f64,
        ));
        Ok(frames * frame_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_produces_jpeg_frames() {
        let mut camera = TestPatternCamera::new(64, 48, 80);
        let frame = camera.acquire().unwrap();
        assert_eq!(frame.format, PixelFormat::Jpeg);
        // JPEG SOI marker
        assert_eq!(&frame.bytes[..2], &[0xFF, 0xD8]);

        // Pattern scrolls, frames keep coming
        let next = camera.acquire().unwrap();
        assert!(!next.is_empty());
    }

    #[test]
    fn sine_source_fills_whole_blocks() {
        let mut source = SineAudioSource::new(16_000, 1);
        let mut buf = [0u8; 64];
        let read = source.read_block(&mut buf).unwrap();
        assert_eq!(read, 64);
        assert!(buf.iter().any(|&b| b != 0));
    }

    #[test]
    fn sine_source_truncates_to_sample_frames() {
        let mut source = SineAudioSource::new(16_000, 2);
        let mut buf = [0u8; 7];
        // 7 bytes fit one 4-byte stereo frame
        assert_eq!(source.read_block(&mut buf).unwrap(), 4);
    }
}
