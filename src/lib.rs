//! # LAN Media Node
//!
//! A small network-accessible media appliance: live MJPEG video, live raw
//! WAV/PCM audio, snapshot capture, motion status and a sensor-tuning control
//! surface, served over three independent HTTP listeners.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                          MEDIA NODE                              │
//! │                                                                  │
//! │  ┌───────────┐      ┌───────────┐      ┌───────────────┐         │
//! │  │  Camera   │      │Microphone │      │ Imaging sensor│         │
//! │  │(FrameSrc) │      │(AudioSrc) │      │(SensorControl)│         │
//! │  └─────┬─────┘      └─────┬─────┘      └───────┬───────┘         │
//! │        │ frames           │ PCM blocks         │ register writes │
//! │        ▼                  ▼                    ▼                 │
//! │  ┌───────────┐      ┌───────────┐      ┌───────────────┐         │
//! │  │  video    │      │  audio    │      │   control     │         │
//! │  │ listener  │      │ listener  │      │   listener    │         │
//! │  │ (MJPEG)   │      │ (WAV)     │      │ (/capture,    │         │
//! │  └─────┬─────┘      └─────┬─────┘      │  /control,    │         │
//! │        │                  │            │  /stop, ...)  │         │
//! │        │                  │            └───────┬───────┘         │
//! │        │                  │     StopSignal     │                 │
//! │        └───────◄──────────┴─────────◄──────────┘                 │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The video and audio listeners each serve one unbounded streaming endpoint;
//! the control listener serves everything single-shot. The only shared
//! mutable state is the [`session::StopSignal`], armed by `/stop` and polled
//! once per streaming-loop iteration.

pub mod capture;
pub mod config;
pub mod error;
pub mod mjpeg;
pub mod sensor;
pub mod server;
pub mod session;
pub mod wav;

pub use error::{Error, Result};

/// Application-wide defaults
pub mod constants {
    /// Default bind address for all listeners
    pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";

    /// Default port for the control listener
    pub const DEFAULT_CONTROL_PORT: u16 = 8080;

    /// Default port for the video streaming listener
    pub const DEFAULT_VIDEO_PORT: u16 = 8081;

    /// Default port for the audio streaming listener
    pub const DEFAULT_AUDIO_PORT: u16 = 8082;

    /// Default audio sample rate
    pub const DEFAULT_SAMPLE_RATE: u32 = 16_000;

    /// Default bits per audio sample
    pub const DEFAULT_SAMPLE_BITS: u16 = 16;

    /// Default channel count (mono microphone)
    pub const DEFAULT_CHANNELS: u16 = 1;

    /// Default PCM block size in bytes, sized like one DMA buffer
    pub const DEFAULT_BLOCK_SIZE: usize = 1024;

    /// Default minimum inter-frame interval in milliseconds (0 = unthrottled)
    pub const DEFAULT_MIN_FRAME_INTERVAL_MS: u64 = 0;

    /// Default synthetic camera frame width
    pub const DEFAULT_FRAME_WIDTH: u32 = 640;

    /// Default synthetic camera frame height
    pub const DEFAULT_FRAME_HEIGHT: u32 = 480;

    /// Default synthetic camera JPEG quality
    pub const DEFAULT_JPEG_QUALITY: u8 = 80;

    /// Depth of the chunk queue between a streaming loop and its response body
    pub const STREAM_QUEUE_DEPTH: usize = 4;
}
