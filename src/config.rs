//! Application configuration
//!
//! All values are fixed at process start; the control endpoints mutate the
//! sensor directly, never this structure.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::*;
use crate::error::{Error, Result};

/// Top-level configuration, loadable from a TOML file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub video: VideoConfig,
    pub audio: AudioConfig,
}

/// Listener addressing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
    pub control_port: u16,
    pub video_port: u16,
    pub audio_port: u16,
}

/// Video streaming settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    /// Minimum time between two emitted frames; 0 disables throttling
    pub min_frame_interval_ms: u64,
    /// Synthetic camera frame width
    pub width: u32,
    /// Synthetic camera frame height
    pub height: u32,
    /// Synthetic camera JPEG quality (1-100)
    pub jpeg_quality: u8,
}

/// Audio streaming settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    pub channels: u16,
    /// PCM block size in bytes read per loop iteration
    pub block_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            control_port: DEFAULT_CONTROL_PORT,
            video_port: DEFAULT_VIDEO_PORT,
            audio_port: DEFAULT_AUDIO_PORT,
        }
    }
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            min_frame_interval_ms: DEFAULT_MIN_FRAME_INTERVAL_MS,
            width: DEFAULT_FRAME_WIDTH,
            height: DEFAULT_FRAME_HEIGHT,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            bits_per_sample: DEFAULT_SAMPLE_BITS,
            channels: DEFAULT_CHANNELS,
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        toml::from_str(&text).map_err(|e| Error::Config(e.to_string()))
    }
}
