//! Media Node Appliance
//!
//! Wires the capture backends to the three HTTP listeners and serves until
//! killed. Pass a TOML config path as the first argument to override the
//! defaults.

use anyhow::Result;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lan_media_node::{
    capture::{
        AudioSource, CpalAudioSource, FrameSource, LevelMotion, SineAudioSource,
        TestPatternCamera,
    },
    config::AppConfig,
    sensor::{SensorControl, SimSensor},
    server::{self, AppState},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting LAN Media Node");

    let config = match std::env::args().nth(1) {
        Some(path) => {
            tracing::info!("Loading configuration from {path}");
            AppConfig::load(&path)?
        }
        None => AppConfig::default(),
    };

    let camera: Box<dyn FrameSource> = Box::new(TestPatternCamera::new(
        config.video.width,
        config.video.height,
        config.video.jpeg_quality,
    ));

    let audio: Box<dyn AudioSource> = match CpalAudioSource::open_default(
        config.audio.sample_rate,
        config.audio.channels,
        config.audio.block_size,
    ) {
        Ok(mic) => {
            tracing::info!("Capturing audio from the default input device");
            Box::new(mic)
        }
        Err(e) => {
            tracing::warn!("No usable input device ({e}), falling back to tone source");
            Box::new(SineAudioSource::new(
                config.audio.sample_rate,
                config.audio.channels,
            ))
        }
    };

    let sensor: Box<dyn SensorControl> = Box::new(SimSensor::new());
    let motion = Arc::new(LevelMotion::new(false));

    let state = AppState::new(camera, audio, sensor, motion, config);
    let handles = server::serve(state).await;
    if handles.is_empty() {
        anyhow::bail!("no listener could be started");
    }

    for handle in handles {
        let _ = handle.await;
    }
    Ok(())
}
