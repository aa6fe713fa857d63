//! HTTP surface: three independent listeners
//!
//! The control listener carries every single-shot endpoint; the video and
//! audio listeners each carry one unbounded streaming endpoint at `/`. The
//! listeners bind and fail independently; a port that cannot be bound takes
//! only its own endpoints down.

pub mod audio_stream;
pub mod control;
pub mod video;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::capture::{AudioSource, FrameSource, MotionInput};
use crate::config::AppConfig;
use crate::sensor::SensorControl;
use crate::session::StopSignal;

/// Shared state handed to every handler.
///
/// The camera and microphone are exclusive handles: a streaming session owns
/// one for its whole lifetime, so a second session of the same kind is
/// refused rather than interleaved. The sensor lock is only ever held for
/// the duration of one device call.
#[derive(Clone)]
pub struct AppState {
    pub camera: Arc<tokio::sync::Mutex<Box<dyn FrameSource>>>,
    pub audio: Arc<tokio::sync::Mutex<Box<dyn AudioSource>>>,
    pub sensor: Arc<parking_lot::Mutex<Box<dyn SensorControl>>>,
    pub motion: Arc<dyn MotionInput>,
    pub stop: Arc<StopSignal>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(
        camera: Box<dyn FrameSource>,
        audio: Box<dyn AudioSource>,
        sensor: Box<dyn SensorControl>,
        motion: Arc<dyn MotionInput>,
        config: AppConfig,
    ) -> Self {
        Self {
            camera: Arc::new(tokio::sync::Mutex::new(camera)),
            audio: Arc::new(tokio::sync::Mutex::new(audio)),
            sensor: Arc::new(parking_lot::Mutex::new(sensor)),
            motion,
            stop: Arc::new(StopSignal::new()),
            config: Arc::new(config),
        }
    }
}

/// Why a streaming loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamExit {
    /// Stop was requested through the control listener
    Killed,
    /// The client went away or a chunk send failed
    TransportClosed,
    /// The capture subsystem had no data
    AcquireFailed,
    /// The acquired frame was not JPEG encoded
    BadFormat,
}

fn cors() -> CorsLayer {
    CorsLayer::new().allow_origin(Any)
}

/// Index, snapshot, motion, stop and the whole parameter control plane
pub fn control_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(control::index))
        .route("/capture", get(control::capture))
        .route("/motion", get(control::motion))
        .route("/stop", get(control::stop))
        .route("/control", get(control::set_parameter))
        .route("/xclk", get(control::set_xclk))
        .route("/reg", get(control::write_register))
        .route("/greg", get(control::read_register))
        .route("/pll", get(control::set_pll))
        .route("/resolution", get(control::set_window))
        .layer(cors())
        .with_state(state)
}

/// Single MJPEG streaming endpoint
pub fn video_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(video::stream))
        .layer(cors())
        .with_state(state)
}

/// Single WAV streaming endpoint
pub fn audio_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(audio_stream::stream))
        .layer(cors())
        .with_state(state)
}

/// Bind and serve all three listeners.
///
/// Returns one join handle per listener that came up. A bind failure is
/// logged and that listener's endpoints stay unreachable; the others keep
/// running.
pub async fn serve(state: AppState) -> Vec<tokio::task::JoinHandle<()>> {
    let server = state.config.server.clone();
    let listeners = [
        ("control", server.control_port, control_router(state.clone())),
        ("video", server.video_port, video_router(state.clone())),
        ("audio", server.audio_port, audio_router(state)),
    ];

    let mut handles = Vec::new();
    for (name, port, router) in listeners {
        let addr = format!("{}:{}", server.bind_address, port);
        match tokio::net::TcpListener::bind(&addr).await {
            Ok(listener) => {
                tracing::info!("Starting {name} listener on {addr}");
                handles.push(tokio::spawn(async move {
                    if let Err(e) = axum::serve(listener, router).await {
                        tracing::error!("{name} listener failed: {e}");
                    }
                }));
            }
            Err(e) => {
                tracing::error!("Failed to bind {name} listener on {addr}: {e}");
            }
        }
    }
    handles
}
