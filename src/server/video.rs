//! Live MJPEG streaming endpoint
//!
//! The handler hands the camera to a blocking frame pump that owns it for
//! the whole session and feeds chunks through a bounded channel into the
//! response body. The pump is a synchronous loop so hardware acquisition and
//! pacing sleeps never touch the async executor.

use std::convert::Infallible;
use std::thread;
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use futures_util::StreamExt;
use tokio::sync::mpsc;

use crate::capture::frame::{FrameSource, PixelFormat};
use crate::constants::STREAM_QUEUE_DEPTH;
use crate::mjpeg;
use crate::server::{AppState, StreamExit};
use crate::session::StopSignal;

/// GET `/` on the video listener
pub async fn stream(State(state): State<AppState>) -> Response {
    let Ok(camera) = state.camera.clone().try_lock_owned() else {
        tracing::warn!("Video stream refused: camera is held by another session");
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    };

    tracing::info!("Camera stream requested");
    // A new stream always disarms a pending stop from a previous session
    state.stop.clear();

    let (tx, mut rx) = mpsc::channel::<Bytes>(STREAM_QUEUE_DEPTH);
    let stop = state.stop.clone();
    let min_interval = Duration::from_millis(state.config.video.min_frame_interval_ms);

    tokio::task::spawn_blocking(move || {
        let mut camera = camera;
        match run_session(camera.as_mut(), &stop, &tx, min_interval) {
            StreamExit::Killed => tracing::info!("Camera stream killed"),
            reason => tracing::error!("Camera stream failed: {reason:?}"),
        }
        tracing::info!("Camera stream ended");
    });

    let body = Body::from_stream(
        futures_util::stream::poll_fn(move |cx| rx.poll_recv(cx)).map(Ok::<_, Infallible>),
    );
    ([(header::CONTENT_TYPE, mjpeg::STREAM_CONTENT_TYPE)], body).into_response()
}

/// Frame pump: acquire, validate, emit, pace, until something ends it.
///
/// Every acquired frame is dropped (released) within its own iteration, on
/// success and failure paths alike. The stop signal is observed once per
/// iteration, after the frame in flight has been emitted.
fn run_session(
    camera: &mut dyn FrameSource,
    stop: &StopSignal,
    tx: &mpsc::Sender<Bytes>,
    min_interval: Duration,
) -> StreamExit {
    if tx.blocking_send(mjpeg::boundary()).is_err() {
        return StreamExit::TransportClosed;
    }

    let mut last_frame: Option<Instant> = None;
    loop {
        let frame = match camera.acquire() {
            Ok(frame) => frame,
            Err(e) => {
                tracing::error!("Camera stream: failed to acquire frame: {e}");
                return StreamExit::AcquireFailed;
            }
        };
        if frame.format != PixelFormat::Jpeg {
            tracing::error!(
                "Camera stream: {} frame returned by camera module",
                frame.format.name()
            );
            return StreamExit::BadFormat;
        }

        let header = mjpeg::part_header(frame.len());
        if tx.blocking_send(header).is_err()
            || tx.blocking_send(frame.bytes).is_err()
            || tx.blocking_send(mjpeg::boundary()).is_err()
        {
            return StreamExit::TransportClosed;
        }

        if stop.is_requested() {
            return StreamExit::Killed;
        }

        if min_interval > Duration::ZERO {
            if let Some(last) = last_frame {
                let elapsed = last.elapsed();
                if elapsed < min_interval {
                    thread::sleep(min_interval - elapsed);
                }
            }
        }
        last_frame = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::frame::Frame;
    use crate::error::CaptureError;
    use std::collections::VecDeque;
    use std::sync::Arc;

    struct ScriptedCamera {
        frames: VecDeque<Result<Frame, CaptureError>>,
    }

    impl ScriptedCamera {
        fn new(frames: Vec<Result<Frame, CaptureError>>) -> Self {
            Self {
                frames: frames.into(),
            }
        }
    }

    impl FrameSource for ScriptedCamera {
        fn acquire(&mut self) -> Result<Frame, CaptureError> {
            self.frames.pop_front().unwrap_or(Err(CaptureError::NoFrame))
        }
    }

    fn jpeg(bytes: &'static [u8]) -> Result<Frame, CaptureError> {
        Ok(Frame::new(Bytes::from_static(bytes), PixelFormat::Jpeg))
    }

    fn run_collect(
        camera: ScriptedCamera,
        stop: Arc<StopSignal>,
    ) -> (StreamExit, Vec<Bytes>) {
        let (tx, mut rx) = mpsc::channel::<Bytes>(STREAM_QUEUE_DEPTH);
        let pump = thread::spawn(move || {
            let mut camera = camera;
            run_session(&mut camera, &stop, &tx, Duration::ZERO)
        });

        let mut chunks = Vec::new();
        while let Some(chunk) = rx.blocking_recv() {
            chunks.push(chunk);
        }
        (pump.join().unwrap(), chunks)
    }

    #[test]
    fn frames_are_framed_with_exact_lengths() {
        let camera = ScriptedCamera::new(vec![
            jpeg(b"first-frame"),
            jpeg(b"frame-two!"),
            Err(CaptureError::NoFrame),
        ]);
        let (exit, chunks) = run_collect(camera, Arc::new(StopSignal::new()));

        assert_eq!(exit, StreamExit::AcquireFailed);
        // boundary, then (header, payload, boundary) per frame
        assert_eq!(chunks.len(), 1 + 3 * 2);
        assert_eq!(chunks[0], mjpeg::boundary());

        for (header, payload, boundary) in [(1, 2, 3), (4, 5, 6)].map(|(h, p, b)| {
            (&chunks[h], &chunks[p], &chunks[b])
        }) {
            let text = std::str::from_utf8(header).unwrap();
            let declared: usize = text
                .split("Content-Length: ")
                .nth(1)
                .unwrap()
                .split('\r')
                .next()
                .unwrap()
                .parse()
                .unwrap();
            assert_eq!(declared, payload.len());
            assert_eq!(boundary, &mjpeg::boundary());
        }
    }

    #[test]
    fn acquisition_failure_ends_after_one_attempt() {
        let camera = ScriptedCamera::new(vec![Err(CaptureError::NoFrame)]);
        let (exit, chunks) = run_collect(camera, Arc::new(StopSignal::new()));

        assert_eq!(exit, StreamExit::AcquireFailed);
        // Only the initial boundary made it out; no retries
        assert_eq!(chunks.len(), 1);
    }

    #[test]
    fn non_jpeg_frame_is_a_hard_failure() {
        let camera = ScriptedCamera::new(vec![Ok(Frame::new(
            Bytes::from_static(b"\x00\x01"),
            PixelFormat::Rgb565,
        ))]);
        let (exit, chunks) = run_collect(camera, Arc::new(StopSignal::new()));

        assert_eq!(exit, StreamExit::BadFormat);
        assert_eq!(chunks.len(), 1);
    }

    #[test]
    fn stop_signal_kills_after_the_inflight_frame() {
        let camera = ScriptedCamera::new(vec![jpeg(b"last-frame"), jpeg(b"never-sent")]);
        let stop = Arc::new(StopSignal::new());
        stop.request_stop();

        let (exit, chunks) = run_collect(camera, stop);

        assert_eq!(exit, StreamExit::Killed);
        // The iteration in flight completes before the signal is observed
        assert_eq!(chunks.len(), 1 + 3);
        assert_eq!(chunks[2], Bytes::from_static(b"last-frame"));
    }

    #[test]
    fn dropped_receiver_is_a_transport_failure() {
        let camera = ScriptedCamera::new(vec![jpeg(b"unwanted")]);
        let stop = StopSignal::new();
        let (tx, rx) = mpsc::channel::<Bytes>(1);
        drop(rx);

        let mut camera = camera;
        let exit = run_session(&mut camera, &stop, &tx, Duration::ZERO);
        assert_eq!(exit, StreamExit::TransportClosed);
    }
}
