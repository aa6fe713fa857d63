//! Live WAV streaming endpoint
//!
//! Same harness as the video endpoint: a blocking pump owns the microphone
//! for the session and feeds chunks through a bounded channel. The first
//! chunk is the 44-byte WAV header with sentinel size fields; everything
//! after is raw PCM. The blocking block read against the hardware sample
//! clock paces the loop, so there is no explicit throttling.

use std::convert::Infallible;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use futures_util::StreamExt;
use tokio::sync::mpsc;

use crate::capture::audio::AudioSource;
use crate::constants::STREAM_QUEUE_DEPTH;
use crate::server::{AppState, StreamExit};
use crate::session::StopSignal;
use crate::wav::WavHeader;

/// GET `/` on the audio listener
pub async fn stream(State(state): State<AppState>) -> Response {
    let Ok(source) = state.audio.clone().try_lock_owned() else {
        tracing::warn!("Audio stream refused: microphone is held by another session");
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    };

    tracing::info!("Audio stream requested");
    state.stop.clear();

    let audio = &state.config.audio;
    let wav_header = WavHeader::new(audio.sample_rate, audio.bits_per_sample, audio.channels);
    let block_size = audio.block_size;

    let (tx, mut rx) = mpsc::channel::<Bytes>(STREAM_QUEUE_DEPTH);
    let stop = state.stop.clone();

    tokio::task::spawn_blocking(move || {
        let mut source = source;
        match run_session(source.as_mut(), &stop, &tx, wav_header, block_size) {
            StreamExit::Killed => tracing::info!("Audio stream killed"),
            reason => tracing::error!("Audio stream failed: {reason:?}"),
        }
        tracing::info!("Audio stream ended");
    });

    let body = Body::from_stream(
        futures_util::stream::poll_fn(move |cx| rx.poll_recv(cx)).map(Ok::<_, Infallible>),
    );
    ([(header::CONTENT_TYPE, "audio/wav")], body).into_response()
}

/// Block pump: read, emit, until something ends it.
///
/// Zero-byte reads emit nothing but still re-evaluate the termination
/// conditions. The buffer is loop-scoped and overwritten every iteration.
fn run_session(
    source: &mut dyn AudioSource,
    stop: &StopSignal,
    tx: &mpsc::Sender<Bytes>,
    header: WavHeader,
    block_size: usize,
) -> StreamExit {
    if tx
        .blocking_send(Bytes::copy_from_slice(&header.to_bytes()))
        .is_err()
    {
        return StreamExit::TransportClosed;
    }

    let mut buf = vec![0u8; block_size];
    loop {
        let read = match source.read_block(&mut buf) {
            Ok(read) => read,
            Err(e) => {
                tracing::error!("Audio stream: block read failed: {e}");
                return StreamExit::AcquireFailed;
            }
        };

        if read > 0
            && tx
                .blocking_send(Bytes::copy_from_slice(&buf[..read]))
                .is_err()
        {
            return StreamExit::TransportClosed;
        }

        if stop.is_requested() {
            return StreamExit::Killed;
        }
    }
}
