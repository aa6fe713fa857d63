//! Control listener handlers
//!
//! Everything here is single-shot: a request maps to at most one device call
//! and the outcome maps to the HTTP status. Required query keys missing is a
//! 404 before any device call; a device call failing is a 500 after it.
//! Integer fields parse with atoi leniency: an unparseable value becomes 0.

use std::collections::HashMap;

use axum::extract::{Query, RawQuery, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::sensor::{PllConfig, SensorCommand, WindowConfig};
use crate::server::AppState;

static INDEX_HTML: &str = include_str!("../../static/index.html");

/// atoi semantics: anything unparseable is 0
fn parse_int(value: &str) -> i32 {
    value.trim().parse().unwrap_or(0)
}

fn int_or_zero(query: &HashMap<String, String>, key: &str) -> i32 {
    query.get(key).map(|v| parse_int(v)).unwrap_or(0)
}

/// GET `/`: static control panel, served uncompressed
pub async fn index() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/html"),
            (header::CONTENT_ENCODING, "identity"),
        ],
        INDEX_HTML,
    )
}

/// GET `/capture`: one JPEG snapshot
pub async fn capture(State(state): State<AppState>) -> Response {
    let Ok(mut camera) = state.camera.try_lock() else {
        tracing::warn!("Capture refused: camera is held by a streaming session");
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    };

    match camera.acquire() {
        Ok(frame) => (
            [
                (header::CONTENT_TYPE, "image/jpeg"),
                (header::CONTENT_DISPOSITION, "inline; filename=capture.jpg"),
            ],
            frame.bytes,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Capture: failed to acquire frame: {e}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// GET `/motion`: current state of the motion input line
pub async fn motion(State(state): State<AppState>) -> Response {
    Json(serde_json::json!({ "motion": state.motion.is_high() })).into_response()
}

/// GET `/stop`: arm the stop signal for all running streaming loops
pub async fn stop(State(state): State<AppState>) -> StatusCode {
    tracing::info!("Stream stop requested via control listener");
    state.stop.request_stop();
    StatusCode::OK
}

/// GET `/control?var=<name>&val=<int>`: named parameter set
pub async fn set_parameter(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> StatusCode {
    let (Some(var), Some(val)) = (query.get("var"), query.get("val")) else {
        return StatusCode::NOT_FOUND;
    };
    let value = parse_int(val);

    let Some(command) = SensorCommand::from_name(var) else {
        tracing::info!("Unknown control command: {var}");
        return StatusCode::INTERNAL_SERVER_ERROR;
    };

    tracing::info!("{} = {}", command.name(), value);
    let mut sensor = state.sensor.lock();
    match command.apply(sensor.as_mut(), value) {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::error!("Setting {} to {} failed: {e}", command.name(), value);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// GET `/xclk?xclk=<mhz>`: master clock frequency
pub async fn set_xclk(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> StatusCode {
    let Some(xclk) = query.get("xclk") else {
        return StatusCode::NOT_FOUND;
    };
    let freq_mhz = parse_int(xclk);
    tracing::info!("Set XCLK: {freq_mhz} MHz");

    match state.sensor.lock().set_xclk(freq_mhz) {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::error!("Setting XCLK to {freq_mhz} MHz failed: {e}");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// GET `/reg?reg=<int>&mask=<int>&val=<int>`: masked register write
pub async fn write_register(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> StatusCode {
    let (Some(reg), Some(mask), Some(val)) =
        (query.get("reg"), query.get("mask"), query.get("val"))
    else {
        return StatusCode::NOT_FOUND;
    };
    let (reg, mask, value) = (parse_int(reg), parse_int(mask), parse_int(val));
    tracing::info!("Set register: reg {reg:#04x}, mask {mask:#04x}, value {value:#04x}");

    match state.sensor.lock().set_register(reg, mask, value) {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::error!("Register write {reg:#04x} &= {mask:#04x} failed: {e}");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// GET `/greg?reg=<int>&mask=<int>`: masked register read, decimal body
pub async fn read_register(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let (Some(reg), Some(mask)) = (query.get("reg"), query.get("mask")) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let (reg, mask) = (parse_int(reg), parse_int(mask));

    match state.sensor.lock().get_register(reg, mask) {
        Ok(value) => {
            tracing::info!("Get register: reg {reg:#04x}, mask {mask:#04x}, value {value:#04x}");
            value.to_string().into_response()
        }
        Err(e) => {
            tracing::error!("Register read {reg:#04x} & {mask:#04x} failed: {e}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// GET `/pll?bypass=&mul=&sys=&root=&pre=&seld5=&pclken=&pclk=`
///
/// Every absent or unparseable field is 0, but a request with no query
/// string at all is a 404.
pub async fn set_pll(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
    Query(query): Query<HashMap<String, String>>,
) -> StatusCode {
    if raw.is_none() {
        return StatusCode::NOT_FOUND;
    }

    let pll = PllConfig {
        bypass: int_or_zero(&query, "bypass"),
        multiplier: int_or_zero(&query, "mul"),
        sys_div: int_or_zero(&query, "sys"),
        root_div: int_or_zero(&query, "root"),
        pre_div: int_or_zero(&query, "pre"),
        seld5: int_or_zero(&query, "seld5"),
        pclk_enable: int_or_zero(&query, "pclken"),
        pclk_div: int_or_zero(&query, "pclk"),
    };
    tracing::info!("Set PLL: {pll:?}");

    match state.sensor.lock().set_pll(pll) {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::error!("PLL configuration failed: {e}");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// GET `/resolution?sx=&sy=&ex=&ey=&offx=&offy=&tx=&ty=&ox=&oy=&scale=&binning=`
///
/// Same leniency as `/pll`: absent or unparseable fields are 0.
pub async fn set_window(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
    Query(query): Query<HashMap<String, String>>,
) -> StatusCode {
    if raw.is_none() {
        return StatusCode::NOT_FOUND;
    }

    let window = WindowConfig {
        start_x: int_or_zero(&query, "sx"),
        start_y: int_or_zero(&query, "sy"),
        end_x: int_or_zero(&query, "ex"),
        end_y: int_or_zero(&query, "ey"),
        offset_x: int_or_zero(&query, "offx"),
        offset_y: int_or_zero(&query, "offy"),
        total_x: int_or_zero(&query, "tx"),
        total_y: int_or_zero(&query, "ty"),
        output_x: int_or_zero(&query, "ox"),
        output_y: int_or_zero(&query, "oy"),
        scale: int_or_zero(&query, "scale") == 1,
        binning: int_or_zero(&query, "binning") == 1,
    };
    tracing::info!("Set window: {window:?}");

    match state.sensor.lock().set_window(window) {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::error!("Window configuration failed: {e}");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_int_is_lenient() {
        assert_eq!(parse_int("42"), 42);
        assert_eq!(parse_int("-3"), -3);
        assert_eq!(parse_int(" 7 "), 7);
        assert_eq!(parse_int("abc"), 0);
        assert_eq!(parse_int(""), 0);
    }

    #[test]
    fn absent_keys_default_to_zero() {
        let mut query = HashMap::new();
        query.insert("mul".to_string(), "4".to_string());
        query.insert("sys".to_string(), "junk".to_string());
        assert_eq!(int_or_zero(&query, "mul"), 4);
        assert_eq!(int_or_zero(&query, "sys"), 0);
        assert_eq!(int_or_zero(&query, "root"), 0);
    }
}
