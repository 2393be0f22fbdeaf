//! HTTP endpoint handlers.
//!
//! Every handler answers with HTTP 200; failures are reported through the
//! `status` field of the JSON body.

use axum::Json;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::AppState;
use crate::camera::Camera;
use crate::error::{AppError, Result};
use crate::visca::{self, MAX_ZOOM_MULTIPLIER, MIN_ZOOM_MULTIPLIER, Toggle};

/// Query string as ordered key/value pairs. Repeated keys are kept.
pub type QueryPairs = Vec<(String, String)>;

/// Body returned by the command endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom_level: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom_multiplier: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icr_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ir_correction_enabled: Option<bool>,
}

impl ApiResponse {
    fn new(status: &str, message: impl Into<String>) -> Self {
        Self {
            status: status.to_string(),
            message: message.into(),
            zoom_level: None,
            zoom_multiplier: None,
            icr_enabled: None,
            ir_correction_enabled: None,
        }
    }

    pub fn ok(message: impl Into<String>) -> Self {
        Self::new("ok", message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new("success", message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new("error", message)
    }

    fn from_error(e: &AppError) -> Self {
        Self::error(e.to_string())
    }
}

/// Body returned by `/status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub connected: bool,
    pub zoom_level: u16,
    pub zoom_multiplier: f64,
}

/// First value given for `key`, if any.
pub fn first_param<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
}

/// Parse a permissive boolean: true/1/on/yes and false/0/off/no, any case.
pub fn parse_enable(value: Option<&str>) -> Option<bool> {
    match value?.to_lowercase().as_str() {
        "true" | "1" | "on" | "yes" => Some(true),
        "false" | "0" | "off" | "no" => Some(false),
        _ => None,
    }
}

/// Format a multiplier the way users typed it: at least one decimal place.
pub fn format_multiplier(multiplier: f64) -> String {
    if multiplier.fract() == 0.0 {
        format!("{multiplier:.1}")
    } else {
        format!("{multiplier}")
    }
}

fn on_off(enable: bool) -> &'static str {
    if enable { "ON" } else { "OFF" }
}

/// Run a blocking camera operation on the blocking pool.
async fn with_camera<T, F>(state: &AppState, op: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(&mut Camera) -> Result<T> + Send + 'static,
{
    let camera = state.camera.clone();
    tokio::task::spawn_blocking(move || {
        let mut camera = camera
            .lock()
            .map_err(|_| AppError::unexpected("Camera lock poisoned"))?;
        op(&mut camera)
    })
    .await
    .map_err(|e| AppError::unexpected(format!("Task join error: {e}")))?
}

/// `GET /`
pub async fn index() -> Json<ApiResponse> {
    Json(ApiResponse::ok("Camera Control API"))
}

/// `GET /status`
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let snapshot = with_camera(&state, |camera| Ok((camera.is_connected(), camera.zoom_level()))).await;
    let (connected, zoom_level) = snapshot.unwrap_or((false, 0));

    Json(StatusResponse {
        status: "ok".to_string(),
        connected,
        zoom_level,
        zoom_multiplier: visca::level_to_multiplier(zoom_level),
    })
}

/// `GET /zoom?multiplier=<float>`
pub async fn set_zoom(State(state): State<AppState>, Query(params): Query<QueryPairs>) -> Json<ApiResponse> {
    let Some(raw) = first_param(&params, "multiplier") else {
        return Json(ApiResponse::error("Please specify 'multiplier' parameter"));
    };

    let Ok(multiplier) = raw.trim().parse::<f64>() else {
        return Json(ApiResponse::error("Zoom multiplier must be a number"));
    };

    if !(MIN_ZOOM_MULTIPLIER..=MAX_ZOOM_MULTIPLIER).contains(&multiplier) {
        return Json(ApiResponse::error(format!(
            "Zoom multiplier must be between {MIN_ZOOM_MULTIPLIER:.1}x and {MAX_ZOOM_MULTIPLIER:.1}x"
        )));
    }

    match with_camera(&state, move |camera| camera.zoom_to_multiplier(multiplier)).await {
        Ok((level, _)) => {
            info!("Zoom set to {multiplier}x (level {level})");
            let mut body = ApiResponse::success(format!("Zoom set to {}x", format_multiplier(multiplier)));
            body.zoom_level = Some(level);
            body.zoom_multiplier = Some(multiplier);
            Json(body)
        }
        Err(e) => {
            warn!("Zoom command failed: {e}");
            Json(ApiResponse::from_error(&e))
        }
    }
}

/// `GET /icr/toggle?enable=<bool>`
pub async fn toggle_icr(State(state): State<AppState>, Query(params): Query<QueryPairs>) -> Json<ApiResponse> {
    set_toggle(state, Toggle::Icr, &params).await
}

/// `GET /ir_correction?enable=<bool>`
pub async fn set_ir_correction(State(state): State<AppState>, Query(params): Query<QueryPairs>) -> Json<ApiResponse> {
    set_toggle(state, Toggle::IrCorrection, &params).await
}

async fn set_toggle(state: AppState, kind: Toggle, params: &[(String, String)]) -> Json<ApiResponse> {
    let Some(enable) = parse_enable(first_param(params, "enable")) else {
        return Json(ApiResponse::error("Please specify 'enable' parameter as true or false"));
    };

    match with_camera(&state, move |camera| camera.set_toggle(kind, enable)).await {
        Ok(_) => {
            info!("{}: {}", kind.label(), on_off(enable));
            let mut body = ApiResponse::success(format!("{}: {}", kind.label(), on_off(enable)));
            match kind {
                Toggle::Icr => body.icr_enabled = Some(enable),
                Toggle::IrCorrection => body.ir_correction_enabled = Some(enable),
            }
            Json(body)
        }
        Err(e) => {
            warn!("{} command failed: {e}", kind.label());
            Json(ApiResponse::from_error(&e))
        }
    }
}
