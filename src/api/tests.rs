//! Router tests against an in-memory serial line.

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use super::{AppState, first_param, format_multiplier, parse_enable, router};
use crate::camera::{Camera, CameraSettings};
use crate::serial::mock::MockLine;

fn state(line: &MockLine) -> AppState {
    AppState::new(Camera::new(Box::new(line.clone()), CameraSettings::default()))
}

async fn get_json(state: &AppState, uri: &str) -> Value {
    let response = router(state.clone())
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn zoom_level(state: &AppState) -> u16 {
    state.camera.lock().unwrap().zoom_level()
}

#[tokio::test]
async fn test_index() {
    let line = MockLine::new();
    let body = get_json(&state(&line), "/").await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["message"], "Camera Control API");
}

#[tokio::test]
async fn test_zoom_success() {
    let line = MockLine::new();
    let state = state(&line);

    let body = get_json(&state, "/zoom?multiplier=15.5").await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Zoom set to 15.5x");
    assert_eq!(body["zoom_level"], 8465);
    assert_eq!(body["zoom_multiplier"], 15.5);
    assert_eq!(zoom_level(&state), 8465);
    assert_eq!(line.written(), vec!["8101044700000000FF", "8101044702010101FF"]);
}

#[tokio::test]
async fn test_zoom_whole_number_message() {
    let line = MockLine::new();
    let body = get_json(&state(&line), "/zoom?multiplier=30").await;
    assert_eq!(body["message"], "Zoom set to 30.0x");
    assert_eq!(body["zoom_level"], 16384);
}

#[tokio::test]
async fn test_zoom_out_of_range_keeps_level() {
    let line = MockLine::new();
    let state = state(&line);
    get_json(&state, "/zoom?multiplier=2").await;
    let before = zoom_level(&state);

    let body = get_json(&state, "/zoom?multiplier=31").await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Zoom multiplier must be between 1.0x and 30.0x");
    assert!(body.get("zoom_level").is_none());
    assert_eq!(zoom_level(&state), before);

    let body = get_json(&state, "/zoom?multiplier=0.5").await;
    assert_eq!(body["status"], "error");
    let body = get_json(&state, "/zoom?multiplier=nan").await;
    assert_eq!(body["status"], "error");
    assert_eq!(zoom_level(&state), before);
}

#[tokio::test]
async fn test_zoom_missing_and_invalid_parameter() {
    let line = MockLine::new();
    let state = state(&line);

    let body = get_json(&state, "/zoom").await;
    assert_eq!(body["message"], "Please specify 'multiplier' parameter");

    let body = get_json(&state, "/zoom?multiplier=wide").await;
    assert_eq!(body["message"], "Zoom multiplier must be a number");
    assert!(line.written().is_empty());
}

#[tokio::test]
async fn test_repeated_parameter_uses_first_value() {
    let line = MockLine::new();
    let state = state(&line);

    let body = get_json(&state, "/zoom?multiplier=2&multiplier=3").await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Zoom set to 2.0x");
    assert_eq!(body["zoom_level"], 1092);

    let body = get_json(&state, "/icr/toggle?enable=true&enable=false").await;
    assert_eq!(body["message"], "ICR Mode: ON");

    let body = get_json(&state, "/ir_correction?enable=off&enable=on").await;
    assert_eq!(body["message"], "IR Correction: OFF");

    assert_eq!(
        line.written(),
        vec!["8101044700000000FF", "8101044700040404FF", "8101040102FF", "8101041100FF"]
    );
}

#[tokio::test]
async fn test_zoom_serial_unavailable() {
    let line = MockLine::unplugged();
    let state = state(&line);
    let body = get_json(&state, "/zoom?multiplier=10").await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Serial error");
    assert_eq!(zoom_level(&state), 0);
}

#[tokio::test]
async fn test_icr_toggle() {
    let line = MockLine::new();
    let state = state(&line);

    let body = get_json(&state, "/icr/toggle?enable=ON").await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "ICR Mode: ON");
    assert_eq!(body["icr_enabled"], true);

    let body = get_json(&state, "/icr/toggle?enable=no").await;
    assert_eq!(body["message"], "ICR Mode: OFF");
    assert_eq!(body["icr_enabled"], false);

    assert_eq!(line.written(), vec!["8101044700000000FF", "8101040102FF", "8101040103FF"]);
}

#[tokio::test]
async fn test_icr_toggle_missing_enable() {
    let line = MockLine::new();
    let body = get_json(&state(&line), "/icr/toggle").await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Please specify 'enable' parameter as true or false");
    assert!(line.written().is_empty());
}

#[tokio::test]
async fn test_ir_correction() {
    let line = MockLine::new();
    let state = state(&line);

    let body = get_json(&state, "/ir_correction?enable=1").await;
    assert_eq!(body["message"], "IR Correction: ON");
    assert_eq!(body["ir_correction_enabled"], true);

    let body = get_json(&state, "/ir_correction?enable=maybe").await;
    assert_eq!(body["status"], "error");

    assert_eq!(line.written().last().unwrap(), "8101041101FF");
}

#[tokio::test]
async fn test_ir_correction_write_failure() {
    let line = MockLine::new();
    let state = state(&line);
    state.camera.lock().unwrap().connect().unwrap();
    line.fail_writes(true);

    let body = get_json(&state, "/ir_correction?enable=false").await;
    assert_eq!(body["status"], "error");
    assert!(body["message"].as_str().unwrap().starts_with("Write failed"));
}

#[tokio::test]
async fn test_status() {
    let line = MockLine::new();
    let state = state(&line);

    let body = get_json(&state, "/status").await;
    assert_eq!(body["connected"], false);
    assert_eq!(body["zoom_multiplier"], 1.0);

    get_json(&state, "/zoom?multiplier=15").await;
    let body = get_json(&state, "/status").await;
    assert_eq!(body["connected"], true);
    assert_eq!(body["zoom_level"], 8192);
    assert_eq!(body["zoom_multiplier"], 15.0);
}

#[tokio::test]
async fn test_unknown_route() {
    let line = MockLine::new();
    let response = router(state(&line))
        .oneshot(Request::builder().uri("/pan").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[test]
fn test_parse_enable() {
    for value in ["true", "TRUE", "1", "on", "Yes"] {
        assert_eq!(parse_enable(Some(value)), Some(true), "{value}");
    }
    for value in ["false", "0", "OFF", "no"] {
        assert_eq!(parse_enable(Some(value)), Some(false), "{value}");
    }
    assert_eq!(parse_enable(Some("")), None);
    assert_eq!(parse_enable(Some("y")), None);
    assert_eq!(parse_enable(None), None);
}

#[test]
fn test_first_param() {
    let pairs = vec![
        ("enable".to_string(), "yes".to_string()),
        ("multiplier".to_string(), "4".to_string()),
        ("enable".to_string(), "no".to_string()),
    ];
    assert_eq!(first_param(&pairs, "enable"), Some("yes"));
    assert_eq!(first_param(&pairs, "multiplier"), Some("4"));
    assert_eq!(first_param(&pairs, "level"), None);
}

#[test]
fn test_format_multiplier() {
    assert_eq!(format_multiplier(3.0), "3.0");
    assert_eq!(format_multiplier(2.5), "2.5");
    assert_eq!(format_multiplier(12.25), "12.25");
}
