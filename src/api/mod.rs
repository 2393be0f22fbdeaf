//! HTTP control API.
//!
//! Thin JSON facade over [`Camera`]. All camera access is serialized through
//! one mutex and runs on the blocking thread pool.

mod handlers;

#[cfg(test)]
mod tests;

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tracing::info;

use crate::camera::Camera;

pub use handlers::{ApiResponse, StatusResponse, first_param, format_multiplier, parse_enable};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub camera: Arc<Mutex<Camera>>,
}

impl AppState {
    pub fn new(camera: Camera) -> Self {
        Self {
            camera: Arc::new(Mutex::new(camera)),
        }
    }
}

/// Build the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/status", get(handlers::status))
        .route("/zoom", get(handlers::set_zoom))
        .route("/icr/toggle", get(handlers::toggle_icr))
        .route("/ir_correction", get(handlers::set_ir_correction))
        .with_state(state)
}

/// Serve the API on `addr` until the process is stopped.
pub async fn serve(state: AppState, addr: &str) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(state)).await
}
