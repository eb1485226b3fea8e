//! HTTP API for scan control
//!
//! A thin axum layer over the [`Controller`] commands. Handlers never reach
//! into the crawl loop; they only issue commands and read the shared run
//! state, so a status query never blocks on a page fetch.

use crate::crawler::Controller;
use crate::state::{MatchRecord, StatusSnapshot};
use crate::ScoutError;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// Request body for starting a scan
#[derive(Debug, Deserialize)]
pub struct StartRequest {
    /// Absolute URL of the site to scan
    pub site: String,
    /// Absolute URL of the resource to hunt for
    pub target: String,
}

/// Builds the axum router with all API endpoints
pub fn router(controller: Arc<Controller>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/start", post(handle_start))
        .route("/api/v1/stop", post(handle_stop))
        .route("/api/v1/status", get(handle_status))
        .route("/api/v1/results", get(handle_results))
        .with_state(controller)
}

/// Starts the API server on the given bind address
pub async fn serve(bind_address: &str, controller: Arc<Controller>) -> crate::Result<()> {
    let app = router(controller);
    let listener = tokio::net::TcpListener::bind(bind_address).await?;
    tracing::info!("API listening on http://{}", bind_address);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> StatusCode {
    StatusCode::OK
}

/// `POST /api/v1/start` - 204 on success, 409 on conflict, 400 on bad input
async fn handle_start(
    State(controller): State<Arc<Controller>>,
    Json(request): Json<StartRequest>,
) -> Response {
    match controller.start(&request.site, &request.target) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(ScoutError::ScanInProgress) => (
            StatusCode::CONFLICT,
            Json(json!({ "error": "a scan is already in progress" })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

/// `POST /api/v1/stop` - idempotent
async fn handle_stop(State(controller): State<Arc<Controller>>) -> Json<serde_json::Value> {
    controller.stop();
    Json(json!({ "status": "stopping" }))
}

/// `GET /api/v1/status`
async fn handle_status(State(controller): State<Arc<Controller>>) -> Json<StatusSnapshot> {
    Json(controller.status())
}

/// `GET /api/v1/results` - ordered matches, during and after a run
async fn handle_results(State(controller): State<Arc<Controller>>) -> Json<Vec<MatchRecord>> {
    Json(controller.results())
}
