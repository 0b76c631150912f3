use axum::{
    extract::{Path, Query, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::cors::{Any, CorsLayer};
use thiserror::Error;
use anyhow::Context;
use tracing::info;

use models::errors::SiteError;
use models::registry::ApplicationStatus;
use storage::RegistryStore;

// Define the enrollment API error enum
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing: {0}")]
    MissingFields(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error("application {0} was not found")]
    NotFound(u64),
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<SiteError> for ApiError {
    fn from(err: SiteError) -> Self {
        match err {
            SiteError::InvalidInput(msg) => ApiError::InvalidInput(msg),
            other => ApiError::Storage(other.to_string()),
        }
    }
}

// Convert errors into the `{ok: false, error}` envelope the frontend reads.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::MissingFields(_) | ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "ok": false,
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

// Shared state for the Axum application
#[derive(Clone)]
struct AppState {
    registry: Arc<RegistryStore>,
}

/// The enrollment intake payload. The frontend posts the whole reservation
/// record; the registry only keeps the identity and placement fields, so
/// everything else is ignored and absent fields default to empty.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct EnrollRequest {
    lrn: String,
    full_name: String,
    grade_level: String,
    strand: String,
    email: String,
    phone: String,
    address: String,
}

#[derive(Debug, Default, Deserialize)]
struct ListParams {
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StatusUpdateRequest {
    status: String,
}

fn blank_to_none(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

// Handler for the /api/enroll endpoint
async fn enroll_handler(
    State(state): State<AppState>,
    Json(payload): Json<EnrollRequest>,
) -> Result<Json<Value>, ApiError> {
    let mut missing = Vec::new();
    for (name, value) in [
        ("lrn", &payload.lrn),
        ("fullName", &payload.full_name),
        ("gradeLevel", &payload.grade_level),
    ] {
        if value.trim().is_empty() {
            missing.push(name);
        }
    }
    if !missing.is_empty() {
        return Err(ApiError::MissingFields(missing.join(", ")));
    }

    let lrn = payload.lrn.trim();
    state.registry.upsert_student(
        lrn,
        payload.full_name.trim(),
        blank_to_none(&payload.email),
        blank_to_none(&payload.phone),
        blank_to_none(&payload.address),
    )?;
    let application_id = state.registry.insert_application(
        lrn,
        payload.grade_level.trim(),
        blank_to_none(&payload.strand),
    )?;

    info!("Recorded application {} for LRN {}", application_id, lrn);

    Ok(Json(json!({
        "ok": true,
        "application_id": application_id.to_string(),
    })))
}

// Handler for the /api/applications endpoint
async fn list_applications_handler(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>, ApiError> {
    let status = match params.status.as_deref() {
        Some(raw) => Some(raw.parse::<ApplicationStatus>()?),
        None => None,
    };
    let items = state.registry.applications(status)?;

    Ok(Json(json!({
        "ok": true,
        "items": items,
    })))
}

// Handler for the /api/applications/{id}/status endpoint
async fn update_status_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(payload): Json<StatusUpdateRequest>,
) -> Result<Json<Value>, ApiError> {
    let status = payload.status.trim().parse::<ApplicationStatus>()?;
    state
        .registry
        .set_application_status(id, status)?
        .ok_or(ApiError::NotFound(id))?;

    Ok(Json(json!({ "ok": true })))
}

// Handler for the /api/health endpoint
async fn health_check_handler() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "ok": true })))
}

// Handler for the /api/version endpoint
async fn version_handler() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({ "version": env!("CARGO_PKG_VERSION") })),
    )
}

/// Builds the service router around a shared registry.
pub fn router(registry: Arc<RegistryStore>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH])
        .allow_origin(Any);

    Router::new()
        .route("/api/enroll", post(enroll_handler))
        .route("/api/applications", get(list_applications_handler))
        .route("/api/applications/:id/status", patch(update_status_handler))
        .route("/api/health", get(health_check_handler))
        .route("/api/version", get(version_handler))
        .with_state(AppState { registry })
        .layer(cors)
}

// Main function to start the enrollment API server
pub async fn start_server(
    addr: SocketAddr,
    registry: Arc<RegistryStore>,
    shutdown_rx: oneshot::Receiver<()>,
) -> Result<(), anyhow::Error> {
    let app = router(registry);

    info!("Enrollment API server listening on {}", addr);

    let listener = TcpListener::bind(&addr)
        .await
        .context(format!("Failed to bind to address: {}", addr))?;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            let _ = shutdown_rx.await;
        })
        .await
        .context("Enrollment API server failed to start or run")?;

    info!("Enrollment API server stopped.");
    Ok(())
}
