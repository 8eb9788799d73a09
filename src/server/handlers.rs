//! HTTP handlers and the `{code, message, data}` response envelope.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Json};
use serde::Serialize;
use tracing::{debug, warn};

use geofence::models::{Containment, GeofenceRequest};
use geofence::{check_points, AreaBuilder, GeofenceError};

/// Application state shared across handlers
pub struct AppState {
    pub builder: AreaBuilder,
}

/// Response body for every geofencing outcome
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub code: u16,
    pub message: String,
    pub data: Option<T>,
}

pub type ApiError = (StatusCode, Json<Envelope<Vec<Containment>>>);

fn error_response(status: StatusCode, message: String) -> ApiError {
    (
        status,
        Json(Envelope {
            code: status.as_u16(),
            message,
            data: None,
        }),
    )
}

fn geofence_error_response(err: &GeofenceError) -> ApiError {
    let message = match err {
        GeofenceError::MissingAreaSpec => "Radius or geom must be provided".to_string(),
        GeofenceError::IncompleteRadiusSpec => "Lon, lat must be provided".to_string(),
        GeofenceError::InvalidArea(reason) => format!("Invalid geometry: {}", reason),
    };
    error_response(StatusCode::BAD_REQUEST, message)
}

/// Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Check which points fall inside the requested radius or polygon
pub async fn geofencing_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GeofenceRequest>,
) -> Result<Json<Envelope<Vec<Containment>>>, ApiError> {
    request.validate().map_err(|e| {
        warn!("Rejected geofencing request: {}", e);
        error_response(StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
    })?;

    let spec = request.area_spec().map_err(|e| {
        warn!("Missing area in geofencing request: {}", e);
        geofence_error_response(&e)
    })?;

    let data = check_points(&state.builder, &spec, &request.points).map_err(|e| {
        warn!("Geofence area construction failed: {}", e);
        geofence_error_response(&e)
    })?;

    debug!("Geofencing check on {} points passed", data.len());

    Ok(Json(Envelope {
        code: StatusCode::OK.as_u16(),
        message: "Geofencing check passed".to_string(),
        data: Some(data),
    }))
}
