//! Subtally JSON API Health Handlers

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::extensions::*;

/// Healthcheck response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
}

/// Liveness handler
///
/// Returns ok while the process is serving requests.
#[endpoint(tags("health"), summary = "Liveness probe")]
pub(crate) async fn live() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Readiness handler
///
/// Returns ok once the database answers.
#[endpoint(
    tags("health"),
    summary = "Readiness probe",
    responses(
        (status_code = StatusCode::OK, description = "Ready"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Database unreachable"),
    ),
)]
pub(crate) async fn ready(depot: &mut Depot) -> Result<Json<HealthResponse>, StatusError> {
    let state = depot.state_or_500()?;

    if let Err(error) = state.app.health.ping().await {
        warn!("readiness check failed: {error}");

        return Err(StatusError::service_unavailable().brief("Database unreachable"));
    }

    Ok(Json(HealthResponse {
        status: "ready".to_string(),
    }))
}
