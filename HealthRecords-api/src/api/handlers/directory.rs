use std::sync::Arc;

use axum::{
    extract::{Json, State},
    response::IntoResponse,
};
use tracing::instrument;

use health_records_domain::entities::{EmergencyContact, Hospital};
use health_records_domain::services::DirectoryServiceTrait;

use crate::entities::ErrorResponse;

/// Service type for dependency injection
pub type DirectoryService = Arc<dyn DirectoryServiceTrait + Send + Sync>;

/// List known hospitals
#[utoipa::path(
    get,
    path = "/api/v1/hospitals",
    responses(
        (status = 200, description = "Hospitals ordered by name", body = [Hospital]),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "directory"
)]
#[instrument(skip(service))]
pub async fn list_hospitals(
    State(service): State<DirectoryService>,
) -> Result<impl IntoResponse, ErrorResponse> {
    Ok(Json(service.list_hospitals().await?))
}

/// Emergency service numbers
#[utoipa::path(
    get,
    path = "/api/v1/emergency",
    responses(
        (status = 200, description = "Emergency contacts", body = [EmergencyContact]),
    ),
    tag = "directory"
)]
#[instrument(skip(service))]
pub async fn emergency_contacts(State(service): State<DirectoryService>) -> impl IntoResponse {
    Json(service.emergency_contacts())
}
