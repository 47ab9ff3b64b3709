use std::sync::Arc;

use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{info, instrument};

use health_records_domain::entities::{Disease, DiseaseForm, SymptomMatch, SymptomQuery};
use health_records_domain::services::{DiseaseServiceTrait, SavedDisease};

use crate::entities::ErrorResponse;

/// Service type for dependency injection
pub type DiseaseService = Arc<dyn DiseaseServiceTrait + Send + Sync>;

/// List the disease reference, ordered by name
#[utoipa::path(
    get,
    path = "/api/v1/diseases",
    responses(
        (status = 200, description = "Known diseases", body = [Disease]),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "diseases"
)]
#[instrument(skip(service))]
pub async fn list_diseases(
    State(service): State<DiseaseService>,
) -> Result<impl IntoResponse, ErrorResponse> {
    Ok(Json(service.list().await?))
}

/// Look up a disease by name, ignoring case
#[utoipa::path(
    get,
    path = "/api/v1/diseases/{name}",
    params(
        ("name" = String, Path, description = "Disease name")
    ),
    responses(
        (status = 200, description = "Disease found", body = Disease),
        (status = 404, description = "Disease not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "diseases"
)]
#[instrument(skip(service))]
pub async fn get_disease(
    State(service): State<DiseaseService>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, ErrorResponse> {
    Ok(Json(service.lookup(&name).await?))
}

/// Add a disease, or update the existing entry with the same name
///
/// Responds 201 when the disease is new and 200 when an entry was updated.
#[utoipa::path(
    put,
    path = "/api/v1/diseases",
    request_body = DiseaseForm,
    responses(
        (status = 200, description = "Disease updated", body = SavedDisease),
        (status = 201, description = "Disease added", body = SavedDisease),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "diseases"
)]
#[instrument(skip(service, form))]
pub async fn save_disease(
    State(service): State<DiseaseService>,
    Json(form): Json<DiseaseForm>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let saved = service.save(form).await?;
    let status = if saved.created {
        info!("Disease '{}' added", saved.disease.name);
        StatusCode::CREATED
    } else {
        info!("Disease '{}' updated", saved.disease.name);
        StatusCode::OK
    };
    Ok((status, Json(saved)))
}

/// Find diseases sharing symptoms with the query, best match first
#[utoipa::path(
    post,
    path = "/api/v1/symptoms/check",
    request_body = SymptomQuery,
    responses(
        (status = 200, description = "Matching diseases, possibly none", body = [SymptomMatch]),
        (status = 400, description = "No symptoms given", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "diseases"
)]
#[instrument(skip(service))]
pub async fn check_symptoms(
    State(service): State<DiseaseService>,
    Json(query): Json<SymptomQuery>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let matches = service.check_symptoms(&query.symptoms).await?;
    info!("Symptom check returned {} matches", matches.len());
    Ok(Json(matches))
}
