use std::sync::Arc;

use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{info, instrument};

use health_records_domain::entities::{Patient, PatientForm};
use health_records_domain::services::PatientServiceTrait;

use crate::entities::ErrorResponse;

/// Service type for dependency injection
pub type PatientService = Arc<dyn PatientServiceTrait + Send + Sync>;

/// List every registered patient, newest first
#[utoipa::path(
    get,
    path = "/api/v1/patients",
    responses(
        (status = 200, description = "Registered patients", body = [Patient]),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "patients"
)]
#[instrument(skip(service))]
pub async fn list_patients(
    State(service): State<PatientService>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let patients = service.list_patients().await?;
    info!("Listing {} patients", patients.len());
    Ok(Json(patients))
}

/// Register a new patient
#[utoipa::path(
    post,
    path = "/api/v1/patients",
    request_body = PatientForm,
    responses(
        (status = 201, description = "Patient registered", body = Patient),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "patients"
)]
#[instrument(skip(service, form))]
pub async fn create_patient(
    State(service): State<PatientService>,
    Json(form): Json<PatientForm>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let patient = service.create_patient(form).await?;
    info!("Patient registered with ID: {}", patient.id);
    Ok((StatusCode::CREATED, Json(patient)))
}

/// Get a single patient
#[utoipa::path(
    get,
    path = "/api/v1/patients/{id}",
    params(
        ("id" = i64, Path, description = "Patient ID")
    ),
    responses(
        (status = 200, description = "Patient found", body = Patient),
        (status = 404, description = "Patient not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "patients"
)]
#[instrument(skip(service))]
pub async fn get_patient(
    State(service): State<PatientService>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ErrorResponse> {
    Ok(Json(service.get_patient(id).await?))
}

/// Delete a patient together with all of their reports
#[utoipa::path(
    delete,
    path = "/api/v1/patients/{id}",
    params(
        ("id" = i64, Path, description = "Patient ID")
    ),
    responses(
        (status = 204, description = "Patient and reports deleted"),
        (status = 404, description = "Patient not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "patients"
)]
#[instrument(skip(service))]
pub async fn delete_patient(
    State(service): State<PatientService>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ErrorResponse> {
    service.delete_patient(id).await?;
    info!("Patient {} deleted", id);
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use health_records_domain::services::create_mock_patient_service;

    fn form(name: &str) -> PatientForm {
        PatientForm {
            name: name.to_string(),
            age: Some("61".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_then_fetch_patient() {
        let service = create_mock_patient_service();

        let response = create_patient(State(service.clone()), Json(form("Asha")))
            .await
            .unwrap()
            .into_response();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = get_patient(State(service), Path(1)).await.unwrap().into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_delete_unknown_patient_is_not_found() {
        let err = delete_patient(State(create_mock_patient_service()), Path(9))
            .await
            .err()
            .unwrap();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_blank_name_is_rejected() {
        let err = create_patient(State(create_mock_patient_service()), Json(form(" ")))
            .await
            .err()
            .unwrap();
        assert_eq!(err.error, "validation_error");
    }
}
