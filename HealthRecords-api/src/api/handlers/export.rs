use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{info, instrument};

use health_records_domain::services::ExportServiceTrait;

use crate::entities::ErrorResponse;

/// Service type for dependency injection
pub type ExportService = Arc<dyn ExportServiceTrait + Send + Sync>;

/// Download a patient's reports as CSV
///
/// Responds 204 when the patient has no reports yet.
#[utoipa::path(
    get,
    path = "/api/v1/patients/{id}/reports/export",
    params(
        ("id" = i64, Path, description = "Patient ID")
    ),
    responses(
        (status = 200, description = "Reports as CSV", content_type = "text/csv", body = String),
        (status = 204, description = "Patient has no reports"),
        (status = 404, description = "Patient not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "export"
)]
#[instrument(skip(service))]
pub async fn export_patient_reports(
    State(service): State<ExportService>,
    Path(patient_id): Path<i64>,
) -> Result<Response, ErrorResponse> {
    match service.export_patient_reports(patient_id).await? {
        Some(csv) => {
            info!("Exported reports of patient {}", patient_id);
            Ok(csv_response(&format!("patient_{}_reports.csv", patient_id), csv))
        }
        None => {
            info!("Patient {} has no reports to export", patient_id);
            Ok(StatusCode::NO_CONTENT.into_response())
        }
    }
}

/// Download every patient with their reports as CSV
#[utoipa::path(
    get,
    path = "/api/v1/export/patients",
    responses(
        (status = 200, description = "Patients and reports as CSV", content_type = "text/csv", body = String),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "export"
)]
#[instrument(skip(service))]
pub async fn export_all_patients(
    State(service): State<ExportService>,
) -> Result<Response, ErrorResponse> {
    let csv = service.export_all_patients().await?;
    Ok(csv_response("patients_export.csv", csv))
}

fn csv_response(filename: &str, body: String) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, mime::TEXT_CSV_UTF_8.to_string()),
            (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", filename)),
        ],
        body,
    )
        .into_response()
}
