use std::sync::Arc;

use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{info, instrument};

use health_records_domain::entities::{Report, ReportForm};
use health_records_domain::services::ReportServiceTrait;

use crate::entities::{ComparisonResponse, ErrorResponse};

/// Service type for dependency injection
pub type ReportService = Arc<dyn ReportServiceTrait + Send + Sync>;

/// List a patient's reports, latest month first
#[utoipa::path(
    get,
    path = "/api/v1/patients/{id}/reports",
    params(
        ("id" = i64, Path, description = "Patient ID")
    ),
    responses(
        (status = 200, description = "Reports of the patient", body = [Report]),
        (status = 404, description = "Patient not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "reports"
)]
#[instrument(skip(service))]
pub async fn list_reports(
    State(service): State<ReportService>,
    Path(patient_id): Path<i64>,
) -> Result<impl IntoResponse, ErrorResponse> {
    Ok(Json(service.list_reports(patient_id).await?))
}

/// Add a monthly report to a patient
#[utoipa::path(
    post,
    path = "/api/v1/patients/{id}/reports",
    params(
        ("id" = i64, Path, description = "Patient ID")
    ),
    request_body = ReportForm,
    responses(
        (status = 201, description = "Report saved", body = Report),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Patient not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "reports"
)]
#[instrument(skip(service, form))]
pub async fn create_report(
    State(service): State<ReportService>,
    Path(patient_id): Path<i64>,
    Json(form): Json<ReportForm>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let report = service.create_report(patient_id, form).await?;
    info!("Report {} saved for patient {} ({})", report.id, patient_id, report.month);
    Ok((StatusCode::CREATED, Json(report)))
}

/// Compare a patient's latest report with the one before it
#[utoipa::path(
    get,
    path = "/api/v1/patients/{id}/reports/compare",
    params(
        ("id" = i64, Path, description = "Patient ID")
    ),
    responses(
        (status = 200, description = "Comparison, or insufficient_data with fewer than two reports", body = ComparisonResponse),
        (status = 404, description = "Patient not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "reports"
)]
#[instrument(skip(service))]
pub async fn compare_reports(
    State(service): State<ReportService>,
    Path(patient_id): Path<i64>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let outcome = service.compare_latest(patient_id).await?;
    Ok(Json(ComparisonResponse::from(outcome)))
}

/// Delete a single report
#[utoipa::path(
    delete,
    path = "/api/v1/reports/{id}",
    params(
        ("id" = i64, Path, description = "Report ID")
    ),
    responses(
        (status = 204, description = "Report deleted"),
        (status = 404, description = "Report not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "reports"
)]
#[instrument(skip(service))]
pub async fn delete_report(
    State(service): State<ReportService>,
    Path(report_id): Path<i64>,
) -> Result<impl IntoResponse, ErrorResponse> {
    service.delete_report(report_id).await?;
    info!("Report {} deleted", report_id);
    Ok(StatusCode::NO_CONTENT)
}
