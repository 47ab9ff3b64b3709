use std::sync::Arc;

use axum::{
    extract::{Json, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{Local, NaiveDateTime};
use serde::Deserialize;
use tracing::{info, instrument, warn};
use utoipa::IntoParams;

use health_records_domain::entities::conversions::normalize_remind_at;
use health_records_domain::entities::{DueReminder, Reminder, ReminderForm};
use health_records_domain::services::ReminderServiceTrait;

use crate::entities::ErrorResponse;

/// Service type for dependency injection
pub type ReminderService = Arc<dyn ReminderServiceTrait + Send + Sync>;

/// Query parameters for listing reminders
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReminderQuery {
    /// Owner of the reminders; omit to list reminders without an owner
    pub user_id: Option<i64>,
}

/// Query parameters for collecting due reminders
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DueQuery {
    /// Reference time, `YYYY-MM-DD HH:MM[:SS]` (default: current local time)
    pub at: Option<String>,
}

/// List reminders of one user, soonest first
#[utoipa::path(
    get,
    path = "/api/v1/reminders",
    params(ReminderQuery),
    responses(
        (status = 200, description = "Reminders of the user", body = [Reminder]),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "reminders"
)]
#[instrument(skip(service))]
pub async fn list_reminders(
    State(service): State<ReminderService>,
    Query(query): Query<ReminderQuery>,
) -> Result<impl IntoResponse, ErrorResponse> {
    Ok(Json(service.list_reminders(query.user_id).await?))
}

/// Set a medicine reminder
#[utoipa::path(
    post,
    path = "/api/v1/reminders",
    request_body = ReminderForm,
    responses(
        (status = 201, description = "Reminder set", body = Reminder),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Patient not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "reminders"
)]
#[instrument(skip(service, form))]
pub async fn create_reminder(
    State(service): State<ReminderService>,
    Json(form): Json<ReminderForm>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let reminder = service.set_reminder(form).await?;
    Ok((StatusCode::CREATED, Json(reminder)))
}

/// Collect every reminder that has come due and mark it done
///
/// Each due reminder is returned exactly once.
#[utoipa::path(
    post,
    path = "/api/v1/reminders/due",
    params(DueQuery),
    responses(
        (status = 200, description = "Reminders that came due", body = [DueReminder]),
        (status = 400, description = "Invalid reference time", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "reminders"
)]
#[instrument(skip(service))]
pub async fn take_due_reminders(
    State(service): State<ReminderService>,
    Query(query): Query<DueQuery>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let now = match query.at.as_deref() {
        Some(at) => parse_reference_time(at).ok_or_else(|| {
            warn!("Rejected reference time: {}", at);
            ErrorResponse::bad_request("at must be YYYY-MM-DD HH:MM")
        })?,
        None => Local::now().naive_local(),
    };

    let due = service.take_due(now).await?;
    if !due.is_empty() {
        info!("{} reminders came due at {}", due.len(), now);
    }
    Ok(Json(due))
}

fn parse_reference_time(value: &str) -> Option<NaiveDateTime> {
    let normalized = normalize_remind_at(value)?;
    NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%d %H:%M:%S").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reference_time() {
        let at = parse_reference_time("2024-05-01 08:30").unwrap();
        assert_eq!(at.format("%Y-%m-%d %H:%M:%S").to_string(), "2024-05-01 08:30:00");
        assert!(parse_reference_time("2024-05-01 08:30:59").is_some());
        assert!(parse_reference_time("now").is_none());
    }
}
