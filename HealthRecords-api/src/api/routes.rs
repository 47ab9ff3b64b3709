use std::time::Duration;

use axum::{
    extract::FromRef,
    http::{header, HeaderName, HeaderValue, Method},
    routing::{delete, get, post},
    Extension, Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;

use health_records_domain::database::Database;
use health_records_domain::health::create_health_service;
use health_records_domain::services::{
    create_default_directory_service, create_default_disease_service,
    create_default_export_service, create_default_patient_service,
    create_default_reminder_service, create_default_report_service,
};

use crate::api::handlers::{
    diseases::{self, DiseaseService},
    directory::{self, DirectoryService},
    export::{self, ExportService},
    health,
    patients::{self, PatientService},
    reminders::{self, ReminderService},
    reports::{self, ReportService},
};
use crate::openapi::configure_swagger_routes;

/// Services shared by the API handlers
#[derive(Clone, FromRef)]
pub struct AppState {
    pub patients: PatientService,
    pub reports: ReportService,
    pub diseases: DiseaseService,
    pub reminders: ReminderService,
    pub directory: DirectoryService,
    pub export: ExportService,
}

impl AppState {
    /// Build every service on top of one database handle
    pub fn new(db: &Database) -> Self {
        Self {
            patients: create_default_patient_service(db),
            reports: create_default_report_service(db),
            diseases: create_default_disease_service(db),
            reminders: create_default_reminder_service(db),
            directory: create_default_directory_service(db),
            export: create_default_export_service(db),
        }
    }
}

/// Routes served under `/api/v1`
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/patients", get(patients::list_patients).post(patients::create_patient))
        .route("/patients/:id", get(patients::get_patient).delete(patients::delete_patient))
        .route("/patients/:id/reports", get(reports::list_reports).post(reports::create_report))
        .route("/patients/:id/reports/compare", get(reports::compare_reports))
        .route("/patients/:id/reports/export", get(export::export_patient_reports))
        .route("/reports/:id", delete(reports::delete_report))
        .route("/diseases", get(diseases::list_diseases).put(diseases::save_disease))
        .route("/diseases/:name", get(diseases::get_disease))
        .route("/symptoms/check", post(diseases::check_symptoms))
        .route("/reminders", get(reminders::list_reminders).post(reminders::create_reminder))
        .route("/reminders/due", post(reminders::take_due_reminders))
        .route("/hospitals", get(directory::list_hospitals))
        .route("/emergency", get(directory::emergency_contacts))
        .route("/export/patients", get(export::export_all_patients))
}

/// Create the application router
pub fn create_app(db: &Database) -> Router {
    debug!("Creating application router");

    let state = AppState::new(db);
    let health_service = create_health_service(db);

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .layer(Extension(health_service));

    debug!("Public routes configured");

    let app = Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes())
        .with_state(state);

    debug!("API routes nested");

    let app = app.merge(configure_swagger_routes());

    debug!("Swagger UI merged");

    let app = configure_middleware(app);
    debug!("Middleware configured");

    health::initialize_server_start_time();

    app
}

/// Apply request tracing, CORS and security headers to the whole application
pub fn configure_middleware(app: Router) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600));

    let security_headers = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ));

    app.layer(cors)
        .layer(security_headers)
        .layer(TraceLayer::new_for_http())
}
