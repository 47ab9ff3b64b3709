use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Configure Swagger UI endpoints
pub fn configure_swagger_routes() -> SwaggerUi {
    SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}

// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::api::handlers::health::health_check,

        // Patient endpoints
        crate::api::handlers::patients::list_patients,
        crate::api::handlers::patients::create_patient,
        crate::api::handlers::patients::get_patient,
        crate::api::handlers::patients::delete_patient,

        // Report endpoints
        crate::api::handlers::reports::list_reports,
        crate::api::handlers::reports::create_report,
        crate::api::handlers::reports::compare_reports,
        crate::api::handlers::reports::delete_report,

        // Disease reference and symptom checker
        crate::api::handlers::diseases::list_diseases,
        crate::api::handlers::diseases::get_disease,
        crate::api::handlers::diseases::save_disease,
        crate::api::handlers::diseases::check_symptoms,

        // Reminder endpoints
        crate::api::handlers::reminders::list_reminders,
        crate::api::handlers::reminders::create_reminder,
        crate::api::handlers::reminders::take_due_reminders,

        // Directory endpoints
        crate::api::handlers::directory::list_hospitals,
        crate::api::handlers::directory::emergency_contacts,

        // CSV export
        crate::api::handlers::export::export_patient_reports,
        crate::api::handlers::export::export_all_patients
    ),
    components(
        schemas(
            // Domain entities
            health_records_domain::entities::Patient,
            health_records_domain::entities::PatientForm,
            health_records_domain::entities::Report,
            health_records_domain::entities::ReportForm,
            health_records_domain::entities::Disease,
            health_records_domain::entities::DiseaseForm,
            health_records_domain::entities::SymptomQuery,
            health_records_domain::entities::SymptomMatch,
            health_records_domain::entities::Reminder,
            health_records_domain::entities::ReminderForm,
            health_records_domain::entities::DueReminder,
            health_records_domain::entities::Hospital,
            health_records_domain::entities::EmergencyContact,
            health_records_domain::services::SavedDisease,

            // Trend evaluation
            health_records_domain::services::trend::TrendReport,
            health_records_domain::services::trend::MetricComparison,
            health_records_domain::services::trend::Metric,
            health_records_domain::services::trend::Band,
            health_records_domain::services::trend::Verdict,
            health_records_domain::services::trend::HealthAlert,

            // API entities
            crate::entities::ErrorResponse,
            crate::entities::ComparisonResponse,

            // Health handlers
            crate::api::handlers::health::HealthResponse,
            crate::api::handlers::health::ComponentStatus,
            crate::api::handlers::health::ComponentHealthStatus
        )
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "patients", description = "Patient registration"),
        (name = "reports", description = "Monthly health reports and trend comparison"),
        (name = "diseases", description = "Disease reference and symptom checker"),
        (name = "reminders", description = "Medicine reminders"),
        (name = "directory", description = "Hospitals and emergency numbers"),
        (name = "export", description = "CSV export")
    ),
    info(
        title = "Health Records API",
        version = "0.1.0",
        description = "Patient records, monthly health reports and trend feedback",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        ),
    ),
    servers(
        (url = "/", description = "Local development server")
    )
)]
pub struct ApiDoc;
