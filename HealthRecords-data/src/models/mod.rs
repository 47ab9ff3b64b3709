// Storage models, one module per table
pub mod disease;
pub mod hospital;
pub mod patient;
pub mod reminder;
pub mod report;

pub use disease::{Disease, UpsertDiseaseRequest};
pub use hospital::Hospital;
pub use patient::{CreatePatientRequest, Patient};
pub use reminder::{CreateReminderRequest, DueReminder, Reminder};
pub use report::{CreateReportRequest, PatientExportRow, Report};

/// Format of every `created_at` / `remind_at` column
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local time in [`TIMESTAMP_FORMAT`]
pub fn now_timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}
