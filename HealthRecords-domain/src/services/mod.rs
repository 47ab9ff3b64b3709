pub mod diseases;
pub mod directory;
pub mod errors;
pub mod export;
pub mod patients;
pub mod reminders;
pub mod reports;
pub mod symptoms;
pub mod trend;

// Domain services
// This module contains business logic implementations.

// Re-export service traits and factory functions
pub use diseases::{create_default_disease_service, DiseaseServiceTrait, SavedDisease};
pub use directory::{create_default_directory_service, DirectoryServiceTrait};
pub use errors::ServiceError;
pub use export::{create_default_export_service, ExportServiceTrait};
pub use patients::{create_default_patient_service, PatientServiceTrait};
pub use reminders::{create_default_reminder_service, ReminderServiceTrait};
pub use reports::{create_default_report_service, ComparisonOutcome, ReportServiceTrait};

// Re-export mock service factory functions when the mock feature is enabled
#[cfg(feature = "mock")]
pub use diseases::create_mock_disease_service;
#[cfg(feature = "mock")]
pub use patients::create_mock_patient_service;
