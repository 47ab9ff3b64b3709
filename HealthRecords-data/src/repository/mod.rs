// Repository module structure
pub mod errors;
mod disease;
mod hospital;
mod patient;
mod reminder;
mod report;

// Re-export commonly used types
pub use errors::RepositoryError;
pub use disease::{DiseaseRepository, DiseaseRepositoryTrait, UpsertOutcome};
pub use hospital::{HospitalRepository, HospitalRepositoryTrait};
pub use patient::{PatientRepository, PatientRepositoryTrait};
pub use reminder::{ReminderRepository, ReminderRepositoryTrait};
pub use report::{ReportRepository, ReportRepositoryTrait};

// Re-export test doubles for both testing and when mock feature is enabled
#[cfg(any(test, feature = "mock"))]
pub mod tests {
    pub use super::disease::tests::MockDiseaseRepository;
    pub use super::patient::tests::MockPatientRepository;
}
