// Domain entities and value objects
pub mod conversions;
pub mod directory;
pub mod disease;
pub mod patient;
pub mod reminder;
pub mod report;

// Re-export common types for easier imports
pub use directory::{EmergencyContact, Hospital};
pub use disease::{Disease, DiseaseForm, SymptomMatch, SymptomQuery};
pub use patient::{Patient, PatientForm};
pub use reminder::{DueReminder, Reminder, ReminderForm};
pub use report::{Report, ReportForm};
