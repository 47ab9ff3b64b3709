use serde::{Deserialize, Serialize};

/// Storage model for a patient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    /// Store-assigned identifier
    pub id: i64,

    /// Full name
    pub name: String,

    /// Age in years, absent when not given or not a number
    pub age: Option<i64>,

    /// Optional gender
    pub gender: Option<String>,

    /// Optional phone or other contact
    pub contact: Option<String>,

    /// When the patient was registered
    pub created_at: String,
}

/// Input data for creating a new patient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePatientRequest {
    pub name: String,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub contact: Option<String>,
}
