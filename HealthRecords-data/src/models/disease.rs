use serde::{Deserialize, Serialize};

/// Storage model for a disease reference entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Disease {
    pub id: i64,

    /// Disease name, unique ignoring case
    pub name: String,

    /// Free-text description
    pub details: String,

    /// Comma-separated symptom list
    pub symptoms: String,

    /// Whether the disease can be treated without a doctor
    pub treatable: bool,

    /// Free-text list of medicines
    pub medicines: String,

    /// Free-text list of hospitals
    pub hospitals: String,

    /// Free-text notes
    pub notes: String,
}

/// Input data for inserting or updating a disease by name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpsertDiseaseRequest {
    pub name: String,
    pub details: String,
    pub symptoms: String,
    pub treatable: bool,
    pub medicines: String,
    pub hospitals: String,
}
