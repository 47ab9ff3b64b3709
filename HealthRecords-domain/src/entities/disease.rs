use serde::{Deserialize, Serialize};
use validator::Validate;

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

use super::conversions::validate_not_blank;

/// Domain model for a disease reference entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct Disease {
    pub id: i64,
    pub name: String,
    pub details: String,

    /// Comma-separated symptom list
    pub symptoms: String,

    /// True when the disease can be treated without a doctor
    pub treatable: bool,

    pub medicines: String,
    pub hospitals: String,
    pub notes: String,
}

/// Request payload for adding or updating a disease by name
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct DiseaseForm {
    #[validate(custom = "validate_not_blank")]
    pub name: String,

    #[serde(default)]
    pub details: String,

    /// Comma-separated symptom list
    #[serde(default)]
    pub symptoms: String,

    #[serde(default)]
    pub treatable: bool,

    #[serde(default)]
    pub medicines: String,

    #[serde(default)]
    pub hospitals: String,
}

/// Symptom checker query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct SymptomQuery {
    /// Comma-separated symptoms, e.g. `"fever, cough"`
    pub symptoms: String,
}

/// A disease that shares at least one symptom with a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct SymptomMatch {
    pub name: String,
    pub details: String,

    /// Query symptoms found in the disease, sorted
    pub matched: Vec<String>,

    /// Every symptom of the disease, sorted
    pub all_symptoms: Vec<String>,

    /// Number of matched symptoms
    pub count: usize,
}
