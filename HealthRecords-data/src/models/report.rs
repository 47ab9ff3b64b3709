use serde::{Deserialize, Serialize};

/// Storage model for a monthly health report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Store-assigned identifier
    pub id: i64,

    /// Patient the report belongs to
    pub patient_id: i64,

    /// Report month as `YYYY-MM`
    pub month: String,

    /// Systolic blood pressure (the higher number)
    pub bp_systolic: Option<i64>,

    /// Diastolic blood pressure (the lower number)
    pub bp_diastolic: Option<i64>,

    /// Blood sugar level
    pub sugar: Option<f64>,

    /// Uric acid level
    pub uric_acid: Option<f64>,

    /// When the report was saved
    pub created_at: String,
}

/// Input data for creating a new report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateReportRequest {
    pub patient_id: i64,
    pub month: String,
    pub bp_systolic: Option<i64>,
    pub bp_diastolic: Option<i64>,
    pub sugar: Option<f64>,
    pub uric_acid: Option<f64>,
}

/// One row of the all-patients export: a patient joined with one of its
/// reports, or with no report at all
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientExportRow {
    pub patient_id: i64,
    pub name: String,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub contact: Option<String>,
    pub month: Option<String>,
    pub bp_systolic: Option<i64>,
    pub bp_diastolic: Option<i64>,
    pub sugar: Option<f64>,
    pub uric_acid: Option<f64>,
}
