use serde::{Deserialize, Serialize};
use validator::Validate;

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

use super::conversions::{loose_string, validate_month};

/// Domain model for a monthly health report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct Report {
    pub id: i64,

    /// Patient the report belongs to
    pub patient_id: i64,

    /// Report month, `YYYY-MM`
    pub month: String,

    /// Systolic blood pressure (the higher number)
    pub bp_systolic: Option<i64>,

    /// Diastolic blood pressure (the lower number)
    pub bp_diastolic: Option<i64>,

    pub sugar: Option<f64>,

    pub uric_acid: Option<f64>,

    /// When the report was saved
    pub created_at: String,
}

/// Request payload for adding a report to a patient
///
/// `bp` is entered as `"systolic/diastolic"` or just `"systolic"`. Numeric
/// fields that do not parse are stored as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct ReportForm {
    /// Report month, `YYYY-MM`
    #[validate(custom = "validate_month")]
    pub month: String,

    #[serde(default, deserialize_with = "loose_string")]
    pub bp: Option<String>,

    #[serde(default, deserialize_with = "loose_string")]
    pub sugar: Option<String>,

    #[serde(default, deserialize_with = "loose_string")]
    pub uric_acid: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_format_is_validated() {
        let ok = ReportForm {
            month: "2024-02".to_string(),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());

        for bad in ["", "2024-13", "Feb 2024", "2024-2", "2024-02-01"] {
            let form = ReportForm {
                month: bad.to_string(),
                ..Default::default()
            };
            assert!(form.validate().is_err(), "{} should be rejected", bad);
        }
    }
}
