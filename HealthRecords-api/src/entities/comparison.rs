use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use health_records_domain::services::trend::TrendReport;
use health_records_domain::services::ComparisonOutcome;

/// Response of the report comparison endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ComparisonResponse {
    /// `compared` or `insufficient_data`
    pub status: String,

    /// Number of stored reports, present when there are fewer than two
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Latest report compared with the previous one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<TrendReport>,
}

impl From<ComparisonOutcome> for ComparisonResponse {
    fn from(outcome: ComparisonOutcome) -> Self {
        match outcome {
            ComparisonOutcome::InsufficientData { available } => Self {
                status: "insufficient_data".to_string(),
                available: Some(available),
                message: Some("Need at least 2 reports for comparison.".to_string()),
                comparison: None,
            },
            ComparisonOutcome::Compared(report) => Self {
                status: "compared".to_string(),
                available: None,
                message: None,
                comparison: Some(report),
            },
        }
    }
}
