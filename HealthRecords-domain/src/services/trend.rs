//! Trend evaluation for monthly health reports
//!
//! Each metric has a fixed table of inclusive ranges mapping a value to a
//! severity [`Band`]. Two reports are compared metric by metric and every
//! metric gets a [`Verdict`].

use std::fmt;

use serde::{Deserialize, Serialize};

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

use crate::entities::Report;

/// A tracked health metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    BpSystolic,
    BpDiastolic,
    Sugar,
    UricAcid,
}

impl Metric {
    /// Every metric in report order
    pub const ALL: [Metric; 4] = [
        Metric::BpSystolic,
        Metric::BpDiastolic,
        Metric::Sugar,
        Metric::UricAcid,
    ];

    /// Human-readable name
    pub fn label(&self) -> &'static str {
        match self {
            Metric::BpSystolic => "BP Systolic",
            Metric::BpDiastolic => "BP Diastolic",
            Metric::Sugar => "Sugar",
            Metric::UricAcid => "Uric Acid",
        }
    }

    /// The value of this metric on a report, if recorded
    pub fn value_of(&self, report: &Report) -> Option<f64> {
        match self {
            Metric::BpSystolic => report.bp_systolic.map(|v| v as f64),
            Metric::BpDiastolic => report.bp_diastolic.map(|v| v as f64),
            Metric::Sugar => report.sugar,
            Metric::UricAcid => report.uric_acid,
        }
    }

    fn bands(&self) -> &'static [BandRange; 5] {
        match self {
            Metric::BpSystolic => &BP_SYSTOLIC_BANDS,
            Metric::BpDiastolic => &BP_DIASTOLIC_BANDS,
            Metric::Sugar => &SUGAR_BANDS,
            Metric::UricAcid => &URIC_ACID_BANDS,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Severity band of a single value, ordered from `Low` to `Extreme`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub enum Band {
    Low,
    Good,
    Borderline,
    High,
    Extreme,
    /// No value was recorded
    #[serde(rename = "N/A")]
    NotAvailable,
}

impl Band {
    /// Position in the Low..Extreme scale, `None` for `NotAvailable`
    pub fn ordinal(&self) -> Option<u8> {
        match self {
            Band::Low => Some(0),
            Band::Good => Some(1),
            Band::Borderline => Some(2),
            Band::High => Some(3),
            Band::Extreme => Some(4),
            Band::NotAvailable => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Band::Low => "Low",
            Band::Good => "Good",
            Band::Borderline => "Borderline",
            Band::High => "High",
            Band::Extreme => "Extreme",
            Band::NotAvailable => "N/A",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of comparing the latest value of a metric with the previous one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub enum Verdict {
    Improved,
    Degraded,
    #[serde(rename = "No Change")]
    NoChange,
    #[serde(rename = "N/A")]
    NotAvailable,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Improved => "Improved",
            Verdict::Degraded => "Degraded",
            Verdict::NoChange => "No Change",
            Verdict::NotAvailable => "N/A",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive `(lower, upper)` range and the band it maps to
type BandRange = (f64, f64, Band);

static BP_SYSTOLIC_BANDS: [BandRange; 5] = [
    (-1000.0, 89.0, Band::Low),
    (90.0, 120.0, Band::Good),
    (121.0, 139.0, Band::Borderline),
    (140.0, 180.0, Band::High),
    (181.0, 1000.0, Band::Extreme),
];

static BP_DIASTOLIC_BANDS: [BandRange; 5] = [
    (-1000.0, 59.0, Band::Low),
    (60.0, 80.0, Band::Good),
    (81.0, 90.0, Band::Borderline),
    (91.0, 120.0, Band::High),
    (121.0, 1000.0, Band::Extreme),
];

static SUGAR_BANDS: [BandRange; 5] = [
    (-1000.0, 69.0, Band::Low),
    (70.0, 100.0, Band::Good),
    (101.0, 125.0, Band::Borderline),
    (126.0, 200.0, Band::High),
    (201.0, 10000.0, Band::Extreme),
];

static URIC_ACID_BANDS: [BandRange; 5] = [
    (-1000.0, 2.0, Band::Low),
    (3.0, 7.0, Band::Good),
    (8.0, 8.0, Band::Borderline),
    (9.0, 12.0, Band::High),
    (13.0, 1000.0, Band::Extreme),
];

/// Classify a value into its band.
///
/// Absent values are `NotAvailable`. Values that fall outside every range,
/// including the gaps between integer bounds (uric acid 2.5, systolic 120.5),
/// are `Extreme`.
pub fn classify(value: Option<f64>, metric: Metric) -> Band {
    let Some(value) = value else {
        return Band::NotAvailable;
    };

    metric
        .bands()
        .iter()
        .find(|(lower, upper, _)| *lower <= value && value <= *upper)
        .map(|(_, _, band)| *band)
        .unwrap_or(Band::Extreme)
}

/// Verdict for a pair of bands
pub fn compare_bands(previous: Band, latest: Band) -> Verdict {
    let (Some(prev_rank), Some(latest_rank)) = (previous.ordinal(), latest.ordinal()) else {
        return Verdict::NotAvailable;
    };

    if previous == latest {
        Verdict::NoChange
    } else if latest == Band::Good {
        Verdict::Improved
    } else if previous == Band::Good {
        Verdict::Degraded
    } else if latest_rank > prev_rank {
        Verdict::Degraded
    } else if latest_rank < prev_rank {
        Verdict::Improved
    } else {
        Verdict::NoChange
    }
}

/// Verdict for the latest value of a metric against the previous one
pub fn compare(previous: Option<f64>, latest: Option<f64>, metric: Metric) -> Verdict {
    compare_bands(classify(previous, metric), classify(latest, metric))
}

/// Comparison of one metric across two reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct MetricComparison {
    pub metric: Metric,
    pub label: String,
    pub latest_value: Option<f64>,
    pub latest_band: Band,
    pub previous_value: Option<f64>,
    pub previous_band: Band,
    pub verdict: Verdict,
}

/// Alert raised by the latest report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum HealthAlert {
    /// Systolic at or above 180, or diastolic at or above 120
    HypertensiveCrisis,
    /// Sugar at or above 300
    VeryHighSugar,
}

impl HealthAlert {
    pub fn message(&self) -> &'static str {
        match self {
            HealthAlert::HypertensiveCrisis => "Hypertensive crisis suspected. Visit doctor.",
            HealthAlert::VeryHighSugar => "Very high sugar detected. Consult doctor.",
        }
    }
}

/// Full comparison of a patient's latest report with the previous one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct TrendReport {
    pub latest_month: String,
    pub previous_month: String,
    pub metrics: Vec<MetricComparison>,
    pub alerts: Vec<HealthAlert>,
    pub legend: Vec<String>,
}

/// Compare every metric of `latest` against `previous`
pub fn evaluate(previous: &Report, latest: &Report) -> TrendReport {
    let metrics = Metric::ALL
        .iter()
        .map(|metric| {
            let previous_value = metric.value_of(previous);
            let latest_value = metric.value_of(latest);
            let previous_band = classify(previous_value, *metric);
            let latest_band = classify(latest_value, *metric);

            MetricComparison {
                metric: *metric,
                label: metric.label().to_string(),
                latest_value,
                latest_band,
                previous_value,
                previous_band,
                verdict: compare_bands(previous_band, latest_band),
            }
        })
        .collect();

    TrendReport {
        latest_month: latest.month.clone(),
        previous_month: previous.month.clone(),
        metrics,
        alerts: alerts(latest),
        legend: legend(),
    }
}

/// Alerts for a single report. The blood pressure alert needs both readings.
pub fn alerts(report: &Report) -> Vec<HealthAlert> {
    let mut alerts = Vec::new();

    if let (Some(systolic), Some(diastolic)) = (report.bp_systolic, report.bp_diastolic) {
        if systolic >= 180 || diastolic >= 120 {
            alerts.push(HealthAlert::HypertensiveCrisis);
        }
    }

    if report.sugar.is_some_and(|sugar| sugar >= 300.0) {
        alerts.push(HealthAlert::VeryHighSugar);
    }

    alerts
}

/// Reference ranges shown alongside a comparison
pub fn legend() -> Vec<String> {
    vec![
        "BP Systolic: 90-120 Good, 121-139 Borderline, 140-180 High".to_string(),
        "BP Diastolic: 60-80 Good, 81-90 Borderline, 91-120 High".to_string(),
        "Sugar(fasting): 70-100 Good, 101-125 Borderline, 126-200 High".to_string(),
        "Uric Acid: 3-7 Good, 8 Borderline, 9-12 High".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(month: &str, sys: Option<i64>, dia: Option<i64>, sugar: Option<f64>, uric: Option<f64>) -> Report {
        Report {
            id: 1,
            patient_id: 1,
            month: month.to_string(),
            bp_systolic: sys,
            bp_diastolic: dia,
            sugar,
            uric_acid: uric,
            created_at: "2024-01-01 00:00:00".to_string(),
        }
    }

    #[test]
    fn test_systolic_boundaries() {
        assert_eq!(classify(Some(89.0), Metric::BpSystolic), Band::Low);
        assert_eq!(classify(Some(90.0), Metric::BpSystolic), Band::Good);
        assert_eq!(classify(Some(120.0), Metric::BpSystolic), Band::Good);
        assert_eq!(classify(Some(121.0), Metric::BpSystolic), Band::Borderline);
        assert_eq!(classify(Some(139.0), Metric::BpSystolic), Band::Borderline);
        assert_eq!(classify(Some(140.0), Metric::BpSystolic), Band::High);
        assert_eq!(classify(Some(181.0), Metric::BpSystolic), Band::Extreme);
    }

    #[test]
    fn test_uric_acid_single_point_band() {
        assert_eq!(classify(Some(7.0), Metric::UricAcid), Band::Good);
        assert_eq!(classify(Some(8.0), Metric::UricAcid), Band::Borderline);
        assert_eq!(classify(Some(9.0), Metric::UricAcid), Band::High);
    }

    #[test]
    fn test_gaps_and_out_of_table_fall_back_to_extreme() {
        assert_eq!(classify(Some(2.5), Metric::UricAcid), Band::Extreme);
        assert_eq!(classify(Some(120.5), Metric::BpSystolic), Band::Extreme);
        assert_eq!(classify(Some(-5000.0), Metric::Sugar), Band::Extreme);
        assert_eq!(classify(Some(1e12), Metric::BpDiastolic), Band::Extreme);
        assert_eq!(classify(Some(f64::NAN), Metric::Sugar), Band::Extreme);
    }

    #[test]
    fn test_absent_value_is_not_available() {
        for metric in Metric::ALL {
            assert_eq!(classify(None, metric), Band::NotAvailable);
        }
        assert_eq!(Band::NotAvailable.to_string(), "N/A");
    }

    #[test]
    fn test_compare_rules() {
        assert_eq!(compare(Some(130.0), Some(100.0), Metric::BpSystolic), Verdict::Improved);
        assert_eq!(compare(Some(90.0), Some(150.0), Metric::Sugar), Verdict::Degraded);
        assert_eq!(compare(Some(95.0), Some(100.0), Metric::BpSystolic), Verdict::NoChange);
        assert_eq!(compare(None, Some(100.0), Metric::BpSystolic), Verdict::NotAvailable);
        assert_eq!(compare(Some(100.0), None, Metric::Sugar), Verdict::NotAvailable);
    }

    #[test]
    fn test_compare_ordinal_fallback() {
        // Borderline -> Low counts as an improvement
        assert_eq!(compare_bands(Band::Borderline, Band::Low), Verdict::Improved);
        assert_eq!(compare_bands(Band::Low, Band::High), Verdict::Degraded);
        assert_eq!(compare_bands(Band::Extreme, Band::High), Verdict::Improved);
        assert_eq!(compare_bands(Band::Good, Band::Low), Verdict::Degraded);
        assert_eq!(compare_bands(Band::Extreme, Band::Good), Verdict::Improved);
    }

    #[test]
    fn test_verdict_strings() {
        assert_eq!(Verdict::NoChange.to_string(), "No Change");
        assert_eq!(serde_json::to_string(&Verdict::NoChange).unwrap(), "\"No Change\"");
        assert_eq!(serde_json::to_string(&Band::NotAvailable).unwrap(), "\"N/A\"");
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let previous = report("2024-01", Some(130), Some(85), Some(110.0), Some(8.0));
        let latest = report("2024-02", Some(118), Some(95), None, Some(8.0));

        let first = evaluate(&previous, &latest);
        let second = evaluate(&previous, &latest);
        assert_eq!(first, second);

        assert_eq!(first.latest_month, "2024-02");
        assert_eq!(first.previous_month, "2024-01");
        let verdicts: Vec<Verdict> = first.metrics.iter().map(|m| m.verdict).collect();
        assert_eq!(
            verdicts,
            vec![Verdict::Improved, Verdict::Degraded, Verdict::NotAvailable, Verdict::NoChange]
        );
        assert_eq!(first.legend.len(), 4);
        assert!(first.alerts.is_empty());
    }

    #[test]
    fn test_alerts() {
        let crisis = report("2024-03", Some(185), Some(90), Some(320.0), None);
        assert_eq!(
            alerts(&crisis),
            vec![HealthAlert::HypertensiveCrisis, HealthAlert::VeryHighSugar]
        );

        let diastolic_only = report("2024-03", None, Some(125), None, None);
        assert!(alerts(&diastolic_only).is_empty());

        let high_diastolic = report("2024-03", Some(150), Some(120), Some(299.9), None);
        assert_eq!(alerts(&high_diastolic), vec![HealthAlert::HypertensiveCrisis]);
    }
}
