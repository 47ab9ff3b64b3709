//! CSV rendering of stored reports
//!
//! Fields containing a comma, a quote or a line break are wrapped in quotes
//! with embedded quotes doubled. Absent values become empty fields. Lines end
//! with `\r\n`.

use std::borrow::Cow;

use crate::models::{PatientExportRow, Report};

/// Header of a single patient's report export
pub const REPORT_EXPORT_HEADER: [&str; 6] =
    ["Month", "BP Systolic", "BP Diastolic", "Sugar", "Uric Acid", "Saved At"];

/// Header of the all-patients export
pub const PATIENT_EXPORT_HEADER: [&str; 10] = [
    "PatientID",
    "Name",
    "Age",
    "Gender",
    "Contact",
    "Month",
    "BP_Systolic",
    "BP_Diastolic",
    "Sugar",
    "Uric",
];

/// Quote a field when it needs it
pub fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\r', '\n']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

fn push_line<S: AsRef<str>>(out: &mut String, fields: &[S]) {
    let line = fields
        .iter()
        .map(|f| escape_field(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",");
    out.push_str(&line);
    out.push_str("\r\n");
}

fn int_field(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Whole numbers keep one decimal place (`95.0`), others print as-is
fn real_field(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() && v.fract() == 0.0 => format!("{:.1}", v),
        Some(v) => v.to_string(),
        None => String::new(),
    }
}

/// Render one patient's reports, in the order given
pub fn reports_to_csv(reports: &[Report]) -> String {
    let mut out = String::new();
    push_line(&mut out, &REPORT_EXPORT_HEADER);

    for report in reports {
        push_line(
            &mut out,
            &[
                report.month.clone(),
                int_field(report.bp_systolic),
                int_field(report.bp_diastolic),
                real_field(report.sugar),
                real_field(report.uric_acid),
                report.created_at.clone(),
            ],
        );
    }

    out
}

/// Render the patients-with-reports join, in the order given
pub fn patients_to_csv(rows: &[PatientExportRow]) -> String {
    let mut out = String::new();
    push_line(&mut out, &PATIENT_EXPORT_HEADER);

    for row in rows {
        push_line(
            &mut out,
            &[
                row.patient_id.to_string(),
                row.name.clone(),
                int_field(row.age),
                row.gender.clone().unwrap_or_default(),
                row.contact.clone().unwrap_or_default(),
                row.month.clone().unwrap_or_default(),
                int_field(row.bp_systolic),
                int_field(row.bp_diastolic),
                real_field(row.sugar),
                real_field(row.uric_acid),
            ],
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_field() {
        assert_eq!(escape_field("plain"), "plain");
        assert_eq!(escape_field("a,b"), "\"a,b\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_field("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_empty_export_is_header_line_only() {
        assert_eq!(
            reports_to_csv(&[]),
            "Month,BP Systolic,BP Diastolic,Sugar,Uric Acid,Saved At\r\n"
        );
    }

    #[test]
    fn test_reports_csv_layout() {
        let reports = vec![Report {
            id: 1,
            patient_id: 1,
            month: "2024-01".to_string(),
            bp_systolic: Some(120),
            bp_diastolic: None,
            sugar: Some(95.0),
            uric_acid: Some(6.5),
            created_at: "2024-01-05 10:00:00".to_string(),
        }];

        let csv = reports_to_csv(&reports);
        let lines: Vec<&str> = csv.split("\r\n").collect();
        assert_eq!(lines[0], "Month,BP Systolic,BP Diastolic,Sugar,Uric Acid,Saved At");
        assert_eq!(lines[1], "2024-01,120,,95.0,6.5,2024-01-05 10:00:00");
        assert_eq!(lines[2], "");
    }

    #[test]
    fn test_patients_csv_quotes_names() {
        let rows = vec![PatientExportRow {
            patient_id: 3,
            name: "Doe, Jane".to_string(),
            age: Some(51),
            gender: None,
            contact: Some("555-0100".to_string()),
            month: None,
            bp_systolic: None,
            bp_diastolic: None,
            sugar: None,
            uric_acid: None,
        }];

        let csv = patients_to_csv(&rows);
        assert!(csv.starts_with(
            "PatientID,Name,Age,Gender,Contact,Month,BP_Systolic,BP_Diastolic,Sugar,Uric\r\n"
        ));
        assert!(csv.contains("3,\"Doe, Jane\",51,,555-0100,,,,,\r\n"));
    }
}
