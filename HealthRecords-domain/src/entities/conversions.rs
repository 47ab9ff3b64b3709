use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use validator::ValidationError;

use health_records_data::models as data;

use super::{
    Disease, DiseaseForm, DueReminder, Hospital, Patient, PatientForm, Reminder, ReminderForm,
    Report, ReportForm,
};

// Conversion functions between domain entities and data models
// These functions follow the pattern convert_to_[target_layer]_[model_name]

/// Accept a JSON string, number or boolean as text; `null` or a missing field is `None`
pub fn loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Parse an optional whole number, treating blank or malformed input as absent
pub fn parse_optional_int(value: Option<&str>) -> Option<i64> {
    value.and_then(|v| v.trim().parse::<i64>().ok())
}

/// Parse an optional real number, treating blank or malformed input as absent
pub fn parse_optional_real(value: Option<&str>) -> Option<f64> {
    value
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Split a blood pressure entry into `(systolic, diastolic)`
///
/// `"120/80"` gives both readings and `"120"` only the systolic one. Any
/// malformed entry yields neither.
pub fn parse_blood_pressure(value: Option<&str>) -> (Option<i64>, Option<i64>) {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return (None, None);
    };

    match raw.split_once('/') {
        Some((sys, dia)) => match (sys.trim().parse::<i64>(), dia.trim().parse::<i64>()) {
            (Ok(sys), Ok(dia)) => (Some(sys), Some(dia)),
            _ => (None, None),
        },
        None => match raw.parse::<i64>() {
            Ok(sys) => (Some(sys), None),
            Err(_) => (None, None),
        },
    }
}

/// Blank optional text becomes `None`, anything else is trimmed
pub fn normalize_optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// True for a `YYYY-MM` month with a real month number
pub fn is_valid_month(month: &str) -> bool {
    month.len() == 7
        && NaiveDate::parse_from_str(&format!("{}-01", month), "%Y-%m-%d").is_ok()
}

/// Normalize a reminder time to `YYYY-MM-DD HH:MM:SS`
///
/// `YYYY-MM-DD HH:MM` gets `:00` seconds appended.
pub fn normalize_remind_at(value: &str) -> Option<String> {
    let value = value.trim();
    if let Ok(at) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(at.format(data::TIMESTAMP_FORMAT).to_string());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M")
        .ok()
        .map(|at| at.format(data::TIMESTAMP_FORMAT).to_string())
}

pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("required");
        error.message = Some("must not be empty".into());
        return Err(error);
    }
    Ok(())
}

pub fn validate_month(value: &str) -> Result<(), ValidationError> {
    if !is_valid_month(value.trim()) {
        let mut error = ValidationError::new("month_format");
        error.message = Some("month must be in YYYY-MM format".into());
        return Err(error);
    }
    Ok(())
}

pub fn validate_remind_at(value: &str) -> Result<(), ValidationError> {
    if normalize_remind_at(value).is_none() {
        let mut error = ValidationError::new("datetime_format");
        error.message = Some("time must be YYYY-MM-DD HH:MM".into());
        return Err(error);
    }
    Ok(())
}

/// Convert from domain form to data model for patient creation
pub fn convert_to_data_patient_request(form: &PatientForm) -> data::CreatePatientRequest {
    data::CreatePatientRequest {
        name: form.name.trim().to_string(),
        age: parse_optional_int(form.age.as_deref()),
        gender: normalize_optional_text(form.gender.clone()),
        contact: normalize_optional_text(form.contact.clone()),
    }
}

/// Convert from domain form to data model for report creation
pub fn convert_to_data_report_request(patient_id: i64, form: &ReportForm) -> data::CreateReportRequest {
    let (bp_systolic, bp_diastolic) = parse_blood_pressure(form.bp.as_deref());

    data::CreateReportRequest {
        patient_id,
        month: form.month.trim().to_string(),
        bp_systolic,
        bp_diastolic,
        sugar: parse_optional_real(form.sugar.as_deref()),
        uric_acid: parse_optional_real(form.uric_acid.as_deref()),
    }
}

/// Convert from domain form to data model for a disease upsert. Names are stored lower-cased.
pub fn convert_to_data_disease_request(form: &DiseaseForm) -> data::UpsertDiseaseRequest {
    data::UpsertDiseaseRequest {
        name: form.name.trim().to_lowercase(),
        details: form.details.trim().to_string(),
        symptoms: form.symptoms.trim().to_string(),
        treatable: form.treatable,
        medicines: form.medicines.trim().to_string(),
        hospitals: form.hospitals.trim().to_string(),
    }
}

/// Convert from domain form to data model for reminder creation
pub fn convert_to_data_reminder_request(form: &ReminderForm) -> Option<data::CreateReminderRequest> {
    Some(data::CreateReminderRequest {
        user_id: form.user_id,
        patient_id: form.patient_id,
        medicine: form.medicine.trim().to_string(),
        remind_at: normalize_remind_at(&form.remind_at)?,
    })
}

pub fn convert_to_domain_patient(patient: data::Patient) -> Patient {
    Patient {
        id: patient.id,
        name: patient.name,
        age: patient.age,
        gender: patient.gender,
        contact: patient.contact,
        created_at: patient.created_at,
    }
}

pub fn convert_to_domain_report(report: data::Report) -> Report {
    Report {
        id: report.id,
        patient_id: report.patient_id,
        month: report.month,
        bp_systolic: report.bp_systolic,
        bp_diastolic: report.bp_diastolic,
        sugar: report.sugar,
        uric_acid: report.uric_acid,
        created_at: report.created_at,
    }
}

pub fn convert_to_domain_disease(disease: data::Disease) -> Disease {
    Disease {
        id: disease.id,
        name: disease.name,
        details: disease.details,
        symptoms: disease.symptoms,
        treatable: disease.treatable,
        medicines: disease.medicines,
        hospitals: disease.hospitals,
        notes: disease.notes,
    }
}

pub fn convert_to_domain_reminder(reminder: data::Reminder) -> Reminder {
    Reminder {
        id: reminder.id,
        user_id: reminder.user_id,
        patient_id: reminder.patient_id,
        medicine: reminder.medicine,
        remind_at: reminder.remind_at,
        done: reminder.done,
        created_at: reminder.created_at,
    }
}

pub fn convert_to_domain_due_reminder(due: data::DueReminder) -> DueReminder {
    DueReminder {
        id: due.id,
        patient_name: due.patient_name,
        medicine: due.medicine,
        remind_at: due.remind_at,
    }
}

pub fn convert_to_domain_hospital(hospital: data::Hospital) -> Hospital {
    Hospital {
        id: hospital.id,
        name: hospital.name,
        city: hospital.city,
        contact: hospital.contact,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_blood_pressure() {
        assert_eq!(parse_blood_pressure(Some("120/80")), (Some(120), Some(80)));
        assert_eq!(parse_blood_pressure(Some(" 135 / 88 ")), (Some(135), Some(88)));
        assert_eq!(parse_blood_pressure(Some("120")), (Some(120), None));
        assert_eq!(parse_blood_pressure(Some("abc")), (None, None));
        assert_eq!(parse_blood_pressure(Some("120/abc")), (None, None));
        assert_eq!(parse_blood_pressure(Some("120.5/80")), (None, None));
        assert_eq!(parse_blood_pressure(Some("")), (None, None));
        assert_eq!(parse_blood_pressure(None), (None, None));
    }

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(parse_optional_int(Some("42")), Some(42));
        assert_eq!(parse_optional_int(Some("42.5")), None);
        assert_eq!(parse_optional_int(Some("")), None);
        assert_eq!(parse_optional_real(Some("95.5")), Some(95.5));
        assert_eq!(parse_optional_real(Some("high")), None);
        assert_eq!(parse_optional_real(Some("NaN")), None);
    }

    #[test]
    fn test_normalize_remind_at() {
        assert_eq!(
            normalize_remind_at("2024-05-01 08:30").as_deref(),
            Some("2024-05-01 08:30:00")
        );
        assert_eq!(
            normalize_remind_at("2024-05-01 08:30:15").as_deref(),
            Some("2024-05-01 08:30:15")
        );
        assert!(normalize_remind_at("tomorrow").is_none());
        assert!(normalize_remind_at("2024-05-01").is_none());
    }

    #[test]
    fn test_report_form_conversion_coerces_bad_numbers() {
        let form = ReportForm {
            month: " 2024-03 ".to_string(),
            bp: Some("140/90".to_string()),
            sugar: Some("n/a".to_string()),
            uric_acid: Some("6.1".to_string()),
        };

        let request = convert_to_data_report_request(7, &form);
        assert_eq!(request.patient_id, 7);
        assert_eq!(request.month, "2024-03");
        assert_eq!(request.bp_systolic, Some(140));
        assert_eq!(request.bp_diastolic, Some(90));
        assert_eq!(request.sugar, None);
        assert_eq!(request.uric_acid, Some(6.1));
    }

    #[test]
    fn test_disease_names_are_lowercased() {
        let form = DiseaseForm {
            name: "  Gout ".to_string(),
            ..Default::default()
        };
        assert_eq!(convert_to_data_disease_request(&form).name, "gout");
    }
}
