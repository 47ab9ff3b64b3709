use serde::{Deserialize, Serialize};
use validator::Validate;

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

use super::conversions::{loose_string, validate_not_blank};

/// Domain model for a registered patient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct Patient {
    /// Store-assigned identifier
    pub id: i64,

    /// Full name
    pub name: String,

    /// Age in years
    pub age: Option<i64>,

    pub gender: Option<String>,

    /// Phone number or other contact
    pub contact: Option<String>,

    /// Registration time, `YYYY-MM-DD HH:MM:SS`
    pub created_at: String,
}

/// Request payload for registering a patient
///
/// `age` may be sent as a number or a string; anything that is not a whole
/// number is stored as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct PatientForm {
    #[validate(custom = "validate_not_blank")]
    pub name: String,

    #[serde(default, deserialize_with = "loose_string")]
    pub age: Option<String>,

    #[serde(default)]
    pub gender: Option<String>,

    #[serde(default)]
    pub contact: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_name_fails_validation() {
        let form = PatientForm {
            name: "   ".to_string(),
            ..Default::default()
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_age_accepts_number_or_string() {
        let form: PatientForm = serde_json::from_str(r#"{"name":"Asha","age":42}"#).unwrap();
        assert_eq!(form.age.as_deref(), Some("42"));

        let form: PatientForm = serde_json::from_str(r#"{"name":"Asha","age":"forty"}"#).unwrap();
        assert_eq!(form.age.as_deref(), Some("forty"));

        let form: PatientForm = serde_json::from_str(r#"{"name":"Asha"}"#).unwrap();
        assert!(form.age.is_none());
        assert!(form.validate().is_ok());
    }
}
