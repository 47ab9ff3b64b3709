use serde::{Deserialize, Serialize};
use validator::Validate;

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

use super::conversions::{validate_not_blank, validate_remind_at};

/// Domain model for a medicine reminder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct Reminder {
    pub id: i64,
    pub user_id: Option<i64>,
    pub patient_id: Option<i64>,
    pub medicine: String,

    /// Due time, `YYYY-MM-DD HH:MM:SS`
    pub remind_at: String,

    /// Set once the reminder has been delivered
    pub done: bool,

    pub created_at: String,
}

/// A reminder that has come due
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct DueReminder {
    pub id: i64,

    /// Name of the patient, when the reminder is tied to one that still exists
    pub patient_name: Option<String>,

    pub medicine: String,
    pub remind_at: String,
}

/// Request payload for setting a reminder
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct ReminderForm {
    #[serde(default)]
    pub user_id: Option<i64>,

    #[serde(default)]
    pub patient_id: Option<i64>,

    #[validate(custom = "validate_not_blank")]
    pub medicine: String,

    /// `YYYY-MM-DD HH:MM` or `YYYY-MM-DD HH:MM:SS`
    #[validate(custom = "validate_remind_at")]
    pub remind_at: String,
}
