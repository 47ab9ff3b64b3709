use serde::{Deserialize, Serialize};

/// Storage model for a medicine reminder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: i64,

    /// Owning user, if any
    pub user_id: Option<i64>,

    /// Patient the medicine is for, if any
    pub patient_id: Option<i64>,

    /// Medicine name
    pub medicine: String,

    /// Due time as `YYYY-MM-DD HH:MM:SS`
    pub remind_at: String,

    /// Whether the reminder has been delivered
    pub done: bool,

    pub created_at: String,
}

/// Input data for creating a reminder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateReminderRequest {
    pub user_id: Option<i64>,
    pub patient_id: Option<i64>,
    pub medicine: String,
    pub remind_at: String,
}

/// A due reminder joined with the patient's name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DueReminder {
    pub id: i64,
    pub patient_name: Option<String>,
    pub medicine: String,
    pub remind_at: String,
}
