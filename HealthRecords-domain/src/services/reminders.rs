use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use tracing::{info, instrument};
use validator::Validate;

use health_records_data::database::Database;
use health_records_data::models::TIMESTAMP_FORMAT;
use health_records_data::repository::{ReminderRepository, ReminderRepositoryTrait};

use crate::entities::conversions::{
    convert_to_data_reminder_request, convert_to_domain_due_reminder, convert_to_domain_reminder,
};
use crate::entities::{DueReminder, Reminder, ReminderForm};
use super::errors::ServiceError;

/// Trait for medicine reminder operations
#[async_trait]
pub trait ReminderServiceTrait {
    /// Schedule a reminder
    async fn set_reminder(&self, form: ReminderForm) -> Result<Reminder, ServiceError>;

    /// Reminders of a user, earliest first. `None` lists reminders without an owner.
    async fn list_reminders(&self, user_id: Option<i64>) -> Result<Vec<Reminder>, ServiceError>;

    /// Pending reminders due at `now`. Each one is returned once and then marked done.
    async fn take_due(&self, now: NaiveDateTime) -> Result<Vec<DueReminder>, ServiceError>;
}

/// Reminder service for domain logic
pub struct ReminderService<R: ReminderRepositoryTrait> {
    repository: R,
}

impl<R: ReminderRepositoryTrait> ReminderService<R> {
    /// Create a new reminder service
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: ReminderRepositoryTrait + Send + Sync> ReminderServiceTrait for ReminderService<R> {
    #[instrument(skip(self, form))]
    async fn set_reminder(&self, form: ReminderForm) -> Result<Reminder, ServiceError> {
        form.validate()?;

        let request = convert_to_data_reminder_request(&form).ok_or_else(|| {
            ServiceError::Validation("remind_at: time must be YYYY-MM-DD HH:MM".to_string())
        })?;
        let reminder = self.repository.create(request).await?;
        info!("Reminder {} set for {}", reminder.id, reminder.remind_at);

        Ok(convert_to_domain_reminder(reminder))
    }

    async fn list_reminders(&self, user_id: Option<i64>) -> Result<Vec<Reminder>, ServiceError> {
        let reminders = self.repository.get_by_user(user_id).await?;
        Ok(reminders.into_iter().map(convert_to_domain_reminder).collect())
    }

    #[instrument(skip(self))]
    async fn take_due(&self, now: NaiveDateTime) -> Result<Vec<DueReminder>, ServiceError> {
        let now = now.format(TIMESTAMP_FORMAT).to_string();
        let due = self.repository.take_due(&now).await?;

        if !due.is_empty() {
            info!("Delivered {} due reminders", due.len());
        }

        Ok(due.into_iter().map(convert_to_domain_due_reminder).collect())
    }
}

/// Factory function to create a reminder service over the given store
pub fn create_default_reminder_service(db: &Database) -> Arc<dyn ReminderServiceTrait + Send + Sync> {
    Arc::new(ReminderService::new(ReminderRepository::new(db.clone())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use health_records_data::database::DatabaseConfig;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn form(medicine: &str, remind_at: &str) -> ReminderForm {
        ReminderForm {
            user_id: Some(1),
            patient_id: None,
            medicine: medicine.to_string(),
            remind_at: remind_at.to_string(),
        }
    }

    #[tokio::test]
    async fn test_due_reminders_are_returned_once() {
        let db = Database::in_memory().unwrap();
        let service = ReminderService::new(ReminderRepository::new(db));

        let stored = service.set_reminder(form("Metformin", "2024-05-01 08:00")).await.unwrap();
        assert_eq!(stored.remind_at, "2024-05-01 08:00:00");
        service.set_reminder(form("Aspirin", "2024-05-03 08:00")).await.unwrap();

        let due = service.take_due(at(2, 0)).await.unwrap();
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].medicine, "Metformin");

        assert!(service.take_due(at(2, 0)).await.unwrap().is_empty());

        let all = service.list_reminders(Some(1)).await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all[0].done);
        assert!(!all[1].done);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_callers_share_due_reminders_without_overlap() {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            sqlite_path: dir.path().join("records.db"),
            max_connections: 4,
            timeout_seconds: 30,
        };
        let service = Arc::new(ReminderService::new(ReminderRepository::new(
            Database::open(&config).unwrap(),
        )));

        for minute in 0..50 {
            let remind_at = format!("2024-05-01 07:{:02}", minute);
            service.set_reminder(form("Metformin", &remind_at)).await.unwrap();
        }

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let service = Arc::clone(&service);
                tokio::spawn(async move { service.take_due(at(2, 0)).await.unwrap().len() })
            })
            .collect();

        let mut delivered = 0;
        for handle in handles {
            delivered += handle.await.unwrap();
        }
        assert_eq!(delivered, 50);
    }

    #[tokio::test]
    async fn test_invalid_reminder_input() {
        let service = ReminderService::new(ReminderRepository::new(Database::in_memory().unwrap()));

        let err = service.set_reminder(form("", "2024-05-01 08:00")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(msg) if msg.contains("medicine")));

        let err = service.set_reminder(form("Aspirin", "soon")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(msg) if msg.contains("remind_at")));
    }

    #[tokio::test]
    async fn test_reminder_for_unknown_patient() {
        let service = ReminderService::new(ReminderRepository::new(Database::in_memory().unwrap()));
        let mut request = form("Aspirin", "2024-05-01 08:00");
        request.patient_id = Some(77);

        assert!(matches!(
            service.set_reminder(request).await,
            Err(ServiceError::NotFound(_))
        ));
    }
}
