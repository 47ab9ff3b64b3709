use async_trait::async_trait;
use rusqlite::{params, Row, TransactionBehavior};
use tracing::debug;

use crate::database::Database;
use crate::models::{now_timestamp, CreateReminderRequest, DueReminder, Reminder};
use super::errors::{map_constraint_error, RepositoryError};

/// Repository trait for medicine reminders
#[async_trait]
pub trait ReminderRepositoryTrait {
    /// Store a pending reminder
    async fn create(&self, request: CreateReminderRequest) -> Result<Reminder, RepositoryError>;

    /// Reminders of a user (or unowned reminders when `None`), earliest first
    async fn get_by_user(&self, user_id: Option<i64>) -> Result<Vec<Reminder>, RepositoryError>;

    /// Claim every pending reminder due at or before `now` (`YYYY-MM-DD HH:MM:SS`)
    ///
    /// Claimed reminders are marked done in the same write transaction, so a
    /// reminder is handed to exactly one caller.
    async fn take_due(&self, now: &str) -> Result<Vec<DueReminder>, RepositoryError>;
}

/// SQLite-backed reminder repository
#[derive(Debug, Clone)]
pub struct ReminderRepository {
    db: Database,
}

impl ReminderRepository {
    /// Create a new repository over the given store
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

fn map_reminder(row: &Row<'_>) -> rusqlite::Result<Reminder> {
    Ok(Reminder {
        id: row.get(0)?,
        user_id: row.get(1)?,
        patient_id: row.get(2)?,
        medicine: row.get(3)?,
        remind_at: row.get(4)?,
        done: row.get::<_, i64>(5)? != 0,
        created_at: row.get(6)?,
    })
}

#[async_trait]
impl ReminderRepositoryTrait for ReminderRepository {
    async fn create(&self, request: CreateReminderRequest) -> Result<Reminder, RepositoryError> {
        let created_at = now_timestamp();
        let conn = self.db.conn()?;

        conn.execute(
            "INSERT INTO reminders (user_id, patient_id, medicine, remind_at, done, created_at)
             VALUES (?1, ?2, ?3, ?4, 0, ?5)",
            params![
                request.user_id,
                request.patient_id,
                request.medicine,
                request.remind_at,
                created_at
            ],
        )
        .map_err(|e| {
            map_constraint_error(e, &format!("patient {}", request.patient_id.unwrap_or_default()))
        })?;

        let id = conn.last_insert_rowid();
        debug!("Stored reminder {} for {}", id, request.remind_at);

        Ok(Reminder {
            id,
            user_id: request.user_id,
            patient_id: request.patient_id,
            medicine: request.medicine,
            remind_at: request.remind_at,
            done: false,
            created_at,
        })
    }

    async fn get_by_user(&self, user_id: Option<i64>) -> Result<Vec<Reminder>, RepositoryError> {
        let conn = self.db.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, patient_id, medicine, remind_at, done, created_at
             FROM reminders
             WHERE user_id IS ?1
             ORDER BY remind_at ASC, id ASC",
        )?;
        let reminders = stmt
            .query_map(params![user_id], map_reminder)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(reminders)
    }

    async fn take_due(&self, now: &str) -> Result<Vec<DueReminder>, RepositoryError> {
        let mut conn = self.db.conn()?;
        // IMMEDIATE takes the write lock up front so concurrent callers queue here
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let pending = {
            let mut stmt = tx.prepare(
                "SELECT r.id, p.name, r.medicine, r.remind_at
                 FROM reminders r
                 LEFT JOIN patients p ON p.id = r.patient_id
                 WHERE r.done = 0 AND r.remind_at <= ?1
                 ORDER BY r.remind_at ASC, r.id ASC",
            )?;
            let rows = stmt
                .query_map(params![now], |row| {
                    Ok(DueReminder {
                        id: row.get(0)?,
                        patient_name: row.get(1)?,
                        medicine: row.get(2)?,
                        remind_at: row.get(3)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            rows
        };

        let mut claimed = Vec::with_capacity(pending.len());
        {
            let mut stmt = tx.prepare("UPDATE reminders SET done = 1 WHERE id = ?1 AND done = 0")?;
            for reminder in pending {
                if stmt.execute(params![reminder.id])? == 1 {
                    claimed.push(reminder);
                }
            }
        }
        tx.commit()?;

        debug!("Claimed {} reminders due at {}", claimed.len(), now);
        Ok(claimed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::DatabaseConfig;
    use crate::models::CreatePatientRequest;
    use crate::repository::{PatientRepository, PatientRepositoryTrait};

    fn request(user_id: Option<i64>, patient_id: Option<i64>, at: &str) -> CreateReminderRequest {
        CreateReminderRequest {
            user_id,
            patient_id,
            medicine: "Metformin".to_string(),
            remind_at: at.to_string(),
        }
    }

    #[tokio::test]
    async fn test_due_reminders_join_patient_name() {
        let db = Database::in_memory().unwrap();
        let repo = ReminderRepository::new(db.clone());
        let patient = PatientRepository::new(db)
            .create(CreatePatientRequest {
                name: "Asha".to_string(),
                age: None,
                gender: None,
                contact: None,
            })
            .await
            .unwrap();

        repo.create(request(None, Some(patient.id), "2024-01-01 08:00:00")).await.unwrap();
        repo.create(request(None, None, "2024-01-01 09:00:00")).await.unwrap();
        repo.create(request(None, None, "2030-01-01 09:00:00")).await.unwrap();

        let due = repo.take_due("2024-06-01 00:00:00").await.unwrap();
        assert_eq!(due.len(), 2);
        assert_eq!(due[0].patient_name.as_deref(), Some("Asha"));
        assert_eq!(due[1].patient_name, None);

        assert!(repo.take_due("2024-06-01 00:00:00").await.unwrap().is_empty());
        assert_eq!(repo.take_due("2031-01-01 00:00:00").await.unwrap().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_take_due_claims_each_reminder_once() {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            sqlite_path: dir.path().join("reminders.db"),
            max_connections: 8,
            timeout_seconds: 30,
        };
        let repo = ReminderRepository::new(Database::open(&config).unwrap());

        const STORED: usize = 500;
        for i in 0..STORED {
            let at = format!("2024-01-01 {:02}:{:02}:00", (i / 60) % 24, i % 60);
            repo.create(request(Some(1), None, &at)).await.unwrap();
        }

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.take_due("2024-06-01 00:00:00").await.unwrap() })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.extend(handle.await.unwrap().into_iter().map(|d| d.id));
        }
        ids.sort_unstable();
        let delivered = ids.len();
        ids.dedup();

        assert_eq!(delivered, STORED);
        assert_eq!(ids.len(), STORED);
    }

    #[tokio::test]
    async fn test_get_by_user_orders_by_time() {
        let repo = ReminderRepository::new(Database::in_memory().unwrap());
        repo.create(request(Some(7), None, "2024-03-01 08:00:00")).await.unwrap();
        repo.create(request(Some(7), None, "2024-02-01 08:00:00")).await.unwrap();
        repo.create(request(Some(8), None, "2024-01-01 08:00:00")).await.unwrap();
        repo.create(request(None, None, "2024-01-01 08:00:00")).await.unwrap();

        let mine = repo.get_by_user(Some(7)).await.unwrap();
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].remind_at, "2024-02-01 08:00:00");
        assert!(!mine[0].done);

        assert_eq!(repo.get_by_user(None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_reminder_for_missing_patient_is_not_found() {
        let repo = ReminderRepository::new(Database::in_memory().unwrap());
        let err = repo
            .create(request(None, Some(404), "2024-01-01 08:00:00"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound(_)));
    }
}
