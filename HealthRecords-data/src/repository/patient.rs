use async_trait::async_trait;
use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

use crate::database::Database;
use crate::models::{now_timestamp, CreatePatientRequest, Patient};
use super::errors::RepositoryError;

/// Repository trait for patients
#[async_trait]
pub trait PatientRepositoryTrait {
    /// Create a new patient from a request
    async fn create(&self, request: CreatePatientRequest) -> Result<Patient, RepositoryError>;

    /// Get all patients, newest first
    async fn get_all(&self) -> Result<Vec<Patient>, RepositoryError>;

    /// Get a patient by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<Patient>, RepositoryError>;

    /// Delete a patient and all of its reports. Returns false when no such patient exists.
    async fn delete(&self, id: i64) -> Result<bool, RepositoryError>;
}

/// SQLite-backed patient repository
#[derive(Debug, Clone)]
pub struct PatientRepository {
    db: Database,
}

impl PatientRepository {
    /// Create a new repository over the given store
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

const PATIENT_COLUMNS: &str = "id, name, age, gender, contact, created_at";

fn map_patient(row: &Row<'_>) -> rusqlite::Result<Patient> {
    Ok(Patient {
        id: row.get(0)?,
        name: row.get(1)?,
        age: row.get(2)?,
        gender: row.get(3)?,
        contact: row.get(4)?,
        created_at: row.get(5)?,
    })
}

#[async_trait]
impl PatientRepositoryTrait for PatientRepository {
    async fn create(&self, request: CreatePatientRequest) -> Result<Patient, RepositoryError> {
        let created_at = now_timestamp();
        let conn = self.db.conn()?;

        conn.execute(
            "INSERT INTO patients (name, age, gender, contact, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                request.name,
                request.age,
                request.gender,
                request.contact,
                created_at
            ],
        )?;

        let id = conn.last_insert_rowid();
        debug!("Stored patient {} ({})", id, request.name);

        Ok(Patient {
            id,
            name: request.name,
            age: request.age,
            gender: request.gender,
            contact: request.contact,
            created_at,
        })
    }

    async fn get_all(&self) -> Result<Vec<Patient>, RepositoryError> {
        let conn = self.db.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM patients ORDER BY id DESC",
            PATIENT_COLUMNS
        ))?;

        let patients = stmt
            .query_map([], map_patient)?
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Loaded {} patients", patients.len());
        Ok(patients)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Patient>, RepositoryError> {
        let conn = self.db.conn()?;
        let patient = conn
            .query_row(
                &format!("SELECT {} FROM patients WHERE id = ?1", PATIENT_COLUMNS),
                params![id],
                map_patient,
            )
            .optional()?;

        Ok(patient)
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        let mut conn = self.db.conn()?;
        let tx = conn.transaction()?;

        let reports = tx.execute("DELETE FROM reports WHERE patient_id = ?1", params![id])?;
        let patients = tx.execute("DELETE FROM patients WHERE id = ?1", params![id])?;
        tx.commit()?;

        debug!("Deleted patient {} ({} reports removed)", id, reports);
        Ok(patients > 0)
    }
}

#[cfg(any(test, feature = "mock"))]
pub mod tests {
    use std::sync::Mutex;

    use super::*;

    /// In-memory stand-in for [`PatientRepository`]
    #[derive(Default)]
    pub struct MockPatientRepository {
        patients: Mutex<Vec<Patient>>,
    }

    impl MockPatientRepository {
        /// Create a new empty mock repository
        pub fn new() -> Self {
            Self::default()
        }

        /// Create a mock repository with predefined patients
        pub fn with_patients(patients: Vec<Patient>) -> Self {
            Self {
                patients: Mutex::new(patients),
            }
        }
    }

    #[async_trait]
    impl PatientRepositoryTrait for MockPatientRepository {
        async fn create(&self, request: CreatePatientRequest) -> Result<Patient, RepositoryError> {
            let mut patients = self.patients.lock()?;
            let id = patients.iter().map(|p| p.id).max().unwrap_or(0) + 1;
            let patient = Patient {
                id,
                name: request.name,
                age: request.age,
                gender: request.gender,
                contact: request.contact,
                created_at: now_timestamp(),
            };
            patients.push(patient.clone());
            Ok(patient)
        }

        async fn get_all(&self) -> Result<Vec<Patient>, RepositoryError> {
            let mut patients = self.patients.lock()?.clone();
            patients.sort_by(|a, b| b.id.cmp(&a.id));
            Ok(patients)
        }

        async fn get_by_id(&self, id: i64) -> Result<Option<Patient>, RepositoryError> {
            Ok(self.patients.lock()?.iter().find(|p| p.id == id).cloned())
        }

        async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
            let mut patients = self.patients.lock()?;
            let before = patients.len();
            patients.retain(|p| p.id != id);
            Ok(patients.len() < before)
        }
    }
}
