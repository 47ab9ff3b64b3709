use async_trait::async_trait;
use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

use crate::database::Database;
use crate::models::{Disease, UpsertDiseaseRequest};
use super::errors::RepositoryError;

/// Result of an upsert: whether the name was new or already present
#[derive(Debug, Clone, PartialEq)]
pub enum UpsertOutcome {
    Created(Disease),
    Updated(Disease),
}

impl UpsertOutcome {
    /// The stored disease, whichever way it got there
    pub fn disease(&self) -> &Disease {
        match self {
            UpsertOutcome::Created(d) | UpsertOutcome::Updated(d) => d,
        }
    }

    pub fn into_disease(self) -> Disease {
        match self {
            UpsertOutcome::Created(d) | UpsertOutcome::Updated(d) => d,
        }
    }
}

/// Repository trait for the disease reference table
#[async_trait]
pub trait DiseaseRepositoryTrait {
    /// Find a disease by name, ignoring case
    async fn get_by_name(&self, name: &str) -> Result<Option<Disease>, RepositoryError>;

    /// All diseases ordered by name
    async fn get_all(&self) -> Result<Vec<Disease>, RepositoryError>;

    /// Insert a disease or update the one with the same name (ignoring case).
    /// Notes of an existing entry are left untouched.
    async fn upsert(&self, request: UpsertDiseaseRequest) -> Result<UpsertOutcome, RepositoryError>;
}

/// SQLite-backed disease repository
#[derive(Debug, Clone)]
pub struct DiseaseRepository {
    db: Database,
}

impl DiseaseRepository {
    /// Create a new repository over the given store
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

const DISEASE_COLUMNS: &str = "id, name, details, symptoms, treatable, medicines, hospitals, notes";

fn map_disease(row: &Row<'_>) -> rusqlite::Result<Disease> {
    Ok(Disease {
        id: row.get(0)?,
        name: row.get(1)?,
        details: row.get(2)?,
        symptoms: row.get(3)?,
        treatable: row.get::<_, i64>(4)? != 0,
        medicines: row.get(5)?,
        hospitals: row.get(6)?,
        notes: row.get(7)?,
    })
}

#[async_trait]
impl DiseaseRepositoryTrait for DiseaseRepository {
    async fn get_by_name(&self, name: &str) -> Result<Option<Disease>, RepositoryError> {
        let conn = self.db.conn()?;
        let disease = conn
            .query_row(
                &format!(
                    "SELECT {} FROM diseases WHERE lower(name) = lower(?1)",
                    DISEASE_COLUMNS
                ),
                params![name.trim()],
                map_disease,
            )
            .optional()?;

        debug!("Disease lookup '{}': found={}", name, disease.is_some());
        Ok(disease)
    }

    async fn get_all(&self) -> Result<Vec<Disease>, RepositoryError> {
        let conn = self.db.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM diseases ORDER BY name ASC",
            DISEASE_COLUMNS
        ))?;
        let diseases = stmt
            .query_map([], map_disease)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(diseases)
    }

    async fn upsert(&self, request: UpsertDiseaseRequest) -> Result<UpsertOutcome, RepositoryError> {
        let mut conn = self.db.conn()?;
        let tx = conn.transaction()?;

        let existing: Option<i64> = tx
            .query_row(
                "SELECT id FROM diseases WHERE lower(name) = lower(?1)",
                params![request.name],
                |row| row.get(0),
            )
            .optional()?;

        let created = match existing {
            Some(id) => {
                tx.execute(
                    "UPDATE diseases
                     SET details = ?1, symptoms = ?2, treatable = ?3, medicines = ?4, hospitals = ?5
                     WHERE id = ?6",
                    params![
                        request.details,
                        request.symptoms,
                        request.treatable as i64,
                        request.medicines,
                        request.hospitals,
                        id
                    ],
                )?;
                debug!("Updated disease {} ({})", id, request.name);
                false
            }
            None => {
                tx.execute(
                    "INSERT INTO diseases (name, details, symptoms, treatable, medicines, hospitals, notes)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, '')",
                    params![
                        request.name,
                        request.details,
                        request.symptoms,
                        request.treatable as i64,
                        request.medicines,
                        request.hospitals
                    ],
                )?;
                debug!("Inserted disease {}", request.name);
                true
            }
        };

        let disease = tx.query_row(
            &format!(
                "SELECT {} FROM diseases WHERE lower(name) = lower(?1)",
                DISEASE_COLUMNS
            ),
            params![request.name],
            map_disease,
        )?;
        tx.commit()?;

        Ok(if created {
            UpsertOutcome::Created(disease)
        } else {
            UpsertOutcome::Updated(disease)
        })
    }
}

#[cfg(any(test, feature = "mock"))]
pub mod tests {
    use std::sync::Mutex;

    use super::*;

    /// In-memory stand-in for [`DiseaseRepository`]
    #[derive(Default)]
    pub struct MockDiseaseRepository {
        diseases: Mutex<Vec<Disease>>,
    }

    impl MockDiseaseRepository {
        /// Create a new empty mock repository
        pub fn new() -> Self {
            Self::default()
        }

        /// Create a mock repository with predefined diseases
        pub fn with_diseases(diseases: Vec<Disease>) -> Self {
            Self {
                diseases: Mutex::new(diseases),
            }
        }
    }

    #[async_trait]
    impl DiseaseRepositoryTrait for MockDiseaseRepository {
        async fn get_by_name(&self, name: &str) -> Result<Option<Disease>, RepositoryError> {
            let wanted = name.trim().to_lowercase();
            Ok(self
                .diseases
                .lock()?
                .iter()
                .find(|d| d.name.to_lowercase() == wanted)
                .cloned())
        }

        async fn get_all(&self) -> Result<Vec<Disease>, RepositoryError> {
            let mut diseases = self.diseases.lock()?.clone();
            diseases.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(diseases)
        }

        async fn upsert(&self, request: UpsertDiseaseRequest) -> Result<UpsertOutcome, RepositoryError> {
            let mut diseases = self.diseases.lock()?;
            let wanted = request.name.to_lowercase();

            if let Some(existing) = diseases.iter_mut().find(|d| d.name.to_lowercase() == wanted) {
                existing.details = request.details;
                existing.symptoms = request.symptoms;
                existing.treatable = request.treatable;
                existing.medicines = request.medicines;
                existing.hospitals = request.hospitals;
                return Ok(UpsertOutcome::Updated(existing.clone()));
            }

            let disease = Disease {
                id: diseases.iter().map(|d| d.id).max().unwrap_or(0) + 1,
                name: request.name,
                details: request.details,
                symptoms: request.symptoms,
                treatable: request.treatable,
                medicines: request.medicines,
                hospitals: request.hospitals,
                notes: String::new(),
            };
            diseases.push(disease.clone());
            Ok(UpsertOutcome::Created(disease))
        }
    }
}

#[cfg(test)]
mod repository_tests {
    use super::*;

    fn request(name: &str, symptoms: &str) -> UpsertDiseaseRequest {
        UpsertDiseaseRequest {
            name: name.to_string(),
            details: "details".to_string(),
            symptoms: symptoms.to_string(),
            treatable: true,
            medicines: "rest".to_string(),
            hospitals: String::new(),
        }
    }

    #[tokio::test]
    async fn test_seeded_diseases_are_listed_by_name() {
        let repo = DiseaseRepository::new(Database::in_memory().unwrap());
        let all = repo.get_all().await.unwrap();

        assert_eq!(all.len(), 10);
        let names: Vec<&str> = all.iter().map(|d| d.name.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[tokio::test]
    async fn test_lookup_ignores_case() {
        let repo = DiseaseRepository::new(Database::in_memory().unwrap());

        let found = repo.get_by_name("  FeVeR ").await.unwrap().unwrap();
        assert_eq!(found.name, "fever");
        assert!(repo.get_by_name("scurvy").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_updates_existing_and_keeps_notes() {
        let db = Database::in_memory().unwrap();
        let repo = DiseaseRepository::new(db.clone());
        {
            let conn = db.conn().unwrap();
            conn.execute("UPDATE diseases SET notes = 'keep me' WHERE name = 'migraine'", [])
                .unwrap();
        }

        let outcome = repo.upsert(request("MIGRAINE", "aura")).await.unwrap();
        assert!(matches!(outcome, UpsertOutcome::Updated(_)));
        let disease = outcome.into_disease();
        assert_eq!(disease.name, "migraine");
        assert_eq!(disease.symptoms, "aura");
        assert_eq!(disease.notes, "keep me");

        assert_eq!(repo.get_all().await.unwrap().len(), 10);
    }

    #[tokio::test]
    async fn test_upsert_inserts_new_name() {
        let repo = DiseaseRepository::new(Database::in_memory().unwrap());

        let outcome = repo.upsert(request("gout", "joint pain")).await.unwrap();
        assert!(matches!(outcome, UpsertOutcome::Created(_)));
        assert_eq!(outcome.disease().notes, "");
        assert_eq!(repo.get_all().await.unwrap().len(), 11);
    }
}
