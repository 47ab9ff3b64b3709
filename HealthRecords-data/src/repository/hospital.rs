use async_trait::async_trait;

use crate::database::Database;
use crate::models::Hospital;
use super::errors::RepositoryError;

/// Repository trait for the hospital directory
#[async_trait]
pub trait HospitalRepositoryTrait {
    /// All hospitals ordered by name
    async fn get_all(&self) -> Result<Vec<Hospital>, RepositoryError>;
}

/// SQLite-backed hospital repository
#[derive(Debug, Clone)]
pub struct HospitalRepository {
    db: Database,
}

impl HospitalRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl HospitalRepositoryTrait for HospitalRepository {
    async fn get_all(&self) -> Result<Vec<Hospital>, RepositoryError> {
        let conn = self.db.conn()?;
        let mut stmt = conn.prepare("SELECT id, name, city, contact FROM hospitals ORDER BY name ASC")?;
        let hospitals = stmt
            .query_map([], |row| {
                Ok(Hospital {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    city: row.get(2)?,
                    contact: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(hospitals)
    }
}
