use std::sync::Arc;

use async_trait::async_trait;

use health_records_data::database::Database;
use health_records_data::repository::{HospitalRepository, HospitalRepositoryTrait};

use crate::entities::conversions::convert_to_domain_hospital;
use crate::entities::{EmergencyContact, Hospital};
use super::errors::ServiceError;

/// Emergency numbers as `(service, number)`
pub const EMERGENCY_CONTACTS: [(&str, &str); 2] = [("Ambulance", "108"), ("Police", "102")];

/// Trait for the hospital and emergency directory
#[async_trait]
pub trait DirectoryServiceTrait {
    /// Known hospitals ordered by name
    async fn list_hospitals(&self) -> Result<Vec<Hospital>, ServiceError>;

    /// Emergency service numbers
    fn emergency_contacts(&self) -> Vec<EmergencyContact>;
}

pub struct DirectoryService<R: HospitalRepositoryTrait> {
    repository: R,
}

impl<R: HospitalRepositoryTrait> DirectoryService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: HospitalRepositoryTrait + Send + Sync> DirectoryServiceTrait for DirectoryService<R> {
    async fn list_hospitals(&self) -> Result<Vec<Hospital>, ServiceError> {
        let hospitals = self.repository.get_all().await?;
        Ok(hospitals.into_iter().map(convert_to_domain_hospital).collect())
    }

    fn emergency_contacts(&self) -> Vec<EmergencyContact> {
        EMERGENCY_CONTACTS
            .iter()
            .map(|(service, number)| EmergencyContact {
                service: service.to_string(),
                number: number.to_string(),
            })
            .collect()
    }
}

/// Factory function to create a directory service over the given store
pub fn create_default_directory_service(db: &Database) -> Arc<dyn DirectoryServiceTrait + Send + Sync> {
    Arc::new(DirectoryService::new(HospitalRepository::new(db.clone())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_directory() {
        let service = create_default_directory_service(&Database::in_memory().unwrap());

        let hospitals = service.list_hospitals().await.unwrap();
        assert_eq!(hospitals.len(), 4);

        let contacts = service.emergency_contacts();
        assert_eq!(contacts[0].service, "Ambulance");
        assert_eq!(contacts[0].number, "108");
        assert_eq!(contacts[1].number, "102");
    }
}
