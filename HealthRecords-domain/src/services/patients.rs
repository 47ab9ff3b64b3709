use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument};
use validator::Validate;

use health_records_data::database::Database;
use health_records_data::repository::{PatientRepository, PatientRepositoryTrait};

use crate::entities::conversions::{convert_to_data_patient_request, convert_to_domain_patient};
use crate::entities::{Patient, PatientForm};
use super::errors::ServiceError;

/// Trait for patient service operations
#[async_trait]
pub trait PatientServiceTrait {
    /// Register a new patient
    async fn create_patient(&self, form: PatientForm) -> Result<Patient, ServiceError>;

    /// All patients, newest first
    async fn list_patients(&self) -> Result<Vec<Patient>, ServiceError>;

    /// A single patient
    async fn get_patient(&self, id: i64) -> Result<Patient, ServiceError>;

    /// Remove a patient together with all of its reports
    async fn delete_patient(&self, id: i64) -> Result<(), ServiceError>;
}

/// Patient service for domain logic
pub struct PatientService<R: PatientRepositoryTrait> {
    repository: R,
}

impl<R: PatientRepositoryTrait> PatientService<R> {
    /// Create a new patient service
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: PatientRepositoryTrait + Send + Sync> PatientServiceTrait for PatientService<R> {
    #[instrument(skip(self, form))]
    async fn create_patient(&self, form: PatientForm) -> Result<Patient, ServiceError> {
        form.validate()?;

        let request = convert_to_data_patient_request(&form);
        let patient = self.repository.create(request).await?;
        info!("Registered patient {} ({})", patient.id, patient.name);

        Ok(convert_to_domain_patient(patient))
    }

    async fn list_patients(&self) -> Result<Vec<Patient>, ServiceError> {
        let patients = self.repository.get_all().await?;
        debug!("Listing {} patients", patients.len());
        Ok(patients.into_iter().map(convert_to_domain_patient).collect())
    }

    async fn get_patient(&self, id: i64) -> Result<Patient, ServiceError> {
        self.repository
            .get_by_id(id)
            .await?
            .map(convert_to_domain_patient)
            .ok_or_else(|| ServiceError::NotFound(format!("patient {}", id)))
    }

    #[instrument(skip(self))]
    async fn delete_patient(&self, id: i64) -> Result<(), ServiceError> {
        if !self.repository.delete(id).await? {
            return Err(ServiceError::NotFound(format!("patient {}", id)));
        }
        info!("Deleted patient {}", id);
        Ok(())
    }
}

/// Factory function to create a patient service over the given store
pub fn create_default_patient_service(db: &Database) -> Arc<dyn PatientServiceTrait + Send + Sync> {
    Arc::new(PatientService::new(PatientRepository::new(db.clone())))
}

/// Factory function to create a patient service backed by an in-memory mock repository
#[cfg(feature = "mock")]
pub fn create_mock_patient_service() -> Arc<dyn PatientServiceTrait + Send + Sync> {
    use health_records_data::repository::tests::MockPatientRepository;
    Arc::new(PatientService::new(MockPatientRepository::new()))
}
