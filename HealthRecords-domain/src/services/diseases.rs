use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info, instrument};
use validator::Validate;

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

use health_records_data::database::Database;
use health_records_data::repository::{DiseaseRepository, DiseaseRepositoryTrait, UpsertOutcome};

use crate::entities::conversions::{convert_to_data_disease_request, convert_to_domain_disease};
use crate::entities::{Disease, DiseaseForm, SymptomMatch};
use super::errors::ServiceError;
use super::symptoms::{match_symptoms, tokenize};

/// A disease after an upsert, and whether it was newly added
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct SavedDisease {
    pub created: bool,
    pub disease: Disease,
}

/// Trait for disease reference operations
#[async_trait]
pub trait DiseaseServiceTrait {
    /// Find a disease by name, ignoring case and surrounding whitespace
    async fn lookup(&self, name: &str) -> Result<Disease, ServiceError>;

    /// All diseases ordered by name
    async fn list(&self) -> Result<Vec<Disease>, ServiceError>;

    /// Add a disease, or update the one with the same name
    async fn save(&self, form: DiseaseForm) -> Result<SavedDisease, ServiceError>;

    /// Rank diseases against a comma-separated symptom list
    async fn check_symptoms(&self, query: &str) -> Result<Vec<SymptomMatch>, ServiceError>;
}

/// Disease service for domain logic
pub struct DiseaseService<R: DiseaseRepositoryTrait> {
    repository: R,
}

impl<R: DiseaseRepositoryTrait> DiseaseService<R> {
    /// Create a new disease service
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: DiseaseRepositoryTrait + Send + Sync> DiseaseServiceTrait for DiseaseService<R> {
    async fn lookup(&self, name: &str) -> Result<Disease, ServiceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ServiceError::Validation("name: must not be empty".to_string()));
        }

        self.repository
            .get_by_name(name)
            .await?
            .map(convert_to_domain_disease)
            .ok_or_else(|| ServiceError::NotFound(format!("disease '{}'", name)))
    }

    async fn list(&self) -> Result<Vec<Disease>, ServiceError> {
        let diseases = self.repository.get_all().await?;
        Ok(diseases.into_iter().map(convert_to_domain_disease).collect())
    }

    #[instrument(skip(self, form), fields(name = %form.name))]
    async fn save(&self, form: DiseaseForm) -> Result<SavedDisease, ServiceError> {
        form.validate()?;

        let request = convert_to_data_disease_request(&form);
        let outcome = self.repository.upsert(request).await?;
        let created = matches!(outcome, UpsertOutcome::Created(_));
        let disease = convert_to_domain_disease(outcome.into_disease());
        info!(
            "Disease '{}' {}",
            disease.name,
            if created { "added" } else { "updated" }
        );

        Ok(SavedDisease { created, disease })
    }

    #[instrument(skip(self))]
    async fn check_symptoms(&self, query: &str) -> Result<Vec<SymptomMatch>, ServiceError> {
        if tokenize(query).is_empty() {
            return Err(ServiceError::Validation(
                "symptoms: enter at least one symptom".to_string(),
            ));
        }

        let diseases = self.repository.get_all().await?;
        let matches = match_symptoms(
            query,
            diseases
                .iter()
                .map(|d| (d.name.as_str(), d.details.as_str(), d.symptoms.as_str())),
        );
        debug!("{} diseases matched", matches.len());

        Ok(matches)
    }
}

/// Factory function to create a disease service over the given store
pub fn create_default_disease_service(db: &Database) -> Arc<dyn DiseaseServiceTrait + Send + Sync> {
    Arc::new(DiseaseService::new(DiseaseRepository::new(db.clone())))
}

/// Factory function to create a disease service backed by an in-memory mock repository
#[cfg(feature = "mock")]
pub fn create_mock_disease_service() -> Arc<dyn DiseaseServiceTrait + Send + Sync> {
    use health_records_data::repository::tests::MockDiseaseRepository;
    Arc::new(DiseaseService::new(MockDiseaseRepository::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use health_records_data::models::Disease as DataDisease;
    use health_records_data::repository::tests::MockDiseaseRepository;

    fn disease(id: i64, name: &str, symptoms: &str) -> DataDisease {
        DataDisease {
            id,
            name: name.to_string(),
            details: format!("about {}", name),
            symptoms: symptoms.to_string(),
            treatable: true,
            medicines: String::new(),
            hospitals: String::new(),
            notes: String::new(),
        }
    }

    fn service() -> DiseaseService<MockDiseaseRepository> {
        DiseaseService::new(MockDiseaseRepository::with_diseases(vec![
            disease(1, "fever", "fever,chills,headache"),
            disease(2, "covid-19", "fever,cough,loss of smell"),
            disease(3, "mystery", ""),
        ]))
    }

    #[tokio::test]
    async fn test_lookup_is_case_insensitive() {
        let service = service();
        assert_eq!(service.lookup(" FEVER ").await.unwrap().id, 1);
        assert!(matches!(service.lookup("gout").await, Err(ServiceError::NotFound(_))));
        assert!(matches!(service.lookup("  ").await, Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn test_save_upserts_by_name() {
        let service = service();

        let updated = service
            .save(DiseaseForm {
                name: "Fever".to_string(),
                symptoms: "fever,sweating".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(!updated.created);
        assert_eq!(updated.disease.id, 1);
        assert_eq!(updated.disease.symptoms, "fever,sweating");

        let created = service
            .save(DiseaseForm {
                name: "Gout".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(created.created);
        assert_eq!(created.disease.name, "gout");
        assert_eq!(service.list().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_save_requires_name() {
        let err = service().save(DiseaseForm::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn test_check_symptoms() {
        let service = service();

        let matches = service.check_symptoms("fever, cough").await.unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].name, "covid-19");
        assert_eq!(matches[0].count, 2);

        assert!(service.check_symptoms("itching").await.unwrap().is_empty());
        assert!(matches!(
            service.check_symptoms(" , ").await,
            Err(ServiceError::Validation(_))
        ));
    }
}
