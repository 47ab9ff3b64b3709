use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info, instrument};
use validator::Validate;

use health_records_data::database::Database;
use health_records_data::repository::{
    PatientRepository, PatientRepositoryTrait, ReportRepository, ReportRepositoryTrait,
};

use crate::entities::conversions::{convert_to_data_report_request, convert_to_domain_report};
use crate::entities::{Report, ReportForm};
use super::errors::ServiceError;
use super::trend::{evaluate, TrendReport};

/// Result of comparing a patient's two most recent reports
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ComparisonOutcome {
    /// Fewer than two reports are stored
    InsufficientData { available: usize },
    /// Latest report compared with the one before it
    Compared(TrendReport),
}

/// Trait for report service operations
#[async_trait]
pub trait ReportServiceTrait {
    /// Add a monthly report to an existing patient
    async fn create_report(&self, patient_id: i64, form: ReportForm) -> Result<Report, ServiceError>;

    /// Reports of a patient, newest month first
    async fn list_reports(&self, patient_id: i64) -> Result<Vec<Report>, ServiceError>;

    /// Remove a single report
    async fn delete_report(&self, report_id: i64) -> Result<(), ServiceError>;

    /// Compare the latest report of a patient with the previous one
    async fn compare_latest(&self, patient_id: i64) -> Result<ComparisonOutcome, ServiceError>;
}

/// Report service for domain logic
pub struct ReportService<R: ReportRepositoryTrait, P: PatientRepositoryTrait> {
    reports: R,
    patients: P,
}

impl<R: ReportRepositoryTrait, P: PatientRepositoryTrait> ReportService<R, P> {
    /// Create a new report service
    pub fn new(reports: R, patients: P) -> Self {
        Self { reports, patients }
    }

    async fn ensure_patient(&self, patient_id: i64) -> Result<(), ServiceError> {
        match self.patients.get_by_id(patient_id).await? {
            Some(_) => Ok(()),
            None => Err(ServiceError::NotFound(format!("patient {}", patient_id))),
        }
    }
}

#[async_trait]
impl<R, P> ReportServiceTrait for ReportService<R, P>
where
    R: ReportRepositoryTrait + Send + Sync,
    P: PatientRepositoryTrait + Send + Sync,
{
    #[instrument(skip(self, form))]
    async fn create_report(&self, patient_id: i64, form: ReportForm) -> Result<Report, ServiceError> {
        form.validate()?;
        self.ensure_patient(patient_id).await?;

        let request = convert_to_data_report_request(patient_id, &form);
        let report = self.reports.create(request).await?;
        info!("Saved report {} for patient {} ({})", report.id, patient_id, report.month);

        Ok(convert_to_domain_report(report))
    }

    async fn list_reports(&self, patient_id: i64) -> Result<Vec<Report>, ServiceError> {
        self.ensure_patient(patient_id).await?;
        let reports = self.reports.get_by_patient(patient_id).await?;
        Ok(reports.into_iter().map(convert_to_domain_report).collect())
    }

    #[instrument(skip(self))]
    async fn delete_report(&self, report_id: i64) -> Result<(), ServiceError> {
        if !self.reports.delete(report_id).await? {
            return Err(ServiceError::NotFound(format!("report {}", report_id)));
        }
        info!("Deleted report {}", report_id);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn compare_latest(&self, patient_id: i64) -> Result<ComparisonOutcome, ServiceError> {
        self.ensure_patient(patient_id).await?;

        let mut latest_two = self
            .reports
            .get_latest_two(patient_id)
            .await?
            .into_iter()
            .map(convert_to_domain_report);

        match (latest_two.next(), latest_two.next()) {
            (Some(latest), Some(previous)) => {
                debug!("Comparing {} against {}", latest.month, previous.month);
                Ok(ComparisonOutcome::Compared(evaluate(&previous, &latest)))
            }
            (Some(_), None) => Ok(ComparisonOutcome::InsufficientData { available: 1 }),
            _ => Ok(ComparisonOutcome::InsufficientData { available: 0 }),
        }
    }
}

/// Factory function to create a report service over the given store
pub fn create_default_report_service(db: &Database) -> Arc<dyn ReportServiceTrait + Send + Sync> {
    Arc::new(ReportService::new(
        ReportRepository::new(db.clone()),
        PatientRepository::new(db.clone()),
    ))
}
