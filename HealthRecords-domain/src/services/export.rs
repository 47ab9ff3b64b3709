use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use health_records_data::database::Database;
use health_records_data::export::{patients_to_csv, reports_to_csv};
use health_records_data::repository::{
    PatientRepository, PatientRepositoryTrait, ReportRepository, ReportRepositoryTrait,
};

use super::errors::ServiceError;

/// Trait for CSV export operations
#[async_trait]
pub trait ExportServiceTrait {
    /// CSV of one patient's reports, oldest month first. `None` when there is nothing to export.
    async fn export_patient_reports(&self, patient_id: i64) -> Result<Option<String>, ServiceError>;

    /// CSV of every patient joined with each of its reports
    async fn export_all_patients(&self) -> Result<String, ServiceError>;
}

pub struct ExportService<R: ReportRepositoryTrait, P: PatientRepositoryTrait> {
    reports: R,
    patients: P,
}

impl<R: ReportRepositoryTrait, P: PatientRepositoryTrait> ExportService<R, P> {
    pub fn new(reports: R, patients: P) -> Self {
        Self { reports, patients }
    }
}

#[async_trait]
impl<R, P> ExportServiceTrait for ExportService<R, P>
where
    R: ReportRepositoryTrait + Send + Sync,
    P: PatientRepositoryTrait + Send + Sync,
{
    async fn export_patient_reports(&self, patient_id: i64) -> Result<Option<String>, ServiceError> {
        if self.patients.get_by_id(patient_id).await?.is_none() {
            return Err(ServiceError::NotFound(format!("patient {}", patient_id)));
        }

        let reports = self.reports.get_for_export(patient_id).await?;
        if reports.is_empty() {
            return Ok(None);
        }

        info!("Exporting {} reports of patient {}", reports.len(), patient_id);
        Ok(Some(reports_to_csv(&reports)))
    }

    async fn export_all_patients(&self) -> Result<String, ServiceError> {
        let rows = self.reports.get_patient_export_rows().await?;
        info!("Exporting {} patient rows", rows.len());
        Ok(patients_to_csv(&rows))
    }
}

/// Factory function to create an export service over the given store
pub fn create_default_export_service(db: &Database) -> Arc<dyn ExportServiceTrait + Send + Sync> {
    Arc::new(ExportService::new(
        ReportRepository::new(db.clone()),
        PatientRepository::new(db.clone()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{PatientForm, ReportForm};
    use crate::services::{create_default_patient_service, create_default_report_service};

    #[tokio::test]
    async fn test_export_patient_reports() {
        let db = Database::in_memory().unwrap();
        let patients = create_default_patient_service(&db);
        let reports = create_default_report_service(&db);
        let export = create_default_export_service(&db);

        let patient = patients
            .create_patient(PatientForm {
                name: "Asha".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(export.export_patient_reports(patient.id).await.unwrap(), None);

        for (month, bp) in [("2024-02", "130/85"), ("2024-01", "120/80")] {
            reports
                .create_report(
                    patient.id,
                    ReportForm {
                        month: month.to_string(),
                        bp: Some(bp.to_string()),
                        ..Default::default()
                    },
                )
                .await
                .unwrap();
        }

        let csv = export.export_patient_reports(patient.id).await.unwrap().unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("2024-01,120,80,,,"));
        assert!(lines[2].starts_with("2024-02,130,85,,,"));

        assert!(matches!(
            export.export_patient_reports(999).await,
            Err(ServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_export_all_patients() {
        let db = Database::in_memory().unwrap();
        let patients = create_default_patient_service(&db);
        patients
            .create_patient(PatientForm {
                name: "Ravi".to_string(),
                age: Some("61".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        let csv = create_default_export_service(&db).export_all_patients().await.unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "PatientID,Name,Age,Gender,Contact,Month,BP_Systolic,BP_Diastolic,Sugar,Uric"
        );
        assert_eq!(lines[1], "1,Ravi,61,,,,,,,");
    }
}
