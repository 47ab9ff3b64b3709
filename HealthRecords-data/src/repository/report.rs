use async_trait::async_trait;
use rusqlite::{params, Row};
use tracing::debug;

use crate::database::Database;
use crate::models::{now_timestamp, CreateReportRequest, PatientExportRow, Report};
use super::errors::{map_constraint_error, RepositoryError};

/// Repository trait for monthly reports
#[async_trait]
pub trait ReportRepositoryTrait {
    /// Store a report for an existing patient
    async fn create(&self, request: CreateReportRequest) -> Result<Report, RepositoryError>;

    /// All reports of a patient, newest month first
    async fn get_by_patient(&self, patient_id: i64) -> Result<Vec<Report>, RepositoryError>;

    /// At most two reports of a patient, newest first (latest, previous)
    async fn get_latest_two(&self, patient_id: i64) -> Result<Vec<Report>, RepositoryError>;

    /// Delete a report. Returns false when no such report exists.
    async fn delete(&self, id: i64) -> Result<bool, RepositoryError>;

    /// All reports of a patient, oldest month first
    async fn get_for_export(&self, patient_id: i64) -> Result<Vec<Report>, RepositoryError>;

    /// Every patient joined with each of its reports
    async fn get_patient_export_rows(&self) -> Result<Vec<PatientExportRow>, RepositoryError>;
}

/// SQLite-backed report repository
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: Database,
}

impl ReportRepository {
    /// Create a new repository over the given store
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn query_reports(&self, sql: &str, patient_id: i64) -> Result<Vec<Report>, RepositoryError> {
        let conn = self.db.conn()?;
        let mut stmt = conn.prepare(sql)?;
        let reports = stmt
            .query_map(params![patient_id], map_report)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(reports)
    }
}

const REPORT_COLUMNS: &str =
    "id, patient_id, month, bp_systolic, bp_diastolic, sugar, uric_acid, created_at";

fn map_report(row: &Row<'_>) -> rusqlite::Result<Report> {
    Ok(Report {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        month: row.get(2)?,
        bp_systolic: row.get(3)?,
        bp_diastolic: row.get(4)?,
        sugar: row.get(5)?,
        uric_acid: row.get(6)?,
        created_at: row.get(7)?,
    })
}

#[async_trait]
impl ReportRepositoryTrait for ReportRepository {
    async fn create(&self, request: CreateReportRequest) -> Result<Report, RepositoryError> {
        let created_at = now_timestamp();
        let conn = self.db.conn()?;

        conn.execute(
            "INSERT INTO reports
             (patient_id, month, bp_systolic, bp_diastolic, sugar, uric_acid, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                request.patient_id,
                request.month,
                request.bp_systolic,
                request.bp_diastolic,
                request.sugar,
                request.uric_acid,
                created_at
            ],
        )
        .map_err(|e| map_constraint_error(e, &format!("patient {}", request.patient_id)))?;

        let id = conn.last_insert_rowid();
        debug!(
            "Stored report {} for patient {} ({})",
            id, request.patient_id, request.month
        );

        Ok(Report {
            id,
            patient_id: request.patient_id,
            month: request.month,
            bp_systolic: request.bp_systolic,
            bp_diastolic: request.bp_diastolic,
            sugar: request.sugar,
            uric_acid: request.uric_acid,
            created_at,
        })
    }

    async fn get_by_patient(&self, patient_id: i64) -> Result<Vec<Report>, RepositoryError> {
        self.query_reports(
            &format!(
                "SELECT {} FROM reports WHERE patient_id = ?1 ORDER BY month DESC, id DESC",
                REPORT_COLUMNS
            ),
            patient_id,
        )
    }

    async fn get_latest_two(&self, patient_id: i64) -> Result<Vec<Report>, RepositoryError> {
        self.query_reports(
            &format!(
                "SELECT {} FROM reports WHERE patient_id = ?1 ORDER BY month DESC, id DESC LIMIT 2",
                REPORT_COLUMNS
            ),
            patient_id,
        )
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        let conn = self.db.conn()?;
        let deleted = conn.execute("DELETE FROM reports WHERE id = ?1", params![id])?;
        debug!("Deleted report {}: {}", id, deleted > 0);
        Ok(deleted > 0)
    }

    async fn get_for_export(&self, patient_id: i64) -> Result<Vec<Report>, RepositoryError> {
        self.query_reports(
            &format!(
                "SELECT {} FROM reports WHERE patient_id = ?1 ORDER BY month ASC, id ASC",
                REPORT_COLUMNS
            ),
            patient_id,
        )
    }

    async fn get_patient_export_rows(&self) -> Result<Vec<PatientExportRow>, RepositoryError> {
        let conn = self.db.conn()?;
        let mut stmt = conn.prepare(
            "SELECT p.id, p.name, p.age, p.gender, p.contact,
                    r.month, r.bp_systolic, r.bp_diastolic, r.sugar, r.uric_acid
             FROM patients p
             LEFT JOIN reports r ON r.patient_id = p.id
             ORDER BY p.id ASC, r.month ASC, r.id ASC",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok(PatientExportRow {
                    patient_id: row.get(0)?,
                    name: row.get(1)?,
                    age: row.get(2)?,
                    gender: row.get(3)?,
                    contact: row.get(4)?,
                    month: row.get(5)?,
                    bp_systolic: row.get(6)?,
                    bp_diastolic: row.get(7)?,
                    sugar: row.get(8)?,
                    uric_acid: row.get(9)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Loaded {} export rows", rows.len());
        Ok(rows)
    }
}
