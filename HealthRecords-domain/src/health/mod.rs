//! Domain layer health check functionality
//! This module provides health check services for the application

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use health_records_data::database::Database;

/// System health status
#[derive(Debug, Clone, PartialEq)]
pub enum SystemStatus {
    /// All components are healthy
    Healthy,
    /// Some components are degraded but the system is functional
    Degraded,
    /// System is not functioning properly
    Unhealthy,
}

/// Component health status
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Represents a health component with status and optional details
#[derive(Debug, Clone)]
pub struct HealthComponent {
    pub status: ComponentStatus,
    pub details: Option<String>,
}

/// Represents the overall health of the system
#[derive(Debug, Clone)]
pub struct SystemHealth {
    pub status: SystemStatus,
    /// Map of component names to their health status
    pub components: HashMap<String, HealthComponent>,
}

/// Trait for health services
#[async_trait]
pub trait HealthServiceTrait: Send + Sync + std::fmt::Debug {
    /// Get the overall system health
    async fn get_system_health(&self) -> SystemHealth;

    /// Check the status of the database
    async fn check_database_status(&self) -> Result<bool, String>;
}

/// Check if the database is available and functioning properly
///
/// Returns:
/// - Ok(true) if a connection can be checked out and answers a query
/// - Ok(false) if the store is reachable but the schema is incomplete
/// - Err if no connection could be obtained
pub async fn check_database_status(db: &Database) -> Result<bool, String> {
    let info = db
        .connection_info()
        .map_err(|e| format!("Database connection error: {}", e))?;
    debug!("Database status: {}", info);

    let conn = db
        .conn()
        .map_err(|e| format!("Database connection error: {}", e))?;
    let tables: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'
             AND name IN ('patients', 'reports', 'diseases', 'reminders', 'hospitals')",
            [],
            |row| row.get(0),
        )
        .map_err(|e| format!("Database query error: {}", e))?;

    if tables < 5 {
        warn!("Database is missing {} tables", 5 - tables);
        return Ok(false);
    }
    Ok(true)
}

/// Health service backed by the record store
#[derive(Debug, Clone)]
pub struct HealthService {
    db: Database,
}

impl HealthService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl HealthServiceTrait for HealthService {
    async fn get_system_health(&self) -> SystemHealth {
        let db_component = match self.check_database_status().await {
            Ok(true) => HealthComponent {
                status: ComponentStatus::Healthy,
                details: self.db.connection_info().ok(),
            },
            Ok(false) => HealthComponent {
                status: ComponentStatus::Degraded,
                details: Some("Database schema is incomplete".to_string()),
            },
            Err(e) => HealthComponent {
                status: ComponentStatus::Unhealthy,
                details: Some(e),
            },
        };

        let status = match db_component.status {
            ComponentStatus::Unhealthy => SystemStatus::Unhealthy,
            ComponentStatus::Degraded => SystemStatus::Degraded,
            ComponentStatus::Healthy => SystemStatus::Healthy,
        };

        let mut components = HashMap::new();
        components.insert("database".to_string(), db_component);
        components.insert(
            "api".to_string(),
            HealthComponent {
                status: ComponentStatus::Healthy,
                details: None,
            },
        );

        SystemHealth { status, components }
    }

    async fn check_database_status(&self) -> Result<bool, String> {
        check_database_status(&self.db).await
    }
}

/// Factory function to create a health service
pub fn create_health_service(db: &Database) -> Arc<dyn HealthServiceTrait + Send + Sync> {
    Arc::new(HealthService::new(db.clone()))
}
