// Testing utilities and mock implementations for the domain layer
// This module is only available when the "mock" feature is enabled

use std::collections::HashMap;

use async_trait::async_trait;

use crate::health::{ComponentStatus, HealthComponent, HealthServiceTrait, SystemHealth, SystemStatus};

/// Health service with a fixed database status
#[derive(Debug, Clone)]
pub struct MockHealthService {
    database: ComponentStatus,
}

impl Default for MockHealthService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHealthService {
    /// A mock reporting every component healthy
    pub fn new() -> Self {
        Self {
            database: ComponentStatus::Healthy,
        }
    }

    /// Report the database as degraded
    pub fn with_degraded_database(mut self) -> Self {
        self.database = ComponentStatus::Degraded;
        self
    }

    /// Report the database as unreachable
    pub fn with_unhealthy_database(mut self) -> Self {
        self.database = ComponentStatus::Unhealthy;
        self
    }
}

#[async_trait]
impl HealthServiceTrait for MockHealthService {
    async fn get_system_health(&self) -> SystemHealth {
        let status = match self.database {
            ComponentStatus::Healthy => SystemStatus::Healthy,
            ComponentStatus::Degraded => SystemStatus::Degraded,
            ComponentStatus::Unhealthy => SystemStatus::Unhealthy,
        };
        let details = match self.database {
            ComponentStatus::Healthy => None,
            ComponentStatus::Degraded => Some("Database schema is incomplete".to_string()),
            ComponentStatus::Unhealthy => Some("Database connection failed".to_string()),
        };

        let mut components = HashMap::new();
        components.insert(
            "database".to_string(),
            HealthComponent {
                status: self.database.clone(),
                details,
            },
        );
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
        match self.database {
            ComponentStatus::Healthy => Ok(true),
            ComponentStatus::Degraded => Ok(false),
            ComponentStatus::Unhealthy => Err("Database connection failed".to_string()),
        }
    }
}
