//! Domain layer health check functionality
//! This module provides health check services for the application

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;

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
    /// Component is functioning normally
    Healthy,
    /// Component is functioning but with reduced performance
    Degraded,
    /// Component is not functioning
    Unhealthy,
}

/// Represents a health component with status and optional details
#[derive(Debug, Clone)]
pub struct HealthComponent {
    /// Status of the component
    pub status: ComponentStatus,
    /// Optional details about the component status
    pub details: Option<String>,
}

/// Represents the overall health of the system
#[derive(Debug, Clone)]
pub struct SystemHealth {
    /// Overall system status
    pub status: SystemStatus,
    /// Map of component names to their health status
    pub components: HashMap<String, HealthComponent>,
}

impl SystemHealth {
    /// Build a report whose overall status is the worst component status
    pub fn from_components(components: HashMap<String, HealthComponent>) -> Self {
        let status = if components.values().any(|c| c.status == ComponentStatus::Unhealthy) {
            SystemStatus::Unhealthy
        } else if components.values().any(|c| c.status == ComponentStatus::Degraded) {
            SystemStatus::Degraded
        } else {
            SystemStatus::Healthy
        };

        Self { status, components }
    }
}

/// Trait for health services
#[async_trait]
pub trait HealthServiceTrait: Send + Sync + std::fmt::Debug {
    /// Get the overall system health
    async fn get_system_health(&self) -> SystemHealth;

    /// Check the status of the document storage
    /// Returns true if documents can be listed, false if the storage is empty
    /// Returns an error if the check could not be performed
    async fn check_storage_status(&self) -> Result<bool, String>;
}

/// Check whether the document root is usable
///
/// Returns:
/// - Ok(true) if the root is a readable directory with at least one entry
/// - Ok(false) if the root is readable but holds no documents yet
/// - Err if the root is missing or unreadable
pub async fn check_storage_status(data_root: &Path) -> Result<bool, String> {
    let metadata = tokio::fs::metadata(data_root)
        .await
        .map_err(|e| format!("Data root {} is not accessible: {}", data_root.display(), e))?;

    if !metadata.is_dir() {
        return Err(format!("Data root {} is not a directory", data_root.display()));
    }

    let mut entries = tokio::fs::read_dir(data_root)
        .await
        .map_err(|e| format!("Data root {} cannot be read: {}", data_root.display(), e))?;

    match entries.next_entry().await {
        Ok(Some(_)) => Ok(true),
        Ok(None) => Ok(false),
        Err(e) => Err(format!("Data root {} cannot be read: {}", data_root.display(), e)),
    }
}
