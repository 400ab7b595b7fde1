use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Once;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use utoipa::ToSchema;

use health_monitor_domain::health::{
    self, ComponentStatus as DomainComponentStatus, HealthComponent as DomainHealthComponent,
    HealthServiceTrait, SystemHealth, SystemStatus,
};

use crate::api::state::AppState;

/// Health check response model
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Current service status ("ok", "degraded", or "error")
    pub status: String,
    /// Current application version from Cargo manifest
    pub version: String,
    /// Timestamp of when the response was generated
    pub timestamp: u64,
    /// Uptime of the service in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime: Option<u64>,
    /// Details about various components of the system
    pub components: ComponentStatus,
    /// Environment information
    pub environment: String,
}

/// Status of individual system components
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ComponentStatus {
    /// Document storage status
    pub storage: ComponentHealthStatus,
    /// API status
    pub api: ComponentHealthStatus,
    /// Additional components (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional: Option<serde_json::Value>,
}

/// Health status for an individual component
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ComponentHealthStatus {
    /// Status of the component ("ok", "degraded", or "error")
    pub status: String,
    /// Optional message with more details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// Track the time when the server started using a thread-safe OnceCell
static SERVER_START_TIME: OnceCell<u64> = OnceCell::new();
static INIT: Once = Once::new();

// Initialize the server start time
pub fn initialize_server_start_time() {
    INIT.call_once(|| {
        let start_time = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let _ = SERVER_START_TIME.set(start_time);
    });
}

/// Health check endpoint to verify the API is running
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "API is healthy", body = HealthResponse),
        (status = 500, description = "API is not healthy", body = HealthResponse),
        (status = 503, description = "API is degraded", body = HealthResponse)
    ),
    tag = "health"
)]
#[instrument(skip(state))]
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    info!("Health check requested");

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let uptime = SERVER_START_TIME.get().map(|&start_time| now.saturating_sub(start_time));

    let system_health = state.health.get_system_health().await;

    let overall_status = match system_health.status {
        SystemStatus::Healthy => "ok",
        SystemStatus::Degraded => "degraded",
        SystemStatus::Unhealthy => "error",
    };

    let component = |name: &str| ComponentHealthStatus {
        status: map_component_status(
            &system_health
                .components
                .get(name)
                .map(|c| c.status.clone())
                .unwrap_or(DomainComponentStatus::Healthy),
        ),
        message: system_health.components.get(name).and_then(|c| c.details.clone()),
    };

    let mut component_statuses = ComponentStatus {
        storage: component("storage"),
        api: component("api"),
        additional: None,
    };

    if system_health.components.len() > 2 {
        let additional_components: serde_json::Value = system_health
            .components
            .iter()
            .filter(|(name, _)| name.as_str() != "storage" && name.as_str() != "api")
            .map(|(name, component)| {
                (
                    name.clone(),
                    serde_json::json!({
                        "status": map_component_status(&component.status),
                        "message": component.details,
                    }),
                )
            })
            .collect::<serde_json::Map<String, serde_json::Value>>()
            .into();

        component_statuses.additional = Some(additional_components);
    }

    let response = HealthResponse {
        status: overall_status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: now,
        uptime,
        components: component_statuses,
        environment: state.app_env.clone(),
    };

    let status = match system_health.status {
        SystemStatus::Healthy => StatusCode::OK,
        SystemStatus::Degraded => StatusCode::SERVICE_UNAVAILABLE,
        SystemStatus::Unhealthy => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (status, Json(response))
}

/// Map domain component status to API status string
fn map_component_status(status: &DomainComponentStatus) -> String {
    match status {
        DomainComponentStatus::Healthy => "ok",
        DomainComponentStatus::Degraded => "degraded",
        DomainComponentStatus::Unhealthy => "error",
    }
    .to_string()
}

/// Health service checking the document root
#[derive(Debug)]
pub struct HealthService {
    data_root: PathBuf,
}

impl HealthService {
    /// Create a new health service
    pub fn new(data_root: impl Into<PathBuf>) -> Self {
        Self { data_root: data_root.into() }
    }
}

#[async_trait]
impl HealthServiceTrait for HealthService {
    async fn get_system_health(&self) -> SystemHealth {
        let mut components = HashMap::new();

        let (status, details) = match self.check_storage_status().await {
            Ok(true) => (DomainComponentStatus::Healthy, None),
            Ok(false) => (
                DomainComponentStatus::Degraded,
                Some("Data root holds no documents".to_string()),
            ),
            Err(e) => {
                warn!("Storage health check failed: {}", e);
                (DomainComponentStatus::Unhealthy, Some(e))
            }
        };

        components.insert("storage".to_string(), DomainHealthComponent { status, details });

        // Always healthy while serving
        components.insert(
            "api".to_string(),
            DomainHealthComponent {
                status: DomainComponentStatus::Healthy,
                details: None,
            },
        );

        SystemHealth::from_components(components)
    }

    async fn check_storage_status(&self) -> Result<bool, String> {
        health::check_storage_status(&self.data_root).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_storage_component_follows_data_root() {
        let dir = tempfile::tempdir().unwrap();

        let service = HealthService::new(dir.path());
        assert_eq!(service.get_system_health().await.status, SystemStatus::Degraded);

        std::fs::create_dir(dir.path().join("jane_doe")).unwrap();
        assert_eq!(service.get_system_health().await.status, SystemStatus::Healthy);

        let missing = HealthService::new(dir.path().join("missing"));
        let health = missing.get_system_health().await;
        assert_eq!(health.status, SystemStatus::Unhealthy);
        assert!(health.components["storage"].details.is_some());
    }
}
