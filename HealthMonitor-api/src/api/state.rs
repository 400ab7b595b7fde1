use std::sync::Arc;

use health_monitor_data::repository::SeriesSource;
use health_monitor_domain::health::HealthServiceTrait;
use health_monitor_domain::services::{
    create_default_blood_pressure_service, create_default_metadata_service,
    create_default_sleep_service, BloodPressureService, BloodPressureServiceTrait, MetadataService,
    MetadataServiceTrait, SleepService, SleepServiceTrait,
};

use crate::api::handlers::health::HealthService;
use crate::config::ServerConfig;

/// Services and request defaults shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub blood_pressure: Arc<dyn BloodPressureServiceTrait>,
    pub sleep: Arc<dyn SleepServiceTrait>,
    pub metadata: Arc<dyn MetadataServiceTrait>,
    pub health: Arc<dyn HealthServiceTrait>,
    pub default_user: String,
    pub default_date: String,
    pub app_env: String,
}

impl AppState {
    /// Build file backed services from the configuration
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            blood_pressure: Arc::new(create_default_blood_pressure_service(config.data_root.clone())),
            sleep: Arc::new(create_default_sleep_service(config.data_root.clone())),
            metadata: Arc::new(create_default_metadata_service(config.data_root.clone())),
            health: Arc::new(HealthService::new(config.data_root.clone())),
            default_user: config.default_user.clone(),
            default_date: config.default_date.clone(),
            app_env: config.app_env.clone(),
        }
    }

    /// Build services over any series source, e.g. an in-memory repository
    pub fn with_source<R>(source: R, config: &ServerConfig) -> Self
    where
        R: SeriesSource + Clone + 'static,
    {
        Self {
            blood_pressure: Arc::new(BloodPressureService::new(source.clone())),
            sleep: Arc::new(SleepService::new(source.clone())),
            metadata: Arc::new(MetadataService::new(source)),
            health: Arc::new(HealthService::new(config.data_root.clone())),
            default_user: config.default_user.clone(),
            default_date: config.default_date.clone(),
            app_env: config.app_env.clone(),
        }
    }

    /// Replace the health service
    pub fn with_health_service(mut self, health: Arc<dyn HealthServiceTrait>) -> Self {
        self.health = health;
        self
    }
}
