// Testing utilities and mock implementations for the domain layer
// This module is only available when the "mock" feature is enabled

use std::collections::HashMap;

use async_trait::async_trait;

use health_monitor_data::fixtures::mean_arterial_pressure;
use health_monitor_data::models::{
    BloodPressureData, BloodPressureDocument, HealthData, HealthDomain, Metadata, SleepData,
    SleepStage, SleepStageDocument, TimeEntry,
};

use crate::health::{ComponentStatus, HealthComponent, HealthServiceTrait, SystemHealth};

/// Build a blood pressure document with one reading per minute from 08:00
pub fn sample_blood_pressure_document(
    user: &str,
    date: &str,
    readings: &[(i32, i32)],
) -> BloodPressureDocument {
    HealthData {
        metadata: Metadata {
            username: user.to_string(),
            health_domain: HealthDomain::BloodPressure,
            date: date.to_string(),
        },
        timeseries: readings
            .iter()
            .enumerate()
            .map(|(i, &(systolic, diastolic))| TimeEntry {
                time: format!("{:02}{:02}00", 8 + i / 60, i % 60),
                duration: 60,
                data: BloodPressureData {
                    systolic,
                    diastolic,
                    average: mean_arterial_pressure(systolic, diastolic),
                },
            })
            .collect(),
    }
}

/// Build a sleep document of 30 second epochs starting at 23:00
pub fn sample_sleep_document(user: &str, date: &str, stages: &[SleepStage]) -> SleepStageDocument {
    HealthData {
        metadata: Metadata {
            username: user.to_string(),
            health_domain: HealthDomain::SleepStages,
            date: date.to_string(),
        },
        timeseries: stages
            .iter()
            .enumerate()
            .map(|(i, &stage)| {
                let seconds = 23 * 3600 + i * 30;
                TimeEntry {
                    time: format!(
                        "{:02}{:02}{:02}",
                        (seconds / 3600) % 24,
                        (seconds / 60) % 60,
                        seconds % 60
                    ),
                    duration: 30,
                    data: SleepData { stage, stage_confidence: 0.9 },
                }
            })
            .collect(),
    }
}

/// Mock implementation of health services for testing system health
#[derive(Debug)]
pub struct MockHealthService {
    /// Storage component status
    storage_status: ComponentStatus,
    /// Additional components
    components: HashMap<String, HealthComponent>,
}

impl Default for MockHealthService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHealthService {
    /// Create a new mock health service with all components healthy
    pub fn new() -> Self {
        Self {
            storage_status: ComponentStatus::Healthy,
            components: HashMap::new(),
        }
    }

    /// Configure the mock with a storage root that holds no documents
    pub fn with_degraded_storage(mut self) -> Self {
        self.storage_status = ComponentStatus::Degraded;
        self
    }

    /// Configure the mock with an unreadable storage root
    pub fn with_unhealthy_storage(mut self) -> Self {
        self.storage_status = ComponentStatus::Unhealthy;
        self
    }

    /// Add a custom component with a specific status
    pub fn with_component(mut self, name: &str, status: ComponentStatus, details: Option<String>) -> Self {
        self.components
            .insert(name.to_string(), HealthComponent { status, details });
        self
    }
}

#[async_trait]
impl HealthServiceTrait for MockHealthService {
    async fn get_system_health(&self) -> SystemHealth {
        let mut components = HashMap::new();

        components.insert(
            "storage".to_string(),
            HealthComponent {
                status: self.storage_status.clone(),
                details: match self.storage_status {
                    ComponentStatus::Healthy => None,
                    ComponentStatus::Degraded => Some("Data root holds no documents".to_string()),
                    ComponentStatus::Unhealthy => Some("Data root is not accessible".to_string()),
                },
            },
        );

        components.insert(
            "api".to_string(),
            HealthComponent {
                status: ComponentStatus::Healthy,
                details: None,
            },
        );

        for (name, component) in &self.components {
            components.insert(name.clone(), component.clone());
        }

        SystemHealth::from_components(components)
    }

    async fn check_storage_status(&self) -> Result<bool, String> {
        match self.storage_status {
            ComponentStatus::Healthy => Ok(true),
            ComponentStatus::Degraded => Ok(false),
            ComponentStatus::Unhealthy => Err("Data root is not accessible".to_string()),
        }
    }
}

/// Factory function to create a mock health service
pub fn create_mock_health_service() -> impl HealthServiceTrait {
    MockHealthService::new()
}
