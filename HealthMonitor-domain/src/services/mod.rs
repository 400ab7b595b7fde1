pub mod blood_pressure;
pub mod classifier;
pub mod errors;
pub mod formatters;
pub mod metadata;
pub mod sleep;

// Domain services
// This module contains business logic implementations.

// Re-export service traits and factory functions
pub use blood_pressure::{
    create_default_blood_pressure_service, BloodPressureService, BloodPressureServiceTrait,
};
pub use classifier::{classify, classify_series, most_severe, summarize, ClassificationError};
pub use errors::HealthDataServiceError;
pub use metadata::{create_default_metadata_service, MetadataService, MetadataServiceTrait};
pub use sleep::{calculate_sleep_metrics, create_default_sleep_service, SleepService, SleepServiceTrait};
