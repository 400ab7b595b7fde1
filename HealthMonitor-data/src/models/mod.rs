// Storage models for the flat JSON documents
pub mod health_data;

pub use health_data::{
    BloodPressureData, BloodPressureDocument, BloodPressureTimeEntry, HealthData, HealthDomain,
    Metadata, SleepData, SleepStage, SleepStageDocument, SleepTimeEntry, TimeEntry,
};
