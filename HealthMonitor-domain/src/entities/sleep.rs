use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

pub use health_monitor_data::models::SleepStage;

/// Value used to draw a stage on a hypnogram, higher means lighter sleep
pub fn stage_value(stage: SleepStage) -> u8 {
    match stage {
        SleepStage::Awake => 5,
        SleepStage::Rem => 4,
        SleepStage::N1 => 3,
        SleepStage::N2 => 2,
        SleepStage::N3 => 1,
    }
}

/// One scored sleep epoch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct SleepObservation {
    /// Time of day as HHMMSS
    pub time: String,

    /// Seconds covered by the epoch
    pub duration: u32,

    pub stage: SleepStage,

    /// Hypnogram value for `stage`
    pub stage_value: u8,

    pub confidence: f64,
}

/// Summary of one night of sleep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct SleepMetrics {
    /// Total recorded time in minutes
    pub total_sleep_minutes: u64,

    /// Minutes spent in each stage, keyed by stage name
    pub stage_distribution: BTreeMap<String, u64>,

    /// Percentage of recorded time not spent awake, weighted as the device app does
    pub sleep_efficiency: f64,

    /// Mean scoring confidence
    pub average_confidence: f64,

    /// Number of epochs analysed
    pub epoch_count: usize,
}
