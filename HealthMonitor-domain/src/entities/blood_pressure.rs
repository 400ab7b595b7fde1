use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// One timestamped blood pressure reading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct Observation {
    /// Time of day as HHMMSS
    pub time: String,

    /// Systolic pressure in mmHg
    pub systolic: i32,

    /// Diastolic pressure in mmHg
    pub diastolic: i32,

    /// Mean pressure reported by the device. Not used for classification.
    pub average: i32,
}

/// Clinical severity bucket, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum BloodPressureCategory {
    /// Systolic below 120 and diastolic below 80
    Normal,

    /// Systolic 120-129 and diastolic below 80
    Elevated,

    /// Systolic 130-139 or diastolic 80-88
    HypertensionStage1,

    /// Systolic 140 or higher, or diastolic 90 or higher
    HypertensionStage2,
}

impl BloodPressureCategory {
    /// Human readable label
    pub fn label(self) -> &'static str {
        match self {
            BloodPressureCategory::Normal => "Normal",
            BloodPressureCategory::Elevated => "Elevated",
            BloodPressureCategory::HypertensionStage1 => "Hypertension Stage 1",
            BloodPressureCategory::HypertensionStage2 => "Hypertension Stage 2",
        }
    }
}

impl fmt::Display for BloodPressureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Category assigned to the observation taken at `time`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct ClassifiedObservation {
    pub time: String,
    pub category: BloodPressureCategory,
}

/// How a whole series is rolled up into one category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum SummaryPolicy {
    /// Category of the last observation in the series
    #[default]
    LastObservation,

    /// Most severe category found anywhere in the series
    MostSevere,
}

impl FromStr for SummaryPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "last_observation" | "last" => Ok(SummaryPolicy::LastObservation),
            "most_severe" => Ok(SummaryPolicy::MostSevere),
            other => Err(format!(
                "Unknown summary policy '{}', expected 'last_observation' or 'most_severe'",
                other
            )),
        }
    }
}
