use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// Health domain a stored document belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub enum HealthDomain {
    #[serde(rename = "blood-pressure")]
    BloodPressure,

    #[serde(rename = "sleep-stages")]
    SleepStages,
}

impl HealthDomain {
    /// Identifier used in documents and query strings
    pub fn as_str(self) -> &'static str {
        match self {
            HealthDomain::BloodPressure => "blood-pressure",
            HealthDomain::SleepStages => "sleep-stages",
        }
    }

    /// File name of the document inside a `<user>/<date>/` directory
    pub fn file_name(self) -> &'static str {
        match self {
            HealthDomain::BloodPressure => "blood_pressure.json",
            HealthDomain::SleepStages => "sleep_stages.json",
        }
    }
}

impl fmt::Display for HealthDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HealthDomain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blood-pressure" => Ok(HealthDomain::BloodPressure),
            "sleep-stages" => Ok(HealthDomain::SleepStages),
            other => Err(format!("Unknown health domain: {}", other)),
        }
    }
}

/// Document header identifying whose data it is and for which day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct Metadata {
    /// Owner of the series
    pub username: String,

    /// Which kind of series the document holds
    #[serde(rename = "healthDomain")]
    pub health_domain: HealthDomain,

    /// Day of the series (YYYYMMDD)
    pub date: String,
}

/// One blood pressure measurement in mmHg
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct BloodPressureData {
    /// Systolic pressure (the higher number)
    pub systolic: i32,

    /// Diastolic pressure (the lower number)
    pub diastolic: i32,

    /// Mean pressure reported by the device
    pub average: i32,
}

/// Sleep stage as scored by the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub enum SleepStage {
    N1,
    N2,
    N3,
    #[serde(rename = "REM")]
    Rem,
    #[serde(rename = "AWAKE")]
    Awake,
}

impl SleepStage {
    pub fn as_str(self) -> &'static str {
        match self {
            SleepStage::N1 => "N1",
            SleepStage::N2 => "N2",
            SleepStage::N3 => "N3",
            SleepStage::Rem => "REM",
            SleepStage::Awake => "AWAKE",
        }
    }
}

/// One scored sleep epoch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct SleepData {
    pub stage: SleepStage,

    /// Scoring confidence between 0 and 1
    pub stage_confidence: f64,
}

/// One entry of a stored time series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[cfg_attr(feature = "with-api", aliases(
    BloodPressureTimeEntry = TimeEntry<BloodPressureData>,
    SleepTimeEntry = TimeEntry<SleepData>
))]
pub struct TimeEntry<T> {
    /// Time of day as HHMMSS
    pub time: String,

    /// Seconds covered by this entry
    #[serde(default)]
    pub duration: u32,

    pub data: T,
}

/// A whole stored document: metadata plus its time series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[cfg_attr(feature = "with-api", aliases(
    BloodPressureDocument = HealthData<BloodPressureData>,
    SleepStageDocument = HealthData<SleepData>
))]
pub struct HealthData<T> {
    pub metadata: Metadata,
    pub timeseries: Vec<TimeEntry<T>>,
}

// With `with-api` the schema aliases above declare these same names
#[cfg(not(feature = "with-api"))]
pub type BloodPressureTimeEntry = TimeEntry<BloodPressureData>;
#[cfg(not(feature = "with-api"))]
pub type SleepTimeEntry = TimeEntry<SleepData>;

/// Stored blood pressure document
#[cfg(not(feature = "with-api"))]
pub type BloodPressureDocument = HealthData<BloodPressureData>;

/// Stored sleep stage document
#[cfg(not(feature = "with-api"))]
pub type SleepStageDocument = HealthData<SleepData>;
