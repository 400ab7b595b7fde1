use thiserror::Error;

use crate::entities::blood_pressure::{
    BloodPressureCategory, ClassifiedObservation, Observation, SummaryPolicy,
};

/// Errors produced while classifying a series
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassificationError {
    /// A summary was requested for a series without observations
    #[error("Series is empty, no category can be derived")]
    EmptySeries,

    /// An observation lacks numeric systolic/diastolic values
    #[error("Malformed observation at index {index}: {reason}")]
    MalformedObservation { index: usize, reason: String },
}

/// Categorize a single blood pressure reading.
///
/// Rules are checked from most to least severe and the first match wins,
/// so overlapping bands always resolve to the more severe category. Values
/// outside any plausible range are not rejected.
pub fn classify(systolic: i32, diastolic: i32) -> BloodPressureCategory {
    if systolic >= 140 || diastolic >= 90 {
        BloodPressureCategory::HypertensionStage2
    } else if (130..140).contains(&systolic) || (80..89).contains(&diastolic) {
        BloodPressureCategory::HypertensionStage1
    } else if (120..130).contains(&systolic) && diastolic < 80 {
        BloodPressureCategory::Elevated
    } else {
        BloodPressureCategory::Normal
    }
}

/// Categorize every observation, keeping order and length
pub fn classify_series(series: &[Observation]) -> Vec<ClassifiedObservation> {
    series
        .iter()
        .map(|o| ClassifiedObservation {
            time: o.time.clone(),
            category: classify(o.systolic, o.diastolic),
        })
        .collect()
}

/// Category of the last observation in the series
pub fn summarize(series: &[Observation]) -> Result<BloodPressureCategory, ClassificationError> {
    series
        .last()
        .map(|o| classify(o.systolic, o.diastolic))
        .ok_or(ClassificationError::EmptySeries)
}

/// Most severe category found anywhere in the series
pub fn most_severe(series: &[Observation]) -> Result<BloodPressureCategory, ClassificationError> {
    series
        .iter()
        .map(|o| classify(o.systolic, o.diastolic))
        .max()
        .ok_or(ClassificationError::EmptySeries)
}

/// Roll a series up into one category using `policy`
pub fn summarize_with(
    series: &[Observation],
    policy: SummaryPolicy,
) -> Result<BloodPressureCategory, ClassificationError> {
    match policy {
        SummaryPolicy::LastObservation => summarize(series),
        SummaryPolicy::MostSevere => most_severe(series),
    }
}
