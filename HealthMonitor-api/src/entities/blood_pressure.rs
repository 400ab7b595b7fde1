use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use health_monitor_domain::entities::{BloodPressureCategory, ClassifiedObservation};

/// Category of one reading as returned to clients
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClassificationResponse {
    /// Time of day as HHMMSS
    pub time: String,

    /// Machine-readable category
    pub category: BloodPressureCategory,

    /// Display label, e.g. "Hypertension Stage 1"
    pub label: String,
}

impl From<ClassifiedObservation> for ClassificationResponse {
    fn from(classified: ClassifiedObservation) -> Self {
        Self {
            label: classified.category.label().to_string(),
            time: classified.time,
            category: classified.category,
        }
    }
}
