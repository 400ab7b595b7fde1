// Domain entities and value objects
pub mod blood_pressure;
pub mod conversions;
pub mod plot;
pub mod sleep;

// Re-export common types for easier imports
pub use blood_pressure::{BloodPressureCategory, ClassifiedObservation, Observation, SummaryPolicy};
pub use plot::{LatestReading, PlotSeries};
pub use sleep::{SleepMetrics, SleepObservation, SleepStage};
