use health_monitor_data::models::{BloodPressureData, SleepData, TimeEntry};

use super::blood_pressure::Observation;
use super::sleep::{stage_value, SleepObservation};

/// Conversion functions between data models and domain entities.
/// These follow the pattern convert_to_[target_layer]_[model_name].

/// Convert a stored blood pressure entry to a domain observation
pub fn convert_to_domain_observation(entry: &TimeEntry<BloodPressureData>) -> Observation {
    Observation {
        time: entry.time.clone(),
        systolic: entry.data.systolic,
        diastolic: entry.data.diastolic,
        average: entry.data.average,
    }
}

/// Convert a whole stored blood pressure series, keeping its order
pub fn convert_to_domain_observations(entries: &[TimeEntry<BloodPressureData>]) -> Vec<Observation> {
    entries.iter().map(convert_to_domain_observation).collect()
}

/// Convert a stored sleep entry to a domain observation
pub fn convert_to_domain_sleep_observation(entry: &TimeEntry<SleepData>) -> SleepObservation {
    SleepObservation {
        time: entry.time.clone(),
        duration: entry.duration,
        stage: entry.data.stage,
        stage_value: stage_value(entry.data.stage),
        confidence: entry.data.stage_confidence,
    }
}

/// Convert a domain observation back to the stored reading shape
pub fn convert_to_data_reading(observation: &Observation) -> BloodPressureData {
    BloodPressureData {
        systolic: observation.systolic,
        diastolic: observation.diastolic,
        average: observation.average,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use health_monitor_data::models::SleepStage;

    #[test]
    fn test_blood_pressure_entry_conversion() {
        let entry = TimeEntry {
            time: "093000".to_string(),
            duration: 60,
            data: BloodPressureData { systolic: 128, diastolic: 79, average: 95 },
        };

        let observation = convert_to_domain_observation(&entry);
        assert_eq!(observation.time, "093000");
        assert_eq!(observation.systolic, 128);
        assert_eq!(convert_to_data_reading(&observation), entry.data);
    }

    #[test]
    fn test_sleep_entry_conversion() {
        let entry = TimeEntry {
            time: "013000".to_string(),
            duration: 30,
            data: SleepData { stage: SleepStage::N3, stage_confidence: 0.92 },
        };

        let observation = convert_to_domain_sleep_observation(&entry);
        assert_eq!(observation.stage_value, 1);
        assert_eq!(observation.duration, 30);
    }
}
