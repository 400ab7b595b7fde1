use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use health_monitor_data::models::SleepStageDocument;
use health_monitor_data::repository::{FileSeriesRepository, SeriesKey, SeriesSource};

use super::classifier::ClassificationError;
use super::errors::{map_repo_error, HealthDataServiceError};
use crate::entities::conversions;
use crate::entities::sleep::{SleepMetrics, SleepObservation, SleepStage};

/// Compute night summary metrics from scored epochs.
///
/// Sleep efficiency divides the recorded total by the total plus the awake
/// time, matching the figure shown in the companion app.
pub fn calculate_sleep_metrics(
    observations: &[SleepObservation],
) -> Result<SleepMetrics, ClassificationError> {
    if observations.is_empty() {
        return Err(ClassificationError::EmptySeries);
    }

    let total_seconds: u64 = observations.iter().map(|o| o.duration as u64).sum();

    let mut seconds_by_stage: BTreeMap<SleepStage, u64> = BTreeMap::new();
    for observation in observations {
        *seconds_by_stage.entry(observation.stage).or_insert(0) += observation.duration as u64;
    }

    let awake_seconds = seconds_by_stage.get(&SleepStage::Awake).copied().unwrap_or(0);
    let sleep_efficiency = if total_seconds > 0 {
        total_seconds as f64 / (total_seconds + awake_seconds) as f64 * 100.0
    } else {
        0.0
    };

    let average_confidence =
        observations.iter().map(|o| o.confidence).sum::<f64>() / observations.len() as f64;

    let stage_distribution = seconds_by_stage
        .into_iter()
        .map(|(stage, seconds)| (stage.as_str().to_string(), round_minutes(seconds)))
        .collect();

    Ok(SleepMetrics {
        total_sleep_minutes: round_minutes(total_seconds),
        stage_distribution,
        sleep_efficiency,
        average_confidence,
        epoch_count: observations.len(),
    })
}

fn round_minutes(seconds: u64) -> u64 {
    (seconds as f64 / 60.0).round() as u64
}

/// Trait for sleep stage service operations
#[async_trait]
pub trait SleepServiceTrait: Send + Sync {
    /// Load the stored document as-is
    async fn get_document(&self, key: &SeriesKey)
        -> Result<SleepStageDocument, HealthDataServiceError>;

    /// Load the epochs as domain observations
    async fn get_observations(&self, key: &SeriesKey)
        -> Result<Vec<SleepObservation>, HealthDataServiceError>;

    /// Summarize the night
    async fn get_metrics(&self, key: &SeriesKey) -> Result<SleepMetrics, HealthDataServiceError>;
}

/// Sleep stage service reading from any series source
pub struct SleepService<R: SeriesSource> {
    repository: R,
}

impl<R: SeriesSource> SleepService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: SeriesSource> SleepServiceTrait for SleepService<R> {
    async fn get_document(
        &self,
        key: &SeriesKey,
    ) -> Result<SleepStageDocument, HealthDataServiceError> {
        debug!("Loading sleep stage document for {}/{}", key.user(), key.date());
        self.repository
            .load_sleep_stages(key)
            .await
            .map_err(map_repo_error)
    }

    async fn get_observations(
        &self,
        key: &SeriesKey,
    ) -> Result<Vec<SleepObservation>, HealthDataServiceError> {
        let document = self.get_document(key).await?;
        Ok(document
            .timeseries
            .iter()
            .map(conversions::convert_to_domain_sleep_observation)
            .collect())
    }

    async fn get_metrics(&self, key: &SeriesKey) -> Result<SleepMetrics, HealthDataServiceError> {
        let observations = self.get_observations(key).await?;
        Ok(calculate_sleep_metrics(&observations)?)
    }
}

/// Create a sleep service reading documents below `data_root`
pub fn create_default_sleep_service(data_root: impl Into<PathBuf>) -> impl SleepServiceTrait {
    SleepService::new(FileSeriesRepository::new(data_root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::sleep::stage_value;
    use health_monitor_data::models::{HealthData, HealthDomain, Metadata, SleepData, TimeEntry};
    use health_monitor_data::repository::InMemorySeriesRepository;

    fn epoch(time: &str, duration: u32, stage: SleepStage, confidence: f64) -> SleepObservation {
        SleepObservation {
            time: time.to_string(),
            duration,
            stage,
            stage_value: stage_value(stage),
            confidence,
        }
    }

    #[test]
    fn test_metrics_totals_and_distribution() {
        let observations = vec![
            epoch("230000", 600, SleepStage::Awake, 0.9),
            epoch("231000", 1200, SleepStage::N2, 0.8),
            epoch("233000", 1800, SleepStage::N3, 0.7),
            epoch("000000", 600, SleepStage::Rem, 0.6),
        ];

        let metrics = calculate_sleep_metrics(&observations).unwrap();
        assert_eq!(metrics.total_sleep_minutes, 70);
        assert_eq!(metrics.stage_distribution["AWAKE"], 10);
        assert_eq!(metrics.stage_distribution["N3"], 30);
        assert!(!metrics.stage_distribution.contains_key("N1"));
        assert_eq!(metrics.epoch_count, 4);
        assert!((metrics.average_confidence - 0.75).abs() < 1e-9);
        // 4200 / (4200 + 600)
        assert!((metrics.sleep_efficiency - 87.5).abs() < 1e-9);
    }

    #[test]
    fn test_metrics_zero_durations() {
        let metrics = calculate_sleep_metrics(&[epoch("230000", 0, SleepStage::N1, 1.0)]).unwrap();
        assert_eq!(metrics.total_sleep_minutes, 0);
        assert_eq!(metrics.sleep_efficiency, 0.0);
    }

    #[test]
    fn test_metrics_empty_series() {
        assert_eq!(calculate_sleep_metrics(&[]), Err(ClassificationError::EmptySeries));
    }

    #[tokio::test]
    async fn test_service_reads_sleep_document() {
        let repo = InMemorySeriesRepository::new();
        let key = repo
            .insert_document(&HealthData {
                metadata: Metadata {
                    username: "jane_doe".to_string(),
                    health_domain: HealthDomain::SleepStages,
                    date: "20250605".to_string(),
                },
                timeseries: vec![
                    TimeEntry {
                        time: "230000".to_string(),
                        duration: 30,
                        data: SleepData { stage: SleepStage::Awake, stage_confidence: 0.9 },
                    },
                    TimeEntry {
                        time: "230030".to_string(),
                        duration: 30,
                        data: SleepData { stage: SleepStage::N1, stage_confidence: 0.7 },
                    },
                ],
            })
            .unwrap();

        let service = SleepService::new(repo);
        let observations = service.get_observations(&key).await.unwrap();
        assert_eq!(observations[0].stage_value, 5);
        assert_eq!(observations[1].stage, SleepStage::N1);

        let metrics = service.get_metrics(&key).await.unwrap();
        assert_eq!(metrics.total_sleep_minutes, 1);
    }

    #[tokio::test]
    async fn test_missing_sleep_document() {
        let service = SleepService::new(InMemorySeriesRepository::new());
        let key = SeriesKey::new("jane_doe", "20250605").unwrap();
        assert!(matches!(
            service.get_document(&key).await,
            Err(HealthDataServiceError::NotFound(_))
        ));
    }
}
