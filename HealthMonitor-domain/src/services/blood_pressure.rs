use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{debug, info};

use health_monitor_data::models::BloodPressureDocument;
use health_monitor_data::repository::{FileSeriesRepository, SeriesKey, SeriesSource};

use super::classifier;
use super::errors::{map_repo_error, HealthDataServiceError};
use crate::entities::blood_pressure::{
    BloodPressureCategory, ClassifiedObservation, Observation, SummaryPolicy,
};
use crate::entities::conversions;
use crate::entities::plot::PlotSeries;

/// Trait for blood pressure service operations
#[async_trait]
pub trait BloodPressureServiceTrait: Send + Sync {
    /// Load the stored document as-is
    async fn get_document(&self, key: &SeriesKey)
        -> Result<BloodPressureDocument, HealthDataServiceError>;

    /// Load the series as domain observations
    async fn get_observations(&self, key: &SeriesKey)
        -> Result<Vec<Observation>, HealthDataServiceError>;

    /// Categorize every observation in the series
    async fn classify_series(&self, key: &SeriesKey)
        -> Result<Vec<ClassifiedObservation>, HealthDataServiceError>;

    /// Roll the series up into a single category
    async fn summarize(
        &self,
        key: &SeriesKey,
        policy: SummaryPolicy,
    ) -> Result<BloodPressureCategory, HealthDataServiceError>;

    /// Flatten the series into chart columns
    async fn get_plot_series(&self, key: &SeriesKey) -> Result<PlotSeries, HealthDataServiceError>;
}

/// Blood pressure service reading from any series source
pub struct BloodPressureService<R: SeriesSource> {
    repository: R,
}

impl<R: SeriesSource> BloodPressureService<R> {
    /// Create a new blood pressure service
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: SeriesSource> BloodPressureServiceTrait for BloodPressureService<R> {
    async fn get_document(
        &self,
        key: &SeriesKey,
    ) -> Result<BloodPressureDocument, HealthDataServiceError> {
        debug!("Loading blood pressure document for {}/{}", key.user(), key.date());
        self.repository
            .load_blood_pressure(key)
            .await
            .map_err(map_repo_error)
    }

    async fn get_observations(
        &self,
        key: &SeriesKey,
    ) -> Result<Vec<Observation>, HealthDataServiceError> {
        let document = self.get_document(key).await?;
        Ok(conversions::convert_to_domain_observations(&document.timeseries))
    }

    async fn classify_series(
        &self,
        key: &SeriesKey,
    ) -> Result<Vec<ClassifiedObservation>, HealthDataServiceError> {
        let observations = self.get_observations(key).await?;
        Ok(classifier::classify_series(&observations))
    }

    async fn summarize(
        &self,
        key: &SeriesKey,
        policy: SummaryPolicy,
    ) -> Result<BloodPressureCategory, HealthDataServiceError> {
        let observations = self.get_observations(key).await?;
        let category = classifier::summarize_with(&observations, policy)?;
        info!(
            "Blood pressure summary for {}/{} ({:?}): {}",
            key.user(),
            key.date(),
            policy,
            category
        );
        Ok(category)
    }

    async fn get_plot_series(&self, key: &SeriesKey) -> Result<PlotSeries, HealthDataServiceError> {
        let observations = self.get_observations(key).await?;
        Ok(PlotSeries::from_observations(&observations))
    }
}

/// Create a blood pressure service reading documents below `data_root`
pub fn create_default_blood_pressure_service(
    data_root: impl Into<PathBuf>,
) -> impl BloodPressureServiceTrait {
    BloodPressureService::new(FileSeriesRepository::new(data_root))
}
