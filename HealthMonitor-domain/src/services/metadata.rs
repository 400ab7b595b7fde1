use std::path::PathBuf;

use async_trait::async_trait;

use health_monitor_data::models::{HealthDomain, Metadata};
use health_monitor_data::repository::{FileSeriesRepository, SeriesKey, SeriesSource};

use super::errors::{map_repo_error, HealthDataServiceError};

/// Trait for document metadata lookups
#[async_trait]
pub trait MetadataServiceTrait: Send + Sync {
    /// Read the header of the document stored for `key` in `domain`
    async fn get_metadata(
        &self,
        key: &SeriesKey,
        domain: HealthDomain,
    ) -> Result<Metadata, HealthDataServiceError>;
}

pub struct MetadataService<R: SeriesSource> {
    repository: R,
}

impl<R: SeriesSource> MetadataService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: SeriesSource> MetadataServiceTrait for MetadataService<R> {
    async fn get_metadata(
        &self,
        key: &SeriesKey,
        domain: HealthDomain,
    ) -> Result<Metadata, HealthDataServiceError> {
        self.repository
            .load_metadata(key, domain)
            .await
            .map_err(map_repo_error)
    }
}

/// Create a metadata service reading documents below `data_root`
pub fn create_default_metadata_service(data_root: impl Into<PathBuf>) -> impl MetadataServiceTrait {
    MetadataService::new(FileSeriesRepository::new(data_root))
}
