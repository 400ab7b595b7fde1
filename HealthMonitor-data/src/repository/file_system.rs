use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, error};

use super::errors::RepositoryError;
use super::series::{SeriesKey, SeriesSource};
use crate::models::HealthDomain;

/// Series source backed by flat JSON files.
///
/// Documents live at `<root>/<user>/<date>/<domain file>`, for example
/// `root/jane_doe/20250605/blood_pressure.json`.
#[derive(Debug, Clone)]
pub struct FileSeriesRepository {
    root: PathBuf,
}

impl FileSeriesRepository {
    /// Create a repository reading below `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory all documents are read from
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of the document for `key` in `domain`
    pub fn document_path(&self, key: &SeriesKey, domain: HealthDomain) -> PathBuf {
        self.root
            .join(key.user())
            .join(key.date())
            .join(domain.file_name())
    }
}

#[async_trait]
impl SeriesSource for FileSeriesRepository {
    async fn read_document(
        &self,
        key: &SeriesKey,
        domain: HealthDomain,
    ) -> Result<Vec<u8>, RepositoryError> {
        let path = self.document_path(key, domain);
        debug!("Reading {} document from {}", domain, path.display());

        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(RepositoryError::NotFound(format!(
                "no {} data for {} on {}",
                domain,
                key.user(),
                key.date()
            ))),
            Err(e) => {
                error!("Failed to read {}: {}", path.display(), e);
                Err(RepositoryError::Io(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"{
        "metadata": {"username": "jane_doe", "healthDomain": "blood-pressure", "date": "20250605"},
        "timeseries": [
            {"time": "080000", "duration": 60, "data": {"systolic": 118, "diastolic": 76, "average": 90}},
            {"time": "080100", "duration": 60, "data": {"systolic": 131, "diastolic": 84, "average": 100}}
        ]
    }"#;

    fn write_fixture(root: &Path) {
        let dir = root.join("jane_doe").join("20250605");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("blood_pressure.json"), DOCUMENT).unwrap();
    }

    #[tokio::test]
    async fn test_load_blood_pressure_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path());

        let repo = FileSeriesRepository::new(dir.path());
        let key = SeriesKey::new("jane_doe", "20250605").unwrap();
        let doc = repo.load_blood_pressure(&key).await.unwrap();

        assert_eq!(doc.metadata.username, "jane_doe");
        assert_eq!(doc.timeseries.len(), 2);
        assert_eq!(doc.timeseries[0].data.systolic, 118);
    }

    #[tokio::test]
    async fn test_missing_document_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path());

        let repo = FileSeriesRepository::new(dir.path());
        let key = SeriesKey::new("jane_doe", "20250605").unwrap();

        let err = repo.load_sleep_stages(&key).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound(_)));

        let other_day = SeriesKey::new("jane_doe", "20250606").unwrap();
        let err = repo.load_blood_pressure(&other_day).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_load_metadata_only() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path());

        let repo = FileSeriesRepository::new(dir.path());
        let key = SeriesKey::new("jane_doe", "20250605").unwrap();
        let metadata = repo.load_metadata(&key, HealthDomain::BloodPressure).await.unwrap();

        assert_eq!(metadata.date, "20250605");
        assert_eq!(metadata.health_domain, HealthDomain::BloodPressure);
    }

    #[test]
    fn test_document_path_layout() {
        let repo = FileSeriesRepository::new("root");
        let key = SeriesKey::new("jane_doe", "20250605").unwrap();
        assert_eq!(
            repo.document_path(&key, HealthDomain::SleepStages),
            PathBuf::from("root/jane_doe/20250605/sleep_stages.json")
        );
    }
}
