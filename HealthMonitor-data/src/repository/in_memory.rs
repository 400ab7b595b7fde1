use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde::Serialize;

use super::errors::RepositoryError;
use super::series::{SeriesKey, SeriesSource};
use crate::models::{HealthData, HealthDomain};

type DocumentKey = (SeriesKey, HealthDomain);

/// In-memory series source holding serialized documents
#[derive(Debug, Clone, Default)]
pub struct InMemorySeriesRepository {
    documents: Arc<RwLock<HashMap<DocumentKey, Vec<u8>>>>,
}

impl InMemorySeriesRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a typed document under the key taken from its metadata
    pub fn insert_document<T: Serialize>(
        &self,
        document: &HealthData<T>,
    ) -> Result<SeriesKey, RepositoryError> {
        let key = SeriesKey::new(&document.metadata.username, &document.metadata.date)?;
        let bytes = serde_json::to_vec(document)
            .map_err(|e| RepositoryError::Schema(e.to_string()))?;
        self.insert_raw(key.clone(), document.metadata.health_domain, bytes)?;
        Ok(key)
    }

    /// Store raw bytes as-is, bypassing any validation
    pub fn insert_raw(
        &self,
        key: SeriesKey,
        domain: HealthDomain,
        bytes: impl Into<Vec<u8>>,
    ) -> Result<(), RepositoryError> {
        let mut store = self.documents.write()?;
        store.insert((key, domain), bytes.into());
        Ok(())
    }

    /// Number of stored documents
    pub fn len(&self) -> Result<usize, RepositoryError> {
        Ok(self.documents.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, RepositoryError> {
        Ok(self.len()? == 0)
    }
}

#[async_trait]
impl SeriesSource for InMemorySeriesRepository {
    async fn read_document(
        &self,
        key: &SeriesKey,
        domain: HealthDomain,
    ) -> Result<Vec<u8>, RepositoryError> {
        let store = self.documents.read()?;
        store.get(&(key.clone(), domain)).cloned().ok_or_else(|| {
            RepositoryError::NotFound(format!(
                "no {} data for {} on {}",
                domain,
                key.user(),
                key.date()
            ))
        })
    }
}
