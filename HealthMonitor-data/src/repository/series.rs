use async_trait::async_trait;
use chrono::NaiveTime;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use super::errors::RepositoryError;
use crate::models::{
    BloodPressureDocument, HealthData, HealthDomain, Metadata, SleepStageDocument, TimeEntry,
};

/// Addresses the documents stored for one user on one day
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeriesKey {
    user: String,
    date: String,
}

impl SeriesKey {
    /// Build a key, rejecting values that could escape the storage layout.
    ///
    /// `user` must be 1 to 64 ASCII letters, digits, `_` or `-`.
    /// `date` must be eight digits (YYYYMMDD).
    pub fn new(user: impl Into<String>, date: impl Into<String>) -> Result<Self, RepositoryError> {
        let user = user.into();
        let date = date.into();

        let user_ok = !user.is_empty()
            && user.len() <= 64
            && user.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !user_ok {
            return Err(RepositoryError::InvalidKey(format!("invalid user: {:?}", user)));
        }

        if date.len() != 8 || !date.chars().all(|c| c.is_ascii_digit()) {
            return Err(RepositoryError::InvalidKey(format!("invalid date: {:?}", date)));
        }

        Ok(Self { user, date })
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn date(&self) -> &str {
        &self.date
    }
}

/// Read-only source of stored time series documents
#[async_trait]
pub trait SeriesSource: Send + Sync {
    /// Read the raw bytes of the document for `key` in `domain`
    async fn read_document(
        &self,
        key: &SeriesKey,
        domain: HealthDomain,
    ) -> Result<Vec<u8>, RepositoryError>;

    /// Load and validate a blood pressure document
    async fn load_blood_pressure(
        &self,
        key: &SeriesKey,
    ) -> Result<BloodPressureDocument, RepositoryError> {
        let bytes = self.read_document(key, HealthDomain::BloodPressure).await?;
        decode_document(&bytes, key, HealthDomain::BloodPressure)
    }

    /// Load and validate a sleep stage document
    async fn load_sleep_stages(
        &self,
        key: &SeriesKey,
    ) -> Result<SleepStageDocument, RepositoryError> {
        let bytes = self.read_document(key, HealthDomain::SleepStages).await?;
        decode_document(&bytes, key, HealthDomain::SleepStages)
    }

    /// Load only the metadata header of a document
    async fn load_metadata(
        &self,
        key: &SeriesKey,
        domain: HealthDomain,
    ) -> Result<Metadata, RepositoryError> {
        let bytes = self.read_document(key, domain).await?;
        let header: DocumentHeader = serde_json::from_slice(&bytes)
            .map_err(|e| RepositoryError::Schema(e.to_string()))?;
        check_metadata(&header.metadata, key, domain)?;
        Ok(header.metadata)
    }
}

#[derive(Deserialize)]
struct DocumentHeader {
    metadata: Metadata,
}

#[derive(Deserialize)]
struct RawDocument {
    metadata: Metadata,
    timeseries: Vec<serde_json::Value>,
}

/// Decode a stored document into its typed form.
///
/// The outer shape and the metadata must match `domain`, otherwise the whole
/// document is rejected as a schema error. Each entry is then decoded on its
/// own so that a bad reading is reported with its index. Entries are kept in
/// stored order; sleep series may wrap past midnight.
pub fn decode_document<T: DeserializeOwned>(
    bytes: &[u8],
    key: &SeriesKey,
    domain: HealthDomain,
) -> Result<HealthData<T>, RepositoryError> {
    let raw: RawDocument = serde_json::from_slice(bytes)
        .map_err(|e| RepositoryError::Schema(e.to_string()))?;

    check_metadata(&raw.metadata, key, domain)?;

    let mut timeseries: Vec<TimeEntry<T>> = Vec::with_capacity(raw.timeseries.len());

    for (index, value) in raw.timeseries.into_iter().enumerate() {
        let entry: TimeEntry<T> = serde_json::from_value(value).map_err(|e| {
            RepositoryError::MalformedObservation { index, reason: e.to_string() }
        })?;

        if parse_time_of_day(&entry.time).is_none() {
            return Err(RepositoryError::Schema(format!(
                "entry {} has invalid time {:?}, expected HHMMSS",
                index, entry.time
            )));
        }
        timeseries.push(entry);
    }

    debug!(
        "Decoded {} document for {}/{} with {} entries",
        domain,
        key.user(),
        key.date(),
        timeseries.len()
    );

    Ok(HealthData { metadata: raw.metadata, timeseries })
}

/// Parse a six digit HHMMSS time of day
pub fn parse_time_of_day(time: &str) -> Option<NaiveTime> {
    if time.len() != 6 || !time.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    NaiveTime::parse_from_str(time, "%H%M%S").ok()
}

fn check_metadata(
    metadata: &Metadata,
    key: &SeriesKey,
    domain: HealthDomain,
) -> Result<(), RepositoryError> {
    if metadata.health_domain != domain {
        return Err(RepositoryError::Schema(format!(
            "document holds {} data, expected {}",
            metadata.health_domain, domain
        )));
    }

    if metadata.username != key.user() || metadata.date != key.date() {
        warn!(
            "Document metadata ({}/{}) does not match its location ({}/{})",
            metadata.username,
            metadata.date,
            key.user(),
            key.date()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BloodPressureData;

    fn key() -> SeriesKey {
        SeriesKey::new("jane_doe", "20250605").unwrap()
    }

    fn bp_json(entries: &str) -> String {
        format!(
            r#"{{"metadata":{{"username":"jane_doe","healthDomain":"blood-pressure","date":"20250605"}},"timeseries":[{}]}}"#,
            entries
        )
    }

    #[test]
    fn test_series_key_rejects_path_segments() {
        assert!(SeriesKey::new("../etc", "20250605").is_err());
        assert!(SeriesKey::new("", "20250605").is_err());
        assert!(SeriesKey::new("jane_doe", "2025-06-05").is_err());
        assert!(SeriesKey::new("jane-doe_2", "20250605").is_ok());
    }

    #[test]
    fn test_decode_valid_document() {
        let json = bp_json(
            r#"{"time":"080000","duration":60,"data":{"systolic":120,"diastolic":75,"average":90}},
               {"time":"080100","duration":60,"data":{"systolic":135,"diastolic":82,"average":100}}"#,
        );
        let doc: HealthData<BloodPressureData> =
            decode_document(json.as_bytes(), &key(), HealthDomain::BloodPressure).unwrap();
        assert_eq!(doc.timeseries.len(), 2);
        assert_eq!(doc.timeseries[1].data.systolic, 135);
    }

    #[test]
    fn test_decode_reports_malformed_entry_index() {
        let json = bp_json(
            r#"{"time":"080000","data":{"systolic":120,"diastolic":75,"average":90}},
               {"time":"080100","data":{"systolic":"high","diastolic":82,"average":100}}"#,
        );
        let err = decode_document::<BloodPressureData>(
            json.as_bytes(),
            &key(),
            HealthDomain::BloodPressure,
        )
        .unwrap_err();
        assert!(matches!(err, RepositoryError::MalformedObservation { index: 1, .. }));
    }

    #[test]
    fn test_decode_missing_diastolic_is_malformed() {
        let json = bp_json(r#"{"time":"080000","data":{"systolic":120,"average":90}}"#);
        let err = decode_document::<BloodPressureData>(
            json.as_bytes(),
            &key(),
            HealthDomain::BloodPressure,
        )
        .unwrap_err();
        assert!(matches!(err, RepositoryError::MalformedObservation { index: 0, .. }));
    }

    #[test]
    fn test_decode_rejects_wrong_shape() {
        let err = decode_document::<BloodPressureData>(
            br#"{"readings":[]}"#,
            &key(),
            HealthDomain::BloodPressure,
        )
        .unwrap_err();
        assert!(matches!(err, RepositoryError::Schema(_)));
    }

    #[test]
    fn test_decode_rejects_domain_mismatch() {
        let json = bp_json("");
        let err = decode_document::<BloodPressureData>(
            json.as_bytes(),
            &key(),
            HealthDomain::SleepStages,
        )
        .unwrap_err();
        assert!(matches!(err, RepositoryError::Schema(_)));
    }

    #[test]
    fn test_decode_rejects_bad_time() {
        let bad_time = bp_json(r#"{"time":"8:00","data":{"systolic":120,"diastolic":75,"average":90}}"#);
        assert!(matches!(
            decode_document::<BloodPressureData>(bad_time.as_bytes(), &key(), HealthDomain::BloodPressure),
            Err(RepositoryError::Schema(_))
        ));
    }

    #[test]
    fn test_decode_allows_repeated_times() {
        let json = bp_json(
            r#"{"time":"080000","data":{"systolic":120,"diastolic":75,"average":90}},
               {"time":"080000","data":{"systolic":121,"diastolic":76,"average":91}}"#,
        );
        let doc = decode_document::<BloodPressureData>(json.as_bytes(), &key(), HealthDomain::BloodPressure)
            .unwrap();
        assert_eq!(doc.timeseries.len(), 2);
    }

    #[test]
    fn test_parse_time_of_day() {
        assert_eq!(parse_time_of_day("235959"), NaiveTime::from_hms_opt(23, 59, 59));
        assert!(parse_time_of_day("240000").is_none());
        assert!(parse_time_of_day("12345").is_none());
        assert!(parse_time_of_day("+12345").is_none());
    }
}
