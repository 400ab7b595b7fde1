//! Synthetic documents for demos and tests.

use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveTime};
use rand::Rng;
use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::models::{
    BloodPressureData, BloodPressureDocument, HealthData, HealthDomain, Metadata, SleepData,
    SleepStage, SleepStageDocument, TimeEntry,
};
use crate::repository::{RepositoryError, SeriesKey};

/// Seconds between two generated blood pressure readings
pub const BLOOD_PRESSURE_INTERVAL_SECS: u32 = 60;

/// Length of one scored sleep epoch
pub const SLEEP_EPOCH_SECS: u32 = 30;

// Typical order of stages through one sleep cycle
const SLEEP_CYCLE: [SleepStage; 6] = [
    SleepStage::Awake,
    SleepStage::N1,
    SleepStage::N2,
    SleepStage::N3,
    SleepStage::N2,
    SleepStage::Rem,
];

/// Mean arterial pressure, rounded to the nearest integer
pub fn mean_arterial_pressure(systolic: i32, diastolic: i32) -> i32 {
    ((systolic + 2 * diastolic) as f64 / 3.0).round() as i32
}

/// Generate one blood pressure reading per minute starting at `start`.
///
/// Generation stops early rather than wrapping past midnight, so the
/// series is always in ascending time order.
pub fn generate_blood_pressure_document<R: Rng + ?Sized>(
    username: &str,
    date: &str,
    start: NaiveTime,
    count: usize,
    rng: &mut R,
) -> BloodPressureDocument {
    let timeseries = time_slots(start, BLOOD_PRESSURE_INTERVAL_SECS, count)
        .map(|time| {
            let systolic = rng.gen_range(105..=150);
            let diastolic = rng.gen_range(65..=95);
            TimeEntry {
                time,
                duration: BLOOD_PRESSURE_INTERVAL_SECS,
                data: BloodPressureData {
                    systolic,
                    diastolic,
                    average: mean_arterial_pressure(systolic, diastolic),
                },
            }
        })
        .collect();

    HealthData {
        metadata: metadata(username, date, HealthDomain::BloodPressure),
        timeseries,
    }
}

/// Generate `count` sleep epochs cycling through the usual stage order
pub fn generate_sleep_document<R: Rng + ?Sized>(
    username: &str,
    date: &str,
    start: NaiveTime,
    count: usize,
    rng: &mut R,
) -> SleepStageDocument {
    let mut cycle_index = 0;
    let mut remaining_in_stage = rng.gen_range(2..=10);

    let timeseries = time_slots(start, SLEEP_EPOCH_SECS, count)
        .map(|time| {
            if remaining_in_stage == 0 {
                cycle_index = (cycle_index + 1) % SLEEP_CYCLE.len();
                remaining_in_stage = rng.gen_range(2..=10);
            }
            remaining_in_stage -= 1;

            TimeEntry {
                time,
                duration: SLEEP_EPOCH_SECS,
                data: SleepData {
                    stage: SLEEP_CYCLE[cycle_index],
                    stage_confidence: (rng.gen_range(0.6..1.0_f64) * 100.0).round() / 100.0,
                },
            }
        })
        .collect();

    HealthData {
        metadata: metadata(username, date, HealthDomain::SleepStages),
        timeseries,
    }
}

/// Write `document` into the `<root>/<user>/<date>/` layout, creating
/// directories as needed. Returns the path written.
pub async fn write_document<T: Serialize>(
    root: &Path,
    document: &HealthData<T>,
) -> Result<PathBuf, RepositoryError> {
    let key = SeriesKey::new(&document.metadata.username, &document.metadata.date)?;
    let dir = root.join(key.user()).join(key.date());
    tokio::fs::create_dir_all(&dir).await?;

    let path = dir.join(document.metadata.health_domain.file_name());
    let json = serde_json::to_vec_pretty(document)
        .map_err(|e| RepositoryError::Schema(e.to_string()))?;
    tokio::fs::write(&path, json).await?;

    info!("Wrote {} fixture to {}", document.metadata.health_domain, path.display());
    Ok(path)
}

/// Like [`write_document`] but never replaces a stored file. Returns
/// `None` when a document already exists at the target path.
pub async fn seed_document<T: Serialize>(
    root: &Path,
    document: &HealthData<T>,
) -> Result<Option<PathBuf>, RepositoryError> {
    let key = SeriesKey::new(&document.metadata.username, &document.metadata.date)?;
    let dir = root.join(key.user()).join(key.date());
    tokio::fs::create_dir_all(&dir).await?;

    let path = dir.join(document.metadata.health_domain.file_name());
    let json = serde_json::to_vec_pretty(document)
        .map_err(|e| RepositoryError::Schema(e.to_string()))?;

    let mut file = match tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .await
    {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            debug!("Keeping existing document at {}", path.display());
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };
    file.write_all(&json).await?;
    file.flush().await?;

    info!("Seeded {} fixture at {}", document.metadata.health_domain, path.display());
    Ok(Some(path))
}

fn metadata(username: &str, date: &str, domain: HealthDomain) -> Metadata {
    Metadata {
        username: username.to_string(),
        health_domain: domain,
        date: date.to_string(),
    }
}

fn time_slots(start: NaiveTime, step_secs: u32, count: usize) -> impl Iterator<Item = String> {
    (0..count)
        .map_while(move |i| {
            let offset = Duration::seconds(i as i64 * step_secs as i64);
            let (time, wrapped) = start.overflowing_add_signed(offset);
            (wrapped == 0).then_some(time)
        })
        .map(|time| time.format("%H%M%S").to_string())
}
