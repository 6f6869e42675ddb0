use chrono::{DateTime, Utc};

use crate::{
    model::{TIMESTAMP_FORMAT, WeatherObservation},
    storage::{ObjectStore, StorageError},
    weather::WeatherSource,
};

/// Key prefix for archived observations within the bucket.
pub const ARCHIVE_PREFIX: &str = "weather-data";

const CONTENT_TYPE_JSON: &str = "application/json";

/// Outcome of the idempotent bucket check, so the caller can report which
/// path was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketStatus {
    AlreadyExists,
    Created,
}

/// Deterministic storage key for one observation.
///
/// Keys are unique per (city, second); collision handling beyond timestamp
/// granularity is out of scope.
pub fn storage_key(city: &str, captured_at: DateTime<Utc>) -> String {
    format!(
        "{ARCHIVE_PREFIX}/{city}-{}.json",
        captured_at.format(TIMESTAMP_FORMAT)
    )
}

/// Fetches observations from a weather source and archives them in an
/// object store. Collaborators are passed in explicitly; the archiver holds
/// no global state.
#[derive(Debug)]
pub struct Archiver {
    source: Box<dyn WeatherSource>,
    store: Box<dyn ObjectStore>,
}

impl Archiver {
    pub fn new(source: Box<dyn WeatherSource>, store: Box<dyn ObjectStore>) -> Self {
        Self { source, store }
    }

    pub fn bucket(&self) -> &str {
        self.store.bucket()
    }

    /// Probe for the bucket and create it only when absent.
    ///
    /// A probe failure other than "not found" propagates as an error rather
    /// than being treated as absent.
    pub async fn ensure_bucket_exists(&self) -> Result<BucketStatus, StorageError> {
        if self.store.bucket_exists().await? {
            return Ok(BucketStatus::AlreadyExists);
        }

        self.store.create_bucket().await?;
        Ok(BucketStatus::Created)
    }

    pub async fn fetch_weather(&self, city: &str) -> anyhow::Result<WeatherObservation> {
        self.source.current(city).await
    }

    /// Archive one observation; returns the storage key on success.
    ///
    /// An empty observation writes nothing and reports `EmptyObservation`.
    /// Either the full body with its timestamp is written, or nothing is.
    pub async fn save(
        &self,
        observation: &WeatherObservation,
        city: &str,
    ) -> Result<String, StorageError> {
        if observation.is_empty() {
            return Err(StorageError::EmptyObservation {
                city: city.to_string(),
            });
        }

        let captured_at = Utc::now();
        let key = storage_key(city, captured_at);

        let body = observation
            .archived(captured_at)
            .map_err(|err| StorageError::Put {
                key: key.clone(),
                source: err.into(),
            })?;

        self.store.put_object(&key, body, CONTENT_TYPE_JSON).await?;

        Ok(key)
    }
}
