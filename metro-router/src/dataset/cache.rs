//! On-disk copy of the downloaded dataset.
//!
//! Only the raw feature collection is stored. Stations and the graph are
//! rebuilt from it on every run.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use super::error::DatasetError;
use crate::network::FeatureCollection;

const DEFAULT_MAX_AGE: Duration = Duration::from_secs(24 * 60 * 60);

/// What goes in the cache file.
#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    /// Seconds since the Unix epoch at write time.
    written_at: u64,
    /// URL the collection came from. A different URL is a miss.
    url: String,
    collection: FeatureCollection,
}

impl Snapshot {
    fn is_fresh(&self, now: u64, max_age: Duration) -> bool {
        now.saturating_sub(self.written_at) < max_age.as_secs()
    }
}

/// Where the dataset is cached and for how long.
#[derive(Debug, Clone)]
pub struct DatasetCacheConfig {
    pub file: PathBuf,
    pub max_age: Duration,
}

impl DatasetCacheConfig {
    /// Cache at `file`, valid for a day.
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            max_age: DEFAULT_MAX_AGE,
        }
    }

    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }
}

impl Default for DatasetCacheConfig {
    fn default() -> Self {
        Self::new("metro_dataset_cache.json")
    }
}

/// Reads and writes the cached dataset.
#[derive(Debug, Clone)]
pub struct DatasetCache {
    config: DatasetCacheConfig,
}

impl DatasetCache {
    pub fn new(config: DatasetCacheConfig) -> Self {
        Self { config }
    }

    /// The cached collection for `url`, if one was written recently enough.
    ///
    /// A missing, unparsable, stale or foreign file is treated as a miss.
    pub fn load(&self, url: &str) -> Option<FeatureCollection> {
        let raw = std::fs::read(&self.config.file).ok()?;
        let snapshot: Snapshot = serde_json::from_slice(&raw).ok()?;

        let now = epoch_secs().ok()?;
        let hit = snapshot.url == url && snapshot.is_fresh(now, self.config.max_age);
        hit.then_some(snapshot.collection)
    }

    /// Store `collection` as fetched from `url`.
    ///
    /// Writes a sibling temporary file and renames it over the cache; the
    /// previous copy survives a failed write.
    pub fn save(&self, url: &str, collection: &FeatureCollection) -> Result<(), DatasetError> {
        let snapshot = Snapshot {
            written_at: epoch_secs()?,
            url: url.to_string(),
            collection: collection.clone(),
        };
        let body = serde_json::to_vec(&snapshot).map_err(cache_error("encode snapshot"))?;

        let file = &self.config.file;
        if let Some(dir) = file.parent()
            && !dir.as_os_str().is_empty()
        {
            std::fs::create_dir_all(dir).map_err(cache_error("create cache directory"))?;
        }

        let staging = file.with_extension("json.tmp");
        std::fs::write(&staging, body).map_err(cache_error("write cache file"))?;
        std::fs::rename(&staging, file).map_err(cache_error("replace cache file"))
    }

    pub fn path(&self) -> &Path {
        &self.config.file
    }

    pub fn max_age(&self) -> Duration {
        self.config.max_age
    }
}

fn cache_error<E: std::fmt::Display>(action: &'static str) -> impl Fn(E) -> DatasetError {
    move |e| DatasetError::Cache {
        message: format!("failed to {action}: {e}"),
    }
}

fn epoch_secs() -> Result<u64, DatasetError> {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .map_err(cache_error("read system clock"))
}
