//! Station dataset retrieval.
//!
//! Downloads the GeoJSON station dataset and keeps a copy on disk so
//! repeated runs don't hit the network.

mod cache;
mod client;
mod error;

pub use cache::{DatasetCache, DatasetCacheConfig};
pub use client::{DEFAULT_DATA_URL, DatasetClient, DatasetClientConfig, parse_collection};
pub use error::DatasetError;

use tracing::{info, warn};

use crate::network::FeatureCollection;

/// Load the dataset, preferring a fresh cached copy.
///
/// A failed cache write is logged and otherwise ignored.
pub async fn load(
    client: &DatasetClient,
    cache: &DatasetCache,
) -> Result<FeatureCollection, DatasetError> {
    if let Some(collection) = cache.load(client.url()) {
        info!(
            path = %cache.path().display(),
            features = collection.len(),
            "Loaded dataset from cache"
        );
        return Ok(collection);
    }

    let collection = client.fetch().await?;
    info!(url = client.url(), features = collection.len(), "Fetched dataset");

    if let Err(e) = cache.save(client.url(), &collection) {
        warn!(error = %e, "Failed to cache dataset");
    }

    Ok(collection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::Feature;
    use serde_json::json;
    use std::time::Duration;
    use tempfile::TempDir;

    // Nothing listens on the discard port, so any fetch fails fast.
    const UNREACHABLE: &str = "http://127.0.0.1:9/stations.geojson";

    fn client() -> DatasetClient {
        let config = DatasetClientConfig::new(UNREACHABLE).with_timeout(Duration::from_secs(2));
        DatasetClient::new(config).unwrap()
    }

    fn cache_in(dir: &TempDir) -> DatasetCache {
        DatasetCache::new(DatasetCacheConfig::new(dir.path().join("dataset.json")))
    }

    #[tokio::test]
    async fn fresh_cache_skips_the_network() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir);
        let cached = FeatureCollection::new(vec![Feature::point(
            77.5729,
            12.9757,
            json!({ "name": "Majestic", "line": "Purple" }),
        )]);
        cache.save(UNREACHABLE, &cached).unwrap();

        let loaded = load(&client(), &cache).await.unwrap();
        assert_eq!(loaded.len(), 1);
    }

    #[tokio::test]
    async fn cache_miss_fetches_and_reports_failure() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir);

        let err = load(&client(), &cache).await.unwrap_err();
        assert!(matches!(err, DatasetError::Http(_)));
        assert!(!cache.path().exists());
    }

    #[tokio::test]
    async fn cache_for_other_url_is_ignored() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir);
        cache
            .save("https://example.com/other.geojson", &FeatureCollection::new(vec![]))
            .unwrap();

        let err = load(&client(), &cache).await.unwrap_err();
        assert!(matches!(err, DatasetError::Http(_)));
    }
}
