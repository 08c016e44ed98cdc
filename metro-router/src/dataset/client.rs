//! GeoJSON dataset client.

use std::time::Duration;

use tracing::debug;

use super::error::DatasetError;
use crate::network::FeatureCollection;

/// Default dataset: Namma Metro (Bengaluru) lines and stations.
pub const DEFAULT_DATA_URL: &str =
    "https://raw.githubusercontent.com/geohacker/namma-metro/master/metro-lines-stations.geojson";

/// Longest error body kept in [`DatasetError::Api`].
const MAX_ERROR_BODY: usize = 200;

/// Where to download the dataset from.
#[derive(Debug, Clone)]
pub struct DatasetClientConfig {
    pub url: String,
    /// Whole-request timeout.
    pub timeout: Duration,
}

impl DatasetClientConfig {
    /// Fetch from `url` with a 15 second timeout.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: Duration::from_secs(15),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for DatasetClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_URL)
    }
}

/// Client that downloads the station dataset.
#[derive(Debug, Clone)]
pub struct DatasetClient {
    http: reqwest::Client,
    url: String,
}

impl DatasetClient {
    pub fn new(config: DatasetClientConfig) -> Result<Self, DatasetError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            url: config.url,
        })
    }

    /// The URL this client fetches.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Download and parse the feature collection.
    pub async fn fetch(&self) -> Result<FeatureCollection, DatasetError> {
        debug!(url = %self.url, "Fetching dataset");

        let response = self.http.get(&self.url).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            parse_collection(&text)
        } else {
            Err(DatasetError::Api {
                status: status.as_u16(),
                message: text.chars().take(MAX_ERROR_BODY).collect(),
            })
        }
    }
}

/// Parse a GeoJSON document body.
pub fn parse_collection(body: &str) -> Result<FeatureCollection, DatasetError> {
    serde_json::from_str(body).map_err(|e| DatasetError::Json {
        message: e.to_string(),
    })
}
