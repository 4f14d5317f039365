use async_trait::async_trait;
use model::remote_station::RemoteStation;
use thiserror::Error;
use transit::{feed::StationFeed, RequestError, RequestResult};

/// Hosted station list the app was published with.
pub const DEFAULT_FEED_URL: &str = "https://gist.githubusercontent.com/mmaffer/4e81d10920d950cf6e7f3b1d94bee476/raw/55bafa8d6cee5630309749f19e55a05ad08bff98/MetroLimaData.json";

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("could not reach station feed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("station feed answered with status {0}")]
    Status(reqwest::StatusCode),
    #[error("station feed is malformed: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Reads the remote station list. One GET per call, no caching, no retries.
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: reqwest::Client,
    url: String,
}

impl FeedClient {
    pub fn new<S: Into<String>>(url: S) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn fetch_remote_stations(&self) -> Result<Vec<RemoteStation>, FeedError> {
        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(FeedError::Request)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status));
        }
        let stations: Vec<RemoteStation> = response.json().await.map_err(FeedError::Decode)?;
        log::debug!("fetched {} remote stations from {}", stations.len(), self.url);
        Ok(stations)
    }
}

impl Default for FeedClient {
    fn default() -> Self {
        Self::new(DEFAULT_FEED_URL)
    }
}

#[async_trait]
impl StationFeed for FeedClient {
    async fn fetch_remote_stations(&self) -> RequestResult<Vec<RemoteStation>> {
        FeedClient::fetch_remote_stations(self)
            .await
            .map_err(RequestError::other)
    }
}
