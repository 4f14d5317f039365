use async_trait::async_trait;
use model::remote_station::RemoteStation;

use crate::RequestResult;

/// A remote list of stations, independent of the local store.
#[async_trait]
pub trait StationFeed: Send + Sync {
    async fn fetch_remote_stations(&self) -> RequestResult<Vec<RemoteStation>>;
}
