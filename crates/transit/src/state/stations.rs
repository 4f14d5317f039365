use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use model::{station::Station, WithId};
use serde::Serialize;
use tokio::sync::watch;
use utility::id::Id;

use super::Follower;
use crate::{client::Client, database::Database, RequestResult};

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationsSnapshot {
    pub loading: bool,
    pub query: String,
    pub line_filter: Option<String>,
    pub stations: Vec<WithId<Station>>,
    pub error: Option<String>,
}

struct Inner<D>
where
    D: Database + 'static,
{
    client: Client<D>,
    state: watch::Sender<StationsSnapshot>,
    /// Bumped by every refresh. Results of superseded refreshes are dropped.
    generation: AtomicU64,
}

impl<D> Inner<D>
where
    D: Database + 'static,
{
    async fn refresh(&self) -> RequestResult<()> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let (query, line_filter) = {
            let state = self.state.borrow();
            (state.query.clone(), state.line_filter.clone())
        };
        self.state.send_modify(|state| state.loading = true);
        let result = self
            .client
            .search_stations_on_line(&query, line_filter.as_deref())
            .await;
        if self.generation.load(Ordering::SeqCst) != generation {
            log::debug!("discarding stations for superseded filter {:?}", query);
            return result.map(|_| ());
        }
        self.state.send_modify(|state| {
            state.loading = false;
            match &result {
                Ok(stations) => {
                    state.stations = stations.clone();
                    state.error = None;
                }
                Err(why) => {
                    log::warn!("failed to load stations: {}", why);
                    state.error = Some(why.to_string());
                }
            }
        });
        result.map(|_| ())
    }
}

/// Station list with a text query and an optional line filter, both applied
/// together.
pub struct StationsState<D>
where
    D: Database + 'static,
{
    inner: Arc<Inner<D>>,
    follower: Option<Follower>,
}

impl<D> StationsState<D>
where
    D: Database + 'static,
{
    pub fn new(client: Client<D>) -> Self {
        let (state, _) = watch::channel(StationsSnapshot {
            loading: true,
            ..Default::default()
        });
        Self {
            inner: Arc::new(Inner {
                client,
                state,
                generation: AtomicU64::new(0),
            }),
            follower: None,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<StationsSnapshot> {
        self.inner.state.subscribe()
    }

    pub fn snapshot(&self) -> StationsSnapshot {
        self.inner.state.borrow().clone()
    }

    pub async fn refresh(&self) -> RequestResult<()> {
        self.inner.refresh().await
    }

    pub async fn search<S: Into<String>>(&self, query: S) -> RequestResult<()> {
        let query = query.into();
        self.inner.state.send_modify(|state| state.query = query);
        self.refresh().await
    }

    /// `None` shows the stations of all lines.
    pub async fn filter_line(&self, line_name: Option<String>) -> RequestResult<()> {
        self.inner
            .state
            .send_modify(|state| state.line_filter = line_name);
        self.refresh().await
    }

    pub async fn clear_filters(&self) -> RequestResult<()> {
        self.inner.state.send_modify(|state| {
            state.query.clear();
            state.line_filter = None;
        });
        self.refresh().await
    }

    pub async fn station(&self, id: Id<Station>) -> RequestResult<Option<WithId<Station>>> {
        self.inner.client.get_station(id).await
    }

    /// Re-applies the current filters after every change of the store.
    /// Must be called within a tokio runtime.
    pub fn follow(&mut self) {
        let inner = self.inner.clone();
        let mut changes = inner.client.database.subscribe();
        self.follower = Some(Follower(tokio::spawn(async move {
            // failures are published in the snapshot
            let _ = inner.refresh().await;
            while changes.changed().await.is_ok() {
                let _ = inner.refresh().await;
            }
        })));
    }
}
