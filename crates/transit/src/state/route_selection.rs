use std::sync::Arc;

use model::{remote_station::RemoteStation, route::RouteEstimate};
use serde::Serialize;
use tokio::sync::watch;

use crate::{feed::StationFeed, route::RouteEstimator};

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSelectionSnapshot {
    pub loading: bool,
    pub stations: Vec<RemoteStation>,
    pub origin: Option<RemoteStation>,
    pub destination: Option<RemoteStation>,
    pub estimate: Option<RouteEstimate>,
}

/// Picking origin and destination from the remote station list.
pub struct RouteSelectionState {
    feed: Arc<dyn StationFeed>,
    estimator: Arc<dyn RouteEstimator>,
    state: watch::Sender<RouteSelectionSnapshot>,
}

impl RouteSelectionState {
    pub fn new(feed: Arc<dyn StationFeed>, estimator: Arc<dyn RouteEstimator>) -> Self {
        let (state, _) = watch::channel(RouteSelectionSnapshot::default());
        Self {
            feed,
            estimator,
            state,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<RouteSelectionSnapshot> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> RouteSelectionSnapshot {
        self.state.borrow().clone()
    }

    /// Fetches the remote stations. A failing feed leaves an empty list.
    /// Chosen ends still present in the new list stay selected, and so does
    /// the estimate if both of them are unchanged.
    pub async fn load_remote(&self) {
        self.state.send_modify(|state| state.loading = true);
        let stations = match self.feed.fetch_remote_stations().await {
            Ok(stations) => stations,
            Err(why) => {
                log::warn!("could not load remote stations: {}", why);
                Vec::new()
            }
        };
        self.state.send_modify(|state| {
            let reselect = |chosen: &Option<RemoteStation>| {
                let id = chosen.as_ref()?.id;
                stations.iter().find(|station| station.id == id).cloned()
            };
            let origin = reselect(&state.origin);
            let destination = reselect(&state.destination);
            let unchanged = origin.is_some()
                && destination.is_some()
                && origin == state.origin
                && destination == state.destination;
            if !unchanged {
                state.estimate = None;
            }
            state.loading = false;
            state.origin = origin;
            state.destination = destination;
            state.stations = stations;
        });
    }

    /// Returns false if no loaded station has `id`.
    pub fn select_origin(&self, id: i64) -> bool {
        self.select(id, |state, station| state.origin = station)
    }

    /// Returns false if no loaded station has `id`.
    pub fn select_destination(&self, id: i64) -> bool {
        self.select(id, |state, station| state.destination = station)
    }

    fn select<F>(&self, id: i64, apply: F) -> bool
    where
        F: FnOnce(&mut RouteSelectionSnapshot, Option<RemoteStation>),
    {
        self.state.send_if_modified(|state| {
            let Some(station) = state.stations.iter().find(|station| station.id == id).cloned()
            else {
                return false;
            };
            apply(state, Some(station));
            state.estimate = None;
            true
        })
    }

    /// Estimates the route once both ends are chosen.
    pub fn calculate(&self) -> Option<RouteEstimate> {
        let (origin, destination) = {
            let state = self.state.borrow();
            (state.origin.clone()?, state.destination.clone()?)
        };
        let estimate = self.estimator.estimate(&origin.name, &destination.name);
        self.state
            .send_modify(|state| state.estimate = Some(estimate.clone()));
        Some(estimate)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::{route::RandomRouteEstimator, RequestError, RequestResult};

    struct FixedFeed(Vec<RemoteStation>);

    #[async_trait]
    impl StationFeed for FixedFeed {
        async fn fetch_remote_stations(&self) -> RequestResult<Vec<RemoteStation>> {
            Ok(self.0.clone())
        }
    }

    struct BrokenFeed;

    #[async_trait]
    impl StationFeed for BrokenFeed {
        async fn fetch_remote_stations(&self) -> RequestResult<Vec<RemoteStation>> {
            Err(RequestError::Invalid("connection refused".to_owned()))
        }
    }

    fn remote(id: i64, name: &str) -> RemoteStation {
        RemoteStation {
            id,
            name: name.to_owned(),
            line: "Línea 1".to_owned(),
            district: "Lima".to_owned(),
            opening_time: "06:00 AM".to_owned(),
            closing_time: "10:00 PM".to_owned(),
            alert: None,
            latitude: None,
            longitude: None,
        }
    }

    fn state(feed: impl StationFeed + 'static) -> RouteSelectionState {
        RouteSelectionState::new(Arc::new(feed), Arc::new(RandomRouteEstimator::seeded(3)))
    }

    #[tokio::test]
    async fn failing_feed_yields_empty_list() {
        let state = state(BrokenFeed);
        state.load_remote().await;
        let snapshot = state.snapshot();
        assert!(!snapshot.loading);
        assert!(snapshot.stations.is_empty());
    }

    #[tokio::test]
    async fn calculates_only_with_both_ends() {
        let state = state(FixedFeed(vec![remote(1, "Ate"), remote(2, "Bayóvar")]));
        state.load_remote().await;
        assert_eq!(state.calculate(), None);

        assert!(state.select_origin(1));
        assert_eq!(state.calculate(), None);

        assert!(state.select_destination(2));
        let estimate = state.calculate().unwrap();
        assert_eq!(estimate.origin, "Ate");
        assert_eq!(estimate.destination, "Bayóvar");
        assert!(estimate.is_within_bounds());
        assert_eq!(state.snapshot().estimate, Some(estimate));
    }

    #[tokio::test]
    async fn unknown_station_keeps_selection() {
        let state = state(FixedFeed(vec![remote(1, "Ate")]));
        state.load_remote().await;
        assert!(state.select_origin(1));
        assert!(!state.select_origin(99));
        assert_eq!(state.snapshot().origin.map(|station| station.id), Some(1));
    }

    struct SequenceFeed(std::sync::Mutex<Vec<Vec<RemoteStation>>>);

    #[async_trait]
    impl StationFeed for SequenceFeed {
        async fn fetch_remote_stations(&self) -> RequestResult<Vec<RemoteStation>> {
            let mut loads = self.0.lock().unwrap();
            Ok(if loads.len() > 1 {
                loads.remove(0)
            } else {
                loads[0].clone()
            })
        }
    }

    #[tokio::test]
    async fn reload_keeps_selection() {
        let state = state(FixedFeed(vec![remote(1, "Ate"), remote(2, "Bayóvar")]));
        state.load_remote().await;
        state.select_origin(1);
        state.select_destination(2);
        let estimate = state.calculate();

        state.load_remote().await;
        let snapshot = state.snapshot();
        assert_eq!(snapshot.origin.map(|station| station.id), Some(1));
        assert_eq!(snapshot.destination.map(|station| station.id), Some(2));
        assert_eq!(snapshot.estimate, estimate);
    }

    #[tokio::test]
    async fn reload_drops_vanished_ends() {
        let state = state(SequenceFeed(std::sync::Mutex::new(vec![
            vec![remote(1, "Ate"), remote(2, "Bayóvar")],
            vec![remote(1, "Ate"), remote(3, "Comas")],
        ])));
        state.load_remote().await;
        state.select_origin(1);
        state.select_destination(2);
        state.calculate();

        state.load_remote().await;
        let snapshot = state.snapshot();
        assert_eq!(snapshot.origin.map(|station| station.id), Some(1));
        assert_eq!(snapshot.destination, None);
        assert_eq!(snapshot.estimate, None);
    }

    #[tokio::test]
    async fn changing_an_end_clears_the_estimate() {
        let state = state(FixedFeed(vec![remote(1, "Ate"), remote(2, "Bayóvar")]));
        state.load_remote().await;
        state.select_origin(1);
        state.select_destination(2);
        state.calculate();
        state.select_destination(1);
        assert_eq!(state.snapshot().estimate, None);
    }
}
