use std::sync::Mutex;

use model::{
    route::{RouteEstimate, ESTIMATED_INTERMEDIATE_STATIONS, ESTIMATED_MINUTES},
    station::Station,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use utility::id::Id;

use crate::{client::Client, database::Database, RequestError, RequestResult};

/// Estimates travel between two stations, named by their display names.
pub trait RouteEstimator: Send + Sync {
    fn estimate(&self, origin: &str, destination: &str) -> RouteEstimate;
}

/// Placeholder estimator: draws travel time and stop count uniformly from
/// `ESTIMATED_MINUTES` and `ESTIMATED_INTERMEDIATE_STATIONS`, ignoring
/// where the stations actually are.
#[derive(Debug)]
pub struct RandomRouteEstimator<R = StdRng> {
    rng: Mutex<R>,
}

impl<R: Rng> RandomRouteEstimator<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl RandomRouteEstimator<StdRng> {
    /// Reproducible estimates.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl Default for RandomRouteEstimator<StdRng> {
    fn default() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng + Send> RouteEstimator for RandomRouteEstimator<R> {
    fn estimate(&self, origin: &str, destination: &str) -> RouteEstimate {
        // the rng stays usable after a panic in another estimate
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        RouteEstimate {
            origin: origin.to_owned(),
            destination: destination.to_owned(),
            minutes: rng.gen_range(ESTIMATED_MINUTES),
            intermediate_stations: rng.gen_range(ESTIMATED_INTERMEDIATE_STATIONS),
        }
    }
}

impl<D> Client<D>
where
    D: Database,
{
    /// Estimates the route between two stored stations. Origin and
    /// destination may be the same station.
    pub async fn estimate_route(
        &self,
        origin: Id<Station>,
        destination: Id<Station>,
        estimator: &dyn RouteEstimator,
    ) -> RequestResult<RouteEstimate> {
        let origin = self.get_station(origin).await?.ok_or(RequestError::NotFound)?;
        let destination = self
            .get_station(destination)
            .await?
            .ok_or(RequestError::NotFound)?;
        Ok(estimator.estimate(&origin.content.name, &destination.content.name))
    }
}
