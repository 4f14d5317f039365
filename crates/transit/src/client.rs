use std::future::Future;

use futures::{Stream, StreamExt};
use model::{
    line::Line,
    station::{Location, Station},
    WithDistance, WithId,
};
use tokio_stream::wrappers::WatchStream;
use utility::id::Id;

use crate::{
    database::{Database, LineRepo, Repo, StationRepo},
    not_found_to_none, RequestError, RequestResult,
};

#[derive(Debug, Clone)]
pub struct Client<D>
where
    D: Database + Send + Sync + Sized + 'static,
{
    id: String,
    pub database: D,
}

impl<D> Client<D>
where
    D: Database,
{
    pub(crate) fn new<S>(id: S, database: D) -> Self
    where
        S: Into<String>,
    {
        Self {
            id: id.into(),
            database,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Runs `query` now and again after every committed change of the store.
    /// Dropping the stream ends the observation.
    fn observe<T, F, Fut>(&self, mut query: F) -> impl Stream<Item = T> + Send + 'static
    where
        F: FnMut(Self) -> Fut + Send + 'static,
        Fut: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let client = self.clone();
        WatchStream::new(self.database.subscribe()).then(move |revision| {
            log::debug!("{}: store revision {}, re-running query", client.id, revision);
            query(client.clone())
        })
    }

    async fn require_line(&self, line_id: &Id<Line>) -> RequestResult<()> {
        if Repo::<Line>::exists(&mut self.database.auto(), line_id.clone()).await? {
            Ok(())
        } else {
            Err(RequestError::UnknownLine(line_id.to_string()))
        }
    }
}

impl<D> Client<D>
where
    D: Database,
{
    pub async fn get_lines(&self) -> RequestResult<Vec<WithId<Line>>> {
        Ok(Repo::<Line>::get_all(&mut self.database.auto()).await?)
    }

    pub fn watch_lines(
        &self,
    ) -> impl Stream<Item = RequestResult<Vec<WithId<Line>>>> + Send + 'static {
        self.observe(|client| async move { client.get_lines().await })
    }

    pub async fn get_line(&self, id: Id<Line>) -> RequestResult<Option<WithId<Line>>> {
        let result = self.database.auto().get(id).await;
        not_found_to_none(result.map_err(RequestError::from))
    }

    pub async fn get_line_by_number(
        &self,
        number: u32,
    ) -> RequestResult<Option<WithId<Line>>> {
        Ok(self.database.auto().line_by_number(number).await?)
    }

    pub async fn get_line_by_name<S: Into<String> + Send>(
        &self,
        name: S,
    ) -> RequestResult<Option<WithId<Line>>> {
        Ok(self.database.auto().line_by_name(name).await?)
    }

    pub async fn insert_line(&self, line: Line) -> RequestResult<WithId<Line>> {
        if line.number == 0 {
            return Err(RequestError::Invalid("line numbers start at 1".to_owned()));
        }
        let inserted = self.database.auto().insert(line).await?;
        log::debug!("{}: inserted line {} ({})", self.id, inserted.id, inserted.content.name);
        Ok(inserted)
    }

    pub async fn update_line(&self, line: WithId<Line>) -> RequestResult<WithId<Line>> {
        if line.content.number == 0 {
            return Err(RequestError::Invalid("line numbers start at 1".to_owned()));
        }
        Ok(self.database.auto().update(line).await?)
    }

    /// Fails with `RequestError::LineInUse` while stations still reference the line.
    pub async fn delete_line(&self, id: Id<Line>) -> RequestResult<()> {
        if self.database.auto().delete(id).await? {
            Ok(())
        } else {
            Err(RequestError::NotFound)
        }
    }

    pub async fn delete_all_lines(&self) -> RequestResult<u64> {
        Ok(Repo::<Line>::delete_all(&mut self.database.auto()).await?)
    }
}

impl<D> Client<D>
where
    D: Database,
{
    pub async fn get_stations(&self) -> RequestResult<Vec<WithId<Station>>> {
        Ok(Repo::<Station>::get_all(&mut self.database.auto()).await?)
    }

    pub fn watch_stations(
        &self,
    ) -> impl Stream<Item = RequestResult<Vec<WithId<Station>>>> + Send + 'static {
        self.observe(|client| async move { client.get_stations().await })
    }

    pub async fn get_station(
        &self,
        id: Id<Station>,
    ) -> RequestResult<Option<WithId<Station>>> {
        let result = self.database.auto().get(id).await;
        not_found_to_none(result.map_err(RequestError::from))
    }

    /// Matches `query` against station names and districts. A blank query
    /// matches every station.
    pub async fn search_stations(
        &self,
        query: &str,
    ) -> RequestResult<Vec<WithId<Station>>> {
        let query = query.trim();
        if query.is_empty() {
            return self.get_stations().await;
        }
        Ok(self.database.auto().search(query).await?)
    }

    pub fn watch_search<S: Into<String>>(
        &self,
        query: S,
    ) -> impl Stream<Item = RequestResult<Vec<WithId<Station>>>> + Send + 'static {
        let query = query.into();
        self.observe(move |client| {
            let query = query.clone();
            async move { client.search_stations(&query).await }
        })
    }

    /// Stations of the line named exactly `line_name`, or all stations for
    /// `None`. An unknown line name yields no stations.
    pub async fn get_stations_by_line(
        &self,
        line_name: Option<&str>,
    ) -> RequestResult<Vec<WithId<Station>>> {
        self.search_stations_on_line("", line_name).await
    }

    pub fn watch_stations_by_line(
        &self,
        line_name: Option<String>,
    ) -> impl Stream<Item = RequestResult<Vec<WithId<Station>>>> + Send + 'static {
        self.observe(move |client| {
            let line_name = line_name.clone();
            async move { client.get_stations_by_line(line_name.as_deref()).await }
        })
    }

    pub async fn get_stations_of_line(
        &self,
        line_id: &Id<Line>,
    ) -> RequestResult<Vec<WithId<Station>>> {
        Ok(self.database.auto().get_by_line(line_id).await?)
    }

    pub async fn search_stations_on_line(
        &self,
        query: &str,
        line_name: Option<&str>,
    ) -> RequestResult<Vec<WithId<Station>>> {
        let Some(line_name) = line_name else {
            return self.search_stations(query).await;
        };
        let Some(line) = self.get_line_by_name(line_name).await? else {
            return Ok(Vec::new());
        };
        let query = query.trim();
        if query.is_empty() {
            self.get_stations_of_line(&line.id).await
        } else {
            Ok(self.database.auto().search_on_line(query, &line.id).await?)
        }
    }

    pub fn watch_search_on_line(
        &self,
        query: String,
        line_name: Option<String>,
    ) -> impl Stream<Item = RequestResult<Vec<WithId<Station>>>> + Send + 'static {
        self.observe(move |client| {
            let query = query.clone();
            let line_name = line_name.clone();
            async move {
                client
                    .search_stations_on_line(&query, line_name.as_deref())
                    .await
            }
        })
    }

    /// Stations within `radius_km` of the given point, nearest first.
    pub async fn find_nearby_stations(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
    ) -> RequestResult<Vec<WithDistance<WithId<Station>>>> {
        if !utility::geo::is_valid_coordinate(latitude, longitude) || radius_km < 0.0 {
            return Err(RequestError::Invalid(format!(
                "no area around ({}, {}) with radius {} km",
                latitude, longitude, radius_km
            )));
        }
        let candidates = self
            .database
            .auto()
            .find_nearby(latitude, longitude, radius_km)
            .await?;
        let center = Location::new(latitude, longitude);
        let mut nearby = candidates
            .into_iter()
            .map(|station| {
                let distance = center.distance_km(&station.content.location);
                WithDistance::new(distance, station)
            })
            .filter(|station| station.distance_km <= radius_km)
            .collect::<Vec<_>>();
        nearby.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
        Ok(nearby)
    }

    /// Fails with `RequestError::UnknownLine` if `line_id` names no line.
    pub async fn insert_station(&self, station: Station) -> RequestResult<WithId<Station>> {
        self.require_line(&station.line_id).await?;
        let inserted = self.database.auto().insert(station).await?;
        log::debug!("{}: inserted station {} ({})", self.id, inserted.id, inserted.content.name);
        Ok(inserted)
    }

    pub async fn update_station(
        &self,
        station: WithId<Station>,
    ) -> RequestResult<WithId<Station>> {
        self.require_line(&station.content.line_id).await?;
        Ok(self.database.auto().update(station).await?)
    }

    pub async fn delete_station(&self, id: Id<Station>) -> RequestResult<()> {
        if self.database.auto().delete(id).await? {
            Ok(())
        } else {
            Err(RequestError::NotFound)
        }
    }

    pub async fn delete_all_stations(&self) -> RequestResult<u64> {
        Ok(Repo::<Station>::delete_all(&mut self.database.auto()).await?)
    }
}
