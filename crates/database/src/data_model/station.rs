use async_trait::async_trait;
use chrono::NaiveTime;
use model::{
    line::Line,
    station::{Location, Station},
    WithId,
};
use sqlx::prelude::FromRow;
use transit::database::{Repo, Result, StationRepo};
use utility::id::Id;

use super::DatabaseRow;
use crate::{
    queries::station::{
        count, delete, delete_all, exists, find_nearby, get, get_all, get_by_line, insert,
        search, search_on_line, update,
    },
    SqliteDatabaseAutocommit, SqliteDatabaseTransaction,
};

#[derive(Debug, Clone, FromRow)]
pub struct StationRow {
    pub id: i64,
    pub name: String,
    pub line_id: i64,
    pub district: String,
    pub opening_time: NaiveTime,
    pub closing_time: NaiveTime,
    pub latitude: f64,
    pub longitude: f64,
    pub image: Option<String>,
}

impl DatabaseRow for StationRow {
    type Model = Station;

    fn get_id(&self) -> Id<Self::Model> {
        Id::new(self.id)
    }

    fn to_model(self) -> Self::Model {
        Station {
            name: self.name,
            line_id: Id::new(self.line_id),
            district: self.district,
            opening_time: self.opening_time,
            closing_time: self.closing_time,
            location: Location::new(self.latitude, self.longitude),
            image: self.image,
        }
    }
}

// Repo

#[async_trait]
impl Repo<Station> for SqliteDatabaseAutocommit {
    async fn get(&mut self, id: Id<Station>) -> Result<WithId<Station>> {
        get(&self.pool, id).await
    }

    async fn get_all(&mut self) -> Result<Vec<WithId<Station>>> {
        get_all(&self.pool).await
    }

    async fn insert(&mut self, element: Station) -> Result<WithId<Station>> {
        let result = insert(&self.pool, element).await?;
        self.notify();
        Ok(result)
    }

    async fn update(&mut self, element: WithId<Station>) -> Result<WithId<Station>> {
        let result = update(&self.pool, element).await?;
        self.notify();
        Ok(result)
    }

    async fn delete(&mut self, id: Id<Station>) -> Result<bool> {
        let deleted = delete(&self.pool, id).await?;
        if deleted {
            self.notify();
        }
        Ok(deleted)
    }

    async fn delete_all(&mut self) -> Result<u64> {
        let deleted = delete_all(&self.pool).await?;
        if deleted > 0 {
            self.notify();
        }
        Ok(deleted)
    }

    async fn count(&mut self) -> Result<u64> {
        count(&self.pool).await
    }

    async fn exists(&mut self, id: Id<Station>) -> Result<bool> {
        exists(&self.pool, id).await
    }
}

#[async_trait]
impl Repo<Station> for SqliteDatabaseTransaction {
    async fn get(&mut self, id: Id<Station>) -> Result<WithId<Station>> {
        get(&mut *self.tx, id).await
    }

    async fn get_all(&mut self) -> Result<Vec<WithId<Station>>> {
        get_all(&mut *self.tx).await
    }

    async fn insert(&mut self, element: Station) -> Result<WithId<Station>> {
        self.dirty = true;
        insert(&mut *self.tx, element).await
    }

    async fn update(&mut self, element: WithId<Station>) -> Result<WithId<Station>> {
        self.dirty = true;
        update(&mut *self.tx, element).await
    }

    async fn delete(&mut self, id: Id<Station>) -> Result<bool> {
        self.dirty = true;
        delete(&mut *self.tx, id).await
    }

    async fn delete_all(&mut self) -> Result<u64> {
        self.dirty = true;
        delete_all(&mut *self.tx).await
    }

    async fn count(&mut self) -> Result<u64> {
        count(&mut *self.tx).await
    }

    async fn exists(&mut self, id: Id<Station>) -> Result<bool> {
        exists(&mut *self.tx, id).await
    }
}

// Station Repo

#[async_trait]
impl StationRepo for SqliteDatabaseAutocommit {
    async fn search<S: Into<String> + Send>(
        &mut self,
        pattern: S,
    ) -> Result<Vec<WithId<Station>>> {
        search(&self.pool, pattern).await
    }

    async fn get_by_line(&mut self, line_id: &Id<Line>) -> Result<Vec<WithId<Station>>> {
        get_by_line(&self.pool, line_id).await
    }

    async fn search_on_line<S: Into<String> + Send>(
        &mut self,
        pattern: S,
        line_id: &Id<Line>,
    ) -> Result<Vec<WithId<Station>>> {
        search_on_line(&self.pool, pattern, line_id).await
    }

    async fn find_nearby(
        &mut self,
        latitude: f64,
        longitude: f64,
        radius: f64,
    ) -> Result<Vec<WithId<Station>>> {
        find_nearby(&self.pool, latitude, longitude, radius).await
    }
}

#[async_trait]
impl StationRepo for SqliteDatabaseTransaction {
    async fn search<S: Into<String> + Send>(
        &mut self,
        pattern: S,
    ) -> Result<Vec<WithId<Station>>> {
        search(&mut *self.tx, pattern).await
    }

    async fn get_by_line(&mut self, line_id: &Id<Line>) -> Result<Vec<WithId<Station>>> {
        get_by_line(&mut *self.tx, line_id).await
    }

    async fn search_on_line<S: Into<String> + Send>(
        &mut self,
        pattern: S,
        line_id: &Id<Line>,
    ) -> Result<Vec<WithId<Station>>> {
        search_on_line(&mut *self.tx, pattern, line_id).await
    }

    async fn find_nearby(
        &mut self,
        latitude: f64,
        longitude: f64,
        radius: f64,
    ) -> Result<Vec<WithId<Station>>> {
        find_nearby(&mut *self.tx, latitude, longitude, radius).await
    }
}
