use std::{error, fmt::Debug, result};

use async_trait::async_trait;
use model::{line::Line, station::Station, WithId};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::watch;
use utility::id::{HasId, Id};

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("not found")]
    NotFound,
    #[error("id missing")]
    IdMissing,
    #[error("foreign key constraint failed")]
    ForeignKeyViolation,
    #[error("{0}")]
    Other(Box<dyn error::Error + Send + Sync>),
}

pub type Result<T> = result::Result<T, DatabaseError>;

#[async_trait]
pub trait Repo<T: Serialize + HasId + Send + 'static>
where
    <T as HasId>::IdType: Debug + Clone + Serialize + Send,
{
    /// Fails with `DatabaseError::NotFound` if there is no element with `id`.
    async fn get(&mut self, id: Id<T>) -> Result<WithId<T>>;
    async fn get_all(&mut self) -> Result<Vec<WithId<T>>>;
    async fn insert(&mut self, element: T) -> Result<WithId<T>>;
    /// Fails with `DatabaseError::NotFound` if there is no element to update.
    async fn update(&mut self, element: WithId<T>) -> Result<WithId<T>>;
    /// Returns whether an element was deleted.
    async fn delete(&mut self, id: Id<T>) -> Result<bool>;
    /// Returns the number of deleted elements.
    async fn delete_all(&mut self) -> Result<u64>;
    async fn count(&mut self) -> Result<u64>;
    async fn exists(&mut self, id: Id<T>) -> Result<bool>;
}

#[async_trait]
pub trait LineRepo: Repo<Line> {
    async fn line_by_number(&mut self, number: u32) -> Result<Option<WithId<Line>>>;

    /// Exact, case sensitive match.
    async fn line_by_name<S: Into<String> + Send>(
        &mut self,
        name: S,
    ) -> Result<Option<WithId<Line>>>;
}

#[async_trait]
pub trait StationRepo: Repo<Station> {
    /// Substring match on name or district, ignoring ascii case. `%` and `_`
    /// are matched literally.
    async fn search<S: Into<String> + Send>(
        &mut self,
        pattern: S,
    ) -> Result<Vec<WithId<Station>>>;

    async fn get_by_line(&mut self, line_id: &Id<Line>) -> Result<Vec<WithId<Station>>>;

    async fn search_on_line<S: Into<String> + Send>(
        &mut self,
        pattern: S,
        line_id: &Id<Line>,
    ) -> Result<Vec<WithId<Station>>>;

    /// May return stations slightly outside of `radius` km. Callers filter by
    /// exact distance.
    async fn find_nearby(
        &mut self,
        latitude: f64,
        longitude: f64,
        radius: f64,
    ) -> Result<Vec<WithId<Station>>>;
}

pub trait DatabaseOperations: LineRepo + StationRepo {}

impl<T> DatabaseOperations for T where T: LineRepo + StationRepo {}

#[async_trait]
pub trait DatabaseTransaction: DatabaseOperations {
    /// Changes become visible to subscribers only after a successful commit.
    async fn commit(self) -> Result<()>;
}

pub trait DatabaseAutocommit: DatabaseOperations {}

/// trait to implement a metro database.
/// multiple concurrent accesses should be possible by e.g. cloning the database object.
#[async_trait]
pub trait Database: Clone + Send + Sync + Sized {
    type Transaction: DatabaseTransaction + Send;
    type Autocommit: DatabaseAutocommit + Send;

    async fn transaction(&self) -> Result<Self::Transaction>;

    fn auto(&self) -> Self::Autocommit;

    /// A receiver whose value changes after every committed modification of
    /// lines or stations. The value itself is a revision counter.
    fn subscribe(&self) -> watch::Receiver<u64>;
}
