use async_trait::async_trait;
use model::{
    line::{Line, LineStatus},
    WithId,
};
use sqlx::prelude::FromRow;
use transit::database::{LineRepo, Repo, Result};
use utility::id::Id;

use super::DatabaseRow;
use crate::{
    queries::line::{
        count, delete, delete_all, exists, get, get_all, get_by_name, get_by_number, insert,
        update,
    },
    SqliteDatabaseAutocommit, SqliteDatabaseTransaction,
};

#[derive(Debug, Clone, Copy, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
pub enum RowLineStatus {
    Operational,
    UnderConstruction,
    Planned,
}

impl RowLineStatus {
    pub fn to_line_status(self) -> LineStatus {
        match self {
            Self::Operational => LineStatus::Operational,
            Self::UnderConstruction => LineStatus::UnderConstruction,
            Self::Planned => LineStatus::Planned,
        }
    }

    pub fn from_line_status(status: LineStatus) -> Self {
        match status {
            LineStatus::Operational => Self::Operational,
            LineStatus::UnderConstruction => Self::UnderConstruction,
            LineStatus::Planned => Self::Planned,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct LineRow {
    pub id: i64,
    pub name: String,
    pub number: u32,
    pub color_hex: String,
    pub status: RowLineStatus,
    pub description: String,
    pub start_station: String,
    pub end_station: String,
}

impl DatabaseRow for LineRow {
    type Model = Line;

    fn get_id(&self) -> Id<Self::Model> {
        Id::new(self.id)
    }

    fn to_model(self) -> Self::Model {
        Line {
            name: self.name,
            number: self.number,
            color_hex: self.color_hex,
            status: self.status.to_line_status(),
            description: self.description,
            start_station: self.start_station,
            end_station: self.end_station,
        }
    }
}

// Repo

#[async_trait]
impl Repo<Line> for SqliteDatabaseAutocommit {
    async fn get(&mut self, id: Id<Line>) -> Result<WithId<Line>> {
        get(&self.pool, id).await
    }

    async fn get_all(&mut self) -> Result<Vec<WithId<Line>>> {
        get_all(&self.pool).await
    }

    async fn insert(&mut self, element: Line) -> Result<WithId<Line>> {
        let result = insert(&self.pool, element).await?;
        self.notify();
        Ok(result)
    }

    async fn update(&mut self, element: WithId<Line>) -> Result<WithId<Line>> {
        let result = update(&self.pool, element).await?;
        self.notify();
        Ok(result)
    }

    async fn delete(&mut self, id: Id<Line>) -> Result<bool> {
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

    async fn exists(&mut self, id: Id<Line>) -> Result<bool> {
        exists(&self.pool, id).await
    }
}

#[async_trait]
impl Repo<Line> for SqliteDatabaseTransaction {
    async fn get(&mut self, id: Id<Line>) -> Result<WithId<Line>> {
        get(&mut *self.tx, id).await
    }

    async fn get_all(&mut self) -> Result<Vec<WithId<Line>>> {
        get_all(&mut *self.tx).await
    }

    async fn insert(&mut self, element: Line) -> Result<WithId<Line>> {
        self.dirty = true;
        insert(&mut *self.tx, element).await
    }

    async fn update(&mut self, element: WithId<Line>) -> Result<WithId<Line>> {
        self.dirty = true;
        update(&mut *self.tx, element).await
    }

    async fn delete(&mut self, id: Id<Line>) -> Result<bool> {
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

    async fn exists(&mut self, id: Id<Line>) -> Result<bool> {
        exists(&mut *self.tx, id).await
    }
}

// Line Repo

#[async_trait]
impl LineRepo for SqliteDatabaseAutocommit {
    async fn line_by_number(&mut self, number: u32) -> Result<Option<WithId<Line>>> {
        get_by_number(&self.pool, number).await
    }

    async fn line_by_name<S: Into<String> + Send>(
        &mut self,
        name: S,
    ) -> Result<Option<WithId<Line>>> {
        get_by_name(&self.pool, name).await
    }
}

#[async_trait]
impl LineRepo for SqliteDatabaseTransaction {
    async fn line_by_number(&mut self, number: u32) -> Result<Option<WithId<Line>>> {
        get_by_number(&mut *self.tx, number).await
    }

    async fn line_by_name<S: Into<String> + Send>(
        &mut self,
        name: S,
    ) -> Result<Option<WithId<Line>>> {
        get_by_name(&mut *self.tx, name).await
    }
}
