use std::{error::Error, str::FromStr, sync::Arc};

use async_trait::async_trait;
use queries::convert_error;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Transaction,
};
use tokio::sync::watch;
use transit::database::{Database, DatabaseAutocommit, DatabaseTransaction};

pub mod data_model;
pub mod queries;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://metro.db?mode=rwc";

pub struct DatabaseConnectionInfo {
    pub url: String,
}

impl DatabaseConnectionInfo {
    pub fn new<S: Into<String>>(url: S) -> Self {
        Self { url: url.into() }
    }

    /// A private store that lives as long as the `SqliteDatabase`.
    pub fn in_memory() -> Self {
        Self::new("sqlite::memory:")
    }

    fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

impl Default for DatabaseConnectionInfo {
    fn default() -> Self {
        Self::new(DEFAULT_DATABASE_URL)
    }
}

#[derive(Clone)]
pub struct SqliteDatabase {
    connection: sqlx::SqlitePool,
    changes: Arc<watch::Sender<u64>>,
}

pub struct SqliteDatabaseTransaction {
    tx: Transaction<'static, sqlx::Sqlite>,
    changes: Arc<watch::Sender<u64>>,
    /// Whether this transaction wrote anything.
    dirty: bool,
}

#[async_trait]
impl DatabaseTransaction for SqliteDatabaseTransaction {
    async fn commit(self) -> transit::database::Result<()> {
        self.tx.commit().await.map_err(convert_error)?;
        if self.dirty {
            notify(&self.changes);
        }
        Ok(())
    }
}

pub struct SqliteDatabaseAutocommit {
    pool: sqlx::SqlitePool,
    changes: Arc<watch::Sender<u64>>,
}

impl SqliteDatabaseAutocommit {
    pub(crate) fn notify(&self) {
        notify(&self.changes);
    }
}

impl DatabaseAutocommit for SqliteDatabaseAutocommit {}

fn notify(changes: &watch::Sender<u64>) {
    changes.send_modify(|revision| *revision += 1);
    log::debug!("store changed, revision {}", *changes.borrow());
}

impl SqliteDatabase {
    pub async fn connect(
        database_connection_info: DatabaseConnectionInfo,
    ) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let options = SqliteConnectOptions::from_str(&database_connection_info.url)?
            .foreign_keys(true);
        let pool = if database_connection_info.is_in_memory() {
            // every connection would open its own empty in-memory store
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new().connect_with(options).await?
        };

        sqlx::migrate!("./migrations").run(&pool).await?;
        log::info!("connected to {}", database_connection_info.url);

        let (changes, _) = watch::channel(0);
        Ok(Self {
            connection: pool,
            changes: Arc::new(changes),
        })
    }

    pub async fn close(&self) {
        self.connection.close().await;
    }
}

#[async_trait]
impl Database for SqliteDatabase {
    type Transaction = SqliteDatabaseTransaction;
    type Autocommit = SqliteDatabaseAutocommit;

    fn auto(&self) -> Self::Autocommit {
        SqliteDatabaseAutocommit {
            pool: self.connection.clone(),
            changes: self.changes.clone(),
        }
    }

    async fn transaction(&self) -> transit::database::Result<Self::Transaction> {
        let tx: Transaction<'static, sqlx::Sqlite> =
            self.connection.begin().await.map_err(convert_error)?;

        Ok(SqliteDatabaseTransaction {
            tx,
            changes: self.changes.clone(),
            dirty: false,
        })
    }

    fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }
}
