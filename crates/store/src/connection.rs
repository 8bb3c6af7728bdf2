//! The store's single connection: opened on first use, released on demand.

use sqlx::sqlite::SqliteConnection;
use sqlx::{ConnectOptions, Connection};
use tokio::runtime::Runtime;

use crate::config::StoreConfig;
use crate::error::StoreResult;
use crate::schema;

#[derive(Debug)]
pub(crate) struct LazyConnection {
    config: StoreConfig,
    conn: Option<SqliteConnection>,
}

impl LazyConnection {
    pub(crate) fn new(config: StoreConfig) -> Self {
        Self { config, conn: None }
    }

    pub(crate) fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub(crate) fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    /// Get the connection, opening it (and ensuring the schema) if necessary.
    pub(crate) fn acquire(&mut self, runtime: &Runtime) -> StoreResult<&mut SqliteConnection> {
        let conn = match self.conn.take() {
            Some(conn) => conn,
            None => runtime.block_on(open(&self.config))?,
        };
        Ok(self.conn.insert(conn))
    }

    /// Close the connection if open. Returns whether there was one to close.
    pub(crate) fn release(&mut self, runtime: &Runtime) -> StoreResult<bool> {
        let Some(conn) = self.conn.take() else {
            return Ok(false);
        };
        runtime.block_on(conn.close())?;
        tracing::info!(location = ?self.config.location, "database connection closed");
        Ok(true)
    }
}

async fn open(config: &StoreConfig) -> StoreResult<SqliteConnection> {
    let mut conn = config.connect_options()?.connect().await?;
    schema::init(&mut conn).await?;
    tracing::info!(location = ?config.location, "database connection opened");
    Ok(conn)
}
