use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::Connection;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::DatabaseConfig;

/// Errors from the connection factory and the store
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    /// Error reported by the server while executing a statement
    #[error("{0}")]
    Query(String),

    #[error(transparent)]
    Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => DatabaseError::Query(db_err.to_string()),
            other => DatabaseError::Sqlx(other),
        }
    }
}

/// Opens one MySQL connection per call. There is no pooling; every caller
/// pays the full connection setup cost and must hand the connection back to
/// [`release`] when done.
#[derive(Clone)]
pub struct ConnectionFactory {
    options: MySqlConnectOptions,
}

impl ConnectionFactory {
    pub fn new(config: &DatabaseConfig) -> Self {
        Self {
            options: Self::connect_options(config),
        }
    }

    fn connect_options(config: &DatabaseConfig) -> MySqlConnectOptions {
        let mut options = MySqlConnectOptions::new().port(config.port);
        if let Some(host) = &config.host {
            options = options.host(host);
        }
        if let Some(user) = &config.user {
            options = options.username(user);
        }
        if let Some(password) = &config.password {
            options = options.password(password);
        }
        if let Some(database) = &config.database {
            options = options.database(database);
        }
        options
    }

    pub async fn open(&self) -> Result<MySqlConnection, DatabaseError> {
        let conn = MySqlConnection::connect_with(&self.options)
            .await
            .map_err(DatabaseError::Connect)?;
        debug!("opened database connection");
        Ok(conn)
    }
}

/// Close a connection gracefully. Failures are logged; the socket is gone
/// either way once the connection is dropped.
pub async fn release(conn: MySqlConnection) {
    if let Err(e) = conn.close().await {
        warn!("error closing database connection: {}", e);
    }
}
