use anyhow::Context;

use crate::config::AppConfig;
use crate::database::{schema, ConnectionFactory, HomeStore, MySqlStore};

fn store(config: &AppConfig) -> MySqlStore {
    MySqlStore::new(ConnectionFactory::new(&config.database))
}

/// Unlike startup initialization, failures here are reported through the
/// exit status.
pub async fn init(config: AppConfig) -> anyhow::Result<()> {
    schema::initialize(&store(&config))
        .await
        .context("schema initialization failed")?;
    println!("Database initialized");
    Ok(())
}

pub async fn check(config: AppConfig) -> anyhow::Result<()> {
    store(&config)
        .ping()
        .await
        .context("database is not reachable")?;
    println!("Database connection ok");
    Ok(())
}
