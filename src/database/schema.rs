use tracing::{error, info};

use crate::database::manager::DatabaseError;
use crate::database::store::HomeStore;

pub const CREATE_USERS: &str = "CREATE TABLE IF NOT EXISTS Users (
    id INT PRIMARY KEY,
    name VARCHAR(255) NOT NULL
)";

pub const DROP_HOME: &str = "DROP TABLE IF EXISTS Home";

pub const DROP_HOMEOWNER: &str = "DROP TABLE IF EXISTS Homeowner";

pub const CREATE_HOMEOWNER: &str = "CREATE TABLE Homeowner (
    homeowner_id VARCHAR(255) PRIMARY KEY
)";

pub const CREATE_HOME: &str = "CREATE TABLE Home (
    home_id INT AUTO_INCREMENT PRIMARY KEY,
    homeowner_id VARCHAR(255) NOT NULL,
    home_name VARCHAR(255) NOT NULL,
    house_age INT NULL,
    house_use VARCHAR(255) NULL,
    renovations TEXT NULL,
    construction_type VARCHAR(255) NULL,
    floor_count INT NULL,
    lot_area DOUBLE NULL,
    floor_area DOUBLE NULL,
    selected_materials TEXT NULL,
    latitude DOUBLE NULL,
    longitude DOUBLE NULL,
    is_default BOOLEAN NOT NULL DEFAULT FALSE,
    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    FOREIGN KEY (homeowner_id) REFERENCES Homeowner(homeowner_id) ON DELETE CASCADE
)";

/// Statements for the destructive reset. `Home` references `Homeowner`, so it
/// is dropped first and created last.
pub const RESET_STATEMENTS: [&str; 4] = [DROP_HOME, DROP_HOMEOWNER, CREATE_HOMEOWNER, CREATE_HOME];

/// Create the legacy table and reset the home tables. A failure on the
/// legacy table is only logged; only reset failures are returned.
pub async fn initialize(store: &dyn HomeStore) -> Result<(), DatabaseError> {
    if let Err(e) = store.ensure_legacy_schema().await {
        error!("could not create Users table: {}", e);
    }
    store.reset_schema().await?;
    info!("database schema initialized");
    Ok(())
}

/// Startup variant of [`initialize`]: failures are logged and the process
/// keeps going, possibly with missing tables.
pub async fn initialize_on_startup(store: &dyn HomeStore) {
    if let Err(e) = initialize(store).await {
        error!("schema initialization failed, continuing without it: {}", e);
    }
}
