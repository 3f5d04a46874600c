pub mod manager;
pub mod models;
pub mod mysql;
pub mod schema;
pub mod store;

pub use manager::{ConnectionFactory, DatabaseError};
pub use mysql::MySqlStore;
pub use store::HomeStore;
