use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{DefaultHome, Home, Homeowner, LegacyUser, NewHome};

/// Every data operation the HTTP handlers perform. Each call is
/// self-contained: implementations acquire and release whatever connection
/// they need within the call.
#[async_trait]
pub trait HomeStore: Send + Sync {
    /// Round-trip a trivial statement to prove the store is reachable
    async fn ping(&self) -> Result<(), DatabaseError>;

    /// Create the legacy `Users` table if it does not exist
    async fn ensure_legacy_schema(&self) -> Result<(), DatabaseError>;

    /// Drop and recreate `Home` and `Homeowner`, discarding all their rows
    async fn reset_schema(&self) -> Result<(), DatabaseError>;

    async fn list_users(&self) -> Result<Vec<LegacyUser>, DatabaseError>;

    async fn add_user(&self, user: &LegacyUser) -> Result<(), DatabaseError>;

    async fn list_homeowners(&self) -> Result<Vec<Homeowner>, DatabaseError>;

    async fn get_homeowner(&self, homeowner_id: &str) -> Result<Option<Homeowner>, DatabaseError>;

    async fn add_homeowner(&self, homeowner: &Homeowner) -> Result<(), DatabaseError>;

    async fn list_homes(&self) -> Result<Vec<Home>, DatabaseError>;

    async fn list_homes_for_owner(&self, homeowner_id: &str) -> Result<Vec<Home>, DatabaseError>;

    /// Insert a home and return its assigned id. When `home.is_default` is
    /// set, the owner's existing defaults are cleared first so at most one
    /// default remains.
    async fn add_home(&self, home: &NewHome) -> Result<u64, DatabaseError>;

    async fn default_home(&self, homeowner_id: &str) -> Result<Option<DefaultHome>, DatabaseError>;
}
