use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Row of the legacy `Users` table. Not connected to homeowners or homes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct LegacyUser {
    pub id: i32,
    pub name: String,
}
