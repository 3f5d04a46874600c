use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Row of the `Home` table as returned by the list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Home {
    pub home_id: i32,
    pub homeowner_id: String,
    pub home_name: String,
    pub house_age: Option<i32>,
    pub house_use: Option<String>,
    pub renovations: Option<String>,
    pub construction_type: Option<String>,
    pub floor_count: Option<i32>,
    pub lot_area: Option<f64>,
    pub floor_area: Option<f64>,
    pub selected_materials: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
}

/// Validated input for a home insert. `home_id` and `created_at` are
/// assigned by the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewHome {
    pub homeowner_id: String,
    pub home_name: String,
    pub house_age: Option<i32>,
    pub house_use: Option<String>,
    pub renovations: Option<String>,
    pub construction_type: Option<String>,
    pub floor_count: Option<i32>,
    pub lot_area: Option<f64>,
    pub floor_area: Option<f64>,
    pub selected_materials: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_default: bool,
}

/// Name and coordinates of an owner's default home
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DefaultHome {
    pub home_name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}
