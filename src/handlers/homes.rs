use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::database::models::{DefaultHome, Home, NewHome};
use crate::error::ApiError;
use crate::handlers::input::{self, Body};
use crate::middleware::{ApiResponse, ApiResult};

/// GET /homes
pub async fn list_homes(State(state): State<AppState>) -> ApiResult<Vec<Home>> {
    let homes = state.store.list_homes().await?;
    Ok(ApiResponse::success(homes))
}

/// GET /homes/:homeowner_id
pub async fn list_homes_for_owner(
    State(state): State<AppState>,
    Path(homeowner_id): Path<String>,
) -> ApiResult<Vec<Home>> {
    let homes = state.store.list_homes_for_owner(&homeowner_id).await?;
    Ok(ApiResponse::success(homes))
}

/// POST /homes
///
/// Expected Input:
/// ```json
/// {
///   "homeowner_id": "string",      // Required
///   "homeName": "string",          // Required
///   "houseAge": 12,                // Optional, int or numeric text
///   "houseUse": "string",
///   "renovations": "string",
///   "constructionType": "string",
///   "floorCount": 2,
///   "lotArea": 450.5,
///   "floorArea": 180.0,
///   "selectedMaterials": ["brick", "slate"],
///   "latitude": 45.52,
///   "longitude": -122.68,
///   "is_default": true
/// }
/// ```
pub async fn add_home(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    let body = input::object_body(payload)?;
    let home = new_home_from(&body)?;

    let home_id = state.store.add_home(&home).await?;
    tracing::info!(
        home_id,
        homeowner_id = %home.homeowner_id,
        is_default = home.is_default,
        "home added"
    );

    Ok(ApiResponse::success(json!({
        "message": "Home added successfully",
        "home_id": home_id,
    })))
}

/// GET /homeowners/:homeowner_id/default_home
pub async fn default_home(
    State(state): State<AppState>,
    Path(homeowner_id): Path<String>,
) -> ApiResult<DefaultHome> {
    match state.store.default_home(&homeowner_id).await? {
        Some(home) => Ok(ApiResponse::success(home)),
        None => Err(ApiError::not_found(format!(
            "No default home found for homeowner {}",
            homeowner_id
        ))),
    }
}

fn new_home_from(body: &Body) -> Result<NewHome, ApiError> {
    Ok(NewHome {
        homeowner_id: input::required_text(body, "homeowner_id")?,
        home_name: input::required_text(body, "homeName")?,
        house_age: input::optional_int(body, "houseAge")?,
        house_use: input::optional_text(body, "houseUse")?,
        renovations: input::optional_text(body, "renovations")?,
        construction_type: input::optional_text(body, "constructionType")?,
        floor_count: input::optional_int(body, "floorCount")?,
        lot_area: input::optional_float(body, "lotArea")?,
        floor_area: input::optional_float(body, "floorArea")?,
        selected_materials: input::text_list(body, "selectedMaterials")?,
        latitude: input::optional_float(body, "latitude")?,
        longitude: input::optional_float(body, "longitude")?,
        is_default: input::flag(body, "is_default")?,
    })
}
