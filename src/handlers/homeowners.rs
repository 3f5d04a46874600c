use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::database::models::Homeowner;
use crate::handlers::input;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /homeowners
pub async fn list_homeowners(State(state): State<AppState>) -> ApiResult<Vec<Homeowner>> {
    let homeowners = state.store.list_homeowners().await?;
    Ok(ApiResponse::success(homeowners))
}

/// GET /homeowners/:homeowner_id - the homeowner, or `null` when unknown
pub async fn get_homeowner(
    State(state): State<AppState>,
    Path(homeowner_id): Path<String>,
) -> ApiResult<Option<Homeowner>> {
    let homeowner = state.store.get_homeowner(&homeowner_id).await?;
    Ok(ApiResponse::success(homeowner))
}

/// POST /homeowners - register a caller-identified homeowner
pub async fn add_homeowner(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    let body = input::object_body(payload)?;
    let homeowner = Homeowner {
        homeowner_id: input::required_text(&body, "homeowner_id")?,
    };

    state.store.add_homeowner(&homeowner).await?;
    tracing::info!(homeowner_id = %homeowner.homeowner_id, "homeowner added");

    Ok(ApiResponse::success(json!({ "homeowner_id": homeowner.homeowner_id })))
}
