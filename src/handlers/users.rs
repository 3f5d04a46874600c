use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::Value;

use crate::app::AppState;
use crate::database::models::LegacyUser;
use crate::handlers::input;
use crate::middleware::{ApiResponse, ApiResult, Message};

/// GET / - list every row of the legacy Users table
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Vec<LegacyUser>> {
    let users = state.store.list_users().await?;
    Ok(ApiResponse::success(users))
}

/// POST /add_user - insert a legacy user; `id` and `name` are required
pub async fn add_user(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Message> {
    let body = input::object_body(payload)?;
    let user = LegacyUser {
        id: input::required_int(&body, "id")?,
        name: input::required_text(&body, "name")?,
    };

    state.store.add_user(&user).await?;
    tracing::info!(id = user.id, "legacy user added");

    Ok(ApiResponse::created(Message::new("User added successfully")))
}
