use axum::extract::State;

use crate::app::AppState;
use crate::database::schema;
use crate::middleware::{ApiResponse, ApiResult, Message};

/// GET /init_db - recreate the schema. Destroys every homeowner and home.
pub async fn init_db(State(state): State<AppState>) -> ApiResult<Message> {
    tracing::warn!("schema reset requested; all homeowner and home data will be discarded");
    schema::initialize(state.store.as_ref()).await?;
    Ok(ApiResponse::success(Message::new("Database initialized successfully")))
}
