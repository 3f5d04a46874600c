pub mod auth;
pub mod response;

pub use auth::{require_api_key, API_KEY_HEADER};
pub use response::{ApiResponse, ApiResult, Message};
