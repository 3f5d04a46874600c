use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::database::{ConnectionFactory, HomeStore, MySqlStore};
use crate::handlers::{admin, health, homeowners, homes, users};
use crate::middleware::require_api_key;

/// Shared, read-only request context
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn HomeStore>,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn HomeStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }

    /// State backed by MySQL using the configured connection parameters
    pub fn mysql(config: AppConfig) -> Self {
        let store = MySqlStore::new(ConnectionFactory::new(&config.database));
        Self::new(config, Arc::new(store))
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/health", get(health::health))
        // Everything else requires X-API-KEY
        .merge(protected_routes(state.clone()))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Legacy users
        .route("/", get(users::list_users))
        .route("/add_user", post(users::add_user))
        // Administration
        .route("/init_db", get(admin::init_db))
        // Homeowners
        .route(
            "/homeowners",
            get(homeowners::list_homeowners).post(homeowners::add_homeowner),
        )
        .route("/homeowners/:homeowner_id", get(homeowners::get_homeowner))
        .route(
            "/homeowners/:homeowner_id/default_home",
            get(homes::default_home),
        )
        // Homes
        .route("/homes", get(homes::list_homes).post(homes::add_home))
        .route("/homes/:homeowner_id", get(homes::list_homes_for_owner))
        .route_layer(middleware::from_fn_with_state(state, require_api_key))
}
