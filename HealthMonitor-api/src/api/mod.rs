pub mod handlers;
pub mod routes;
pub mod state;

use axum::Router;

use crate::config::ServerConfig;
use state::AppState;

/// Create the application router serving documents below the configured data root
pub fn create_application(config: &ServerConfig) -> Router {
    routes::create_app(AppState::from_config(config), &config.cors_origins)
}
