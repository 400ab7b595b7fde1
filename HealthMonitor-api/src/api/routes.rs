use axum::{http::HeaderValue, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use crate::api::handlers::{blood_pressure, health, metadata, sleep};
use crate::api::state::AppState;
use crate::openapi::configure_swagger_routes;

/// Create the application router
pub fn create_app(state: AppState, cors_origins: &[String]) -> Router {
    debug!("Creating application router");

    let api_routes = Router::new()
        .route("/metadata", get(metadata::get_metadata))
        .route("/blood-pressure", get(blood_pressure::get_readings))
        .route("/blood-pressure/raw-data", get(blood_pressure::get_raw_data))
        .route("/blood-pressure/timeseries", get(blood_pressure::get_timeseries))
        .route("/blood-pressure/classifications", get(blood_pressure::get_classifications))
        .route("/blood-pressure/notification", get(blood_pressure::get_notification))
        .route("/blood-pressure/plot-data", get(blood_pressure::get_plot_data))
        .route("/blood-pressure/plot", get(blood_pressure::get_plot))
        .route("/sleep-stages", get(sleep::get_stages))
        .route("/sleep-stages/raw-data", get(sleep::get_raw_data))
        .route("/sleep-stages/timeseries", get(sleep::get_timeseries))
        .route("/sleep-stages/metrics", get(sleep::get_metrics));

    debug!("API routes configured");

    let app = Router::new()
        .route("/", get(metadata::root))
        .route("/health", get(health::health_check))
        .nest("/api/v1", api_routes)
        .with_state(state);

    // Initialize health check service startup time
    health::initialize_server_start_time();

    add_swagger_ui(app)
        .layer(build_cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}

/// Build the CORS middleware layer. `*` allows any origin.
pub fn build_cors_layer(cors_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if cors_origins.is_empty() || cors_origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = cors_origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring invalid CORS origin '{}': {}", o, e);
                None
            }
        })
        .collect();

    layer.allow_origin(origins)
}

/// Add Swagger UI to the router
pub fn add_swagger_ui(app: Router) -> Router {
    app.merge(configure_swagger_routes())
}
