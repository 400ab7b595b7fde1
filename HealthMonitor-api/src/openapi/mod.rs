use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Configure Swagger UI endpoints
pub fn configure_swagger_routes() -> SwaggerUi {
    SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}

// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::api::handlers::health::health_check,
        crate::api::handlers::metadata::root,

        // Metadata endpoints
        crate::api::handlers::metadata::get_metadata,

        // Blood pressure endpoints
        crate::api::handlers::blood_pressure::get_raw_data,
        crate::api::handlers::blood_pressure::get_timeseries,
        crate::api::handlers::blood_pressure::get_readings,
        crate::api::handlers::blood_pressure::get_classifications,
        crate::api::handlers::blood_pressure::get_notification,
        crate::api::handlers::blood_pressure::get_plot_data,
        crate::api::handlers::blood_pressure::get_plot,

        // Sleep endpoints
        crate::api::handlers::sleep::get_raw_data,
        crate::api::handlers::sleep::get_timeseries,
        crate::api::handlers::sleep::get_stages,
        crate::api::handlers::sleep::get_metrics,
    ),
    components(
        schemas(
            // Stored documents
            health_monitor_data::models::Metadata,
            health_monitor_data::models::HealthDomain,
            health_monitor_data::models::BloodPressureData,
            health_monitor_data::models::BloodPressureTimeEntry,
            health_monitor_data::models::BloodPressureDocument,
            health_monitor_data::models::SleepStage,
            health_monitor_data::models::SleepData,
            health_monitor_data::models::SleepTimeEntry,
            health_monitor_data::models::SleepStageDocument,

            // Domain results
            health_monitor_domain::entities::BloodPressureCategory,
            health_monitor_domain::entities::SummaryPolicy,
            health_monitor_domain::entities::PlotSeries,
            health_monitor_domain::entities::LatestReading,
            health_monitor_domain::entities::SleepMetrics,

            // Entities
            crate::entities::blood_pressure::ClassificationResponse,
            crate::entities::common::ErrorResponse,
            crate::entities::common::MessageResponse,

            // Health handlers
            crate::api::handlers::health::HealthResponse,
            crate::api::handlers::health::ComponentStatus,
            crate::api::handlers::health::ComponentHealthStatus,
        )
    ),
    tags(
        (name = "health", description = "Service status endpoints"),
        (name = "metadata", description = "Document metadata"),
        (name = "blood_pressure", description = "Blood pressure readings and classification"),
        (name = "sleep", description = "Sleep stage epochs and metrics")
    ),
    info(
        title = "Health Monitoring API",
        version = "0.1.0",
        description = "Read-only access to daily health metric documents",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        ),
    ),
    servers(
        (url = "/", description = "Local development server")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_doc_generation() {
        let openapi = ApiDoc::openapi();

        assert_eq!(openapi.info.title, "Health Monitoring API");
        assert_eq!(openapi.info.version, "0.1.0");

        let tags = openapi.tags.as_ref().unwrap();
        assert!(tags.iter().any(|tag| tag.name == "blood_pressure"));
        assert!(tags.iter().any(|tag| tag.name == "sleep"));

        for path in [
            "/",
            "/health",
            "/api/v1/metadata",
            "/api/v1/blood-pressure",
            "/api/v1/blood-pressure/raw-data",
            "/api/v1/blood-pressure/timeseries",
            "/api/v1/blood-pressure/classifications",
            "/api/v1/blood-pressure/notification",
            "/api/v1/blood-pressure/plot-data",
            "/api/v1/blood-pressure/plot",
            "/api/v1/sleep-stages",
            "/api/v1/sleep-stages/raw-data",
            "/api/v1/sleep-stages/timeseries",
            "/api/v1/sleep-stages/metrics",
        ] {
            assert!(openapi.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_schemas_include_documents() {
        let openapi = ApiDoc::openapi();
        let schemas = &openapi.components.as_ref().unwrap().schemas;
        assert!(schemas.contains_key("BloodPressureDocument"));
        assert!(schemas.contains_key("ClassificationResponse"));
        assert!(schemas.contains_key("ErrorResponse"));
    }
}
