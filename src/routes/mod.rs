pub mod departments;
pub mod health;
pub mod measurements;
pub mod metrics;
mod rate_limit;

use axum::{
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};

use rate_limit::FallbackIpKeyExtractor;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::common::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthz,
        departments::list_departments,
        departments::get_department,
        departments::create_department,
        departments::update_department,
        departments::delete_department,
        metrics::list_metrics,
        metrics::get_metric,
        metrics::create_metric,
        metrics::update_metric,
        metrics::delete_metric,
        measurements::list_measurements,
        measurements::get_measurement,
        measurements::create_measurement,
        measurements::list_daily_measurements,
        measurements::daily_aggregates,
        measurements::weekly_aggregates,
    ),
    components(
        schemas(
            departments::DepartmentRequest,
            departments::DepartmentResponse,
            metrics::MetricRequest,
            metrics::MetricResponse,
            measurements::CreateMeasurementRequest,
            measurements::MeasurementResponse,
            crate::services::measurements::AggregatedResult,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "departments", description = "Organizational units"),
        (name = "metrics", description = "Named, unit-bearing measurable quantities"),
        (name = "measurements", description = "Timestamped readings and windowed aggregates"),
    ),
    info(
        title = "Workplace Metrics API",
        description = "CRUD REST API for workplace metrics, departments, and measurements",
        version = "0.1.0"
    )
)]
struct ApiDoc;

pub fn build_router(state: AppState) -> Router {
    let config = &state.config;

    if config.disable_rate_limiting {
        tracing::warn!("Rate limiting DISABLED");
    } else {
        tracing::info!(
            metadata_rate = %format!("{}/s burst {}", config.rate_limit_metadata_per_second, config.rate_limit_metadata_burst),
            data_rate = %format!("{}/s burst {}", config.rate_limit_data_per_second, config.rate_limit_data_burst),
            "Rate limiting configured"
        );
    }

    // Department/metric CRUD is low-volume metadata traffic
    let metadata_routes_base = Router::new()
        .route(
            "/departments",
            get(departments::list_departments).post(departments::create_department),
        )
        .route(
            "/departments/{id}",
            get(departments::get_department)
                .put(departments::update_department)
                .delete(departments::delete_department),
        )
        .route(
            "/metrics",
            get(metrics::list_metrics).post(metrics::create_metric),
        )
        .route(
            "/metrics/{id}",
            get(metrics::get_metric)
                .put(metrics::update_metric)
                .delete(metrics::delete_metric),
        );

    // Measurement ingestion, listing, and aggregation
    let data_routes_base = Router::new()
        .route(
            "/measurements",
            get(measurements::list_measurements).post(measurements::create_measurement),
        )
        .route("/measurements/daily", get(measurements::list_daily_measurements))
        .route(
            "/measurements/aggregated/daily",
            get(measurements::daily_aggregates),
        )
        .route(
            "/measurements/aggregated/weekly",
            get(measurements::weekly_aggregates),
        )
        .route("/measurements/{id}", get(measurements::get_measurement));

    // Combine API routes, conditionally applying rate limiting
    let api_routes = if config.disable_rate_limiting {
        Router::new()
            .merge(metadata_routes_base)
            .merge(data_routes_base)
    } else {
        let metadata_limiter = GovernorConfigBuilder::default()
            .key_extractor(FallbackIpKeyExtractor)
            .per_second(config.rate_limit_metadata_per_second)
            .burst_size(config.rate_limit_metadata_burst)
            .finish()
            .expect("Failed to create metadata rate limiter");

        let data_limiter = GovernorConfigBuilder::default()
            .key_extractor(FallbackIpKeyExtractor)
            .per_second(config.rate_limit_data_per_second)
            .burst_size(config.rate_limit_data_burst)
            .finish()
            .expect("Failed to create data rate limiter");

        Router::new()
            .merge(metadata_routes_base.layer(GovernorLayer {
                config: Arc::new(metadata_limiter),
            }))
            .merge(data_routes_base.layer(GovernorLayer {
                config: Arc::new(data_limiter),
            }))
    }
    .layer(RequestBodyLimitLayer::new(1024 * 1024)); // 1MB body limit

    // Health check routes (NO rate limiting)
    let health_routes = Router::new().route("/healthz", get(health::healthz));

    // OpenAPI documentation
    let docs_routes = Router::new().merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    // Combine all routes
    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .merge(docs_routes)
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
