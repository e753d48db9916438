use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::common::{AppState, PageQuery, Paginated};
use crate::error::AppResult;
use crate::services::metrics;

use super::types::{MetricRequest, MetricResponse};

/// List metrics, paginated
#[utoipa::path(
    get,
    path = "/api/metrics",
    params(PageQuery),
    responses(
        (status = 200, description = "Metrics retrieved successfully", body = Paginated<MetricResponse>),
        (status = 400, description = "Invalid page size"),
    ),
    tag = "metrics"
)]
pub async fn list_metrics(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Paginated<MetricResponse>>> {
    let page = metrics::list_metrics(&state.db, query.page, query.size).await?;
    Ok(Json(page.map(MetricResponse::from)))
}

/// Get a metric by id
#[utoipa::path(
    get,
    path = "/api/metrics/{id}",
    params(
        ("id" = i64, Path, description = "Metric id"),
    ),
    responses(
        (status = 200, description = "Metric retrieved successfully", body = MetricResponse),
        (status = 404, description = "Metric not found"),
    ),
    tag = "metrics"
)]
pub async fn get_metric(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MetricResponse>> {
    let metric = metrics::get_metric(&state.db, id).await?;
    Ok(Json(metric.into()))
}

/// Create a metric
#[utoipa::path(
    post,
    path = "/api/metrics",
    request_body = MetricRequest,
    responses(
        (status = 201, description = "Metric created successfully", body = MetricResponse),
        (status = 400, description = "Duplicate type or unit"),
    ),
    tag = "metrics"
)]
pub async fn create_metric(
    State(state): State<AppState>,
    Json(body): Json<MetricRequest>,
) -> AppResult<(StatusCode, Json<MetricResponse>)> {
    let metric =
        metrics::create_metric(&state.db, &body.metric_type, &body.measurement_unit).await?;
    Ok((StatusCode::CREATED, Json(metric.into())))
}

/// Update a metric's type and unit
#[utoipa::path(
    put,
    path = "/api/metrics/{id}",
    params(
        ("id" = i64, Path, description = "Metric id"),
    ),
    request_body = MetricRequest,
    responses(
        (status = 200, description = "Metric updated successfully", body = MetricResponse),
        (status = 400, description = "Duplicate type or unit"),
        (status = 404, description = "Metric not found"),
    ),
    tag = "metrics"
)]
pub async fn update_metric(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<MetricRequest>,
) -> AppResult<Json<MetricResponse>> {
    let metric =
        metrics::update_metric(&state.db, id, &body.metric_type, &body.measurement_unit).await?;
    Ok(Json(metric.into()))
}

/// Delete a metric and its measurements
#[utoipa::path(
    delete,
    path = "/api/metrics/{id}",
    params(
        ("id" = i64, Path, description = "Metric id"),
    ),
    responses(
        (status = 200, description = "Metric deleted successfully"),
        (status = 404, description = "Metric not found"),
    ),
    tag = "metrics"
)]
pub async fn delete_metric(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    metrics::delete_metric(&state.db, id).await?;
    Ok(StatusCode::OK)
}
