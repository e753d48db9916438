use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::common::{AppState, PageQuery, Paginated};
use crate::error::AppResult;
use crate::services::measurements;
use crate::services::measurements::AggregatedResult;

use super::types::{
    AggregationQuery, CreateMeasurementRequest, DailyMeasurementsQuery, MeasurementResponse,
};

/// List measurements, paginated
#[utoipa::path(
    get,
    path = "/api/measurements",
    params(PageQuery),
    responses(
        (status = 200, description = "Measurements retrieved successfully", body = Paginated<MeasurementResponse>),
        (status = 400, description = "Invalid page size"),
    ),
    tag = "measurements"
)]
pub async fn list_measurements(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Paginated<MeasurementResponse>>> {
    let page = measurements::list_measurements(&state.db, query.page, query.size).await?;
    Ok(Json(page.map(MeasurementResponse::from)))
}

/// Get a measurement by id
#[utoipa::path(
    get,
    path = "/api/measurements/{id}",
    params(
        ("id" = i64, Path, description = "Measurement id"),
    ),
    responses(
        (status = 200, description = "Measurement retrieved successfully", body = MeasurementResponse),
        (status = 404, description = "Measurement not found"),
    ),
    tag = "measurements"
)]
pub async fn get_measurement(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MeasurementResponse>> {
    let measurement = measurements::get_measurement(&state.db, id).await?;
    Ok(Json(measurement.into()))
}

/// Record a measurement for a metric and department
#[utoipa::path(
    post,
    path = "/api/measurements",
    request_body = CreateMeasurementRequest,
    responses(
        (status = 201, description = "Measurement created successfully", body = MeasurementResponse),
        (status = 404, description = "Referenced metric or department not found"),
    ),
    tag = "measurements"
)]
pub async fn create_measurement(
    State(state): State<AppState>,
    Json(body): Json<CreateMeasurementRequest>,
) -> AppResult<(StatusCode, Json<MeasurementResponse>)> {
    let measurement = measurements::create_measurement(
        &state.db,
        body.value,
        body.measurement_timestamp,
        body.metric_id,
        body.department_id,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(measurement.into())))
}

/// List today's measurements for a metric and department
#[utoipa::path(
    get,
    path = "/api/measurements/daily",
    params(DailyMeasurementsQuery),
    responses(
        (status = 200, description = "Measurements retrieved successfully", body = Paginated<MeasurementResponse>),
        (status = 404, description = "Metric or department not found"),
    ),
    tag = "measurements"
)]
pub async fn list_daily_measurements(
    State(state): State<AppState>,
    Query(query): Query<DailyMeasurementsQuery>,
) -> AppResult<Json<Paginated<MeasurementResponse>>> {
    let page = measurements::list_daily_measurements(
        &state.db,
        state.config.aggregation_offset(),
        query.page,
        query.size,
        query.metric_id,
        query.department_id,
    )
    .await?;
    Ok(Json(page.map(MeasurementResponse::from)))
}

/// Average, min, and max over one calendar day
#[utoipa::path(
    get,
    path = "/api/measurements/aggregated/daily",
    params(AggregationQuery),
    responses(
        (status = 200, description = "Aggregates retrieved successfully", body = AggregatedResult),
    ),
    tag = "measurements"
)]
pub async fn daily_aggregates(
    State(state): State<AppState>,
    Query(query): Query<AggregationQuery>,
) -> AppResult<Json<AggregatedResult>> {
    let result = measurements::daily_aggregates(
        &state.db,
        state.config.aggregation_offset(),
        query.metric_id,
        query.department_id,
        query.date,
    )
    .await?;
    Ok(Json(result))
}

/// Average, min, and max over the ISO week containing the date
#[utoipa::path(
    get,
    path = "/api/measurements/aggregated/weekly",
    params(AggregationQuery),
    responses(
        (status = 200, description = "Aggregates retrieved successfully", body = AggregatedResult),
    ),
    tag = "measurements"
)]
pub async fn weekly_aggregates(
    State(state): State<AppState>,
    Query(query): Query<AggregationQuery>,
) -> AppResult<Json<AggregatedResult>> {
    let result = measurements::weekly_aggregates(
        &state.db,
        state.config.aggregation_offset(),
        query.metric_id,
        query.department_id,
        query.date,
    )
    .await?;
    Ok(Json(result))
}
