use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::common::{AppState, PageQuery, Paginated};
use crate::error::AppResult;
use crate::services::departments;

use super::types::{DepartmentRequest, DepartmentResponse};

/// List departments, paginated
#[utoipa::path(
    get,
    path = "/api/departments",
    params(PageQuery),
    responses(
        (status = 200, description = "Departments retrieved successfully", body = Paginated<DepartmentResponse>),
        (status = 400, description = "Invalid page size"),
    ),
    tag = "departments"
)]
pub async fn list_departments(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Paginated<DepartmentResponse>>> {
    let page = departments::list_departments(&state.db, query.page, query.size).await?;
    Ok(Json(page.map(DepartmentResponse::from)))
}

/// Get a department by id
#[utoipa::path(
    get,
    path = "/api/departments/{id}",
    params(
        ("id" = i64, Path, description = "Department id"),
    ),
    responses(
        (status = 200, description = "Department retrieved successfully", body = DepartmentResponse),
        (status = 404, description = "Department not found"),
    ),
    tag = "departments"
)]
pub async fn get_department(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<DepartmentResponse>> {
    let department = departments::get_department(&state.db, id).await?;
    Ok(Json(department.into()))
}

/// Create a department
#[utoipa::path(
    post,
    path = "/api/departments",
    request_body = DepartmentRequest,
    responses(
        (status = 201, description = "Department created successfully", body = DepartmentResponse),
        (status = 400, description = "Blank name"),
    ),
    tag = "departments"
)]
pub async fn create_department(
    State(state): State<AppState>,
    Json(body): Json<DepartmentRequest>,
) -> AppResult<(StatusCode, Json<DepartmentResponse>)> {
    let department = departments::create_department(&state.db, &body.name).await?;
    Ok((StatusCode::CREATED, Json(department.into())))
}

/// Rename a department
#[utoipa::path(
    put,
    path = "/api/departments/{id}",
    params(
        ("id" = i64, Path, description = "Department id"),
    ),
    request_body = DepartmentRequest,
    responses(
        (status = 200, description = "Department updated successfully", body = DepartmentResponse),
        (status = 404, description = "Department not found"),
    ),
    tag = "departments"
)]
pub async fn update_department(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<DepartmentRequest>,
) -> AppResult<Json<DepartmentResponse>> {
    let department = departments::update_department(&state.db, id, &body.name).await?;
    Ok(Json(department.into()))
}

/// Delete a department and its measurements
#[utoipa::path(
    delete,
    path = "/api/departments/{id}",
    params(
        ("id" = i64, Path, description = "Department id"),
    ),
    responses(
        (status = 200, description = "Department deleted successfully"),
        (status = 404, description = "Department not found"),
    ),
    tag = "departments"
)]
pub async fn delete_department(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    departments::delete_department(&state.db, id).await?;
    Ok(StatusCode::OK)
}
