/**
 * Department Handlers
 *
 * HTTP handlers for `/api/v1/department`. Same shape as the employee
 * handlers; role requirements live in the route authorizer.
 */

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use sqlx::PgPool;

use crate::departments::{db, DepartmentCreateEdit, DepartmentResponse};
use crate::error::ApiError;
use crate::pagination::{Page, PageParams};

/// `GET /api/v1/department/{id}`
pub async fn get_by_id(
    State(pool): State<PgPool>,
    Path(id): Path<i32>,
) -> Result<Json<DepartmentResponse>, ApiError> {
    let department = db::find_by_id(&pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Department with id {} not found", id)))?;
    Ok(Json(department.into()))
}

/// `GET /api/v1/department/all`
pub async fn get_all(
    State(pool): State<PgPool>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<DepartmentResponse>>, ApiError> {
    let rows = db::list(&pool, params.limit(), params.offset()).await?;
    let total = db::count(&pool).await?;
    let content = rows.into_iter().map(DepartmentResponse::from).collect();
    Ok(Json(Page::new(content, params, total)))
}

/// `POST /api/v1/department`
pub async fn create(
    State(pool): State<PgPool>,
    Json(request): Json<DepartmentCreateEdit>,
) -> Result<(StatusCode, Json<DepartmentResponse>), ApiError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(ApiError::validation("Department name is required"));
    }
    if db::exists_by_name(&pool, name).await? {
        return Err(ApiError::already_exists(format!(
            "Department {} already exists",
            name
        )));
    }

    let department = db::create(&pool, name).await?;
    tracing::info!("Department {} created with id {}", department.name, department.id);
    Ok((StatusCode::CREATED, Json(department.into())))
}

/// `PUT /api/v1/department/{id}`
pub async fn update(
    State(pool): State<PgPool>,
    Path(id): Path<i32>,
    Json(request): Json<DepartmentCreateEdit>,
) -> Result<Json<DepartmentResponse>, ApiError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(ApiError::validation("Department name is required"));
    }

    let department = db::update(&pool, id, name)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Department with id {} not found", id)))?;
    Ok(Json(department.into()))
}

/// `DELETE /api/v1/department/{id}`
pub async fn delete(
    State(pool): State<PgPool>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    if db::delete(&pool, id).await? {
        tracing::info!("Department {} deleted", id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(format!(
            "Department with id {} not found",
            id
        )))
    }
}
