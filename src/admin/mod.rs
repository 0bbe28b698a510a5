/**
 * Admin Handlers
 *
 * Account block/unblock, the only way out of the LOCKED state. There is
 * no time-based auto-unlock; lockout is one-way at the auth layer and
 * cleared exclusively here.
 *
 * # Routes (ADMIN only, enforced by the route authorizer)
 *
 * - `GET /api/v1/admin/block/{id}` - current lock flag
 * - `PUT /api/v1/admin/block/{id}` - set the flag; body is a bare JSON
 *   boolean, `true` = blocked. Unblocking resets the failed-attempt
 *   counter so the account re-enters the OPEN state cleanly.
 */

use axum::{
    extract::{Path, State},
    response::Json,
};
use sqlx::PgPool;

use crate::employees::db;
use crate::error::ApiError;
use crate::middleware::CurrentUser;

/// `GET /api/v1/admin/block/{id}`
pub async fn get_block(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<Json<bool>, ApiError> {
    let locked = db::locked_flag(&pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Employee with id {} not found", id)))?;
    Ok(Json(locked))
}

/// `PUT /api/v1/admin/block/{id}`
pub async fn set_block(
    State(pool): State<PgPool>,
    admin: CurrentUser,
    Path(id): Path<i64>,
    Json(block): Json<bool>,
) -> Result<Json<bool>, ApiError> {
    let locked = db::set_locked(&pool, id, block)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Employee with id {} not found", id)))?;

    if locked {
        tracing::warn!("Employee {} blocked by {}", id, admin.username);
    } else {
        tracing::info!("Employee {} unblocked by {}", id, admin.username);
    }
    Ok(Json(locked))
}
