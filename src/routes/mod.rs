/**
 * Router Configuration
 *
 * Assembles all routes and the middleware stack. Order matters: the
 * identity filter is the outermost layer so every request (matched or
 * not) gets an identity resolved before the authorizer evaluates the
 * route policy. Handlers below the stack can assume the policy already
 * ran.
 *
 * # Routes
 *
 * ## Auth (public)
 * - `POST /auth/signup`
 * - `POST /auth/signin`
 * - `POST /auth/refresh`
 *
 * ## Employees (authenticated; mutations role-gated)
 * - `GET /api/v1/employee/{id}`
 * - `GET /api/v1/employee/all`
 * - `GET /api/v1/employee/all/employees_projection`
 * - `POST /api/v1/employee`
 * - `PUT /api/v1/employee/{id}`
 * - `DELETE /api/v1/employee/{id}`
 *
 * ## Departments (authenticated; mutations role-gated)
 * - same shape under `/api/v1/department`
 *
 * ## Admin (ADMIN only)
 * - `GET /api/v1/admin/block/{id}`
 * - `PUT /api/v1/admin/block/{id}`
 */

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::server::state::AppState;
use crate::{admin, auth, departments, employees};

/// Create the Axum router with all routes and middleware configured.
pub fn create_router(state: AppState) -> Router<()> {
    Router::new()
        // Authentication endpoints
        .route("/auth/signup", post(auth::handlers::signup))
        .route("/auth/signin", post(auth::handlers::signin))
        .route("/auth/refresh", post(auth::handlers::refresh))
        // Employee endpoints
        .route("/api/v1/employee", post(employees::handlers::create))
        .route("/api/v1/employee/all", get(employees::handlers::get_all))
        .route(
            "/api/v1/employee/all/employees_projection",
            get(employees::handlers::get_all_projections),
        )
        .route(
            "/api/v1/employee/{id}",
            get(employees::handlers::get_by_id)
                .put(employees::handlers::update)
                .delete(employees::handlers::delete),
        )
        // Department endpoints
        .route("/api/v1/department", post(departments::handlers::create))
        .route("/api/v1/department/all", get(departments::handlers::get_all))
        .route(
            "/api/v1/department/{id}",
            get(departments::handlers::get_by_id)
                .put(departments::handlers::update)
                .delete(departments::handlers::delete),
        )
        // Admin endpoints
        .route(
            "/api/v1/admin/block/{id}",
            get(admin::get_block).put(admin::set_block),
        )
        // Authorization consults the identity bound by the filter, so
        // the filter layer is added last (outermost, runs first).
        .layer(middleware::from_fn(crate::middleware::authorize))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::identity_filter,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
