/**
 * Application State
 *
 * Central state container shared by all handlers: the Postgres pool and
 * the token codec. Both are cheap to clone (the pool is an Arc
 * internally, the codec holds key material built once at startup) and
 * safe to share across concurrent requests. There is no other shared
 * mutable state; everything cross-request lives in the database.
 *
 * The `FromRef` impls let handlers extract just the piece they need
 * (`State<PgPool>` in the CRUD handlers) without taking the whole state.
 */

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::auth::tokens::JwtCodec;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub tokens: JwtCodec,
}

impl FromRef<AppState> for PgPool {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for JwtCodec {
    fn from_ref(state: &AppState) -> Self {
        state.tokens.clone()
    }
}
