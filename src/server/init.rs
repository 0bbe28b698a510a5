/**
 * Server Initialization
 *
 * Connects the database pool, runs the embedded migrations and builds
 * the router. Unlike a best-effort cache, the credential store is load
 * bearing for lockout persistence, so any failure here aborts startup
 * instead of degrading.
 */

use axum::Router;
use chrono::Duration;
use sqlx::postgres::PgPoolOptions;

use crate::auth::tokens::JwtCodec;
use crate::routes::create_router;
use crate::server::config::ServerConfig;
use crate::server::state::AppState;

pub async fn create_app(config: &ServerConfig) -> Result<Router, Box<dyn std::error::Error>> {
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(&pool).await?;

    let tokens = JwtCodec::new(
        &config.jwt_secret,
        Duration::seconds(config.access_ttl_secs),
        Duration::seconds(config.refresh_ttl_secs),
    );

    Ok(create_router(AppState { db: pool, tokens }))
}
