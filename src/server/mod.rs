/**
 * Server
 *
 * Configuration, shared state and startup wiring.
 */

pub mod config;
pub mod init;
pub mod state;

pub use config::ServerConfig;
pub use state::AppState;
