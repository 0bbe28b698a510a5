/**
 * staffbook - employee directory backend
 *
 * CRUD over employees and departments behind token-based authentication:
 * stateless JWT issuance/verification, per-request identity injection,
 * and an account-lockout state machine driven by consecutive failed
 * sign-ins.
 */

pub mod admin;
pub mod auth;
pub mod departments;
pub mod employees;
pub mod error;
pub mod middleware;
pub mod pagination;
pub mod routes;
pub mod server;
