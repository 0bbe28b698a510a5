/**
 * Employees
 *
 * Employee directory CRUD plus the account columns the auth layer
 * depends on (username, password hash, role, lock state, failed-attempt
 * counter). Mutation of the lock fields happens only through the
 * authenticator and the admin block endpoints.
 */

pub mod db;
pub mod handlers;
pub mod types;

pub use types::{Employee, EmployeeResponse, Role};
