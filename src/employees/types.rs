/**
 * Employee Types
 *
 * Row types and request/response DTOs for the employee directory. The
 * employee row doubles as the account record: it carries the credential
 * fields (username, password hash, role, lock state, failed-attempt
 * counter) consumed by the auth layer. Response DTOs never expose any of
 * those fields.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::departments::DepartmentResponse;
use crate::error::ApiError;

/// Coarse permission label resolved from the employee record.
///
/// Stored as text in the database; never trusted from a token payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Moderator,
    User,
}

/// Error for unrecognized role strings coming out of the database.
#[derive(Debug, Error)]
#[error("unknown role: {0}")]
pub struct RoleParseError(String);

impl Role {
    /// Database / wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Moderator => "MODERATOR",
            Role::User => "USER",
        }
    }
}

impl TryFrom<String> for Role {
    type Error = RoleParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "ADMIN" => Ok(Role::Admin),
            "MODERATOR" => Ok(Role::Moderator),
            "USER" => Ok(Role::User),
            other => Err(RoleParseError(other.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full employee row, including the account fields.
///
/// Only the auth layer and the admin endpoints read the credential
/// columns; everything else goes through the response DTOs.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Employee {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub position: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub salary: f64,
    pub department_id: i32,
    pub locked: bool,
    pub failed_attempts: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Employee joined with its department, for responses.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EmployeeDetail {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    pub salary: f64,
    pub department_id: i32,
    pub department_name: String,
}

/// Lightweight listing row: full name plus department.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct EmployeeProjection {
    pub full_name: String,
    pub position: String,
    pub department: String,
}

/// Department payload nested in employee create/edit requests.
#[derive(Debug, Clone, Deserialize)]
pub struct DepartmentInput {
    pub name: String,
}

/// Create/edit payload for an employee, also used by signup.
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeCreateEdit {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub password: String,
    pub username: String,
    pub position: String,
    pub role: Role,
    pub salary: f64,
    pub department: DepartmentInput,
}

/// Validate username format: 3-30 chars, letters/digits/underscore,
/// starting with a letter.
fn is_valid_username(username: &str) -> bool {
    if username.len() < 3 || username.len() > 30 {
        return false;
    }

    let mut chars = username.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl EmployeeCreateEdit {
    /// Payload validation shared by signup and the employee CRUD
    /// endpoints. Every path that provisions or rewrites an account
    /// enforces the same rules, so a weak password can't slip in
    /// through `POST /api/v1/employee` when `/auth/signup` would have
    /// rejected it.
    pub fn validate(&self) -> Result<(), ApiError> {
        if !is_valid_username(&self.username) {
            return Err(ApiError::validation(
                "Username must be 3-30 chars, start with a letter, and contain only letters, numbers, and underscores",
            ));
        }
        if !self.email.contains('@') {
            return Err(ApiError::validation("Invalid email format"));
        }
        if self.password.len() < 8 {
            return Err(ApiError::validation("Password must be at least 8 characters"));
        }
        if self.firstname.is_empty() || self.lastname.is_empty() {
            return Err(ApiError::validation("First and last name are required"));
        }
        if self.department.name.trim().is_empty() {
            return Err(ApiError::validation("Department name is required"));
        }
        Ok(())
    }
}

/// Employee representation returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeResponse {
    pub id: i64,
    pub firstname: String,
    pub lastname: String,
    pub position: String,
    pub salary: f64,
    pub department: DepartmentResponse,
}

impl From<EmployeeDetail> for EmployeeResponse {
    fn from(detail: EmployeeDetail) -> Self {
        Self {
            id: detail.id,
            firstname: detail.first_name,
            lastname: detail.last_name,
            position: detail.position,
            salary: detail.salary,
            department: DepartmentResponse {
                id: detail.department_id,
                name: detail.department_name,
            },
        }
    }
}
