/**
 * Authenticator
 *
 * Core business logic for the authentication system: credential
 * verification, lockout transitions and token issuance. Orchestrates the
 * token codec, the lockout policy and the employees table.
 *
 * # Token kinds per operation
 *
 * - `sign_up` issues an access token for the fresh account
 * - `sign_in` issues a refresh token on a successful password check
 * - `refresh` exchanges a session for a new access token
 *
 * # Lockout
 *
 * Failed sign-ins increment the per-account counter with a single atomic
 * UPDATE; at the threshold the account is locked and stays locked until
 * an admin unblocks it. Every counter/lock write completes before the
 * call returns, so a store failure fails the attempt instead of leaving
 * an unpersisted transition.
 */

use sqlx::PgPool;

use crate::auth::lockout::{self, LockoutState};
use crate::auth::tokens::JwtCodec;
use crate::departments;
use crate::employees::db as employees;
use crate::employees::db::NewEmployee;
use crate::employees::types::EmployeeCreateEdit;
use crate::error::ApiError;

/// Sign-in / refresh payload.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct SignInRequest {
    pub username: String,
    pub password: String,
}

/// Register a new employee account and issue an access token for it.
///
/// Payload validation lives on `EmployeeCreateEdit` and is shared with
/// the employee CRUD endpoints. Username and email must be unique;
/// collisions fail with 409 before any row is written.
pub async fn sign_up(
    pool: &PgPool,
    codec: &JwtCodec,
    request: EmployeeCreateEdit,
) -> Result<String, ApiError> {
    request.validate()?;

    if employees::exists_by_username(pool, &request.username).await? {
        tracing::warn!("Signup rejected, username taken: {}", request.username);
        return Err(ApiError::already_exists(format!(
            "User with username {} already exists",
            request.username
        )));
    }
    if employees::exists_by_email(pool, &request.email).await? {
        tracing::warn!("Signup rejected, email taken: {}", request.email);
        return Err(ApiError::already_exists(format!(
            "User with email {} already exists",
            request.email
        )));
    }

    let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)?;
    let department = departments::db::find_or_create(pool, request.department.name.trim()).await?;

    let id = employees::create(
        pool,
        NewEmployee {
            first_name: request.firstname,
            last_name: request.lastname,
            email: request.email,
            username: request.username.clone(),
            password_hash,
            position: request.position,
            role: request.role,
            salary: request.salary,
            department_id: department.id,
        },
    )
    .await?;

    tracing::info!("Employee {} registered with id {}", request.username, id);
    codec.issue_access(&request.username)
}

/// Verify credentials and issue a refresh token.
///
/// Locked accounts short-circuit before any password comparison. A
/// mismatch drives the lockout policy: the counter is incremented
/// atomically, and the attempt that reaches the threshold locks the
/// account and reports `AccountLocked` instead of `InvalidCredentials`.
pub async fn sign_in(
    pool: &PgPool,
    codec: &JwtCodec,
    request: SignInRequest,
) -> Result<String, ApiError> {
    let employee = employees::find_by_username(pool, &request.username)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Sign-in for unknown user: {}", request.username);
            ApiError::not_found(format!("User {} not found", request.username))
        })?;

    if employee.locked {
        tracing::warn!("Sign-in rejected, account locked: {}", employee.username);
        return Err(ApiError::AccountLocked);
    }

    // bcrypt verification is constant-time with respect to the hash.
    if bcrypt::verify(&request.password, &employee.password_hash)? {
        employees::reset_failed_attempts(pool, &employee.username).await?;
        tracing::info!("User signed in: {}", employee.username);
        return codec.issue_refresh(&employee.username);
    }

    let attempts = employees::record_failed_attempt(pool, &employee.username).await?;
    match lockout::state_after_failure(attempts) {
        LockoutState::Locked => {
            employees::lock_account(pool, &employee.username).await?;
            tracing::warn!(
                "{} account is locked after {} failed attempts",
                employee.username,
                attempts
            );
            Err(ApiError::AccountLocked)
        }
        LockoutState::Open { failed_attempts } => {
            tracing::warn!(
                "Invalid password for {} (attempt {}/{})",
                employee.username,
                failed_attempts,
                lockout::MAX_FAILED_ATTEMPTS
            );
            Err(ApiError::InvalidCredentials)
        }
    }
}

/// Reissue a short-lived access token for an existing session.
///
/// The identity is re-resolved by username only; the submitted password
/// field is not checked here. This mirrors the silent re-issuance
/// contract of `/auth/refresh`: the caller already holds a valid session
/// and is exchanging it for a fresh access token.
pub async fn refresh(
    pool: &PgPool,
    codec: &JwtCodec,
    request: SignInRequest,
) -> Result<String, ApiError> {
    let employee = employees::find_by_username(pool, &request.username)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User {} not found", request.username)))?;

    tracing::info!("Access token reissued for {}", employee.username);
    codec.issue_access(&employee.username)
}
