//! Service-level tests for the sign-in orchestration: lockout
//! transitions, counter reset, the refresh contract, and the projection
//! listing end to end.
//!
//! These run against a real Postgres database (`#[sqlx::test]` provisions
//! an isolated one per test and applies the migrations), so they are
//! ignored by default. Run them with a server available:
//!
//! ```sh
//! DATABASE_URL=postgres://... cargo test --test authentication -- --ignored
//! ```

use assert_matches::assert_matches;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use chrono::Duration;
use sqlx::PgPool;
use tower::ServiceExt;

use staffbook::auth::lockout::MAX_FAILED_ATTEMPTS;
use staffbook::auth::service::{self, SignInRequest};
use staffbook::auth::tokens::JwtCodec;
use staffbook::employees::db;
use staffbook::employees::types::{DepartmentInput, EmployeeCreateEdit, Role};
use staffbook::error::ApiError;
use staffbook::routes::create_router;
use staffbook::server::state::AppState;

const PASSWORD: &str = "correct-horse-battery";

fn codec() -> JwtCodec {
    JwtCodec::new("integration-test-secret", Duration::hours(10), Duration::hours(24))
}

fn signup_request(username: &str) -> EmployeeCreateEdit {
    EmployeeCreateEdit {
        firstname: "Ada".into(),
        lastname: "Lovelace".into(),
        email: format!("{}@example.com", username),
        password: PASSWORD.into(),
        username: username.into(),
        position: "Engineer".into(),
        role: Role::User,
        salary: 120_000.0,
        department: DepartmentInput {
            name: "Engineering".into(),
        },
    }
}

/// Register an account through the signup path so the row exists with a
/// properly bcrypt-hashed password.
async fn seed(pool: &PgPool, codec: &JwtCodec, username: &str) {
    service::sign_up(pool, codec, signup_request(username))
        .await
        .expect("signup should succeed");
}

fn sign_in_request(username: &str, password: &str) -> SignInRequest {
    SignInRequest {
        username: username.into(),
        password: password.into(),
    }
}

#[sqlx::test]
#[ignore = "requires a Postgres server via DATABASE_URL"]
async fn fifth_wrong_password_locks_the_account(pool: PgPool) {
    let codec = codec();
    seed(&pool, &codec, "mallory").await;

    // Attempts 1 through 4 are plain credential failures.
    for attempt in 1..MAX_FAILED_ATTEMPTS {
        let result = service::sign_in(&pool, &codec, sign_in_request("mallory", "wrong")).await;
        assert_matches!(result, Err(ApiError::InvalidCredentials), "attempt {}", attempt);
    }

    // The attempt that reaches the threshold reports the lock, not the
    // bad password.
    let result = service::sign_in(&pool, &codec, sign_in_request("mallory", "wrong")).await;
    assert_matches!(result, Err(ApiError::AccountLocked));

    let row = db::find_by_username(&pool, "mallory").await.unwrap().unwrap();
    assert!(row.locked);
    assert_eq!(row.failed_attempts, MAX_FAILED_ATTEMPTS);

    // Once locked, even the correct password is refused.
    let result = service::sign_in(&pool, &codec, sign_in_request("mallory", PASSWORD)).await;
    assert_matches!(result, Err(ApiError::AccountLocked));
}

#[sqlx::test]
#[ignore = "requires a Postgres server via DATABASE_URL"]
async fn locked_account_short_circuits_before_password_check(pool: PgPool) {
    let codec = codec();
    seed(&pool, &codec, "trent").await;

    let row = db::find_by_username(&pool, "trent").await.unwrap().unwrap();
    db::set_locked(&pool, row.id, true).await.unwrap();

    let result = service::sign_in(&pool, &codec, sign_in_request("trent", PASSWORD)).await;
    assert_matches!(result, Err(ApiError::AccountLocked));

    // The refused attempt must not have touched the counter.
    let row = db::find_by_username(&pool, "trent").await.unwrap().unwrap();
    assert_eq!(row.failed_attempts, 0);
}

#[sqlx::test]
#[ignore = "requires a Postgres server via DATABASE_URL"]
async fn successful_sign_in_resets_the_counter(pool: PgPool) {
    let codec = codec();
    seed(&pool, &codec, "alice").await;

    for _ in 0..3 {
        let result = service::sign_in(&pool, &codec, sign_in_request("alice", "wrong")).await;
        assert_matches!(result, Err(ApiError::InvalidCredentials));
    }

    let token = service::sign_in(&pool, &codec, sign_in_request("alice", PASSWORD))
        .await
        .expect("correct password below the threshold signs in");
    assert_eq!(codec.verify(&token).unwrap().sub, "alice");

    let row = db::find_by_username(&pool, "alice").await.unwrap().unwrap();
    assert_eq!(row.failed_attempts, 0);
    assert!(!row.locked);
}

#[sqlx::test]
#[ignore = "requires a Postgres server via DATABASE_URL"]
async fn admin_unblock_reopens_the_account(pool: PgPool) {
    let codec = codec();
    seed(&pool, &codec, "carol").await;

    for _ in 0..MAX_FAILED_ATTEMPTS {
        let _ = service::sign_in(&pool, &codec, sign_in_request("carol", "wrong")).await;
    }
    let row = db::find_by_username(&pool, "carol").await.unwrap().unwrap();
    assert!(row.locked);

    // Unblocking clears both the flag and the counter.
    let locked = db::set_locked(&pool, row.id, false).await.unwrap();
    assert_eq!(locked, Some(false));

    let token = service::sign_in(&pool, &codec, sign_in_request("carol", PASSWORD))
        .await
        .expect("unblocked account signs in again");
    assert_eq!(codec.verify(&token).unwrap().sub, "carol");
}

#[sqlx::test]
#[ignore = "requires a Postgres server via DATABASE_URL"]
async fn refresh_reissues_without_checking_password(pool: PgPool) {
    let codec = codec();
    seed(&pool, &codec, "bob").await;

    // The submitted password plays no part in re-issuance; the identity
    // is re-resolved by username alone.
    let token = service::refresh(&pool, &codec, sign_in_request("bob", "anything-at-all"))
        .await
        .expect("refresh reissues from the username alone");
    assert_eq!(codec.verify(&token).unwrap().sub, "bob");
}

#[sqlx::test]
#[ignore = "requires a Postgres server via DATABASE_URL"]
async fn refresh_for_unknown_user_is_not_found(pool: PgPool) {
    let codec = codec();
    let result = service::refresh(&pool, &codec, sign_in_request("nobody", "irrelevant")).await;
    assert_matches!(result, Err(ApiError::NotFound(_)));
}

#[sqlx::test]
#[ignore = "requires a Postgres server via DATABASE_URL"]
async fn sign_in_unknown_user_is_not_found(pool: PgPool) {
    let codec = codec();
    let result = service::sign_in(&pool, &codec, sign_in_request("nobody", PASSWORD)).await;
    assert_matches!(result, Err(ApiError::NotFound(_)));
}

#[sqlx::test]
#[ignore = "requires a Postgres server via DATABASE_URL"]
async fn projection_listing_serves_authenticated_requests(pool: PgPool) {
    let codec = codec();
    let token = service::sign_up(&pool, &codec, signup_request("dave"))
        .await
        .expect("signup should succeed");

    let app = create_router(AppState {
        db: pool,
        tokens: codec,
    });
    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/v1/employee/all/employees_projection")
        .header("Authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let rows: Vec<serde_json::Value> = serde_json::from_slice(&body).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["full_name"], "Ada Lovelace");
    assert_eq!(rows[0]["department"], "Engineering");
}
