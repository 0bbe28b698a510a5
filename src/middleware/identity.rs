/**
 * Request Identity Filter
 *
 * Runs once per inbound request, before authorization:
 *
 * 1. No bearer Authorization header - the request passes through
 *    anonymously.
 * 2. A bearer token that fails to decode (malformed or expired) aborts
 *    the request with a 401 error body; a broken token is not the same
 *    as no token.
 * 3. A valid token is re-resolved against the employees table. A locked
 *    account or an unresolvable subject degrades to anonymous: token
 *    validity is necessary but not sufficient, current lock state wins.
 * 4. On success a `CurrentUser` is attached to the request extensions.
 *    Downstream authorization reads only this binding, never the raw
 *    token, so authorities always come from the store.
 *
 * The filter itself never rejects a request for lacking identity; that
 * is the route authorizer's decision.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::employees::db as employees;
use crate::employees::types::Role;
use crate::error::ApiError;
use crate::server::state::AppState;

/// Per-request authenticated identity, resolved from the employee
/// record at verification time and destroyed at request end.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    pub role: Role,
}

/// Extract the bearer token from the Authorization header, if any.
///
/// A missing header, a non-Bearer scheme or a blank token all count as
/// "no token" and lead to anonymous pass-through.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// Identity-injection middleware. Applied to the whole router.
pub async fn identity_filter(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = match bearer_token(request.headers()) {
        Some(token) => token.to_owned(),
        None => return Ok(next.run(request).await),
    };

    // Decode failures abort here with 401; expiry and malformed tokens
    // are reported as distinct errors by the codec.
    let claims = state.tokens.verify(&token)?;

    match employees::find_by_username(&state.db, &claims.sub).await? {
        Some(employee) if !employee.locked => {
            tracing::info!("{} authenticated", employee.username);
            request.extensions_mut().insert(CurrentUser {
                id: employee.id,
                username: employee.username,
                role: employee.role,
            });
        }
        Some(employee) => {
            tracing::warn!(
                "Token subject {} is locked; treating request as anonymous",
                employee.username
            );
        }
        None => {
            tracing::warn!(
                "Token subject {} no longer resolves; treating request as anonymous",
                claims.sub
            );
        }
    }

    Ok(next.run(request).await)
}

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(ApiError::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_extracted() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn test_missing_header_is_anonymous() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_non_bearer_scheme_is_anonymous() {
        let headers = headers_with("Basic dXNlcjpwYXNz");
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn test_blank_token_is_anonymous() {
        let headers = headers_with("Bearer   ");
        assert_eq!(bearer_token(&headers), None);
    }

    #[tokio::test]
    async fn test_current_user_extractor() {
        let mut request = axum::http::Request::builder()
            .uri("http://example.com")
            .body(())
            .unwrap();
        request.extensions_mut().insert(CurrentUser {
            id: 7,
            username: "ada".into(),
            role: Role::Admin,
        });

        let (mut parts, _) = request.into_parts();
        let user = CurrentUser::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(user.username, "ada");
        assert_eq!(user.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_current_user_extractor_missing() {
        let request = axum::http::Request::builder()
            .uri("http://example.com")
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();
        let result = CurrentUser::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(ApiError::Unauthenticated)));
    }
}
