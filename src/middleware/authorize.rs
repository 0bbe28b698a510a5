//! Route Authorization
//!
//! A declarative mapping from (method, path) to the authority a request
//! needs, evaluated against the `CurrentUser` bound by the identity
//! filter. Keeping the whole policy in one table means the access rules
//! for the API can be read top to bottom instead of being scattered over
//! the handlers.
//!
//! # Policy
//!
//! - `/auth/**` - public
//! - `/api/v1/admin/**` - ADMIN only
//! - `/api/v1/employee/**`, `/api/v1/department/**`:
//!   - GET - any authenticated user
//!   - POST, PUT - ADMIN or MODERATOR
//!   - DELETE - ADMIN
//! - everything else - any authenticated user
//!
//! A missing identity on a non-public route yields 401; an identity with
//! the wrong role yields 403.

use axum::{extract::Request, http::Method, middleware::Next, response::Response};

use crate::employees::types::Role;
use crate::error::ApiError;
use crate::middleware::identity::CurrentUser;

/// Authority a route requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// No identity needed
    Public,
    /// Any authenticated identity
    Authenticated,
    /// One of the listed roles
    AnyOf(&'static [Role]),
}

const ADMIN_ONLY: Access = Access::AnyOf(&[Role::Admin]);
const ADMIN_OR_MODERATOR: Access = Access::AnyOf(&[Role::Admin, Role::Moderator]);

/// Authority required for a request. Unknown paths default to
/// authenticated, matching a deny-by-default posture for anything that
/// is not explicitly public.
pub fn required_access(method: &Method, path: &str) -> Access {
    if path == "/auth" || path.starts_with("/auth/") {
        return Access::Public;
    }
    if path.starts_with("/api/v1/admin") {
        return ADMIN_ONLY;
    }
    if path.starts_with("/api/v1/employee") || path.starts_with("/api/v1/department") {
        return match *method {
            Method::POST | Method::PUT => ADMIN_OR_MODERATOR,
            Method::DELETE => ADMIN_ONLY,
            _ => Access::Authenticated,
        };
    }
    Access::Authenticated
}

/// Evaluate an access requirement against the request identity.
pub fn evaluate(access: Access, user: Option<&CurrentUser>) -> Result<(), ApiError> {
    match access {
        Access::Public => Ok(()),
        Access::Authenticated => user.map(|_| ()).ok_or(ApiError::Unauthenticated),
        Access::AnyOf(roles) => match user {
            None => Err(ApiError::Unauthenticated),
            Some(user) if roles.contains(&user.role) => Ok(()),
            Some(user) => {
                tracing::warn!(
                    "{} ({}) denied access requiring one of {:?}",
                    user.username,
                    user.role,
                    roles
                );
                Err(ApiError::Forbidden)
            }
        },
    }
}

/// Authorization middleware. Runs after the identity filter and consults
/// only the `CurrentUser` extension, never the raw token.
pub async fn authorize(request: Request, next: Next) -> Result<Response, ApiError> {
    let access = required_access(request.method(), request.uri().path());
    let user = request.extensions().get::<CurrentUser>();
    evaluate(access, user)?;
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    fn user(role: Role) -> CurrentUser {
        CurrentUser {
            id: 1,
            username: "ada".into(),
            role,
        }
    }

    #[test]
    fn test_auth_routes_are_public() {
        assert_eq!(required_access(&Method::POST, "/auth/signin"), Access::Public);
        assert_eq!(required_access(&Method::POST, "/auth/signup"), Access::Public);
        assert_eq!(required_access(&Method::POST, "/auth/refresh"), Access::Public);
    }

    #[test]
    fn test_admin_routes_require_admin() {
        assert_eq!(
            required_access(&Method::GET, "/api/v1/admin/block/3"),
            ADMIN_ONLY
        );
        assert_eq!(
            required_access(&Method::PUT, "/api/v1/admin/block/3"),
            ADMIN_ONLY
        );
    }

    #[test]
    fn test_mutations_require_elevated_roles() {
        assert_eq!(
            required_access(&Method::POST, "/api/v1/employee"),
            ADMIN_OR_MODERATOR
        );
        assert_eq!(
            required_access(&Method::PUT, "/api/v1/department/2"),
            ADMIN_OR_MODERATOR
        );
        assert_eq!(
            required_access(&Method::DELETE, "/api/v1/employee/2"),
            ADMIN_ONLY
        );
    }

    #[test]
    fn test_reads_require_any_authenticated_user() {
        assert_eq!(
            required_access(&Method::GET, "/api/v1/employee/all"),
            Access::Authenticated
        );
        assert_eq!(
            required_access(&Method::GET, "/api/v1/department/1"),
            Access::Authenticated
        );
    }

    #[test]
    fn test_unknown_paths_default_to_authenticated() {
        assert_eq!(required_access(&Method::GET, "/metrics"), Access::Authenticated);
    }

    #[test]
    fn test_evaluate_public_allows_anonymous() {
        assert!(evaluate(Access::Public, None).is_ok());
    }

    #[test]
    fn test_evaluate_missing_identity_is_unauthenticated() {
        assert_matches!(
            evaluate(Access::Authenticated, None),
            Err(ApiError::Unauthenticated)
        );
        assert_matches!(evaluate(ADMIN_ONLY, None), Err(ApiError::Unauthenticated));
    }

    #[test]
    fn test_evaluate_wrong_role_is_forbidden() {
        assert_matches!(
            evaluate(ADMIN_ONLY, Some(&user(Role::User))),
            Err(ApiError::Forbidden)
        );
        assert_matches!(
            evaluate(ADMIN_OR_MODERATOR, Some(&user(Role::User))),
            Err(ApiError::Forbidden)
        );
    }

    #[test]
    fn test_evaluate_matching_role_is_allowed() {
        assert!(evaluate(ADMIN_ONLY, Some(&user(Role::Admin))).is_ok());
        assert!(evaluate(ADMIN_OR_MODERATOR, Some(&user(Role::Moderator))).is_ok());
        assert!(evaluate(Access::Authenticated, Some(&user(Role::User))).is_ok());
    }
}
