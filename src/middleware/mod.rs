/**
 * Middleware
 *
 * Request identity injection and declarative route authorization. The
 * identity filter runs first and binds a `CurrentUser` when a valid
 * token resolves to an unlocked account; the authorizer then evaluates
 * the route policy against that binding.
 */

pub mod authorize;
pub mod identity;

pub use authorize::authorize;
pub use identity::{identity_filter, CurrentUser};
