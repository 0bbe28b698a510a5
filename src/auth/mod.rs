/**
 * Authentication
 *
 * Stateless JWT issuance/verification, the account-lockout policy and
 * the authenticator that ties them to the employees table.
 */

pub mod handlers;
pub mod lockout;
pub mod service;
pub mod tokens;

pub use lockout::MAX_FAILED_ATTEMPTS;
pub use tokens::{Claims, JwtCodec};
