/**
 * Token Codec
 *
 * This module issues and verifies the signed JWTs that carry request
 * identity. Tokens are stateless: validity is re-derived from the
 * signature and expiry on every use, and the payload carries nothing but
 * the subject and timestamps. Authorities are never embedded in the
 * token; they are re-resolved from the employee record at request time.
 *
 * Two TTL presets share the codec and signing key:
 * - access tokens (short-lived, default 10 hours)
 * - refresh tokens (longer-lived, default 24 hours)
 */

use std::collections::BTreeMap;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the account username
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Any extra claims carried alongside the registered ones
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Stateless JWT issuer/verifier.
///
/// Holds the process-wide symmetric signing key, built once from
/// configuration at startup and shared read-only across all concurrent
/// verifications. Verification enforces expiry with zero leeway so a
/// token past `exp` deterministically fails with `ExpiredToken`.
#[derive(Clone)]
pub struct JwtCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl JwtCodec {
    /// Build a codec from the configured secret and TTL presets.
    pub fn new(secret: &str, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        let mut validation = Validation::default();
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret.as_ref()),
            decoding: DecodingKey::from_secret(secret.as_ref()),
            validation,
            access_ttl,
            refresh_ttl,
        }
    }

    /// Issue a signed token for `subject` with the given TTL.
    ///
    /// The payload embeds `sub`, `iat = now`, `exp = now + ttl` and any
    /// extra claims supplied by the caller.
    pub fn issue(
        &self,
        subject: &str,
        ttl: Duration,
        extra: BTreeMap<String, serde_json::Value>,
    ) -> Result<String, ApiError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: subject.to_string(),
            iat: now,
            exp: now + ttl.num_seconds(),
            extra,
        };

        encode(&Header::default(), &claims, &self.encoding).map_err(ApiError::TokenSigning)
    }

    /// Issue a short-lived access token.
    pub fn issue_access(&self, subject: &str) -> Result<String, ApiError> {
        self.issue(subject, self.access_ttl, BTreeMap::new())
    }

    /// Issue a longer-lived refresh token.
    pub fn issue_refresh(&self, subject: &str) -> Result<String, ApiError> {
        self.issue(subject, self.refresh_ttl, BTreeMap::new())
    }

    /// Verify signature and expiry, returning the decoded claims.
    ///
    /// Does not consult the credential store. Fails with `ExpiredToken`
    /// when the token is past `exp`, `MalformedToken` for any other
    /// decode failure (bad structure, bad signature, wrong algorithm).
    pub fn verify(&self, token: &str) -> Result<Claims, ApiError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => ApiError::ExpiredToken,
                _ => ApiError::MalformedToken(err.to_string()),
            })
    }
}
