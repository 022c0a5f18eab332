//! Token issuance

use crate::algorithm::Algorithm;
use crate::claims::{Claims, names};
use crate::clock::{Clock, SystemClock};
use crate::codec;
use crate::crypto;
use crate::error::{JwtError, JwtResult};
use crate::futures::AsyncJwtResult;
use crate::keys::Key;
use crate::types::{Header, Token};
use serde_json::Value;
use std::sync::Arc;

/// Issue a token signed with `key`, valid for `ttl_seconds` from now.
///
/// Shorthand for [`Issuer::issue`] on the system clock.
///
/// # Errors
/// See [`Issuer::issue`].
pub fn issue(claims: &Claims, key: &Key, algorithm: Algorithm, ttl_seconds: i64) -> JwtResult<Token> {
    Issuer::new().issue(claims, key, algorithm, ttl_seconds)
}

/// Builds, stamps and signs tokens.
///
/// Holds only immutable configuration, so one instance can be shared
/// freely across threads.
#[derive(Clone)]
pub struct Issuer {
    clock: Arc<dyn Clock>,
    key_id: Option<String>,
}

impl Issuer {
    /// Issuer on the system clock without a `kid` header.
    #[must_use]
    pub fn new() -> Self {
        Self {
            clock: Arc::new(SystemClock),
            key_id: None,
        }
    }

    /// Use `clock` for `iat`/`exp` stamping.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Emit `kid` in every header.
    #[must_use]
    pub fn with_key_id(mut self, kid: impl Into<String>) -> Self {
        self.key_id = Some(kid.into());
        self
    }

    /// Issue a token.
    ///
    /// The payload is the caller's claims in their original order followed
    /// by `iat = now` and `exp = now + ttl_seconds`. A negative TTL yields
    /// an already-expired token.
    ///
    /// # Errors
    /// - `JwtError::InvalidClaims` if `claims` contains `iat` or `exp`, or a
    ///   registered claim has the wrong JSON type
    /// - `JwtError::InvalidKey` if `key` cannot sign with `algorithm`
    pub fn issue(
        &self,
        claims: &Claims,
        key: &Key,
        algorithm: Algorithm,
        ttl_seconds: i64,
    ) -> JwtResult<Token> {
        check_caller_claims(claims)?;
        key.check_algorithm(algorithm)?;

        let now = self.clock.now();
        let exp = now
            .checked_add(ttl_seconds)
            .ok_or_else(|| JwtError::invalid_claims("ttl overflows the expiration time"))?;

        let mut payload = claims.clone();
        payload.insert(names::ISSUED_AT, now);
        payload.insert(names::EXPIRES_AT, exp);

        let mut header = Header::new(algorithm);
        header.kid.clone_from(&self.key_id);

        let header_b64 = codec::encode(&header)?;
        let payload_b64 = codec::encode(&payload)?;

        let mut signing_input = String::with_capacity(header_b64.len() + 1 + payload_b64.len());
        signing_input.push_str(&header_b64);
        signing_input.push('.');
        signing_input.push_str(&payload_b64);

        let signature = crypto::sign(signing_input.as_bytes(), key, algorithm)?;
        let token = Token::from_parts(&header_b64, &payload_b64, &codec::base64url_encode(&signature));

        tracing::debug!(
            alg = %algorithm,
            kid = ?self.key_id,
            sub = ?claims.subject(),
            exp,
            "issued token"
        );

        Ok(token)
    }

    /// [`issue`](Self::issue) with a `chrono` duration.
    ///
    /// # Errors
    /// See [`Issuer::issue`].
    pub fn issue_for(
        &self,
        claims: &Claims,
        key: &Key,
        algorithm: Algorithm,
        ttl: chrono::Duration,
    ) -> JwtResult<Token> {
        self.issue(claims, key, algorithm, ttl.num_seconds())
    }

    /// Issue on the tokio blocking pool.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn issue_async(
        &self,
        claims: Claims,
        key: Key,
        algorithm: Algorithm,
        ttl_seconds: i64,
    ) -> AsyncJwtResult<Token> {
        let issuer = self.clone();
        AsyncJwtResult::spawn(move || issuer.issue(&claims, &key, algorithm, ttl_seconds))
    }
}

impl Default for Issuer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Issuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Issuer")
            .field("key_id", &self.key_id)
            .finish_non_exhaustive()
    }
}

/// `iat` and `exp` belong to the issuer; registered claims must carry
/// their RFC 7519 types.
fn check_caller_claims(claims: &Claims) -> JwtResult<()> {
    for reserved in [names::ISSUED_AT, names::EXPIRES_AT] {
        if claims.contains(reserved) {
            return Err(JwtError::invalid_claims(format!(
                "{reserved} is set by the issuer and cannot be supplied"
            )));
        }
    }

    for name in [names::SUBJECT, names::ISSUER, names::JWT_ID] {
        if let Some(value) = claims.get(name)
            && !value.is_string()
        {
            return Err(JwtError::invalid_claims(format!("{name} must be a string")));
        }
    }

    match claims.get(names::AUDIENCE) {
        None | Some(Value::String(_)) => {}
        Some(Value::Array(items)) if items.iter().all(Value::is_string) => {}
        Some(_) => {
            return Err(JwtError::invalid_claims(
                "aud must be a string or an array of strings",
            ));
        }
    }

    if let Some(nbf) = claims.get(names::NOT_BEFORE)
        && !nbf.is_i64()
    {
        return Err(JwtError::invalid_claims("nbf must be an integer NumericDate"));
    }

    Ok(())
}
