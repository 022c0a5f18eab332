//! Token verification
//!
//! Each call runs split, header and payload decode, algorithm gate,
//! signature decode and check, time checks and claim checks in that order, against a single sampled `now`.
//! The first failing step decides the error.

use crate::algorithm::Algorithm;
use crate::claims::Claims;
use crate::clock::{Clock, SystemClock};
use crate::codec;
use crate::crypto;
use crate::error::{JwtError, JwtResult};
use crate::futures::AsyncJwtResult;
use crate::keys::Key;
use crate::types::Header;
use crate::validation::ValidationOptions;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Verify `token` with `key` under `options` on the system clock.
///
/// # Errors
/// See [`Verifier::verify`].
pub fn verify(token: &str, key: &Key, options: &ValidationOptions) -> JwtResult<Claims> {
    Verifier::new(options.clone()).verify(token, key)
}

/// Decode the header without verifying anything else.
///
/// Intended for picking a key by `kid` before verification; never trust
/// its contents on their own.
///
/// # Errors
/// Returns `JwtError::Malformed` if the token does not have three segments
/// or the header does not decode.
pub fn decode_header(token: &str) -> JwtResult<Header> {
    let segments = split(token)?;
    decode_header_segment(segments.header)
}

/// Validates incoming tokens end to end.
#[derive(Clone)]
pub struct Verifier {
    clock: Arc<dyn Clock>,
    options: ValidationOptions,
}

impl Verifier {
    /// Verifier on the system clock.
    #[must_use]
    pub fn new(options: ValidationOptions) -> Self {
        Self {
            clock: Arc::new(SystemClock),
            options,
        }
    }

    /// Use `clock` as the source of `now`.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Active validation options.
    #[must_use]
    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    /// Verify `token` and return its claims.
    ///
    /// # Errors
    /// - `JwtError::Malformed` for a wrong segment count, undecodable
    ///   segments, a header without `alg`/`typ`, or non-numeric time claims
    /// - `JwtError::UnsupportedAlgorithm` if `alg` is unknown or not allowed
    /// - `JwtError::InvalidKey` if `key` does not fit the algorithm
    /// - `JwtError::InvalidSignature` if the signature does not verify
    /// - `JwtError::Expired` / `JwtError::NotYetValid` for time failures
    /// - `JwtError::MissingClaim` / `InvalidIssuer` / `InvalidAudience` for
    ///   configured claim expectations
    pub fn verify(&self, token: &str, key: &Key) -> JwtResult<Claims> {
        let now = self.clock.now();
        let result = self.verify_at(token, key, now);
        match &result {
            Ok(claims) => tracing::debug!(sub = ?claims.subject(), "token accepted"),
            Err(error) => tracing::warn!(error = error.kind(), "token rejected"),
        }
        result
    }

    /// Verify and deserialize the claims into `T`.
    ///
    /// # Errors
    /// Everything [`verify`](Self::verify) returns, plus
    /// `JwtError::InvalidClaims` if the claims do not fit `T`.
    pub fn verify_as<T: DeserializeOwned>(&self, token: &str, key: &Key) -> JwtResult<T> {
        self.verify(token, key)?.deserialize_into()
    }

    /// Verify on the tokio blocking pool.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn verify_async(&self, token: impl Into<String>, key: Key) -> AsyncJwtResult<Claims> {
        let verifier = self.clone();
        let token = token.into();
        AsyncJwtResult::spawn(move || verifier.verify(&token, &key))
    }

    fn verify_at(&self, token: &str, key: &Key, now: i64) -> JwtResult<Claims> {
        let segments = split(token)?;

        let header = decode_header_segment(segments.header)?;
        let claims: Claims = codec::decode(segments.payload)?;

        let algorithm: Algorithm = header.alg.parse()?;
        if !self.options.allows(algorithm) {
            return Err(JwtError::unsupported_algorithm(format!(
                "{algorithm} is not in the allowed algorithms"
            )));
        }

        let signature = codec::base64url_decode(segments.signature)?;
        if !crypto::verify(segments.signing_input.as_bytes(), &signature, key, algorithm)? {
            return Err(JwtError::InvalidSignature);
        }

        self.check_times(&claims, now)?;
        self.check_claims(&claims)?;

        Ok(claims)
    }

    fn check_times(&self, claims: &Claims, now: i64) -> JwtResult<()> {
        let leeway = self.options.leeway_seconds();

        if self.options.validate_exp
            && let Some(exp) = claims.expires_at()?
            && now >= exp.saturating_add(leeway)
        {
            return Err(JwtError::Expired);
        }

        if self.options.validate_nbf {
            for not_before in [claims.not_before()?, claims.issued_at()?].into_iter().flatten() {
                if now < not_before.saturating_sub(leeway) {
                    return Err(JwtError::NotYetValid);
                }
            }
        }

        Ok(())
    }

    fn check_claims(&self, claims: &Claims) -> JwtResult<()> {
        if let Some(missing) = self
            .options
            .required_claims
            .iter()
            .find(|name| !claims.contains(name))
        {
            return Err(JwtError::missing_claim(missing.as_str()));
        }

        if let Some(expected) = &self.options.expected_issuer
            && claims.issuer() != Some(expected.as_str())
        {
            return Err(JwtError::InvalidIssuer);
        }

        if let Some(expected) = &self.options.expected_audience {
            let audience = claims.audience()?;
            if !audience
                .iter()
                .any(|aud| expected.iter().any(|e| e.as_str() == *aud))
            {
                return Err(JwtError::InvalidAudience);
            }
        }

        Ok(())
    }
}

impl std::fmt::Debug for Verifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Verifier")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

struct Segments<'a> {
    header: &'a str,
    payload: &'a str,
    signature: &'a str,
    signing_input: &'a str,
}

fn split(token: &str) -> JwtResult<Segments<'_>> {
    let parts: Vec<&str> = token.split('.').collect();
    let &[header, payload, signature] = parts.as_slice() else {
        return Err(JwtError::malformed(format!(
            "expected 3 segments, found {}",
            parts.len()
        )));
    };

    Ok(Segments {
        header,
        payload,
        signature,
        signing_input: &token[..header.len() + 1 + payload.len()],
    })
}

fn decode_header_segment(segment: &str) -> JwtResult<Header> {
    let header: Header = codec::decode(segment)?;
    if !header.typ.eq_ignore_ascii_case("JWT") {
        return Err(JwtError::malformed(format!(
            "unexpected typ {:?}",
            header.typ
        )));
    }
    Ok(header)
}
