//! Segment codec: JSON values to unpadded base64url text and back

use crate::error::{JwtError, JwtResult};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::{Serialize, de::DeserializeOwned};

/// Base64 URL-safe encoding without padding (RFC 7515)
#[inline]
#[must_use]
pub fn base64url_encode(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Base64 URL-safe decoding without padding (RFC 7515)
///
/// Padding characters and non-zero trailing bits are rejected, so every
/// byte sequence has exactly one accepted encoding.
///
/// # Errors
/// Returns `JwtError::Malformed` if `input` is not canonical base64url.
#[inline]
pub fn base64url_decode(input: &str) -> JwtResult<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(input)
        .map_err(|e| JwtError::malformed(format!("invalid base64url: {e}")))
}

/// Serialize `value` to JSON and base64url-encode it.
///
/// Output is deterministic for the same input: struct fields serialize in
/// declaration order and claim maps in insertion order.
///
/// # Errors
/// Returns `JwtError::Internal` if `value` cannot be represented as JSON.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> JwtResult<String> {
    let json = serde_json::to_vec(value)
        .map_err(|e| JwtError::internal(format!("JSON serialization failed: {e}")))?;
    Ok(base64url_encode(&json))
}

/// Base64url-decode `text` and parse the bytes as JSON.
///
/// # Errors
/// Returns `JwtError::Malformed` if either step fails.
pub fn decode<T: DeserializeOwned>(text: &str) -> JwtResult<T> {
    let bytes = base64url_decode(text)?;
    serde_json::from_slice(&bytes).map_err(|e| JwtError::malformed(format!("invalid JSON: {e}")))
}
