//! `Authorization: Bearer <token>` extraction

use crate::error::{JwtError, JwtResult};

/// Extract the token from an `Authorization` header value.
///
/// The scheme is matched case-insensitively and surrounding whitespace is
/// ignored. The token itself is returned untouched for verification.
///
/// # Errors
/// Returns `JwtError::Malformed` if the scheme is not `Bearer` or the token
/// is empty.
pub fn bearer_token(header_value: &str) -> JwtResult<&str> {
    let (scheme, token) = header_value
        .trim()
        .split_once(char::is_whitespace)
        .ok_or_else(|| JwtError::malformed("expected `Bearer <token>`"))?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(JwtError::malformed("authorization scheme is not Bearer"));
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(JwtError::malformed("empty bearer token"));
    }
    Ok(token)
}
