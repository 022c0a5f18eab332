//! Token and header types

use crate::algorithm::Algorithm;
use serde::{Deserialize, Serialize};

/// JOSE header of a compact JWS.
///
/// Serializes as `{"alg":..,"typ":"JWT"}` with `kid` appended when set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Signing algorithm identifier
    pub alg: String,
    /// Token type, `"JWT"` on issuance
    pub typ: String,
    /// Key identifier hint
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub kid: Option<String>,
}

impl Header {
    /// Header for `algorithm` with `typ` set to `JWT`.
    #[must_use]
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            alg: algorithm.as_str().to_string(),
            typ: "JWT".to_string(),
            kid: None,
        }
    }

    /// Attach a key identifier.
    #[must_use]
    pub fn with_key_id(mut self, kid: impl Into<String>) -> Self {
        self.kid = Some(kid.into());
        self
    }
}

/// Compact serialized token: `header.payload.signature`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    pub(crate) fn from_parts(header_b64: &str, payload_b64: &str, signature_b64: &str) -> Self {
        let mut token = String::with_capacity(
            header_b64.len() + payload_b64.len() + signature_b64.len() + 2,
        );
        token.push_str(header_b64);
        token.push('.');
        token.push_str(payload_b64);
        token.push('.');
        token.push_str(signature_b64);
        Self(token)
    }

    /// The compact serialization.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the compact serialization.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Token> for String {
    fn from(token: Token) -> Self {
        token.0
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
