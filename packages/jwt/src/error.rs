//! JWT error types

use thiserror::Error;

/// JWT operation result type
pub type JwtResult<T> = Result<T, JwtError>;

/// Errors produced while issuing or verifying tokens.
///
/// Messages never carry key material or raw signature bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    /// Structurally invalid token, segment, or claim value
    #[error("Malformed token: {0}")]
    Malformed(String),

    /// `alg` is unknown or not in the caller's allow-list
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Signature does not match the signing input under the supplied key
    #[error("Invalid token signature")]
    InvalidSignature,

    /// Current time is at or after `exp`
    #[error("Token has expired")]
    Expired,

    /// Current time is before `nbf` or `iat`
    #[error("Token is not yet valid")]
    NotYetValid,

    /// Caller-supplied claims conflict with issuance rules
    #[error("Invalid claims: {0}")]
    InvalidClaims(String),

    /// Key is unusable for the requested algorithm
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// A claim required by the validation options is absent
    #[error("Missing required claim: {0}")]
    MissingClaim(String),

    /// `iss` does not match the expected issuer
    #[error("Invalid token issuer")]
    InvalidIssuer,

    /// `aud` does not contain an expected audience
    #[error("Invalid token audience")]
    InvalidAudience,

    /// Internal failure (serialization, task join)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl JwtError {
    /// Create a malformed token error
    #[inline]
    #[must_use]
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    /// Create an unsupported algorithm error
    #[inline]
    #[must_use]
    pub fn unsupported_algorithm(alg: impl Into<String>) -> Self {
        Self::UnsupportedAlgorithm(alg.into())
    }

    /// Create an invalid claims error
    #[inline]
    #[must_use]
    pub fn invalid_claims(msg: impl Into<String>) -> Self {
        Self::InvalidClaims(msg.into())
    }

    /// Create an invalid key error
    #[inline]
    #[must_use]
    pub fn invalid_key(msg: impl Into<String>) -> Self {
        Self::InvalidKey(msg.into())
    }

    /// Create a missing claim error
    #[inline]
    #[must_use]
    pub fn missing_claim(claim: impl Into<String>) -> Self {
        Self::MissingClaim(claim.into())
    }

    /// Create an internal error
    #[inline]
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether this error rejects the presented token, as opposed to a
    /// configuration or internal failure on the caller's side.
    ///
    /// Callers mapping to HTTP typically answer 401 for these.
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            Self::Malformed(_)
                | Self::UnsupportedAlgorithm(_)
                | Self::InvalidSignature
                | Self::Expired
                | Self::NotYetValid
                | Self::MissingClaim(_)
                | Self::InvalidIssuer
                | Self::InvalidAudience
        )
    }

    /// Short stable name of the error kind, used in log fields.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Malformed(_) => "malformed",
            Self::UnsupportedAlgorithm(_) => "unsupported_algorithm",
            Self::InvalidSignature => "invalid_signature",
            Self::Expired => "expired",
            Self::NotYetValid => "not_yet_valid",
            Self::InvalidClaims(_) => "invalid_claims",
            Self::InvalidKey(_) => "invalid_key",
            Self::MissingClaim(_) => "missing_claim",
            Self::InvalidIssuer => "invalid_issuer",
            Self::InvalidAudience => "invalid_audience",
            Self::Internal(_) => "internal",
        }
    }
}
