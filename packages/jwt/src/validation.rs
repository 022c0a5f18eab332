//! Caller-supplied verification policy

use crate::algorithm::Algorithm;
use chrono::Duration;

/// Options applied by the verifier after the token structure is decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Clock skew tolerated by the time checks.
    pub leeway: Duration,
    /// Check `exp`.
    pub validate_exp: bool,
    /// Check `nbf` and `iat`.
    pub validate_nbf: bool,
    /// Claims that must be present.
    pub required_claims: Vec<String>,
    /// Algorithms accepted in the `alg` header.
    pub allowed_algorithms: Vec<Algorithm>,
    /// Required `iss` value.
    pub expected_issuer: Option<String>,
    /// Expected audience; any overlap with `aud` accepts.
    pub expected_audience: Option<Vec<String>>,
}

impl Default for ValidationOptions {
    /// HS256 only, zero leeway, time checks on, no claim expectations.
    fn default() -> Self {
        Self {
            leeway: Duration::zero(),
            validate_exp: true,
            validate_nbf: true,
            required_claims: vec![],
            allowed_algorithms: vec![Algorithm::HS256],
            expected_issuer: None,
            expected_audience: None,
        }
    }
}

impl ValidationOptions {
    /// Default options accepting exactly `algorithm`.
    #[must_use]
    pub fn for_algorithm(algorithm: Algorithm) -> Self {
        Self::default().allowed_algorithms(vec![algorithm])
    }

    /// Tolerate `leeway` of clock skew. Negative values count as zero.
    #[must_use]
    pub fn with_leeway(mut self, leeway: Duration) -> Self {
        self.leeway = leeway;
        self
    }

    /// Toggle the `exp` check.
    #[must_use]
    pub fn validate_expiration(mut self, validate: bool) -> Self {
        self.validate_exp = validate;
        self
    }

    /// Toggle the `nbf`/`iat` check.
    #[must_use]
    pub fn validate_not_before(mut self, validate: bool) -> Self {
        self.validate_nbf = validate;
        self
    }

    /// Reject tokens without `claim`.
    #[must_use]
    pub fn require_claim(mut self, claim: impl Into<String>) -> Self {
        self.required_claims.push(claim.into());
        self
    }

    /// Replace the algorithm allow-list.
    #[must_use]
    pub fn allowed_algorithms(mut self, algorithms: Vec<Algorithm>) -> Self {
        self.allowed_algorithms = algorithms;
        self
    }

    /// Reject tokens whose `iss` differs from `issuer`.
    #[must_use]
    pub fn expect_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.expected_issuer = Some(issuer.into());
        self
    }

    /// Reject tokens whose `aud` shares nothing with `audience`.
    #[must_use]
    pub fn expect_audience(mut self, audience: Vec<String>) -> Self {
        self.expected_audience = Some(audience);
        self
    }

    /// Whether `algorithm` is in the allow-list.
    #[must_use]
    pub fn allows(&self, algorithm: Algorithm) -> bool {
        self.allowed_algorithms.contains(&algorithm)
    }

    pub(crate) fn leeway_seconds(&self) -> i64 {
        self.leeway.num_seconds().max(0)
    }
}
