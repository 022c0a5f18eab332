//! Token payload: an insertion-ordered claim mapping

use crate::error::{JwtError, JwtResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

/// Registered claim names.
pub mod names {
    /// Subject
    pub const SUBJECT: &str = "sub";
    /// Issuer
    pub const ISSUER: &str = "iss";
    /// Audience
    pub const AUDIENCE: &str = "aud";
    /// Expiration time
    pub const EXPIRES_AT: &str = "exp";
    /// Not before
    pub const NOT_BEFORE: &str = "nbf";
    /// Issued at
    pub const ISSUED_AT: &str = "iat";
    /// JWT ID
    pub const JWT_ID: &str = "jti";
}

/// Claim names to values, in insertion order.
///
/// Key order is preserved through serialization, which keeps the encoded
/// payload (and so the signature) stable for the same input.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(Map<String, Value>);

impl Claims {
    /// Empty claim set.
    #[must_use]
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Claims from any value that serializes to a JSON object.
    ///
    /// # Errors
    /// Returns `JwtError::InvalidClaims` if `value` is not a JSON object.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> JwtResult<Self> {
        match serde_json::to_value(value) {
            Ok(Value::Object(map)) => Ok(Self(map)),
            Ok(_) => Err(JwtError::invalid_claims("claims must be a JSON object")),
            Err(e) => Err(JwtError::invalid_claims(e.to_string())),
        }
    }

    /// Deserialize the claim set into an application type.
    ///
    /// # Errors
    /// Returns `JwtError::InvalidClaims` if the claims do not fit `T`.
    pub fn deserialize_into<T: DeserializeOwned>(&self) -> JwtResult<T> {
        serde_json::from_value(Value::Object(self.0.clone()))
            .map_err(|e| JwtError::invalid_claims(e.to_string()))
    }

    /// Insert or replace a claim, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(name.into(), value.into())
    }

    /// Remove a claim, keeping the order of the remaining ones.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.0.shift_remove(name)
    }

    /// Raw value of a claim.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Whether a claim is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Number of claims.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no claims.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Claims in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Underlying JSON object.
    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume into the underlying JSON object.
    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// `sub`, if present and a string.
    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.get(names::SUBJECT).and_then(Value::as_str)
    }

    /// `iss`, if present and a string.
    #[must_use]
    pub fn issuer(&self) -> Option<&str> {
        self.get(names::ISSUER).and_then(Value::as_str)
    }

    /// `jti`, if present and a string.
    #[must_use]
    pub fn jwt_id(&self) -> Option<&str> {
        self.get(names::JWT_ID).and_then(Value::as_str)
    }

    /// `aud` values. A single string audience yields one entry.
    ///
    /// # Errors
    /// Returns `JwtError::Malformed` if `aud` is neither a string nor an
    /// array of strings.
    pub fn audience(&self) -> JwtResult<Vec<&str>> {
        match self.get(names::AUDIENCE) {
            None => Ok(Vec::new()),
            Some(Value::String(aud)) => Ok(vec![aud.as_str()]),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_str()
                        .ok_or_else(|| JwtError::malformed("aud entries must be strings"))
                })
                .collect(),
            Some(_) => Err(JwtError::malformed(
                "aud must be a string or an array of strings",
            )),
        }
    }

    /// `exp` in Unix seconds.
    ///
    /// # Errors
    /// Returns `JwtError::Malformed` if present but not a number.
    pub fn expires_at(&self) -> JwtResult<Option<i64>> {
        self.numeric_date(names::EXPIRES_AT)
    }

    /// `iat` in Unix seconds.
    ///
    /// # Errors
    /// Returns `JwtError::Malformed` if present but not a number.
    pub fn issued_at(&self) -> JwtResult<Option<i64>> {
        self.numeric_date(names::ISSUED_AT)
    }

    /// `nbf` in Unix seconds.
    ///
    /// # Errors
    /// Returns `JwtError::Malformed` if present but not a number.
    pub fn not_before(&self) -> JwtResult<Option<i64>> {
        self.numeric_date(names::NOT_BEFORE)
    }

    /// NumericDate claim. Fractional seconds are truncated toward negative
    /// infinity.
    fn numeric_date(&self, name: &str) -> JwtResult<Option<i64>> {
        let Some(value) = self.get(name) else {
            return Ok(None);
        };
        if let Some(seconds) = value.as_i64() {
            return Ok(Some(seconds));
        }
        match value.as_f64() {
            #[allow(clippy::cast_possible_truncation)]
            Some(seconds) if seconds.is_finite() => Ok(Some(seconds.floor() as i64)),
            _ => Err(JwtError::malformed(format!("{name} must be a NumericDate"))),
        }
    }
}

impl From<Map<String, Value>> for Claims {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Claims> for Value {
    fn from(claims: Claims) -> Self {
        Value::Object(claims.0)
    }
}

impl<'a> IntoIterator for &'a Claims {
    type Item = (&'a String, &'a Value);
    type IntoIter = serde_json::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Fluent builder for caller claims.
///
/// `iat` and `exp` are stamped by the issuer and have no setters here.
#[derive(Debug, Clone, Default)]
pub struct ClaimsBuilder {
    claims: Claims,
}

impl ClaimsBuilder {
    /// Create new claims builder
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set subject claim
    #[inline]
    #[must_use]
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.claims.insert(names::SUBJECT, subject.into());
        self
    }

    /// Set issuer claim
    #[inline]
    #[must_use]
    pub fn issuer(mut self, issuer: impl Into<String>) -> Self {
        self.claims.insert(names::ISSUER, issuer.into());
        self
    }

    /// Set audience claim as a single string
    #[inline]
    #[must_use]
    pub fn audience(mut self, audience: impl Into<String>) -> Self {
        self.claims.insert(names::AUDIENCE, audience.into());
        self
    }

    /// Set audience claim as an array
    #[must_use]
    pub fn audiences<I, S>(mut self, audiences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<Value> = audiences
            .into_iter()
            .map(|aud| Value::String(aud.into()))
            .collect();
        self.claims.insert(names::AUDIENCE, values);
        self
    }

    /// Set not-before time
    #[inline]
    #[must_use]
    pub fn not_before(mut self, nbf: DateTime<Utc>) -> Self {
        self.claims.insert(names::NOT_BEFORE, nbf.timestamp());
        self
    }

    /// Set JWT ID
    #[inline]
    #[must_use]
    pub fn jwt_id(mut self, jti: impl Into<String>) -> Self {
        self.claims.insert(names::JWT_ID, jti.into());
        self
    }

    /// Set an application-specific claim
    #[inline]
    #[must_use]
    pub fn claim(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.claims.insert(name, value);
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> Claims {
        self.claims
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn claims(value: Value) -> Claims {
        Claims::from_serialize(&value).expect("object claims")
    }

    #[test]
    fn test_numeric_dates() {
        let c = claims(json!({"exp": 100, "iat": 99.9, "nbf": -0.5}));
        assert_eq!(c.expires_at(), Ok(Some(100)));
        assert_eq!(c.issued_at(), Ok(Some(99)));
        assert_eq!(c.not_before(), Ok(Some(-1)));

        let c = claims(json!({"exp": "100", "iat": null}));
        assert!(matches!(c.expires_at(), Err(JwtError::Malformed(_))));
        assert!(matches!(c.issued_at(), Err(JwtError::Malformed(_))));
        assert_eq!(c.not_before(), Ok(None));
    }

    #[test]
    fn test_audience_forms() {
        assert_eq!(claims(json!({})).audience(), Ok(vec![]));
        assert_eq!(claims(json!({"aud": "api"})).audience(), Ok(vec!["api"]));
        assert_eq!(
            claims(json!({"aud": ["api", "web"]})).audience(),
            Ok(vec!["api", "web"])
        );
        assert!(claims(json!({"aud": ["api", 3]})).audience().is_err());
        assert!(claims(json!({"aud": {"x": 1}})).audience().is_err());
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut c = ClaimsBuilder::new()
            .claim("a", 1)
            .claim("b", 2)
            .claim("c", 3)
            .build();
        assert_eq!(c.remove("b"), Some(json!(2)));
        let names: Vec<&str> = c.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, ["a", "c"]);
    }

    #[test]
    fn test_builder_registered_claims() {
        let nbf = DateTime::from_timestamp(1_000, 0).expect("valid timestamp");
        let c = ClaimsBuilder::new()
            .subject("s")
            .issuer("i")
            .audience("a")
            .jwt_id("j")
            .not_before(nbf)
            .build();
        assert_eq!(c.subject(), Some("s"));
        assert_eq!(c.issuer(), Some("i"));
        assert_eq!(c.jwt_id(), Some("j"));
        assert_eq!(c.not_before(), Ok(Some(1_000)));
        assert_eq!(c.len(), 5);
    }
}
