//! Key material for signing and verification
//!
//! A [`Key`] is always passed explicitly to issuance and verification. It is
//! parsed once at construction, zeroized on drop where the backing type
//! supports it, and redacted from `Debug` output.

use crate::algorithm::{Algorithm, AlgorithmFamily};
use crate::error::{JwtError, JwtResult};
use rand::RngCore;
use zeroize::Zeroizing;

/// Signing or verification key.
#[derive(Clone)]
pub struct Key {
    material: KeyMaterial,
}

#[derive(Clone)]
pub(crate) enum KeyMaterial {
    Secret(Zeroizing<Vec<u8>>),
    RsaPrivate(Box<rsa::RsaPrivateKey>),
    RsaPublic(Box<rsa::RsaPublicKey>),
    P256Private(p256::ecdsa::SigningKey),
    P256Public(p256::ecdsa::VerifyingKey),
    P384Private(p384::ecdsa::SigningKey),
    P384Public(p384::ecdsa::VerifyingKey),
}

impl Key {
    /// Shared secret for the HS* algorithms.
    #[must_use]
    pub fn hmac(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            material: KeyMaterial::Secret(Zeroizing::new(secret.into())),
        }
    }

    /// Fresh random shared secret of the recommended size for `algorithm`.
    ///
    /// # Errors
    /// Returns `JwtError::InvalidKey` if `algorithm` is not an HMAC algorithm.
    pub fn random_hmac(algorithm: Algorithm) -> JwtResult<Self> {
        if algorithm.family() != AlgorithmFamily::Hmac {
            return Err(JwtError::invalid_key(format!(
                "{algorithm} does not use a shared secret"
            )));
        }
        let mut secret = Zeroizing::new(vec![0u8; recommended_key_size(algorithm)]);
        rand::rng().fill_bytes(&mut secret);
        Ok(Self {
            material: KeyMaterial::Secret(secret),
        })
    }

    /// RSA private key in PKCS#8 DER form.
    ///
    /// # Errors
    /// Returns `JwtError::InvalidKey` if the bytes are not an RSA PKCS#8 key.
    pub fn rsa_private_der(der: &[u8]) -> JwtResult<Self> {
        use rsa::pkcs8::DecodePrivateKey;

        let key = rsa::RsaPrivateKey::from_pkcs8_der(der)
            .map_err(|e| JwtError::invalid_key(format!("Invalid RSA private key: {e}")))?;
        Ok(Self::from(key))
    }

    /// RSA public key in SubjectPublicKeyInfo DER form.
    ///
    /// # Errors
    /// Returns `JwtError::InvalidKey` if the bytes are not an RSA SPKI key.
    pub fn rsa_public_der(der: &[u8]) -> JwtResult<Self> {
        use rsa::pkcs8::DecodePublicKey;

        let key = rsa::RsaPublicKey::from_public_key_der(der)
            .map_err(|e| JwtError::invalid_key(format!("Invalid RSA public key: {e}")))?;
        Ok(Self::from(key))
    }

    /// EC private key (P-256 or P-384) in PKCS#8 DER form.
    ///
    /// # Errors
    /// Returns `JwtError::InvalidKey` if the bytes are not a PKCS#8 key on
    /// either supported curve.
    pub fn ec_private_der(der: &[u8]) -> JwtResult<Self> {
        use p256::pkcs8::DecodePrivateKey;

        if let Ok(key) = p256::ecdsa::SigningKey::from_pkcs8_der(der) {
            return Ok(Self::from(key));
        }
        p384::ecdsa::SigningKey::from_pkcs8_der(der)
            .map(Self::from)
            .map_err(|e| JwtError::invalid_key(format!("Invalid EC private key: {e}")))
    }

    /// EC public key (P-256 or P-384) in SubjectPublicKeyInfo DER form.
    ///
    /// # Errors
    /// Returns `JwtError::InvalidKey` if the bytes are not an SPKI key on
    /// either supported curve.
    pub fn ec_public_der(der: &[u8]) -> JwtResult<Self> {
        use p256::pkcs8::DecodePublicKey;

        if let Ok(key) = p256::ecdsa::VerifyingKey::from_public_key_der(der) {
            return Ok(Self::from(key));
        }
        p384::ecdsa::VerifyingKey::from_public_key_der(der)
            .map(Self::from)
            .map_err(|e| JwtError::invalid_key(format!("Invalid EC public key: {e}")))
    }

    /// Private key from a PKCS#8 PEM document (RSA, P-256 or P-384).
    ///
    /// # Errors
    /// Returns `JwtError::InvalidKey` if no supported key type parses.
    pub fn private_pem(pem: &str) -> JwtResult<Self> {
        use rsa::pkcs8::DecodePrivateKey;

        if let Ok(key) = rsa::RsaPrivateKey::from_pkcs8_pem(pem) {
            return Ok(Self::from(key));
        }
        if let Ok(key) = p256::ecdsa::SigningKey::from_pkcs8_pem(pem) {
            return Ok(Self::from(key));
        }
        p384::ecdsa::SigningKey::from_pkcs8_pem(pem)
            .map(Self::from)
            .map_err(|_| JwtError::invalid_key("Unrecognized PKCS#8 PEM private key"))
    }

    /// Public key from an SPKI PEM document (RSA, P-256 or P-384).
    ///
    /// # Errors
    /// Returns `JwtError::InvalidKey` if no supported key type parses.
    pub fn public_pem(pem: &str) -> JwtResult<Self> {
        use rsa::pkcs8::DecodePublicKey;

        if let Ok(key) = rsa::RsaPublicKey::from_public_key_pem(pem) {
            return Ok(Self::from(key));
        }
        if let Ok(key) = p256::ecdsa::VerifyingKey::from_public_key_pem(pem) {
            return Ok(Self::from(key));
        }
        p384::ecdsa::VerifyingKey::from_public_key_pem(pem)
            .map(Self::from)
            .map_err(|_| JwtError::invalid_key("Unrecognized SPKI PEM public key"))
    }

    /// Verification half of this key. Shared secrets and public keys are
    /// returned unchanged.
    #[must_use]
    pub fn to_public(&self) -> Self {
        let material = match &self.material {
            KeyMaterial::RsaPrivate(key) => {
                KeyMaterial::RsaPublic(Box::new(key.to_public_key()))
            }
            KeyMaterial::P256Private(key) => KeyMaterial::P256Public(key.verifying_key().clone()),
            KeyMaterial::P384Private(key) => KeyMaterial::P384Public(key.verifying_key().clone()),
            other => other.clone(),
        };
        Self { material }
    }

    /// Whether this key can produce signatures.
    #[must_use]
    pub fn can_sign(&self) -> bool {
        !matches!(
            self.material,
            KeyMaterial::RsaPublic(_) | KeyMaterial::P256Public(_) | KeyMaterial::P384Public(_)
        )
    }

    /// Key family this material belongs to.
    #[must_use]
    pub fn family(&self) -> AlgorithmFamily {
        match self.material {
            KeyMaterial::Secret(_) => AlgorithmFamily::Hmac,
            KeyMaterial::RsaPrivate(_) | KeyMaterial::RsaPublic(_) => AlgorithmFamily::Rsa,
            KeyMaterial::P256Private(_)
            | KeyMaterial::P256Public(_)
            | KeyMaterial::P384Private(_)
            | KeyMaterial::P384Public(_) => AlgorithmFamily::Ecdsa,
        }
    }

    /// Check that this key may be used with `algorithm`.
    ///
    /// Rejects cross-family use (an RSA public key can never act as an HMAC
    /// secret), curve mismatches, and HMAC secrets shorter than the hash
    /// output.
    ///
    /// # Errors
    /// Returns `JwtError::InvalidKey` describing the mismatch.
    pub fn check_algorithm(&self, algorithm: Algorithm) -> JwtResult<()> {
        match (&self.material, algorithm) {
            (KeyMaterial::Secret(secret), Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512) => {
                let min_length = recommended_key_size(algorithm);
                if secret.len() < min_length {
                    return Err(JwtError::invalid_key(format!(
                        "HMAC key for {algorithm} must be at least {min_length} bytes, got {}",
                        secret.len()
                    )));
                }
                Ok(())
            }
            (
                KeyMaterial::RsaPrivate(_) | KeyMaterial::RsaPublic(_),
                Algorithm::RS256 | Algorithm::RS384 | Algorithm::RS512,
            )
            | (KeyMaterial::P256Private(_) | KeyMaterial::P256Public(_), Algorithm::ES256)
            | (KeyMaterial::P384Private(_) | KeyMaterial::P384Public(_), Algorithm::ES384) => Ok(()),
            _ => Err(JwtError::invalid_key(format!(
                "{} key cannot be used with {algorithm}",
                self.kind()
            ))),
        }
    }

    pub(crate) fn material(&self) -> &KeyMaterial {
        &self.material
    }

    fn kind(&self) -> &'static str {
        match self.material {
            KeyMaterial::Secret(_) => "HMAC",
            KeyMaterial::RsaPrivate(_) => "RSA private",
            KeyMaterial::RsaPublic(_) => "RSA public",
            KeyMaterial::P256Private(_) => "P-256 private",
            KeyMaterial::P256Public(_) => "P-256 public",
            KeyMaterial::P384Private(_) => "P-384 private",
            KeyMaterial::P384Public(_) => "P-384 public",
        }
    }
}

impl std::fmt::Debug for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Key")
            .field("kind", &self.kind())
            .finish_non_exhaustive()
    }
}

impl From<rsa::RsaPrivateKey> for Key {
    fn from(key: rsa::RsaPrivateKey) -> Self {
        Self {
            material: KeyMaterial::RsaPrivate(Box::new(key)),
        }
    }
}

impl From<rsa::RsaPublicKey> for Key {
    fn from(key: rsa::RsaPublicKey) -> Self {
        Self {
            material: KeyMaterial::RsaPublic(Box::new(key)),
        }
    }
}

impl From<p256::ecdsa::SigningKey> for Key {
    fn from(key: p256::ecdsa::SigningKey) -> Self {
        Self {
            material: KeyMaterial::P256Private(key),
        }
    }
}

impl From<p256::ecdsa::VerifyingKey> for Key {
    fn from(key: p256::ecdsa::VerifyingKey) -> Self {
        Self {
            material: KeyMaterial::P256Public(key),
        }
    }
}

impl From<p384::ecdsa::SigningKey> for Key {
    fn from(key: p384::ecdsa::SigningKey) -> Self {
        Self {
            material: KeyMaterial::P384Private(key),
        }
    }
}

impl From<p384::ecdsa::VerifyingKey> for Key {
    fn from(key: p384::ecdsa::VerifyingKey) -> Self {
        Self {
            material: KeyMaterial::P384Public(key),
        }
    }
}

/// Recommended key size in bytes for `algorithm`.
///
/// For HMAC this is also the enforced minimum.
#[must_use]
pub const fn recommended_key_size(algorithm: Algorithm) -> usize {
    match algorithm {
        Algorithm::HS256 | Algorithm::ES256 => 32,
        Algorithm::HS384 | Algorithm::ES384 => 48,
        Algorithm::HS512 => 64,
        Algorithm::RS256 | Algorithm::RS384 | Algorithm::RS512 => 256,
    }
}
