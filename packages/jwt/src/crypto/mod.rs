//! Signature computation and verification dispatched by [`Algorithm`]
//!
//! Both entry points are pure functions of their inputs. The signing input
//! is always `ASCII(base64url(header) "." base64url(payload))`.

mod ecdsa;
mod hmac;
mod rsa;

use crate::algorithm::Algorithm;
use crate::error::{JwtError, JwtResult};
use crate::keys::{Key, KeyMaterial};

/// Compute the signature of `signing_input` with `key` under `algorithm`.
///
/// # Errors
/// Returns `JwtError::InvalidKey` if the key does not fit the algorithm or
/// is a public key.
pub fn sign(signing_input: &[u8], key: &Key, algorithm: Algorithm) -> JwtResult<Vec<u8>> {
    key.check_algorithm(algorithm)?;

    match key.material() {
        KeyMaterial::Secret(secret) => hmac::sign(algorithm, signing_input, secret),
        KeyMaterial::RsaPrivate(private_key) => rsa::sign(algorithm, signing_input, private_key),
        KeyMaterial::P256Private(signing_key) => ecdsa::sign_p256(signing_input, signing_key),
        KeyMaterial::P384Private(signing_key) => ecdsa::sign_p384(signing_input, signing_key),
        KeyMaterial::RsaPublic(_) | KeyMaterial::P256Public(_) | KeyMaterial::P384Public(_) => Err(
            JwtError::invalid_key(format!("{algorithm} signing requires a private key")),
        ),
    }
}

/// Check `signature` over `signing_input` with `key` under `algorithm`.
///
/// Returns `Ok(false)` for any signature that does not verify, including
/// ones of the wrong length. HMAC tags are compared in constant time.
///
/// # Errors
/// Returns `JwtError::InvalidKey` if the key does not fit the algorithm.
pub fn verify(
    signing_input: &[u8],
    signature: &[u8],
    key: &Key,
    algorithm: Algorithm,
) -> JwtResult<bool> {
    key.check_algorithm(algorithm)?;

    match key.material() {
        KeyMaterial::Secret(secret) => hmac::verify(algorithm, signing_input, signature, secret),
        KeyMaterial::RsaPrivate(private_key) => Ok(rsa::verify(
            algorithm,
            signing_input,
            signature,
            &private_key.to_public_key(),
        )),
        KeyMaterial::RsaPublic(public_key) => {
            Ok(rsa::verify(algorithm, signing_input, signature, public_key))
        }
        KeyMaterial::P256Private(signing_key) => Ok(ecdsa::verify_p256(
            signing_input,
            signature,
            signing_key.verifying_key(),
        )),
        KeyMaterial::P256Public(verifying_key) => {
            Ok(ecdsa::verify_p256(signing_input, signature, verifying_key))
        }
        KeyMaterial::P384Private(signing_key) => Ok(ecdsa::verify_p384(
            signing_input,
            signature,
            signing_key.verifying_key(),
        )),
        KeyMaterial::P384Public(verifying_key) => {
            Ok(ecdsa::verify_p384(signing_input, signature, verifying_key))
        }
    }
}
