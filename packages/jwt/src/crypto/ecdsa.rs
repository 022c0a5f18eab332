//! ECDSA (ES256 on P-256, ES384 on P-384)
//!
//! Signatures use the fixed-width JWS encoding `r || s` (64 and 96 bytes),
//! not ASN.1 DER. Nonces are derived per RFC 6979, so signing is deterministic.

use crate::error::{JwtError, JwtResult};
use p256::ecdsa::signature::{Signer, Verifier};

pub(super) fn sign_p256(message: &[u8], key: &p256::ecdsa::SigningKey) -> JwtResult<Vec<u8>> {
    let signature: p256::ecdsa::Signature = key
        .try_sign(message)
        .map_err(|e| JwtError::internal(format!("ES256 signing failed: {e}")))?;
    Ok(signature.to_bytes().to_vec())
}

pub(super) fn verify_p256(
    message: &[u8],
    signature: &[u8],
    key: &p256::ecdsa::VerifyingKey,
) -> bool {
    p256::ecdsa::Signature::from_slice(signature)
        .is_ok_and(|signature| key.verify(message, &signature).is_ok())
}

pub(super) fn sign_p384(message: &[u8], key: &p384::ecdsa::SigningKey) -> JwtResult<Vec<u8>> {
    let signature: p384::ecdsa::Signature = key
        .try_sign(message)
        .map_err(|e| JwtError::internal(format!("ES384 signing failed: {e}")))?;
    Ok(signature.to_bytes().to_vec())
}

pub(super) fn verify_p384(
    message: &[u8],
    signature: &[u8],
    key: &p384::ecdsa::VerifyingKey,
) -> bool {
    p384::ecdsa::Signature::from_slice(signature)
        .is_ok_and(|signature| key.verify(message, &signature).is_ok())
}
