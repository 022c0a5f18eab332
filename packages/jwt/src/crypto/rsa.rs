//! RSASSA-PKCS1-v1_5 (RS256, RS384, RS512)

use crate::algorithm::Algorithm;
use crate::error::{JwtError, JwtResult};
use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::sha2::{Sha256, Sha384, Sha512};
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use rsa::{RsaPrivateKey, RsaPublicKey};

pub(super) fn sign(
    algorithm: Algorithm,
    message: &[u8],
    private_key: &RsaPrivateKey,
) -> JwtResult<Vec<u8>> {
    let signature = match algorithm {
        Algorithm::RS256 => SigningKey::<Sha256>::new(private_key.clone()).try_sign(message),
        Algorithm::RS384 => SigningKey::<Sha384>::new(private_key.clone()).try_sign(message),
        Algorithm::RS512 => SigningKey::<Sha512>::new(private_key.clone()).try_sign(message),
        other => {
            return Err(JwtError::invalid_key(format!(
                "RSA key cannot be used with {other}"
            )));
        }
    }
    .map_err(|e| JwtError::internal(format!("RSA signing failed: {e}")))?;

    Ok(signature.to_bytes().as_ref().to_vec())
}

pub(super) fn verify(
    algorithm: Algorithm,
    message: &[u8],
    signature: &[u8],
    public_key: &RsaPublicKey,
) -> bool {
    let Ok(signature) = Signature::try_from(signature) else {
        return false;
    };

    match algorithm {
        Algorithm::RS256 => VerifyingKey::<Sha256>::new(public_key.clone())
            .verify(message, &signature)
            .is_ok(),
        Algorithm::RS384 => VerifyingKey::<Sha384>::new(public_key.clone())
            .verify(message, &signature)
            .is_ok(),
        Algorithm::RS512 => VerifyingKey::<Sha512>::new(public_key.clone())
            .verify(message, &signature)
            .is_ok(),
        _ => false,
    }
}
