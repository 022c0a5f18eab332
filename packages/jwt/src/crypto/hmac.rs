//! HMAC-SHA2 (HS256, HS384, HS512)

use crate::algorithm::Algorithm;
use crate::error::{JwtError, JwtResult};
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;
type HmacSha384 = Hmac<Sha384>;
type HmacSha512 = Hmac<Sha512>;

pub(super) fn sign(algorithm: Algorithm, message: &[u8], secret: &[u8]) -> JwtResult<Vec<u8>> {
    match algorithm {
        Algorithm::HS256 => {
            let mut mac = HmacSha256::new_from_slice(secret).map_err(invalid_length)?;
            mac.update(message);
            Ok(mac.finalize().into_bytes().to_vec())
        }
        Algorithm::HS384 => {
            let mut mac = HmacSha384::new_from_slice(secret).map_err(invalid_length)?;
            mac.update(message);
            Ok(mac.finalize().into_bytes().to_vec())
        }
        Algorithm::HS512 => {
            let mut mac = HmacSha512::new_from_slice(secret).map_err(invalid_length)?;
            mac.update(message);
            Ok(mac.finalize().into_bytes().to_vec())
        }
        other => Err(JwtError::invalid_key(format!(
            "HMAC key cannot be used with {other}"
        ))),
    }
}

/// Recompute the tag and compare in constant time.
pub(super) fn verify(
    algorithm: Algorithm,
    message: &[u8],
    signature: &[u8],
    secret: &[u8],
) -> JwtResult<bool> {
    let expected = sign(algorithm, message, secret)?;
    Ok(expected.ct_eq(signature).into())
}

fn invalid_length(_: hmac::digest::InvalidLength) -> JwtError {
    JwtError::invalid_key("Invalid HMAC key")
}
