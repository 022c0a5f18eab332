//! Compact JSON Web Token issuance and verification
//!
//! Tokens are `base64url(header).base64url(payload).base64url(signature)`
//! with no padding. Keys are passed explicitly to every call; nothing is
//! held in global state, so issuers and verifiers are safe to share across
//! threads.
//!
//! - HS256/384/512, RS256/384/512, ES256/384 behind a closed [`Algorithm`] enum
//! - Caller-supplied algorithm allow-list on verification
//! - Constant-time HMAC comparison
//! - Injectable [`Clock`] for deterministic issuance

mod algorithm;
mod bearer;
pub mod claims;
mod clock;
pub mod codec;
pub mod crypto;
mod error;
mod futures;
mod issuer;
pub mod keys;
mod types;
mod validation;
mod verifier;

pub use algorithm::{Algorithm, AlgorithmFamily};
pub use bearer::bearer_token;
pub use claims::{Claims, ClaimsBuilder};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{JwtError, JwtResult};
pub use futures::AsyncJwtResult;
pub use issuer::{Issuer, issue};
pub use keys::{Key, recommended_key_size};
pub use types::{Header, Token};
pub use validation::ValidationOptions;
pub use verifier::{Verifier, decode_header, verify};
