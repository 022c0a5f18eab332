//! Property tests for issuance and tamper detection

use proptest::prelude::*;
use std::collections::BTreeMap;
use tessera_jwt::{Algorithm, Claims, FixedClock, Issuer, JwtError, Key, ValidationOptions, Verifier};

const NOW: i64 = 1_700_000_000;
const BASE64URL: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

fn claims_from(entries: &BTreeMap<String, String>) -> Claims {
    let mut claims = Claims::new();
    for (name, value) in entries {
        claims.insert(name.as_str(), value.as_str());
    }
    claims
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_issue_verify_roundtrip(
        secret in proptest::collection::vec(any::<u8>(), 32..96),
        entries in proptest::collection::btree_map("x_[a-z0-9_]{1,12}", ".{0,32}", 0..8),
        ttl in 1i64..100_000,
    ) {
        let key = Key::hmac(secret);
        let claims = claims_from(&entries);

        let token = Issuer::new()
            .with_clock(FixedClock(NOW))
            .issue(&claims, &key, Algorithm::HS256, ttl)
            .expect("issuance should succeed");

        let verified = Verifier::new(ValidationOptions::default())
            .with_clock(FixedClock(NOW))
            .verify(token.as_str(), &key);
        prop_assert!(verified.is_ok(), "verification failed: {:?}", verified.err());
        let mut verified = verified.expect("checked above");

        prop_assert_eq!(verified.remove("exp"), Some(serde_json::Value::from(NOW + ttl)));
        prop_assert_eq!(verified.remove("iat"), Some(serde_json::Value::from(NOW)));
        prop_assert_eq!(verified, claims);
    }

    #[test]
    fn test_single_character_tamper_is_rejected(
        entries in proptest::collection::btree_map("x_[a-z]{1,8}", "[a-z]{0,16}", 1..4),
        position in any::<prop::sample::Index>(),
        replacement in any::<prop::sample::Index>(),
    ) {
        let key = Key::hmac(b"property-test-secret-0123456789abcdef".to_vec());
        let token = Issuer::new()
            .with_clock(FixedClock(NOW))
            .issue(&claims_from(&entries), &key, Algorithm::HS256, 600)
            .expect("issuance should succeed")
            .into_string();

        let editable: Vec<usize> = token
            .char_indices()
            .filter(|&(_, c)| c != '.')
            .map(|(i, _)| i)
            .collect();
        let at = editable[position.index(editable.len())];
        let original = token.as_bytes()[at];
        let candidates: Vec<u8> = BASE64URL.iter().copied().filter(|&b| b != original).collect();
        let substitute = candidates[replacement.index(candidates.len())];

        let mut bytes = token.into_bytes();
        bytes[at] = substitute;
        let tampered = String::from_utf8(bytes).expect("base64url stays ASCII");

        let result = Verifier::new(ValidationOptions::default())
            .with_clock(FixedClock(NOW))
            .verify(&tampered, &key);

        prop_assert!(
            matches!(
                result,
                Err(JwtError::Malformed(_)
                    | JwtError::InvalidSignature
                    | JwtError::UnsupportedAlgorithm(_))
            ),
            "tampered token gave {:?}",
            result
        );
    }

    #[test]
    fn test_algorithm_names_parse_back(index in 0usize..Algorithm::ALL.len()) {
        let algorithm = Algorithm::ALL[index];
        prop_assert_eq!(algorithm.as_str().parse::<Algorithm>(), Ok(algorithm));
        prop_assert!(algorithm.as_str().to_lowercase().parse::<Algorithm>().is_err());
    }
}
