//! Authorization header extraction

use tessera_jwt::{JwtError, bearer_token};

#[test]
fn test_extracts_bearer_token() {
    assert_eq!(bearer_token("Bearer abc.def.ghi"), Ok("abc.def.ghi"));
    assert_eq!(bearer_token("bearer abc.def.ghi"), Ok("abc.def.ghi"));
    assert_eq!(bearer_token("  BEARER   abc.def.ghi  "), Ok("abc.def.ghi"));
}

#[test]
fn test_rejects_other_schemes_and_empty_tokens() {
    for value in ["", "Bearer", "Bearer   ", "Basic dXNlcjpwYXNz", "abc.def.ghi"] {
        assert!(
            matches!(bearer_token(value), Err(JwtError::Malformed(_))),
            "{value:?} should be rejected"
        );
    }
}
