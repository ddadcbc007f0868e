use crate::tests::TEST_SECRET;
use crate::{AuthError, Claims, TokenCodec};

use googletest::prelude::*;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};

fn codec() -> TokenCodec {
    TokenCodec::new(TEST_SECRET).unwrap()
}

fn admin_roles() -> Vec<String> {
    vec!["ROLE_ADMIN".to_string()]
}

#[test]
fn given_fresh_token_when_verified_then_returns_subject_and_roles() {
    let codec = codec();
    let token = codec.issue("admin", &admin_roles(), 3600).unwrap();

    let claims = codec.verify(&token).unwrap();

    assert_that!(claims.sub, eq("admin"));
    assert_that!(claims.roles, eq(&admin_roles()));
    assert_that!(claims.exp - claims.iat, eq(3600));
}

#[test]
fn given_one_second_before_expiry_when_verified_then_succeeds() {
    let codec = codec();
    let issued_at = 1_700_000_000;
    let token = codec.issue_at("admin", &admin_roles(), 60, issued_at).unwrap();

    let result = codec.verify_at(&token, issued_at + 59);

    assert_that!(result, ok(anything()));
}

#[test]
fn given_exact_expiry_when_verified_then_token_expired() {
    let codec = codec();
    let issued_at = 1_700_000_000;
    let token = codec.issue_at("admin", &admin_roles(), 60, issued_at).unwrap();

    let result = codec.verify_at(&token, issued_at + 60);

    assert!(matches!(result, Err(AuthError::TokenExpired { .. })));
}

#[test]
fn given_one_second_after_expiry_when_verified_then_token_expired() {
    let codec = codec();
    let issued_at = 1_700_000_000;
    let token = codec.issue_at("admin", &admin_roles(), 60, issued_at).unwrap();

    let result = codec.verify_at(&token, issued_at + 61);

    assert!(matches!(result, Err(AuthError::TokenExpired { .. })));
}

#[test]
fn given_any_tampered_character_when_verified_then_fails() {
    let codec = codec();
    let token = codec.issue("member", &["ROLE_USER".to_string()], 3600).unwrap();

    for (index, original) in token.char_indices() {
        if original == '.' {
            continue;
        }
        let replacement = if original == 'A' { 'B' } else { 'A' };
        let mut tampered = token.clone();
        tampered.replace_range(index..index + 1, &replacement.to_string());

        let result = codec.verify(&tampered);

        assert!(result.is_err(), "tampering position {} was accepted", index);
    }
}

#[test]
fn given_token_signed_with_other_secret_when_verified_then_invalid_token() {
    let other = TokenCodec::new(b"another-secret-key-at-least-32-bytes").unwrap();
    let token = other.issue("admin", &admin_roles(), 3600).unwrap();

    let result = codec().verify(&token);

    assert!(matches!(result, Err(AuthError::InvalidToken { .. })));
}

#[test]
fn given_malformed_token_when_verified_then_decode_error() {
    let result = codec().verify("not.a.valid.jwt.token");

    assert!(matches!(result, Err(AuthError::JwtDecode { .. })));
    assert!(result.unwrap_err().is_token_rejection());
}

#[test]
fn given_token_without_roles_claim_when_verified_then_roles_empty() {
    #[derive(serde::Serialize)]
    struct Bare {
        sub: String,
        iat: i64,
        exp: i64,
    }
    let now = chrono::Utc::now().timestamp();
    let token = encode(
        &Header::new(Algorithm::HS256),
        &Bare {
            sub: "legacy".to_string(),
            iat: now,
            exp: now + 60,
        },
        &EncodingKey::from_secret(TEST_SECRET),
    )
    .unwrap();

    let claims: Claims = codec().verify(&token).unwrap();

    assert_that!(claims.roles, is_empty());
}

#[test]
fn given_missing_secret_when_codec_created_then_configuration_error() {
    let result = TokenCodec::from_secret(None);

    assert!(matches!(result, Err(AuthError::Configuration { .. })));
}

#[test]
fn given_short_secret_when_codec_created_then_configuration_error() {
    let result = TokenCodec::new(b"too-short");

    assert!(matches!(result, Err(AuthError::Configuration { .. })));
}
