//! Unit tests for the token codec

use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::clock::{Clock, ManualClock};
use crate::domain::entities::token::TokenKind;
use crate::errors::TokenError;
use crate::services::token::{TokenCodec, TokenServiceConfig};

fn create_test_codec() -> (TokenCodec, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let codec = TokenCodec::new(&TokenServiceConfig::default(), clock.clone());
    (codec, clock)
}

/// Rewrites the `sub` claim without re-signing
fn tamper_subject(token: &str, subject: Uuid) -> String {
    let parts: Vec<&str> = token.split('.').collect();
    let payload = URL_SAFE_NO_PAD.decode(parts[1]).unwrap();
    let mut claims: serde_json::Value = serde_json::from_slice(&payload).unwrap();
    claims["sub"] = serde_json::Value::String(subject.to_string());
    let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap());
    format!("{}.{}.{}", parts[0], payload, parts[2])
}

#[test]
fn test_issue_and_verify_both_domains() {
    let (codec, _) = create_test_codec();
    let user_id = Uuid::new_v4();

    let access = codec.issue(user_id, TokenKind::Access, Duration::minutes(10)).unwrap();
    let refresh = codec.issue(user_id, TokenKind::Refresh, Duration::hours(1)).unwrap();

    assert_ne!(access, refresh);
    assert_eq!(codec.verify(&access, TokenKind::Access).unwrap(), user_id);
    assert_eq!(codec.verify(&refresh, TokenKind::Refresh).unwrap(), user_id);
}

#[test]
fn test_embedded_expiry_matches_lifetime() {
    let (codec, clock) = create_test_codec();
    let token = codec
        .issue(Uuid::new_v4(), TokenKind::Access, Duration::minutes(10))
        .unwrap();

    let claims = codec.decode_claims(&token, TokenKind::Access).unwrap();
    assert_eq!(claims.exp, (clock.now() + Duration::minutes(10)).timestamp());
    assert_eq!(claims.typ, TokenKind::Access);
    assert_eq!(claims.iss, "fundhub");
}

#[test]
fn test_token_expires_at_lifetime_boundary() {
    let (codec, clock) = create_test_codec();
    let user_id = Uuid::new_v4();
    let token = codec.issue(user_id, TokenKind::Access, Duration::minutes(10)).unwrap();

    clock.advance(Duration::seconds(599));
    assert_eq!(codec.verify(&token, TokenKind::Access).unwrap(), user_id);

    clock.advance(Duration::seconds(1));
    assert_eq!(
        codec.verify(&token, TokenKind::Access),
        Err(TokenError::TokenExpired)
    );
}

#[test]
fn test_cross_domain_token_is_invalid() {
    let (codec, _) = create_test_codec();
    let access = codec
        .issue(Uuid::new_v4(), TokenKind::Access, Duration::minutes(10))
        .unwrap();

    let err = codec.verify(&access, TokenKind::Refresh).unwrap_err();
    assert_eq!(err, TokenError::InvalidSignature);
    assert!(!err.is_expired());
}

#[test]
fn test_cross_domain_token_rejected_with_shared_secret() {
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let config = TokenServiceConfig {
        refresh_secret: "shared".to_string(),
        access_secret: "shared".to_string(),
        ..Default::default()
    };
    let codec = TokenCodec::new(&config, clock);

    let refresh = codec
        .issue(Uuid::new_v4(), TokenKind::Refresh, Duration::hours(1))
        .unwrap();
    assert_eq!(
        codec.verify(&refresh, TokenKind::Access),
        Err(TokenError::InvalidClaims)
    );
}

#[test]
fn test_tampered_token_fails_signature() {
    let (codec, _) = create_test_codec();
    let token = codec
        .issue(Uuid::new_v4(), TokenKind::Access, Duration::minutes(10))
        .unwrap();

    let forged = tamper_subject(&token, Uuid::new_v4());
    assert_eq!(
        codec.verify(&forged, TokenKind::Access),
        Err(TokenError::InvalidSignature)
    );
}

#[test]
fn test_signature_checked_before_expiry() {
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let foreign = TokenCodec::new(
        &TokenServiceConfig {
            access_secret: "someone-else".to_string(),
            ..Default::default()
        },
        clock.clone(),
    );
    let codec = TokenCodec::new(&TokenServiceConfig::default(), clock.clone());

    let token = foreign
        .issue(Uuid::new_v4(), TokenKind::Access, Duration::minutes(10))
        .unwrap();
    clock.advance(Duration::hours(1));

    assert_eq!(
        codec.verify(&token, TokenKind::Access),
        Err(TokenError::InvalidSignature)
    );
}

#[test]
fn test_foreign_issuer_is_invalid() {
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let other = TokenCodec::new(
        &TokenServiceConfig {
            issuer: "someone-else".to_string(),
            ..Default::default()
        },
        clock.clone(),
    );
    let codec = TokenCodec::new(&TokenServiceConfig::default(), clock);

    let token = other
        .issue(Uuid::new_v4(), TokenKind::Access, Duration::minutes(10))
        .unwrap();
    assert_eq!(
        codec.verify(&token, TokenKind::Access),
        Err(TokenError::InvalidClaims)
    );
}

#[test]
fn test_malformed_token_is_invalid() {
    let (codec, _) = create_test_codec();
    for token in ["", "not-a-jwt", "a.b.c"] {
        let err = codec.verify(token, TokenKind::Access).unwrap_err();
        assert!(!err.is_expired(), "{token:?} reported as expired");
    }
    assert_eq!(
        codec.verify("not-a-jwt", TokenKind::Access),
        Err(TokenError::InvalidTokenFormat)
    );
}
