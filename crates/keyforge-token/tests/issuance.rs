//! End-to-end tests for issuing and verifying session tokens.

use std::sync::Arc;
use std::thread;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{Duration, Utc};
use jsonwebtoken::Algorithm;
use keyforge_keys::KeyPair;
use keyforge_protocol::{SessionId, UserIdentity};
use keyforge_registry::{InMemorySessionStore, SessionStore, generate_session_id};
use keyforge_token::{IssueError, TOKEN_TTL_SECS, TokenIssuer, TokenVerifier, VerifyError};

const PRIVATE_PEM: &str = include_str!("../../keyforge-keys/testdata/private.pem");
const PUBLIC_PEM: &str = include_str!("../../keyforge-keys/testdata/public.pem");
const OTHER_PUBLIC_PEM: &str = include_str!("../../keyforge-keys/testdata/other_public.pem");

// =========================================================================
// Helpers
// =========================================================================

fn keys() -> Arc<KeyPair> {
    Arc::new(KeyPair::from_pem(PRIVATE_PEM, PUBLIC_PEM).expect("fixture keys load"))
}

fn issuer() -> TokenIssuer<InMemorySessionStore> {
    TokenIssuer::new(keys(), Arc::new(InMemorySessionStore::new()))
}

fn alice() -> UserIdentity {
    UserIdentity::new("u1", "Alice")
}

fn bob() -> UserIdentity {
    UserIdentity::new("u2", "Bob")
}

fn decode_segment(segment: &str) -> serde_json::Value {
    let bytes = URL_SAFE_NO_PAD.decode(segment).expect("segment is unpadded base64url");
    serde_json::from_slice(&bytes).expect("segment is JSON")
}

// =========================================================================
// The create → issue → refuse scenario
// =========================================================================

#[test]
fn test_scenario_alice_gets_token_eve_refused_unknown_session_not_found() {
    let issuer = issuer();
    let session_id = issuer.create_session(vec![alice(), bob()]);

    let token = issuer.issue(&session_id, &alice()).expect("alice is on the roster");
    let claims = TokenVerifier::new(issuer.keys()).verify(&token).unwrap();
    assert_eq!(claims.sub, "Alice");
    assert_eq!(claims.session_id, session_id);

    let eve = issuer.issue(&session_id, &UserIdentity::new("u3", "Eve"));
    assert!(matches!(eve, Err(IssueError::UserNotAuthorized { .. })), "got {eve:?}");

    let unknown = issuer.issue(&generate_session_id(), &alice());
    assert!(matches!(unknown, Err(IssueError::SessionNotFound(_))), "got {unknown:?}");
}

#[test]
fn test_unknown_session_never_reports_user_not_authorized() {
    let issuer = issuer();
    issuer.create_session(vec![alice()]);

    for user in [alice(), UserIdentity::new("u3", "Eve")] {
        let result = issuer.issue(&SessionId::from("no-such-game"), &user);
        assert!(matches!(result, Err(IssueError::SessionNotFound(_))), "got {result:?}");
    }
}

#[test]
fn test_issue_succeeds_iff_user_is_on_roster() {
    let issuer = issuer();
    let roster = vec![alice(), bob(), alice()];
    let session_id = issuer.create_session(roster.clone());

    let candidates = [
        alice(),
        bob(),
        UserIdentity::new("u1", "Bob"),
        UserIdentity::new("u2", "Alice"),
        UserIdentity::new("", ""),
        UserIdentity::new("u1", "Alice "),
    ];
    for user in candidates {
        let result = issuer.issue(&session_id, &user);
        if roster.contains(&user) {
            assert!(result.is_ok(), "{user} should be issued a token");
        } else {
            assert!(
                matches!(result, Err(IssueError::UserNotAuthorized { .. })),
                "{user} should be refused, got {result:?}"
            );
        }
    }
}

// =========================================================================
// Token shape
// =========================================================================

#[test]
fn test_token_header_and_claims_shape() {
    let issuer = issuer();
    let session_id = issuer.create_session(vec![bob()]);
    let now = Utc::now();

    let token = issuer.issue_at(&session_id, &bob(), now).unwrap();

    let segments: Vec<&str> = token.split('.').collect();
    assert_eq!(segments.len(), 3);
    assert!(segments.iter().all(|s| !s.is_empty() && !s.contains('=')));

    let header = jsonwebtoken::decode_header(&token).unwrap();
    assert_eq!(header.alg, Algorithm::RS256);
    assert_eq!(header.typ.as_deref(), Some("JWT"));

    let payload = decode_segment(segments[1]);
    assert_eq!(
        payload,
        serde_json::json!({
            "sub": "Bob",
            "sessionId": session_id.as_str(),
            "iat": now.timestamp(),
            "exp": now.timestamp() + TOKEN_TTL_SECS,
        })
    );
}

#[test]
fn test_token_expiry_is_exactly_one_hour_after_issue() {
    let issuer = issuer();
    let session_id = issuer.create_session(vec![alice()]);

    let token = issuer.issue(&session_id, &alice()).unwrap();
    let claims = TokenVerifier::new(issuer.keys()).verify(&token).unwrap();

    assert_eq!(claims.exp - claims.iat, 3600);
    let drift = (Utc::now().timestamp() - claims.iat).abs();
    assert!(drift <= 5, "iat should be close to now, drift {drift}s");
}

// =========================================================================
// Verification
// =========================================================================

#[test]
fn test_token_verifies_against_published_public_key() {
    let issuer = issuer();
    let session_id = issuer.create_session(vec![alice()]);
    let token = issuer.issue(&session_id, &alice()).unwrap();

    let verifier = TokenVerifier::from_public_key_pem(issuer.public_key_pem()).unwrap();

    assert_eq!(verifier.verify(&token).unwrap().sub, "Alice");
}

#[test]
fn test_token_rejected_by_unrelated_key() {
    let issuer = issuer();
    let session_id = issuer.create_session(vec![alice()]);
    let token = issuer.issue(&session_id, &alice()).unwrap();

    let verifier = TokenVerifier::from_public_key_pem(OTHER_PUBLIC_PEM).unwrap();

    assert!(matches!(verifier.verify(&token), Err(VerifyError::InvalidSignature)));
}

#[test]
fn test_tampered_payload_fails_signature_check() {
    let issuer = issuer();
    let session_id = issuer.create_session(vec![alice()]);
    let token = issuer.issue(&session_id, &alice()).unwrap();
    let segments: Vec<&str> = token.split('.').collect();

    let mut payload = decode_segment(segments[1]);
    payload["sub"] = serde_json::json!("Mallory");
    let forged_payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&payload).unwrap());
    let forged = format!("{}.{}.{}", segments[0], forged_payload, segments[2]);

    let result = TokenVerifier::new(issuer.keys()).verify(&forged);

    assert!(matches!(result, Err(VerifyError::InvalidSignature)), "got {result:?}");
}

#[test]
fn test_expired_token_is_rejected() {
    let issuer = issuer();
    let session_id = issuer.create_session(vec![alice()]);
    let two_hours_ago = Utc::now() - Duration::hours(2);

    let token = issuer.issue_at(&session_id, &alice(), two_hours_ago).unwrap();

    assert!(matches!(
        TokenVerifier::new(issuer.keys()).verify(&token),
        Err(VerifyError::Expired)
    ));
}

#[test]
fn test_garbage_token_is_malformed() {
    let verifier = TokenVerifier::new(&keys());

    for token in ["", "abc", "a.b", "not.a.token"] {
        assert!(
            matches!(verifier.verify(token), Err(VerifyError::Malformed(_))),
            "{token:?} should be malformed"
        );
    }
}

#[test]
fn test_verifier_rejects_non_key_text() {
    assert!(matches!(
        TokenVerifier::from_public_key_pem("hello"),
        Err(VerifyError::Key(_))
    ));
}

// =========================================================================
// Concurrency
// =========================================================================

#[test]
fn test_parallel_issue_and_create() {
    let issuer = Arc::new(issuer());
    let shared = issuer.create_session(vec![alice(), bob()]);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let issuer = Arc::clone(&issuer);
            let shared = shared.clone();
            thread::spawn(move || {
                let own = issuer.create_session(vec![UserIdentity::new(format!("p{i}"), "Player")]);
                let user = if i % 2 == 0 { alice() } else { bob() };
                let token = issuer.issue(&shared, &user).expect("member of shared session");
                assert!(issuer.issue(&own, &alice()).is_err());
                (own, token)
            })
        })
        .collect();

    let verifier = TokenVerifier::new(issuer.keys());
    for handle in handles {
        let (own, token) = handle.join().expect("worker panicked");
        assert!(issuer.sessions().roster(&own).is_ok());
        assert_eq!(verifier.verify(&token).unwrap().session_id, shared);
    }
    assert_eq!(issuer.sessions().len(), 9);
}
