//! Token verification for relying parties.

use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use keyforge_keys::{KeyPair, decoding_key_from_public_pem};

use crate::{SessionClaims, VerifyError};

/// Checks session tokens against the service's public key.
///
/// Only RS256 is accepted, `exp` must be present and in the future (with
/// `jsonwebtoken`'s default 60s leeway), and `sub` must be present.
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Verifier for tokens signed by `keys`.
    pub fn new(keys: &KeyPair) -> Self {
        Self::with_key(keys.decoding_key().clone())
    }

    /// Verifier built from the text served at `GET /api/public-key`.
    ///
    /// # Errors
    /// [`VerifyError::Key`] if the text isn't an RSA public key.
    pub fn from_public_key_pem(public_pem: &str) -> Result<Self, VerifyError> {
        Ok(Self::with_key(decoding_key_from_public_pem(public_pem)?))
    }

    fn with_key(key: DecodingKey) -> Self {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_required_spec_claims(&["exp", "sub"]);
        Self { key, validation }
    }

    /// Verifies `token` and returns its claims.
    ///
    /// # Errors
    /// - [`VerifyError::InvalidSignature`]: not signed by this key
    /// - [`VerifyError::Expired`]: past `exp`
    /// - [`VerifyError::Malformed`]: anything else (bad segments, wrong
    ///   algorithm, missing claims)
    pub fn verify(&self, token: &str) -> Result<SessionClaims, VerifyError> {
        let data = jsonwebtoken::decode::<SessionClaims>(token, &self.key, &self.validation)?;
        Ok(data.claims)
    }
}
