//! The RSA key pair used to sign and verify session tokens.

use std::fmt;
use std::path::Path;

use jsonwebtoken::{DecodingKey, EncodingKey};
use rsa::pkcs1::{EncodeRsaPrivateKey, EncodeRsaPublicKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePublicKey};
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};

use crate::pem::{decode_pem, encode_public_key_pem};
use crate::{KeyError, KeyKind};

/// Opening armor line of the published public key.
pub const PUBLIC_KEY_BEGIN: &str = "-----BEGIN PUBLIC KEY-----";

/// Closing armor line of the published public key.
pub const PUBLIC_KEY_END: &str = "-----END PUBLIC KEY-----";

/// An RSA key pair, loaded once and read-only afterwards.
///
/// Besides the parsed keys it caches everything derived from them: the
/// `jsonwebtoken` signing/verification keys and the published PEM text.
/// There are no `&mut self` methods.
pub struct KeyPair {
    private_key: RsaPrivateKey,
    public_key: RsaPublicKey,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    public_key_pem: String,
}

impl KeyPair {
    /// Loads the key pair from two PEM files.
    ///
    /// `private_path` must hold a PKCS#8 RSA private key and
    /// `public_path` an X.509 SubjectPublicKeyInfo RSA public key.
    ///
    /// # Errors
    /// - [`KeyError::NotFound`] if either file can't be read
    /// - [`KeyError::Malformed`] if either file doesn't decode as an RSA
    ///   key of the expected encoding
    pub fn load(
        private_path: impl AsRef<Path>,
        public_path: impl AsRef<Path>,
    ) -> Result<Self, KeyError> {
        let private_path = private_path.as_ref();
        let public_path = public_path.as_ref();

        let private_pem = read_pem(KeyKind::Private, private_path)?;
        let public_pem = read_pem(KeyKind::Public, public_path)?;
        let pair = Self::from_pem(&private_pem, &public_pem)?;

        tracing::info!(
            private_key = %private_path.display(),
            public_key = %public_path.display(),
            bits = pair.bits(),
            "key pair loaded"
        );
        Ok(pair)
    }

    /// Builds the key pair from PEM text already in memory.
    ///
    /// # Errors
    /// [`KeyError::Malformed`] if either block doesn't decode.
    pub fn from_pem(private_pem: &str, public_pem: &str) -> Result<Self, KeyError> {
        let private_der = decode_pem(KeyKind::Private, private_pem)?;
        let private_key = RsaPrivateKey::from_pkcs8_der(&private_der)
            .map_err(|e| KeyError::malformed(KeyKind::Private, format!("not PKCS#8 RSA: {e}")))?;

        let public_der = decode_pem(KeyKind::Public, public_pem)?;
        let public_key = RsaPublicKey::from_public_key_der(&public_der)
            .map_err(|e| KeyError::malformed(KeyKind::Public, format!("not X.509 SPKI RSA: {e}")))?;

        Self::from_keys(private_key, public_key)
    }

    /// Builds the key pair from already-parsed keys.
    ///
    /// # Errors
    /// [`KeyError::Malformed`] if a key can't be re-encoded (PKCS#1 for
    /// the signer, SPKI for the published PEM).
    pub fn from_keys(
        private_key: RsaPrivateKey,
        public_key: RsaPublicKey,
    ) -> Result<Self, KeyError> {
        if private_key.to_public_key() != public_key {
            // Tokens signed with this pair won't verify against the
            // published key.
            tracing::warn!("public key does not match the private key");
        }

        let private_pkcs1 = private_key
            .to_pkcs1_der()
            .map_err(|e| KeyError::malformed(KeyKind::Private, e))?;
        let public_pkcs1 = public_key
            .to_pkcs1_der()
            .map_err(|e| KeyError::malformed(KeyKind::Public, e))?;
        let public_spki = public_key
            .to_public_key_der()
            .map_err(|e| KeyError::malformed(KeyKind::Public, e))?;

        Ok(Self {
            encoding_key: EncodingKey::from_rsa_der(private_pkcs1.as_bytes()),
            decoding_key: DecodingKey::from_rsa_der(public_pkcs1.as_bytes()),
            public_key_pem: encode_public_key_pem(public_spki.as_bytes()),
            private_key,
            public_key,
        })
    }

    /// The private key, for signing.
    pub fn private_key(&self) -> &RsaPrivateKey {
        &self.private_key
    }

    /// The public key, for verification and export.
    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public_key
    }

    /// Signing key in the form `jsonwebtoken` expects.
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    /// Verification key in the form `jsonwebtoken` expects.
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }

    /// The public key as published to relying parties:
    ///
    /// ```text
    /// -----BEGIN PUBLIC KEY-----
    /// <base64 SPKI DER on one line>
    /// -----END PUBLIC KEY-----
    /// ```
    ///
    /// No trailing newline. Same key, same bytes.
    pub fn public_key_pem(&self) -> &str {
        &self.public_key_pem
    }

    /// Modulus size in bits.
    pub fn bits(&self) -> usize {
        self.public_key.size() * 8
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("bits", &self.bits())
            .field("private_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

/// Builds a verification key from published public key text alone.
///
/// Relying parties that only have the output of
/// [`KeyPair::public_key_pem`] use this to check tokens.
///
/// # Errors
/// [`KeyError::Malformed`] if the text isn't an SPKI RSA public key.
pub fn decoding_key_from_public_pem(public_pem: &str) -> Result<DecodingKey, KeyError> {
    let der = decode_pem(KeyKind::Public, public_pem)?;
    let public_key = RsaPublicKey::from_public_key_der(&der)
        .map_err(|e| KeyError::malformed(KeyKind::Public, format!("not X.509 SPKI RSA: {e}")))?;
    let pkcs1 = public_key
        .to_pkcs1_der()
        .map_err(|e| KeyError::malformed(KeyKind::Public, e))?;
    Ok(DecodingKey::from_rsa_der(pkcs1.as_bytes()))
}

fn read_pem(kind: KeyKind, path: &Path) -> Result<String, KeyError> {
    let bytes = std::fs::read(path).map_err(|source| KeyError::NotFound {
        kind,
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|_| KeyError::malformed(kind, "file is not UTF-8 text"))
}
