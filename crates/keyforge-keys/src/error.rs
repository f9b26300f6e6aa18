//! Error types for key loading.

use std::fmt;
use std::path::PathBuf;

/// Which half of the key pair an error is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Private,
    Public,
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyKind::Private => f.write_str("private key"),
            KeyKind::Public => f.write_str("public key"),
        }
    }
}

/// Errors that can occur while loading key material.
///
/// Both variants are fatal at startup: there is no retry and no lazy
/// reload.
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    /// The key file could not be read.
    #[error("{kind} not found at {}: {source}", path.display())]
    NotFound {
        kind: KeyKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but does not hold an RSA key in the expected
    /// encoding (bad armor, bad base64, or DER that isn't PKCS#8 / SPKI).
    #[error("{kind} is malformed: {reason}")]
    Malformed { kind: KeyKind, reason: String },
}

impl KeyError {
    pub(crate) fn malformed(kind: KeyKind, reason: impl fmt::Display) -> Self {
        KeyError::Malformed {
            kind,
            reason: reason.to_string(),
        }
    }
}
