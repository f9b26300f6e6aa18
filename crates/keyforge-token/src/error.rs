//! Error types for token issuance and verification.

use keyforge_keys::KeyError;
use keyforge_protocol::SessionId;
use keyforge_registry::RegistryError;

/// Why a token was not issued.
///
/// "No such session" and "you're not in this session" are kept apart so
/// clients can tell them apart too.
#[derive(Debug, thiserror::Error)]
pub enum IssueError {
    /// The session id isn't in the registry.
    #[error("session {0} not found")]
    SessionNotFound(SessionId),

    /// The session exists but the asserted identity is not on its roster.
    #[error("user {user_id} is not authorized to participate in session {session_id}")]
    UserNotAuthorized {
        session_id: SessionId,
        user_id: String,
    },

    /// Authorization passed but the signature could not be produced.
    /// Points at broken key state; retrying won't help.
    #[error("failed to sign token: {0}")]
    SigningFailed(String),
}

impl From<RegistryError> for IssueError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::SessionNotFound(session_id) => IssueError::SessionNotFound(session_id),
        }
    }
}

/// Why a token failed verification.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    /// The signature doesn't match the public key.
    #[error("invalid token signature")]
    InvalidSignature,

    /// The token's `exp` is in the past.
    #[error("token has expired")]
    Expired,

    /// Not a well-formed RS256 token with the expected claims.
    #[error("malformed token: {0}")]
    Malformed(String),

    /// The public key given to the verifier couldn't be loaded.
    #[error(transparent)]
    Key(#[from] KeyError),
}

impl From<jsonwebtoken::errors::Error> for VerifyError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;
        match err.kind() {
            ErrorKind::InvalidSignature => VerifyError::InvalidSignature,
            ErrorKind::ExpiredSignature => VerifyError::Expired,
            _ => VerifyError::Malformed(err.to_string()),
        }
    }
}
