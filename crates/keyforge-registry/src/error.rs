//! Error types for the registry layer.

use keyforge_protocol::SessionId;

/// Errors that can occur when reading from a [`SessionStore`](crate::SessionStore).
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// No session is stored under this id. It may never have existed, or
    /// it was created before the process restarted.
    #[error("session {0} not found")]
    SessionNotFound(SessionId),
}
