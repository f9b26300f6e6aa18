//! Unified error type for the Keyforge service.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use keyforge_keys::KeyError;
use keyforge_protocol::ErrorBody;
use keyforge_registry::RegistryError;
use keyforge_token::IssueError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant lets `?` convert sub-crate
/// errors, and [`IntoResponse`] turns any of them into a status code plus
/// an [`ErrorBody`].
#[derive(Debug, thiserror::Error)]
pub enum KeyforgeError {
    /// Key material couldn't be loaded. Only happens at startup.
    #[error(transparent)]
    Keys(#[from] KeyError),

    /// A roster lookup failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// A token wasn't issued.
    #[error(transparent)]
    Issue(#[from] IssueError),

    /// Binding or serving the listener failed.
    #[error("server i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl KeyforgeError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            KeyforgeError::Registry(RegistryError::SessionNotFound(_))
            | KeyforgeError::Issue(IssueError::SessionNotFound(_)) => StatusCode::NOT_FOUND,
            KeyforgeError::Issue(IssueError::UserNotAuthorized { .. }) => StatusCode::FORBIDDEN,
            KeyforgeError::Issue(IssueError::SigningFailed(_))
            | KeyforgeError::Keys(_)
            | KeyforgeError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for KeyforgeError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Server-side details stay in the log.
        let message = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            "internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(ErrorBody::new(status.as_u16(), message))).into_response()
    }
}
