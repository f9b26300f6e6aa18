//! # Keyforge
//!
//! Session token service for multiplayer web games.
//!
//! A game backend registers a session with its roster of players, then
//! each player asks for a token. Keyforge checks the player against the
//! roster and, if they're on it, hands back an RS256 JWT naming them and
//! the session. Game servers verify those tokens offline with the public
//! key published at `GET /api/public-key`.
//!
//! The crate ties the layers together:
//! keys ([`keyforge_keys`]) → registry ([`keyforge_registry`]) →
//! issuance ([`keyforge_token`]) → HTTP (this crate).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use keyforge::prelude::*;
//!
//! # async fn start() -> Result<(), KeyforgeError> {
//! let keys = KeyPair::load("keys/private.pem", "keys/public.pem")?;
//! let server = KeyforgeServer::builder()
//!     .bind("0.0.0.0:8080")
//!     .build(keys)
//!     .await?;
//! server.run().await
//! # }
//! ```

pub mod config;
mod error;
mod handler;
mod server;

pub use error::KeyforgeError;
pub use server::{AppState, KeyforgeServer, KeyforgeServerBuilder, router};

/// The names most callers need, in one import.
pub mod prelude {
    pub use crate::{AppState, KeyforgeError, KeyforgeServer, KeyforgeServerBuilder, router};
    pub use keyforge_keys::{KeyError, KeyPair};
    pub use keyforge_protocol::{
        CreateSessionRequest, ErrorBody, IssueTokenRequest, SessionId, UserIdentity,
    };
    pub use keyforge_registry::{InMemorySessionStore, SessionStore};
    pub use keyforge_token::{IssueError, SessionClaims, TokenIssuer, TokenVerifier, VerifyError};
}
