//! The token issuance engine.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, Header};
use keyforge_keys::KeyPair;
use keyforge_protocol::{SessionId, UserIdentity};
use keyforge_registry::SessionStore;

use crate::{IssueError, SessionClaims};

/// Issues signed session tokens for users on a session's roster.
///
/// The issuer borrows two shared resources and owns nothing persistent:
///
/// - the key pair (read-only, no lock needed),
/// - the session store (which does its own locking).
///
/// Issuance never writes to the store. Every method is synchronous, so
/// it can be called straight from any number of request tasks.
///
/// `S` defaults to `dyn SessionStore`, so `TokenIssuer` on its own names
/// an issuer over a boxed-up store.
pub struct TokenIssuer<S: SessionStore + ?Sized = dyn SessionStore> {
    keys: Arc<KeyPair>,
    sessions: Arc<S>,
    header: Header,
}

impl<S: SessionStore + ?Sized> TokenIssuer<S> {
    /// Creates an issuer over the given key pair and store.
    pub fn new(keys: Arc<KeyPair>, sessions: Arc<S>) -> Self {
        Self {
            keys,
            sessions,
            // `{"typ":"JWT","alg":"RS256"}`
            header: Header::new(Algorithm::RS256),
        }
    }

    /// Registers a new session with the given roster and returns its id.
    pub fn create_session(&self, users: Vec<UserIdentity>) -> SessionId {
        self.sessions.create_session(users)
    }

    /// The published public key text (see [`KeyPair::public_key_pem`]).
    pub fn public_key_pem(&self) -> &str {
        self.keys.public_key_pem()
    }

    /// Issues a token for `user` in `session_id`, stamped with the
    /// current time.
    ///
    /// # Errors
    /// - [`IssueError::SessionNotFound`]: no such session
    /// - [`IssueError::UserNotAuthorized`]: `user` isn't on the roster
    /// - [`IssueError::SigningFailed`]: the key pair couldn't sign
    pub fn issue(&self, session_id: &SessionId, user: &UserIdentity) -> Result<String, IssueError> {
        self.issue_at(session_id, user, Utc::now())
    }

    /// Same as [`issue`](Self::issue) with an explicit issue time.
    pub fn issue_at(
        &self,
        session_id: &SessionId,
        user: &UserIdentity,
        now: DateTime<Utc>,
    ) -> Result<String, IssueError> {
        // 1. Lookup
        let roster = self.sessions.roster(session_id)?;

        // 2. Authorize
        let Some(member) = find_member(&roster, user) else {
            tracing::info!(%session_id, user_id = %user.id, "token refused: user not on roster");
            return Err(IssueError::UserNotAuthorized {
                session_id: session_id.clone(),
                user_id: user.id.clone(),
            });
        };

        // 3. Issue
        let claims = SessionClaims::new(member.display_name.clone(), session_id.clone(), now);
        let token = jsonwebtoken::encode(&self.header, &claims, self.keys.encoding_key())
            .map_err(|e| {
                tracing::error!(%session_id, error = %e, "token signing failed");
                IssueError::SigningFailed(e.to_string())
            })?;

        tracing::info!(%session_id, user_id = %member.id, exp = claims.exp, "token issued");
        Ok(token)
    }

    /// The key pair this issuer signs with.
    pub fn keys(&self) -> &KeyPair {
        &self.keys
    }

    /// The store this issuer reads rosters from.
    pub fn sessions(&self) -> &S {
        &self.sessions
    }
}

/// First roster entry equal to `user` (same id AND display name).
///
/// A plain linear scan: rosters are short, and with duplicates allowed
/// the first match is the one that counts.
fn find_member<'r>(roster: &'r [UserIdentity], user: &UserIdentity) -> Option<&'r UserIdentity> {
    roster.iter().find(|member| *member == user)
}
