//! Core data types shared across Keyforge.
//!
//! Everything here is either an identifier, a request body that arrives
//! over HTTP, or the error body that goes back out. All of them derive
//! serde so the boundary can (de)serialize them without glue code.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A user as the caller presents them: an opaque external id plus the
/// name shown to other players.
///
/// Two identities are equal only when BOTH fields match exactly. That is
/// the rule the token engine uses to decide whether a caller is on a
/// session's roster, so `PartialEq` is derived rather than hand-written
/// (no case folding, no trimming).
///
/// `#[serde(rename_all = "camelCase")]` maps `display_name` to the
/// `displayName` key the clients send.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    /// Stable external identifier.
    pub id: String,

    /// Display name; becomes the `sub` claim of issued tokens.
    pub display_name: String,
}

impl UserIdentity {
    /// Creates an identity from anything string-like.
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}

impl fmt::Display for UserIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_name, self.id)
    }
}

/// Identifier of a game session.
///
/// A newtype over `String` so a session id can't be passed where a user
/// id is expected. Ids minted by the registry are canonical UUID strings,
/// but callers may present anything; lookups compare the raw text.
///
/// `#[serde(transparent)]` keeps the JSON form a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Wraps a raw session id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the id and returns the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SessionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// The ordered list of users allowed to request tokens for a session.
///
/// Stored as a shared immutable slice: the registry publishes a fully
/// built roster once, and every lookup hands out a cheap clone of the
/// same allocation. Order is the order the caller supplied; duplicates
/// are kept.
pub type Roster = Arc<[UserIdentity]>;

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Body of `POST /api/create-session`.
///
/// ```json
/// { "users": [ { "id": "u1", "displayName": "Alice" } ] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    /// Initial roster, in order.
    pub users: Vec<UserIdentity>,
}

/// Body of `POST /api/issue-token`.
///
/// ```json
/// { "sessionId": "…", "user": { "id": "u1", "displayName": "Alice" } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueTokenRequest {
    /// Session the caller wants a token for.
    pub session_id: SessionId,

    /// The identity the caller asserts.
    pub user: UserIdentity,
}

// ---------------------------------------------------------------------------
// Errors on the wire
// ---------------------------------------------------------------------------

/// Body returned with every non-2xx response.
///
/// `code` mirrors the HTTP status (404 = no such session, 403 = not on
/// the roster, 500 = signing failed), so clients that only look at the
/// body can still tell the failure kinds apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: u16,
    pub message: String,
}

impl ErrorBody {
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
