//! The claim set carried by every issued token.

use chrono::{DateTime, Utc};
use keyforge_protocol::SessionId;
use serde::{Deserialize, Serialize};

/// Token lifetime: `exp` is always `iat` plus this many seconds.
pub const TOKEN_TTL_SECS: i64 = 3600;

/// JSON name of the session claim.
pub const SESSION_ID_CLAIM: &str = "sessionId";

/// Claims of a session token.
///
/// ```json
/// { "sub": "Alice", "sessionId": "…", "iat": 1700000000, "exp": 1700003600 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Display name of the authorized user.
    pub sub: String,

    /// Session the token was issued for.
    #[serde(rename = "sessionId")]
    pub session_id: SessionId,

    /// Issued-at, Unix seconds.
    pub iat: i64,

    /// Expiry, Unix seconds.
    pub exp: i64,
}

impl SessionClaims {
    /// Builds the claims for a token issued at `now`.
    pub fn new(subject: impl Into<String>, session_id: SessionId, now: DateTime<Utc>) -> Self {
        let iat = now.timestamp();
        Self {
            sub: subject.into(),
            session_id,
            iat,
            exp: iat + TOKEN_TTL_SECS,
        }
    }

    /// `iat` as a timestamp, if it is in chrono's range.
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.iat, 0)
    }

    /// `exp` as a timestamp, if it is in chrono's range.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}
