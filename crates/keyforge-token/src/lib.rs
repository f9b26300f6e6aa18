//! Token issuance for Keyforge.
//!
//! [`TokenIssuer`] is the engine the HTTP boundary calls. For each
//! request it:
//!
//! 1. looks the session's roster up in the registry,
//! 2. checks the asserted identity is on it (exact match on id AND
//!    display name),
//! 3. signs a one-hour RS256 JWT naming the user and the session.
//!
//! [`TokenVerifier`] does the reverse for relying parties: it checks a
//! token against the published public key and hands back the claims.

mod claims;
mod error;
mod issuer;
mod verify;

pub use claims::{SESSION_ID_CLAIM, SessionClaims, TOKEN_TTL_SECS};
pub use error::{IssueError, VerifyError};
pub use issuer::TokenIssuer;
pub use verify::TokenVerifier;
