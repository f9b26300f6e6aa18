//! Shared data model for Keyforge.
//!
//! This crate defines the types every other layer speaks:
//!
//! - **Identity** ([`UserIdentity`], [`SessionId`]): who is asking and
//!   which game session they are asking about.
//! - **Requests** ([`CreateSessionRequest`], [`IssueTokenRequest`]): the
//!   bodies the HTTP boundary deserializes before calling into the core.
//! - **Errors on the wire** ([`ErrorBody`]): what a failed request
//!   returns to the caller.
//!
//! # Architecture
//!
//! ```text
//! HTTP boundary (keyforge)
//!     ↕
//! Token engine (keyforge-token) → Registry (keyforge-registry), Keys (keyforge-keys)
//!     ↕
//! Protocol types (this crate)
//! ```
//!
//! The protocol layer knows nothing about keys, locks, or sockets. It only
//! fixes the shapes of the data so the layers above agree on them.

mod types;

pub use types::{
    CreateSessionRequest, ErrorBody, IssueTokenRequest, Roster, SessionId,
    UserIdentity,
};
