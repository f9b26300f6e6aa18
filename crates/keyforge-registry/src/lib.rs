//! Session registry for Keyforge.
//!
//! The registry answers one question for the token engine: "who is
//! allowed to ask for a token in this session?"
//!
//! 1. **Creation**: a session is registered with a fixed roster and
//!    gets a fresh random id ([`SessionStore::create_session`]).
//! 2. **Lookup**: the engine reads the roster back
//!    ([`SessionStore::roster`]) before it signs anything.
//!
//! # How it fits in the stack
//!
//! ```text
//! Token engine (above)  ← borrows roster snapshots, never mutates
//!     ↕
//! Registry (this crate)  ← owns every session
//!     ↕
//! Protocol (below)  ← provides SessionId, UserIdentity, Roster
//! ```
//!
//! Storage is process memory only. The [`SessionStore`] trait is the seam
//! where a persistent store would plug in.

mod error;
mod memory;
mod store;

pub use error::RegistryError;
pub use memory::InMemorySessionStore;
pub use store::{SessionStore, generate_session_id};
