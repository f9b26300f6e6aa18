//! The registry abstraction the token engine is written against.

use keyforge_protocol::{Roster, SessionId, UserIdentity};
use rand::Rng;

use crate::RegistryError;

/// Capability set of a session registry: create, replace, look up.
///
/// The token engine only ever talks to this trait, so an in-memory map
/// can later be swapped for a persistent store without touching it.
///
/// # Trait bounds
///
/// - `Send + Sync` → one store is shared by every request task.
/// - `'static` → the store lives as long as the server.
///
/// Methods take `&self`: implementations handle their own locking, and
/// every write must publish a fully built roster in one step so readers
/// never see a half-initialized session.
pub trait SessionStore: Send + Sync + 'static {
    /// Stores `roster` under a freshly generated id and returns the id.
    ///
    /// The id never collides with a session already stored.
    fn create_session(&self, roster: Vec<UserIdentity>) -> SessionId;

    /// Stores `roster` under a caller-chosen id, replacing whatever was
    /// there (last writer wins; rosters are never merged).
    fn put_session(&self, session_id: SessionId, roster: Vec<UserIdentity>);

    /// Returns a snapshot of the roster for `session_id`.
    ///
    /// # Errors
    /// [`RegistryError::SessionNotFound`] if no such session is stored.
    fn roster(&self, session_id: &SessionId) -> Result<Roster, RegistryError>;

    /// Number of stored sessions.
    fn len(&self) -> usize;

    /// Returns `true` if no sessions are stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Generates a random session id in canonical UUID form.
///
/// 16 random bytes (128 bits) with the version-4 and variant bits set,
/// rendered lowercase and hyphenated, e.g.
/// `"6f1c2b0a-8d3e-4f5a-9b7c-1d2e3f4a5b6c"`.
pub fn generate_session_id() -> SessionId {
    let bytes: [u8; 16] = rand::rng().random();
    let uuid = uuid::Builder::from_random_bytes(bytes).into_uuid();
    SessionId::from(uuid.to_string())
}
