//! The in-memory session store: a lock-guarded map from session id to
//! roster.
//!
//! # Concurrency note
//!
//! Many request tasks hit the store at once, so unlike a manager owned by
//! a single task the map sits behind a `RwLock` here. Readers share the
//! lock and clone an `Arc` out; writers hold it only for the insert.
//! Rosters are built completely before the write lock is taken, which is
//! what makes an entry visible atomically.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use keyforge_protocol::{Roster, SessionId, UserIdentity};

use crate::{RegistryError, SessionStore, generate_session_id};

type IdGenerator = Box<dyn Fn() -> SessionId + Send + Sync>;

/// Process-local [`SessionStore`].
///
/// Nothing survives a restart. Sessions are never removed; a session id
/// can only be reused by [`put_session`](SessionStore::put_session).
pub struct InMemorySessionStore {
    /// Every stored session, keyed by id.
    sessions: RwLock<HashMap<SessionId, Roster>>,

    /// Source of fresh ids for `create_session`.
    next_id: IdGenerator,
}

impl InMemorySessionStore {
    /// Creates an empty store that mints random UUID ids.
    pub fn new() -> Self {
        Self::with_id_generator(generate_session_id)
    }

    /// Creates an empty store with a custom id source.
    ///
    /// `create_session` keeps calling `next_id` until it returns an id
    /// that isn't stored yet.
    pub fn with_id_generator(
        next_id: impl Fn() -> SessionId + Send + Sync + 'static,
    ) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            next_id: Box::new(next_id),
        }
    }

    // A panic while holding the lock can't leave a torn entry behind (the
    // map only ever receives fully built rosters), so poisoning is ignored.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<SessionId, Roster>> {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<SessionId, Roster>> {
        self.sessions.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for InMemorySessionStore {
    fn create_session(&self, roster: Vec<UserIdentity>) -> SessionId {
        let roster: Roster = roster.into();
        let users = roster.len();

        // Generate and insert under one write lock: a check-then-insert
        // split across two lock acquisitions could race another creator.
        let session_id = {
            let mut sessions = self.write();
            loop {
                match sessions.entry((self.next_id)()) {
                    Entry::Vacant(slot) => {
                        let session_id = slot.key().clone();
                        slot.insert(roster);
                        break session_id;
                    }
                    Entry::Occupied(taken) => {
                        tracing::warn!(
                            session_id = %taken.key(),
                            "generated session id already in use, regenerating"
                        );
                    }
                }
            }
        };

        tracing::info!(%session_id, users, "session created");
        session_id
    }

    fn put_session(&self, session_id: SessionId, roster: Vec<UserIdentity>) {
        let roster: Roster = roster.into();
        let users = roster.len();

        let replaced = self.write().insert(session_id.clone(), roster).is_some();

        tracing::info!(%session_id, users, replaced, "session registered");
    }

    fn roster(&self, session_id: &SessionId) -> Result<Roster, RegistryError> {
        match self.read().get(session_id) {
            Some(roster) => Ok(Roster::clone(roster)),
            None => {
                tracing::debug!(%session_id, "session lookup missed");
                Err(RegistryError::SessionNotFound(session_id.clone()))
            }
        }
    }

    fn len(&self) -> usize {
        self.read().len()
    }
}

// =========================================================================
// Tests
// =========================================================================
