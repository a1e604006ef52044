// src/services/session_store.rs

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
    time::Duration,
};

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::services::session::Session;

/// Shared handle to one session. The async mutex is held for a whole action,
/// so one session's actions never interleave.
pub type SessionHandle = Arc<Mutex<Session>>;

/// Registry of live sessions keyed by cookie id.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, SessionHandle>>>,
    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: Arc::default(),
            idle_timeout,
        }
    }

    pub fn get(&self, id: &Uuid) -> Option<SessionHandle> {
        self.sessions
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(id)
            .cloned()
    }

    /// Creates a fresh session, evicting idle ones first.
    pub fn create(&self) -> (Uuid, SessionHandle) {
        self.evict_idle();

        let id = Uuid::new_v4();
        let handle: SessionHandle = Arc::new(Mutex::new(Session::new()));
        self.sessions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(id, handle.clone());
        tracing::debug!(session_id = %id, "Session created");
        (id, handle)
    }

    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops sessions idle for longer than the timeout. A session whose handle
    /// is held outside the store belongs to an in-flight request and is kept,
    /// as is one that is locked.
    pub fn evict_idle(&self) {
        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let before = sessions.len();
        sessions.retain(|_, handle| {
            if Arc::strong_count(handle) > 1 {
                return true;
            }
            match handle.try_lock() {
                Ok(session) => session.last_seen().elapsed() < self.idle_timeout,
                Err(_) => true,
            }
        });
        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::info!(evicted, remaining = sessions.len(), "Evicted idle sessions");
        }
    }
}
