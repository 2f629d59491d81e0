//! In-memory session store keyed by video id.
//!
//! Each session sits behind its own async mutex, so concurrent questions for
//! the same video serialize instead of interleaving their appends (and the
//! first-question seeding check cannot run twice). The map itself is bounded:
//! past `max_sessions` the least-recently-used idle session is dropped.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use parking_lot::RwLock;
use tokio::sync::Mutex;

use crate::types::Session;

/// SessionStore configuration
#[derive(Debug, Clone)]
pub struct SessionStoreConfig {
    /// Maximum number of sessions kept in memory
    pub max_sessions: usize,
}

impl Default for SessionStoreConfig {
    fn default() -> Self {
        Self { max_sessions: 256 }
    }
}

impl SessionStoreConfig {
    pub fn with_max_sessions(mut self, max: usize) -> Self {
        self.max_sessions = max;
        self
    }
}

struct SessionEntry {
    session: Arc<Mutex<Session>>,
    last_accessed: RwLock<DateTime<Utc>>,
}

impl SessionEntry {
    fn new(session: Arc<Mutex<Session>>) -> Self {
        Self {
            session,
            last_accessed: RwLock::new(Utc::now()),
        }
    }

    fn touch(&self) {
        *self.last_accessed.write() = Utc::now();
    }
}

/// Process-wide conversation session store
pub struct SessionStore {
    config: SessionStoreConfig,
    sessions: DashMap<String, SessionEntry>,
}

impl SessionStore {
    pub fn new(config: SessionStoreConfig) -> Self {
        Self {
            config,
            sessions: DashMap::new(),
        }
    }

    /// Look up the session for `video_id`, creating an empty one if absent.
    ///
    /// The returned handle stays valid even if the store evicts the entry
    /// later; an in-flight conversation never loses its history mid-call.
    pub fn get_or_create(&self, video_id: &str) -> Arc<Mutex<Session>> {
        let session = {
            let entry = self
                .sessions
                .entry(video_id.to_string())
                .or_insert_with(|| {
                    tracing::debug!(video_id, "creating conversation session");
                    SessionEntry::new(Arc::new(Mutex::new(Session::new(video_id))))
                });
            entry.touch();
            entry.session.clone()
        };

        while self.sessions.len() > self.config.max_sessions {
            if !self.evict_lru(video_id) {
                break;
            }
        }

        session
    }

    /// Look up an existing session without creating one
    pub fn get(&self, video_id: &str) -> Option<Arc<Mutex<Session>>> {
        let entry = self.sessions.get(video_id)?;
        entry.touch();
        Some(entry.session.clone())
    }

    pub fn contains(&self, video_id: &str) -> bool {
        self.sessions.contains_key(video_id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drop the least-recently-used session, skipping `keep` and any session
    /// whose mutex is currently held. Returns false when nothing was
    /// evictable.
    fn evict_lru(&self, keep: &str) -> bool {
        let mut oldest: Option<(String, DateTime<Utc>)> = None;

        for entry in self.sessions.iter() {
            if entry.key() == keep {
                continue;
            }
            if entry.value().session.try_lock().is_err() {
                continue;
            }
            let accessed = *entry.value().last_accessed.read();
            if oldest.as_ref().map_or(true, |(_, t)| accessed < *t) {
                oldest = Some((entry.key().clone(), accessed));
            }
        }

        match oldest {
            Some((video_id, _)) => {
                self.sessions.remove(&video_id);
                tracing::info!(video_id, "evicted least-recently-used session");
                true
            }
            None => false,
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(SessionStoreConfig::default())
    }
}
