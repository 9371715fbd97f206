//! In-process session store mapping session ids to exchange history.
//!
//! The one piece of mutable shared state the service owns. Backed by a
//! `DashMap` so concurrent turns on different sessions never contend, and
//! appends to the same key are serialized by the map's entry locking.
//!
//! Growth is bounded by [`SessionLimits`]: per-session history is capped
//! (oldest exchange dropped) and the table itself is capped (creating a
//! session at capacity evicts the least-recently-active one).

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use archaic_types::chat::Exchange;
use archaic_types::config::SessionLimits;

/// History and activity timestamps for one session.
#[derive(Debug, Clone)]
struct SessionEntry {
    exchanges: Vec<Exchange>,
    created_at: DateTime<Utc>,
    last_active_at: DateTime<Utc>,
}

impl SessionEntry {
    fn new() -> Self {
        let now = Utc::now();
        Self {
            exchanges: Vec::new(),
            created_at: now,
            last_active_at: now,
        }
    }
}

/// Concurrent table of chat sessions.
///
/// Lookup on an unknown identifier never fails: it transparently creates a
/// fresh, empty session (idempotent-create). A client can therefore never
/// receive a "session not found" error.
pub struct SessionStore {
    sessions: DashMap<String, SessionEntry>,
    limits: SessionLimits,
}

impl SessionStore {
    pub fn new(limits: SessionLimits) -> Self {
        Self {
            sessions: DashMap::new(),
            limits,
        }
    }

    /// Resolve a session id, creating the session if needed.
    ///
    /// - `None` mints a fresh UUIDv7 identifier with an empty history.
    /// - `Some(id)` returns `id` unchanged; an unseen id starts a new
    ///   empty history under that key.
    ///
    /// The returned identifier is always non-empty.
    pub fn get_or_create(&self, session_id: Option<&str>) -> String {
        let id = match session_id {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => Uuid::now_v7().to_string(),
        };

        if !self.sessions.contains_key(&id) && self.sessions.len() >= self.limits.max_sessions {
            self.evict_least_recently_active();
        }

        self.sessions
            .entry(id.clone())
            .and_modify(|entry| entry.last_active_at = Utc::now())
            .or_insert_with(SessionEntry::new);

        id
    }

    /// Append a completed exchange to the tail of a session's history.
    ///
    /// Creates the session if it does not exist. When the history exceeds
    /// `max_exchanges`, the oldest exchanges are dropped.
    pub fn append(&self, session_id: &str, exchange: Exchange) {
        let mut entry = self
            .sessions
            .entry(session_id.to_string())
            .or_insert_with(SessionEntry::new);

        entry.exchanges.push(exchange);
        entry.last_active_at = Utc::now();

        let len = entry.exchanges.len();
        if len > self.limits.max_exchanges {
            entry.exchanges.drain(..len - self.limits.max_exchanges);
        }
    }

    /// The last `n` exchanges of a session in chronological order, or fewer
    /// if the history is shorter. Unknown ids yield an empty list without
    /// creating a session. Does not mutate state.
    pub fn recent(&self, session_id: &str, n: usize) -> Vec<Exchange> {
        match self.sessions.get(session_id) {
            Some(entry) => {
                let exchanges = &entry.exchanges;
                let start = exchanges.len().saturating_sub(n);
                exchanges[start..].to_vec()
            }
            None => Vec::new(),
        }
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn contains(&self, session_id: &str) -> bool {
        self.sessions.contains_key(session_id)
    }

    /// When this session was created, if it exists.
    pub fn created_at(&self, session_id: &str) -> Option<DateTime<Utc>> {
        self.sessions.get(session_id).map(|e| e.created_at)
    }

    fn evict_least_recently_active(&self) {
        let oldest = self
            .sessions
            .iter()
            .min_by_key(|entry| entry.value().last_active_at)
            .map(|entry| entry.key().clone());

        if let Some(key) = oldest {
            self.sessions.remove(&key);
            tracing::debug!(session_id = %key, "evicted least-recently-active session");
        }
    }
}
