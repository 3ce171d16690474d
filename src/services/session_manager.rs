// src/services/session_manager.rs
use std::{
    collections::HashMap,
    fmt::Debug,
    sync::Arc,
    time::{Duration, Instant},
};

use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::session_config::{ConfigUpdate, InvalidSelection, SessionConfig};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

/// One message of the conversation. Never modified after it is appended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Turn {
    pub role: TurnRole,
    pub text: String,
}

#[derive(Clone, Debug)]
pub struct Session {
    pub id: String,
    pub history: Vec<Turn>,
    pub config: SessionConfig,
    pub last_active: Instant,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            history: Vec::new(),
            config: SessionConfig::default(),
            last_active: Instant::now(),
        }
    }
}

/// Read-only copy of a session for callers outside the manager.
#[derive(Clone, Debug, Serialize)]
pub struct SessionSnapshot {
    pub session_id: String,
    pub config: SessionConfig,
    pub history: Vec<Turn>,
}

#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<RwLock<HashMap<String, Session>>>,
    ttl: Duration,
}

impl Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl SessionManager {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Create a fresh session with default selections and return its id.
    pub async fn create_session(&self) -> String {
        let id = Uuid::new_v4().to_string();
        let session = Session::new(id.clone());

        let mut guard = self.inner.write().await;
        guard.insert(id.clone(), session);
        id
    }

    /// Ensure there's a session with this id.
    pub async fn ensure_session(&self, id: &str) -> String {
        {
            let guard = self.inner.read().await;
            if guard.contains_key(id) {
                return id.to_string();
            }
        }
        let mut guard = self.inner.write().await;
        guard
            .entry(id.to_string())
            .or_insert_with(|| Session::new(id.to_string()));
        id.to_string()
    }

    /// Append a turn to a session's history and touch last_active.
    /// Returns the new history length.
    pub async fn append_turn(&self, session_id: &str, role: TurnRole, text: impl Into<String>) -> usize {
        let mut guard = self.inner.write().await;
        let entry = guard
            .entry(session_id.to_string())
            .or_insert_with(|| Session::new(session_id.to_string()));
        entry.history.push(Turn { role, text: text.into() });
        entry.last_active = Instant::now();
        entry.history.len()
    }

    /// Get a copy of the session history
    pub async fn get_history(&self, session_id: &str) -> Option<Vec<Turn>> {
        let guard = self.inner.read().await;
        guard.get(session_id).map(|s| s.history.clone())
    }

    /// Empty the history, keeping the selections. False if the session is unknown.
    pub async fn clear_history(&self, session_id: &str) -> bool {
        let mut guard = self.inner.write().await;
        match guard.get_mut(session_id) {
            Some(session) => {
                session.history.clear();
                session.last_active = Instant::now();
                true
            }
            None => false,
        }
    }

    pub async fn get_config(&self, session_id: &str) -> Option<SessionConfig> {
        let guard = self.inner.read().await;
        guard.get(session_id).map(|s| s.config.clone())
    }

    /// Apply a user selection. `Ok(None)` if the session is unknown.
    pub async fn update_config(
        &self,
        session_id: &str,
        update: ConfigUpdate,
    ) -> Result<Option<SessionConfig>, InvalidSelection> {
        let mut guard = self.inner.write().await;
        let Some(session) = guard.get_mut(session_id) else {
            return Ok(None);
        };
        session.config.apply(update)?;
        session.last_active = Instant::now();
        Ok(Some(session.config.clone()))
    }

    pub async fn snapshot(&self, session_id: &str) -> Option<SessionSnapshot> {
        let guard = self.inner.read().await;
        guard.get(session_id).map(|s| SessionSnapshot {
            session_id: s.id.clone(),
            config: s.config.clone(),
            history: s.history.clone(),
        })
    }

    /// Remove a session by id
    pub async fn remove_session(&self, session_id: &str) -> bool {
        let mut guard = self.inner.write().await;
        guard.remove(session_id).is_some()
    }

    /// Remove sessions idle longer than ttl. Returns number removed.
    pub async fn purge_expired(&self) -> usize {
        let mut guard = self.inner.write().await;
        let now = Instant::now();
        let before = guard.len();
        guard.retain(|_, s| now.duration_since(s.last_active) < self.ttl);
        before - guard.len()
    }

    /// Number of sessions
    pub async fn len(&self) -> usize {
        let guard = self.inner.read().await;
        guard.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// List session ids
    pub async fn list_session_ids(&self) -> Vec<String> {
        let guard = self.inner.read().await;
        guard.keys().cloned().collect()
    }
}
