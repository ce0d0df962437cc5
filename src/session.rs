use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::panel::ResultsPanel;

/// Identifies one browser session; carried in the session cookie
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Creates a new random session id
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Accepts a cookie value only when it is a UUID, normalized to its simple form
    pub fn parse(value: &str) -> Option<Self> {
        Uuid::parse_str(value.trim())
            .ok()
            .map(|uuid| Self(uuid.simple().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

struct SessionSlot {
    panel: Arc<ResultsPanel>,
    last_seen: AtomicU64,
}

/// Results panels keyed by session, so each visitor only ever sees their own results.
///
/// Holds at most `max_sessions` panels; inserting past that drops the least recently
/// used one.
pub struct SessionStore {
    slots: RwLock<HashMap<SessionId, SessionSlot>>,
    clock: AtomicU64,
    max_sessions: usize,
}

impl SessionStore {
    pub fn new(max_sessions: usize) -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
            clock: AtomicU64::new(0),
            max_sessions: max_sessions.max(1),
        }
    }

    fn tick(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// The panel of `session`, created empty on first use
    pub async fn panel(&self, session: &SessionId) -> Arc<ResultsPanel> {
        if let Some(slot) = self.slots.read().await.get(session) {
            slot.last_seen.store(self.tick(), Ordering::SeqCst);
            return Arc::clone(&slot.panel);
        }

        let mut slots = self.slots.write().await;
        if let Some(slot) = slots.get(session) {
            slot.last_seen.store(self.tick(), Ordering::SeqCst);
            return Arc::clone(&slot.panel);
        }

        while slots.len() >= self.max_sessions {
            let oldest = slots
                .iter()
                .min_by_key(|(_, slot)| slot.last_seen.load(Ordering::SeqCst))
                .map(|(id, _)| id.clone());
            match oldest {
                Some(id) => {
                    slots.remove(&id);
                    tracing::debug!(session = %id, "Evicted least recently used session");
                }
                None => break,
            }
        }

        let panel = Arc::new(ResultsPanel::new());
        slots.insert(
            session.clone(),
            SessionSlot {
                panel: Arc::clone(&panel),
                last_seen: AtomicU64::new(self.tick()),
            },
        );
        tracing::debug!(session = %session, sessions = slots.len(), "Created session panel");
        panel
    }
}

#[cfg(test)]
impl SessionStore {
    /// Number of sessions currently held
    pub async fn len(&self) -> usize {
        self.slots.read().await.len()
    }

    pub async fn contains(&self, session: &SessionId) -> bool {
        self.slots.read().await.contains_key(session)
    }
}
