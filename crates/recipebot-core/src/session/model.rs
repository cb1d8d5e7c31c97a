//! Conversation session handle.

use std::sync::Arc;

use super::history::{HistoryStore, InMemoryHistoryStore};

/// A single conversation session.
///
/// The session is passed explicitly to whoever handles requests. The server
/// creates one default session at startup, so every request shares its
/// history; this is only correct for a single user.
#[derive(Clone)]
pub struct ChatSession {
    id: String,
    history: Arc<dyn HistoryStore>,
}

impl ChatSession {
    /// Creates a session backed by the given history store.
    pub fn new(history: Arc<dyn HistoryStore>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            history,
        }
    }

    /// Creates a session with an empty in-memory history.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryHistoryStore::new()))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn history(&self) -> &Arc<dyn HistoryStore> {
        &self.history
    }
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession").field("id", &self.id).finish()
    }
}
