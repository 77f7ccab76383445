use crate::domain::ports::SessionStore;
use crate::domain::session::{PlayerId, PlayerSession};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory session store.
///
/// Uses `Arc<RwLock<HashMap<PlayerId, PlayerSession>>>` to allow shared
/// concurrent access. `Clone` shares the underlying map, which lets tests
/// inspect state the engine owns through a boxed copy.
#[derive(Default, Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<PlayerId, PlayerSession>>>,
}

impl InMemorySessionStore {
    /// Creates a new, empty in-memory session store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, player: &PlayerId) -> Result<Option<PlayerSession>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(player).cloned())
    }

    async fn put(&self, session: PlayerSession) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.player.clone(), session);
        Ok(())
    }

    async fn remove(&self, player: &PlayerId) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(player);
        Ok(())
    }

    async fn all(&self) -> Result<Vec<PlayerSession>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.values().cloned().collect())
    }
}
