use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

/// Registry of live session ids. A token is only accepted while the session
/// it was minted for is still present here.
#[derive(Clone, Default)]
pub struct SessionStore {
    active: Arc<RwLock<HashSet<Uuid>>>,
}

impl SessionStore {
    /// Open a fresh session and return its id.
    pub async fn open(&self) -> Uuid {
        let session_id = Uuid::new_v4();
        self.active.write().await.insert(session_id);
        session_id
    }

    pub async fn is_active(&self, session_id: Uuid) -> bool {
        self.active.read().await.contains(&session_id)
    }

    /// Close a session. Closing an already-closed session is a no-op.
    pub async fn close(&self, session_id: Uuid) -> bool {
        self.active.write().await.remove(&session_id)
    }
}

#[cfg(test)]
mod session_tests {
    use super::*;

    #[tokio::test]
    async fn open_close_lifecycle() {
        let sessions = SessionStore::default();
        let id = sessions.open().await;
        assert!(sessions.is_active(id).await);

        assert!(sessions.close(id).await);
        assert!(!sessions.is_active(id).await);
    }

    #[tokio::test]
    async fn close_unknown_session_is_noop() {
        let sessions = SessionStore::default();
        assert!(!sessions.close(Uuid::new_v4()).await);
    }

    #[tokio::test]
    async fn sessions_are_independent() {
        let sessions = SessionStore::default();
        let first = sessions.open().await;
        let second = sessions.open().await;
        sessions.close(first).await;
        assert!(!sessions.is_active(first).await);
        assert!(sessions.is_active(second).await);
    }
}
