//! Session storage
//!
//! The store is the seam where durable storage would plug in. The in-memory
//! implementation gives every user their own mutex so events for one user are
//! serialized while different users never wait on each other.

use super::{UserId, UserSession};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Keyed store of user sessions
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Snapshot of an existing session
    async fn get(&self, user_id: UserId) -> Option<UserSession>;

    /// Snapshot of the session, creating it with defaults if absent
    async fn get_or_create(&self, user_id: UserId) -> UserSession;

    /// Run `f` against the session while holding that user's lock
    async fn mutate<F, R>(&self, user_id: UserId, f: F) -> R
    where
        F: FnOnce(&mut UserSession) -> R + Send,
        R: Send;
}

/// Process-lifetime session map
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<UserId, Arc<Mutex<UserSession>>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions created so far
    #[allow(dead_code)] // Used in tests
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    async fn entry(&self, user_id: UserId) -> Arc<Mutex<UserSession>> {
        {
            let sessions = self.sessions.read().await;
            if let Some(session) = sessions.get(&user_id) {
                return Arc::clone(session);
            }
        }

        let mut sessions = self.sessions.write().await;
        let session = sessions.entry(user_id).or_insert_with(|| {
            tracing::debug!(user_id = %user_id, "Creating session");
            Arc::new(Mutex::new(UserSession::default()))
        });
        Arc::clone(session)
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, user_id: UserId) -> Option<UserSession> {
        let session = self.sessions.read().await.get(&user_id).cloned()?;
        let snapshot = session.lock().await.clone();
        Some(snapshot)
    }

    async fn get_or_create(&self, user_id: UserId) -> UserSession {
        let session = self.entry(user_id).await;
        let snapshot = session.lock().await.clone();
        snapshot
    }

    async fn mutate<F, R>(&self, user_id: UserId, f: F) -> R
    where
        F: FnOnce(&mut UserSession) -> R + Send,
        R: Send,
    {
        let session = self.entry(user_id).await;
        let mut guard = session.lock().await;
        f(&mut guard)
    }
}
