use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::session::Session;

struct Entry {
    session: Session,
    touched: Instant,
}

/// In-memory sessions keyed by the id in the visitor's cookie.
///
/// Handlers take a copy with [`SessionStore::get`], run their backend calls
/// without holding the lock, then hand the result to [`SessionStore::commit`].
/// A session removed in between (remount or idle eviction) is gone for good:
/// its late result is dropped instead of resurrecting it.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<Uuid, Entry>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn open(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.inner.lock().await.insert(
            id,
            Entry {
                session: Session::default(),
                touched: Instant::now(),
            },
        );
        id
    }

    pub async fn get(&self, id: Uuid) -> Option<Session> {
        let mut sessions = self.inner.lock().await;
        let entry = sessions.get_mut(&id)?;
        entry.touched = Instant::now();
        Some(entry.session.clone())
    }

    /// Returns `false` when the session was torn down while the caller worked.
    /// Last writer wins: concurrent requests on one session overwrite each other.
    pub async fn commit(&self, id: Uuid, session: Session) -> bool {
        let mut sessions = self.inner.lock().await;
        match sessions.get_mut(&id) {
            Some(entry) => {
                entry.session = session;
                entry.touched = Instant::now();
                true
            }
            None => {
                tracing::debug!("Dropping late update for closed session {}", id);
                false
            }
        }
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        self.inner.lock().await.remove(&id).is_some()
    }

    pub async fn evict_idle(&self, ttl: Duration) -> usize {
        let mut sessions = self.inner.lock().await;
        let before = sessions.len();
        sessions.retain(|_, entry| entry.touched.elapsed() < ttl);
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }
}
