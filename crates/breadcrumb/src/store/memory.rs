//! 内存会话存储

use super::{SessionStore, TrailOp};
use crate::trail::BreadcrumbTrail;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

#[derive(Debug)]
struct StoredTrail {
    trail: BreadcrumbTrail,
    last_access: Instant,
}

/// In-process session store with an optional idle timeout.
///
/// Expired sessions are invisible to `get` immediately and are dropped from
/// memory by `purge_expired`.
#[derive(Clone, Debug)]
pub struct MemorySessionStore {
    inner: Arc<RwLock<HashMap<String, StoredTrail>>>,
    idle_timeout: Option<Duration>,
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new(None)
    }
}

impl MemorySessionStore {
    /// `None` disables expiry.
    pub fn new(idle_timeout: Option<Duration>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            idle_timeout,
        }
    }

    fn is_expired(&self, stored: &StoredTrail, now: Instant) -> bool {
        self.idle_timeout
            .is_some_and(|timeout| now.duration_since(stored.last_access) > timeout)
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, session_id: &str) -> Option<BreadcrumbTrail> {
        let now = Instant::now();
        let mut map = self.inner.write().await;
        let stored = map.get_mut(session_id)?;
        if self.is_expired(stored, now) {
            debug!("Session {} expired", session_id);
            return None;
        }
        stored.last_access = now;
        Some(stored.trail.clone())
    }

    async fn put(&self, session_id: &str, trail: BreadcrumbTrail) {
        self.inner.write().await.insert(
            session_id.to_string(),
            StoredTrail {
                trail,
                last_access: Instant::now(),
            },
        );
    }

    async fn update(&self, session_id: &str, op: TrailOp<'_>) -> bool {
        let now = Instant::now();
        let mut map = self.inner.write().await;
        let Some(stored) = map.get_mut(session_id) else {
            return false;
        };
        if self.is_expired(stored, now) {
            debug!("Session {} expired", session_id);
            return false;
        }
        stored.last_access = now;
        op(&mut stored.trail);
        true
    }

    async fn remove(&self, session_id: &str) -> bool {
        self.inner.write().await.remove(session_id).is_some()
    }

    async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    async fn purge_expired(&self) -> usize {
        if self.idle_timeout.is_none() {
            return 0;
        }
        let now = Instant::now();
        let mut map = self.inner.write().await;
        let before = map.len();
        map.retain(|_, stored| !self.is_expired(stored, now));
        before - map.len()
    }
}
