use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::core::session::WizardSession;

/// In-memory store for active wizard sessions.
///
/// Each session sits behind its own async mutex so handlers serialize
/// access per session while different sessions proceed independently.
/// Entries expire after the configured idle TTL, which is what discards
/// abandoned walks, and the store is capacity bounded.
pub struct SessionStore {
    sessions: moka::future::Cache<String, Arc<Mutex<WizardSession>>>,
}

impl SessionStore {
    pub fn new(max_capacity: u64, ttl_secs: u64) -> Self {
        let sessions = moka::future::CacheBuilder::new(max_capacity)
            .time_to_idle(Duration::from_secs(ttl_secs))
            .build();

        Self { sessions }
    }

    /// Store a fresh session and hand back its id.
    pub async fn insert(&self, session: WizardSession) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        self.sessions
            .insert(id.clone(), Arc::new(Mutex::new(session)))
            .await;

        tracing::debug!("Created wizard session {}", id);

        id
    }

    pub async fn get(&self, id: &str) -> Option<Arc<Mutex<WizardSession>>> {
        self.sessions.get(id).await
    }

    /// Drop a session, normally after a successful submission.
    pub async fn remove(&self, id: &str) {
        self.sessions.invalidate(id).await;
        tracing::debug!("Discarded wizard session {}", id);
    }

    pub fn active_count(&self) -> u64 {
        self.sessions.entry_count()
    }
}
