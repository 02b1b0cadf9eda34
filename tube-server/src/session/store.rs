//! In-memory session store.
//!
//! Sessions are keyed by a random UUID kept in a cookie and expire after a
//! period of inactivity. Nothing is persisted.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;
use uuid::Uuid;

use crate::domain::MapFraming;
use crate::map::MapCapability;

use super::page::Session;

/// Configuration for the session store.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Sessions idle for longer than this are dropped.
    pub idle_timeout: Duration,

    /// Maximum number of live sessions.
    pub max_capacity: u64,

    /// Map framing for new sessions.
    pub framing: MapFraming,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::from_secs(30 * 60),
            max_capacity: 10_000,
            framing: MapFraming::london(),
        }
    }
}

/// Live page sessions.
#[derive(Clone)]
pub struct SessionStore {
    sessions: MokaCache<Uuid, Arc<Session>>,
    framing: MapFraming,
}

impl SessionStore {
    /// Create a store with the given configuration.
    pub fn new(config: &SessionConfig) -> Self {
        let sessions = MokaCache::builder()
            .time_to_idle(config.idle_timeout)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            sessions,
            framing: config.framing,
        }
    }

    /// Look up the session for `id`, or start a new one.
    ///
    /// New sessions initialize their map against `maps` before they are
    /// returned. The returned flag is `true` when a session was created.
    pub async fn get_or_create<M: MapCapability>(
        &self,
        id: Option<Uuid>,
        maps: &M,
    ) -> (Uuid, Arc<Session>, bool) {
        if let Some(id) = id
            && let Some(session) = self.sessions.get(&id).await
        {
            return (id, session, false);
        }

        let id = Uuid::new_v4();
        let session = Arc::new(Session::new(self.framing));
        session.initialize_map(maps).await;
        self.sessions.insert(id, session.clone()).await;

        debug!(session = %id, "started session");
        (id, session, true)
    }
}
