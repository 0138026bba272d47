use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, RwLock};
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::MovieId;

/// Per-session data handed off between requests.
///
/// Holds the output of the last recommendation run for one session token.
/// Overwritten on every new submission; gone once the session expires.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionData {
    /// Ranked movie ids from the last recommendation run
    pub recommendations: Vec<MovieId>,
}

#[derive(Debug, Clone)]
struct SessionEntry {
    data: SessionData,
    expires_at: DateTime<Utc>,
}

/// In-memory key-value store scoped to session tokens, with per-entry expiry.
///
/// Writes reset the entry's TTL. Reads drop entries that are already past
/// their expiry; the background sweeper bounds memory for sessions that are
/// never read again.
#[derive(Clone)]
pub struct SessionStore {
    entries: Arc<RwLock<HashMap<Uuid, SessionEntry>>>,
    ttl: chrono::Duration,
}

/// Handle for gracefully stopping the expiry sweeper
pub struct SweeperHandle {
    shutdown_tx: mpsc::Sender<()>,
}

impl SweeperHandle {
    /// Signals the sweeper task to stop
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
        info!("Session sweeper shutdown signal sent");
    }
}

impl SessionStore {
    /// Creates an empty store whose entries live for `ttl` after each write
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl: chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX),
        }
    }

    /// Stores `data` under `session_id`, resetting the entry's expiry
    pub async fn put(&self, session_id: Uuid, data: SessionData) {
        let entry = SessionEntry {
            data,
            expires_at: Utc::now() + self.ttl,
        };
        self.entries.write().await.insert(session_id, entry);
    }

    /// Returns the session data, or `None` when absent or expired
    pub async fn get(&self, session_id: &Uuid) -> Option<SessionData> {
        let now = Utc::now();
        {
            let entries = self.entries.read().await;
            match entries.get(session_id) {
                Some(entry) if entry.expires_at > now => return Some(entry.data.clone()),
                Some(_) => {}
                None => return None,
            }
        }
        // Entry exists but is stale; drop it under the write lock.
        self.entries.write().await.remove(session_id);
        None
    }

    /// Removes every expired entry, returning how many were dropped
    pub async fn sweep(&self) -> usize {
        let now = Utc::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        before - entries.len()
    }

    /// Number of live plus not-yet-swept entries
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Spawns the background task that evicts expired sessions every
    /// `interval` until the returned handle shuts it down
    pub fn start_sweeper(&self, interval: Duration) -> SweeperHandle {
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel(1);
        let store = self.clone();

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick completes immediately.
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let removed = store.sweep().await;
                        if removed > 0 {
                            debug!(removed, "evicted expired sessions");
                        }
                    }
                    _ = shutdown_rx.recv() => {
                        info!("Session sweeper stopped");
                        break;
                    }
                }
            }
        });

        SweeperHandle { shutdown_tx }
    }
}
