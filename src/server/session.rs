// Session management for concurrent HTTP clients
//
// Each conversation owns its Session exclusively. The per-entry mutex is held
// for a whole turn, so a reset can only land between turns.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tokio::time;
use uuid::Uuid;

use crate::errors::TriageError;
use crate::triage::Session;

/// Per-conversation state held by the daemon
#[derive(Debug)]
pub struct SessionEntry {
    /// Unique session identifier
    pub id: String,
    pub session: Session,
    /// Template choice for this conversation
    pub rng: StdRng,
    /// Last activity timestamp
    pub last_activity: DateTime<Utc>,
    /// Session creation time
    pub created_at: DateTime<Utc>,
}

impl SessionEntry {
    fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            id: Uuid::new_v4().to_string(),
            session: Session::new(),
            rng,
            last_activity: Utc::now(),
            created_at: Utc::now(),
        }
    }

    /// Update last activity timestamp
    pub fn touch(&mut self) {
        self.last_activity = Utc::now();
    }

    /// Check if session has expired
    pub fn is_expired(&self, timeout_minutes: u64) -> bool {
        let elapsed = Utc::now().signed_duration_since(self.last_activity);
        elapsed.num_minutes() >= timeout_minutes as i64
    }
}

pub type SharedEntry = Arc<Mutex<SessionEntry>>;

/// Concurrent session manager using DashMap
pub struct SessionManager {
    /// Active sessions (thread-safe concurrent HashMap)
    sessions: Arc<DashMap<String, SharedEntry>>,
    /// Maximum number of concurrent sessions
    max_sessions: usize,
    /// Session timeout in minutes
    timeout_minutes: u64,
    /// Seed applied to every new session's rng
    seed: Option<u64>,
    /// Serializes the limit check with the insert
    create_lock: StdMutex<()>,
}

impl SessionManager {
    /// Create a new session manager and start the expiry task.
    ///
    /// Must be called inside a tokio runtime.
    pub fn new(max_sessions: usize, timeout_minutes: u64, seed: Option<u64>) -> Self {
        let manager = Self {
            sessions: Arc::new(DashMap::new()),
            max_sessions,
            timeout_minutes,
            seed,
            create_lock: StdMutex::new(()),
        };

        manager.start_cleanup_task();

        manager
    }

    /// Create a new Empty session
    pub fn create(&self) -> Result<(String, SharedEntry), TriageError> {
        let _creating = self
            .create_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if self.sessions.len() >= self.max_sessions {
            return Err(TriageError::SessionLimit {
                active: self.sessions.len(),
                max: self.max_sessions,
            });
        }

        let entry = SessionEntry::new(self.seed);
        let id = entry.id.clone();
        let shared = Arc::new(Mutex::new(entry));
        self.sessions.insert(id.clone(), Arc::clone(&shared));

        tracing::info!(session_id = %id, "Created new session");
        Ok((id, shared))
    }

    /// Look up a session and refresh its idle timer.
    ///
    /// The touch happens under the map's shard lock, so the expiry task
    /// cannot drop an entry that was handed out a moment ago.
    pub fn get(&self, session_id: &str) -> Result<SharedEntry, TriageError> {
        let entry = self
            .sessions
            .get(session_id)
            .ok_or_else(|| TriageError::SessionNotFound(session_id.to_string()))?;
        // A busy entry is skipped by the expiry task anyway
        if let Ok(mut locked) = entry.value().try_lock() {
            locked.touch();
        }
        Ok(Arc::clone(entry.value()))
    }

    /// Get an existing session, or create one when the id is absent or unknown
    pub fn get_or_create(
        &self,
        session_id: Option<&str>,
    ) -> Result<(String, SharedEntry), TriageError> {
        if let Some(id) = session_id {
            if let Ok(entry) = self.get(id) {
                return Ok((id.to_string(), entry));
            }
            tracing::debug!(session_id = %id, "Unknown session id; creating a new session");
        }
        self.create()
    }

    /// Lock a session for reset without waiting.
    ///
    /// Fails with `InvalidReset` while a turn holds the session.
    pub fn lock_for_reset(
        &self,
        session_id: &str,
    ) -> Result<OwnedMutexGuard<SessionEntry>, TriageError> {
        self.get(session_id)?
            .try_lock_owned()
            .map_err(|_| TriageError::InvalidReset {
                session_id: session_id.to_string(),
            })
    }

    /// Delete a session
    pub fn delete(&self, session_id: &str) -> bool {
        self.sessions.remove(session_id).is_some()
    }

    /// Get active session count
    pub fn active_count(&self) -> usize {
        self.sessions.len()
    }

    /// Start background cleanup task
    fn start_cleanup_task(&self) {
        let sessions = Arc::clone(&self.sessions);
        let timeout_minutes = self.timeout_minutes;

        tokio::spawn(async move {
            let mut interval = time::interval(Duration::from_secs(60)); // Check every minute

            loop {
                interval.tick().await;
                remove_expired(&sessions, timeout_minutes);
            }
        });
    }
}

/// Drop idle sessions. Sessions in the middle of a turn are skipped.
///
/// Expiry is decided while the shard is write-locked, so it cannot race
/// with `get` refreshing the same entry.
fn remove_expired(sessions: &DashMap<String, SharedEntry>, timeout_minutes: u64) -> usize {
    let mut removed_count = 0;
    sessions.retain(|session_id, entry| {
        let expired = entry
            .try_lock()
            .map(|session| session.is_expired(timeout_minutes))
            .unwrap_or(false);
        if expired {
            removed_count += 1;
            tracing::debug!(session_id = %session_id, "Removed expired session");
        }
        !expired
    });

    if removed_count > 0 {
        tracing::info!(
            removed = removed_count,
            active = sessions.len(),
            "Cleaned up expired sessions"
        );
    }

    removed_count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_session_creation() {
        let manager = SessionManager::new(10, 30, None);

        let (id1, _) = manager.create().unwrap();
        let (id2, _) = manager.create().unwrap();

        assert_eq!(manager.active_count(), 2);
        assert_ne!(id1, id2);
    }

    #[tokio::test]
    async fn test_session_retrieval() {
        let manager = SessionManager::new(10, 30, None);

        let (id, _) = manager.get_or_create(None).unwrap();
        let (same_id, _) = manager.get_or_create(Some(&id)).unwrap();
        assert_eq!(id, same_id);
        assert_eq!(manager.active_count(), 1);

        let (new_id, _) = manager.get_or_create(Some("unknown")).unwrap();
        assert_ne!(new_id, "unknown");
        assert_eq!(manager.active_count(), 2);
    }

    #[tokio::test]
    async fn test_session_limit() {
        let manager = SessionManager::new(2, 30, None);

        manager.create().unwrap();
        manager.create().unwrap();

        let result = manager.create();
        assert!(matches!(
            result,
            Err(TriageError::SessionLimit { active: 2, max: 2 })
        ));
    }

    #[tokio::test]
    async fn test_session_deletion() {
        let manager = SessionManager::new(10, 30, None);

        let (id, _) = manager.create().unwrap();
        assert!(manager.delete(&id));
        assert_eq!(manager.active_count(), 0);
        assert!(!manager.delete(&id));
        assert!(matches!(manager.get(&id), Err(TriageError::SessionNotFound(_))));
    }

    #[tokio::test]
    async fn test_reset_refused_during_turn() {
        let manager = SessionManager::new(10, 30, None);
        let (id, entry) = manager.create().unwrap();

        let turn_guard = entry.lock().await;
        assert!(matches!(
            manager.lock_for_reset(&id),
            Err(TriageError::InvalidReset { .. })
        ));
        drop(turn_guard);

        assert!(manager.lock_for_reset(&id).is_ok());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_respect_limit() {
        let manager = Arc::new(SessionManager::new(8, 30, None));

        let handles: Vec<_> = (0..32)
            .map(|_| {
                let manager = Arc::clone(&manager);
                tokio::spawn(async move { manager.create().is_ok() })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap() {
                created += 1;
            }
        }

        assert_eq!(created, 8);
        assert_eq!(manager.active_count(), 8);
    }

    #[tokio::test]
    async fn test_lookup_refreshes_idle_timer() {
        let manager = SessionManager::new(10, 30, None);
        let (id, entry) = manager.create().unwrap();

        entry.lock().await.last_activity = Utc::now() - chrono::Duration::minutes(45);
        manager.get(&id).unwrap();

        assert_eq!(remove_expired(&manager.sessions, 30), 0);
        assert!(manager.get(&id).is_ok());
    }

    #[tokio::test]
    async fn test_expired_sessions_removed() {
        let manager = SessionManager::new(10, 30, None);
        let (stale, entry) = manager.create().unwrap();
        let (fresh, _) = manager.create().unwrap();

        entry.lock().await.last_activity = Utc::now() - chrono::Duration::minutes(45);

        assert_eq!(remove_expired(&manager.sessions, 30), 1);
        assert!(manager.get(&stale).is_err());
        assert!(manager.get(&fresh).is_ok());
    }
}
