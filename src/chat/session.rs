// Session management for concurrent chat clients

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time;
use uuid::Uuid;

use crate::triage::{EmotionCategory, EmotionHistory};

/// Per-session state.
///
/// The emotion history lives here so trends never leak across users: each
/// session starts with an empty history and the history is discarded when
/// the session ends.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Unique session identifier
    pub id: String,
    /// User who started the session
    pub user_id: String,
    /// Rolling emotion history for this session
    pub emotion_history: EmotionHistory,
    /// Last activity timestamp
    pub last_activity: DateTime<Utc>,
    /// Session creation time
    pub created_at: DateTime<Utc>,
}

impl SessionState {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            emotion_history: EmotionHistory::new(),
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

/// Concurrent session manager backed by DashMap.
pub struct SessionManager {
    sessions: Arc<DashMap<String, SessionState>>,
    timeout_minutes: u64,
}

impl SessionManager {
    pub fn new(timeout_minutes: u64) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            timeout_minutes,
        }
    }

    /// Create a new session for a user, returning its id.
    pub fn create(&self, user_id: &str) -> String {
        let session = SessionState::new(user_id);
        let id = session.id.clone();
        self.sessions.insert(id.clone(), session);

        tracing::info!(session_id = %id, user_id = %user_id, "Created new session");
        id
    }

    /// Look up a session by id.
    pub fn get(&self, session_id: &str) -> Option<SessionState> {
        self.sessions.get(session_id).map(|entry| entry.clone())
    }

    /// Record an emotion outcome on a session and refresh its activity
    /// timestamp. Returns false if the session does not exist.
    pub fn record_emotion(&self, session_id: &str, category: EmotionCategory) -> bool {
        match self.sessions.get_mut(session_id) {
            Some(mut session) => {
                session.emotion_history.record(category);
                session.touch();
                true
            }
            None => false,
        }
    }

    /// Current emotion trend for a session.
    pub fn emotion_trend(
        &self,
        session_id: &str,
    ) -> std::collections::BTreeMap<EmotionCategory, usize> {
        self.sessions
            .get(session_id)
            .map(|session| session.emotion_history.trend())
            .unwrap_or_default()
    }

    /// Delete a session, discarding its emotion history.
    pub fn delete(&self, session_id: &str) -> bool {
        self.sessions.remove(session_id).is_some()
    }

    /// Get active session count
    pub fn active_count(&self) -> usize {
        self.sessions.len()
    }

    /// Remove sessions with no activity inside the timeout window.
    pub fn cleanup_expired(&self) -> usize {
        evict_expired(&self.sessions, self.timeout_minutes)
    }

    /// Spawn a background task that periodically removes expired sessions.
    /// Must be called from within a tokio runtime.
    pub fn start_cleanup_task(&self) {
        let sessions = Arc::clone(&self.sessions);
        let timeout_minutes = self.timeout_minutes;

        tokio::spawn(async move {
            let mut interval = time::interval(Duration::from_secs(60));

            loop {
                interval.tick().await;
                evict_expired(&sessions, timeout_minutes);
            }
        });
    }
}

fn evict_expired(sessions: &DashMap<String, SessionState>, timeout_minutes: u64) -> usize {
    let expired: Vec<String> = sessions
        .iter()
        .filter(|entry| entry.value().is_expired(timeout_minutes))
        .map(|entry| entry.key().clone())
        .collect();

    let mut removed = 0;
    for session_id in expired {
        if sessions.remove(&session_id).is_some() {
            removed += 1;
            tracing::debug!(session_id = %session_id, "Removed expired session");
        }
    }

    if removed > 0 {
        tracing::info!(
            removed = removed,
            active = sessions.len(),
            "Cleaned up expired sessions"
        );
    }

    removed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_creation() {
        let manager = SessionManager::new(30);

        let id1 = manager.create("student-1");
        let id2 = manager.create("student-2");

        assert_ne!(id1, id2);
        assert_eq!(manager.active_count(), 2);
        assert_eq!(manager.get(&id1).unwrap().user_id, "student-1");
    }

    #[test]
    fn test_new_session_starts_with_empty_history() {
        let manager = SessionManager::new(30);
        let id = manager.create("student-1");

        assert!(manager.emotion_trend(&id).is_empty());
    }

    #[test]
    fn test_record_emotion_is_per_session() {
        let manager = SessionManager::new(30);
        let id1 = manager.create("student-1");
        let id2 = manager.create("student-2");

        manager.record_emotion(&id1, EmotionCategory::Anxious);
        manager.record_emotion(&id1, EmotionCategory::Anxious);
        manager.record_emotion(&id2, EmotionCategory::Hopeful);

        let trend1 = manager.emotion_trend(&id1);
        assert_eq!(trend1[&EmotionCategory::Anxious], 2);
        assert!(!trend1.contains_key(&EmotionCategory::Hopeful));

        let trend2 = manager.emotion_trend(&id2);
        assert_eq!(trend2[&EmotionCategory::Hopeful], 1);
    }

    #[test]
    fn test_record_emotion_on_unknown_session() {
        let manager = SessionManager::new(30);
        assert!(!manager.record_emotion("missing", EmotionCategory::Neutral));
    }

    #[test]
    fn test_delete_discards_history() {
        let manager = SessionManager::new(30);
        let id = manager.create("student-1");
        manager.record_emotion(&id, EmotionCategory::Stressed);

        assert!(manager.delete(&id));
        assert!(!manager.delete(&id));
        assert!(manager.emotion_trend(&id).is_empty());
    }

    #[test]
    fn test_cleanup_expired() {
        let manager = SessionManager::new(0);
        let id = manager.create("student-1");

        // Timeout of zero minutes expires sessions immediately.
        assert!(manager.get(&id).unwrap().is_expired(0));
        assert_eq!(manager.cleanup_expired(), 1);
        assert_eq!(manager.active_count(), 0);
    }

    #[tokio::test]
    async fn test_cleanup_task_evicts_expired_sessions() {
        let manager = SessionManager::new(0);
        manager.create("student-1");
        manager.start_cleanup_task();

        // The first interval tick fires immediately.
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(manager.active_count(), 0);
    }
}
