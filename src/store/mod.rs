// Conversation store
// Append-only record of chat turns, keyed by session

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::triage::{EmotionCategory, SeverityLevel};

/// One completed exchange: user message, composed reply, and the triage
/// classification for the message. Immutable once appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub session_id: String,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    pub message: String,
    pub reply: String,
    pub emotion: EmotionCategory,
    pub severity: SeverityLevel,
}

/// In-memory conversation store.
///
/// Appends from independent sessions are safe concurrently; within a
/// session the map entry lock preserves strict append order. There is no
/// mutation API for stored turns.
#[derive(Default)]
pub struct ConversationStore {
    turns: DashMap<String, Vec<ConversationTurn>>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self {
            turns: DashMap::new(),
        }
    }

    /// Append a turn under its session id.
    pub fn append(&self, turn: ConversationTurn) {
        self.turns
            .entry(turn.session_id.clone())
            .or_default()
            .push(turn);
    }

    /// The most recent `limit` turns for a session, oldest first.
    pub fn recent_context(&self, session_id: &str, limit: usize) -> Vec<ConversationTurn> {
        match self.turns.get(session_id) {
            Some(entry) => {
                let turns = entry.value();
                let start = turns.len().saturating_sub(limit);
                turns[start..].to_vec()
            }
            None => Vec::new(),
        }
    }

    /// Total turns recorded for a session.
    pub fn turn_count(&self, session_id: &str) -> usize {
        self.turns
            .get(session_id)
            .map(|entry| entry.value().len())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(session_id: &str, message: &str, reply: &str) -> ConversationTurn {
        ConversationTurn {
            session_id: session_id.to_string(),
            user_id: "student-1".to_string(),
            timestamp: Utc::now(),
            message: message.to_string(),
            reply: reply.to_string(),
            emotion: EmotionCategory::Neutral,
            severity: SeverityLevel::Low,
        }
    }

    #[test]
    fn test_round_trip_single_turn() {
        let store = ConversationStore::new();
        store.append(turn("s1", "hello", "hi there"));

        let context = store.recent_context("s1", 1);
        assert_eq!(context.len(), 1);
        assert_eq!(context[0].message, "hello");
        assert_eq!(context[0].reply, "hi there");
    }

    #[test]
    fn test_recent_context_is_oldest_first() {
        let store = ConversationStore::new();
        store.append(turn("s1", "first", "r1"));
        store.append(turn("s1", "second", "r2"));
        store.append(turn("s1", "third", "r3"));

        let context = store.recent_context("s1", 2);
        assert_eq!(context.len(), 2);
        assert_eq!(context[0].message, "second");
        assert_eq!(context[1].message, "third");
    }

    #[test]
    fn test_limit_larger_than_history() {
        let store = ConversationStore::new();
        store.append(turn("s1", "only", "r"));

        let context = store.recent_context("s1", 5);
        assert_eq!(context.len(), 1);
    }

    #[test]
    fn test_sessions_are_isolated() {
        let store = ConversationStore::new();
        store.append(turn("s1", "from s1", "r"));
        store.append(turn("s2", "from s2", "r"));

        let context = store.recent_context("s1", 5);
        assert_eq!(context.len(), 1);
        assert_eq!(context[0].message, "from s1");
        assert!(store.recent_context("unknown", 5).is_empty());
    }

    #[test]
    fn test_concurrent_appends_keep_per_session_order() {
        use std::sync::Arc;

        let store = Arc::new(ConversationStore::new());
        let mut handles = Vec::new();

        for session in 0..4 {
            let store = Arc::clone(&store);
            handles.push(std::thread::spawn(move || {
                let session_id = format!("s{session}");
                for i in 0..50 {
                    store.append(turn(&session_id, &format!("msg {i}"), "r"));
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        for session in 0..4 {
            let session_id = format!("s{session}");
            assert_eq!(store.turn_count(&session_id), 50);
            let context = store.recent_context(&session_id, 50);
            for (i, turn) in context.iter().enumerate() {
                assert_eq!(turn.message, format!("msg {i}"));
            }
        }
    }
}
