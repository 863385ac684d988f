//! Per-session visit counter
//!
//! Process-scoped state keyed by an opaque session key the client carries
//! between requests. Nothing here is persisted centrally.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use rand::distributions::Alphanumeric;
use rand::Rng;

const SESSION_KEY_LEN: usize = 32;

fn new_session_key() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SESSION_KEY_LEN)
        .map(char::from)
        .collect()
}

#[derive(Clone, Default)]
pub struct SessionsService {
    visits: Arc<Mutex<HashMap<String, i64>>>,
}

impl SessionsService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a visit for the given session key (a missing key starts a new
    /// session). Returns the key and the visit count before this visit.
    pub fn record_visit(&self, session_key: Option<String>) -> (String, i64) {
        let key = session_key.unwrap_or_else(new_session_key);

        let mut visits = self.visits.lock().expect("visit counter lock poisoned");
        let count = visits.entry(key.clone()).or_insert(0);
        let seen = *count;
        *count += 1;

        (key, seen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_visit_is_zero_then_counts_up() {
        let sessions = SessionsService::new();
        let (key, seen) = sessions.record_visit(None);
        assert_eq!(seen, 0);

        let (key2, seen) = sessions.record_visit(Some(key.clone()));
        assert_eq!(key2, key);
        assert_eq!(seen, 1);

        let (_, seen) = sessions.record_visit(Some(key));
        assert_eq!(seen, 2);
    }

    #[test]
    fn sessions_are_independent() {
        let sessions = SessionsService::new();
        let (a, _) = sessions.record_visit(None);
        sessions.record_visit(Some(a.clone()));

        let (b, seen_b) = sessions.record_visit(None);
        assert_ne!(a, b);
        assert_eq!(seen_b, 0);

        let (_, seen_a) = sessions.record_visit(Some(a));
        assert_eq!(seen_a, 2);
    }
}
