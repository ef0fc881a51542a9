use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use crate::config::AppConfig;

/// Application state shared between connections
pub struct AppState {
    pub config: AppConfig,
    sessions: Mutex<HashSet<String>>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            sessions: Mutex::new(HashSet::new()),
        }
    }

    /// Register a session id and return the number of active sessions
    pub fn register_session(&self, id: &str) -> usize {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        sessions.insert(id.to_string());
        sessions.len()
    }

    /// Forget a session id and return the number of active sessions
    pub fn unregister_session(&self, id: &str) -> usize {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        sessions.remove(id);
        sessions.len()
    }

    pub fn active_sessions(&self) -> usize {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}
