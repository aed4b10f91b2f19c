//! In-memory session state.
//!
//! A small login-info map owned by the controller instance. Written by the
//! post-authentication procedure, read by logout and user queries, cleared
//! on logout. Guarded with a lock so readers on other threads stay safe.

use std::collections::HashMap;
use std::sync::RwLock;

/// Session key under which the current user's identity is recorded
pub const CURRENT_USER_KEY: &str = "auth.current-user";

/// Login-info map for the active session
#[derive(Debug, Default)]
pub struct SessionState {
    entries: RwLock<HashMap<String, String>>,
}

impl SessionState {
    /// Create an empty session state
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a value for `key`
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.into(), value.into());
    }

    /// Read the value for `key`
    pub fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.get(key).cloned()
    }

    /// Drop everything recorded for the session
    pub fn clear(&self) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.clear();
    }

    /// Identity of the currently authenticated user, if any
    pub fn current_user(&self) -> Option<String> {
        self.get(CURRENT_USER_KEY)
    }

    /// Whether nothing is recorded
    pub fn is_empty(&self) -> bool {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.is_empty()
    }
}
