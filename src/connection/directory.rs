/**
 * User Directory Contract
 *
 * This module defines the local user-record storage collaborator.
 * Post-authentication setup resolves the authenticated identity to a
 * `User` record here with creation-or-fetch semantics.
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Local user record keyed by a canonical identity string
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique record ID (UUID)
    pub id: Uuid,
    /// Canonical identity string (`local@domain`)
    pub entity_id: String,
    /// Display name, if one has been set
    pub display_name: Option<String>,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user record for an identity
    pub fn new(entity_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            entity_id: entity_id.into(),
            display_name: None,
            created_at: Utc::now(),
        }
    }
}

/// User directory errors
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Record lookup or creation failed
    #[error("Directory error: {message}")]
    Lookup {
        /// Human-readable error message
        message: String,
    },
}

impl DirectoryError {
    /// Create a new lookup error
    pub fn lookup(message: impl Into<String>) -> Self {
        Self::Lookup {
            message: message.into(),
        }
    }
}

/// Storage collaborator resolving identities to local user records
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Fetch the record for `entity_id`, creating it if absent
    ///
    /// Must never create a duplicate for an identity that already has a
    /// record.
    async fn fetch_or_create(&self, entity_id: &str) -> Result<User, DirectoryError>;
}
