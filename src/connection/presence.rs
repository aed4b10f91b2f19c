//! Presence collaborator contract.

use async_trait::async_trait;

use crate::connection::directory::User;
use crate::connection::ConnectionError;

/// Announces availability for an authenticated user
#[async_trait]
pub trait PresenceService: Send + Sync {
    /// Broadcast an online presence for `user`
    async fn go_online(&self, user: &User) -> Result<(), ConnectionError>;
}
