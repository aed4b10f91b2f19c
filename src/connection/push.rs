//! Push notification collaborator contract.
//!
//! The push service is optional: deployments without a push backend simply
//! configure the controller without one, and subscription management is
//! skipped.

use async_trait::async_trait;
use thiserror::Error;

/// Push channel errors
#[derive(Debug, Error)]
pub enum PushError {
    /// Subscription state could not be changed
    #[error("Push channel error: {message}")]
    Channel {
        /// Human-readable error message
        message: String,
    },
}

impl PushError {
    /// Create a new channel error
    pub fn channel(message: impl Into<String>) -> Self {
        Self::Channel {
            message: message.into(),
        }
    }
}

/// Push-channel subscription management keyed by identity string
#[async_trait]
pub trait PushService: Send + Sync {
    /// Subscribe `identity` to its push channel
    async fn subscribe(&self, identity: &str) -> Result<(), PushError>;

    /// Unsubscribe `identity` from its push channel
    async fn unsubscribe(&self, identity: &str) -> Result<(), PushError>;
}
