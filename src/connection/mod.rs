/**
 * Connection Layer Contracts
 *
 * This module defines the contracts the authentication lifecycle consumes
 * from the connection layer: the connection facade itself plus the
 * directory, presence and push collaborators that post-authentication
 * setup fans out to.
 *
 * # Ownership
 *
 * The connection owns its own state machine, reconnect strategy and wire
 * protocol. This crate only observes connection state and drives the
 * login/register/logout primitives; it never mutates connection state
 * directly.
 */
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// User directory collaborator
pub mod directory;

/// Presence collaborator
pub mod presence;

/// Push notification collaborator
pub mod push;

pub use directory::{DirectoryError, User, UserDirectory};
pub use presence::PresenceService;
pub use push::{PushError, PushService};

/// Connection lifecycle state as observed through the facade queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    /// No transport established
    Disconnected,
    /// Transport up, no authenticated session
    Connected,
    /// Session credentials accepted but transport currently down
    Authenticated,
    /// Live, usable session
    ConnectedAndAuthenticated,
}

/// Errors reported by the connection layer
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConnectionError {
    /// Transport could not be established
    #[error("Connection failed: {message}")]
    ConnectFailed {
        /// Human-readable error message
        message: String,
    },

    /// The server rejected the credentials
    #[error("Authentication failed: {message}")]
    AuthFailed {
        /// Human-readable error message
        message: String,
    },

    /// In-band account registration failed
    #[error("Registration failed: {message}")]
    RegistrationFailed {
        /// Human-readable error message
        message: String,
    },

    /// The connection was torn down while an operation was in flight
    #[error("Connection closed: {message}")]
    Closed {
        /// Human-readable error message
        message: String,
    },
}

impl ConnectionError {
    /// Create a new connect-failed error
    pub fn connect(message: impl Into<String>) -> Self {
        Self::ConnectFailed {
            message: message.into(),
        }
    }

    /// Create a new authentication-failed error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::AuthFailed {
            message: message.into(),
        }
    }

    /// Create a new registration-failed error
    pub fn registration(message: impl Into<String>) -> Self {
        Self::RegistrationFailed {
            message: message.into(),
        }
    }

    /// Create a new connection-closed error
    pub fn closed(message: impl Into<String>) -> Self {
        Self::Closed {
            message: message.into(),
        }
    }
}

/// Facade over the messaging-protocol connection
///
/// An in-flight `login`/`register` future must resolve with
/// [`ConnectionError::Closed`] rather than hang if the connection is torn
/// down underneath it.
#[async_trait]
pub trait ConnectionFacade: Send + Sync {
    /// Establish the transport without authenticating
    async fn connect(&self) -> Result<(), ConnectionError>;

    /// Authenticate an existing account
    async fn login(&self, username: &str, password: &str) -> Result<(), ConnectionError>;

    /// Register a new account in-band
    async fn register(&self, username: &str, password: &str) -> Result<(), ConnectionError>;

    /// Tear down the session and transport
    async fn logout(&self);

    /// Whether the transport is currently up
    fn is_connected(&self) -> bool;

    /// Whether the session has been authenticated
    fn is_authenticated(&self) -> bool;

    /// Whether the session is live and usable
    fn is_connected_and_authenticated(&self) -> bool {
        self.is_connected() && self.is_authenticated()
    }

    /// Domain name of the service this connection talks to
    fn service_name(&self) -> String;

    /// Connection-owned setup run once per authenticated session
    async fn perform_post_authentication_setup(&self) -> Result<(), ConnectionError>;

    /// Current state derived from the liveness queries
    fn state(&self) -> ConnectionState {
        match (self.is_connected(), self.is_authenticated()) {
            (true, true) => ConnectionState::ConnectedAndAuthenticated,
            (true, false) => ConnectionState::Connected,
            (false, true) => ConnectionState::Authenticated,
            (false, false) => ConnectionState::Disconnected,
        }
    }
}
