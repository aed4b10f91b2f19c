//! Authentication Module
//!
//! The authentication lifecycle for the chat client: establishing a user
//! identity against the messaging backend, caching credentials for silent
//! re-authentication, and triggering post-authentication setup once the
//! connection is live.
//!
//! # Overview
//!
//! [`AuthenticationController`] is the entry point. It is wired up with the
//! connection facade and its collaborators via
//! [`AuthenticationController::builder`], and exposes the login, register,
//! cached-token and logout flows as single-shot asynchronous operations.

/// Account details and modes
pub mod details;

/// Canonical identity derivation
pub mod identity;

/// Credential persistence
pub mod store;

/// Session login-info map
pub mod session;

/// Post-authentication setup fan-out
pub mod setup;

/// The lifecycle controller
pub mod controller;

/// Re-export commonly used types for convenience
pub use controller::{AuthenticationController, AuthenticationControllerBuilder};
pub use details::{AccountDetails, AccountType};
pub use identity::Identity;
pub use session::{SessionState, CURRENT_USER_KEY};
pub use setup::SetupDispatcher;
pub use store::{CredentialStore, FileCredentialStore, MemoryCredentialStore, PASSWORD_KEY, USERNAME_KEY};

#[cfg(feature = "keyring")]
pub use store::KeyringCredentialStore;
