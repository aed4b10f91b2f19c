//! Shared Error Types
//!
//! This module defines the error taxonomy for the authentication lifecycle.
//! Connection-layer errors are wrapped transparently so callers see the
//! original failure; everything the controller itself can reject carries its
//! own variant.
//!
//! # Error Categories
//!
//! - `AuthError` - terminal outcomes of authentication operations
//! - `StoreError` - credential storage failures
//!
//! # Thread Safety
//!
//! All error types are `Send + Sync` and can be safely shared across thread
//! boundaries.
use thiserror::Error;

use crate::auth::details::AccountType;
use crate::connection::ConnectionError;

/// Errors produced by authentication operations
#[derive(Debug, Error)]
pub enum AuthError {
    /// Transport or protocol failure from the connection layer
    ///
    /// Propagated verbatim so the caller sees the underlying cause;
    /// the controller never retries or rewraps these.
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    /// The requested authentication mode is not implemented by this backend
    #[error("Login method not supported: {account_type}")]
    UnsupportedMode {
        /// The mode that was requested
        account_type: AccountType,
    },

    /// Cached credentials are absent or malformed
    #[error("Login details not valid: {message}")]
    InvalidCachedCredentials {
        /// Human-readable error message
        message: String,
    },

    /// The derived identity fails the protocol's identity grammar
    ///
    /// Detected strictly after a successful login; still fails the outer
    /// operation because an unusable identity makes the session unusable.
    #[error("Invalid identity '{value}': {message}")]
    InvalidIdentity {
        /// The identity string that failed validation
        value: String,
        /// Human-readable error message
        message: String,
    },

    /// The operation is not offered by this backend
    #[error("{operation} not supported")]
    UnsupportedOperation {
        /// Name of the unsupported operation
        operation: &'static str,
    },

    /// Credential storage failure while persisting a successful login
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AuthError {
    /// Create a new unsupported-mode error
    pub fn unsupported_mode(account_type: AccountType) -> Self {
        Self::UnsupportedMode { account_type }
    }

    /// Create a new invalid-cached-credentials error
    pub fn invalid_cached(message: impl Into<String>) -> Self {
        Self::InvalidCachedCredentials {
            message: message.into(),
        }
    }

    /// Create a new invalid-identity error
    pub fn invalid_identity(value: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidIdentity {
            value: value.into(),
            message: message.into(),
        }
    }

    /// Create a new unsupported-operation error
    pub fn unsupported_operation(operation: &'static str) -> Self {
        Self::UnsupportedOperation { operation }
    }
}

/// Credential storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying storage I/O failure
    #[error("Credential storage error: {message}")]
    Io {
        /// Human-readable error message
        message: String,
    },

    /// Stored data could not be encoded or decoded
    #[error("Credential encoding error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Create a new storage I/O error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}
