//! Account details supplied to an authentication attempt.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Authentication mode requested by the caller
///
/// Only `Username` and `Register` are live against this backend; the other
/// modes exist in the account taxonomy but are rejected with an
/// unsupported-mode error before any I/O happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// Log in with an existing username/password pair
    Username,
    /// Register a new account in-band, then log in separately
    Register,
    /// Anonymous session (not offered by this backend)
    Anonymous,
    /// Pre-issued token (not offered by this backend)
    CachedToken,
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Username => "username",
            Self::Register => "register",
            Self::Anonymous => "anonymous",
            Self::CachedToken => "cached_token",
        };
        write!(f, "{}", name)
    }
}

/// Input to an authentication attempt
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountDetails {
    /// Requested authentication mode
    pub account_type: AccountType,
    /// Local username (no domain part)
    pub username: String,
    /// Opaque secret
    pub password: String,
}

impl AccountDetails {
    /// Details for a username/password login
    pub fn username(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            account_type: AccountType::Username,
            username: username.into(),
            password: password.into(),
        }
    }

    /// Details for an in-band registration
    pub fn register(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            account_type: AccountType::Register,
            username: username.into(),
            password: password.into(),
        }
    }

    /// Whether both username and password are present
    ///
    /// Empty details are never persisted, but they are not rejected here:
    /// a live attempt is allowed to proceed and fail at the connection.
    pub fn login_details_valid(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

// Passwords must not leak through debug logging.
impl fmt::Debug for AccountDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountDetails")
            .field("account_type", &self.account_type)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
