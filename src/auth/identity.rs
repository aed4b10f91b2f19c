/**
 * Canonical Identity
 *
 * This module builds and validates the canonical bare identity string
 * (`local@domain`) used by the messaging protocol. Construction is the only
 * way to obtain an `Identity`, so holding one implies the grammar checks
 * have passed.
 *
 * # Grammar
 *
 * - localpart: non-empty, none of `" & ' / : < > @`, no whitespace or
 *   control characters
 * - domain: non-empty, no `@` or `/`, no whitespace or control characters,
 *   no empty labels (leading, trailing or doubled dots)
 *
 * Validation is deterministic and performs no I/O.
 */
use std::fmt;

use crate::shared::error::AuthError;

/// Characters the protocol forbids in a localpart
const ILLEGAL_LOCAL_CHARS: &[char] = &['"', '&', '\'', '/', ':', '<', '>', '@'];

/// Canonical `local@domain` identity
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    full: String,
    local_len: usize,
}

impl Identity {
    /// Build an identity from a local username and a service domain
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidIdentity`] when either part violates the
    /// identity grammar. The error carries the full candidate string.
    pub fn build(local: &str, domain: &str) -> Result<Self, AuthError> {
        let full = format!("{}@{}", local, domain);

        if local.is_empty() {
            return Err(AuthError::invalid_identity(full, "empty localpart"));
        }
        if let Some(c) = local
            .chars()
            .find(|c| ILLEGAL_LOCAL_CHARS.contains(c) || c.is_whitespace() || c.is_control())
        {
            return Err(AuthError::invalid_identity(
                full,
                format!("localpart contains {:?}", c),
            ));
        }

        if domain.is_empty() {
            return Err(AuthError::invalid_identity(full, "empty domain"));
        }
        if let Some(c) = domain
            .chars()
            .find(|&c| c == '@' || c == '/' || c.is_whitespace() || c.is_control())
        {
            return Err(AuthError::invalid_identity(
                full,
                format!("domain contains {:?}", c),
            ));
        }
        if domain.split('.').any(str::is_empty) {
            return Err(AuthError::invalid_identity(full, "domain has an empty label"));
        }

        Ok(Self {
            full,
            local_len: local.len(),
        })
    }

    /// The localpart
    pub fn local(&self) -> &str {
        &self.full[..self.local_len]
    }

    /// The domain
    pub fn domain(&self) -> &str {
        &self.full[self.local_len + 1..]
    }

    /// The full `local@domain` string
    pub fn as_str(&self) -> &str {
        &self.full
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full)
    }
}

impl AsRef<str> for Identity {
    fn as_ref(&self) -> &str {
        &self.full
    }
}
