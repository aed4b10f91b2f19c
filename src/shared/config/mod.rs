//! Application configuration module
//!
//! Provides configuration types for the chat client: the service domain the
//! client authenticates against and the location of the credential store.

use std::path::PathBuf;

use thiserror::Error;

/// Default service domain
const DEFAULT_SERVICE_DOMAIN: &str = "localhost";

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Domain of the messaging service, used as the identity domain
    pub service_domain: String,
    /// Location of the credential store file, `None` for the platform default
    pub credential_path: Option<PathBuf>,
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Build a configuration from environment variables
    ///
    /// `XFCHAT_SERVICE_DOMAIN` overrides the service domain and
    /// `XFCHAT_CREDENTIALS_PATH` overrides the credential store location.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = Self::builder().service_domain(
            std::env::var("XFCHAT_SERVICE_DOMAIN")
                .unwrap_or_else(|_| DEFAULT_SERVICE_DOMAIN.to_string()),
        );
        if let Ok(path) = std::env::var("XFCHAT_CREDENTIALS_PATH") {
            builder = builder.credential_path(PathBuf::from(path));
        }
        builder.build()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service_domain: DEFAULT_SERVICE_DOMAIN.to_string(),
            credential_path: None,
        }
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    service_domain: Option<String>,
    credential_path: Option<PathBuf>,
}

impl AppConfigBuilder {
    /// Set the service domain
    pub fn service_domain(mut self, domain: impl Into<String>) -> Self {
        self.service_domain = Some(domain.into());
        self
    }

    /// Set the credential store path
    pub fn credential_path(mut self, path: PathBuf) -> Self {
        self.credential_path = Some(path);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let service_domain = self
            .service_domain
            .ok_or(ConfigError::MissingValue("service_domain"))?;
        if service_domain.is_empty()
            || service_domain.contains('@')
            || service_domain.contains(char::is_whitespace)
        {
            return Err(ConfigError::InvalidDomain(service_domain));
        }
        Ok(AppConfig {
            service_domain,
            credential_path: self.credential_path,
        })
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid service domain: {0}")]
    InvalidDomain(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
}
