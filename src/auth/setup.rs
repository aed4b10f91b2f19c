/**
 * Post-Authentication Setup
 *
 * Fans out the side effects of a confirmed login: resolve the local user
 * record, announce presence, subscribe the push channel, and run the
 * connection's own setup hook.
 *
 * # Failure Policy
 *
 * The login has already succeeded by the time this runs, so nothing here
 * may change that outcome. Every step is logged on failure and the fan-out
 * continues; only a dead connection stops it early, silently.
 */
use std::sync::Arc;

use crate::auth::identity::Identity;
use crate::connection::{ConnectionFacade, PresenceService, PushService, UserDirectory};

/// Dispatches the post-authentication side effects
pub struct SetupDispatcher {
    connection: Arc<dyn ConnectionFacade>,
    directory: Arc<dyn UserDirectory>,
    presence: Arc<dyn PresenceService>,
    push: Option<Arc<dyn PushService>>,
}

impl SetupDispatcher {
    /// Create a dispatcher over the configured collaborators
    pub fn new(
        connection: Arc<dyn ConnectionFacade>,
        directory: Arc<dyn UserDirectory>,
        presence: Arc<dyn PresenceService>,
        push: Option<Arc<dyn PushService>>,
    ) -> Self {
        Self {
            connection,
            directory,
            presence,
            push,
        }
    }

    /// Run the setup bundle for a freshly authenticated identity
    ///
    /// Skips everything if the session died between authentication and this
    /// call; that race is benign and not an error.
    pub async fn run(&self, identity: &Identity) {
        if !(self.connection.is_authenticated() && self.connection.is_connected()) {
            tracing::debug!(
                "[Auth] Session for {} no longer live, skipping post-authentication setup",
                identity
            );
            return;
        }

        match self.directory.fetch_or_create(identity.as_str()).await {
            Ok(user) => {
                if let Err(e) = self.presence.go_online(&user).await {
                    tracing::warn!("[Auth] Failed to announce presence for {}: {}", identity, e);
                }
            }
            // Presence needs the record, so it is skipped too.
            Err(e) => {
                tracing::warn!("[Auth] Failed to resolve user record for {}: {}", identity, e);
            }
        }

        if let Some(push) = &self.push {
            if let Err(e) = push.subscribe(identity.as_str()).await {
                tracing::warn!("[Auth] Push subscription failed for {}: {}", identity, e);
            }
        }

        if let Err(e) = self.connection.perform_post_authentication_setup().await {
            tracing::warn!("[Auth] Connection setup hook failed for {}: {}", identity, e);
        }
    }
}
