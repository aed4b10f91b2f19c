/**
 * Authentication Controller
 *
 * The authentication lifecycle state machine. It coordinates the
 * connect/authenticate handshake against the connection facade, branches
 * over account-creation modes, persists credentials after success, derives
 * the canonical identity, and fans out post-authentication setup only once
 * the connection is verifiably live.
 *
 * # Authentication Process
 *
 * 1. If the session is already live, succeed immediately (idempotent)
 * 2. Dispatch on the requested account type (username / register)
 * 3. On login success: persist credentials, derive the identity,
 *    record it in session state, run post-authentication setup
 * 4. Deliver exactly one terminal result to the caller
 *
 * # Concurrency
 *
 * A single-slot lock serializes authentication attempts: at most one is in
 * flight, and a caller arriving during an attempt waits for the slot, then
 * usually completes via the already-authenticated short-circuit.
 */
use std::sync::Arc;

use tokio::sync::{broadcast, Mutex};

use crate::auth::details::{AccountDetails, AccountType};
use crate::auth::identity::Identity;
use crate::auth::session::{SessionState, CURRENT_USER_KEY};
use crate::auth::setup::SetupDispatcher;
use crate::auth::store::{CredentialStore, PASSWORD_KEY, USERNAME_KEY};
use crate::connection::{
    ConnectionFacade, ConnectionState, PresenceService, PushService, UserDirectory,
};
use crate::shared::config::ConfigError;
use crate::shared::error::AuthError;
use crate::shared::event::{self, ClientEvent, ClientEventBroadcast};

/// Authentication lifecycle controller
///
/// Owns the session login-info map and the in-flight attempt slot; all
/// collaborators are shared trait objects so the controller itself is cheap
/// to share behind an `Arc`.
pub struct AuthenticationController {
    connection: Arc<dyn ConnectionFacade>,
    store: Arc<dyn CredentialStore>,
    push: Option<Arc<dyn PushService>>,
    setup: SetupDispatcher,
    session: SessionState,
    events: ClientEventBroadcast,
    auth_slot: Mutex<()>,
}

impl AuthenticationController {
    /// Create a builder for wiring up the controller's collaborators
    pub fn builder() -> AuthenticationControllerBuilder {
        AuthenticationControllerBuilder::default()
    }

    /// Whether this backend can perform attempts of the given mode
    pub fn account_type_enabled(&self, account_type: AccountType) -> bool {
        matches!(account_type, AccountType::Username | AccountType::Register)
    }

    /// Run one authentication attempt
    ///
    /// The whole operation is a single asynchronous unit: exactly one
    /// terminal result is produced, and within it credential persistence
    /// happens before identity derivation, which happens before
    /// post-authentication setup, which happens before the returned `Ok`.
    ///
    /// # Errors
    ///
    /// * [`AuthError::Connection`] - the facade rejected the login/register,
    ///   propagated verbatim with no retry
    /// * [`AuthError::UnsupportedMode`] - mode other than username/register,
    ///   rejected before any traffic
    /// * [`AuthError::InvalidIdentity`] - login succeeded but the derived
    ///   identity fails the protocol grammar
    /// * [`AuthError::Store`] - credential persistence failed
    pub async fn authenticate(&self, details: AccountDetails) -> Result<(), AuthError> {
        let _slot = self.auth_slot.lock().await;

        // Repeated calls while already logged in are free.
        if self.connection.is_connected_and_authenticated() {
            tracing::debug!("[Auth] Already connected and authenticated, nothing to do");
            return Ok(());
        }

        match details.account_type {
            AccountType::Username => self.login_and_complete(&details).await,
            AccountType::Register => {
                tracing::info!("[Auth] Registering account for {}", details.username);
                self.connection
                    .register(&details.username, &details.password)
                    .await?;
                Ok(())
            }
            other => {
                tracing::warn!("[Auth] Rejecting unsupported login method: {}", other);
                Err(AuthError::unsupported_mode(other))
            }
        }
    }

    async fn login_and_complete(&self, details: &AccountDetails) -> Result<(), AuthError> {
        tracing::info!("[Auth] Logging in as {}", details.username);
        self.connection
            .login(&details.username, &details.password)
            .await?;

        self.store.put(USERNAME_KEY, &details.username)?;
        self.store.put(PASSWORD_KEY, &details.password)?;

        // The login itself is not rolled back if derivation fails; the
        // session is unusable without a well-formed identity, so the outer
        // operation still fails.
        let identity = Identity::build(&details.username, &self.connection.service_name())?;
        tracing::info!("[Auth] Authentication complete for {}", identity);

        self.session.set(CURRENT_USER_KEY, identity.as_str());
        self.setup.run(&identity).await;
        tracing::debug!("[Auth] Setup tasks complete for {}", identity);
        Ok(())
    }

    /// Authenticate silently with the cached credential pair
    ///
    /// Fails without any network I/O when the cache is absent or malformed.
    pub async fn authenticate_with_cached_token(&self) -> Result<(), AuthError> {
        let details = self.cached_account_details().await?;
        self.authenticate(details).await
    }

    /// Read the cached credential pair as ready-to-use account details
    ///
    /// A synchronous store read behind the same asynchronous contract as
    /// the network paths, so callers treat all authentication paths
    /// uniformly.
    pub async fn cached_account_details(&self) -> Result<AccountDetails, AuthError> {
        let username = self
            .store
            .get(USERNAME_KEY)
            .map_err(|e| AuthError::invalid_cached(e.to_string()))?
            .unwrap_or_default();
        let password = self
            .store
            .get(PASSWORD_KEY)
            .map_err(|e| AuthError::invalid_cached(e.to_string()))?
            .unwrap_or_default();

        let details = AccountDetails::username(username, password);
        if details.login_details_valid() {
            Ok(details)
        } else {
            Err(AuthError::invalid_cached("no cached username/password pair"))
        }
    }

    /// Whether the connection currently has an authenticated session
    pub fn user_authenticated(&self) -> bool {
        self.connection.is_authenticated()
    }

    /// Connection state as observed through the facade
    pub fn connection_state(&self) -> ConnectionState {
        self.connection.state()
    }

    /// Tear down the session
    ///
    /// Unsubscribes the current user's push channel when one is configured,
    /// logs the connection out, clears session state and publishes a single
    /// logout event. Always succeeds; downstream unsubscribe failures are
    /// logged only.
    pub async fn logout(&self) -> Result<(), AuthError> {
        if let Some(push) = &self.push {
            if let Some(current) = self.session.current_user() {
                if let Err(e) = push.unsubscribe(&current).await {
                    tracing::warn!("[Auth] Push unsubscribe failed for {}: {}", current, e);
                }
            }
        }

        self.connection.logout().await;
        self.session.clear();
        event::publish_event(&self.events, ClientEvent::logout());
        tracing::info!("[Auth] Logged out");
        Ok(())
    }

    /// Change the account password
    ///
    /// # Errors
    ///
    /// Always [`AuthError::UnsupportedOperation`]; the backend does not
    /// offer password changes.
    pub async fn change_password(
        &self,
        _email: &str,
        _old_password: &str,
        _new_password: &str,
    ) -> Result<(), AuthError> {
        Err(AuthError::unsupported_operation("Password change"))
    }

    /// Send a password reset mail
    ///
    /// # Errors
    ///
    /// Always [`AuthError::UnsupportedOperation`]; the backend does not
    /// offer password reset mails.
    pub async fn send_password_reset_mail(&self, _email: &str) -> Result<(), AuthError> {
        Err(AuthError::unsupported_operation("Password reset email"))
    }

    /// Session login-info map
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Subscribe to client events published by this controller
    pub fn subscribe_events(&self) -> broadcast::Receiver<ClientEvent> {
        self.events.subscribe()
    }
}

/// Builder for [`AuthenticationController`]
///
/// Connection, credential store, user directory and presence service are
/// required; the push service and the event channel are optional (a private
/// channel is created when none is supplied).
#[derive(Default)]
pub struct AuthenticationControllerBuilder {
    connection: Option<Arc<dyn ConnectionFacade>>,
    store: Option<Arc<dyn CredentialStore>>,
    directory: Option<Arc<dyn UserDirectory>>,
    presence: Option<Arc<dyn PresenceService>>,
    push: Option<Arc<dyn PushService>>,
    events: Option<ClientEventBroadcast>,
}

impl AuthenticationControllerBuilder {
    /// Set the connection facade
    pub fn connection(mut self, connection: Arc<dyn ConnectionFacade>) -> Self {
        self.connection = Some(connection);
        self
    }

    /// Set the credential store
    pub fn credential_store(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the user directory
    pub fn user_directory(mut self, directory: Arc<dyn UserDirectory>) -> Self {
        self.directory = Some(directory);
        self
    }

    /// Set the presence service
    pub fn presence_service(mut self, presence: Arc<dyn PresenceService>) -> Self {
        self.presence = Some(presence);
        self
    }

    /// Set the optional push service
    pub fn push_service(mut self, push: Arc<dyn PushService>) -> Self {
        self.push = Some(push);
        self
    }

    /// Publish events on an existing channel instead of a private one
    pub fn event_bus(mut self, events: ClientEventBroadcast) -> Self {
        self.events = Some(events);
        self
    }

    /// Build the controller
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingValue`] when a required collaborator was not
    /// supplied.
    pub fn build(self) -> Result<AuthenticationController, ConfigError> {
        let connection = self.connection.ok_or(ConfigError::MissingValue("connection"))?;
        let store = self.store.ok_or(ConfigError::MissingValue("credential_store"))?;
        let directory = self.directory.ok_or(ConfigError::MissingValue("user_directory"))?;
        let presence = self.presence.ok_or(ConfigError::MissingValue("presence_service"))?;
        let events = self
            .events
            .unwrap_or_else(|| event::event_channel().0);

        let setup = SetupDispatcher::new(
            Arc::clone(&connection),
            directory,
            presence,
            self.push.clone(),
        );

        Ok(AuthenticationController {
            connection,
            store,
            push: self.push,
            setup,
            session: SessionState::new(),
            events,
            auth_slot: Mutex::new(()),
        })
    }
}
