//! Common test utilities and helpers
//!
//! This module provides shared utilities for the controller tests:
//! - Call-counting mock collaborators for every contract the controller
//!   consumes
//! - A harness for wiring a controller out of mocks

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use xfchat::auth::AuthenticationController;
use xfchat::connection::{
    ConnectionError, ConnectionFacade, DirectoryError, PresenceService, PushError, PushService,
    User, UserDirectory,
};

/// Mock connection facade with configurable outcomes and call counters
pub struct MockFacade {
    connected: AtomicBool,
    authenticated: AtomicBool,
    service: String,
    /// Login succeeds but the session immediately dies (mid-setup race)
    die_after_login: AtomicBool,
    /// Artificial latency for login, for concurrency tests
    login_delay: Mutex<Option<Duration>>,
    login_error: Mutex<Option<ConnectionError>>,
    register_error: Mutex<Option<ConnectionError>>,
    pub connect_calls: AtomicUsize,
    pub login_calls: AtomicUsize,
    pub register_calls: AtomicUsize,
    pub logout_calls: AtomicUsize,
    pub setup_hook_calls: AtomicUsize,
    pub last_login: Mutex<Option<(String, String)>>,
}

impl MockFacade {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            connected: AtomicBool::new(false),
            authenticated: AtomicBool::new(false),
            service: service.into(),
            die_after_login: AtomicBool::new(false),
            login_delay: Mutex::new(None),
            login_error: Mutex::new(None),
            register_error: Mutex::new(None),
            connect_calls: AtomicUsize::new(0),
            login_calls: AtomicUsize::new(0),
            register_calls: AtomicUsize::new(0),
            logout_calls: AtomicUsize::new(0),
            setup_hook_calls: AtomicUsize::new(0),
            last_login: Mutex::new(None),
        }
    }

    /// Facade that reports an already live session
    pub fn already_live(service: impl Into<String>) -> Self {
        let facade = Self::new(service);
        facade.connected.store(true, Ordering::SeqCst);
        facade.authenticated.store(true, Ordering::SeqCst);
        facade
    }

    pub fn fail_login(&self, error: ConnectionError) {
        *self.login_error.lock().unwrap() = Some(error);
    }

    pub fn fail_register(&self, error: ConnectionError) {
        *self.register_error.lock().unwrap() = Some(error);
    }

    pub fn die_after_login(&self) {
        self.die_after_login.store(true, Ordering::SeqCst);
    }

    pub fn set_login_delay(&self, delay: Duration) {
        *self.login_delay.lock().unwrap() = Some(delay);
    }

    pub fn network_calls(&self) -> usize {
        self.connect_calls.load(Ordering::SeqCst)
            + self.login_calls.load(Ordering::SeqCst)
            + self.register_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConnectionFacade for MockFacade {
    async fn connect(&self) -> Result<(), ConnectionError> {
        self.connect_calls.fetch_add(1, Ordering::SeqCst);
        self.connected.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn login(&self, username: &str, password: &str) -> Result<(), ConnectionError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_login.lock().unwrap() = Some((username.to_string(), password.to_string()));

        let delay = *self.login_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(error) = self.login_error.lock().unwrap().clone() {
            return Err(error);
        }

        if !self.die_after_login.load(Ordering::SeqCst) {
            self.connected.store(true, Ordering::SeqCst);
            self.authenticated.store(true, Ordering::SeqCst);
        }
        Ok(())
    }

    async fn register(&self, _username: &str, _password: &str) -> Result<(), ConnectionError> {
        self.register_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.register_error.lock().unwrap().clone() {
            return Err(error);
        }
        // In-band registration does not authenticate the session.
        Ok(())
    }

    async fn logout(&self) {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        self.connected.store(false, Ordering::SeqCst);
        self.authenticated.store(false, Ordering::SeqCst);
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn is_authenticated(&self) -> bool {
        self.authenticated.load(Ordering::SeqCst)
    }

    fn service_name(&self) -> String {
        self.service.clone()
    }

    async fn perform_post_authentication_setup(&self) -> Result<(), ConnectionError> {
        self.setup_hook_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Mock user directory recording every resolved identity
pub struct MockDirectory {
    fail: AtomicBool,
    pub calls: AtomicUsize,
    pub resolved: Mutex<Vec<String>>,
}

impl MockDirectory {
    pub fn new() -> Self {
        Self {
            fail: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
            resolved: Mutex::new(Vec::new()),
        }
    }

    pub fn fail_lookups(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl UserDirectory for MockDirectory {
    async fn fetch_or_create(&self, entity_id: &str) -> Result<User, DirectoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(DirectoryError::lookup("directory unavailable"));
        }
        self.resolved.lock().unwrap().push(entity_id.to_string());
        Ok(User::new(entity_id))
    }
}

/// Mock presence service
pub struct MockPresence {
    fail: AtomicBool,
    pub calls: AtomicUsize,
    pub last_user: Mutex<Option<String>>,
}

impl MockPresence {
    pub fn new() -> Self {
        Self {
            fail: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
            last_user: Mutex::new(None),
        }
    }

    pub fn fail_presence(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl PresenceService for MockPresence {
    async fn go_online(&self, user: &User) -> Result<(), ConnectionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(ConnectionError::closed("presence stream down"));
        }
        *self.last_user.lock().unwrap() = Some(user.entity_id.clone());
        Ok(())
    }
}

/// Mock push service recording subscription changes
pub struct MockPush {
    fail_subscribe: AtomicBool,
    fail_unsubscribe: AtomicBool,
    pub subscribed: Mutex<Vec<String>>,
    pub unsubscribed: Mutex<Vec<String>>,
}

impl MockPush {
    pub fn new() -> Self {
        Self {
            fail_subscribe: AtomicBool::new(false),
            fail_unsubscribe: AtomicBool::new(false),
            subscribed: Mutex::new(Vec::new()),
            unsubscribed: Mutex::new(Vec::new()),
        }
    }

    pub fn fail_subscribe(&self) {
        self.fail_subscribe.store(true, Ordering::SeqCst);
    }

    pub fn fail_unsubscribe(&self) {
        self.fail_unsubscribe.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl PushService for MockPush {
    async fn subscribe(&self, identity: &str) -> Result<(), PushError> {
        if self.fail_subscribe.load(Ordering::SeqCst) {
            return Err(PushError::channel("push gateway unavailable"));
        }
        self.subscribed.lock().unwrap().push(identity.to_string());
        Ok(())
    }

    async fn unsubscribe(&self, identity: &str) -> Result<(), PushError> {
        self.unsubscribed.lock().unwrap().push(identity.to_string());
        if self.fail_unsubscribe.load(Ordering::SeqCst) {
            return Err(PushError::channel("push gateway unavailable"));
        }
        Ok(())
    }
}

/// Everything a test needs to drive and observe one controller
pub struct Harness {
    pub controller: AuthenticationController,
    pub facade: Arc<MockFacade>,
    pub store: Arc<xfchat::auth::MemoryCredentialStore>,
    pub directory: Arc<MockDirectory>,
    pub presence: Arc<MockPresence>,
    pub push: Arc<MockPush>,
}

impl Harness {
    /// Controller over fresh mocks and the given facade
    pub fn with_facade(facade: MockFacade) -> Self {
        let facade = Arc::new(facade);
        let store = Arc::new(xfchat::auth::MemoryCredentialStore::new());
        let directory = Arc::new(MockDirectory::new());
        let presence = Arc::new(MockPresence::new());
        let push = Arc::new(MockPush::new());

        let controller = AuthenticationController::builder()
            .connection(Arc::clone(&facade) as Arc<dyn ConnectionFacade>)
            .credential_store(Arc::clone(&store) as Arc<dyn xfchat::auth::CredentialStore>)
            .user_directory(Arc::clone(&directory) as Arc<dyn UserDirectory>)
            .presence_service(Arc::clone(&presence) as Arc<dyn PresenceService>)
            .push_service(Arc::clone(&push) as Arc<dyn PushService>)
            .build()
            .expect("harness controller wiring is complete");

        Self {
            controller,
            facade,
            store,
            directory,
            presence,
            push,
        }
    }

    /// Controller over fresh mocks against `example.com`
    pub fn new() -> Self {
        Self::with_facade(MockFacade::new("example.com"))
    }
}
