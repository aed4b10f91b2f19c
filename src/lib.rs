//! XFChat - Authentication Lifecycle
//!
//! XFChat is the authentication layer of a chat client SDK. It decides how
//! a user identity is established against the messaging backend, caches
//! credentials for silent re-authentication, and fans out
//! post-authentication setup (presence announcement, push-channel
//! subscription, directory record) once the transport confirms a live,
//! authenticated session.
//!
//! # Module Structure
//!
//! - **`shared`** - Collaborator-agnostic types
//!   - Error taxonomy, client event bus, application configuration
//!
//! - **`connection`** - Contracts consumed from the connection layer
//!   - Connection facade, user directory, presence and push collaborators
//!
//! - **`auth`** - The lifecycle itself
//!   - Controller state machine, account details, identity derivation,
//!     credential store, session state, post-authentication setup
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use xfchat::auth::{AccountDetails, AuthenticationController, MemoryCredentialStore};
//!
//! # async fn example(
//! #     connection: Arc<dyn xfchat::connection::ConnectionFacade>,
//! #     directory: Arc<dyn xfchat::connection::UserDirectory>,
//! #     presence: Arc<dyn xfchat::connection::PresenceService>,
//! # ) -> Result<(), Box<dyn std::error::Error>> {
//! let controller = AuthenticationController::builder()
//!     .connection(connection)
//!     .credential_store(Arc::new(MemoryCredentialStore::new()))
//!     .user_directory(directory)
//!     .presence_service(presence)
//!     .build()?;
//!
//! controller
//!     .authenticate(AccountDetails::username("alice", "secret"))
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Concurrency
//!
//! Every operation is an ordinary `Send` future safe to run on a
//! multi-thread runtime. Authentication attempts are serialized on a
//! single-slot lock; session state is lock-guarded for cross-thread reads.
//!
//! # Error Handling
//!
//! Connection errors propagate to the caller verbatim. Failures in the
//! post-authentication fan-out are logged, never propagated; the one
//! exception is identity derivation, which fails the whole operation even
//! after a successful login because an unusable identity makes the session
//! unusable.

/// Shared types: errors, events, configuration
pub mod shared;

/// Contracts consumed from the connection layer
pub mod connection;

/// The authentication lifecycle
pub mod auth;
