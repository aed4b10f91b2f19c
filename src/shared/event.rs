/**
 * Client Event System
 *
 * This module defines event types for the process-wide client event bus.
 * Events can represent different session transitions: logout, login,
 * status changes, etc.
 *
 * # Broadcasting
 *
 * Events are broadcast using `tokio::sync::broadcast`, which provides
 * a multi-producer, multi-consumer channel. All subscribers receive
 * a copy of each event. Publishing with no subscribers is not an error.
 */
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Default capacity of the client event channel
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Type of client event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Session authenticated
    Login,
    /// Session torn down
    Logout,
    /// Status update event
    Status,
    /// Custom event type
    Custom(String),
}

/// Client event that can be broadcast to all subscribers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientEvent {
    /// Type of event
    pub event_type: EventType,
    /// Event payload (JSON-serializable data)
    pub payload: serde_json::Value,
    /// Timestamp when event occurred
    pub timestamp: String,
}

impl ClientEvent {
    /// Create a new client event
    pub fn new(event_type: EventType, payload: serde_json::Value) -> Self {
        Self {
            event_type,
            payload,
            timestamp: get_timestamp(),
        }
    }

    /// Create a login event for the given identity
    pub fn login(identity: impl Into<String>) -> Self {
        Self::new(
            EventType::Login,
            serde_json::json!({
                "identity": identity.into(),
            }),
        )
    }

    /// Create a logout event
    pub fn logout() -> Self {
        Self::new(EventType::Logout, serde_json::json!({}))
    }

    /// Create a status event
    pub fn status(status: String, details: Option<serde_json::Value>) -> Self {
        Self::new(
            EventType::Status,
            serde_json::json!({
                "status": status,
                "details": details,
            }),
        )
    }
}

/// Get the current timestamp as an RFC3339 string
fn get_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Client event broadcast channel
///
/// This type represents a broadcast channel for client events. It can be
/// cloned and shared across the controller and any other publisher.
pub type ClientEventBroadcast = broadcast::Sender<ClientEvent>;

/// Create a client event channel with the default capacity
pub fn event_channel() -> (ClientEventBroadcast, broadcast::Receiver<ClientEvent>) {
    broadcast::channel(DEFAULT_EVENT_CAPACITY)
}

/// Broadcast a client event to all subscribers
///
/// # Returns
///
/// Number of active subscribers that received the event (0 if no subscribers)
pub fn publish_event(broadcast_tx: &ClientEventBroadcast, event: ClientEvent) -> usize {
    match broadcast_tx.send(event) {
        Ok(subscriber_count) => {
            tracing::debug!("[Events] Event broadcast to {} subscribers", subscriber_count);
            subscriber_count
        }
        Err(e) => {
            // No subscribers, that's okay
            tracing::debug!("[Events] No subscribers to receive event: {:?}", e);
            0
        }
    }
}
