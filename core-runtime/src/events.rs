//! # Event Bus System
//!
//! Decoupled notification of authentication state changes using
//! `tokio::sync::broadcast`.
//!
//! ## Overview
//!
//! The credential lifecycle emits [`AuthEvent`]s as login attempts progress;
//! interested modules (catalog refresh, host UIs) subscribe independently and
//! react without the auth code knowing about them. Events are lightweight,
//! cloneable and serializable so hosts can forward them across process
//! boundaries.
//!
//! ## Usage
//!
//! ```
//! use core_runtime::events::{AuthEvent, EventBus};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let bus = EventBus::new(100);
//! let mut stream = bus.subscribe();
//!
//! bus.emit(AuthEvent::SignedIn {
//!     profile: "alice".to_string(),
//! })
//! .ok();
//!
//! assert!(matches!(
//!     stream.recv().await,
//!     Ok(AuthEvent::SignedIn { .. })
//! ));
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Subscribers that fall behind receive `RecvError::Lagged(n)` and can keep
//! reading newer events; `RecvError::Closed` signals shutdown. `emit` fails
//! only when no subscriber exists, which callers may ignore.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

pub use tokio::sync::broadcast::error::{RecvError, SendError};
pub use tokio::sync::broadcast::Receiver;

/// Default buffer size for the event bus channel.
pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 100;

/// Events describing the authentication lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum AuthEvent {
    /// A device-flow login was started; the operator must open the link.
    SigningIn {
        /// Profile the login is for; `"default"` for the unnamed profile.
        profile: String,
        /// Authorization URL to present to the operator.
        verification_link: String,
    },
    /// A login attempt finished successfully and the profile is active.
    SignedIn {
        /// The now-active profile.
        profile: String,
    },
    /// A login attempt finished without an authenticated session.
    SignInFailed {
        /// Profile the failed attempt was for.
        profile: String,
    },
}

impl AuthEvent {
    /// Human-readable description of the event.
    pub fn description(&self) -> &'static str {
        match self {
            AuthEvent::SigningIn { .. } => "Authentication in progress",
            AuthEvent::SignedIn { .. } => "User signed in successfully",
            AuthEvent::SignInFailed { .. } => "Authentication failed",
        }
    }
}

/// Central broadcast channel for [`AuthEvent`]s.
///
/// Cloning the bus is cheap and every clone publishes into the same channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<AuthEvent>,
}

impl EventBus {
    /// Create a bus with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// Returns the number of subscribers that received the event. An `Err`
    /// means nobody is listening right now, which is not a failure of the
    /// emitting module.
    pub fn emit(&self, event: AuthEvent) -> Result<usize, SendError<AuthEvent>> {
        self.sender.send(event)
    }

    /// Open an independent subscription starting at the current position.
    pub fn subscribe(&self) -> Receiver<AuthEvent> {
        self.sender.subscribe()
    }

    /// Number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUFFER_SIZE)
    }
}
