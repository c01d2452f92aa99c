//! TIDAL Session Client Contract
//!
//! Defines the boundary between the credential lifecycle core and the
//! externally-implemented TIDAL API client. The core never speaks the OAuth
//! wire protocol itself; it drives an opaque session handle that knows how to
//! validate credentials, bind a restored session, and run the remote device
//! flow. Catalog and playback collaborators issue their requests through the
//! same handle once it is authenticated.
//!
//! # Example
//!
//! ```ignore
//! use bridge_traits::session::SessionHandle;
//! use std::sync::Arc;
//!
//! async fn restore(session: Arc<dyn SessionHandle>) -> bool {
//!     session
//!         .load_session("sess", "Bearer", "access", "refresh")
//!         .await
//! }
//! ```

use crate::error::Result;
use async_trait::async_trait;
use futures::future::BoxFuture;
use std::fmt;

/// The credential quadruple bound to an authenticated session.
///
/// All four fields are opaque scalar strings issued by the remote provider.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionCredentials {
    /// Opaque session identifier.
    pub session_id: String,
    /// Token discriminator required by the remote API, e.g. `Bearer`.
    pub token_type: String,
    /// Short-lived API access token.
    pub access_token: String,
    /// Long-lived token used by the client to renew the access token.
    pub refresh_token: String,
}

// Token values never reach logs.
impl fmt::Debug for SessionCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCredentials")
            .field("session_id", &self.session_id)
            .field("token_type", &self.token_type)
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .finish()
    }
}

/// An initiated OAuth device flow.
///
/// The operator authorizes the account out-of-band by opening
/// `verification_link` in a browser while the requesting process awaits
/// `completion`. The future resolves once the remote flow has finished,
/// whether or not authorization succeeded; callers must query
/// [`SessionHandle::check_login`] afterwards for the outcome.
pub struct DeviceFlowLogin {
    /// Human-facing authorization URL, surfaced to the operator.
    pub verification_link: String,
    /// Resolves when the remote flow settles. Timeout and cancellation
    /// policy belong to the session client.
    pub completion: BoxFuture<'static, ()>,
}

impl fmt::Debug for DeviceFlowLogin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceFlowLogin")
            .field("verification_link", &self.verification_link)
            .finish_non_exhaustive()
    }
}

/// Handle to the externally-supplied TIDAL API client.
///
/// Implementations wrap whatever concrete client the host links in. The
/// handle is created once per backend and reused across login attempts, so
/// implementations must tolerate repeated `load_session` and
/// `start_device_flow` calls on the same instance.
#[async_trait]
pub trait SessionHandle: Send + Sync {
    /// Whether the handle currently holds an authenticated session.
    async fn check_login(&self) -> bool;

    /// Bind a previously persisted credential quadruple to this handle.
    ///
    /// Returns `false` when the remote side rejects the credentials, for
    /// example because the refresh token was revoked.
    async fn load_session(
        &self,
        session_id: &str,
        token_type: &str,
        access_token: &str,
        refresh_token: &str,
    ) -> bool;

    /// Start a new OAuth device flow against the remote provider.
    async fn start_device_flow(&self) -> Result<DeviceFlowLogin>;

    /// The credential quadruple currently bound to the session, if any.
    ///
    /// Populated after a successful `load_session` or device flow; the
    /// values may differ from what was loaded if the client refreshed them.
    async fn credentials(&self) -> Option<SessionCredentials>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_tokens() {
        let creds = SessionCredentials {
            session_id: "sess-1".to_string(),
            token_type: "Bearer".to_string(),
            access_token: "secret_access".to_string(),
            refresh_token: "secret_refresh".to_string(),
        };
        let rendered = format!("{:?}", creds);
        assert!(rendered.contains("sess-1"));
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("secret_access"));
        assert!(!rendered.contains("secret_refresh"));
    }

    #[test]
    fn device_flow_debug_skips_future() {
        let flow = DeviceFlowLogin {
            verification_link: "https://link.tidal.com/ABCDE".to_string(),
            completion: Box::pin(async {}),
        };
        let rendered = format!("{:?}", flow);
        assert!(rendered.contains("link.tidal.com"));
    }
}
