//! # Host Bridge Traits
//!
//! Contracts between the TIDAL backend core and capabilities the host links
//! in. The core treats the TIDAL API client as an opaque collaborator: it is
//! handed a [`SessionHandle`](session::SessionHandle) at startup and drives
//! credential restore and device-flow login through it without knowing the
//! wire protocol underneath.
//!
//! ## Traits
//!
//! - [`SessionHandle`](session::SessionHandle) - authenticated-session owner:
//!   login checks, credential binding, device-flow initiation
//!
//! ## Error Handling
//!
//! Bridge implementations convert client-specific failures into
//! [`BridgeError`](error::BridgeError) with actionable messages. A `false`
//! from `check_login` or `load_session` is an outcome, not an error.
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync`; the device-flow completion
//! future resolves on whatever task the client drives it from, so
//! implementations must not assume a particular thread.

pub mod error;
pub mod session;

pub use error::BridgeError;
pub use session::{DeviceFlowLogin, SessionCredentials, SessionHandle};
