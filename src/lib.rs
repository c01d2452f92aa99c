//! Workspace facade crate.
//!
//! Re-exports the individual TIDAL backend crates so host applications can
//! depend on `tidal-backend` alone instead of wiring each member crate. The
//! host supplies a [`bridge_traits::SessionHandle`] implementation wrapping
//! its TIDAL API client and hands it to
//! [`core_auth::AuthManager`] together with a validated
//! [`core_runtime::config::BackendConfig`].

pub use bridge_traits;
pub use core_auth;
pub use core_runtime;
