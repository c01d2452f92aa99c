//! # Core Runtime Module
//!
//! Foundational runtime infrastructure for the TIDAL backend core:
//! - Backend configuration with fail-fast validation
//! - Event bus for authentication state changes
//! - Logging and tracing setup
//!
//! ## Overview
//!
//! This crate contains the ambient utilities the other backend crates depend
//! on. It establishes the logging conventions and the event broadcasting
//! mechanism used to decouple the credential lifecycle from the modules that
//! react to it (catalog refresh, host UIs).

pub mod config;
pub mod error;
pub mod events;
pub mod logging;

pub use config::{AudioQuality, BackendConfig};
pub use error::{Error, Result};
pub use events::{AuthEvent, EventBus};
