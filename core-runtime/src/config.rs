//! # Backend Configuration
//!
//! Holds the validated settings the TIDAL backend is constructed from.
//!
//! ## Overview
//!
//! Hosts collect raw settings (from their own config files or CLI) and feed
//! them through [`BackendConfig::builder`], which validates fail-fast and
//! produces an immutable [`BackendConfig`]. The storage directory is the one
//! required field; everything else has a sensible default.
//!
//! ## Usage
//!
//! ```
//! use core_runtime::config::{AudioQuality, BackendConfig};
//!
//! let config = BackendConfig::builder()
//!     .storage_dir("/var/lib/tidal")
//!     .quality(AudioQuality::Lossless)
//!     .profiles(vec!["alice".to_string(), "bob".to_string()])
//!     .build()
//!     .expect("valid config");
//!
//! assert_eq!(config.profiles.len(), 2);
//! ```

use crate::error::{Error, Result};
use std::fmt;
use std::path::PathBuf;
use tracing::{info, warn};

/// Requested streaming quality, forwarded to the session client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AudioQuality {
    /// 96 kbps AAC.
    Low,
    /// 320 kbps AAC.
    #[default]
    High,
    /// FLAC.
    Lossless,
}

impl AudioQuality {
    /// Parse a quality setting, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Some(AudioQuality::Low),
            "high" => Some(AudioQuality::High),
            "lossless" => Some(AudioQuality::Lossless),
            _ => None,
        }
    }

    /// Identifier understood by the remote API.
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioQuality::Low => "LOW",
            AudioQuality::High => "HIGH",
            AudioQuality::Lossless => "LOSSLESS",
        }
    }
}

impl fmt::Display for AudioQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Validated backend configuration.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Directory holding the per-profile credential files.
    pub storage_dir: PathBuf,

    /// Ordered list of configured account profile names. The first entry is
    /// the default profile; an empty list means the unnamed default.
    pub profiles: Vec<String>,

    /// Streaming quality requested from the session client.
    pub quality: AudioQuality,

    /// OAuth client id, honored only together with `client_secret`.
    pub client_id: Option<String>,

    /// OAuth client secret, honored only together with `client_id`.
    pub client_secret: Option<String>,
}

impl BackendConfig {
    /// Start building a configuration.
    pub fn builder() -> BackendConfigBuilder {
        BackendConfigBuilder::default()
    }

    /// The client id/secret pair, when both halves were configured.
    pub fn client_credentials(&self) -> Option<(&str, &str)> {
        match (&self.client_id, &self.client_secret) {
            (Some(id), Some(secret)) => Some((id.as_str(), secret.as_str())),
            _ => None,
        }
    }
}

/// Builder for [`BackendConfig`] with fail-fast validation.
#[derive(Debug, Default)]
pub struct BackendConfigBuilder {
    storage_dir: Option<PathBuf>,
    profiles: Vec<String>,
    quality: AudioQuality,
    client_id: Option<String>,
    client_secret: Option<String>,
}

impl BackendConfigBuilder {
    /// Set the directory credential files are stored under. Required.
    pub fn storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = Some(dir.into());
        self
    }

    /// Set the ordered list of account profile names.
    pub fn profiles(mut self, profiles: Vec<String>) -> Self {
        self.profiles = profiles;
        self
    }

    /// Set the requested streaming quality.
    pub fn quality(mut self, quality: AudioQuality) -> Self {
        self.quality = quality;
        self
    }

    /// Set a custom OAuth client id.
    pub fn client_id(mut self, id: impl Into<String>) -> Self {
        self.client_id = Some(id.into());
        self
    }

    /// Set a custom OAuth client secret.
    pub fn client_secret(mut self, secret: impl Into<String>) -> Self {
        self.client_secret = Some(secret.into());
        self
    }

    /// Validate and build the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the storage directory is missing or a
    /// profile name is empty.
    pub fn build(self) -> Result<BackendConfig> {
        let storage_dir = self.storage_dir.ok_or_else(|| {
            Error::Config(
                "storage_dir is required; point it at the backend data directory".to_string(),
            )
        })?;

        if self.profiles.iter().any(|p| p.trim().is_empty()) {
            return Err(Error::Config("profile names must be non-empty".to_string()));
        }

        // Only honor the pair; a lone half falls back to the client defaults.
        let (client_id, client_secret) = match (self.client_id, self.client_secret) {
            (Some(id), Some(secret)) => {
                info!("client_id & client_secret from the configuration are used");
                (Some(id), Some(secret))
            }
            (None, None) => (None, None),
            _ => {
                warn!("always provide client_id and client_secret together; using client defaults");
                (None, None)
            }
        };

        Ok(BackendConfig {
            storage_dir,
            profiles: self.profiles,
            quality: self.quality,
            client_id,
            client_secret,
        })
    }
}
