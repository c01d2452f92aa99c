//! Account Profiles
//!
//! A profile is a user-chosen name scoping one stored credential set, so
//! several TIDAL accounts can coexist in one installation. The registry is a
//! plain ordered list of names; the first entry is the default, and an empty
//! registry falls back to the unnamed [`Profile::Default`] sentinel.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named credential scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Profile {
    /// The unnamed profile, stored under the fixed default file name.
    #[default]
    Default,
    /// A user-chosen account name with its own credential file.
    Named(String),
}

impl Profile {
    /// Build a named profile.
    pub fn named(name: impl Into<String>) -> Self {
        Profile::Named(name.into())
    }

    /// The profile's name, or `None` for the unnamed default.
    pub fn name(&self) -> Option<&str> {
        match self {
            Profile::Named(name) => Some(name),
            Profile::Default => None,
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Profile::Named(name) => write!(f, "{name}"),
            Profile::Default => write!(f, "default"),
        }
    }
}

/// Ordered list of configured profile names.
#[derive(Debug, Clone, Default)]
pub struct ProfileRegistry {
    profiles: Vec<String>,
}

impl ProfileRegistry {
    pub fn new(profiles: Vec<String>) -> Self {
        Self { profiles }
    }

    /// Whether any profile name is configured.
    pub fn has_profiles(&self) -> bool {
        !self.profiles.is_empty()
    }

    /// The first configured profile, or the unnamed default when the
    /// registry is empty.
    pub fn default_profile(&self) -> Profile {
        match self.profiles.first() {
            Some(name) => Profile::Named(name.clone()),
            None => Profile::Default,
        }
    }

    /// The configured names, in order.
    pub fn names(&self) -> &[String] {
        &self.profiles
    }
}
