use bridge_traits::BridgeError;
use thiserror::Error;

/// Failures reading or writing a profile's credential file.
///
/// Everything except `Write` is recovered inside the login path: an
/// unreadable or unparseable file simply means "never logged in" and the
/// device flow takes over.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The file does not exist or could not be read.
    #[error("credential file unreadable: {0}")]
    NotFound(#[source] std::io::Error),

    /// The file content is not a flat JSON credential record.
    #[error("credential file malformed: {0}")]
    Malformed(String),

    /// The file holds the obsolete wrapped layout and needs migration.
    #[error("credential file uses the legacy format")]
    LegacyFormat,

    /// Writing the record back to disk failed.
    #[error("credential file write failed: {0}")]
    Write(#[source] std::io::Error),
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("a login attempt is already in progress")]
    LoginInProgress,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("session client error: {0}")]
    Session(#[from] BridgeError),
}

pub type Result<T> = std::result::Result<T, AuthError>;
