//! # Authentication Manager
//!
//! Orchestrates the credential lifecycle of a TIDAL account.
//!
//! ## Overview
//!
//! The `AuthManager` owns the externally-supplied [`SessionHandle`] and, per
//! profile, runs one login cycle: restore stored credentials from the token
//! store, and when that yields nothing usable, start a new OAuth device flow.
//! A restore resolves synchronously on the caller's task; a device flow
//! resolves later on a spawned task, when the remote provider reports the
//! out-of-band authorization finished.
//!
//! ## Completion notification
//!
//! Whichever path resolves an attempt, the registered [`LoginListener`] is
//! invoked exactly once with the boolean outcome, and an
//! [`AuthEvent`](core_runtime::events::AuthEvent) is emitted on the bus.
//! Downstream modules trigger catalog refresh only on a `true` outcome.
//!
//! ## Usage
//!
//! ```ignore
//! use core_auth::{AuthManager, Profile};
//! use core_runtime::events::EventBus;
//! use std::sync::Arc;
//!
//! # async fn example(session: Arc<dyn bridge_traits::SessionHandle>,
//! #                  config: &core_runtime::config::BackendConfig) {
//! let bus = EventBus::default();
//! let manager = AuthManager::new(session, config, bus, None);
//!
//! // Restore the default profile at startup; a `false` return means a
//! // device flow was started and the outcome arrives via the notifier.
//! if manager.login_default().await.unwrap_or(false) {
//!     println!("TIDAL login OK");
//! }
//! # }
//! ```

use crate::error::{AuthError, Result, StoreError};
use crate::profiles::{Profile, ProfileRegistry};
use crate::token_store::TokenStore;
use bridge_traits::SessionHandle;
use core_runtime::config::BackendConfig;
use core_runtime::events::{AuthEvent, EventBus};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

/// Callback invoked with the outcome of every resolved login attempt.
///
/// May run on the device-flow completion task, so implementations must be
/// thread-safe and should hand off heavy work instead of doing it inline.
pub type LoginListener = Arc<dyn Fn(bool) + Send + Sync>;

/// In-memory login state, shared with the device-flow completion task.
#[derive(Debug, Default)]
struct LoginState {
    /// Profile currently logged in. Set only on success, cleared on failure.
    active_profile: Option<Profile>,
    /// Verification URL of the outstanding device flow, if any.
    pending_verification_link: Option<String>,
    /// True from device-flow initiation until its completion task resolves.
    flow_in_progress: bool,
}

/// Credential/session lifecycle orchestrator.
///
/// Constructed once per backend startup; the session handle it wraps is
/// created by the host and reused across every login attempt, including
/// re-authentication after a profile switch.
pub struct AuthManager {
    session: Arc<dyn SessionHandle>,
    store: TokenStore,
    profiles: ProfileRegistry,
    event_bus: EventBus,
    listener: Option<LoginListener>,
    state: Arc<RwLock<LoginState>>,
    /// Serializes whole login attempts so two callers cannot interleave the
    /// restore path.
    login_gate: Mutex<()>,
}

impl AuthManager {
    /// Create a manager over the host-supplied session handle.
    ///
    /// `listener` is the optional completion notifier, registered once for
    /// the manager's lifetime.
    pub fn new(
        session: Arc<dyn SessionHandle>,
        config: &BackendConfig,
        event_bus: EventBus,
        listener: Option<LoginListener>,
    ) -> Self {
        Self {
            session,
            store: TokenStore::new(config.storage_dir.clone()),
            profiles: ProfileRegistry::new(config.profiles.clone()),
            event_bus,
            listener,
            state: Arc::new(RwLock::new(LoginState::default())),
            login_gate: Mutex::new(()),
        }
    }

    /// Log in with the registry's default profile (first configured name, or
    /// the unnamed default). Hosts call this once at startup.
    pub async fn login_default(&self) -> Result<bool> {
        self.login(self.profiles.default_profile()).await
    }

    /// Run one login cycle for `profile`.
    ///
    /// Returns `Ok(true)` when stored credentials were restored; the attempt
    /// is fully resolved and the notifier has already fired. Returns
    /// `Ok(false)` when a device flow was initiated instead; the outcome
    /// arrives later through the notifier and event bus, and
    /// [`pending_verification_link`](Self::pending_verification_link) holds
    /// the URL the operator must open meanwhile.
    ///
    /// # Errors
    ///
    /// [`AuthError::LoginInProgress`] while a previous device flow is still
    /// outstanding, and [`AuthError::Session`] when the flow cannot be
    /// initiated. Neither counts as a resolved attempt, so the notifier is
    /// not invoked for them.
    pub async fn login(&self, profile: Profile) -> Result<bool> {
        let _attempt = self.login_gate.lock().await;

        if self.state.read().await.flow_in_progress {
            return Err(AuthError::LoginInProgress);
        }

        if self.try_restore(&profile).await {
            self.state.write().await.active_profile = Some(profile.clone());
            info!(%profile, "session restored from stored credentials");
            let _ = self.event_bus.emit(AuthEvent::SignedIn {
                profile: profile.to_string(),
            });
            self.notify(true);
            return Ok(true);
        }

        self.start_device_flow_login(profile).await?;
        Ok(false)
    }

    /// Switch the active account to `profile`.
    ///
    /// Equivalent to [`login`](Self::login): the previous profile's stored
    /// credentials stay on disk for the next switch back; only the in-memory
    /// binding is replaced.
    pub async fn switch_profile(&self, profile: Profile) -> Result<bool> {
        self.login(profile).await
    }

    /// Profile currently logged in, if any.
    pub async fn active_profile(&self) -> Option<Profile> {
        self.state.read().await.active_profile.clone()
    }

    /// Verification URL of the outstanding device flow, present only while a
    /// login is pending. Consumers display this to the operator.
    pub async fn pending_verification_link(&self) -> Option<String> {
        self.state.read().await.pending_verification_link.clone()
    }

    /// Configured profile names, in order.
    pub fn available_profiles(&self) -> &[String] {
        self.profiles.names()
    }

    /// Whether any profile name is configured.
    pub fn has_profiles(&self) -> bool {
        self.profiles.has_profiles()
    }

    /// The live session handle, for catalog and playback collaborators.
    /// Token refresh on expiry is the handle's own responsibility.
    pub fn session(&self) -> Arc<dyn SessionHandle> {
        Arc::clone(&self.session)
    }

    /// Attempt to bind previously stored credentials for `profile`.
    ///
    /// Store failures are all recovered here: a missing, unreadable or
    /// malformed file means "no usable credentials", and a legacy-layout
    /// file is migrated in place followed by exactly one re-read of the same
    /// profile's path. Returns `false` when the caller should fall through
    /// to a new device flow.
    async fn try_restore(&self, profile: &Profile) -> bool {
        let path = self.store.path_for(profile);
        let mut migrated = false;

        let creds = loop {
            match self.store.read(&path).await {
                Ok(creds) => break creds,
                Err(StoreError::LegacyFormat) if !migrated => {
                    warn!(path = %path.display(), "found legacy OAuth data layout, rewriting in place");
                    if let Err(e) = self.store.migrate(&path).await {
                        warn!(path = %path.display(), error = %e, "legacy migration failed");
                        return false;
                    }
                    migrated = true;
                }
                Err(StoreError::NotFound(e)) => {
                    info!(path = %path.display(), error = %e, "cannot read stored OAuth session data");
                    return false;
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "cannot parse stored OAuth session data");
                    return false;
                }
            }
        };

        self.session
            .load_session(
                &creds.session_id,
                &creds.token_type,
                &creds.access_token,
                &creds.refresh_token,
            )
            .await
    }

    /// Start a new OAuth device flow for `profile` and spawn the task that
    /// resolves the attempt once the remote flow settles.
    async fn start_device_flow_login(&self, profile: Profile) -> Result<()> {
        info!(%profile, "creating new OAuth session");
        let flow = self.session.start_device_flow().await?;

        {
            let mut state = self.state.write().await;
            state.flow_in_progress = true;
            state.pending_verification_link = Some(flow.verification_link.clone());
        }

        info!(link = %flow.verification_link, "visit the link to authorize this device");
        let _ = self.event_bus.emit(AuthEvent::SigningIn {
            profile: profile.to_string(),
            verification_link: flow.verification_link.clone(),
        });

        let session = Arc::clone(&self.session);
        let store = self.store.clone();
        let state = Arc::clone(&self.state);
        let event_bus = self.event_bus.clone();
        let listener = self.listener.clone();
        let path = self.store.path_for(&profile);

        // The completion future may resolve on any worker thread; everything
        // it touches is behind the shared state lock.
        tokio::spawn(async move {
            flow.completion.await;
            let logged_in = session.check_login().await;

            if logged_in {
                match session.credentials().await {
                    Some(creds) => {
                        if let Err(e) = store.write(&path, &creds).await {
                            // The live session stays usable; the next start
                            // falls back to a fresh device flow.
                            warn!(path = %path.display(), error = %e, "failed to persist credentials");
                        }
                    }
                    None => warn!("session reported no bound credentials after login"),
                }
            }

            {
                let mut state = state.write().await;
                state.pending_verification_link = None;
                state.flow_in_progress = false;
                state.active_profile = logged_in.then(|| profile.clone());
            }

            let event = if logged_in {
                info!(%profile, "TIDAL login OK");
                AuthEvent::SignedIn {
                    profile: profile.to_string(),
                }
            } else {
                info!(%profile, "TIDAL login failed");
                AuthEvent::SignInFailed {
                    profile: profile.to_string(),
                }
            };
            let _ = event_bus.emit(event);

            if let Some(listener) = listener {
                listener(logged_in);
            }
        });

        Ok(())
    }

    fn notify(&self, outcome: bool) {
        if let Some(listener) = &self.listener {
            listener(outcome);
        }
    }
}
