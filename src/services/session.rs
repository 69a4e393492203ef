//! Session controller — drives state transitions for login, signup,
//! logout, and error dismissal.
//!
//! ARCHITECTURE
//! ============
//! The controller owns the one live [`SessionState`] behind a watch
//! channel; consumers read snapshots or subscribe for changes. Credential
//! operations take a single-slot async mutex so at most one is in flight
//! per session, and each runs under a deadline.
//!
//! ERROR HANDLING
//! ==============
//! No public operation returns an error or panics. Gateway rejections,
//! transport faults, and timeouts all land in the `error` field of the
//! state; a corrupt persisted session is cleared quietly on startup and
//! never shown to the user.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, watch};
use tracing::{debug, warn};

use crate::net::gateway::{CredentialGateway, GatewayError};
use crate::net::types::SessionGrant;
use crate::services::persistence::{PersistedSession, SessionStorage};
use crate::state::session::{SessionEvent, SessionState, next};

const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(10);

/// Orchestrates credential operations and keeps state, storage, and the
/// gateway consistent with each other.
pub struct SessionController {
    gateway: Arc<dyn CredentialGateway>,
    storage: Arc<dyn SessionStorage>,
    state: watch::Sender<SessionState>,
    /// Single-slot serialization point: at most one credential operation
    /// in flight per session.
    attempt_slot: Mutex<()>,
    attempt_timeout: Duration,
}

impl SessionController {
    #[must_use]
    pub fn new(gateway: Arc<dyn CredentialGateway>, storage: Arc<dyn SessionStorage>) -> Self {
        Self::with_timeout(gateway, storage, DEFAULT_ATTEMPT_TIMEOUT)
    }

    /// Build with a custom per-attempt deadline for gateway calls.
    #[must_use]
    pub fn with_timeout(
        gateway: Arc<dyn CredentialGateway>,
        storage: Arc<dyn SessionStorage>,
        attempt_timeout: Duration,
    ) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self {
            gateway,
            storage,
            state,
            attempt_slot: Mutex::new(()),
            attempt_timeout,
        }
    }

    /// Snapshot of the current session state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Receiver that observes every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    fn apply(&self, event: SessionEvent) {
        self.state.send_modify(|state| *state = next(state, event));
    }

    /// Restore a persisted session, if one exists. Called once at process
    /// start, before the first read of session state.
    ///
    /// The stored user is trusted as-is; the token is not revalidated
    /// against the server here, so a revoked token is only discovered on
    /// the next authenticated request.
    pub fn startup(&self) {
        match self.storage.load() {
            Ok(Some(record)) => {
                debug!(email = %record.user.email, "session restored from storage");
                self.apply(SessionEvent::Authenticated(record.user));
            }
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, "stored session unreadable, clearing");
                if let Err(e) = self.storage.clear() {
                    warn!(error = %e, "failed to clear corrupt session");
                }
            }
        }
    }

    /// Attempt to sign in. The outcome lands in the session state; this
    /// never fails toward the caller.
    pub async fn login(&self, email: &str, password: &str) {
        let _slot = self.attempt_slot.lock().await;
        self.apply(SessionEvent::AttemptStarted);
        let outcome = tokio::time::timeout(
            self.attempt_timeout,
            self.gateway.authenticate(email, password),
        )
        .await;
        self.settle_attempt(outcome);
    }

    /// Attempt to register a new account and sign it in.
    pub async fn signup(&self, email: &str, password: &str, name: &str) {
        let _slot = self.attempt_slot.lock().await;
        self.apply(SessionEvent::AttemptStarted);
        let outcome = tokio::time::timeout(
            self.attempt_timeout,
            self.gateway.register(email, password, name),
        )
        .await;
        self.settle_attempt(outcome);
    }

    /// Sign out. Always succeeds.
    pub fn logout(&self) {
        if let Err(e) = self.storage.clear() {
            warn!(error = %e, "failed to clear persisted session on logout");
        }
        self.apply(SessionEvent::SignedOut);
    }

    /// Dismiss the visible error, leaving the rest of the state untouched.
    pub fn clear_error(&self) {
        self.apply(SessionEvent::ErrorCleared);
    }

    /// Translate a settled (or timed-out) gateway call into a transition.
    fn settle_attempt(
        &self,
        outcome: Result<Result<SessionGrant, GatewayError>, tokio::time::error::Elapsed>,
    ) {
        match outcome {
            Ok(Ok(grant)) => {
                let record = PersistedSession {
                    token: grant.token,
                    user: grant.user.clone(),
                };
                // A failed save costs only reload persistence, not the
                // session itself.
                if let Err(e) = self.storage.save(&record) {
                    warn!(error = %e, "failed to persist session");
                }
                debug!(email = %grant.user.email, "authenticated");
                self.apply(SessionEvent::Authenticated(grant.user));
            }
            Ok(Err(e)) => {
                debug!(error = %e, "authentication attempt failed");
                self.apply(SessionEvent::AuthenticationFailed(e.to_string()));
            }
            Err(_elapsed) => {
                warn!(timeout = ?self.attempt_timeout, "authentication attempt timed out");
                self.apply(SessionEvent::AuthenticationFailed(
                    GatewayError::Transport("request timed out".into()).to_string(),
                ));
            }
        }
    }
}
