//! Session provider scope and the consumer-facing handle.
//!
//! DESIGN
//! ======
//! UI code never touches the controller directly. A [`SessionProvider`]
//! owns it, restores any persisted session exactly once at construction,
//! and scopes a cheap [`SessionHandle`] into a task-local. [`use_session`]
//! reads that task-local and panics outside a provider scope: reaching for
//! the session without a provider is a bug in the calling code, not a
//! runtime condition to recover from.

#[cfg(test)]
#[path = "provider_test.rs"]
mod provider_test;

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;

use crate::net::gateway::CredentialGateway;
use crate::services::persistence::SessionStorage;
use crate::services::session::SessionController;
use crate::state::session::SessionState;

tokio::task_local! {
    static CURRENT_SESSION: SessionHandle;
}

/// Read/dispatch surface handed to consumers: state projections plus the
/// four session operations.
#[derive(Clone)]
pub struct SessionHandle {
    controller: Arc<SessionController>,
}

impl SessionHandle {
    /// Snapshot of the full session state.
    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.controller.state()
    }

    /// Receiver that observes every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.controller.subscribe()
    }

    #[must_use]
    pub fn user(&self) -> Option<crate::net::types::UserIdentity> {
        self.snapshot().user
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.snapshot().is_authenticated
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.snapshot().is_loading
    }

    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.snapshot().error
    }

    pub async fn login(&self, email: &str, password: &str) {
        self.controller.login(email, password).await;
    }

    pub async fn signup(&self, email: &str, password: &str, name: &str) {
        self.controller.signup(email, password, name).await;
    }

    pub fn logout(&self) {
        self.controller.logout();
    }

    pub fn clear_error(&self) {
        self.controller.clear_error();
    }
}

/// Owns the session controller for the life of the process/tab and scopes
/// access to it.
pub struct SessionProvider {
    handle: SessionHandle,
}

impl SessionProvider {
    /// Build the controller and restore any persisted session. This is the
    /// one place `startup` runs, before anything can observe the state.
    #[must_use]
    pub fn initialize(gateway: Arc<dyn CredentialGateway>, storage: Arc<dyn SessionStorage>) -> Self {
        let controller = Arc::new(SessionController::new(gateway, storage));
        controller.startup();
        Self {
            handle: SessionHandle { controller },
        }
    }

    /// Direct handle, for wiring the provider itself.
    #[must_use]
    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    /// Run `fut` with [`use_session`] available.
    pub async fn scope<F: Future>(&self, fut: F) -> F::Output {
        CURRENT_SESSION.scope(self.handle.clone(), fut).await
    }

    /// Synchronous variant of [`Self::scope`].
    pub fn sync_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        CURRENT_SESSION.sync_scope(self.handle.clone(), f)
    }
}

/// Fetch the session handle for the current scope.
///
/// # Panics
///
/// Panics when called outside a [`SessionProvider`] scope; that is a
/// programming error in the caller, equivalent to using a context hook
/// without its provider.
#[must_use]
pub fn use_session() -> SessionHandle {
    CURRENT_SESSION
        .try_with(Clone::clone)
        .unwrap_or_else(|_| panic!("use_session must be called within a SessionProvider scope"))
}
