//! Session state and its transition function.
//!
//! DESIGN
//! ======
//! All session mutation funnels through [`next`], a pure total function
//! over a closed event set. The controller owns the single live state and
//! applies events; everything else reads snapshots. This keeps the
//! invariant `is_authenticated == user.is_some()` checkable in one place.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::net::types::UserIdentity;

/// Authentication state for the current tab/process.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Present iff authenticated.
    pub user: Option<UserIdentity>,
    pub is_authenticated: bool,
    /// True only while a credential operation is in flight.
    pub is_loading: bool,
    /// Last failed attempt's message; cleared on a new attempt.
    pub error: Option<String>,
}

/// Events that drive session state transitions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// A login/signup attempt started.
    AttemptStarted,
    /// The gateway accepted the credentials.
    Authenticated(UserIdentity),
    /// The attempt failed; the message is shown to the user verbatim.
    AuthenticationFailed(String),
    /// The user signed out.
    SignedOut,
    /// The visible error was dismissed.
    ErrorCleared,
    /// Explicit loading-flag override.
    LoadingSet(bool),
}

/// Compute the state following `event`. Total: no event is rejected.
#[must_use]
pub fn next(state: &SessionState, event: SessionEvent) -> SessionState {
    match event {
        SessionEvent::AttemptStarted => SessionState {
            is_loading: true,
            error: None,
            ..state.clone()
        },
        SessionEvent::Authenticated(user) => SessionState {
            user: Some(user),
            is_authenticated: true,
            is_loading: false,
            error: None,
        },
        SessionEvent::AuthenticationFailed(message) => SessionState {
            user: None,
            is_authenticated: false,
            is_loading: false,
            error: Some(message),
        },
        SessionEvent::SignedOut => SessionState::default(),
        SessionEvent::ErrorCleared => SessionState {
            error: None,
            ..state.clone()
        },
        SessionEvent::LoadingSet(flag) => SessionState {
            is_loading: flag,
            ..state.clone()
        },
    }
}
