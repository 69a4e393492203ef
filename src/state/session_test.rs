use super::*;

fn sample_user() -> UserIdentity {
    UserIdentity {
        id: "1".into(),
        email: "admin@luxora.com".into(),
        name: "Admin User".into(),
        is_admin: true,
    }
}

fn invariant_holds(state: &SessionState) -> bool {
    state.is_authenticated == state.user.is_some()
}

// =============================================================
// Defaults
// =============================================================

#[test]
fn default_state_is_empty() {
    let state = SessionState::default();
    assert!(state.user.is_none());
    assert!(!state.is_authenticated);
    assert!(!state.is_loading);
    assert!(state.error.is_none());
}

// =============================================================
// AttemptStarted
// =============================================================

#[test]
fn attempt_started_sets_loading_and_clears_error() {
    let state = SessionState {
        error: Some("old failure".into()),
        ..SessionState::default()
    };
    let state = next(&state, SessionEvent::AttemptStarted);
    assert!(state.is_loading);
    assert!(state.error.is_none());
}

#[test]
fn attempt_started_keeps_current_user() {
    let authed = next(&SessionState::default(), SessionEvent::Authenticated(sample_user()));
    let state = next(&authed, SessionEvent::AttemptStarted);
    assert_eq!(state.user, Some(sample_user()));
    assert!(state.is_authenticated);
}

// =============================================================
// Authenticated
// =============================================================

#[test]
fn authenticated_sets_user_and_flags() {
    let loading = next(&SessionState::default(), SessionEvent::AttemptStarted);
    let state = next(&loading, SessionEvent::Authenticated(sample_user()));
    assert_eq!(state.user, Some(sample_user()));
    assert!(state.is_authenticated);
    assert!(!state.is_loading);
    assert!(state.error.is_none());
}

#[test]
fn authenticated_clears_prior_error() {
    let failed = next(
        &SessionState::default(),
        SessionEvent::AuthenticationFailed("Invalid credentials".into()),
    );
    let state = next(&failed, SessionEvent::Authenticated(sample_user()));
    assert!(state.error.is_none());
}

// =============================================================
// AuthenticationFailed
// =============================================================

#[test]
fn failed_clears_user_and_surfaces_message() {
    let loading = next(&SessionState::default(), SessionEvent::AttemptStarted);
    let state = next(&loading, SessionEvent::AuthenticationFailed("Invalid credentials".into()));
    assert!(state.user.is_none());
    assert!(!state.is_authenticated);
    assert!(!state.is_loading);
    assert_eq!(state.error.as_deref(), Some("Invalid credentials"));
}

#[test]
fn failed_signs_out_a_previously_authenticated_user() {
    let authed = next(&SessionState::default(), SessionEvent::Authenticated(sample_user()));
    let state = next(&authed, SessionEvent::AuthenticationFailed("expired".into()));
    assert!(state.user.is_none());
    assert!(!state.is_authenticated);
}

// =============================================================
// SignedOut
// =============================================================

#[test]
fn signed_out_resets_everything() {
    let authed = next(&SessionState::default(), SessionEvent::Authenticated(sample_user()));
    let state = next(&authed, SessionEvent::SignedOut);
    assert_eq!(state, SessionState::default());
}

#[test]
fn signed_out_when_already_signed_out_is_idempotent() {
    let state = next(&SessionState::default(), SessionEvent::SignedOut);
    let again = next(&state, SessionEvent::SignedOut);
    assert_eq!(again, SessionState::default());
}

// =============================================================
// ErrorCleared
// =============================================================

#[test]
fn error_cleared_only_touches_error() {
    let state = SessionState {
        user: Some(sample_user()),
        is_authenticated: true,
        is_loading: true,
        error: Some("boom".into()),
    };
    let cleared = next(&state, SessionEvent::ErrorCleared);
    assert!(cleared.error.is_none());
    assert_eq!(cleared.user, state.user);
    assert_eq!(cleared.is_loading, state.is_loading);
}

#[test]
fn error_cleared_with_no_error_is_a_no_op() {
    let authed = next(&SessionState::default(), SessionEvent::Authenticated(sample_user()));
    let cleared = next(&authed, SessionEvent::ErrorCleared);
    assert_eq!(cleared, authed);
}

// =============================================================
// LoadingSet
// =============================================================

#[test]
fn loading_set_overrides_flag_only() {
    let authed = next(&SessionState::default(), SessionEvent::Authenticated(sample_user()));
    let state = next(&authed, SessionEvent::LoadingSet(true));
    assert!(state.is_loading);
    assert_eq!(state.user, authed.user);
    let state = next(&state, SessionEvent::LoadingSet(false));
    assert!(!state.is_loading);
}

// =============================================================
// Invariant: is_authenticated == user.is_some() after any sequence
// =============================================================

#[test]
fn auth_flag_matches_user_presence_across_all_events() {
    let events = [
        SessionEvent::AttemptStarted,
        SessionEvent::Authenticated(sample_user()),
        SessionEvent::AttemptStarted,
        SessionEvent::AuthenticationFailed("bad".into()),
        SessionEvent::ErrorCleared,
        SessionEvent::LoadingSet(true),
        SessionEvent::Authenticated(sample_user()),
        SessionEvent::SignedOut,
        SessionEvent::ErrorCleared,
        SessionEvent::LoadingSet(false),
    ];
    let mut state = SessionState::default();
    assert!(invariant_holds(&state));
    for event in events {
        state = next(&state, event);
        assert!(invariant_holds(&state), "invariant broken after {state:?}");
    }
}
