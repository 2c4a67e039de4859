//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components under the dashboard apply identical unauthenticated
//! redirect behavior; the predicate is split out so it can be tested without
//! a router.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::session::{SessionSnapshot, SessionStatus};

/// True once the session has settled unauthenticated. A resolving session
/// (uninitialized or loading) must not redirect yet.
pub fn should_redirect_unauth(snapshot: &SessionSnapshot) -> bool {
    snapshot.status == SessionStatus::Unauthenticated
}

/// Redirect to `/login` whenever the session settles unauthenticated.
pub fn install_unauth_redirect<F>(session: RwSignal<SessionSnapshot>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if should_redirect_unauth(&session.get()) {
            navigate("/login", NavigateOptions::default());
        }
    });
}
