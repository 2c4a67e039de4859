//! Session state and the manager that owns it.
//!
//! ARCHITECTURE
//! ============
//! [`SessionManager`] is the single authority for "who is logged in". It is
//! constructed once at startup with an [`AuthApi`] and a [`CredentialStore`]
//! (both injected, so flows run natively against fakes), lives in Leptos
//! context, and pushes a [`SessionSnapshot`] to one observer after every
//! completed transition. Everything else reads the snapshot.
//!
//! CONCURRENCY
//! ===========
//! All operations run as non-blocking tasks on the browser's single-threaded
//! event loop. A generation counter is bumped on every completed transition;
//! an async completion carrying a stale generation is discarded, so a
//! late-arriving login response cannot resurrect a session after an
//! intervening logout. At most one `GET /me` is in flight at a time;
//! concurrent refreshes share its outcome through oneshot waiters.
//!
//! ERROR HANDLING
//! ==============
//! `login`/`refresh` return typed errors for the caller to render. `logout`
//! and `initialize` never fail: remote logout failures are logged and
//! swallowed after the unconditional local clear, and a token that fails
//! validation for any reason settles the session unauthenticated (an
//! unreachable validation endpoint cannot be told apart from an expired
//! token, so the session fails closed).

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::channel::oneshot;

use crate::net::api::AuthApi;
use crate::net::error::ApiError;
use crate::net::types::User;
use crate::util::credentials::CredentialStore;

/// Lifecycle phase of the authenticated session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionStatus {
    /// Process started; stored credentials not yet examined.
    #[default]
    Uninitialized,
    /// A previously stored credential is being resolved.
    Loading,
    Authenticated,
    Unauthenticated,
}

/// Read-only view of the session handed to observers and the view layer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    /// Resolved user, or, while `Loading`, a provisional cached user that
    /// the server response will supersede.
    pub user: Option<User>,
}

impl SessionSnapshot {
    pub fn is_authenticated(&self) -> bool {
        self.status == SessionStatus::Authenticated
    }

    /// True until the session has settled one way or the other.
    pub fn is_resolving(&self) -> bool {
        matches!(self.status, SessionStatus::Uninitialized | SessionStatus::Loading)
    }
}

/// Leptos context handle for the shared session manager.
#[derive(Clone)]
pub struct SessionContext(pub Arc<SessionManager>);

#[derive(Default)]
struct SessionState {
    status: SessionStatus,
    token: Option<String>,
    user: Option<User>,
    /// Bumped on every completed transition; stale completions are dropped.
    generation: u64,
    /// Guards the single in-flight `GET /me`.
    me_pending: bool,
    /// Callers coalesced onto the in-flight `GET /me`.
    waiters: Vec<oneshot::Sender<Result<(), ApiError>>>,
}

/// Owner of the authenticated-user identity, kept in sync with persistent
/// storage and the remote Auth API.
pub struct SessionManager {
    api: Arc<dyn AuthApi>,
    store: Arc<dyn CredentialStore>,
    state: Mutex<SessionState>,
    observer: Mutex<Option<Box<dyn Fn(SessionSnapshot) + Send>>>,
}

impl SessionManager {
    pub fn new(api: Arc<dyn AuthApi>, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            api,
            store,
            state: Mutex::new(SessionState::default()),
            observer: Mutex::new(None),
        }
    }

    /// Current session view.
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.state();
        SessionSnapshot {
            status: state.status,
            user: state.user.clone(),
        }
    }

    /// Register the observer notified after every completed transition.
    pub fn set_observer(&self, observer: impl Fn(SessionSnapshot) + Send + 'static) {
        *self.observer.lock().unwrap_or_else(PoisonError::into_inner) = Some(Box::new(observer));
    }

    /// Resolve any previously stored credential. Runs once at startup; later
    /// calls are no-ops. Never fails; it always settles a terminal status.
    ///
    /// With no stored token this makes zero network calls; otherwise exactly
    /// one `GET /me` decides the outcome, with no automatic retry.
    pub async fn initialize(&self) {
        if self.state().status != SessionStatus::Uninitialized {
            return;
        }
        let Some(token) = self.store.token() else {
            self.settle_unauthenticated();
            return;
        };
        // Show the cached snapshot provisionally while the server decides.
        let provisional = self.store.user_snapshot();
        self.begin_loading(token.clone(), provisional);
        let _ = self.resolve_token(token).await;
    }

    /// Authenticate with fresh credentials via `POST /login`.
    ///
    /// On success the token and user are persisted together and the session
    /// becomes authenticated. On failure the prior state is untouched and
    /// the error is returned for the caller to render.
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionSnapshot, ApiError> {
        let generation = self.current_generation();
        let response = self.api.login(email, password).await?;
        if self.is_current(generation) {
            self.settle_authenticated(response.token, response.user);
        } else {
            log::debug!("discarding login response superseded by a newer transition");
        }
        Ok(self.snapshot())
    }

    /// Clear the local session unconditionally, then best-effort notify the
    /// server. Remote failure never blocks local termination.
    pub async fn logout(&self) {
        let token = self.state().token.clone();
        self.settle_unauthenticated();
        if let Some(token) = token {
            if let Err(err) = self.api.logout(&token).await {
                log::warn!("remote logout failed: {err}");
            }
        }
    }

    /// Re-validate the current token against `GET /me`, picking up
    /// out-of-band profile changes.
    ///
    /// With no token this is a no-op that leaves the status unauthenticated.
    /// A call arriving while a validation is already in flight shares its
    /// outcome instead of issuing a second request.
    pub async fn refresh(&self) -> Result<SessionSnapshot, ApiError> {
        let token = self.state().token.clone();
        let Some(token) = token else {
            return Ok(self.snapshot());
        };
        self.resolve_token(token).await?;
        Ok(self.snapshot())
    }

    /// Validate `token` against `GET /me` and settle the session either way,
    /// unless a newer transition completed while the call was in flight.
    async fn resolve_token(&self, token: String) -> Result<(), ApiError> {
        let waiter = {
            let mut state = self.state();
            if state.me_pending {
                let (tx, rx) = oneshot::channel();
                state.waiters.push(tx);
                Some(rx)
            } else {
                state.me_pending = true;
                None
            }
        };
        if let Some(rx) = waiter {
            return rx
                .await
                .unwrap_or_else(|_| Err(ApiError::Network("validation abandoned".to_owned())));
        }

        let generation = self.current_generation();
        let result = self.api.me(&token).await;
        let waiters = {
            let mut state = self.state();
            state.me_pending = false;
            std::mem::take(&mut state.waiters)
        };

        let outcome = if self.is_current(generation) {
            match result {
                Ok(user) => {
                    self.settle_authenticated(token, user);
                    Ok(())
                }
                Err(err) => {
                    log::warn!("session validation failed: {err}");
                    self.settle_unauthenticated();
                    Err(err)
                }
            }
        } else {
            log::debug!("discarding session validation superseded by a newer transition");
            Ok(())
        };

        for tx in waiters {
            let _ = tx.send(outcome.clone());
        }
        outcome
    }

    fn settle_authenticated(&self, token: String, user: User) {
        self.store.store(&token, &user);
        {
            let mut state = self.state();
            state.status = SessionStatus::Authenticated;
            state.token = Some(token);
            state.user = Some(user);
            state.generation += 1;
        }
        self.notify();
    }

    fn settle_unauthenticated(&self) {
        self.store.clear();
        {
            let mut state = self.state();
            state.status = SessionStatus::Unauthenticated;
            state.token = None;
            state.user = None;
            state.generation += 1;
        }
        self.notify();
    }

    fn begin_loading(&self, token: String, provisional: Option<User>) {
        {
            let mut state = self.state();
            state.status = SessionStatus::Loading;
            state.token = Some(token);
            if provisional.is_some() {
                state.user = provisional;
            }
        }
        self.notify();
    }

    fn current_generation(&self) -> u64 {
        self.state().generation
    }

    fn is_current(&self, generation: u64) -> bool {
        self.state().generation == generation
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn notify(&self) {
        let snapshot = self.snapshot();
        if let Some(observer) = self
            .observer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            observer(snapshot);
        }
    }

    #[cfg(test)]
    fn token_for_test(&self) -> Option<String> {
        self.state().token.clone()
    }
}
