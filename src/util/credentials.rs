//! Persisted credential slot: the token cookie plus the cached user snapshot.
//!
//! DESIGN
//! ======
//! The two values live under reserved keys and move together: written on
//! every successful session transition, cleared on every transition to
//! unauthenticated, never mutated independently. Only the session manager
//! writes here; everything else reads the token through [`stored_token`].

#[cfg(test)]
#[path = "credentials_test.rs"]
mod credentials_test;

use crate::net::types::User;
use crate::util::{cookies, storage};

/// Reserved cookie name holding the bearer token.
pub const TOKEN_COOKIE: &str = "token";

/// Reserved localStorage key holding the cached user snapshot.
pub const USER_SNAPSHOT_KEY: &str = "user";

/// Persistent credential storage owned by the session manager.
///
/// `store` persists the token and snapshot as one unit; `clear` removes
/// both. The snapshot is a provisional rendering hint, never an
/// authorization source.
pub trait CredentialStore: Send + Sync {
    /// Previously persisted token, if any.
    fn token(&self) -> Option<String>;
    /// Previously persisted user snapshot; a snapshot that no longer decodes
    /// is discarded and reported absent.
    fn user_snapshot(&self) -> Option<User>;
    /// Persist a token and the user it was issued to, together.
    fn store(&self, token: &str, user: &User);
    /// Clear both values.
    fn clear(&self);
}

/// Cookie + localStorage backed store used in the browser.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserCredentials;

impl CredentialStore for BrowserCredentials {
    fn token(&self) -> Option<String> {
        cookies::get(TOKEN_COOKIE)
    }

    fn user_snapshot(&self) -> Option<User> {
        storage::load_json(USER_SNAPSHOT_KEY)
    }

    fn store(&self, token: &str, user: &User) {
        cookies::set(TOKEN_COOKIE, token);
        storage::save_json(USER_SNAPSHOT_KEY, user);
    }

    fn clear(&self) {
        cookies::remove(TOKEN_COOKIE);
        storage::remove(USER_SNAPSHOT_KEY);
    }
}

/// Read the stored token without going through the session manager.
///
/// CRUD calls use this to attach the bearer header; it never writes.
pub fn stored_token() -> Option<String> {
    cookies::get(TOKEN_COOKIE)
}

/// In-memory [`CredentialStore`] with the same discard-on-corruption
/// behavior as the browser store, for exercising session flows natively.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct MemoryCredentials {
    token: std::sync::Mutex<Option<String>>,
    snapshot: std::sync::Mutex<Option<String>>,
}

#[cfg(test)]
impl MemoryCredentials {
    /// Store pre-seeded with a token, as after a prior session.
    pub fn seeded(token: &str) -> Self {
        let store = Self::default();
        *store.token.lock().expect("token slot") = Some(token.to_owned());
        store
    }

    /// Inject a raw snapshot value, bypassing encoding.
    pub fn seed_snapshot_json(&self, raw: &str) {
        *self.snapshot.lock().expect("snapshot slot") = Some(raw.to_owned());
    }
}

#[cfg(test)]
impl CredentialStore for MemoryCredentials {
    fn token(&self) -> Option<String> {
        self.token.lock().expect("token slot").clone()
    }

    fn user_snapshot(&self) -> Option<User> {
        let raw = self.snapshot.lock().expect("snapshot slot").clone()?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(_) => {
                *self.snapshot.lock().expect("snapshot slot") = None;
                None
            }
        }
    }

    fn store(&self, token: &str, user: &User) {
        *self.token.lock().expect("token slot") = Some(token.to_owned());
        *self.snapshot.lock().expect("snapshot slot") = serde_json::to_string(user).ok();
    }

    fn clear(&self) {
        *self.token.lock().expect("token slot") = None;
        *self.snapshot.lock().expect("snapshot slot") = None;
    }
}
