//! Failure taxonomy for remote API calls.
//!
//! ERROR HANDLING
//! ==============
//! Two caller-visible failure modes: the server understood and said no
//! (`Authentication`), or the exchange itself broke (`Network`). Malformed
//! response bodies count as `Network`: an endpoint that cannot produce its
//! own schema is indistinguishable from an unreachable one.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use thiserror::Error;

/// Failure surfaced by a remote API call.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Credentials or bearer token rejected by the server.
    #[error("authentication rejected")]
    Authentication,
    /// Transport-level failure: DNS, refused connection, timeout, or an
    /// unparseable response body.
    #[error("network error: {0}")]
    Network(String),
}

impl ApiError {
    /// Classify a non-2xx `POST /login` status. Any 4xx means the server
    /// rejected the credentials; everything else is a transport problem.
    pub fn from_login_status(status: u16) -> Self {
        if (400..500).contains(&status) {
            Self::Authentication
        } else {
            Self::Network(format!("login failed: {status}"))
        }
    }

    /// Classify a non-2xx status on a bearer-authenticated call. Only 401
    /// signals a rejected token.
    pub fn from_status(status: u16) -> Self {
        if status == 401 {
            Self::Authentication
        } else {
            Self::Network(format!("request failed: {status}"))
        }
    }
}
