//! Wire DTOs for the GymControll REST API.
//!
//! DESIGN
//! ======
//! These types mirror the server's JSON payloads exactly so serde does the
//! whole decoding job. The resource API wraps its payloads in a `{data: …}`
//! envelope; login is the one flat-shaped response.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The `{data: …}` envelope the resource API wraps responses in.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// An authenticated user, as returned by `POST /login` and `GET /me`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Numeric database identifier.
    pub id: i64,
    /// Stable public identifier.
    pub uuid: Uuid,
    /// Display name.
    pub name: String,
    /// Login email address.
    pub email: String,
}

/// Successful `POST /login` payload: the bearer token plus the user it
/// belongs to, issued together.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// A training program owned by the current user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Training {
    pub uuid: Uuid,
    pub name: String,
    /// ISO 8601 creation timestamp, passed through for display.
    pub created_at: String,
}

/// An exercise nested under a training.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub uuid: Uuid,
    pub name: String,
}
