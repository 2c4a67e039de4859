//! Networking modules for the remote GymControll API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles REST calls (auth + trainings/exercises CRUD), `types`
//! defines the wire schema, and `error` is the failure taxonomy surfaced to
//! the session manager and pages.

pub mod api;
pub mod error;
pub mod types;
