//! Shared application state modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `session` owns authenticated-user identity; pages and components read it
//! through Leptos context and never touch storage or the auth API directly.

pub mod session;
