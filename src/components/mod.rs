//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render dashboard chrome and shared dialog surfaces while
//! reading session state from Leptos context providers.

pub mod dialog;
pub mod sidebar;
pub mod training_card;
