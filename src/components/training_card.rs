//! Card for one training in the dashboard grid.
//!
//! DESIGN
//! ======
//! The card itself navigates to the training detail page; rename/delete are
//! surfaced as small actions that must not trigger navigation.

#[cfg(test)]
#[path = "training_card_test.rs"]
mod training_card_test;

use leptos::prelude::*;
use uuid::Uuid;

/// Short display form of an ISO 8601 creation timestamp:
/// `2025-07-01T18:30:00.000000Z` becomes `2025-07-01 18:30`. An unexpected
/// shape is passed through untouched.
pub(crate) fn created_label(created_at: &str) -> String {
    let Some((date, rest)) = created_at.split_once('T') else {
        return created_at.to_owned();
    };
    match rest.get(..5) {
        Some(time) => format!("{date} {time}"),
        None => date.to_owned(),
    }
}

/// A clickable card representing a training.
#[component]
pub fn TrainingCard(
    uuid: Uuid,
    name: String,
    created_at: String,
    on_rename: Callback<(Uuid, String)>,
    on_delete: Callback<Uuid>,
) -> impl IntoView {
    let href = format!("/dashboard/trainings/{uuid}");
    let rename_name = name.clone();

    view! {
        <a class="training-card" href=href>
            <span class="training-card__name">{name}</span>
            <span class="training-card__created">{format!("Created {}", created_label(&created_at))}</span>
            <span class="training-card__actions">
                <button
                    class="training-card__action"
                    title="Rename training"
                    aria-label="Rename training"
                    on:click=move |ev: leptos::ev::MouseEvent| {
                        ev.prevent_default();
                        ev.stop_propagation();
                        on_rename.run((uuid, rename_name.clone()));
                    }
                >
                    "✎"
                </button>
                <button
                    class="training-card__action training-card__action--danger"
                    title="Delete training"
                    aria-label="Delete training"
                    on:click=move |ev: leptos::ev::MouseEvent| {
                        ev.prevent_default();
                        ev.stop_propagation();
                        on_delete.run(uuid);
                    }
                >
                    "✕"
                </button>
            </span>
        </a>
    }
}
