//! Shared modal dialogs for the CRUD pages.
//!
//! DESIGN
//! ======
//! Trainings and exercises share the same two modal shapes (a single-field
//! name form and a delete confirmation), so both live here instead of being
//! repeated per page.

#[cfg(test)]
#[path = "dialog_test.rs"]
mod dialog_test;

use leptos::prelude::*;

/// Trimmed, non-empty form of a name draft, or `None` when there is nothing
/// to submit.
pub(crate) fn normalized_name(raw: &str) -> Option<String> {
    let name = raw.trim();
    if name.is_empty() { None } else { Some(name.to_owned()) }
}

/// Modal with one name input, used for create and rename flows.
#[component]
pub fn NameDialog(
    title: &'static str,
    label: &'static str,
    confirm: &'static str,
    name: RwSignal<String>,
    on_cancel: Callback<()>,
    on_submit: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="dialog-backdrop" on:click=move |_| on_cancel.run(())>
            <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                <h2>{title}</h2>
                <label class="dialog__label">
                    {label}
                    <input
                        class="dialog__input"
                        type="text"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                        on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                            if ev.key() == "Enter" {
                                ev.prevent_default();
                                on_submit.run(());
                            }
                        }
                    />
                </label>
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_cancel.run(())>
                        "Cancel"
                    </button>
                    <button class="btn btn--primary" on:click=move |_| on_submit.run(())>
                        {confirm}
                    </button>
                </div>
            </div>
        </div>
    }
}

/// Modal asking the user to confirm a destructive action.
#[component]
pub fn ConfirmDialog(
    message: &'static str,
    confirm: &'static str,
    on_cancel: Callback<()>,
    on_submit: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="dialog-backdrop" on:click=move |_| on_cancel.run(())>
            <div class="dialog dialog--narrow" on:click=move |ev| ev.stop_propagation()>
                <p>{message}</p>
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_cancel.run(())>
                        "Cancel"
                    </button>
                    <button class="btn btn--danger" on:click=move |_| on_submit.run(())>
                        {confirm}
                    </button>
                </div>
            </div>
        </div>
    }
}
