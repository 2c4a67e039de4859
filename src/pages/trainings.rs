//! Trainings page — the dashboard index listing the user's trainings.
//!
//! ARCHITECTURE
//! ============
//! The list is a `LocalResource` refetched after every successful mutation;
//! create/rename/delete run through the shared dialogs and report outcomes
//! as flash messages.

use leptos::prelude::*;
use uuid::Uuid;

use crate::components::dialog::{ConfirmDialog, NameDialog, normalized_name};
use crate::components::training_card::TrainingCard;
#[cfg(feature = "hydrate")]
use crate::util::flash::flash;

#[component]
pub fn TrainingsPage() -> impl IntoView {
    let trainings = LocalResource::new(|| crate::net::api::fetch_trainings());
    let info = RwSignal::new(String::new());

    let show_create = RwSignal::new(false);
    let create_name = RwSignal::new(String::new());
    let rename_target = RwSignal::new(None::<Uuid>);
    let rename_name = RwSignal::new(String::new());
    let delete_target = RwSignal::new(None::<Uuid>);

    let on_create_open = move |_| {
        create_name.set(String::new());
        show_create.set(true);
    };
    let on_rename_open = Callback::new(move |(uuid, name): (Uuid, String)| {
        rename_name.set(name);
        rename_target.set(Some(uuid));
    });
    let on_delete_open = Callback::new(move |uuid: Uuid| delete_target.set(Some(uuid)));

    let submit_create = Callback::new(move |()| {
        let Some(name) = normalized_name(&create_name.get()) else {
            return;
        };
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::create_training(&name).await {
                Ok(_) => {
                    show_create.set(false);
                    flash(info, "Training created");
                    trainings.refetch();
                }
                Err(_) => flash(info, "Error creating training"),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = name;
        }
    });

    let submit_rename = Callback::new(move |()| {
        let Some(uuid) = rename_target.get() else {
            return;
        };
        let Some(name) = normalized_name(&rename_name.get()) else {
            return;
        };
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::update_training(&uuid, &name).await {
                Ok(()) => {
                    rename_target.set(None);
                    flash(info, "Training updated");
                    trainings.refetch();
                }
                Err(_) => flash(info, "Error updating training"),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (uuid, name);
        }
    });

    let submit_delete = Callback::new(move |()| {
        let Some(uuid) = delete_target.get() else {
            return;
        };
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::delete_training(&uuid).await {
                Ok(()) => {
                    delete_target.set(None);
                    flash(info, "Training deleted");
                    trainings.refetch();
                }
                Err(_) => flash(info, "Error deleting training"),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = uuid;
        }
    });

    view! {
        <div class="trainings-page">
            <header class="trainings-page__header">
                <h1>"Trainings"</h1>
                <button class="btn btn--primary" on:click=on_create_open>
                    "+ New Training"
                </button>
            </header>

            <Show when=move || !info.get().is_empty()>
                <p class="flash">{move || info.get()}</p>
            </Show>

            <Suspense fallback=move || view! { <p class="muted">"Loading trainings..."</p> }>
                {move || {
                    trainings.get().map(|result| match result {
                        Ok(list) => {
                            if list.is_empty() {
                                view! { <p class="muted">"No trainings yet. Create your first one."</p> }
                                    .into_any()
                            } else {
                                view! {
                                    <div class="trainings-page__grid">
                                        {list
                                            .into_iter()
                                            .map(|training| {
                                                view! {
                                                    <TrainingCard
                                                        uuid=training.uuid
                                                        name=training.name
                                                        created_at=training.created_at
                                                        on_rename=on_rename_open
                                                        on_delete=on_delete_open
                                                    />
                                                }
                                            })
                                            .collect::<Vec<_>>()}
                                    </div>
                                }
                                    .into_any()
                            }
                        }
                        Err(_) => view! { <p class="error-text">"Failed to load trainings."</p> }.into_any(),
                    })
                }}
            </Suspense>

            <Show when=move || show_create.get()>
                <NameDialog
                    title="Create Training"
                    label="Training Name"
                    confirm="Create"
                    name=create_name
                    on_cancel=Callback::new(move |()| show_create.set(false))
                    on_submit=submit_create
                />
            </Show>
            <Show when=move || rename_target.get().is_some()>
                <NameDialog
                    title="Rename Training"
                    label="Training Name"
                    confirm="Save"
                    name=rename_name
                    on_cancel=Callback::new(move |()| rename_target.set(None))
                    on_submit=submit_rename
                />
            </Show>
            <Show when=move || delete_target.get().is_some()>
                <ConfirmDialog
                    message="Are you sure you want to delete this training?"
                    confirm="Delete"
                    on_cancel=Callback::new(move |()| delete_target.set(None))
                    on_submit=submit_delete
                />
            </Show>
        </div>
    }
}
