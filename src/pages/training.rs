//! Training detail page — one training and the exercises nested under it.
//!
//! ARCHITECTURE
//! ============
//! The training and its exercise list load together. Exercise mutations
//! update the local list in place after the server confirms, so the page
//! never refetches what it already knows.

#[cfg(test)]
#[path = "training_test.rs"]
mod training_test;

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use uuid::Uuid;

use crate::components::dialog::{ConfirmDialog, NameDialog, normalized_name};
use crate::components::training_card::created_label;
use crate::net::error::ApiError;
use crate::net::types::{Exercise, Training};
#[cfg(feature = "hydrate")]
use crate::util::flash::flash;

/// Rename `uuid` in place, if present.
#[cfg(any(test, feature = "hydrate"))]
fn rename_exercise(list: &mut [Exercise], uuid: Uuid, name: &str) {
    if let Some(found) = list.iter_mut().find(|exercise| exercise.uuid == uuid) {
        found.name = name.to_owned();
    }
}

/// Drop `uuid` from the list, if present.
#[cfg(any(test, feature = "hydrate"))]
fn remove_exercise(list: &mut Vec<Exercise>, uuid: Uuid) {
    list.retain(|exercise| exercise.uuid != uuid);
}

type LoadedTraining = Option<(Result<Training, ApiError>, Result<Vec<Exercise>, ApiError>)>;

#[component]
pub fn TrainingPage() -> impl IntoView {
    let params = use_params_map();
    let training_uuid = move || {
        params
            .read()
            .get("uuid")
            .and_then(|raw| Uuid::parse_str(&raw).ok())
    };

    let data: LocalResource<LoadedTraining> = LocalResource::new(move || {
        let uuid = training_uuid();
        async move {
            let uuid = uuid?;
            let (training, exercises) = futures::join!(
                crate::net::api::fetch_training(&uuid),
                crate::net::api::fetch_exercises(&uuid),
            );
            Some((training, exercises))
        }
    });

    // Mutations edit this list in place once the server confirms.
    let exercises = RwSignal::new(Vec::<Exercise>::new());
    Effect::new(move || {
        if let Some(Some((_, Ok(list)))) = data.get() {
            exercises.set(list);
        }
    });

    let info = RwSignal::new(String::new());
    let show_create = RwSignal::new(false);
    let create_name = RwSignal::new(String::new());
    let edit_target = RwSignal::new(None::<Uuid>);
    let edit_name = RwSignal::new(String::new());
    let delete_target = RwSignal::new(None::<Uuid>);

    let on_edit_open = Callback::new(move |(uuid, name): (Uuid, String)| {
        edit_name.set(name);
        edit_target.set(Some(uuid));
    });
    let on_delete_open = Callback::new(move |uuid: Uuid| delete_target.set(Some(uuid)));

    let submit_create = Callback::new(move |()| {
        let Some(training) = training_uuid() else {
            return;
        };
        let Some(name) = normalized_name(&create_name.get()) else {
            return;
        };
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::create_exercise(&training, &name).await {
                Ok(created) => {
                    exercises.update(|list| list.push(created));
                    show_create.set(false);
                    flash(info, "Exercise created");
                }
                Err(_) => flash(info, "Error creating exercise"),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (training, name);
        }
    });

    let submit_edit = Callback::new(move |()| {
        let Some(training) = training_uuid() else {
            return;
        };
        let Some(exercise) = edit_target.get() else {
            return;
        };
        let Some(name) = normalized_name(&edit_name.get()) else {
            return;
        };
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::update_exercise(&training, &exercise, &name).await {
                Ok(()) => {
                    exercises.update(|list| rename_exercise(list, exercise, &name));
                    edit_target.set(None);
                    flash(info, "Exercise updated");
                }
                Err(_) => flash(info, "Error updating exercise"),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (training, exercise, name);
        }
    });

    let submit_delete = Callback::new(move |()| {
        let Some(training) = training_uuid() else {
            return;
        };
        let Some(exercise) = delete_target.get() else {
            return;
        };
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::delete_exercise(&training, &exercise).await {
                Ok(()) => {
                    exercises.update(|list| remove_exercise(list, exercise));
                    delete_target.set(None);
                    flash(info, "Exercise deleted");
                }
                Err(_) => flash(info, "Error deleting exercise"),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (training, exercise);
        }
    });

    view! {
        <div class="training-page">
            <Show when=move || !info.get().is_empty()>
                <p class="flash">{move || info.get()}</p>
            </Show>

            <Suspense fallback=move || view! { <p class="muted">"Loading..."</p> }>
                {move || {
                    data.get().map(|loaded| match loaded {
                        Some((Ok(training), _)) => {
                            view! {
                                <div>
                                    <h1 class="training-page__title">{training.name}</h1>
                                    <p class="training-page__created">
                                        {format!("Created on: {}", created_label(&training.created_at))}
                                    </p>

                                    <section>
                                        <div class="training-page__exercises-header">
                                            <h2>"Exercises"</h2>
                                            <button
                                                class="btn btn--primary"
                                                on:click=move |_| {
                                                    create_name.set(String::new());
                                                    show_create.set(true);
                                                }
                                            >
                                                "+ Add Exercise"
                                            </button>
                                        </div>

                                        {move || {
                                            let list = exercises.get();
                                            if list.is_empty() {
                                                view! {
                                                    <p class="muted">"No exercises found for this training."</p>
                                                }
                                                    .into_any()
                                            } else {
                                                view! {
                                                    <ul class="exercise-list">
                                                        {list
                                                            .into_iter()
                                                            .map(|exercise| {
                                                                let uuid = exercise.uuid;
                                                                let name_for_edit = exercise.name.clone();
                                                                view! {
                                                                    <li class="exercise-list__item">
                                                                        <span>{exercise.name}</span>
                                                                        <span class="exercise-list__actions">
                                                                            <button
                                                                                class="exercise-list__action"
                                                                                title="Edit exercise"
                                                                                aria-label="Edit exercise"
                                                                                on:click=move |_| {
                                                                                    on_edit_open.run((uuid, name_for_edit.clone()));
                                                                                }
                                                                            >
                                                                                "✎"
                                                                            </button>
                                                                            <button
                                                                                class="exercise-list__action exercise-list__action--danger"
                                                                                title="Delete exercise"
                                                                                aria-label="Delete exercise"
                                                                                on:click=move |_| on_delete_open.run(uuid)
                                                                            >
                                                                                "✕"
                                                                            </button>
                                                                        </span>
                                                                    </li>
                                                                }
                                                            })
                                                            .collect::<Vec<_>>()}
                                                    </ul>
                                                }
                                                    .into_any()
                                            }
                                        }}
                                    </section>
                                </div>
                            }
                                .into_any()
                        }
                        _ => view! { <p class="error-text">"Training not found."</p> }.into_any(),
                    })
                }}
            </Suspense>

            <Show when=move || show_create.get()>
                <NameDialog
                    title="Add Exercise"
                    label="Exercise Name"
                    confirm="Create"
                    name=create_name
                    on_cancel=Callback::new(move |()| show_create.set(false))
                    on_submit=submit_create
                />
            </Show>
            <Show when=move || edit_target.get().is_some()>
                <NameDialog
                    title="Edit Exercise"
                    label="Exercise Name"
                    confirm="Save"
                    name=edit_name
                    on_cancel=Callback::new(move |()| edit_target.set(None))
                    on_submit=submit_edit
                />
            </Show>
            <Show when=move || delete_target.get().is_some()>
                <ConfirmDialog
                    message="Are you sure you want to delete this exercise?"
                    confirm="Delete"
                    on_cancel=Callback::new(move |()| delete_target.set(None))
                    on_submit=submit_delete
                />
            </Show>
        </div>
    }
}
