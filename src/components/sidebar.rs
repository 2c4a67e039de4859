//! Collapsible sidebar navigation for the dashboard shell.

use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::state::session::SessionSnapshot;

#[component]
pub fn Sidebar() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionSnapshot>>();
    let open = RwSignal::new(true);
    let pathname = use_location().pathname;

    view! {
        <aside class="sidebar" class:sidebar--collapsed=move || !open.get()>
            <div class="sidebar__header">
                <Show when=move || open.get()>
                    <h2 class="sidebar__brand">"GymControll"</h2>
                </Show>
                <button
                    class="sidebar__toggle"
                    on:click=move |_| open.update(|o| *o = !*o)
                    title=move || if open.get() { "Collapse menu" } else { "Expand menu" }
                >
                    {move || if open.get() { "«" } else { "»" }}
                </button>
            </div>

            <nav class="sidebar__nav">
                <a
                    class="sidebar__link"
                    class:sidebar__link--active=move || pathname.get() == "/dashboard"
                    href="/dashboard"
                >
                    {move || if open.get() { "Trainings" } else { "T" }}
                </a>
                <a
                    class="sidebar__link"
                    class:sidebar__link--active=move || pathname.get() == "/dashboard/profile"
                    href="/dashboard/profile"
                >
                    {move || if open.get() { "Profile" } else { "P" }}
                </a>
            </nav>

            <div class="sidebar__footer">
                <Show when=move || open.get()>
                    {move || {
                        session.get().user.map(|user| {
                            view! {
                                <span class="sidebar__whoami">"Logged in as" <br/> {user.name}</span>
                            }
                        })
                    }}
                </Show>
            </div>
        </aside>
    }
}
