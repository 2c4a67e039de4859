//! Dashboard layout: sidebar and topbar chrome around the routed content.
//!
//! SYSTEM CONTEXT
//! ==============
//! Everything under `/dashboard` renders inside this shell. It blocks on the
//! session resolving, then either shows the chrome or (via the redirect
//! helper) sends an unauthenticated visitor back to `/login`.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
#[cfg(feature = "hydrate")]
use leptos_router::NavigateOptions;
use leptos_router::components::Outlet;
use leptos_router::hooks::use_navigate;

use crate::components::sidebar::Sidebar;
use crate::state::session::{SessionContext, SessionSnapshot};
use crate::util::auth::install_unauth_redirect;

/// First name for the topbar greeting.
fn first_name(name: &str) -> &str {
    name.split_whitespace().next().unwrap_or("User")
}

#[component]
pub fn DashboardLayout() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionSnapshot>>();
    let context = expect_context::<SessionContext>();
    let navigate = use_navigate();
    install_unauth_redirect(session, navigate.clone());

    let on_logout = Callback::new(move |()| {
        let context = context.clone();
        let navigate = navigate.clone();
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            // Local logout is unconditional; only then tell the server.
            context.0.logout().await;
            navigate("/login", NavigateOptions::default());
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (context, navigate);
        }
    });

    view! {
        <Show
            when=move || !session.get().is_resolving()
            fallback=|| view! { <div class="loading-screen">"Loading user..."</div> }
        >
            <div class="dashboard-shell">
                <Sidebar/>
                <div class="dashboard-main">
                    <header class="topbar">
                        <div></div>
                        <div class="topbar__user">
                            <span class="topbar__name">
                                {move || {
                                    session
                                        .get()
                                        .user
                                        .map_or_else(|| "User".to_owned(), |user| first_name(&user.name).to_owned())
                                }}
                            </span>
                            <button class="topbar__logout" title="Logout" on:click=move |_| on_logout.run(())>
                                "Logout"
                            </button>
                        </div>
                    </header>
                    <main class="dashboard-content">
                        <Outlet/>
                    </main>
                </div>
            </div>
        </Show>
    }
}
