//! Root application component with routing and context providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{ParentRoute, Redirect, Route, Router, Routes},
};

use crate::net::api::HttpAuthApi;
use crate::pages::{
    dashboard::DashboardLayout, login::LoginPage, profile::ProfilePage, training::TrainingPage,
    trainings::TrainingsPage,
};
use crate::state::session::{SessionContext, SessionManager, SessionSnapshot};
use crate::util::credentials::BrowserCredentials;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Builds the session manager, mirrors its snapshots into a signal for
/// reactive reads, and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = RwSignal::new(SessionSnapshot::default());
    let manager = Arc::new(SessionManager::new(
        Arc::new(HttpAuthApi),
        Arc::new(BrowserCredentials),
    ));
    manager.set_observer(move |snapshot| session.set(snapshot));
    provide_context(session);
    provide_context(SessionContext(Arc::clone(&manager)));

    // Resolve any stored credential once the app is running in the browser.
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        manager.initialize().await;
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/gymcontroll.css"/>
        <Title text="GymControll"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("login") view=LoginPage/>
                <ParentRoute path=StaticSegment("dashboard") view=DashboardLayout>
                    <Route path=StaticSegment("") view=TrainingsPage/>
                    <Route
                        path=(StaticSegment("trainings"), ParamSegment("uuid"))
                        view=TrainingPage
                    />
                    <Route path=StaticSegment("profile") view=ProfilePage/>
                </ParentRoute>
                <Route path=StaticSegment("") view=|| view! { <Redirect path="/dashboard"/> }/>
            </Routes>
        </Router>
    }
}
