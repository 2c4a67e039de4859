//! Profile page rendering the authenticated user's details.
//!
//! Kicks off a background re-validation on mount so out-of-band profile
//! changes show up; a failed refresh demotes the session and the dashboard
//! shell redirects.

use leptos::prelude::*;

use crate::state::session::SessionSnapshot;
#[cfg(feature = "hydrate")]
use crate::state::session::SessionContext;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionSnapshot>>();

    #[cfg(feature = "hydrate")]
    {
        let context = expect_context::<SessionContext>();
        leptos::task::spawn_local(async move {
            let _ = context.0.refresh().await;
        });
    }

    view! {
        <div class="profile-page">
            <h1>"Profile"</h1>
            {move || match session.get().user {
                Some(user) => {
                    view! {
                        <div class="profile-page__fields">
                            <p>
                                <strong>"Name: "</strong>
                                {user.name}
                            </p>
                            <p>
                                <strong>"Email: "</strong>
                                {user.email}
                            </p>
                            <p>
                                <strong>"UUID: "</strong>
                                {user.uuid.to_string()}
                            </p>
                        </div>
                    }
                        .into_any()
                }
                None => view! { <p class="error-text">"User not found."</p> }.into_any(),
            }}
        </div>
    }
}
