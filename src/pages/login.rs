//! Login page for email + password authentication.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
#[cfg(feature = "hydrate")]
use leptos_router::NavigateOptions;
#[cfg(feature = "hydrate")]
use leptos_router::hooks::use_navigate;

#[cfg(any(test, feature = "hydrate"))]
use crate::net::error::ApiError;
#[cfg(feature = "hydrate")]
use crate::state::session::SessionContext;

/// Trim and require both credential fields. Email/password format rules
/// stay with the server.
fn validate_credentials(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    let password = password.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Enter both email and password.");
    }
    Ok((email.to_owned(), password.to_owned()))
}

/// Inline message for a failed login attempt.
#[cfg(any(test, feature = "hydrate"))]
fn login_error_message(err: &ApiError) -> &'static str {
    match err {
        ApiError::Authentication => "Invalid credentials. Please try again.",
        ApiError::Network(_) => "Could not reach the server. Please try again.",
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    let session = expect_context::<SessionContext>();
    #[cfg(feature = "hydrate")]
    let navigate = use_navigate();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        error.set(String::new());
        let credentials = match validate_credentials(&email.get(), &password.get()) {
            Ok(credentials) => credentials,
            Err(message) => {
                error.set(message.to_owned());
                return;
            }
        };
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let session = session.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let (email_value, password_value) = credentials;
                match session.0.login(&email_value, &password_value).await {
                    Ok(_) => navigate("/dashboard", NavigateOptions::default()),
                    Err(err) => {
                        error.set(login_error_message(&err).to_owned());
                        busy.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = credentials;
        }
    };

    view! {
        <main class="login-page">
            <div class="login-card">
                <h1>"GymControll"</h1>

                <Show when=move || !error.get().is_empty()>
                    <div class="login-error">{move || error.get()}</div>
                </Show>

                <form class="login-form" on:submit=on_submit>
                    <label class="login-form__label">
                        "Email address"
                        <input
                            class="login-form__input"
                            type="email"
                            placeholder="Enter your email"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="login-form__label">
                        "Password"
                        <input
                            class="login-form__input"
                            type="password"
                            placeholder="••••••••"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                    </label>
                    <button class="btn btn--primary login-form__submit" type="submit" disabled=move || busy.get()>
                        "Sign In"
                    </button>
                </form>

                <p class="login-card__footer">"Powered by GymControll © 2025"</p>
            </div>
        </main>
    }
}
