//! Auto-dismissing flash messages for CRUD operation outcomes.

#[cfg(feature = "hydrate")]
use std::time::Duration;

use leptos::prelude::*;

/// How long a flash message stays visible.
#[cfg(feature = "hydrate")]
const FLASH_DURATION: Duration = Duration::from_secs(4);

/// Show `message` in `signal`, clearing it after a few seconds unless a
/// newer message has replaced it in the meantime.
pub fn flash(signal: RwSignal<String>, message: &str) {
    signal.set(message.to_owned());
    #[cfg(feature = "hydrate")]
    {
        let message = message.to_owned();
        leptos::task::spawn_local(async move {
            gloo_timers::future::sleep(FLASH_DURATION).await;
            signal.update(|current| {
                if *current == message {
                    current.clear();
                }
            });
        });
    }
}
