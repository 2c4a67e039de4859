//! Browser cookie access for the auth token credential.
//!
//! Client-side (hydrate): reads/writes `document.cookie`. Server-side (SSR):
//! stubs, since the credential only exists in the browser.

#[cfg(test)]
#[path = "cookies_test.rs"]
mod cookies_test;

/// Seven days, the lifetime of the token credential.
#[cfg(any(test, feature = "hydrate"))]
const TOKEN_MAX_AGE_SECS: u32 = 60 * 60 * 24 * 7;

/// Extract the raw value of `name` from a `document.cookie` string.
#[cfg(any(test, feature = "hydrate"))]
fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies.split(';').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        if key.trim() == name {
            Some(value.trim().to_owned())
        } else {
            None
        }
    })
}

/// Format the assignment string that persists `name` with the session scope
/// used for the token credential.
#[cfg(any(test, feature = "hydrate"))]
fn set_cookie_string(name: &str, encoded_value: &str) -> String {
    format!("{name}={encoded_value}; path=/; max-age={TOKEN_MAX_AGE_SECS}; samesite=lax")
}

/// Format the assignment string that expires `name` immediately.
#[cfg(any(test, feature = "hydrate"))]
fn clear_cookie_string(name: &str) -> String {
    format!("{name}=; path=/; max-age=0")
}

/// Read a cookie by name.
pub fn get(name: &str) -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        let cookies = html_document()?.cookie().ok()?;
        let raw = cookie_value(&cookies, name)?;
        js_sys::decode_uri_component(&raw)
            .ok()
            .map(|decoded| String::from(decoded))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = name;
        None
    }
}

/// Write a cookie with the standard credential scope.
pub fn set(name: &str, value: &str) {
    #[cfg(feature = "hydrate")]
    {
        let Some(document) = html_document() else {
            return;
        };
        let encoded = String::from(js_sys::encode_uri_component(value));
        let _ = document.set_cookie(&set_cookie_string(name, &encoded));
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (name, value);
    }
}

/// Expire a cookie immediately.
pub fn remove(name: &str) {
    #[cfg(feature = "hydrate")]
    {
        let Some(document) = html_document() else {
            return;
        };
        let _ = document.set_cookie(&clear_cookie_string(name));
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = name;
    }
}

#[cfg(feature = "hydrate")]
fn html_document() -> Option<web_sys::HtmlDocument> {
    use wasm_bindgen::JsCast;

    web_sys::window()?
        .document()?
        .dyn_into::<web_sys::HtmlDocument>()
        .ok()
}
