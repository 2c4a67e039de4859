//! REST API client for the GymControll backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`. Server-side (SSR):
//! stubs returning a network error since these endpoints are only meaningful
//! in the browser.
//!
//! SYSTEM CONTEXT
//! ==============
//! The auth surface is expressed as the [`AuthApi`] trait so the session
//! manager can be exercised against scripted fakes; [`HttpAuthApi`] is the
//! browser implementation. Trainings/exercises CRUD are plain functions
//! called by pages; they attach the stored bearer token read-only.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::future::Future;
use std::pin::Pin;

use uuid::Uuid;

use super::error::ApiError;
#[cfg(feature = "hydrate")]
use super::types::Envelope;
use super::types::{Exercise, LoginResponse, Training, User};

#[cfg(any(test, feature = "hydrate"))]
const API_BASE: &str = "/api";

#[cfg(any(test, feature = "hydrate"))]
fn login_endpoint() -> String {
    format!("{API_BASE}/login")
}

#[cfg(any(test, feature = "hydrate"))]
fn me_endpoint() -> String {
    format!("{API_BASE}/me")
}

#[cfg(any(test, feature = "hydrate"))]
fn logout_endpoint() -> String {
    format!("{API_BASE}/logout")
}

#[cfg(any(test, feature = "hydrate"))]
fn trainings_endpoint() -> String {
    format!("{API_BASE}/trainings")
}

#[cfg(any(test, feature = "hydrate"))]
fn training_endpoint(uuid: &Uuid) -> String {
    format!("{API_BASE}/trainings/{uuid}")
}

#[cfg(any(test, feature = "hydrate"))]
fn exercises_endpoint(training: &Uuid) -> String {
    format!("{API_BASE}/trainings/{training}/exercises")
}

#[cfg(any(test, feature = "hydrate"))]
fn exercise_endpoint(training: &Uuid, exercise: &Uuid) -> String {
    format!("{API_BASE}/trainings/{training}/exercises/{exercise}")
}

#[cfg(any(test, feature = "hydrate"))]
fn bearer_value(token: &str) -> String {
    format!("Bearer {token}")
}

/// Boxed single-threaded future returned by [`AuthApi`] operations.
pub type ApiFuture<T> = Pin<Box<dyn Future<Output = Result<T, ApiError>> + 'static>>;

/// Remote Auth API surface consumed by the session manager.
///
/// Implemented by [`HttpAuthApi`] in the browser and by scripted fakes in
/// tests. Tokens are passed explicitly: the session manager owns the
/// credential, implementations never read storage themselves. The returned
/// futures are single-threaded; only the handle itself crosses threads.
pub trait AuthApi: Send + Sync {
    /// `POST /login` with fresh credentials.
    fn login(&self, email: &str, password: &str) -> ApiFuture<LoginResponse>;
    /// `GET /me` validating `token` and returning the user it belongs to.
    fn me(&self, token: &str) -> ApiFuture<User>;
    /// `POST /logout` invalidating `token` server-side.
    fn logout(&self, token: &str) -> ApiFuture<()>;
}

/// `gloo-net` backed [`AuthApi`] implementation.
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpAuthApi;

impl AuthApi for HttpAuthApi {
    fn login(&self, email: &str, password: &str) -> ApiFuture<LoginResponse> {
        #[cfg(feature = "hydrate")]
        {
            let payload = serde_json::json!({ "email": email, "password": password });
            Box::pin(async move {
                let resp = gloo_net::http::Request::post(&login_endpoint())
                    .json(&payload)
                    .map_err(net_err)?
                    .send()
                    .await
                    .map_err(net_err)?;
                if !resp.ok() {
                    return Err(ApiError::from_login_status(resp.status()));
                }
                let body: LoginResponse = resp.json().await.map_err(net_err)?;
                Ok(body)
            })
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email, password);
            Box::pin(async { server_stub() })
        }
    }

    fn me(&self, token: &str) -> ApiFuture<User> {
        #[cfg(feature = "hydrate")]
        {
            let request = gloo_net::http::Request::get(&me_endpoint())
                .header("Authorization", &bearer_value(token));
            Box::pin(async move {
                let resp = request.send().await.map_err(net_err)?;
                if !resp.ok() {
                    return Err(ApiError::from_status(resp.status()));
                }
                let body: Envelope<User> = resp.json().await.map_err(net_err)?;
                Ok(body.data)
            })
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = token;
            Box::pin(async { server_stub() })
        }
    }

    fn logout(&self, token: &str) -> ApiFuture<()> {
        #[cfg(feature = "hydrate")]
        {
            let request = gloo_net::http::Request::post(&logout_endpoint())
                .header("Authorization", &bearer_value(token));
            Box::pin(async move {
                let resp = request.send().await.map_err(net_err)?;
                if !resp.ok() {
                    return Err(ApiError::from_status(resp.status()));
                }
                Ok(())
            })
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = token;
            Box::pin(async { server_stub() })
        }
    }
}

/// Fetch the current user's trainings.
pub async fn fetch_trainings() -> Result<Vec<Training>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = authorized(gloo_net::http::Request::get(&trainings_endpoint()))
            .send()
            .await
            .map_err(net_err)?;
        if !resp.ok() {
            return Err(ApiError::from_status(resp.status()));
        }
        let body: Envelope<Vec<Training>> = resp.json().await.map_err(net_err)?;
        Ok(body.data)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        server_stub()
    }
}

/// Create a training and return the server's copy.
pub async fn create_training(name: &str) -> Result<Training, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let payload = serde_json::json!({ "name": name });
        let resp = authorized(gloo_net::http::Request::post(&trainings_endpoint()))
            .json(&payload)
            .map_err(net_err)?
            .send()
            .await
            .map_err(net_err)?;
        if !resp.ok() {
            return Err(ApiError::from_status(resp.status()));
        }
        let body: Envelope<Training> = resp.json().await.map_err(net_err)?;
        Ok(body.data)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = name;
        server_stub()
    }
}

/// Fetch a single training by uuid.
pub async fn fetch_training(uuid: &Uuid) -> Result<Training, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = authorized(gloo_net::http::Request::get(&training_endpoint(uuid)))
            .send()
            .await
            .map_err(net_err)?;
        if !resp.ok() {
            return Err(ApiError::from_status(resp.status()));
        }
        let body: Envelope<Training> = resp.json().await.map_err(net_err)?;
        Ok(body.data)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = uuid;
        server_stub()
    }
}

/// Rename a training.
pub async fn update_training(uuid: &Uuid, name: &str) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let payload = serde_json::json!({ "name": name });
        let resp = authorized(gloo_net::http::Request::put(&training_endpoint(uuid)))
            .json(&payload)
            .map_err(net_err)?
            .send()
            .await
            .map_err(net_err)?;
        if !resp.ok() {
            return Err(ApiError::from_status(resp.status()));
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (uuid, name);
        server_stub()
    }
}

/// Delete a training and everything nested under it.
pub async fn delete_training(uuid: &Uuid) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = authorized(gloo_net::http::Request::delete(&training_endpoint(uuid)))
            .send()
            .await
            .map_err(net_err)?;
        if !resp.ok() {
            return Err(ApiError::from_status(resp.status()));
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = uuid;
        server_stub()
    }
}

/// Fetch the exercises nested under a training.
pub async fn fetch_exercises(training: &Uuid) -> Result<Vec<Exercise>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = authorized(gloo_net::http::Request::get(&exercises_endpoint(training)))
            .send()
            .await
            .map_err(net_err)?;
        if !resp.ok() {
            return Err(ApiError::from_status(resp.status()));
        }
        let body: Envelope<Vec<Exercise>> = resp.json().await.map_err(net_err)?;
        Ok(body.data)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = training;
        server_stub()
    }
}

/// Create an exercise under a training and return the server's copy.
pub async fn create_exercise(training: &Uuid, name: &str) -> Result<Exercise, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let payload = serde_json::json!({ "name": name });
        let resp = authorized(gloo_net::http::Request::post(&exercises_endpoint(training)))
            .json(&payload)
            .map_err(net_err)?
            .send()
            .await
            .map_err(net_err)?;
        if !resp.ok() {
            return Err(ApiError::from_status(resp.status()));
        }
        let body: Envelope<Exercise> = resp.json().await.map_err(net_err)?;
        Ok(body.data)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (training, name);
        server_stub()
    }
}

/// Rename an exercise.
pub async fn update_exercise(training: &Uuid, exercise: &Uuid, name: &str) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let payload = serde_json::json!({ "name": name });
        let resp = authorized(gloo_net::http::Request::put(&exercise_endpoint(training, exercise)))
            .json(&payload)
            .map_err(net_err)?
            .send()
            .await
            .map_err(net_err)?;
        if !resp.ok() {
            return Err(ApiError::from_status(resp.status()));
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (training, exercise, name);
        server_stub()
    }
}

/// Delete an exercise.
pub async fn delete_exercise(training: &Uuid, exercise: &Uuid) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = authorized(gloo_net::http::Request::delete(&exercise_endpoint(training, exercise)))
            .send()
            .await
            .map_err(net_err)?;
        if !resp.ok() {
            return Err(ApiError::from_status(resp.status()));
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (training, exercise);
        server_stub()
    }
}

/// Attach the stored bearer token, if any. The token cookie is owned by the
/// session manager; this is a read-only attachment point for CRUD calls.
#[cfg(feature = "hydrate")]
fn authorized(request: gloo_net::http::RequestBuilder) -> gloo_net::http::RequestBuilder {
    match crate::util::credentials::stored_token() {
        Some(token) => request.header("Authorization", &bearer_value(&token)),
        None => request,
    }
}

#[cfg(feature = "hydrate")]
fn net_err(err: gloo_net::Error) -> ApiError {
    ApiError::Network(err.to_string())
}

#[cfg(not(feature = "hydrate"))]
fn server_stub<T>() -> Result<T, ApiError> {
    Err(ApiError::Network("not available on server".to_owned()))
}
