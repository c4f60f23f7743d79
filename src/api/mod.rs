//! REST Backend Bindings
//!
//! Request wrappers for the SmartTask backend, organized by resource.
//! Every request carries the session token in the x-auth-token header.

mod auth;
mod projects;
mod speech;
mod tasks;

use std::fmt;

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::session;

pub use auth::*;
pub use projects::*;
pub use speech::*;
pub use tasks::*;

const BASE_URL: &str = "/api";

/// Failure taxonomy at the remote call boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// 401 from the backend: fatal to the session, never retried
    Unauthorized,
    /// Any other non-success status
    Http { status: u16, message: String },
    /// The request never completed
    Network(String),
    /// Body could not be encoded or decoded
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Unauthorized => write!(f, "Session expired"),
            ApiError::Http { status, message } => write!(f, "Server error {}: {}", status, message),
            ApiError::Network(msg) => write!(f, "Network error: {}", msg),
            ApiError::Decode(msg) => write!(f, "Unexpected response: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

fn endpoint(path: &str) -> String {
    format!("{}{}", BASE_URL, path)
}

fn authorized(builder: RequestBuilder) -> RequestBuilder {
    match session::token() {
        Some(token) => builder.header("x-auth-token", &token),
        None => builder,
    }
}

fn network_err(err: gloo_net::Error) -> ApiError {
    ApiError::Network(err.to_string())
}

async fn check(response: Response) -> Result<Response, ApiError> {
    if response.status() == 401 {
        return Err(ApiError::Unauthorized);
    }
    if !response.ok() {
        let message = response.text().await.unwrap_or_default();
        return Err(ApiError::Http {
            status: response.status(),
            message,
        });
    }
    Ok(response)
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let response = check(response).await?;
    response.json().await.map_err(|e| ApiError::Decode(e.to_string()))
}

pub(crate) async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let response = authorized(Request::get(&endpoint(path)))
        .send()
        .await
        .map_err(network_err)?;
    read_json(response).await
}

pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(
    path: &str,
    body: &B,
) -> Result<T, ApiError> {
    let response = authorized(Request::post(&endpoint(path)))
        .json(body)
        .map_err(|e| ApiError::Decode(e.to_string()))?
        .send()
        .await
        .map_err(network_err)?;
    read_json(response).await
}

pub(crate) async fn put_json<B: Serialize, T: DeserializeOwned>(
    path: &str,
    body: &B,
) -> Result<T, ApiError> {
    let response = authorized(Request::put(&endpoint(path)))
        .json(body)
        .map_err(|e| ApiError::Decode(e.to_string()))?
        .send()
        .await
        .map_err(network_err)?;
    read_json(response).await
}

/// DELETE and POST endpoints that answer with an empty ack
pub(crate) async fn delete_ack(path: &str) -> Result<(), ApiError> {
    let response = authorized(Request::delete(&endpoint(path)))
        .send()
        .await
        .map_err(network_err)?;
    check(response).await.map(|_| ())
}

pub(crate) async fn post_ack(path: &str) -> Result<(), ApiError> {
    let response = authorized(Request::post(&endpoint(path)))
        .send()
        .await
        .map_err(network_err)?;
    check(response).await.map(|_| ())
}
