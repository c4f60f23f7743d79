//! Auth Endpoints
//!
//! Login/register exchange credentials for an opaque session token.

use serde::{Deserialize, Serialize};

use super::{post_ack, post_json, ApiError};

#[derive(Serialize)]
pub struct LoginArgs<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Serialize)]
pub struct RegisterArgs<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
}

pub async fn login(args: &LoginArgs<'_>) -> Result<AuthResponse, ApiError> {
    post_json("/auth/login", args).await
}

pub async fn register(args: &RegisterArgs<'_>) -> Result<AuthResponse, ApiError> {
    post_json("/auth/register", args).await
}

/// Best-effort server-side logout; the session is torn down locally anyway
pub async fn logout() -> Result<(), ApiError> {
    post_ack("/auth/logout").await
}
