// SPDX-License-Identifier: MPL-2.0
//! Account endpoints: registration, login, and token refresh.

use super::ApiClient;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Token pair handed out by login and refresh.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenResponse {
    pub access_token: String,
    /// Refresh may answer without a new refresh token, in which case the
    /// previous one stays valid.
    pub refresh_token: Option<String>,
}

/// Registers a new account.
pub async fn register_user(client: &ApiClient, request: &RegisterRequest) -> Result<()> {
    client
        .send_checked(
            client
                .http()
                .post(client.endpoint("/api/Auth/register"))
                .json(request),
        )
        .await
        .map_err(|f| f.into_error("Failed to register"))?;
    Ok(())
}

/// Signs in and returns the token pair.
pub async fn login_user(
    client: &ApiClient,
    request: &LoginRequest,
) -> Result<AccessTokenResponse> {
    let response = client
        .send_checked(
            client
                .http()
                .post(client.endpoint("/api/Auth/login"))
                .json(request),
        )
        .await
        .map_err(|f| f.into_error("Failed to login"))?;

    response
        .json::<AccessTokenResponse>()
        .await
        .map_err(|e| Error::Api(format!("Unexpected login response: {}", e)))
}

/// Exchanges a refresh token for a new token pair.
pub async fn refresh_access_token(
    client: &ApiClient,
    refresh_token: &str,
) -> Result<AccessTokenResponse> {
    let body = serde_json::json!({ "refreshToken": refresh_token });
    let response = client
        .send_checked(
            client
                .http()
                .post(client.endpoint("/api/Auth/refresh"))
                .json(&body),
        )
        .await
        .map_err(|f| f.into_error("Failed to refresh token"))?;

    response
        .json::<AccessTokenResponse>()
        .await
        .map_err(|e| Error::Api(format!("Unexpected refresh response: {}", e)))
}
