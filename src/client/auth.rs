//! Session handling for the Secure Recipe API.
//!
//! The service hands out an opaque session key on login. It is kept in memory
//! for the lifetime of the process, sent back as `Authorization: Token <key>`
//! and forgotten on logout.

use std::time::Duration;

use reqwest::Client;

use crate::client::client::{decode, rejection};
use crate::client::types::{ApiError, LoginRequest, LoginResponse};
use crate::domain::{Password, Username};

/// Holds the session key of the logged-in user.
pub struct SessionAuth {
    /// Base URL of the API, e.g. `http://localhost:8000/api/v1`
    base_url: String,
    /// HTTP client for authentication requests
    client: Client,
    timeout: Duration,
    /// Session key, `None` while logged out
    token: Option<String>,
}

impl SessionAuth {
    pub fn new(base_url: String, client: Client, timeout: Duration) -> Self {
        Self {
            base_url,
            client,
            timeout,
            token: None,
        }
    }

    pub async fn login(&mut self, username: &Username, password: &Password) -> Result<(), ApiError> {
        tracing::info!("Attempting login for user: {}", username);

        let login_url = format!("{}/auth/login/", self.base_url);
        tracing::debug!("Making login request to: {}", login_url);

        let response = self
            .client
            .post(&login_url)
            .json(&LoginRequest { username, password })
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Network error during login: {}", e);
                ApiError::Transport(e)
            })?;

        let status = response.status();
        tracing::debug!("Login response status: {}", status);

        if !status.is_success() {
            let error = rejection(response).await;
            tracing::error!("Login failed: {}", error);
            return Err(error);
        }

        let login: LoginResponse = decode(response, "login").await?;

        tracing::info!("Login successful for user: {}", username);
        tracing::debug!("Received key: {}", preview(&login.key));
        self.token = Some(login.key);

        Ok(())
    }

    pub async fn logout(&mut self) -> Result<(), ApiError> {
        let header = self.auth_header()?;
        let logout_url = format!("{}/auth/logout/", self.base_url);

        let response = self
            .client
            .post(&logout_url)
            .header("Authorization", header)
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            let error = rejection(response).await;
            tracing::error!("Logout failed: {}", error);
            return Err(error);
        }

        self.token = None;
        tracing::info!("Logged out");
        Ok(())
    }

    /// `Authorization` header value, or [`ApiError::NotAuthenticated`].
    pub fn auth_header(&self) -> Result<String, ApiError> {
        match self.token.as_deref() {
            Some(token) => {
                tracing::debug!("Using session key: {}", preview(token));
                Ok(format!("Token {}", token))
            }
            None => {
                tracing::error!("Attempted to make authenticated request without a session key");
                Err(ApiError::NotAuthenticated)
            }
        }
    }

    pub fn get_token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }
}

/// First characters of a key, safe to log.
pub fn preview(token: &str) -> String {
    let head: String = token.chars().take(10).collect();
    format!("{}...", head)
}
