//! API client for communicating with an Active Tigger server.
//!
//! This module provides the `ApiClient` struct for authenticating and
//! making authenticated requests for project data.

use anyhow::{Context, Result};
use reqwest::{header, Client};
use serde::Deserialize;
use tracing::debug;

use crate::models::{Identity, ProjectData, ProjectState, ProjectSummary, ProjectsResponse};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
/// Applies to every call so a hung server cannot leave a flow suspended.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Response of `POST /token`. A body without `access_token` is a parse
/// failure, never a partial success.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

/// API client for an Active Tigger server.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
    username: Option<String>,
}

impl ApiClient {
    /// Create a new API client against the given base URL
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
            username: None,
        })
    }

    /// Adopt a session: bearer token plus the username header the server expects
    pub fn set_session(&mut self, token: String, username: String) {
        self.token = Some(token);
        self.username = Some(username);
    }

    /// Drop the current session from the client
    pub fn clear_session(&mut self) {
        self.token = None;
        self.username = None;
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Exchange credentials for a bearer token via `POST /token`.
    ///
    /// Fails on transport errors, non-2xx responses, and bodies without an
    /// `access_token` field. Credentials are never included in log output or
    /// error messages.
    pub async fn login(&self, username: &str, password: &str) -> Result<String> {
        let url = format!("{}/token", self.base_url);

        let response = self
            .client
            .post(&url)
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .context("Failed to send authentication request")?;

        if !response.status().is_success() {
            let status = response.status();
            debug!(%status, "Token endpoint rejected the request");
            return Err(ApiError::Authentication.into());
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|_| ApiError::Authentication)
            .context("Token response did not contain an access token")?;

        debug!(token_type = ?token.token_type, status = ?token.status, "Token issued");
        Ok(token.access_token)
    }

    /// Fetch the identity behind a freshly issued token via `GET /users/me`.
    /// The outcome is explicit: an identity, or the reason there is none.
    pub async fn fetch_identity(&self, token: &str) -> Result<Identity> {
        let url = format!("{}/users/me", self.base_url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .context("Failed to send identity request")?;

        let response = Self::check_response(response).await?;

        response
            .json()
            .await
            .context("Failed to parse identity response")
    }

    /// List the projects available to the current user via `GET /projects`
    pub async fn user_projects(&self) -> Result<Vec<ProjectSummary>> {
        let username = self
            .username
            .as_deref()
            .ok_or(ApiError::AuthorizationMissing)?;
        let url = format!("{}/projects", self.base_url);

        let response = self
            .client
            .get(&url)
            .header("username", username)
            .send()
            .await
            .context("Failed to fetch project list")?;

        let response = Self::check_response(response).await?;

        let parsed: ProjectsResponse = response
            .json()
            .await
            .context("Failed to parse project list")?;

        debug!(count = parsed.projects.len(), "Projects fetched");
        Ok(parsed.projects)
    }

    /// Create a new project via `POST /projects/new`.
    ///
    /// Backend validation errors surface as `ApiError::Validation` with the
    /// `detail` messages joined by "; ".
    pub async fn create_project(&self, project: &ProjectData) -> Result<()> {
        let url = format!("{}/projects/new", self.base_url);

        let response = self
            .client
            .post(&url)
            .headers(self.auth_headers()?)
            .json(project)
            .send()
            .await
            .context("Failed to send project creation request")?;

        Self::check_response(response).await?;
        debug!(project = %project.project_name, "Project created");
        Ok(())
    }

    /// Fetch the live state of a project via `GET /state/{project_name}`
    pub async fn project_state(&self, project_name: &str) -> Result<ProjectState> {
        let url = format!("{}/state/{}", self.base_url, project_name);

        let response = self
            .client
            .get(&url)
            .headers(self.auth_headers()?)
            .send()
            .await
            .with_context(|| format!("Failed to fetch state for {}", project_name))?;

        let response = Self::check_response(response).await?;

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse state for {}", project_name))
    }

    /// Headers for session-gated endpoints: bearer token plus username.
    /// Fails with `AuthorizationMissing` rather than sending a bare request.
    fn auth_headers(&self) -> Result<header::HeaderMap, ApiError> {
        let (token, username) = match (self.token.as_deref(), self.username.as_deref()) {
            (Some(t), Some(u)) => (t, u),
            _ => return Err(ApiError::AuthorizationMissing),
        };

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ApiError::InvalidResponse("Token is not a valid header value".to_string()))?,
        );
        headers.insert(
            "username",
            header::HeaderValue::from_str(username)
                .map_err(|_| ApiError::InvalidResponse("Username is not a valid header value".to_string()))?,
        );
        Ok(headers)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_response_requires_access_token() {
        let ok: TokenResponse =
            serde_json::from_str(r#"{"access_token": "tok123", "token_type": "bearer"}"#)
                .expect("Failed to parse token response");
        assert_eq!(ok.access_token, "tok123");
        assert_eq!(ok.token_type.as_deref(), Some("bearer"));

        // No access_token field means no token, not an empty one
        assert!(serde_json::from_str::<TokenResponse>(r#"{"token_type": "bearer"}"#).is_err());
        assert!(serde_json::from_str::<TokenResponse>("{}").is_err());
    }

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let client = ApiClient::new("http://localhost:8000/").expect("Failed to build client");
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_auth_headers_require_full_session() {
        let mut client = ApiClient::new("http://localhost:8000").expect("Failed to build client");
        assert!(matches!(
            client.auth_headers(),
            Err(ApiError::AuthorizationMissing)
        ));

        client.set_session("tok123".to_string(), "alice".to_string());
        let headers = client.auth_headers().expect("Headers should build");
        assert_eq!(
            headers.get(header::AUTHORIZATION).map(|v| v.to_str().unwrap()),
            Some("Bearer tok123")
        );
        assert_eq!(
            headers.get("username").map(|v| v.to_str().unwrap()),
            Some("alice")
        );

        client.clear_session();
        assert!(matches!(
            client.auth_headers(),
            Err(ApiError::AuthorizationMissing)
        ));
    }
}
