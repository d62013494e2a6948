//! HTTP client for the WinCC Unified GraphQL endpoint.
//!
//! Every operation is a POST of `{query, variables}` to the one configured
//! endpoint. The client never retries; the session manager's next refresh
//! and the caller's next tool call are the only recovery paths.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, error, info, warn};

use crate::auth::{AuthError, Authenticator, CredentialRecord};
use crate::models::{GraphQlRequest, GraphQlResponse, LoginData};
use crate::queries;

use super::ApiError;

/// HTTP request timeout in seconds.
/// Tag reads against a busy runtime can take a few seconds; 30s still
/// fails fast enough that a stuck panel does not pin MCP callers.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// GraphQL client for one WinCC Unified endpoint.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct GraphQlClient {
    client: Client,
    endpoint: String,
}

impl GraphQlClient {
    /// Create a client with the default timeout and certificate checks
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_options(endpoint, Duration::from_secs(REQUEST_TIMEOUT_SECS), false)
    }

    pub fn with_options(
        endpoint: impl Into<String>,
        timeout: Duration,
        accept_invalid_certs: bool,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let err = ApiError::from_status(status, &body);
            error!(status = %status, error = %err, "GraphQL request failed");
            Err(err)
        }
    }

    async fn post<T: DeserializeOwned>(
        &self,
        token: Option<&str>,
        document: &str,
        variables: &Value,
    ) -> Result<GraphQlResponse<T>, ApiError> {
        let mut request = self.client.post(&self.endpoint).json(&GraphQlRequest {
            query: document,
            variables,
        });
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            error!(endpoint = %self.endpoint, error = %e, "Failed to send GraphQL request");
            ApiError::NetworkError(e)
        })?;
        let response = Self::check_response(response).await?;

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            warn!(error = %e, "Failed to parse GraphQL response body");
            ApiError::InvalidResponse(e.to_string())
        })
    }

    /// Send one GraphQL operation, authenticated with the record's token
    /// when it has one, and return the `data` payload.
    pub async fn send(
        &self,
        credentials: &CredentialRecord,
        document: &str,
        variables: &Value,
    ) -> Result<Value, ApiError> {
        let response: GraphQlResponse = self.post(credentials.token(), document, variables).await?;

        if let Some(errors) = response.errors() {
            warn!(
                count = errors.len(),
                first = %errors[0].message,
                "GraphQL response contained errors"
            );
            return Err(ApiError::GraphQl(errors.to_vec()));
        }

        match response.data {
            Some(Value::Null) | None => {
                warn!("GraphQL response missing data");
                Err(ApiError::MissingData)
            }
            Some(data) => Ok(data),
        }
    }
}

#[async_trait]
impl Authenticator for GraphQlClient {
    async fn login(&self, username: &str, password: &str) -> Result<CredentialRecord, AuthError> {
        info!(endpoint = %self.endpoint, user = username, "Logging in to WinCC Unified");

        let variables = json!({
            "username": username,
            "password": password,
        });
        let response: GraphQlResponse<LoginData> =
            self.post(None, queries::LOGIN_USER, &variables).await?;

        if let Some(errors) = response.errors() {
            error!(first = %errors[0].message, "Login returned GraphQL errors");
            return Err(ApiError::GraphQl(errors.to_vec()).into());
        }

        let login = response
            .data
            .and_then(|d| d.login)
            .ok_or(AuthError::MissingToken)?;

        match login.token.filter(|t| !t.is_empty()) {
            Some(token) => {
                debug!(
                    expires = login.expires.as_deref().unwrap_or("unknown"),
                    full_name = login
                        .user
                        .as_ref()
                        .and_then(|u| u.full_name.as_deref())
                        .unwrap_or(""),
                    "Login token issued"
                );
                Ok(CredentialRecord {
                    username: username.to_string(),
                    password: password.to_string(),
                    token: Some(token),
                })
            }
            None => {
                let description = login
                    .error
                    .and_then(|e| e.description)
                    .filter(|d| !d.is_empty());
                error!(reason = description.as_deref().unwrap_or("none given"), "Login response missing token");
                match description {
                    Some(description) => Err(AuthError::Rejected(description)),
                    None => Err(AuthError::MissingToken),
                }
            }
        }
    }
}
