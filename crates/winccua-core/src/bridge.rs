//! The dispatch entry point shared by every tool.
//!
//! `Bridge` pairs the GraphQL client with the session manager: each call
//! takes a snapshot of the current credentials and sends the operation
//! with whatever token that snapshot holds.

use std::sync::Arc;

use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::api::{ApiError, GraphQlClient};
use crate::auth::SessionManager;
use crate::operations::{LoginUserParams, Operation, ToolError};

#[derive(Clone)]
pub struct Bridge {
    client: GraphQlClient,
    session: Arc<SessionManager>,
}

impl Bridge {
    pub fn new(client: GraphQlClient, session: Arc<SessionManager>) -> Self {
        Self { client, session }
    }

    pub fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }

    /// Send one GraphQL document with the current session token.
    pub async fn dispatch(&self, document: &str, variables: &Value) -> Result<Value, ApiError> {
        let credentials = self.session.credentials();
        if credentials.token.is_none() {
            debug!("No session token yet, sending unauthenticated request");
        }

        let result = self.client.send(&credentials, document, variables).await;
        if let Err(ApiError::Unauthorized) = result {
            warn!("Backend rejected the session token; next refresh will replace it");
        }
        result
    }

    /// Like `dispatch`, but gives up as soon as `cancel` fires. The
    /// in-flight HTTP request is dropped with the future.
    pub async fn dispatch_cancellable(
        &self,
        document: &str,
        variables: &Value,
        cancel: &CancellationToken,
    ) -> Result<Value, ApiError> {
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!("GraphQL request cancelled by caller");
                Err(ApiError::Cancelled)
            }
            result = self.dispatch(document, variables) => result,
        }
    }

    /// Validate, send and render one typed operation.
    pub async fn execute<O: Operation>(
        &self,
        operation: &O,
        cancel: &CancellationToken,
    ) -> Result<String, ToolError> {
        operation.validate()?;
        let variables = operation.variables()?;

        let data = self
            .dispatch_cancellable(O::DOCUMENT, &variables, cancel)
            .await?;

        let result = data.get(O::RESULT_FIELD).unwrap_or(&Value::Null);
        if result.is_null() {
            warn!(tool = O::TOOL_NAME, field = O::RESULT_FIELD, "Result field missing from response");
        } else if let Some(items) = result.as_array() {
            debug!(tool = O::TOOL_NAME, count = items.len(), "Tool completed");
        }
        Ok(operation.render(result))
    }

    /// Replace the shared session with one for the given user, and keep it
    /// refreshed if no refresh task was running yet.
    pub async fn login(&self, params: &LoginUserParams) -> Result<(), ToolError> {
        params.validate()?;
        self.session
            .login_with(&params.username, &params.password)
            .await?;
        self.session.start_deferred();
        Ok(())
    }
}
