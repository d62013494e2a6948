use async_trait::async_trait;
use thiserror::Error;

use super::CredentialRecord;
use crate::api::ApiError;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Login request failed: {0}")]
    Request(#[from] ApiError),

    #[error("Login rejected: {0}")]
    Rejected(String),

    #[error("Login response missing token")]
    MissingToken,
}

/// Exchanges a username/password pair for a bearer token.
///
/// Implementations must not touch shared state; the caller decides
/// whether to store the returned record.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> Result<CredentialRecord, AuthError>;
}
