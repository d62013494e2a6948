//! Typed tool operations.
//!
//! Each supported tool is a parameter record that knows its GraphQL
//! document, how to validate itself, and how to turn the backend's result
//! field into the text handed back to the MCP caller. Parameter records
//! serialize (camelCase) to exactly the variables their document declares.

pub mod alarms;
pub mod browse;
pub mod login;
pub mod tags;

use chrono::DateTime;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::api::ApiError;
use crate::auth::AuthError;

pub use alarms::{AcknowledgeAlarmsParams, GetActiveAlarmsParams, GetLoggedAlarmsParams, ResetAlarmsParams};
pub use browse::BrowseObjectsParams;
pub use login::LoginUserParams;
pub use tags::{GetLoggedTagValuesParams, GetTagValuesParams, WriteTagValuesParams};

/// Default for optional start/end times: the Unix epoch, which WinCC
/// Unified treats as "unbounded".
pub const EPOCH_TIMESTAMP: &str = "1970-01-01T00:00:00.000Z";

/// Default language for texts and filters
pub const DEFAULT_LANGUAGE: &str = "en-US";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} must contain at least one entry")]
    EmptyList(&'static str),

    #[error("{0} cannot be empty")]
    EmptyString(String),

    #[error("Invalid ISO 8601 datetime string for {field}: '{value}'")]
    InvalidTimestamp { field: String, value: String },

    #[error("Failed to build variables: {0}")]
    Variables(String),
}

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Invalid arguments: {0}")]
    Validation(#[from] ValidationError),

    #[error("Backend request failed: {0}")]
    Backend(#[from] ApiError),

    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),
}

/// A tool backed by one fixed GraphQL document.
pub trait Operation: Serialize + Send + Sync {
    /// Tool name exposed over MCP
    const TOOL_NAME: &'static str;
    const DOCUMENT: &'static str;
    /// Field of `data` holding this operation's result
    const RESULT_FIELD: &'static str;

    fn validate(&self) -> Result<(), ValidationError>;

    fn variables(&self) -> Result<Value, ValidationError> {
        serde_json::to_value(self).map_err(|e| ValidationError::Variables(e.to_string()))
    }

    /// Render the result field (`Value::Null` when the backend omitted it)
    fn render(&self, result: &Value) -> String;
}

pub(crate) fn require_non_empty<T>(field: &'static str, values: &[T]) -> Result<(), ValidationError> {
    if values.is_empty() {
        return Err(ValidationError::EmptyList(field));
    }
    Ok(())
}

pub(crate) fn require_text(field: impl Into<String>, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyString(field.into()));
    }
    Ok(())
}

pub(crate) fn require_timestamp(field: impl Into<String>, value: &str) -> Result<(), ValidationError> {
    DateTime::parse_from_rfc3339(value)
        .map(|_| ())
        .map_err(|_| ValidationError::InvalidTimestamp {
            field: field.into(),
            value: value.to_string(),
        })
}

/// Compact JSON, `[]` for a missing result
pub(crate) fn render_json(result: &Value) -> String {
    if result.is_null() {
        return "[]".to_string();
    }
    serde_json::to_string(result).unwrap_or_default()
}

/// Indented JSON, `[]` for a missing result
pub(crate) fn render_json_pretty(result: &Value) -> String {
    if result.is_null() {
        return "[]".to_string();
    }
    serde_json::to_string_pretty(result).unwrap_or_default()
}

pub(crate) fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

pub(crate) fn default_languages() -> Vec<String> {
    vec![DEFAULT_LANGUAGE.to_string()]
}

pub(crate) fn default_timestamp() -> String {
    EPOCH_TIMESTAMP.to_string()
}
