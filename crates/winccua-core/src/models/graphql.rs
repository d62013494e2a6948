//! GraphQL wire types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of every POST to the GraphQL endpoint.
#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a> {
    pub query: &'a str,
    pub variables: &'a Value,
}

/// Top-level response envelope. `data` is kept untyped for data
/// operations; callers deserialize it when they need structure.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlResponse<T = Value> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQlError>>,
}

impl<T> GraphQlResponse<T> {
    /// Request-level errors, ignoring an empty `errors` array.
    pub fn errors(&self) -> Option<&[GraphQlError]> {
        self.errors.as_deref().filter(|e| !e.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
}

/// Per-item error object returned inside `data` by WinCC Unified.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorInfo {
    #[serde(default)]
    pub code: Option<Value>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginData {
    pub login: Option<LoginResult>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginResult {
    pub token: Option<String>,
    pub expires: Option<String>,
    pub user: Option<LoginUser>,
    pub error: Option<ErrorInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginUser {
    pub id: Option<Value>,
    pub name: Option<String>,
    pub full_name: Option<String>,
    pub language: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_login_response() {
        let json = r#"{"data":{"login":{"token":"abc123","expires":"2024-01-01T01:00:00Z","user":{"id":"1","name":"op","fullName":"Operator","language":"en-US"},"error":null}}}"#;
        let resp: GraphQlResponse<LoginData> =
            serde_json::from_str(json).expect("Failed to parse login test JSON");
        assert!(resp.errors().is_none());

        let login = resp.data.and_then(|d| d.login).expect("login present");
        assert_eq!(login.token.as_deref(), Some("abc123"));
        let user = login.user.expect("user present");
        assert_eq!(user.full_name.as_deref(), Some("Operator"));
    }

    #[test]
    fn test_empty_errors_array_is_not_an_error() {
        let resp: GraphQlResponse =
            serde_json::from_str(r#"{"data":{"browse":[]},"errors":[]}"#).unwrap();
        assert!(resp.errors().is_none());

        let resp: GraphQlResponse =
            serde_json::from_str(r#"{"errors":[{"message":"Access denied"}]}"#).unwrap();
        assert_eq!(resp.errors().map(|e| e.len()), Some(1));
        assert!(resp.data.is_none());
    }
}
