use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{require_text, ValidationError};

/// Parameters for `login-user`. Not an `Operation`: the login goes through
/// the session manager so the new token replaces the shared one.
#[derive(Clone, Serialize, Deserialize, JsonSchema)]
pub struct LoginUserParams {
    /// WinCC Unified user name
    pub username: String,
    /// Password for the user
    pub password: String,
}

impl LoginUserParams {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("username", &self.username)?;
        require_text("password", &self.password)
    }
}

impl std::fmt::Debug for LoginUserParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginUserParams")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}
