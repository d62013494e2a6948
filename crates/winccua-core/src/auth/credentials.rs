use std::fmt;
use std::sync::{Arc, RwLock};

/// Username, password and the last bearer token issued for them.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CredentialRecord {
    pub username: String,
    pub password: String,
    pub token: Option<String>,
}

impl CredentialRecord {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            token: None,
        }
    }

    /// Both username and password are present
    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

// Secrets stay out of logs
impl fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Shared, in-memory credential state. Clone is cheap and every clone
/// sees the same record.
#[derive(Clone, Default)]
pub struct CredentialStore {
    inner: Arc<RwLock<CredentialRecord>>,
}

impl CredentialStore {
    pub fn new(record: CredentialRecord) -> Self {
        Self {
            inner: Arc::new(RwLock::new(record)),
        }
    }

    /// Snapshot of the current record
    pub fn get(&self) -> CredentialRecord {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Replace the whole record in one write
    pub fn set(&self, username: String, password: String, token: Option<String>) {
        self.replace(CredentialRecord {
            username,
            password,
            token,
        });
    }

    pub fn replace(&self, record: CredentialRecord) {
        let mut guard = self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = record;
    }

    pub fn token(&self) -> Option<String> {
        self.get().token
    }
}

impl fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CredentialStore").field(&self.get()).finish()
    }
}
