//! Authentication module for the single WinCC Unified backend session.
//!
//! This module provides:
//! - `CredentialStore`: thread-safe holder of username, password and token
//! - `Authenticator`: the login exchange, implemented by `GraphQlClient`
//! - `SessionManager`: owns the store and re-logs in on a fixed interval
//!
//! One session is shared by every MCP caller.

pub mod credentials;
pub mod login;
pub mod session;

pub use credentials::{CredentialRecord, CredentialStore};
pub use login::{AuthError, Authenticator};
pub use session::{SessionManager, SessionState, DEFAULT_REFRESH_INTERVAL};
