//! Core library for the WinCC Unified MCP bridge.
//!
//! This crate holds everything that does not depend on the MCP transport:
//!
//! - `auth`: credential store, the login exchange and the session manager
//!   that keeps the bearer token fresh
//! - `api`: the GraphQL-over-HTTP client and its error types
//! - `bridge`: the `dispatch` entry point shared by every tool
//! - `operations`: typed tool parameters, validation and result reshaping
//! - `config`: endpoint, credentials and server settings

pub mod api;
pub mod auth;
pub mod bridge;
pub mod config;
pub mod models;
pub mod operations;
pub mod queries;
pub mod utils;

pub use api::{ApiError, GraphQlClient};
pub use auth::{AuthError, Authenticator, CredentialRecord, CredentialStore, SessionManager, SessionState};
pub use bridge::Bridge;
pub use config::{Config, ConfigError};
pub use operations::{Operation, ToolError, ValidationError};
