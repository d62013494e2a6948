//! GraphQL API client module for WinCC Unified.
//!
//! This module provides the `GraphQlClient` for sending fixed GraphQL
//! documents to the WinCC Unified GraphQL endpoint.
//!
//! Data operations carry the session's JWT as a bearer token; the login
//! mutation itself is sent unauthenticated.

pub mod client;
pub mod error;

pub use client::GraphQlClient;
pub use error::ApiError;
