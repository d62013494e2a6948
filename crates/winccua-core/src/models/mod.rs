//! Data models for the WinCC Unified GraphQL API.
//!
//! - `graphql`: the request/response envelope and the login payload
//! - `enums`: enumerations accepted by the tag, logging and alarm queries
//! - `inputs`: input objects sent with write and alarm mutations

pub mod enums;
pub mod graphql;
pub mod inputs;

pub use enums::{
    LoggedTagValuesBoundingMode, LoggedTagValuesSortingMode, MainQuality, ObjectType,
    QualitySubStatus,
};
pub use graphql::{ErrorInfo, GraphQlError, GraphQlRequest, GraphQlResponse, LoginData, LoginResult, LoginUser};
pub use inputs::{AlarmIdentifierInput, QualityInput, TagValueInput};
