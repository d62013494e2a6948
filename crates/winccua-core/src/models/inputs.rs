//! Input objects for the write and alarm mutations.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::enums::{MainQuality, QualitySubStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QualityInput {
    /// Main quality of the value
    pub quality: MainQuality,
    /// Optional quality sub-status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_status: Option<QualitySubStatus>,
}

/// Identifies one alarm instance for acknowledge/reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AlarmIdentifierInput {
    /// Alarm name
    pub name: String,
    /// Alarm instance ID (0 addresses the alarm itself)
    #[serde(rename = "instanceID", default)]
    pub instance_id: i64,
}

/// One tag write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TagValueInput {
    /// Tag name
    pub name: String,
    /// New value; any JSON scalar or structure accepted by the tag's type.
    /// Omitted means null.
    #[serde(default)]
    pub value: Value,
    /// Optional ISO 8601 timestamp for this value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Optional quality for this value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<QualityInput>,
}
