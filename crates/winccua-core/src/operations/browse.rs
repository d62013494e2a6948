use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{default_language, render_json, Operation, ValidationError};
use crate::models::ObjectType;
use crate::queries;

/// Parameters for `browse-objects`
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct BrowseObjectsParams {
    /// Name patterns to match, e.g. "HMI_*"
    pub name_filters: Vec<String>,
    /// Restrict results to these object types
    pub object_type_filters: Vec<ObjectType>,
    /// Restrict results to objects derived from these base types
    pub base_type_filters: Vec<String>,
    /// Language for display names
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for BrowseObjectsParams {
    fn default() -> Self {
        Self {
            name_filters: Vec::new(),
            object_type_filters: Vec::new(),
            base_type_filters: Vec::new(),
            language: default_language(),
        }
    }
}

impl Operation for BrowseObjectsParams {
    const TOOL_NAME: &'static str = "browse-objects";
    const DOCUMENT: &'static str = queries::BROWSE_OBJECTS;
    const RESULT_FIELD: &'static str = "browse";

    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }

    fn render(&self, result: &Value) -> String {
        render_json(result)
    }
}
