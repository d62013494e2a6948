use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    default_timestamp, render_json, render_json_pretty, require_non_empty, require_text,
    require_timestamp, Operation, ValidationError,
};
use crate::models::{LoggedTagValuesBoundingMode, LoggedTagValuesSortingMode, QualityInput, TagValueInput};
use crate::queries;
use crate::utils::format::format_table;

/// Parameters for `get-tag-values`
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetTagValuesParams {
    /// Tag names to read (at least one)
    pub names: Vec<String>,
    /// Read from the PLC instead of the runtime cache
    #[serde(default)]
    pub direct_read: bool,
}

impl Operation for GetTagValuesParams {
    const TOOL_NAME: &'static str = "get-tag-values";
    const DOCUMENT: &'static str = queries::GET_TAG_VALUES;
    const RESULT_FIELD: &'static str = "tagValues";

    fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("names", &self.names)
    }

    fn render(&self, result: &Value) -> String {
        render_json(result)
    }
}

/// Parameters for `get-logged-tag-values`
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetLoggedTagValuesParams {
    /// Tag or logging tag names (at least one)
    pub names: Vec<String>,
    /// ISO 8601 start of the time range
    #[serde(default = "default_timestamp")]
    pub start_time: String,
    /// ISO 8601 end of the time range
    #[serde(default = "default_timestamp")]
    pub end_time: String,
    /// Maximum values per tag, 0 for no limit
    #[serde(default)]
    pub max_number_of_values: i64,
    #[serde(default)]
    pub sorting_mode: LoggedTagValuesSortingMode,
    #[serde(default)]
    pub bounding_values_mode: LoggedTagValuesBoundingMode,
}

const LOGGED_VALUE_COLUMNS: [&str; 3] = ["Logging Tag Name", "Timestamp", "Value"];

impl Operation for GetLoggedTagValuesParams {
    const TOOL_NAME: &'static str = "get-logged-tag-values";
    const DOCUMENT: &'static str = queries::GET_LOGGED_TAG_VALUES;
    const RESULT_FIELD: &'static str = "loggedTagValues";

    fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("names", &self.names)?;
        require_timestamp("startTime", &self.start_time)?;
        require_timestamp("endTime", &self.end_time)
    }

    fn render(&self, result: &Value) -> String {
        format_table(&LOGGED_VALUE_COLUMNS, &logged_value_rows(result))
    }
}

/// Flatten `loggedTagValues` into (tag, timestamp, value) rows. A tag
/// without values still gets one row so the caller sees it was queried.
fn logged_value_rows(result: &Value) -> Vec<Vec<Option<String>>> {
    let mut rows = Vec::new();
    let Some(tags) = result.as_array() else {
        return rows;
    };

    for tag in tags {
        let tag_name = tag
            .get("loggingTagName")
            .and_then(Value::as_str)
            .map(str::to_string);

        let values = tag
            .get("values")
            .and_then(Value::as_array)
            .filter(|v| !v.is_empty());

        let Some(values) = values else {
            rows.push(vec![tag_name, None, None]);
            continue;
        };

        for logged in values {
            let Some(value) = logged.get("value").filter(|v| !v.is_null()) else {
                continue;
            };
            rows.push(vec![
                tag_name.clone(),
                value
                    .get("timestamp")
                    .and_then(Value::as_str)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string),
                value.get("value").and_then(display_value),
            ]);
        }
    }
    rows
}

fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(display_number(n)),
        other => Some(other.to_string()),
    }
}

/// Whole-number floats print without a fraction (`42.0` -> `42`)
fn display_number(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if !n.is_i64() && !n.is_u64() && f.fract() == 0.0 && f.abs() < 1e21 => {
            format!("{:.0}", f)
        }
        _ => n.to_string(),
    }
}

/// Parameters for `write-tag-values`
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WriteTagValuesParams {
    /// Values to write (at least one)
    pub input: Vec<TagValueInput>,
    /// Timestamp applied to entries that carry none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Quality applied to entries that carry none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<QualityInput>,
}

impl Operation for WriteTagValuesParams {
    const TOOL_NAME: &'static str = "write-tag-values";
    const DOCUMENT: &'static str = queries::WRITE_TAG_VALUES;
    const RESULT_FIELD: &'static str = "writeTagValues";

    fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("input", &self.input)?;
        for (i, entry) in self.input.iter().enumerate() {
            require_text(format!("input[{}].name", i), &entry.name)?;
            if let Some(ref ts) = entry.timestamp {
                require_timestamp(format!("input[{}].timestamp", i), ts)?;
            }
        }
        if let Some(ref ts) = self.timestamp {
            require_timestamp("timestamp", ts)?;
        }
        Ok(())
    }

    fn render(&self, result: &Value) -> String {
        render_json_pretty(result)
    }
}
