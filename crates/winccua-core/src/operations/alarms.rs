use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    default_language, default_languages, default_timestamp, render_json_pretty, require_non_empty,
    require_text, require_timestamp, Operation, ValidationError,
};
use crate::models::AlarmIdentifierInput;
use crate::queries;

/// Parameters for `get-active-alarms`
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct GetActiveAlarmsParams {
    /// Systems to query, empty for the local system
    pub system_names: Vec<String>,
    /// Alarm filter expression
    pub filter_string: String,
    /// Language the filter expression refers to
    #[serde(default = "default_language")]
    pub filter_language: String,
    /// Languages to return alarm texts in
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
}

impl Default for GetActiveAlarmsParams {
    fn default() -> Self {
        Self {
            system_names: Vec::new(),
            filter_string: String::new(),
            filter_language: default_language(),
            languages: default_languages(),
        }
    }
}

impl Operation for GetActiveAlarmsParams {
    const TOOL_NAME: &'static str = "get-active-alarms";
    const DOCUMENT: &'static str = queries::GET_ACTIVE_ALARMS;
    const RESULT_FIELD: &'static str = "activeAlarms";

    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }

    fn render(&self, result: &Value) -> String {
        render_json_pretty(result)
    }
}

/// Parameters for `get-logged-alarms`
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct GetLoggedAlarmsParams {
    /// Systems to query, empty for the local system
    pub system_names: Vec<String>,
    /// Alarm filter expression
    pub filter_string: String,
    /// Language the filter expression refers to
    #[serde(default = "default_language")]
    pub filter_language: String,
    /// Languages to return alarm texts in
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
    /// ISO 8601 start of the time range
    #[serde(default = "default_timestamp")]
    pub start_time: String,
    /// ISO 8601 end of the time range
    #[serde(default = "default_timestamp")]
    pub end_time: String,
    /// Maximum number of alarms, 0 for no limit
    pub max_number_of_results: i64,
}

impl Default for GetLoggedAlarmsParams {
    fn default() -> Self {
        Self {
            system_names: Vec::new(),
            filter_string: String::new(),
            filter_language: default_language(),
            languages: default_languages(),
            start_time: default_timestamp(),
            end_time: default_timestamp(),
            max_number_of_results: 0,
        }
    }
}

impl Operation for GetLoggedAlarmsParams {
    const TOOL_NAME: &'static str = "get-logged-alarms";
    const DOCUMENT: &'static str = queries::GET_LOGGED_ALARMS;
    const RESULT_FIELD: &'static str = "loggedAlarms";

    fn validate(&self) -> Result<(), ValidationError> {
        require_timestamp("startTime", &self.start_time)?;
        require_timestamp("endTime", &self.end_time)
    }

    fn render(&self, result: &Value) -> String {
        render_json_pretty(result)
    }
}

fn validate_identifiers(input: &[AlarmIdentifierInput]) -> Result<(), ValidationError> {
    require_non_empty("input", input)?;
    for (i, id) in input.iter().enumerate() {
        require_text(format!("input[{}].name", i), &id.name)?;
    }
    Ok(())
}

/// Parameters for `acknowledge-alarms`
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AcknowledgeAlarmsParams {
    /// Alarms to acknowledge (at least one)
    pub input: Vec<AlarmIdentifierInput>,
}

impl Operation for AcknowledgeAlarmsParams {
    const TOOL_NAME: &'static str = "acknowledge-alarms";
    const DOCUMENT: &'static str = queries::ACKNOWLEDGE_ALARMS;
    const RESULT_FIELD: &'static str = "acknowledgeAlarms";

    fn validate(&self) -> Result<(), ValidationError> {
        validate_identifiers(&self.input)
    }

    fn render(&self, result: &Value) -> String {
        render_json_pretty(result)
    }
}

/// Parameters for `reset-alarms`
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ResetAlarmsParams {
    /// Alarms to reset (at least one)
    pub input: Vec<AlarmIdentifierInput>,
}

impl Operation for ResetAlarmsParams {
    const TOOL_NAME: &'static str = "reset-alarms";
    const DOCUMENT: &'static str = queries::RESET_ALARMS;
    const RESULT_FIELD: &'static str = "resetAlarms";

    fn validate(&self) -> Result<(), ValidationError> {
        validate_identifiers(&self.input)
    }

    fn render(&self, result: &Value) -> String {
        render_json_pretty(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_active_alarm_defaults() {
        let params: GetActiveAlarmsParams = serde_json::from_value(json!({})).unwrap();
        assert_eq!(
            params.variables().unwrap(),
            json!({
                "systemNames": [],
                "filterString": "",
                "filterLanguage": "en-US",
                "languages": ["en-US"]
            })
        );
    }

    #[test]
    fn test_logged_alarm_defaults_and_validation() {
        let params = GetLoggedAlarmsParams::default();
        assert!(params.validate().is_ok());
        let vars = params.variables().unwrap();
        assert_eq!(vars["startTime"], json!("1970-01-01T00:00:00.000Z"));
        assert_eq!(vars["maxNumberOfResults"], json!(0));

        let params: GetLoggedAlarmsParams =
            serde_json::from_value(json!({"endTime": "2024-13-01T00:00:00Z"})).unwrap();
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_acknowledge_requires_named_alarms() {
        let params: AcknowledgeAlarmsParams = serde_json::from_value(json!({"input": []})).unwrap();
        assert_eq!(params.validate(), Err(ValidationError::EmptyList("input")));

        let params: ResetAlarmsParams =
            serde_json::from_value(json!({"input": [{"name": "Pump_Overload"}, {"name": ""}]})).unwrap();
        assert_eq!(
            params.validate(),
            Err(ValidationError::EmptyString("input[1].name".into()))
        );
    }

    #[test]
    fn test_acknowledge_variables() {
        let params: AcknowledgeAlarmsParams =
            serde_json::from_value(json!({"input": [{"name": "Pump_Overload", "instanceID": 3}]})).unwrap();
        assert!(params.validate().is_ok());
        assert_eq!(
            params.variables().unwrap(),
            json!({"input": [{"name": "Pump_Overload", "instanceID": 3}]})
        );
    }

    #[test]
    fn test_missing_result_renders_empty_list() {
        let params = GetActiveAlarmsParams::default();
        assert_eq!(params.render(&Value::Null), "[]");
    }
}
