//! Enumerations of the WinCC Unified GraphQL schema.
//!
//! Variants serialize to the exact schema spelling so they can be passed
//! straight through as operation variables.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Object kinds accepted by `browse(objectTypeFilters:)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ObjectType {
    #[serde(rename = "TAG")]
    Tag,
    #[serde(rename = "SIMPLETAG")]
    SimpleTag,
    #[serde(rename = "STRUCTURETAG")]
    StructureTag,
    #[serde(rename = "TAGTYPE")]
    TagType,
    #[serde(rename = "STRUCTURETAGTYPE")]
    StructureTagType,
    #[serde(rename = "SIMPLETAGTYPE")]
    SimpleTagType,
    #[serde(rename = "ALARM")]
    Alarm,
    #[serde(rename = "ALARMCLASS")]
    AlarmClass,
    #[serde(rename = "LOGGINGTAG")]
    LoggingTag,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoggedTagValuesSortingMode {
    #[default]
    TimeAsc,
    TimeDesc,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoggedTagValuesBoundingMode {
    #[default]
    NoBoundingValues,
    LeftBoundingValues,
    RightBoundingValues,
    LeftrightBoundingValues,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MainQuality {
    Bad,
    Uncertain,
    GoodNonCascade,
    GoodCascade,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QualitySubStatus {
    NonSpecific,
    ConfigurationError,
    NotConnected,
    SensorFailure,
    DeviceFailure,
    NoCommunicationWithLastUsableValue,
    NoCommunicationNoUsableValue,
    OutOfService,
    LastUsableValue,
    SubstituteValue,
    InitialValue,
    SensorConversion,
    RangeViolation,
    SubNormal,
    ConfigError,
    SimulatedValue,
    SensorCalibration,
    UpdateEvent,
    AdvisoryAlarm,
    CriticalAlarm,
    UnackUpdateEvent,
    UnackAdvisoryAlarm,
    UnackCriticalAlarm,
    InitFailsafe,
    MaintenanceRequired,
    InitAcked,
    Initreq,
    NotInvited,
    DoNotSelect,
    LocalOverride,
}
