//! Fixed GraphQL documents sent to WinCC Unified.
//!
//! Variable names match the camelCase serialization of the parameter types
//! in `operations`, so a parameter record can be passed as `variables`
//! unchanged.

pub const LOGIN_USER: &str = r#"
mutation LoginUser($username: String!, $password: String!) {
  login(username: $username, password: $password) {
    token
    expires
    user {
      id
      name
      fullName
      language
    }
    error {
      code
      description
    }
  }
}
"#;

pub const BROWSE_OBJECTS: &str = r#"
query BrowseObjects(
  $nameFilters: [String],
  $objectTypeFilters: [ObjectTypesEnum],
  $baseTypeFilters: [String],
  $language: String
) {
  browse(
    nameFilters: $nameFilters,
    objectTypeFilters: $objectTypeFilters,
    baseTypeFilters: $baseTypeFilters,
    language: $language
  ) {
    name
    displayName
    objectType
    dataType
  }
}
"#;

pub const GET_TAG_VALUES: &str = r#"
query GetTagValues($names: [String!]!, $directRead: Boolean) {
  tagValues(names: $names, directRead: $directRead) {
    name
    value {
      value
      timestamp
      quality {
        quality
        subStatus
        limit
        extendedSubStatus
        sourceQuality
        sourceTime
        timeCorrected
      }
    }
    error {
      code
      description
    }
  }
}
"#;

pub const GET_LOGGED_TAG_VALUES: &str = r#"
query GetLoggedTagValues(
  $names: [String]!,
  $startTime: Timestamp,
  $endTime: Timestamp,
  $maxNumberOfValues: Int,
  $sortingMode: LoggedTagValuesSortingModeEnum,
  $boundingValuesMode: LoggedTagValuesBoundingModeEnum
) {
  loggedTagValues(
    names: $names,
    startTime: $startTime,
    endTime: $endTime,
    maxNumberOfValues: $maxNumberOfValues,
    sortingMode: $sortingMode,
    boundingValuesMode: $boundingValuesMode
  ) {
    loggingTagName
    error {
      code
      description
    }
    values {
      value {
        value
        timestamp
      }
    }
  }
}
"#;

pub const GET_ACTIVE_ALARMS: &str = r#"
query GetActiveAlarms(
  $systemNames: [String],
  $filterString: String,
  $filterLanguage: String,
  $languages: [String]
) {
  activeAlarms(
    systemNames: $systemNames,
    filterString: $filterString,
    filterLanguage: $filterLanguage,
    languages: $languages
  ) {
    name
    instanceID
    raiseTime
    acknowledgmentTime
    clearTime
    modificationTime
    state
    priority
    eventText
    infoText
    languages
  }
}
"#;

pub const GET_LOGGED_ALARMS: &str = r#"
query GetLoggedAlarms(
  $systemNames: [String],
  $filterString: String,
  $filterLanguage: String,
  $languages: [String],
  $startTime: Timestamp,
  $endTime: Timestamp,
  $maxNumberOfResults: Int
) {
  loggedAlarms(
    systemNames: $systemNames,
    filterString: $filterString,
    filterLanguage: $filterLanguage,
    languages: $languages,
    startTime: $startTime,
    endTime: $endTime,
    maxNumberOfResults: $maxNumberOfResults
  ) {
    name
    instanceID
    raiseTime
    acknowledgmentTime
    clearTime
    resetTime
    modificationTime
    state
    priority
    eventText
    infoText
    languages
  }
}
"#;

pub const WRITE_TAG_VALUES: &str = r#"
mutation WriteTagValues(
  $input: [TagValueInput]!,
  $timestamp: Timestamp,
  $quality: QualityInput
) {
  writeTagValues(
    input: $input,
    timestamp: $timestamp,
    quality: $quality
  ) {
    name
    error {
      code
      description
    }
  }
}
"#;

pub const ACKNOWLEDGE_ALARMS: &str = r#"
mutation AcknowledgeAlarms($input: [AlarmIdentifierInput]!) {
  acknowledgeAlarms(input: $input) {
    alarmName
    alarmInstanceID
    error {
      code
      description
    }
  }
}
"#;

pub const RESET_ALARMS: &str = r#"
mutation ResetAlarms($input: [AlarmIdentifierInput]!) {
  resetAlarms(input: $input) {
    alarmName
    alarmInstanceID
    error {
      code
      description
    }
  }
}
"#;
