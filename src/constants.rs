//! Centralized string constants for mockspec
//!
//! This module contains the `OpenAPI` key names the parsers look for, the
//! environment variables the binary honours and a few default values.

/// Status code stored for the `default` response of an operation.
///
/// Lies outside the range of any integer-like status token, so it can never
/// collide with a code written in the document.
pub const DEFAULT_STATUS_CODE: i32 = -1;

/// Literal status-code token that maps to [`DEFAULT_STATUS_CODE`].
pub const DEFAULT_STATUS_TOKEN: &str = "default";

// Reference handling
pub const REFERENCE_KEY: &str = "$ref";
pub const REFERENCE_PREFIX: &str = "#";

// Document sections
pub const FIELD_PATHS: &str = "paths";

// Operation and response fields
pub const FIELD_RESPONSES: &str = "responses";
pub const FIELD_PARAMETERS: &str = "parameters";
pub const FIELD_CONTENT: &str = "content";
pub const FIELD_HEADERS: &str = "headers";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_SCHEMA: &str = "schema";
pub const FIELD_EXAMPLE: &str = "example";
pub const FIELD_EXAMPLES: &str = "examples";
pub const FIELD_VALUE: &str = "value";

// Parameter fields
pub const FIELD_NAME: &str = "name";
pub const FIELD_IN: &str = "in";
pub const FIELD_REQUIRED: &str = "required";

// Schema fields
pub const FIELD_TYPE: &str = "type";
pub const FIELD_FORMAT: &str = "format";
pub const FIELD_ENUM: &str = "enum";
pub const FIELD_DEFAULT: &str = "default";
pub const FIELD_NULLABLE: &str = "nullable";
pub const FIELD_READ_ONLY: &str = "readOnly";
pub const FIELD_WRITE_ONLY: &str = "writeOnly";
pub const FIELD_PATTERN: &str = "pattern";
pub const FIELD_MIN_LENGTH: &str = "minLength";
pub const FIELD_MAX_LENGTH: &str = "maxLength";
pub const FIELD_MINIMUM: &str = "minimum";
pub const FIELD_MAXIMUM: &str = "maximum";
pub const FIELD_EXCLUSIVE_MINIMUM: &str = "exclusiveMinimum";
pub const FIELD_EXCLUSIVE_MAXIMUM: &str = "exclusiveMaximum";
pub const FIELD_MULTIPLE_OF: &str = "multipleOf";
pub const FIELD_ITEMS: &str = "items";
pub const FIELD_MIN_ITEMS: &str = "minItems";
pub const FIELD_MAX_ITEMS: &str = "maxItems";
pub const FIELD_UNIQUE_ITEMS: &str = "uniqueItems";
pub const FIELD_PROPERTIES: &str = "properties";
pub const FIELD_MIN_PROPERTIES: &str = "minProperties";
pub const FIELD_MAX_PROPERTIES: &str = "maxProperties";
pub const FIELD_ADDITIONAL_PROPERTIES: &str = "additionalProperties";
pub const FIELD_ONE_OF: &str = "oneOf";
pub const FIELD_ANY_OF: &str = "anyOf";
pub const FIELD_ALL_OF: &str = "allOf";

// Schema Types
pub const SCHEMA_TYPE_STRING: &str = "string";
pub const SCHEMA_TYPE_NUMBER: &str = "number";
pub const SCHEMA_TYPE_INTEGER: &str = "integer";
pub const SCHEMA_TYPE_BOOLEAN: &str = "boolean";
pub const SCHEMA_TYPE_ARRAY: &str = "array";
pub const SCHEMA_TYPE_OBJECT: &str = "object";

// HTTP Methods, as they appear as keys of a path item
pub const HTTP_METHODS: &[&str] = &[
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

// Parameter Locations
pub const PARAM_LOCATION_PATH: &str = "path";
pub const PARAM_LOCATION_QUERY: &str = "query";
pub const PARAM_LOCATION_HEADER: &str = "header";
pub const PARAM_LOCATION_COOKIE: &str = "cookie";

// Environment Variables
pub const ENV_MOCKSPEC_CONFIG: &str = "MOCKSPEC_CONFIG";
pub const ENV_MOCKSPEC_SPECIFICATION_URL: &str = "MOCKSPEC_SPECIFICATION_URL";
pub const ENV_MOCKSPEC_USE_EXAMPLES: &str = "MOCKSPEC_USE_EXAMPLES";
pub const ENV_MOCKSPEC_LOG: &str = "MOCKSPEC_LOG";
pub const ENV_MOCKSPEC_LOG_FORMAT: &str = "MOCKSPEC_LOG_FORMAT";
pub const ENV_MOCKSPEC_LOG_FILE: &str = "MOCKSPEC_LOG_FILE";

// File names
pub const DIR_CONFIG: &str = "mockspec";
pub const CONFIG_FILENAME: &str = "config.toml";

// Validation Messages
pub const ERR_YAML_SYNTAX: &str = "Check that your OpenAPI specification is valid YAML syntax.";
pub const ERR_JSON_SYNTAX: &str = "Check that your OpenAPI specification is valid JSON syntax.";
pub const ERR_TOML_SYNTAX: &str = "Check that your configuration file is valid TOML syntax.";
pub const ERR_OPENAPI_FORMAT: &str =
    "Check that your OpenAPI specification follows the required format.";
pub const ERR_FILE_NOT_FOUND: &str = "Check that the file path is correct and the file exists.";
pub const ERR_PERMISSION: &str = "Check file permissions or run with appropriate privileges.";

// Default Values
pub const DEFAULT_LOG_LEVEL: &str = "error";

/// Check if a path item key names an HTTP operation
#[must_use]
pub fn is_http_method(key: &str) -> bool {
    HTTP_METHODS.contains(&key)
}
