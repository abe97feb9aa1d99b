use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants;
use crate::spec::pointer::SpecificationPointer;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error(transparent)]
    Parsing(#[from] ParsingError),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Specification error: {0}")]
    Specification(String),
}

/// The kind of structural problem a [`ParsingError`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParsingErrorKind {
    /// A path does not resolve to a node of the expected shape.
    StructuralAccess,
    /// A `responses` key is neither integer-like nor `default`.
    InvalidStatusCode,
    /// A `responses` value is not a structured node.
    InvalidResponseSpecification,
    /// A reference chain revisits a pointer it already went through.
    CyclicReference,
    /// A reference is malformed or points at nothing.
    UnresolvableReference,
    /// A field has the wrong kind of value.
    InvalidValue,
}

/// A failure to parse the document, located by the pointer that was being
/// processed when it happened.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} at {pointer}")]
pub struct ParsingError {
    kind: ParsingErrorKind,
    message: String,
    pointer: SpecificationPointer,
}

impl ParsingError {
    #[must_use]
    pub fn new(
        kind: ParsingErrorKind,
        message: impl Into<String>,
        pointer: SpecificationPointer,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            pointer,
        }
    }

    #[must_use]
    pub fn structural_access(message: impl Into<String>, pointer: SpecificationPointer) -> Self {
        Self::new(ParsingErrorKind::StructuralAccess, message, pointer)
    }

    #[must_use]
    pub fn invalid_status_code(pointer: SpecificationPointer) -> Self {
        Self::new(
            ParsingErrorKind::InvalidStatusCode,
            "Invalid status code. Must be integer or \"default\".",
            pointer,
        )
    }

    #[must_use]
    pub fn invalid_response_specification(pointer: SpecificationPointer) -> Self {
        Self::new(
            ParsingErrorKind::InvalidResponseSpecification,
            "Invalid response specification.",
            pointer,
        )
    }

    #[must_use]
    pub fn cyclic_reference(target: &SpecificationPointer, pointer: SpecificationPointer) -> Self {
        Self::new(
            ParsingErrorKind::CyclicReference,
            format!("Cyclic reference detected: '{target}' is part of a reference cycle"),
            pointer,
        )
    }

    #[must_use]
    pub fn unresolvable_reference(
        message: impl Into<String>,
        pointer: SpecificationPointer,
    ) -> Self {
        Self::new(ParsingErrorKind::UnresolvableReference, message, pointer)
    }

    #[must_use]
    pub fn invalid_value(message: impl Into<String>, pointer: SpecificationPointer) -> Self {
        Self::new(ParsingErrorKind::InvalidValue, message, pointer)
    }

    #[must_use]
    pub const fn kind(&self) -> ParsingErrorKind {
        self.kind
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub const fn pointer(&self) -> &SpecificationPointer {
        &self.pointer
    }
}

/// JSON representation of an error for structured output
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonError {
    pub error_type: String,
    pub message: String,
    pub context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pointer: Option<String>,
}

impl Error {
    /// Add context to an error for better user messaging
    #[must_use]
    pub fn with_context(self, context: &str) -> Self {
        match self {
            Self::Io(e) => Self::Config(format!("{context}: {e}")),
            _ => self,
        }
    }

    /// Convert error to JSON representation for structured output
    #[must_use]
    pub fn to_json(&self) -> JsonError {
        let (error_type, message, context, pointer) = match self {
            Self::Config(msg) => ("Configuration", msg.clone(), None, None),
            Self::Io(io_err) => {
                let context = match io_err.kind() {
                    std::io::ErrorKind::NotFound => Some(constants::ERR_FILE_NOT_FOUND),
                    std::io::ErrorKind::PermissionDenied => Some(constants::ERR_PERMISSION),
                    _ => None,
                };
                ("FileSystem", io_err.to_string(), context, None)
            }
            Self::Yaml(yaml_err) => (
                "YAMLParsing",
                yaml_err.to_string(),
                Some(constants::ERR_YAML_SYNTAX),
                None,
            ),
            Self::Json(json_err) => (
                "JSONParsing",
                json_err.to_string(),
                Some(constants::ERR_JSON_SYNTAX),
                None,
            ),
            Self::Toml(toml_err) => (
                "TOMLParsing",
                toml_err.to_string(),
                Some(constants::ERR_TOML_SYNTAX),
                None,
            ),
            Self::Specification(msg) => (
                "Specification",
                msg.clone(),
                Some(constants::ERR_OPENAPI_FORMAT),
                None,
            ),
            Self::Parsing(err) => (
                "Parsing",
                err.message().to_string(),
                Some(constants::ERR_OPENAPI_FORMAT),
                Some(err.pointer().to_string()),
            ),
        };

        JsonError {
            error_type: error_type.to_string(),
            message,
            context: context.map(str::to_string),
            pointer,
        }
    }
}
