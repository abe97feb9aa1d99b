use serde_json::{Map, Number, Value};
use sha2::{Digest, Sha256};
use std::path::Path;
use tracing::debug;

use crate::error::Error;
use crate::fs::FileSystem;

/// A decoded document together with the fingerprint of the text it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDocument {
    pub document: Value,
    pub fingerprint: String,
}

/// Reads and decodes the specification at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not decode into a
/// mapping.
pub fn load_file<F: FileSystem + ?Sized>(fs: &F, path: &Path) -> Result<LoadedDocument, Error> {
    let content = fs
        .read_to_string(path)
        .map_err(|e| Error::from(e).with_context(&format!("Failed to read '{}'", path.display())))?;
    let fingerprint = compute_content_hash(content.as_bytes());
    debug!(path = %path.display(), %fingerprint, "read specification");

    Ok(LoadedDocument {
        document: load_document(&content)?,
        fingerprint,
    })
}

/// Decodes YAML or JSON text into a document tree.
///
/// Text that starts with `{` is tried as JSON first, anything else as YAML
/// first; each falls back to the other. YAML mapping keys that are numbers
/// or booleans become strings, so `200:` and `"200":` are the same key.
///
/// # Errors
///
/// Returns the decoding error of the preferred format, or
/// [`Error::Specification`] when the root is not a mapping.
pub fn load_document(content: &str) -> Result<Value, Error> {
    let document = if content.trim_start().starts_with('{') {
        parse_json_with_fallback(content)?
    } else {
        parse_yaml_with_fallback(content)?
    };

    if !document.is_object() {
        return Err(Error::Specification(
            "The specification root must be a mapping".to_string(),
        ));
    }
    Ok(document)
}

/// Parse JSON content with YAML fallback
fn parse_json_with_fallback(content: &str) -> Result<Value, Error> {
    match serde_json::from_str::<Value>(content) {
        Ok(document) => {
            debug!("decoded specification as JSON");
            Ok(document)
        }
        Err(json_err) => {
            if let Ok(yaml) = serde_yaml::from_str::<serde_yaml::Value>(content) {
                debug!("decoded JSON-looking specification as YAML");
                return yaml_to_json(yaml);
            }

            // Return JSON error since content looked like JSON
            Err(Error::Json(json_err))
        }
    }
}

/// Parse YAML content with JSON fallback
fn parse_yaml_with_fallback(content: &str) -> Result<Value, Error> {
    match serde_yaml::from_str::<serde_yaml::Value>(content) {
        Ok(yaml) => {
            debug!("decoded specification as YAML");
            yaml_to_json(yaml)
        }
        Err(yaml_err) => {
            if let Ok(document) = serde_json::from_str::<Value>(content) {
                return Ok(document);
            }

            // Return YAML error since content looked like YAML
            Err(Error::Yaml(yaml_err))
        }
    }
}

fn yaml_to_json(value: serde_yaml::Value) -> Result<Value, Error> {
    Ok(match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => yaml_number_to_json(&n)?,
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_json)
                .collect::<Result<_, _>>()?,
        ),
        serde_yaml::Value::Mapping(mapping) => {
            let mut object = Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                object.insert(yaml_key_to_string(key)?, yaml_to_json(value)?);
            }
            Value::Object(object)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(tagged.value)?,
    })
}

fn yaml_number_to_json(number: &serde_yaml::Number) -> Result<Value, Error> {
    if let Some(i) = number.as_i64() {
        return Ok(Value::from(i));
    }
    if let Some(u) = number.as_u64() {
        return Ok(Value::from(u));
    }
    number
        .as_f64()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| Error::Specification(format!("Unsupported YAML number '{number}'")))
}

fn yaml_key_to_string(key: serde_yaml::Value) -> Result<String, Error> {
    match key {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Null => Ok("null".to_string()),
        serde_yaml::Value::Tagged(tagged) => yaml_key_to_string(tagged.value),
        serde_yaml::Value::Sequence(_) | serde_yaml::Value::Mapping(_) => Err(
            Error::Specification("Mapping keys must be scalars".to_string()),
        ),
    }
}

/// Compute SHA-256 hash of content and return as hex string
#[must_use]
pub fn compute_content_hash(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_yaml_numeric_keys_become_strings() {
        let yaml = r#"
paths:
  /pets:
    get:
      responses:
        200:
          description: ok
        default:
          description: fallback
"#;
        let document = load_document(yaml).unwrap();
        let responses = &document["paths"]["/pets"]["get"]["responses"];
        assert_eq!(responses["200"], json!({"description": "ok"}));
        assert_eq!(responses["default"], json!({"description": "fallback"}));
    }

    #[test]
    fn test_yaml_preserves_key_order() {
        let document = load_document("b: 1\na: 2\nc: 3\n").unwrap();
        let keys: Vec<_> = document.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_json_document() {
        let document = load_document(r#"{"openapi": "3.0.0", "paths": {}}"#).unwrap();
        assert_eq!(document["openapi"], "3.0.0");
    }

    #[test]
    fn test_scalar_root_is_rejected() {
        assert!(matches!(
            load_document("just a string"),
            Err(Error::Specification(_))
        ));
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            load_document("not: valid: yaml: at: all:"),
            Err(Error::Yaml(_))
        ));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(load_document("{\"paths\": "), Err(Error::Json(_))));
    }

    #[test]
    fn test_compute_content_hash_is_stable() {
        let a = compute_content_hash(b"openapi: 3.0.0");
        assert_eq!(a, compute_content_hash(b"openapi: 3.0.0"));
        assert_ne!(a, compute_content_hash(b"openapi: 3.1.0"));
        assert_eq!(a.len(), 64);
    }
}
