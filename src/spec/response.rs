use serde_json::Value;

use crate::constants;
use crate::error::ParsingError;
use crate::mock::{MediaDefinition, MockHeader, MockResponse};
use crate::spec::accessor::SpecificationAccessor;
use crate::spec::contextual::ContextualParser;
use crate::spec::fields::{flag, optional_object, optional_string};
use crate::spec::pointer::SpecificationPointer;
use crate::spec::reference::{resolve_reference, ReferenceResolvingParser};
use crate::spec::schema::SchemaParser;

/// Parses a response object. The status code is left at the default
/// sentinel; the caller knows the real one.
#[derive(Debug, Clone, Default)]
pub struct ResponseParser {
    media_parser: MediaParser,
    header_parser: ReferenceResolvingParser<HeaderParser>,
}

impl ResponseParser {
    #[must_use]
    pub const fn new(media_parser: MediaParser, header_parser: HeaderParser) -> Self {
        Self {
            media_parser,
            header_parser: ReferenceResolvingParser::new(header_parser),
        }
    }
}

impl ContextualParser for ResponseParser {
    type Output = MockResponse;

    fn parse_pointed_schema(
        &self,
        specification: &SpecificationAccessor<'_>,
        pointer: &SpecificationPointer,
    ) -> Result<Self::Output, ParsingError> {
        let node = specification.get_object(pointer)?;
        let mut response = MockResponse {
            description: optional_string(node, constants::FIELD_DESCRIPTION, pointer)?,
            ..MockResponse::default()
        };

        if let Some(content) = optional_object(node, constants::FIELD_CONTENT, pointer)? {
            let content_pointer = pointer.with_path_element(constants::FIELD_CONTENT);
            for media_type in content.keys() {
                let media = self
                    .media_parser
                    .parse_pointed_schema(specification, &content_pointer.with_path_element(media_type))?;
                response.content.insert(media_type.clone(), media);
            }
        }

        if let Some(headers) = optional_object(node, constants::FIELD_HEADERS, pointer)? {
            let headers_pointer = pointer.with_path_element(constants::FIELD_HEADERS);
            for name in headers.keys() {
                let header = self
                    .header_parser
                    .parse_pointed_schema(specification, &headers_pointer.with_path_element(name))?;
                response.headers.insert(name.clone(), header);
            }
        }

        Ok(response)
    }
}

/// Parses a media type object (`content.<media-type>`).
#[derive(Debug, Clone, Default)]
pub struct MediaParser {
    schema_parser: ReferenceResolvingParser<SchemaParser>,
}

impl MediaParser {
    #[must_use]
    pub const fn new(schema_parser: SchemaParser) -> Self {
        Self {
            schema_parser: ReferenceResolvingParser::new(schema_parser),
        }
    }
}

impl ContextualParser for MediaParser {
    type Output = MediaDefinition;

    fn parse_pointed_schema(
        &self,
        specification: &SpecificationAccessor<'_>,
        pointer: &SpecificationPointer,
    ) -> Result<Self::Output, ParsingError> {
        let node = specification.get_object(pointer)?;
        let mut media = MediaDefinition {
            example: node.get(constants::FIELD_EXAMPLE).cloned(),
            ..MediaDefinition::default()
        };

        if node.contains_key(constants::FIELD_SCHEMA) {
            media.schema = Some(self.schema_parser.parse_pointed_schema(
                specification,
                &pointer.with_path_element(constants::FIELD_SCHEMA),
            )?);
        }

        if let Some(examples) = optional_object(node, constants::FIELD_EXAMPLES, pointer)? {
            let examples_pointer = pointer.with_path_element(constants::FIELD_EXAMPLES);
            for name in examples.keys() {
                let value = parse_example(specification, &examples_pointer.with_path_element(name))?;
                if let Some(value) = value {
                    media.examples.insert(name.clone(), value);
                }
            }
        }

        Ok(media)
    }
}

/// The `value` of an example object, following a reference if needed.
/// External examples (`externalValue`) have no inline value and are skipped.
fn parse_example(
    specification: &SpecificationAccessor<'_>,
    pointer: &SpecificationPointer,
) -> Result<Option<Value>, ParsingError> {
    let resolved = resolve_reference(specification, pointer)?;
    let node = specification.get_object(&resolved)?;
    Ok(node.get(constants::FIELD_VALUE).cloned())
}

/// Parses a header object of a response.
#[derive(Debug, Clone, Default)]
pub struct HeaderParser {
    schema_parser: ReferenceResolvingParser<SchemaParser>,
}

impl HeaderParser {
    #[must_use]
    pub const fn new(schema_parser: SchemaParser) -> Self {
        Self {
            schema_parser: ReferenceResolvingParser::new(schema_parser),
        }
    }
}

impl ContextualParser for HeaderParser {
    type Output = MockHeader;

    fn parse_pointed_schema(
        &self,
        specification: &SpecificationAccessor<'_>,
        pointer: &SpecificationPointer,
    ) -> Result<Self::Output, ParsingError> {
        let node = specification.get_object(pointer)?;
        let schema = if node.contains_key(constants::FIELD_SCHEMA) {
            Some(self.schema_parser.parse_pointed_schema(
                specification,
                &pointer.with_path_element(constants::FIELD_SCHEMA),
            )?)
        } else {
            None
        };

        Ok(MockHeader {
            required: flag(node, constants::FIELD_REQUIRED, pointer)?,
            schema,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParsingErrorKind;
    use crate::mock::TypeSchema;
    use serde_json::json;

    fn parse(document: &Value, reference: &str) -> Result<MockResponse, ParsingError> {
        let accessor = SpecificationAccessor::new(document);
        let pointer = SpecificationPointer::from_reference(reference).unwrap();
        ResponseParser::default().parse_pointed_schema(&accessor, &pointer)
    }

    #[test]
    fn test_response_with_content_and_headers() {
        let document = json!({
            "response": {
                "description": "A pet",
                "content": {
                    "application/json": {
                        "schema": {"$ref": "#/components/schemas/Pet"},
                        "example": {"id": 1}
                    },
                    "text/plain": {}
                },
                "headers": {
                    "X-Rate-Limit": {"required": true, "schema": {"type": "integer"}},
                    "X-Trace": {"$ref": "#/components/headers/Trace"}
                }
            },
            "components": {
                "schemas": {"Pet": {"type": "object", "properties": {"id": {"type": "integer"}}}},
                "headers": {"Trace": {"schema": {"type": "string"}}}
            }
        });

        let response = parse(&document, "#/response").unwrap();
        assert_eq!(response.description.as_deref(), Some("A pet"));
        assert!(response.is_default());
        assert_eq!(
            response.content.keys().collect::<Vec<_>>(),
            vec!["application/json", "text/plain"]
        );

        let json_media = &response.content["application/json"];
        assert!(matches!(json_media.schema, Some(TypeSchema::Object(_))));
        assert_eq!(json_media.example, Some(json!({"id": 1})));
        assert!(response.content["text/plain"].schema.is_none());

        assert!(response.headers["X-Rate-Limit"].required);
        assert!(!response.headers["X-Trace"].required);
        assert!(matches!(
            response.headers["X-Trace"].schema,
            Some(TypeSchema::String(_))
        ));
    }

    #[test]
    fn test_named_examples_follow_references() {
        let document = json!({
            "response": {"content": {"application/json": {"examples": {
                "inline": {"value": {"name": "Rex"}},
                "shared": {"$ref": "#/components/examples/Cat"},
                "external": {"externalValue": "https://example.com/pet.json"}
            }}}},
            "components": {"examples": {"Cat": {"value": {"name": "Tom"}}}}
        });

        let response = parse(&document, "#/response").unwrap();
        let examples = &response.content["application/json"].examples;
        assert_eq!(examples.len(), 2);
        assert_eq!(examples["inline"], json!({"name": "Rex"}));
        assert_eq!(examples["shared"], json!({"name": "Tom"}));
    }

    #[test]
    fn test_content_must_be_a_mapping() {
        let document = json!({"response": {"content": "application/json"}});

        let err = parse(&document, "#/response").unwrap_err();
        assert_eq!(err.kind(), ParsingErrorKind::InvalidValue);
        assert_eq!(err.pointer().to_string(), "#/response/content");
    }

    #[test]
    fn test_schema_errors_carry_the_nested_pointer() {
        let document = json!({"response": {"content": {"application/json": {
            "schema": {"type": "array"}
        }}}});

        let err = parse(&document, "#/response").unwrap_err();
        assert_eq!(
            err.pointer().to_string(),
            "#/response/content/application~1json/schema"
        );
    }
}
