use crate::constants;
use crate::error::ParsingError;
use crate::mock::{MockParameter, ParameterLocation};
use crate::spec::accessor::SpecificationAccessor;
use crate::spec::contextual::ContextualParser;
use crate::spec::fields::{flag, optional_str};
use crate::spec::pointer::SpecificationPointer;
use crate::spec::reference::ReferenceResolvingParser;
use crate::spec::schema::SchemaParser;

/// Parses one parameter object.
#[derive(Debug, Clone, Default)]
pub struct ParameterParser {
    schema_parser: ReferenceResolvingParser<SchemaParser>,
}

impl ParameterParser {
    #[must_use]
    pub const fn new(schema_parser: SchemaParser) -> Self {
        Self {
            schema_parser: ReferenceResolvingParser::new(schema_parser),
        }
    }
}

impl ContextualParser for ParameterParser {
    type Output = MockParameter;

    fn parse_pointed_schema(
        &self,
        specification: &SpecificationAccessor<'_>,
        pointer: &SpecificationPointer,
    ) -> Result<Self::Output, ParsingError> {
        let node = specification.get_object(pointer)?;

        let name = optional_str(node, constants::FIELD_NAME, pointer)?.ok_or_else(|| {
            ParsingError::invalid_value("Parameter must have a 'name'", pointer.clone())
        })?;

        let location_text = optional_str(node, constants::FIELD_IN, pointer)?.ok_or_else(|| {
            ParsingError::invalid_value("Parameter must have an 'in' location", pointer.clone())
        })?;
        let location = ParameterLocation::parse(location_text).ok_or_else(|| {
            ParsingError::invalid_value(
                format!(
                    "Invalid parameter location '{location_text}'. Must be one of: path, query, header, cookie"
                ),
                pointer.with_path_element(constants::FIELD_IN),
            )
        })?;

        let schema = if node.contains_key(constants::FIELD_SCHEMA) {
            Some(self.schema_parser.parse_pointed_schema(
                specification,
                &pointer.with_path_element(constants::FIELD_SCHEMA),
            )?)
        } else {
            None
        };

        Ok(MockParameter {
            name: name.to_string(),
            location,
            // Path parameters are always required.
            required: location == ParameterLocation::Path
                || flag(node, constants::FIELD_REQUIRED, pointer)?,
            schema,
        })
    }
}

/// Parses a `parameters` sequence, resolving references of each entry.
#[derive(Debug, Clone, Default)]
pub struct ParameterCollectionParser {
    parameter_parser: ReferenceResolvingParser<ParameterParser>,
}

impl ParameterCollectionParser {
    #[must_use]
    pub const fn new(parameter_parser: ParameterParser) -> Self {
        Self {
            parameter_parser: ReferenceResolvingParser::new(parameter_parser),
        }
    }
}

impl ContextualParser for ParameterCollectionParser {
    type Output = Vec<MockParameter>;

    fn parse_pointed_schema(
        &self,
        specification: &SpecificationAccessor<'_>,
        pointer: &SpecificationPointer,
    ) -> Result<Self::Output, ParsingError> {
        let entries = specification.get_schema(pointer)?.as_array().ok_or_else(|| {
            ParsingError::invalid_value("Parameters must be a sequence", pointer.clone())
        })?;

        (0..entries.len())
            .map(|index| {
                self.parameter_parser
                    .parse_pointed_schema(specification, &pointer.with_path_element(index))
            })
            .collect()
    }
}

/// Overlays `overrides` onto `base`: an override replaces the base parameter
/// with the same name and location, otherwise it is appended.
#[must_use]
pub fn merge_parameters(base: Vec<MockParameter>, overrides: Vec<MockParameter>) -> Vec<MockParameter> {
    let mut merged = base;
    for parameter in overrides {
        match merged
            .iter_mut()
            .find(|p| p.name == parameter.name && p.location == parameter.location)
        {
            Some(existing) => *existing = parameter,
            None => merged.push(parameter),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParsingErrorKind;
    use crate::mock::TypeSchema;
    use serde_json::{json, Value};

    fn parse(document: &Value, reference: &str) -> Result<Vec<MockParameter>, ParsingError> {
        let accessor = SpecificationAccessor::new(document);
        let pointer = SpecificationPointer::from_reference(reference).unwrap();
        ParameterCollectionParser::default().parse_pointed_schema(&accessor, &pointer)
    }

    fn parameter(name: &str, location: ParameterLocation, required: bool) -> MockParameter {
        MockParameter {
            name: name.to_string(),
            location,
            required,
            schema: None,
        }
    }

    #[test]
    fn test_parameters_with_references() {
        let document = json!({
            "parameters": [
                {"name": "petId", "in": "path", "schema": {"type": "integer"}},
                {"$ref": "#/components/parameters/Limit"}
            ],
            "components": {"parameters": {"Limit": {"name": "limit", "in": "query", "required": false}}}
        });

        let parameters = parse(&document, "#/parameters").unwrap();
        assert_eq!(parameters.len(), 2);
        assert_eq!(parameters[0].name, "petId");
        assert!(parameters[0].required);
        assert!(matches!(parameters[0].schema, Some(TypeSchema::Integer(_))));
        assert_eq!(parameters[1].name, "limit");
        assert_eq!(parameters[1].location, ParameterLocation::Query);
        assert!(!parameters[1].required);
    }

    #[test]
    fn test_invalid_location_points_at_in() {
        let document = json!({"parameters": [{"name": "file", "in": "body"}]});

        let err = parse(&document, "#/parameters").unwrap_err();
        assert_eq!(err.kind(), ParsingErrorKind::InvalidValue);
        assert_eq!(err.pointer().to_string(), "#/parameters/0/in");
    }

    #[test]
    fn test_missing_name() {
        let document = json!({"parameters": [{"in": "query"}]});

        let err = parse(&document, "#/parameters").unwrap_err();
        assert_eq!(err.pointer().to_string(), "#/parameters/0");
    }

    #[test]
    fn test_parameters_must_be_a_sequence() {
        let document = json!({"parameters": {"name": "id"}});
        assert!(parse(&document, "#/parameters").is_err());
    }

    #[test]
    fn test_merge_parameters_overrides_by_name_and_location() {
        let merged = merge_parameters(
            vec![
                parameter("id", ParameterLocation::Path, true),
                parameter("trace", ParameterLocation::Header, false),
            ],
            vec![
                parameter("trace", ParameterLocation::Header, true),
                parameter("trace", ParameterLocation::Query, false),
            ],
        );

        assert_eq!(merged.len(), 3);
        assert!(merged[1].required);
        assert_eq!(merged[2].location, ParameterLocation::Query);
    }
}
