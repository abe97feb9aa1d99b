//! Schema objects, dispatched on the keys they carry.
//!
//! Only the shape needed to build a [`TypeSchema`] is checked. Whether a
//! `minimum` is below its `maximum` is left to the value generator.

use serde_json::{Map, Value};

use crate::constants;
use crate::error::ParsingError;
use crate::mock::schema::{
    AdditionalProperties, ArrayType, BooleanType, CombinationKind, CombinedType, FreeformType,
    NumericType, ObjectType, ReferenceType, SchemaAttributes, StringType, TypeSchema,
};
use crate::spec::accessor::SpecificationAccessor;
use crate::spec::contextual::ContextualParser;
use crate::spec::fields::{
    flag, optional_array, optional_f64, optional_object, optional_str, optional_string,
    optional_u64,
};
use crate::spec::pointer::SpecificationPointer;
use crate::spec::reference::resolve_reference_and_parse_pointed_schema;

/// Parses a schema object into a [`TypeSchema`].
///
/// Nested schemas (`items`, `properties`, combinations) are parsed by the
/// same parser behind reference resolution. A nested reference back to a
/// component schema that is still being expanded becomes a
/// [`TypeSchema::Reference`] leaf.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaParser;

impl SchemaParser {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn parse_child(
        self,
        specification: &SpecificationAccessor<'_>,
        pointer: &SpecificationPointer,
    ) -> Result<TypeSchema, ParsingError> {
        resolve_reference_and_parse_pointed_schema(specification, pointer, &self)
    }

    fn parse_combined(
        self,
        specification: &SpecificationAccessor<'_>,
        node: &Map<String, Value>,
        pointer: &SpecificationPointer,
        attributes: SchemaAttributes,
    ) -> Result<Option<TypeSchema>, ParsingError> {
        let combinations = [
            (constants::FIELD_ONE_OF, CombinationKind::OneOf),
            (constants::FIELD_ANY_OF, CombinationKind::AnyOf),
            (constants::FIELD_ALL_OF, CombinationKind::AllOf),
        ];

        for (key, kind) in combinations {
            let Some(members) = optional_array(node, key, pointer)? else {
                continue;
            };
            let members_pointer = pointer.with_path_element(key);
            if members.is_empty() {
                return Err(ParsingError::invalid_value(
                    format!("'{key}' must list at least one schema"),
                    members_pointer,
                ));
            }

            let types = (0..members.len())
                .map(|index| {
                    self.parse_child(specification, &members_pointer.with_path_element(index))
                })
                .collect::<Result<Vec<_>, _>>()?;

            return Ok(Some(TypeSchema::Combined(CombinedType {
                attributes,
                kind,
                types,
            })));
        }

        Ok(None)
    }

    fn parse_array(
        self,
        specification: &SpecificationAccessor<'_>,
        node: &Map<String, Value>,
        pointer: &SpecificationPointer,
        attributes: SchemaAttributes,
    ) -> Result<TypeSchema, ParsingError> {
        if !node.contains_key(constants::FIELD_ITEMS) {
            return Err(ParsingError::invalid_value(
                "Array schema must declare 'items'",
                pointer.clone(),
            ));
        }
        let items =
            self.parse_child(specification, &pointer.with_path_element(constants::FIELD_ITEMS))?;

        Ok(TypeSchema::Array(ArrayType {
            attributes,
            items: Box::new(items),
            min_items: optional_u64(node, constants::FIELD_MIN_ITEMS, pointer)?,
            max_items: optional_u64(node, constants::FIELD_MAX_ITEMS, pointer)?,
            unique_items: flag(node, constants::FIELD_UNIQUE_ITEMS, pointer)?,
        }))
    }

    fn parse_object(
        self,
        specification: &SpecificationAccessor<'_>,
        node: &Map<String, Value>,
        pointer: &SpecificationPointer,
        attributes: SchemaAttributes,
    ) -> Result<TypeSchema, ParsingError> {
        let mut object = ObjectType {
            attributes,
            min_properties: optional_u64(node, constants::FIELD_MIN_PROPERTIES, pointer)?,
            max_properties: optional_u64(node, constants::FIELD_MAX_PROPERTIES, pointer)?,
            ..ObjectType::default()
        };

        if let Some(properties) = optional_object(node, constants::FIELD_PROPERTIES, pointer)? {
            let properties_pointer = pointer.with_path_element(constants::FIELD_PROPERTIES);
            for name in properties.keys() {
                let property =
                    self.parse_child(specification, &properties_pointer.with_path_element(name))?;
                object.properties.insert(name.clone(), property);
            }
        }

        if let Some(required) = optional_array(node, constants::FIELD_REQUIRED, pointer)? {
            let required_pointer = pointer.with_path_element(constants::FIELD_REQUIRED);
            for (index, name) in required.iter().enumerate() {
                let name = name.as_str().ok_or_else(|| {
                    ParsingError::invalid_value(
                        "Required property names must be strings",
                        required_pointer.with_path_element(index),
                    )
                })?;
                object.required.push(name.to_string());
            }
        }

        object.additional_properties = match node.get(constants::FIELD_ADDITIONAL_PROPERTIES) {
            None => AdditionalProperties::default(),
            Some(Value::Bool(allowed)) => AdditionalProperties::Allowed(*allowed),
            Some(Value::Object(_)) => AdditionalProperties::Schema(Box::new(self.parse_child(
                specification,
                &pointer.with_path_element(constants::FIELD_ADDITIONAL_PROPERTIES),
            )?)),
            Some(_) => {
                return Err(ParsingError::invalid_value(
                    "'additionalProperties' must be a boolean or a schema",
                    pointer.with_path_element(constants::FIELD_ADDITIONAL_PROPERTIES),
                ))
            }
        };

        Ok(TypeSchema::Object(object))
    }
}

impl ContextualParser for SchemaParser {
    type Output = TypeSchema;

    fn parse_pointed_schema(
        &self,
        specification: &SpecificationAccessor<'_>,
        pointer: &SpecificationPointer,
    ) -> Result<Self::Output, ParsingError> {
        let node = specification.get_object(pointer)?;
        let attributes = parse_attributes(node, pointer)?;

        if let Some(combined) = self.parse_combined(specification, node, pointer, attributes.clone())? {
            return Ok(combined);
        }

        let type_name = match optional_str(node, constants::FIELD_TYPE, pointer)? {
            Some(type_name) => type_name,
            None if node.contains_key(constants::FIELD_PROPERTIES) => constants::SCHEMA_TYPE_OBJECT,
            None if node.contains_key(constants::FIELD_ITEMS) => constants::SCHEMA_TYPE_ARRAY,
            None => return Ok(TypeSchema::Freeform(FreeformType { attributes })),
        };

        match type_name {
            constants::SCHEMA_TYPE_STRING => Ok(TypeSchema::String(StringType {
                attributes,
                format: optional_string(node, constants::FIELD_FORMAT, pointer)?,
                pattern: optional_string(node, constants::FIELD_PATTERN, pointer)?,
                min_length: optional_u64(node, constants::FIELD_MIN_LENGTH, pointer)?,
                max_length: optional_u64(node, constants::FIELD_MAX_LENGTH, pointer)?,
            })),
            constants::SCHEMA_TYPE_INTEGER => {
                Ok(TypeSchema::Integer(parse_numeric(node, pointer, attributes)?))
            }
            constants::SCHEMA_TYPE_NUMBER => {
                Ok(TypeSchema::Number(parse_numeric(node, pointer, attributes)?))
            }
            constants::SCHEMA_TYPE_BOOLEAN => Ok(TypeSchema::Boolean(BooleanType { attributes })),
            constants::SCHEMA_TYPE_ARRAY => self.parse_array(specification, node, pointer, attributes),
            constants::SCHEMA_TYPE_OBJECT => {
                self.parse_object(specification, node, pointer, attributes)
            }
            other => Err(ParsingError::invalid_value(
                format!("Unsupported schema type '{other}'"),
                pointer.with_path_element(constants::FIELD_TYPE),
            )),
        }
    }

    fn parse_recursive_reference(
        &self,
        target: &SpecificationPointer,
        _pointer: &SpecificationPointer,
    ) -> Result<Self::Output, ParsingError> {
        Ok(TypeSchema::Reference(ReferenceType {
            attributes: SchemaAttributes::default(),
            target: target.clone(),
        }))
    }
}

fn parse_attributes(
    node: &Map<String, Value>,
    pointer: &SpecificationPointer,
) -> Result<SchemaAttributes, ParsingError> {
    let enum_values = optional_array(node, constants::FIELD_ENUM, pointer)?
        .cloned()
        .unwrap_or_default();

    Ok(SchemaAttributes {
        nullable: flag(node, constants::FIELD_NULLABLE, pointer)?,
        read_only: flag(node, constants::FIELD_READ_ONLY, pointer)?,
        write_only: flag(node, constants::FIELD_WRITE_ONLY, pointer)?,
        enum_values,
        default: node.get(constants::FIELD_DEFAULT).cloned(),
        example: node.get(constants::FIELD_EXAMPLE).cloned(),
    })
}

fn parse_numeric(
    node: &Map<String, Value>,
    pointer: &SpecificationPointer,
    attributes: SchemaAttributes,
) -> Result<NumericType, ParsingError> {
    Ok(NumericType {
        attributes,
        format: optional_string(node, constants::FIELD_FORMAT, pointer)?,
        minimum: optional_f64(node, constants::FIELD_MINIMUM, pointer)?,
        maximum: optional_f64(node, constants::FIELD_MAXIMUM, pointer)?,
        exclusive_minimum: flag(node, constants::FIELD_EXCLUSIVE_MINIMUM, pointer)?,
        exclusive_maximum: flag(node, constants::FIELD_EXCLUSIVE_MAXIMUM, pointer)?,
        multiple_of: optional_f64(node, constants::FIELD_MULTIPLE_OF, pointer)?,
    })
}
