//! Parsed schema tree handed to the value generator.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::spec::pointer::SpecificationPointer;

/// Fields every schema kind may carry.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaAttributes {
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub nullable: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub read_only: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub write_only: bool,
    #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StringType {
    #[serde(flatten)]
    pub attributes: SchemaAttributes,
    pub format: Option<String>,
    pub pattern: Option<String>,
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
}

/// Shared by `integer` and `number` schemas.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NumericType {
    #[serde(flatten)]
    pub attributes: SchemaAttributes,
    pub format: Option<String>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub exclusive_minimum: bool,
    pub exclusive_maximum: bool,
    pub multiple_of: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BooleanType {
    #[serde(flatten)]
    pub attributes: SchemaAttributes,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayType {
    #[serde(flatten)]
    pub attributes: SchemaAttributes,
    pub items: Box<TypeSchema>,
    pub min_items: Option<u64>,
    pub max_items: Option<u64>,
    pub unique_items: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectType {
    #[serde(flatten)]
    pub attributes: SchemaAttributes,
    pub properties: IndexMap<String, TypeSchema>,
    pub required: Vec<String>,
    pub min_properties: Option<u64>,
    pub max_properties: Option<u64>,
    pub additional_properties: AdditionalProperties,
}

/// The `additionalProperties` of an object schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Allowed(bool),
    Schema(Box<TypeSchema>),
}

impl Default for AdditionalProperties {
    fn default() -> Self {
        Self::Allowed(true)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CombinationKind {
    OneOf,
    AnyOf,
    AllOf,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedType {
    #[serde(flatten)]
    pub attributes: SchemaAttributes,
    pub kind: CombinationKind,
    pub types: Vec<TypeSchema>,
}

/// A schema without any type constraint (`{}`).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FreeformType {
    #[serde(flatten)]
    pub attributes: SchemaAttributes,
}

/// A schema that refers back to an enclosing schema still being expanded.
///
/// The target is kept as a pointer; the expanded schema it names is held by
/// [`MockEndpointCollection::resolve_schema`](crate::mock::MockEndpointCollection::resolve_schema).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceType {
    #[serde(flatten)]
    pub attributes: SchemaAttributes,
    #[serde(rename = "$ref")]
    pub target: SpecificationPointer,
}

/// One parsed schema object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TypeSchema {
    String(StringType),
    Integer(NumericType),
    Number(NumericType),
    Boolean(BooleanType),
    Array(ArrayType),
    Object(ObjectType),
    Combined(CombinedType),
    Freeform(FreeformType),
    Reference(ReferenceType),
}

impl TypeSchema {
    /// The fields shared by every kind.
    #[must_use]
    pub const fn attributes(&self) -> &SchemaAttributes {
        match self {
            Self::String(t) => &t.attributes,
            Self::Integer(t) | Self::Number(t) => &t.attributes,
            Self::Boolean(t) => &t.attributes,
            Self::Array(t) => &t.attributes,
            Self::Object(t) => &t.attributes,
            Self::Combined(t) => &t.attributes,
            Self::Freeform(t) => &t.attributes,
            Self::Reference(t) => &t.attributes,
        }
    }

    /// The `type` keyword this schema corresponds to, if any.
    #[must_use]
    pub const fn type_name(&self) -> Option<&'static str> {
        match self {
            Self::String(_) => Some(crate::constants::SCHEMA_TYPE_STRING),
            Self::Integer(_) => Some(crate::constants::SCHEMA_TYPE_INTEGER),
            Self::Number(_) => Some(crate::constants::SCHEMA_TYPE_NUMBER),
            Self::Boolean(_) => Some(crate::constants::SCHEMA_TYPE_BOOLEAN),
            Self::Array(_) => Some(crate::constants::SCHEMA_TYPE_ARRAY),
            Self::Object(_) => Some(crate::constants::SCHEMA_TYPE_OBJECT),
            Self::Combined(_) | Self::Freeform(_) | Self::Reference(_) => None,
        }
    }

    /// Targets of every [`TypeSchema::Reference`] below this schema, in
    /// document order.
    #[must_use]
    pub fn references(&self) -> Vec<&SpecificationPointer> {
        let mut found = Vec::new();
        self.collect_references(&mut found);
        found
    }

    pub(crate) fn collect_references<'s>(&'s self, found: &mut Vec<&'s SpecificationPointer>) {
        match self {
            Self::Reference(reference) => found.push(&reference.target),
            Self::Array(array) => array.items.collect_references(found),
            Self::Object(object) => {
                for property in object.properties.values() {
                    property.collect_references(found);
                }
                if let AdditionalProperties::Schema(schema) = &object.additional_properties {
                    schema.collect_references(found);
                }
            }
            Self::Combined(combined) => {
                for member in &combined.types {
                    member.collect_references(found);
                }
            }
            Self::String(_)
            | Self::Integer(_)
            | Self::Number(_)
            | Self::Boolean(_)
            | Self::Freeform(_) => {}
        }
    }
}
