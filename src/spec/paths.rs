//! Walks `#/paths` and assembles one [`MockEndpoint`] per operation.

use indexmap::IndexMap;
use std::collections::VecDeque;

use crate::constants;
use crate::error::ParsingError;
use crate::mock::{
    MockEndpoint, MockEndpointCollection, MockParameter, MockParameters, TypeSchema, UrlMatcher,
};
use crate::spec::accessor::SpecificationAccessor;
use crate::spec::contextual::ContextualParser;
use crate::spec::endpoint::EndpointParser;
use crate::spec::parameter::{merge_parameters, ParameterCollectionParser, ParameterParser};
use crate::spec::pointer::SpecificationPointer;
use crate::spec::reference::ReferenceResolvingParser;
use crate::spec::response::{HeaderParser, MediaParser, ResponseParser};
use crate::spec::schema::SchemaParser;

/// One operation of a path item, before it is bound to its path.
#[derive(Debug, Clone, PartialEq)]
pub struct PathOperation {
    /// Upper-case HTTP method.
    pub http_method: String,
    pub parameters: MockParameters,
    pub request_parameters: Vec<MockParameter>,
}

/// Parses a path item into its operations, in document order.
#[derive(Debug, Clone)]
pub struct PathItemParser {
    endpoint_parser: EndpointParser<ResponseParser>,
    parameters_parser: ParameterCollectionParser,
}

impl PathItemParser {
    #[must_use]
    pub const fn new(
        endpoint_parser: EndpointParser<ResponseParser>,
        parameters_parser: ParameterCollectionParser,
    ) -> Self {
        Self {
            endpoint_parser,
            parameters_parser,
        }
    }

    fn parse_parameters(
        &self,
        specification: &SpecificationAccessor<'_>,
        owner: &SpecificationPointer,
        has_parameters: bool,
    ) -> Result<Vec<MockParameter>, ParsingError> {
        if !has_parameters {
            return Ok(Vec::new());
        }
        self.parameters_parser.parse_pointed_schema(
            specification,
            &owner.with_path_element(constants::FIELD_PARAMETERS),
        )
    }
}

impl ContextualParser for PathItemParser {
    type Output = Vec<PathOperation>;

    fn parse_pointed_schema(
        &self,
        specification: &SpecificationAccessor<'_>,
        pointer: &SpecificationPointer,
    ) -> Result<Self::Output, ParsingError> {
        let path_item = specification.get_object(pointer)?;
        let shared_parameters = self.parse_parameters(
            specification,
            pointer,
            path_item.contains_key(constants::FIELD_PARAMETERS),
        )?;

        let mut operations = Vec::new();
        for method in path_item.keys().filter(|key| constants::is_http_method(key)) {
            let operation_pointer = pointer.with_path_element(method);
            let operation = specification.get_object(&operation_pointer)?;

            let parameters = self
                .endpoint_parser
                .parse_pointed_schema(specification, &operation_pointer)?;
            let own_parameters = self.parse_parameters(
                specification,
                &operation_pointer,
                operation.contains_key(constants::FIELD_PARAMETERS),
            )?;

            operations.push(PathOperation {
                http_method: method.to_uppercase(),
                parameters,
                request_parameters: merge_parameters(shared_parameters.clone(), own_parameters),
            });
        }

        Ok(operations)
    }
}

/// Parses a whole document, starting at its root, into a
/// [`MockEndpointCollection`].
#[derive(Debug, Clone)]
pub struct SpecificationParser {
    path_item_parser: ReferenceResolvingParser<PathItemParser>,
    schema_parser: SchemaParser,
}

impl SpecificationParser {
    #[must_use]
    pub const fn new(path_item_parser: PathItemParser, schema_parser: SchemaParser) -> Self {
        Self {
            path_item_parser: ReferenceResolvingParser::new(path_item_parser),
            schema_parser,
        }
    }

    /// Expands every schema a [`TypeSchema::Reference`] leaf points to,
    /// including the targets reached only from other expansions.
    fn parse_recursive_schemas(
        &self,
        specification: &SpecificationAccessor<'_>,
        endpoints: &[MockEndpoint],
    ) -> Result<IndexMap<SpecificationPointer, TypeSchema>, ParsingError> {
        let mut pending: VecDeque<SpecificationPointer> = endpoints
            .iter()
            .flat_map(MockEndpoint::schema_references)
            .cloned()
            .collect();
        let mut schemas = IndexMap::new();

        while let Some(target) = pending.pop_front() {
            if schemas.contains_key(&target) {
                continue;
            }
            let schema = {
                // Marked in progress so the expansion stops at its own recursion.
                let _guard = specification.enter_reference(&target);
                self.schema_parser.parse_pointed_schema(specification, &target)?
            };
            pending.extend(schema.references().into_iter().cloned());
            schemas.insert(target, schema);
        }

        Ok(schemas)
    }
}

impl Default for SpecificationParser {
    /// The standard parser graph.
    fn default() -> Self {
        let schema_parser = SchemaParser::new();
        let response_parser = ResponseParser::new(
            MediaParser::new(schema_parser),
            HeaderParser::new(schema_parser),
        );
        let parameters_parser = ParameterCollectionParser::new(ParameterParser::new(schema_parser));

        Self::new(
            PathItemParser::new(EndpointParser::new(response_parser), parameters_parser),
            schema_parser,
        )
    }
}

impl ContextualParser for SpecificationParser {
    type Output = MockEndpointCollection;

    fn parse_pointed_schema(
        &self,
        specification: &SpecificationAccessor<'_>,
        pointer: &SpecificationPointer,
    ) -> Result<Self::Output, ParsingError> {
        let root = specification.get_object(pointer)?;
        if !root.contains_key(constants::FIELD_PATHS) {
            return Ok(MockEndpointCollection::default());
        }

        let paths_pointer = pointer.with_path_element(constants::FIELD_PATHS);
        let paths = root[constants::FIELD_PATHS].as_object().ok_or_else(|| {
            ParsingError::invalid_value(
                "Paths must be a mapping of URL paths to path items",
                paths_pointer.clone(),
            )
        })?;

        let mut endpoints = Vec::new();
        for path in paths.keys() {
            let path_pointer = paths_pointer.with_path_element(path);
            let url_matcher = UrlMatcher::new(path).map_err(|err| {
                ParsingError::invalid_value(
                    format!("Cannot build a URL matcher for '{path}': {err}"),
                    path_pointer.clone(),
                )
            })?;

            let operations = self
                .path_item_parser
                .parse_pointed_schema(specification, &path_pointer)?;
            endpoints.extend(operations.into_iter().map(|operation| MockEndpoint {
                path: path.clone(),
                http_method: operation.http_method,
                parameters: operation.parameters,
                request_parameters: operation.request_parameters,
                url_matcher: url_matcher.clone(),
            }));
        }

        let schemas = self.parse_recursive_schemas(specification, &endpoints)?;
        Ok(MockEndpointCollection::new(endpoints).with_schemas(schemas))
    }
}
