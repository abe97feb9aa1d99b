//! `OpenAPI` specification parsing
//!
//! The document is decoded once into a generic tree ([`loader`]), then a graph
//! of [`ContextualParser`]s walks it from the root. Each parser is handed an
//! accessor and a [`SpecificationPointer`], reads only what lies below that
//! pointer, and fails with a [`ParsingError`](crate::error::ParsingError)
//! located at the offending node. `$ref` handling is a decorator
//! ([`ReferenceResolvingParser`]) placed around any parser whose input may be
//! a reference.

pub mod accessor;
pub mod contextual;
pub mod endpoint;
mod fields;
pub mod loader;
pub mod parameter;
pub mod paths;
pub mod pointer;
pub mod reference;
pub mod response;
pub mod schema;

pub use accessor::SpecificationAccessor;
pub use contextual::ContextualParser;
pub use endpoint::EndpointParser;
pub use loader::{load_document, load_file, LoadedDocument};
pub use paths::SpecificationParser;
pub use pointer::{PathSegment, SpecificationPointer};
pub use reference::ReferenceResolvingParser;

use serde_json::Value;
use tracing::{debug, info};

use crate::error::ParsingError;
use crate::mock::MockEndpointCollection;

/// Parses a decoded document with the standard parser graph.
///
/// # Errors
///
/// Returns the first structural problem found; no partial configuration is
/// ever returned.
pub fn parse_specification(document: &Value) -> Result<MockEndpointCollection, ParsingError> {
    let accessor = SpecificationAccessor::new(document);
    let endpoints = SpecificationParser::default()
        .parse_pointed_schema(&accessor, &SpecificationPointer::root())?;

    for endpoint in &endpoints {
        debug!(
            method = %endpoint.http_method,
            path = %endpoint.path,
            responses = endpoint.parameters.responses.len(),
            "parsed endpoint"
        );
    }
    info!(endpoints = endpoints.len(), "specification parsed");

    Ok(endpoints)
}
