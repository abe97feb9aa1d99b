//! Mock server configuration produced by the specification parsers.
//!
//! The tree is built once per specification load and handed over as an
//! immutable snapshot; nothing here is mutated after parsing finishes.

pub mod endpoint;
pub mod parameters;
pub mod schema;

pub use endpoint::{MockEndpoint, MockEndpointCollection, MockParameter, ParameterLocation, UrlMatcher};
pub use parameters::{MediaDefinition, MockHeader, MockParameters, MockResponse};
pub use schema::TypeSchema;
