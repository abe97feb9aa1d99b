//! Parses `OpenAPI` documents into the configuration of a mock server.
//!
//! [`spec`] walks the document with pointer-based parsers that resolve local
//! `$ref`s and report every failure at the node where it happened; [`mock`]
//! holds the resulting configuration; [`snapshot`] keeps the served copy
//! swappable at runtime.

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod fs;
pub mod mock;
pub mod snapshot;
pub mod spec;
