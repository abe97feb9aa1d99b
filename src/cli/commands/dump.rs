use serde::Serialize;
use std::path::Path;

use crate::config::UseExamples;
use crate::error::Error;
use crate::fs::FileSystem;
use crate::mock::MockEndpointCollection;
use crate::spec::{load_file, parse_specification};

/// The parsed configuration as handed to the mock server.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DumpReport<'a> {
    pub fingerprint: &'a str,
    pub use_examples: UseExamples,
    /// Serialized as `endpoints`, plus `schemas` when recursive schemas exist.
    #[serde(flatten)]
    pub endpoints: &'a MockEndpointCollection,
}

/// Loads and parses the document at `path` and prints it as JSON.
///
/// # Errors
///
/// Returns the first load or parse error.
pub fn execute<F: FileSystem + ?Sized>(
    fs: &F,
    path: &Path,
    use_examples: UseExamples,
) -> Result<(), Error> {
    let loaded = load_file(fs, path)?;
    let endpoints = parse_specification(&loaded.document)?;
    let report = DumpReport {
        fingerprint: &loaded.fingerprint,
        use_examples,
        endpoints: &endpoints,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
