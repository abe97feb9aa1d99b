use std::io::{self, Write};
use std::path::Path;

use crate::constants::DEFAULT_STATUS_TOKEN;
use crate::error::Error;
use crate::fs::FileSystem;
use crate::mock::{MockEndpointCollection, MockResponse};
use crate::spec::{load_file, parse_specification};

/// Loads and parses the document at `path` and prints a summary.
///
/// # Errors
///
/// Returns the first load or parse error.
pub fn execute<F: FileSystem + ?Sized>(fs: &F, path: &Path) -> Result<(), Error> {
    let loaded = load_file(fs, path)?;
    let endpoints = parse_specification(&loaded.document)?;
    write_summary(&mut io::stdout().lock(), path, &endpoints)?;
    Ok(())
}

fn status_label(response: &MockResponse) -> String {
    if response.is_default() {
        DEFAULT_STATUS_TOKEN.to_string()
    } else {
        response.status_code.to_string()
    }
}

/// Text summary: one line per endpoint followed by its responses.
///
/// # Errors
///
/// Returns the error of the underlying writer.
pub fn write_summary<W: Write + ?Sized>(
    out: &mut W,
    path: &Path,
    endpoints: &MockEndpointCollection,
) -> io::Result<()> {
    writeln!(out, "{}: {} endpoint(s)", path.display(), endpoints.len())?;

    for endpoint in endpoints {
        writeln!(out, "{} {}", endpoint.http_method, endpoint.path)?;
        for response in endpoint.parameters.responses.values() {
            let media_types: Vec<&str> = response.content.keys().map(String::as_str).collect();
            write!(out, "  {}", status_label(response))?;
            if let Some(description) = &response.description {
                write!(out, " {description}")?;
            }
            if !media_types.is_empty() {
                write!(out, " [{}]", media_types.join(", "))?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}
