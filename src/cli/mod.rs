pub mod commands;
pub mod errors;
pub mod tracing_init;

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "mockspec: OpenAPI specification parser for mock servers",
    long_about = "mockspec reads an OpenAPI 3.x document and builds the mock server\n\
                  configuration from it: one endpoint per path and method, with the\n\
                  declared responses keyed by status code. Problems are reported with\n\
                  the location in the document where they were found.\n\n\
                  Examples:\n  \
                  mockspec check petstore.yaml\n  \
                  mockspec dump petstore.yaml\n  \
                  mockspec --json-errors check petstore.yaml"
)]
pub struct Cli {
    /// Output all errors as structured JSON to stderr
    #[arg(long, global = true, help = "Output errors in JSON format")]
    pub json_errors: bool,

    /// Increase logging verbosity
    #[arg(
        short = 'v',
        global = true,
        action = ArgAction::Count,
        help = "Increase logging verbosity (-v for debug, -vv for trace)"
    )]
    pub verbosity: u8,

    /// Settings file to use instead of the default location
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a specification and summarise its endpoints
    #[command(long_about = "Load and parse a specification, then print every endpoint\n\
                      with its declared responses.\n\n\
                      FILE defaults to the configured specification_url.")]
    Check {
        /// Path to the `OpenAPI` document (YAML or JSON)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
    /// Print the parsed mock configuration as JSON
    #[command(long_about = "Load and parse a specification, then print the resulting\n\
                      endpoints, responses and request parameters as JSON.\n\n\
                      FILE defaults to the configured specification_url.")]
    Dump {
        /// Path to the `OpenAPI` document (YAML or JSON)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
}
