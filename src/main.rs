use clap::Parser;
use mockspec::cli::commands::{check, dump, resolve_specification_path};
use mockspec::cli::errors::print_error_with_json;
use mockspec::cli::tracing_init::init_tracing;
use mockspec::cli::{Cli, Commands};
use mockspec::config::Settings;
use mockspec::error::Error;
use mockspec::fs::OsFileSystem;

fn main() {
    let cli = Cli::parse();
    let json_errors = cli.json_errors;

    let settings = match Settings::load(&OsFileSystem, cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            print_error_with_json(&e, json_errors);
            std::process::exit(1);
        }
    };
    init_tracing(cli.verbosity, &settings);

    if let Err(e) = run_command(cli, &settings) {
        print_error_with_json(&e, json_errors);
        std::process::exit(1);
    }
}

fn run_command(cli: Cli, settings: &Settings) -> Result<(), Error> {
    match cli.command {
        Commands::Check { file } => {
            let path = resolve_specification_path(file.as_deref(), settings)?;
            check::execute(&OsFileSystem, &path)
        }
        Commands::Dump { file } => {
            let path = resolve_specification_path(file.as_deref(), settings)?;
            dump::execute(&OsFileSystem, &path, settings.use_examples)
        }
    }
}
