//! CLI command handlers.
//!
//! Each submodule handles a top-level command variant from
//! [`Commands`](crate::cli::Commands).

pub mod check;
pub mod dump;

use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::constants;
use crate::error::Error;

/// The file given on the command line, else the configured
/// `specification_url`.
///
/// # Errors
///
/// Returns an error if neither is available or the configured path cannot be
/// expanded.
pub fn resolve_specification_path(
    file: Option<&Path>,
    settings: &Settings,
) -> Result<PathBuf, Error> {
    if let Some(file) = file {
        return Ok(file.to_path_buf());
    }
    settings.specification_path()?.ok_or_else(|| {
        Error::Config(format!(
            "No specification file given.\n\n\
             Hint: Pass FILE, set specification_url in the settings file, or set {}.",
            constants::ENV_MOCKSPEC_SPECIFICATION_URL
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_file_wins() {
        let settings = Settings {
            specification_url: Some("/configured.yaml".to_string()),
            ..Settings::default()
        };
        let path = resolve_specification_path(Some(Path::new("cli.yaml")), &settings).unwrap();
        assert_eq!(path, PathBuf::from("cli.yaml"));
    }

    #[test]
    fn test_falls_back_to_settings() {
        let settings = Settings {
            specification_url: Some("/configured.yaml".to_string()),
            ..Settings::default()
        };
        let path = resolve_specification_path(None, &settings).unwrap();
        assert_eq!(path, PathBuf::from("/configured.yaml"));
    }

    #[test]
    fn test_missing_everywhere() {
        let result = resolve_specification_path(None, &Settings::default());
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
