//! Mock server settings
//!
//! Settings come from a TOML file (by default `<config dir>/mockspec/config.toml`)
//! and can be overridden per value through `MOCKSPEC_*` environment variables.

use crate::constants;
use crate::error::Error;
use crate::fs::FileSystem;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// How the response generator uses examples found in the document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UseExamples {
    /// Always generate from schemas.
    #[default]
    No,
    /// Prefer an example when the response declares one.
    IfPresent,
    /// Only serve examples; responses without one stay empty.
    Exclusively,
}

impl UseExamples {
    pub const ALL: &'static [Self] = &[Self::No, Self::IfPresent, Self::Exclusively];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::No => "no",
            Self::IfPresent => "if_present",
            Self::Exclusively => "exclusively",
        }
    }
}

impl fmt::Display for UseExamples {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UseExamples {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "no" => Ok(Self::No),
            "if_present" => Ok(Self::IfPresent),
            "exclusively" => Ok(Self::Exclusively),
            other => Err(Error::Config(format!(
                "Invalid value '{other}' for use_examples. Valid values: no, if_present, exclusively"
            ))),
        }
    }
}

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LogFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(Error::Config(format!(
                "Invalid value '{other}' for log_format. Valid values: text, json"
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Path of the document to serve. `~` and `$VAR` are expanded on use.
    pub specification_url: Option<String>,
    pub use_examples: UseExamples,
    /// `EnvFilter` directive, e.g. `info` or `mockspec=debug`.
    pub log_level: Option<String>,
    pub log_format: LogFormat,
}

impl Settings {
    /// Loads settings from `path`, or from the default location when `path`
    /// is `None`, then applies environment overrides.
    ///
    /// A missing file at the default location yields the defaults; a missing
    /// `path` is an error.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` does not exist, the file cannot be read or
    /// is not valid TOML, or an override carries an invalid value.
    pub fn load<F: FileSystem + ?Sized>(fs: &F, path: Option<&Path>) -> Result<Self, Error> {
        let mut settings = Self::read(fs, path, config_file_path())?;
        settings.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(settings)
    }

    fn read<F: FileSystem + ?Sized>(
        fs: &F,
        explicit: Option<&Path>,
        default: Option<PathBuf>,
    ) -> Result<Self, Error> {
        if let Some(path) = explicit {
            if !fs.is_file(path) {
                return Err(Error::Config(format!(
                    "Configuration file '{}' does not exist",
                    path.display()
                )));
            }
            return Self::read_file(fs, path);
        }

        match default {
            Some(path) if fs.is_file(&path) => Self::read_file(fs, &path),
            _ => Ok(Self::default()),
        }
    }

    fn read_file<F: FileSystem + ?Sized>(fs: &F, path: &Path) -> Result<Self, Error> {
        let content = fs.read_to_string(path).map_err(|e| {
            Error::from(e).with_context(&format!(
                "Failed to read configuration '{}'",
                path.display()
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses settings from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or has unknown keys.
    pub fn from_toml_str(content: &str) -> Result<Self, Error> {
        Ok(toml::from_str(content)?)
    }

    /// Applies `MOCKSPEC_*` overrides looked up through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns an error if an override value is invalid.
    pub fn apply_overrides<L>(&mut self, lookup: L) -> Result<(), Error>
    where
        L: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(constants::ENV_MOCKSPEC_SPECIFICATION_URL) {
            self.specification_url = Some(url);
        }
        if let Some(value) = lookup(constants::ENV_MOCKSPEC_USE_EXAMPLES) {
            self.use_examples = value.parse()?;
        }
        Ok(())
    }

    /// The configured specification path with `~` and environment variables
    /// expanded.
    ///
    /// # Errors
    ///
    /// Returns an error if the path references an undefined variable.
    pub fn specification_path(&self) -> Result<Option<PathBuf>, Error> {
        self.specification_url
            .as_deref()
            .map(|url| {
                shellexpand::full(url)
                    .map(|expanded| PathBuf::from(expanded.as_ref()))
                    .map_err(|e| {
                        Error::Config(format!("Cannot expand specification_url '{url}': {e}"))
                    })
            })
            .transpose()
    }
}

/// The default configuration file location: `MOCKSPEC_CONFIG` if set,
/// otherwise `<config dir>/mockspec/config.toml`. A missing file here is not
/// an error.
#[must_use]
pub fn config_file_path() -> Option<PathBuf> {
    std::env::var_os(constants::ENV_MOCKSPEC_CONFIG).map_or_else(
        || {
            dirs::config_dir().map(|dir| {
                dir.join(constants::DIR_CONFIG)
                    .join(constants::CONFIG_FILENAME)
            })
        },
        |path| Some(PathBuf::from(path)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemoryFileSystem;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_use_examples_from_str() {
        assert_eq!("no".parse::<UseExamples>().unwrap(), UseExamples::No);
        assert_eq!(
            "IF_PRESENT".parse::<UseExamples>().unwrap(),
            UseExamples::IfPresent
        );
        assert_eq!(
            " exclusively ".parse::<UseExamples>().unwrap(),
            UseExamples::Exclusively
        );
        assert!(matches!(
            "sometimes".parse::<UseExamples>(),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_use_examples_display_round_trips() {
        for value in UseExamples::ALL {
            assert_eq!(value.to_string().parse::<UseExamples>().unwrap(), *value);
        }
    }

    #[test]
    fn test_from_toml_str() {
        let settings = Settings::from_toml_str(
            r#"
specification_url = "~/specs/petstore.yaml"
use_examples = "if_present"
log_level = "debug"
log_format = "json"
"#,
        )
        .unwrap();

        assert_eq!(
            settings.specification_url.as_deref(),
            Some("~/specs/petstore.yaml")
        );
        assert_eq!(settings.use_examples, UseExamples::IfPresent);
        assert_eq!(settings.log_level.as_deref(), Some("debug"));
        assert_eq!(settings.log_format, LogFormat::Json);
    }

    #[test]
    fn test_from_toml_str_empty_is_default() {
        assert_eq!(Settings::from_toml_str("").unwrap(), Settings::default());
    }

    #[test]
    fn test_from_toml_str_rejects_invalid_values() {
        assert!(matches!(
            Settings::from_toml_str("use_examples = \"always\""),
            Err(Error::Toml(_))
        ));
        assert!(matches!(
            Settings::from_toml_str("unknown_key = 1"),
            Err(Error::Toml(_))
        ));
    }

    #[test]
    fn test_apply_overrides() {
        let mut settings = Settings {
            specification_url: Some("/from/file.yaml".to_string()),
            ..Settings::default()
        };
        settings
            .apply_overrides(lookup(&[
                (constants::ENV_MOCKSPEC_SPECIFICATION_URL, "/from/env.yaml"),
                (constants::ENV_MOCKSPEC_USE_EXAMPLES, "exclusively"),
            ]))
            .unwrap();

        assert_eq!(settings.specification_url.as_deref(), Some("/from/env.yaml"));
        assert_eq!(settings.use_examples, UseExamples::Exclusively);
    }

    #[test]
    fn test_apply_overrides_invalid_value() {
        let mut settings = Settings::default();
        let result =
            settings.apply_overrides(lookup(&[(constants::ENV_MOCKSPEC_USE_EXAMPLES, "maybe")]));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_missing_default_file_gives_defaults() {
        let fs = MemoryFileSystem::new();
        let default = PathBuf::from("/home/user/.config/mockspec/config.toml");

        let settings = Settings::read(&fs, None, Some(default.clone())).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(Settings::read(&fs, None, None).unwrap(), Settings::default());

        fs.write(&default, "log_format = \"json\"\n");
        let settings = Settings::read(&fs, None, Some(default)).unwrap();
        assert_eq!(settings.log_format, LogFormat::Json);
    }

    #[test]
    fn test_load_missing_explicit_file_is_an_error() {
        let fs = MemoryFileSystem::new();
        let err = Settings::load(&fs, Some(Path::new("/etc/mockspec/config.toml"))).unwrap_err();
        assert!(
            matches!(err, Error::Config(ref msg) if msg.contains("/etc/mockspec/config.toml")),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn test_load_reads_file() {
        let fs = MemoryFileSystem::new();
        fs.write("/etc/mockspec/config.toml", "log_level = \"info\"\n");

        let settings = Settings::load(&fs, Some(Path::new("/etc/mockspec/config.toml"))).unwrap();
        assert_eq!(settings.log_level.as_deref(), Some("info"));
    }

    #[test]
    fn test_specification_path_expands_tilde() {
        let settings = Settings {
            specification_url: Some("~/petstore.yaml".to_string()),
            ..Settings::default()
        };
        let path = settings.specification_path().unwrap().unwrap();
        assert!(path.ends_with("petstore.yaml"));
    }

    #[test]
    fn test_specification_path_undefined_variable() {
        let settings = Settings {
            specification_url: Some("$MOCKSPEC_SURELY_UNDEFINED_VARIABLE/petstore.yaml".to_string()),
            ..Settings::default()
        };
        assert!(matches!(
            settings.specification_path(),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_specification_path_unset() {
        assert!(Settings::default().specification_path().unwrap().is_none());
    }
}
