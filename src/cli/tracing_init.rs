//! Tracing/logging initialization for the CLI.

use crate::config::{LogFormat, Settings};
use crate::constants;
use tracing_subscriber::EnvFilter;

/// Wrapper type to write logs to file or stderr.
struct FileOrStderr {
    file: Option<std::sync::Mutex<std::fs::File>>,
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for FileOrStderr {
    type Writer = Box<dyn std::io::Write + 'a>;

    fn make_writer(&'a self) -> Self::Writer {
        self.file
            .as_ref()
            .and_then(|mutex| mutex.lock().ok())
            .and_then(|file| file.try_clone().ok())
            .map_or_else(
                || Box::new(std::io::stderr()) as Self::Writer,
                |cloned| Box::new(cloned) as Self::Writer,
            )
    }
}

/// Picks the filter directive: `-v` flags win over `MOCKSPEC_LOG`, which wins
/// over the configured `log_level`.
fn log_level(verbosity: u8, env_level: Option<String>, settings: &Settings) -> String {
    match verbosity {
        0 => env_level
            .or_else(|| settings.log_level.clone())
            .unwrap_or_else(|| constants::DEFAULT_LOG_LEVEL.to_string()),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Initialize the tracing subscriber.
pub fn init_tracing(verbosity: u8, settings: &Settings) {
    use std::fs::OpenOptions;
    use std::sync::Mutex;
    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let log_level_str = log_level(
        verbosity,
        std::env::var(constants::ENV_MOCKSPEC_LOG).ok(),
        settings,
    );

    let env_filter = EnvFilter::try_new(&log_level_str)
        .or_else(|_| EnvFilter::try_new(constants::DEFAULT_LOG_LEVEL))
        .unwrap_or_else(|_| EnvFilter::new("error"));

    let log_format = match std::env::var(constants::ENV_MOCKSPEC_LOG_FORMAT) {
        Ok(value) => value.parse::<LogFormat>().unwrap_or_else(|_| {
            // Tracing is not yet initialized; eprintln! is the only output channel available.
            eprintln!(
                "Warning: Unrecognized {} '{value}'. Valid values: 'json', 'text'. Using 'text'.",
                constants::ENV_MOCKSPEC_LOG_FORMAT
            );
            LogFormat::Text
        }),
        Err(_) => settings.log_format,
    };

    let writer = std::env::var(constants::ENV_MOCKSPEC_LOG_FILE)
        .ok()
        .map_or_else(
            || FileOrStderr { file: None },
            |path| match OpenOptions::new().create(true).append(true).open(&path) {
                Ok(file) => FileOrStderr {
                    file: Some(Mutex::new(file)),
                },
                Err(e) => {
                    eprintln!("Warning: Could not open log file '{path}': {e}. Using stderr.");
                    FileOrStderr { file: None }
                }
            },
        );

    match log_format {
        LogFormat::Json => {
            let json_layer = tracing_subscriber::fmt::layer()
                .json()
                .with_span_list(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_line_number(true)
                .with_writer(writer);
            tracing_subscriber::registry()
                .with(env_filter)
                .with(json_layer)
                .init();
        }
        LogFormat::Text => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .pretty()
                .with_span_events(FmtSpan::CLOSE)
                .with_target(false)
                .with_thread_ids(false)
                .with_line_number(false)
                .with_writer(writer);
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_precedence() {
        let settings = Settings {
            log_level: Some("info".to_string()),
            ..Settings::default()
        };

        assert_eq!(log_level(0, None, &settings), "info");
        assert_eq!(log_level(0, Some("warn".to_string()), &settings), "warn");
        assert_eq!(log_level(1, Some("warn".to_string()), &settings), "debug");
        assert_eq!(log_level(3, None, &settings), "trace");
        assert_eq!(log_level(0, None, &Settings::default()), "error");
    }
}
