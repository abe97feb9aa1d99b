pub mod settings;

pub use settings::{config_file_path, LogFormat, Settings, UseExamples};
