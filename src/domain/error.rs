use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CopyError {
    #[error("No files selected.")]
    NoSelection,

    #[error("Failed to load settings from '{path}': {reason}")]
    SettingsUnavailable { path: PathBuf, reason: String },

    #[error("Failed to write settings to '{path}': {source}")]
    SettingsWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown setting '{0}'")]
    UnknownSetting(String),

    #[error("Invalid value '{value}' for setting '{key}': {reason}")]
    InvalidSettingValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File content of '{0}' is not valid UTF-8")]
    InvalidUtf8(PathBuf),
}
