//! Error types for BIM Picker.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while running a selection session.
///
/// Query text never produces an error; only the terminal itself can fail.
#[derive(Debug, Error)]
pub enum PickerError {
    /// Failed to set up, draw to, or read events from the terminal.
    #[error("terminal I/O failed: {source}")]
    Terminal {
        #[from]
        source: std::io::Error,
    },
}

/// Errors that can occur when loading records.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Failed to read the input file (or stdin).
    #[error("failed to read '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The CSV input is malformed.
    #[error("invalid CSV: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },

    /// The JSON input is malformed.
    #[error("invalid JSON: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    /// The JSON document is not an array of records.
    #[error("expected a JSON array of objects, found {found}")]
    NotAnArray { found: &'static str },

    /// An element of the JSON array is not an object.
    #[error("record {index} is not a JSON object")]
    NotAnObject { index: usize },
}

/// Errors that can occur when exporting selected records.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Failed to create the output file.
    #[error("failed to create file '{path}': {source}")]
    FileCreate {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write data to the output.
    #[error("failed to write data: {message}")]
    WriteError { message: String },

    /// Failed to serialize data to JSON.
    #[error("JSON serialization failed: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    /// Failed to write CSV data.
    #[error("CSV write failed: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },
}

/// Errors that can occur when loading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the settings file.
    #[error("failed to read config '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The settings file is not valid TOML for [`crate::config::Settings`].
    #[error("invalid config '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Errors that can occur when installing the log sink.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Failed to open the log file.
    #[error("failed to open log file '{path}': {source}")]
    FileOpen {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A global logger was already installed.
    #[error("logger already initialized: {source}")]
    AlreadySet {
        #[from]
        source: log::SetLoggerError,
    },
}
