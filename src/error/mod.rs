//! Error types and handling for modelcards
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`card`]: Card metadata and model-index errors
//! - [`template`]: Template lookup and rendering errors
//! - [`hub`]: Remote validation and configuration errors
//! - [`fs`]: File system errors

pub mod card;
pub mod fs;
pub mod hub;
pub mod template;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for card operations
#[derive(Error, Diagnostic, Debug)]
pub enum CardError {
    // Card errors
    #[error("Malformed card metadata: {message}")]
    #[diagnostic(
        code(modelcards::card::malformed_metadata),
        help("The block between the two `---` lines must be a YAML mapping")
    )]
    MalformedMetadata { message: String },

    #[error("Invalid model-index: {message}")]
    #[diagnostic(code(modelcards::card::invalid_model_index))]
    InvalidModelIndex { message: String },

    #[error("Invalid argument: {message}")]
    #[diagnostic(code(modelcards::card::invalid_argument))]
    InvalidArgument { message: String },

    // Template errors
    #[error("Template not found: {path}")]
    #[diagnostic(
        code(modelcards::template::not_found),
        help("Pass an existing template file, or omit --template to use the bundled one")
    )]
    TemplateNotFound { path: String },

    #[error("Failed to render template: {reason}")]
    #[diagnostic(code(modelcards::template::render_failed))]
    TemplateRenderFailed { reason: String },

    // Hub errors
    #[error("{message}")]
    #[diagnostic(
        code(modelcards::hub::validation_failed),
        help("Fix the metadata key reported by the Hub and try again")
    )]
    RemoteValidationFailed { message: String },

    #[error(transparent)]
    #[diagnostic(code(modelcards::hub::transport))]
    Transport(#[from] reqwest::Error),

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(modelcards::config::invalid))]
    ConfigInvalid { message: String },

    // File system errors
    #[error("File not found: {path}")]
    #[diagnostic(code(modelcards::fs::not_found))]
    FileNotFound { path: String },

    #[error("Failed to read file: {path}")]
    #[diagnostic(code(modelcards::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}")]
    #[diagnostic(code(modelcards::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(modelcards::fs::io_error))]
    IoError { message: String },

    #[error("Serialization failed: {message}")]
    #[diagnostic(code(modelcards::serialization_failed))]
    SerializationFailed { message: String },
}

impl From<std::io::Error> for CardError {
    fn from(err: std::io::Error) -> Self {
        CardError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for CardError {
    fn from(err: serde_yaml::Error) -> Self {
        CardError::MalformedMetadata {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for CardError {
    fn from(err: serde_json::Error) -> Self {
        CardError::SerializationFailed {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, CardError>;
