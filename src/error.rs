//! Error handling for odoo-tools.
//! Defines the error type and result alias used throughout the crate.

use std::io;

/// Errors raised by odoo-tools operations.
///
/// Aborts (missing project, dirty repository, refused confirmation) are
/// regular variants, turned into an exit status by [`default_error_handler`].
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    /// Represents YAML parsing or serialization failures
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Represents malformed configuration content or missing keys
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The project marker file could not be found above the working directory
    #[error("Missing cookiecutter.context.yml. It's not a project directory. Exiting")]
    MissingProjectError,

    /// The user (or a safety check) stopped the current operation
    #[error("{0}")]
    Aborted(String),

    /// An external command exited with a non-zero status
    #[error("Command `{command}` failed with {status}: {stderr}")]
    CommandError { command: String, status: String, stderr: String },

    /// Represents failures while reading interactive input
    #[error("Prompt error: {0}")]
    PromptError(String),

    /// Represents invalid ignore patterns
    #[error("Ignore pattern error: {0}")]
    IgnoreError(String),
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Error::ConfigError(msg.into())
    }

    pub fn aborted(msg: impl Into<String>) -> Self {
        Error::Aborted(msg.into())
    }
}

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
