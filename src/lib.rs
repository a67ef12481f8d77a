//! odoo-tools automates the developer workflow of projects generated from the
//! Odoo template: version bumps, changelogs, project discovery, YAML updates
//! and small wrappers around git, gpg and lastpass.

/// Command-line interface module
pub mod cli;

/// Well-known file names and project constants
pub mod constants;

/// Error types and handling
pub mod error;

/// Working tree checks and git ignore patterns
pub mod git;

/// env_logger setup
pub mod logger;

/// Project root discovery and the files it contains
pub mod project;

/// User input and interaction handling
pub mod prompt;

/// bumpversion and towncrier helpers
pub mod release;

/// External command execution
pub mod runner;

/// gpg and lastpass access
pub mod secrets;

/// Scoped directory changes, temporary directories and file helpers
pub mod shell;

/// YAML loading, updating and migration file inspection
pub mod yaml;
