//! Command-line interface implementation for odoo-tools.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

use crate::release::{BumpOptions, ReleaseType};

/// Command-line arguments structure for odoo-tools.
#[derive(Parser, Debug)]
#[command(author, version, about = "odoo-tools: release and maintenance helpers for Odoo template projects", long_about = None)]
pub struct Args {
    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Bump the project version with bumpversion
    Bump(BumpArgs),

    /// Collate the pending changelog entries with towncrier
    Changelog {
        /// Version of the release, defaults to the content of odoo/VERSION
        #[arg(value_name = "VERSION")]
        release_version: Option<String>,
    },

    /// Print the current project version
    Version,

    /// Print the cookiecutter context as JSON
    Context {
        /// Only print this top-level key
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },

    /// List the modules to upgrade according to the migration file
    MigrationModules {
        /// Migration file to read instead of odoo/migration.yml
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
    },

    /// List git ignore patterns, or the given paths they match
    Ignores {
        /// Read the global excludes file instead of the project .gitignore
        #[arg(long)]
        global: bool,

        #[arg(value_name = "PATH")]
        paths: Vec<PathBuf>,
    },
}

#[derive(clap::Args, Debug)]
pub struct BumpArgs {
    /// Part of the version to bump
    #[arg(long = "type", value_enum, ignore_case = true)]
    pub rel_type: ReleaseType,

    /// Set this version instead of computing it
    #[arg(long, value_name = "VERSION")]
    pub new_version: Option<String>,

    /// Only show the new version and the files that would change
    #[arg(long)]
    pub dry_run: bool,

    /// Commit the version bump. Accepted, but bump does not commit yet.
    #[arg(long, overrides_with = "no_commit")]
    pub commit: bool,

    #[arg(long = "no-commit", overrides_with = "commit", hide = true)]
    no_commit: bool,
}

impl BumpArgs {
    pub fn options(&self) -> BumpOptions {
        BumpOptions {
            rel_type: self.rel_type,
            new_version: self.new_version.clone(),
            dry_run: self.dry_run,
            commit: self.commit && !self.no_commit,
        }
    }
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if no subcommand is given, after printing the help
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                || e.kind() == ErrorKind::MissingSubcommand
            {
                let _ = Args::command().print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
