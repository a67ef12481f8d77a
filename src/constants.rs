//! Common constants used throughout odoo-tools.

/// File marking the root of a project generated from the template.
/// Also holds the cookiecutter context.
pub const COOKIECUTTER_CONTEXT: &str = ".cookiecutter.context.yml";

/// How many directories (the starting one included) are searched for the marker
pub const MAX_ROOT_DEPTH: usize = 5;

pub const VERSION_FILE: &str = "odoo/VERSION";
pub const HISTORY_FILE: &str = "HISTORY.rst";
pub const PENDING_MERGES_DIR: &str = "pending-merges.d";
pub const MIGRATION_FILE: &str = "odoo/migration.yml";
pub const GITIGNORE_FILE: &str = ".gitignore";

pub const GIT_C2C_REMOTE_NAME: &str = "camptocamp";
pub const TEMPLATE_GIT: &str = "git@github.com:camptocamp/odoo-template.git";

/// Section header bumpversion drops from its `--dry-run --list` output
pub const BUMPVERSION_SECTION: &str = "bumpversion";
