//! Git related helpers: working tree checks and ignore patterns.

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use log::debug;
use std::fs::read_to_string;
use std::path::Path;

use crate::error::{Error, Result};
use crate::prompt::{ask_or_abort, Prompter};
use crate::runner::{CommandRunner, OutputMode};
use crate::shell::expand_user;

const DIFF_COMMANDS: [&str; 2] =
    ["git diff --quiet --exit-code", "git diff --cached --quiet --exit-code"];

/// Tells whether the working tree or the index has uncommitted changes.
pub fn has_local_changes(runner: &dyn CommandRunner) -> Result<bool> {
    for cmd in DIFF_COMMANDS {
        match runner.run(cmd, OutputMode::Hide) {
            Ok(_) => {}
            Err(Error::CommandError { .. }) => return Ok(true),
            Err(e) => return Err(e),
        }
    }
    Ok(false)
}

/// Stops when the repository has local changes.
///
/// With `direct_abort` the check fails right away, otherwise the user is
/// asked whether to go on.
pub fn check_git_diff(
    runner: &dyn CommandRunner,
    prompter: &dyn Prompter,
    direct_abort: bool,
) -> Result<()> {
    if !has_local_changes(runner)? {
        return Ok(());
    }
    if direct_abort {
        return Err(Error::aborted("Your repository has local changes. Abort."));
    }
    ask_or_abort(prompter, "Your repository has local changes, are you sure you want to continue?")
}

/// Reads an ignore file and returns its patterns, skipping blank lines and comments.
pub fn git_ignores<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let content = read_to_string(path.as_ref())?;
    Ok(content
        .lines()
        .filter(|line| !line.trim().is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

/// Patterns of the user's global excludes file (`core.excludesfile`).
pub fn git_ignores_global(runner: &dyn CommandRunner) -> Result<Vec<String>> {
    let output = runner.run("git config --global core.excludesfile", OutputMode::Hide)?;
    let path = expand_user(output.trim());
    debug!("Global excludes file is '{}'.", path.display());
    git_ignores(path)
}

/// Compiles ignore patterns with git's rules: `!` negation, `/` anchoring
/// relative to `root` and trailing `/` directory patterns.
pub fn ignore_matcher<P: AsRef<Path>>(root: P, patterns: &[String]) -> Result<Gitignore> {
    let mut builder = GitignoreBuilder::new(root);
    for pattern in patterns {
        builder
            .add_line(None, pattern)
            .map_err(|e| Error::IgnoreError(format!("'{pattern}': {e}")))?;
    }
    builder.build().map_err(|e| Error::IgnoreError(e.to_string()))
}

/// Tells whether `path`, or one of its parent directories, is ignored.
///
/// Relative paths are taken from the matcher's root; absolute paths outside
/// of it are never ignored.
pub fn is_ignored<P: AsRef<Path>>(matcher: &Gitignore, path: P, is_dir: bool) -> bool {
    let path = path.as_ref();
    if path.is_absolute() && !path.starts_with(matcher.path()) {
        return false;
    }
    matcher.matched_path_or_any_parents(path, is_dir).is_ignore()
}
