//! Project discovery.
//! Locates the root of a project generated from the Odoo template and exposes
//! the well-known files it contains.

use log::debug;
use std::cell::OnceCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::constants::{
    COOKIECUTTER_CONTEXT, GITIGNORE_FILE, HISTORY_FILE, MAX_ROOT_DEPTH, MIGRATION_FILE,
    PENDING_MERGES_DIR, VERSION_FILE,
};
use crate::error::{Error, Result};
use crate::git::git_ignores;
use crate::yaml::yaml_load;

fn has_marker(dir: &Path) -> Result<bool> {
    for entry in fs::read_dir(dir)? {
        if entry?.file_name() == COOKIECUTTER_CONTEXT {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Walks up from `start` looking for the cookiecutter context file.
///
/// At most [`MAX_ROOT_DEPTH`] directories are looked at, `start` included.
///
/// # Errors
/// * `Error::MissingProjectError` if no directory within reach holds the marker
pub fn find_root<P: AsRef<Path>>(start: P) -> Result<PathBuf> {
    let mut current = start.as_ref().to_path_buf();
    for _ in 0..MAX_ROOT_DEPTH {
        if has_marker(&current)? {
            debug!("Project root found at '{}'.", current.display());
            return Ok(current);
        }
        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => break,
        }
    }
    Err(Error::MissingProjectError)
}

/// Project root found from the current working directory.
pub fn root_path() -> Result<PathBuf> {
    find_root(std::env::current_dir()?)
}

/// Resolves `path` against the project root, or against the directory of
/// `from_file` when one is given or `from_root` is false.
///
/// Without `from_file`, the directory of the running executable is used.
/// The returned path is not checked for existence.
pub fn build_path<P: AsRef<Path>>(
    path: P,
    from_root: bool,
    from_file: Option<&Path>,
) -> Result<PathBuf> {
    let base = match from_file {
        None if from_root => root_path()?,
        Some(file) => parent_dir(&real_path(file)?),
        None => parent_dir(&real_path(&std::env::current_exe()?)?),
    };
    Ok(base.join(path))
}

/// Absolute form of `file`, with symlinks resolved when it exists.
fn real_path(file: &Path) -> Result<PathBuf> {
    let absolute = if file.is_absolute() {
        file.to_path_buf()
    } else {
        std::env::current_dir()?.join(file)
    };
    match fs::canonicalize(&absolute) {
        Ok(resolved) => Ok(resolved),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(absolute),
        Err(e) => Err(e.into()),
    }
}

fn parent_dir(file: &Path) -> PathBuf {
    file.parent().map(Path::to_path_buf).unwrap_or_default()
}

/// A project generated from the template, rooted where its
/// `.cookiecutter.context.yml` lives.
#[derive(Debug)]
pub struct Project {
    root: PathBuf,
    context: OnceCell<serde_yaml::Value>,
}

impl Project {
    /// Finds the project containing the current working directory.
    pub fn discover() -> Result<Self> {
        root_path().map(Self::from_root)
    }

    pub fn from_root<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into(), context: OnceCell::new() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path relative to the project root.
    pub fn path<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.root.join(path)
    }

    pub fn version_file(&self) -> PathBuf {
        self.path(VERSION_FILE)
    }

    pub fn history_file(&self) -> PathBuf {
        self.path(HISTORY_FILE)
    }

    pub fn pending_merges_dir(&self) -> PathBuf {
        self.path(PENDING_MERGES_DIR)
    }

    pub fn migration_file(&self) -> PathBuf {
        self.path(MIGRATION_FILE)
    }

    pub fn gitignore_file(&self) -> PathBuf {
        self.path(GITIGNORE_FILE)
    }

    pub fn cookiecutter_context_file(&self) -> PathBuf {
        self.path(COOKIECUTTER_CONTEXT)
    }

    /// The parsed cookiecutter context.
    ///
    /// Read from disk on the first call only; later calls return the same
    /// value even if the file changed since.
    pub fn cookiecutter_context(&self) -> Result<&serde_yaml::Value> {
        if let Some(context) = self.context.get() {
            return Ok(context);
        }
        let file = self.cookiecutter_context_file();
        debug!("Loading cookiecutter context from '{}'.", file.display());
        let context: serde_yaml::Value = yaml_load(fs::File::open(&file)?)?;
        Ok(self.context.get_or_init(|| context))
    }

    /// Version recorded in `odoo/VERSION`.
    pub fn current_version(&self) -> Result<String> {
        Ok(fs::read_to_string(self.version_file())?.trim().to_string())
    }

    /// Patterns of the project's `.gitignore`.
    pub fn git_ignores(&self) -> Result<Vec<String>> {
        git_ignores(self.gitignore_file())
    }
}
