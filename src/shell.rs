//! Generic shell and file system helpers: scoped directory changes, scoped
//! temporary directories, in-place text replacement and executable lookup.

use log::debug;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{Error, Result};

/// Expands a leading `~` to the current user's home directory.
pub fn expand_user<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

/// Restores the previous working directory when dropped.
///
/// Created by [`cd`]; keep it alive for as long as the new directory is needed.
#[derive(Debug)]
#[must_use = "the previous directory is restored as soon as the guard is dropped"]
pub struct DirGuard {
    previous: PathBuf,
}

impl DirGuard {
    pub fn previous(&self) -> &Path {
        &self.previous
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        if let Err(e) = std::env::set_current_dir(&self.previous) {
            log::error!("Cannot go back to '{}': {}", self.previous.display(), e);
        }
    }
}

/// Changes the working directory to `path` (with `~` expanded) until the
/// returned guard goes out of scope.
pub fn cd<P: AsRef<Path>>(path: P) -> Result<DirGuard> {
    let previous = std::env::current_dir()?;
    let target = expand_user(path);
    debug!("Entering '{}'.", target.display());
    std::env::set_current_dir(&target)?;
    Ok(DirGuard { previous })
}

/// Runs `f` inside `path`, going back to the previous directory on every exit path.
pub fn with_cd<P, F, T>(path: P, f: F) -> Result<T>
where
    P: AsRef<Path>,
    F: FnOnce() -> Result<T>,
{
    let _guard = cd(path)?;
    f()
}

/// Runs `f` with a fresh temporary directory which is removed afterwards.
///
/// The directory may already be gone when `f` returns; any other removal
/// failure is reported, unless `f` itself failed.
pub fn with_tempdir<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&Path) -> Result<T>,
{
    let dir = tempfile::Builder::new().prefix("odoo-tools-").tempdir()?;
    let result = f(dir.path());
    let path = dir.path().to_path_buf();
    match dir.close() {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("'{}' was already removed.", path.display());
        }
        Err(e) => {
            result?;
            return Err(e.into());
        }
    }
    result
}

/// Replaces `old` by `new` on each line of a file.
///
/// The original content is kept next to the file with a `.bak` suffix.
pub fn search_replace<P: AsRef<Path>>(path: P, old: &str, new: &str) -> Result<()> {
    let path = path.as_ref();
    let mut backup = path.as_os_str().to_owned();
    backup.push(".bak");
    let backup = PathBuf::from(backup);

    fs::rename(path, &backup)?;
    let mut reader = BufReader::new(File::open(&backup)?);
    let mut writer = BufWriter::new(File::create(path)?);

    let mut line = String::new();
    while reader.read_line(&mut line)? > 0 {
        writer.write_all(line.replace(old, new).as_bytes())?;
        line.clear();
    }
    writer.flush()?;
    Ok(())
}

/// Creates a directory and its parents. An existing directory is fine.
///
/// # Errors
/// * `Error::Aborted` if the path exists but is not a directory, or cannot be created
pub fn make_dir<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    if let Err(e) = fs::create_dir_all(path) {
        if !path.is_dir() {
            debug!("create_dir_all('{}') failed: {}", path.display(), e);
            return Err(Error::aborted(format!(
                "Directory does not exist and could not be created: {}",
                path.display()
            )));
        }
    }
    Ok(())
}

/// Tells whether `name` can be spawned. The exit status is not checked.
pub fn has_exec(name: &str) -> bool {
    let spawned = Command::new(name)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();
    match spawned {
        Ok(mut child) => {
            let _ = child.wait();
            true
        }
        Err(e) => e.kind() != io::ErrorKind::NotFound,
    }
}
