//! Access to secrets kept outside of the repository: gpg encrypted files and
//! lastpass notes.

use log::error;
use std::path::Path;

use crate::error::Result;
use crate::runner::{shell_quote, CommandRunner, OutputMode};

/// Builds the gpg command decrypting `file`. With a password, gpg runs in
/// loopback pinentry mode so that nothing is asked on the terminal.
pub fn build_gpg_decrypt_command(file: &Path, password: Option<&str>) -> String {
    let mut cmd = vec!["gpg".to_string(), "--yes".to_string()];
    if let Some(password) = password {
        cmd.push(format!(
            "--pinentry-mode loopback --batch --passphrase {} --no-tty --quiet",
            shell_quote(password)
        ));
    }
    cmd.push(shell_quote(&file.to_string_lossy()));
    cmd.join(" ")
}

/// Decrypts a `.gpg` file next to itself.
///
/// Without a password, gpg prompts for it interactively.
pub fn gpg_decrypt_to_file<P: AsRef<Path>>(
    runner: &dyn CommandRunner,
    file: P,
    password: Option<&str>,
) -> Result<()> {
    let cmd = build_gpg_decrypt_command(file.as_ref(), password);
    runner.run(&cmd, OutputMode::Inherit)?;
    Ok(())
}

/// Builds the lpass command showing one field of a note.
///
/// `field` is an `lpass show` option such as `--password` or `--field=token`.
pub fn build_lastpass_command(note_id: &str, field: &str) -> String {
    format!("lpass show {field} {note_id}")
}

/// Gets a field of a lastpass note.
///
/// Failures are logged and reported as `None`.
pub fn get_from_lastpass(runner: &dyn CommandRunner, note_id: &str, field: &str) -> Option<String> {
    match runner.run(&build_lastpass_command(note_id, field), OutputMode::Hide) {
        Ok(output) => Some(output.trim().to_string()),
        Err(e) => {
            error!("Error in get_from_lastpass : {e}");
            None
        }
    }
}
