//! External command execution.
//! Every operation that shells out goes through [`CommandRunner`], so the
//! command lines can be checked without spawning the real tools.

use log::debug;
use std::io::Write;
use std::process::{Command, Stdio};

use crate::error::{Error, Result};

/// What to do with the output of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Capture the output and print it once the command is done
    Echo,
    /// Capture the output without printing it
    Hide,
    /// Attach the command to the terminal; nothing is captured
    Inherit,
}

pub trait CommandRunner {
    /// Runs a shell command line and returns its standard output.
    ///
    /// # Errors
    /// * `Error::CommandError` if the command exits with a non-zero status
    /// * `Error::IoError` if the shell cannot be spawned
    fn run(&self, command: &str, mode: OutputMode) -> Result<String>;
}

/// Runs commands through `sh -c`, blocking until they finish.
#[derive(Debug, Default)]
pub struct ShellRunner;

impl ShellRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str, mode: OutputMode) -> Result<String> {
        debug!("Running `{command}`.");
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(command);

        if mode == OutputMode::Inherit {
            let status = cmd
                .stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit())
                .status()?;
            if !status.success() {
                return Err(Error::CommandError {
                    command: command.to_string(),
                    status: status.to_string(),
                    stderr: String::new(),
                });
            }
            return Ok(String::new());
        }

        let output = cmd.stdin(Stdio::inherit()).output()?;
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if mode == OutputMode::Echo {
            print!("{stdout}");
            eprint!("{stderr}");
            std::io::stdout().flush()?;
        }

        if !output.status.success() {
            return Err(Error::CommandError {
                command: command.to_string(),
                status: output.status.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(stdout)
    }
}

/// Quotes a value for use as a single `sh` word.
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
