// External command construction and execution

use std::fmt;
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::debug;

/// An external command line kept as data, so it can be rendered for
/// logging and dry-run output before anything is executed.
#[derive(Debug, Clone)]
pub struct CommandLine {
    program: String,
    args: Vec<String>,
}

impl CommandLine {
    pub fn new(program: impl Into<String>) -> Self {
        CommandLine {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn argv(&self) -> &[String] {
        &self.args
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.contains(' ') {
                write!(f, " '{arg}'")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Why an external command did not succeed.
#[derive(Debug, Error)]
pub enum ExecError {
    /// The executable was not found on PATH.
    #[error("cannot find executable '{0}'")]
    Missing(String),

    /// The process could not be spawned or waited on.
    #[error("failed to execute: {0}")]
    Io(std::io::Error),

    /// The process ran but exited non-zero.
    #[error("exit code {}: {}", format_code(code), stderr.trim())]
    Failed { code: Option<i32>, stderr: String },
}

fn format_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "unknown".to_string(), |c| c.to_string())
}

/// Run a command to completion, capturing stderr.
///
/// In dry-run mode, prints the command to stdout instead of executing it.
pub fn execute(cmd: &CommandLine, dry_run: bool) -> Result<(), ExecError> {
    debug!(command = %cmd, "invoke");
    if dry_run {
        println!("{cmd}");
        return Ok(());
    }
    let output = cmd
        .command()
        .stdin(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| spawn_error(cmd.program(), e))?;

    check_status(output.status, &output.stderr)
}

/// Run a command with stdout redirected to a file. Used for `scanimage`,
/// which writes the raster image to stdout.
///
/// The output file only survives a successful run; on failure it is
/// removed again, so a failed scan cannot leave a truncated raster
/// behind that a later run would pick up.
///
/// In dry-run mode, prints the command with a shell-style redirection and
/// does not create the output file.
pub fn execute_redirected(
    cmd: &CommandLine,
    stdout_path: &Path,
    dry_run: bool,
) -> Result<(), ExecError> {
    debug!(command = %cmd, stdout = %stdout_path.display(), "invoke");
    if dry_run {
        println!("{cmd} > {}", stdout_path.display());
        return Ok(());
    }
    let file = File::create(stdout_path).map_err(ExecError::Io)?;
    let result = match cmd
        .command()
        .stdin(Stdio::null())
        .stdout(Stdio::from(file))
        .stderr(Stdio::piped())
        .output()
    {
        Ok(output) => check_status(output.status, &output.stderr),
        Err(e) => Err(spawn_error(cmd.program(), e)),
    };

    if result.is_err() {
        let _ = std::fs::remove_file(stdout_path);
    }
    result
}

fn spawn_error(program: &str, e: std::io::Error) -> ExecError {
    if e.kind() == ErrorKind::NotFound {
        ExecError::Missing(program.to_string())
    } else {
        ExecError::Io(e)
    }
}

fn check_status(status: std::process::ExitStatus, stderr: &[u8]) -> Result<(), ExecError> {
    if status.success() {
        Ok(())
    } else {
        Err(ExecError::Failed {
            code: status.code(),
            stderr: String::from_utf8_lossy(stderr).into_owned(),
        })
    }
}
