//! Host capabilities used by the pipeline.
//!
//! Every interaction with the outside world (child processes, network,
//! executable lookup, user-facing output) goes through one of the traits
//! below. [`Host`] bundles borrowed implementations and is handed to each
//! stage explicitly.

mod command;
mod locator;
mod transport;

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{Reporter, Result};

pub use command::SystemRunner;
pub use locator::SystemLocator;
pub use transport::HttpTransport;

/// A fully specified external command.
///
/// The child's working directory is explicit; the provisioner never changes
/// its own current directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    program: PathBuf,
    args: Vec<OsString>,
    envs: Vec<(OsString, OsString)>,
    current_dir: Option<PathBuf>,
    capture: bool,
}

impl Invocation {
    /// Creates an invocation of `program` with no arguments.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            envs: Vec::new(),
            current_dir: None,
            capture: false,
        }
    }

    /// Appends one argument.
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Sets an environment variable for the child.
    pub fn env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    /// Runs the child in `dir`.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Captures stdout/stderr instead of streaming them to the terminal.
    pub fn capture_output(mut self) -> Self {
        self.capture = true;
        self
    }

    /// Program path or name.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// File name of the program (`brew` for `/opt/homebrew/bin/brew`).
    pub fn program_name(&self) -> String {
        self.program
            .file_name()
            .unwrap_or(self.program.as_os_str())
            .to_string_lossy()
            .into_owned()
    }

    /// Arguments in order.
    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }

    /// Argument at `index` as UTF-8, if present.
    pub fn arg_str(&self, index: usize) -> Option<&str> {
        self.args.get(index).and_then(|a| a.to_str())
    }

    /// Environment overrides.
    pub fn get_envs(&self) -> &[(OsString, OsString)] {
        &self.envs
    }

    /// Value of an environment override.
    pub fn env_value(&self, key: &str) -> Option<&OsStr> {
        self.envs
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_os_str())
    }

    /// Working directory for the child, if set.
    pub fn working_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    /// Whether output is captured.
    pub fn captures_output(&self) -> bool {
        self.capture
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program_name())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Result of a completed child process.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code; `None` when killed by a signal.
    pub code: Option<i32>,
    /// Captured stdout (empty when streamed).
    pub stdout: String,
    /// Captured stderr (empty when streamed).
    pub stderr: String,
}

impl CommandOutput {
    /// A successful, silent exit.
    pub fn ok() -> Self {
        Self {
            code: Some(0),
            ..Default::default()
        }
    }

    /// An exit with the given code.
    pub fn exit(code: i32) -> Self {
        Self {
            code: Some(code),
            ..Default::default()
        }
    }

    /// Replaces captured stdout.
    pub fn with_stdout(mut self, stdout: impl Into<String>) -> Self {
        self.stdout = stdout.into();
        self
    }

    /// Replaces captured stderr.
    pub fn with_stderr(mut self, stderr: impl Into<String>) -> Self {
        self.stderr = stderr.into();
        self
    }

    /// True when the process exited with code 0.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Short description of a failed exit, suitable for error messages.
    pub fn failure_reason(&self) -> String {
        let status = match self.code {
            Some(code) => format!("exited with code {code}"),
            None => "was terminated by a signal".to_string(),
        };
        match self.stderr.trim().lines().last() {
            Some(line) if !line.is_empty() => format!("{status}: {line}"),
            _ => status,
        }
    }
}

/// Runs external commands.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs `invocation` to completion.
    ///
    /// Returns `Err` only when the process could not be started; a non-zero
    /// exit is reported through [`CommandOutput::code`].
    async fn run(&self, invocation: &Invocation) -> Result<CommandOutput>;
}

/// Fetches remote resources to disk.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Downloads `url` into `dest`, returning the number of bytes written.
    ///
    /// Network failures and non-success HTTP statuses are errors.
    async fn download(&self, url: &str, dest: &Path) -> Result<u64>;
}

/// Locates executables.
pub trait ToolLocator: Send + Sync {
    /// True when `path` exists and is executable.
    fn is_executable(&self, path: &Path) -> bool;

    /// Searches `PATH` for `name`.
    fn find_in_path(&self, name: &str) -> Option<PathBuf>;
}

/// Borrowed set of capabilities handed to each stage.
#[derive(Clone, Copy)]
pub struct Host<'a> {
    /// Child process runner.
    pub runner: &'a dyn CommandRunner,
    /// Download transport.
    pub transport: &'a dyn Transport,
    /// Executable lookup.
    pub locator: &'a dyn ToolLocator,
    /// Progress sink.
    pub reporter: &'a dyn Reporter,
}

impl fmt::Debug for Host<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Host").finish_non_exhaustive()
    }
}

impl<'a> Host<'a> {
    /// Bundles the given capabilities.
    pub fn new(
        runner: &'a dyn CommandRunner,
        transport: &'a dyn Transport,
        locator: &'a dyn ToolLocator,
        reporter: &'a dyn Reporter,
    ) -> Self {
        Self {
            runner,
            transport,
            locator,
            reporter,
        }
    }

    /// Runs a command through the runner, logging the command line.
    pub async fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
        log::debug!("running: {}", invocation);
        let output = self.runner.run(invocation).await?;
        log::debug!("`{}` finished with {:?}", invocation, output.code);
        Ok(output)
    }
}
