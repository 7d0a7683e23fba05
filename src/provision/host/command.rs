//! Child process execution on the real system.

use async_trait::async_trait;
use std::process::Stdio;

use super::{CommandOutput, CommandRunner, Invocation};
use crate::provision::{Error, Result};

/// Runs commands with `tokio::process`.
///
/// Uncaptured invocations inherit the terminal so long-running installs and
/// builds stream their progress to the user, and `sudo` prompts from the
/// Homebrew installer can read the password.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
        let mut command = tokio::process::Command::new(invocation.program());
        command
            .args(invocation.get_args())
            .envs(invocation.get_envs().iter().map(|(k, v)| (k, v)))
            .kill_on_drop(true);

        if let Some(dir) = invocation.working_dir() {
            command.current_dir(dir);
        }

        let spawn_error = |error: std::io::Error| Error::CommandFailed {
            command: invocation.to_string(),
            error,
        };

        if invocation.captures_output() {
            let output = command
                .stdin(Stdio::null())
                .output()
                .await
                .map_err(spawn_error)?;
            Ok(CommandOutput {
                code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        } else {
            let status = command
                .stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit())
                .status()
                .await
                .map_err(spawn_error)?;
            Ok(CommandOutput {
                code: status.code(),
                ..Default::default()
            })
        }
    }
}
