//! Top-level error types for the command line tool.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Main error type returned by [`crate::cli::run`]
#[derive(Error, Debug)]
pub enum AppError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// Provisioning failures, tagged with the failing stage
    #[error(transparent)]
    Provision(#[from] crate::provision::Error),

    /// Terminal prompt failures
    #[error("prompt failed: {0}")]
    Prompt(#[from] inquire::InquireError),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Background task ended abnormally
    #[error("{task} task failed: {reason}")]
    TaskFailed {
        /// What the task was doing
        task: &'static str,
        /// Join error text
        reason: String,
    },

    /// Confirmation needed but stdin is not a terminal
    #[error("stdin is not a terminal; pass --yes or set {env}=1 to run without the prompt")]
    NotInteractive {
        /// Environment toggle that skips the prompt
        env: &'static str,
    },
}

impl AppError {
    /// Pipeline stage that failed, for provisioning errors.
    pub fn stage(&self) -> Option<crate::provision::Stage> {
        match self {
            AppError::Provision(e) => e.stage(),
            _ => None,
        }
    }

    /// True when the user pressed Ctrl-C or Esc at the prompt.
    pub fn is_interrupted(&self) -> bool {
        matches!(
            self,
            AppError::Prompt(
                inquire::InquireError::OperationInterrupted
                    | inquire::InquireError::OperationCanceled
            )
        )
    }
}
