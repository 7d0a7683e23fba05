//! Classification of external step results.
//!
//! Each external call is attempted once. Whether its failure halts the
//! pipeline or only produces a warning is decided by the caller's
//! [`FailurePolicy`], not inline at the call site.

use super::{CommandOutput, Error, Reporter, Result};

/// What to do when a step fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Abort the whole run.
    Halt,
    /// Log a warning and continue.
    Warn,
}

/// Outcome of one external step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The step succeeded.
    Success,
    /// The step failed but the failure is acceptable.
    Tolerated(String),
    /// The step failed and the run must stop.
    Fatal(String),
}

impl StepOutcome {
    /// Classifies a completed command.
    pub fn from_output(output: &CommandOutput, policy: FailurePolicy) -> Self {
        if output.success() {
            StepOutcome::Success
        } else {
            Self::failed(output.failure_reason(), policy)
        }
    }

    /// Classifies a command result, treating spawn errors like failed exits.
    pub fn classify(result: Result<CommandOutput>, policy: FailurePolicy) -> Self {
        match result {
            Ok(output) => Self::from_output(&output, policy),
            Err(e) => Self::failed(e.to_string(), policy),
        }
    }

    /// Classifies any fallible in-process step.
    pub fn from_result<T>(result: Result<T>, policy: FailurePolicy) -> Self {
        match result {
            Ok(_) => StepOutcome::Success,
            Err(e) => Self::failed(e.to_string(), policy),
        }
    }

    fn failed(reason: String, policy: FailurePolicy) -> Self {
        match policy {
            FailurePolicy::Halt => StepOutcome::Fatal(reason),
            FailurePolicy::Warn => StepOutcome::Tolerated(reason),
        }
    }

    /// True for [`StepOutcome::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, StepOutcome::Success)
    }

    /// Applies the outcome: fatal becomes an error, tolerated becomes a warning.
    ///
    /// Returns `Ok(true)` on success and `Ok(false)` on a tolerated failure.
    pub fn settle(self, step: &str, reporter: &dyn Reporter) -> Result<bool> {
        match self {
            StepOutcome::Success => Ok(true),
            StepOutcome::Tolerated(reason) => {
                reporter.warn(&format!("{step} failed (continuing): {reason}"));
                Ok(false)
            }
            StepOutcome::Fatal(reason) => Err(Error::CommandStatus {
                command: step.to_string(),
                reason,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provision::report::LogReporter;

    #[test]
    fn policy_decides_failure_class() {
        let failed = CommandOutput::exit(1);
        assert_eq!(
            StepOutcome::from_output(&failed, FailurePolicy::Halt),
            StepOutcome::Fatal("exited with code 1".into())
        );
        assert_eq!(
            StepOutcome::from_output(&failed, FailurePolicy::Warn),
            StepOutcome::Tolerated("exited with code 1".into())
        );
        assert!(StepOutcome::from_output(&CommandOutput::ok(), FailurePolicy::Halt).is_success());
    }

    #[test]
    fn spawn_errors_follow_policy() {
        let err = Error::GenericError("not found".into());
        assert_eq!(
            StepOutcome::classify(Err(err), FailurePolicy::Warn),
            StepOutcome::Tolerated("not found".into())
        );
    }

    #[test]
    fn settle_maps_outcomes() {
        assert!(StepOutcome::Success.settle("x", &LogReporter).unwrap());
        assert!(
            !StepOutcome::Tolerated("meh".into())
                .settle("x", &LogReporter)
                .unwrap()
        );
        let err = StepOutcome::Fatal("bad".into())
            .settle("brew update", &LogReporter)
            .unwrap_err();
        assert_eq!(err.to_string(), "`brew update` bad");
    }
}
