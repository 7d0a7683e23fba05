//! Error types for provisioning operations.
//!
//! Fatal failures bubble up as [`Error`]; the orchestrator wraps them in
//! [`Error::Stage`] so the final message names the stage that failed.

use std::fmt::Display;
use std::io;
use std::path::{Path, PathBuf};

use super::Stage;

/// Result type alias for provisioning operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while provisioning.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A stage of the pipeline failed.
    #[error("{stage} failed: {source}")]
    Stage {
        /// Stage that was running.
        stage: Stage,
        /// Underlying failure.
        #[source]
        source: Box<Error>,
    },

    /// Filesystem operation failed on a specific path.
    #[error("{context} ({}): {error}", path.display())]
    Fs {
        /// What was being done.
        context: String,
        /// Path involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        error: io::Error,
    },

    /// Plain I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// An external command could not be spawned.
    #[error("failed to run `{command}`: {error}")]
    CommandFailed {
        /// Command line.
        command: String,
        /// Spawn error.
        #[source]
        error: io::Error,
    },

    /// An external command ran and reported failure.
    #[error("`{command}` {reason}")]
    CommandStatus {
        /// Command line.
        command: String,
        /// Exit status and captured diagnostics.
        reason: String,
    },

    /// A download failed.
    #[error("download of {url} failed: {reason}")]
    Download {
        /// Source URL.
        url: String,
        /// Transport or HTTP failure.
        reason: String,
    },

    /// Archive extraction failed.
    #[error("failed to extract {}: {reason}", archive.display())]
    Extract {
        /// Archive on disk.
        archive: PathBuf,
        /// Why extraction failed.
        reason: String,
    },

    /// No executable could be resolved from candidates or PATH.
    #[error("no usable executable found (looked for {names:?} in {probed} locations and PATH)")]
    ExecutableNotFound {
        /// Names searched for on PATH.
        names: Vec<String>,
        /// Number of candidate locations probed.
        probed: usize,
    },

    /// The entry-point executable is absent from the extracted tree.
    #[error("{name} not found anywhere under {}", root.display())]
    EntryPointMissing {
        /// File name searched for.
        name: String,
        /// Extraction root.
        root: PathBuf,
    },

    /// Content digest did not match the pinned value.
    #[error("checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch {
        /// Pinned digest.
        expected: String,
        /// Computed digest.
        actual: String,
    },

    /// Invalid settings.
    #[error("invalid settings: {0}")]
    Settings(String),

    /// Image decode or encode error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Property list serialization error.
    #[error("manifest error: {0}")]
    Plist(#[from] plist::Error),

    /// Template rendering error.
    #[error("template error: {0}")]
    Template(#[from] handlebars::RenderError),

    /// Directory walk error.
    #[error("directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Anything else.
    #[error("{0}")]
    GenericError(String),
}

impl Error {
    /// Tags this error with the stage it happened in.
    ///
    /// Already-tagged errors keep their original stage.
    pub fn in_stage(self, stage: Stage) -> Self {
        match self {
            Error::Stage { .. } => self,
            other => Error::Stage {
                stage,
                source: Box::new(other),
            },
        }
    }

    /// Stage this error was tagged with, if any.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Error::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

/// Attaches an operation description and path to I/O failures.
pub trait ErrorExt<T> {
    /// Converts an I/O error into [`Error::Fs`].
    fn fs_context(self, context: &str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context: context.to_string(),
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Attaches a message to any displayable failure.
pub trait Context<T> {
    /// Wraps the failure with a static message.
    fn context<C: Display>(self, context: C) -> Result<T>;

    /// Wraps the failure with a lazily built message.
    fn with_context<C: Display, F: FnOnce() -> C>(self, f: F) -> Result<T>;
}

impl<T, E: Display> Context<T> for std::result::Result<T, E> {
    fn context<C: Display>(self, context: C) -> Result<T> {
        self.map_err(|e| Error::GenericError(format!("{context}: {e}")))
    }

    fn with_context<C: Display, F: FnOnce() -> C>(self, f: F) -> Result<T> {
        self.map_err(|e| Error::GenericError(format!("{}: {e}", f())))
    }
}

impl<T> Context<T> for Option<T> {
    fn context<C: Display>(self, context: C) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }

    fn with_context<C: Display, F: FnOnce() -> C>(self, f: F) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(f().to_string()))
    }
}

/// Returns early with a [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::provision::Error::GenericError(format!($($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_tag_is_applied_once() {
        let err = Error::GenericError("boom".into())
            .in_stage(Stage::Artifact)
            .in_stage(Stage::Bundle);
        assert_eq!(err.stage(), Some(Stage::Artifact));
        assert!(err.to_string().starts_with("artifact fetch failed"));
    }

    #[test]
    fn fs_context_keeps_path() {
        let res: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let err = res.fs_context("reading manifest", "/tmp/x").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("reading manifest"));
        assert!(msg.contains("/tmp/x"));
    }

    #[test]
    fn option_context() {
        let none: Option<u8> = None;
        let err = none.context("missing value").unwrap_err();
        assert_eq!(err.to_string(), "missing value");
    }
}
