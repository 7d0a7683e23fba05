//! Progress reporting capability.
//!
//! Stages report through this trait instead of printing directly, so the
//! CLI decides how output looks and tests can record what happened.

/// Receives progress and diagnostics from the pipeline.
pub trait Reporter: Send + Sync {
    /// A new stage or phase has started.
    fn section(&self, title: &str);

    /// Informational progress line.
    fn progress(&self, message: &str);

    /// A step completed successfully.
    fn success(&self, message: &str);

    /// A tolerated failure; the pipeline keeps going.
    fn warn(&self, message: &str);
}

/// Reporter that only forwards to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn section(&self, title: &str) {
        log::info!("== {}", title);
    }
    fn progress(&self, message: &str) {
        log::info!("{}", message);
    }
    fn success(&self, message: &str) {
        log::info!("✓ {}", message);
    }
    fn warn(&self, message: &str) {
        log::warn!("{}", message);
    }
}
