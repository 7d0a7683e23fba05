//! Terminal output for provisioning runs.

use std::io::{self, Write};

use crate::provision::Reporter;

/// Prints progress to stdout and warnings to stderr.
///
/// Every line is mirrored to the `log` facade so `RUST_LOG` captures the
/// same record as the terminal.
#[derive(Debug, Clone)]
pub struct OutputManager {
    quiet: bool,
}

impl OutputManager {
    /// Create a new output manager
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// Print section header
    pub fn section(&self, title: &str) -> io::Result<()> {
        log::info!("== {}", title);
        if self.quiet {
            return Ok(());
        }
        let mut out = io::stdout().lock();
        writeln!(out)?;
        writeln!(out, "==> {}", title)
    }

    /// Print progress message
    pub fn progress(&self, message: &str) -> io::Result<()> {
        log::info!("{}", message);
        if self.quiet {
            return Ok(());
        }
        writeln!(io::stdout().lock(), "    {}", message)
    }

    /// Print success message if not in quiet mode
    pub fn success(&self, message: &str) -> io::Result<()> {
        log::info!("✓ {}", message);
        if self.quiet {
            return Ok(());
        }
        writeln!(io::stdout().lock(), "  ✓ {}", message)
    }

    /// Print warning message (never suppressed)
    pub fn warn(&self, message: &str) -> io::Result<()> {
        log::warn!("{}", message);
        writeln!(io::stderr().lock(), "  ! warning: {}", message)
    }

    /// Print indented text
    pub fn indent(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(io::stdout().lock(), "      {}", message)
    }
}

// Broken pipes on the terminal must not abort a half-finished install.
impl Reporter for OutputManager {
    fn section(&self, title: &str) {
        let _ = OutputManager::section(self, title);
    }
    fn progress(&self, message: &str) {
        let _ = OutputManager::progress(self, message);
    }
    fn success(&self, message: &str) {
        let _ = OutputManager::success(self, message);
    }
    fn warn(&self, message: &str) {
        let _ = OutputManager::warn(self, message);
    }
}
