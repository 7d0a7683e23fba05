//! Stage orchestration and shared helpers.
//!
//! - [`orchestrator`] - the [`Provisioner`] that runs the stages in order
//! - [`checksum`] - SHA-256 verification of downloaded assets
//! - [`signing`] - quarantine removal and ad-hoc signing of the bundle
//! - [`tool_detection`] - candidate-then-`PATH` executable resolution

pub mod checksum;
pub mod orchestrator;
pub mod signing;
pub mod tool_detection;

pub use orchestrator::{InstallReport, Provisioner};
pub use tool_detection::resolve_executable;
