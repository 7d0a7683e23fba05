//! Configuration structures for provisioning.
//!
//! [`Settings`] is immutable once built and is passed explicitly to every
//! stage. Values come from CLI flags, environment, an optional TOML file and
//! the constants in [`defaults`].

mod artifact;
mod builder;
mod core;
pub mod defaults;
mod file;
mod variant;

pub use artifact::{ArchiveFormat, EngineSource, IconSource, ReleaseArtifact};
pub use builder::SettingsBuilder;
pub use self::core::Settings;
pub use file::FileConfig;
pub use variant::Variant;
