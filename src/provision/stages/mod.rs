//! Pipeline stages, one module each.

pub mod compat;
pub mod extract;
pub mod fetch;
pub mod native_build;
pub mod package_manager;
pub mod runtime;

pub use compat::{CompatRuntime, ensure_compatibility_layer};
pub use fetch::{FetchedRelease, fetch_release};
pub use native_build::build_engine;
pub use package_manager::{Package, PackageKind, PackageManager, ensure_package_manager};
pub use runtime::install_runtime_framework;
