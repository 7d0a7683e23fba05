//! Installation variants.

use std::fmt;

/// Which parts of the pipeline run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Dependencies plus the extracted release in a plain directory.
    Basic,
    /// As `basic`, packaged as a launchable `.app` bundle.
    #[default]
    Bundle,
    /// As `bundle`, plus the engine compiled from source.
    Advanced,
}

impl Variant {
    /// True when an `.app` bundle is produced.
    pub fn assembles_bundle(self) -> bool {
        matches!(self, Variant::Bundle | Variant::Advanced)
    }

    /// True when the engine is built from source.
    pub fn builds_engine(self) -> bool {
        matches!(self, Variant::Advanced)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Variant::Basic => "basic",
            Variant::Bundle => "bundle",
            Variant::Advanced => "advanced",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capabilities_nest() {
        assert!(!Variant::Basic.assembles_bundle());
        assert!(Variant::Bundle.assembles_bundle());
        assert!(!Variant::Bundle.builds_engine());
        assert!(Variant::Advanced.assembles_bundle() && Variant::Advanced.builds_engine());
    }
}
