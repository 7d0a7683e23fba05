//! Command line argument parsing and validation.

use clap::{ArgAction, Parser, builder::FalseyValueParser};
use std::path::PathBuf;

use crate::provision::{SettingsBuilder, Variant, settings::defaults};

/// Installs the Adventure Game Studio editor on macOS under Wine
#[derive(Parser, Debug, Default)]
#[command(
    name = "ags_provision",
    version,
    about = "Installs the Adventure Game Studio editor on macOS under Wine",
    long_about = "Installs Homebrew, Wine, winetricks and the .NET runtime, downloads the AGS editor release and installs it.

Variants:
  basic     plain install directory under the install root
  bundle    AGS Editor.app with launcher, Info.plist and icon (default)
  advanced  bundle plus the native engine built from source

Every run deletes and recreates the install target.

Exit code 0 = every fatal stage succeeded."
)]
pub struct Args {
    /// What to install
    #[arg(long, value_enum, env = "AGS_VARIANT", value_name = "VARIANT")]
    pub variant: Option<Variant>,

    /// Skip the confirmation prompt
    #[arg(
        short = 'y',
        long = "yes",
        env = defaults::SKIP_CONFIRM_ENV,
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    pub yes: bool,

    /// Configuration file (default: <config dir>/ags-provision/config.toml)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Only print warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        match &self.config {
            Some(path) if path.as_os_str().is_empty() => {
                Err("Config path cannot be empty".to_string())
            }
            _ => Ok(()),
        }
    }

    /// Builder seeded with the values given on the command line or in the
    /// environment. File values are merged in afterwards and only fill gaps.
    pub fn settings_builder(&self) -> SettingsBuilder {
        let mut builder = SettingsBuilder::new();
        if let Some(variant) = self.variant {
            builder = builder.variant(variant);
        }
        if self.yes {
            builder = builder.skip_confirm(true);
        }
        builder
    }
}
