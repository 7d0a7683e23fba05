//! Launcher script for `Contents/MacOS`.
//!
//! The script resolves Wine when the app starts rather than baking in the
//! path found at install time, so a bundle copied to another Mac still
//! works with that machine's Wine install. Resolution order matches
//! [`locate_runtime`](crate::provision::stages::compat::locate_runtime).

use std::path::Path;

use handlebars::Handlebars;
use serde::Serialize;

use crate::provision::{Result, settings::defaults, utils::fs};

const LAUNCHER_TEMPLATE: &str = r#"#!/bin/sh
# {{app_name}} launcher, generated by ags_provision.
RESOURCES="$(cd "$(dirname "$0")/../Resources" && pwd)"
APP_DIR="$RESOURCES/{{app_dir}}"

WINE=""
for candidate in{{#each candidates}} "{{this}}"{{/each}}; do
    if [ -x "$candidate" ]; then
        WINE="$candidate"
        break
    fi
done

if [ -z "$WINE" ]; then
    for name in{{#each names}} {{this}}{{/each}}; do
        if found="$(command -v "$name" 2>/dev/null)"; then
            WINE="$found"
            break
        fi
    done
fi

if [ -z "$WINE" ]; then
    osascript -e 'display dialog "Wine was not found. Install it with: brew install --cask {{wine_cask}}" with title "{{app_name}}" buttons {"OK"} with icon stop' >/dev/null 2>&1
    echo "{{app_name}}: Wine was not found" >&2
    exit 1
fi
{{#if wine_prefix}}
export WINEPREFIX="{{wine_prefix}}"
{{/if}}
cd "$APP_DIR" || exit 1
exec "$WINE" "$APP_DIR/{{entry_point}}" "$@"
"#;

#[derive(Serialize)]
struct LauncherData<'a> {
    app_name: &'a str,
    app_dir: &'a str,
    entry_point: &'a str,
    candidates: Vec<String>,
    names: &'a [&'a str],
    wine_cask: &'a str,
    wine_prefix: Option<String>,
}

/// Renders the launcher script.
///
/// `entry_point` is relative to `Contents/Resources/ags`.
pub fn render_launcher(app_name: &str, entry_point: &str, wine_prefix: Option<&Path>) -> Result<String> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);

    let data = LauncherData {
        app_name,
        app_dir: "ags",
        entry_point,
        candidates: defaults::runtime_candidates()
            .iter()
            .map(|p| p.display().to_string())
            .collect(),
        names: defaults::RUNTIME_NAMES,
        wine_cask: defaults::WINE_CASK,
        wine_prefix: wine_prefix.map(|p| p.display().to_string()),
    };

    Ok(handlebars.render_template(LAUNCHER_TEMPLATE, &data)?)
}

/// Writes the launcher to `path` and marks it executable.
pub async fn write_launcher(
    path: &Path,
    app_name: &str,
    entry_point: &str,
    wine_prefix: Option<&Path>,
) -> Result<()> {
    let script = render_launcher(app_name, entry_point, wine_prefix)?;
    fs::write_new(path, script.as_bytes()).await?;
    fs::make_executable(path).await
}
