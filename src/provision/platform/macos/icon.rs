//! Bundle icon: download, verify, rasterize, pack.
//!
//! Every step is best-effort. [`install_icon`] turns any failure into a
//! warning and the bundle ships without a custom icon.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use icns::{IconFamily, IconType, PixelFormat};
use image::imageops::FilterType;

use crate::provision::{
    Context, Error, ErrorExt, FailurePolicy, Host, Result, StepOutcome,
    pipeline::checksum,
    settings::IconSource,
};

/// One raster in the icon set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IconSize {
    /// Logical size in points.
    pub points: u32,
    /// Double-density variant.
    pub retina: bool,
    icon_type: IconType,
}

impl IconSize {
    const fn new(points: u32, retina: bool, icon_type: IconType) -> Self {
        Self {
            points,
            retina,
            icon_type,
        }
    }

    /// Edge length in pixels.
    pub fn pixels(&self) -> u32 {
        if self.retina { self.points * 2 } else { self.points }
    }

    /// `icon_16x16.png`, `icon_16x16@2x.png`, ...
    pub fn file_name(&self) -> String {
        let suffix = if self.retina { "@2x" } else { "" };
        format!("icon_{0}x{0}{1}.png", self.points, suffix)
    }
}

/// The ten sizes an `.iconset` must contain.
pub const ICON_SIZES: [IconSize; 10] = [
    IconSize::new(16, false, IconType::RGBA32_16x16),
    IconSize::new(16, true, IconType::RGBA32_16x16_2x),
    IconSize::new(32, false, IconType::RGBA32_32x32),
    IconSize::new(32, true, IconType::RGBA32_32x32_2x),
    IconSize::new(128, false, IconType::RGBA32_128x128),
    IconSize::new(128, true, IconType::RGBA32_128x128_2x),
    IconSize::new(256, false, IconType::RGBA32_256x256),
    IconSize::new(256, true, IconType::RGBA32_256x256_2x),
    IconSize::new(512, false, IconType::RGBA32_512x512),
    IconSize::new(512, true, IconType::RGBA32_512x512_2x),
];

/// Renders every size of `source` into `iconset` and packs them into `dest`.
pub fn build_icns(source: &Path, iconset: &Path, dest: &Path) -> Result<()> {
    let image = image::open(source)?;
    std::fs::create_dir_all(iconset).fs_context("creating iconset directory", iconset)?;

    let mut family = IconFamily::new();
    for size in ICON_SIZES {
        let px = size.pixels();
        let raster = image.resize_exact(px, px, FilterType::Lanczos3).to_rgba8();
        raster.save(iconset.join(size.file_name()))?;

        let icon = icns::Image::from_data(PixelFormat::RGBA, px, px, raster.into_raw())
            .fs_context("encoding icon raster", iconset)?;
        family
            .add_icon_with_type(&icon, size.icon_type)
            .fs_context("adding icon to family", iconset)?;
    }

    let file = File::create(dest).fs_context("creating icon file", dest)?;
    family
        .write(BufWriter::new(file))
        .fs_context("writing icon file", dest)?;
    Ok(())
}

/// Downloads, verifies and packs the icon into `dest`.
pub async fn fetch_icon(host: &Host<'_>, icon: &IconSource, dest: &Path) -> Result<()> {
    let workdir = tempfile::Builder::new()
        .prefix("ags-icon-")
        .tempdir()
        .map_err(Error::IoError)?;
    let source = workdir.path().join("source.png");

    host.transport.download(&icon.url, &source).await?;
    checksum::verify_sha256(&source, &icon.sha256).await?;

    let iconset: PathBuf = workdir.path().join("AppIcon.iconset");
    let dest = dest.to_path_buf();
    tokio::task::spawn_blocking(move || build_icns(&source, &iconset, &dest))
        .await
        .context("icon conversion task")??;
    Ok(())
}

/// Installs the bundle icon, warning instead of failing.
///
/// Returns `true` when `dest` was written.
pub async fn install_icon(host: &Host<'_>, icon: &IconSource, dest: &Path) -> Result<bool> {
    host.reporter.progress("Generating application icon...");
    let result = fetch_icon(host, icon, dest).await;
    if result.is_err() && dest.exists() {
        let _ = tokio::fs::remove_file(dest).await;
    }
    StepOutcome::from_result(result, FailurePolicy::Warn).settle("icon generation", host.reporter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_names() {
        let names: Vec<String> = ICON_SIZES.iter().map(IconSize::file_name).collect();
        assert_eq!(names[0], "icon_16x16.png");
        assert_eq!(names[1], "icon_16x16@2x.png");
        assert_eq!(names[9], "icon_512x512@2x.png");
        assert_eq!(ICON_SIZES[9].pixels(), 1024);
    }

    #[test]
    fn packs_all_sizes() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.png");
        image::RgbaImage::from_pixel(64, 64, image::Rgba([200, 40, 40, 255]))
            .save(&source)
            .unwrap();

        let iconset = dir.path().join("AppIcon.iconset");
        let dest = dir.path().join("AppIcon.icns");
        build_icns(&source, &iconset, &dest).unwrap();

        assert_eq!(std::fs::read_dir(&iconset).unwrap().count(), 10);
        let family = IconFamily::read(File::open(&dest).unwrap()).unwrap();
        assert_eq!(family.available_icons().len(), 10);
    }

    #[test]
    fn unreadable_source_fails() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.png");
        std::fs::write(&source, b"not an image").unwrap();
        assert!(build_icns(&source, &dir.path().join("set"), &dir.path().join("x.icns")).is_err());
    }
}
