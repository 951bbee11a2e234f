use std::path::{Path, PathBuf};

use anyhow::Context as _;
use image::{DynamicImage, ImageFormat, RgbImage, RgbaImage};

use crate::foundation::{
    core::Dimensions,
    error::{GazerError, GazerResult},
};

/// Regular files directly inside `dir`, sorted by file name.
pub fn enumerate_directory(dir: &Path) -> GazerResult<Vec<PathBuf>> {
    let rd = std::fs::read_dir(dir)
        .with_context(|| format!("list directory '{}'", dir.display()))?;

    let mut files = Vec::new();
    for entry in rd {
        let entry = entry.with_context(|| format!("read entry of '{}'", dir.display()))?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

pub fn read_image(path: &Path) -> GazerResult<DynamicImage> {
    image::open(path)
        .map_err(|e| GazerError::input(format!("open image '{}': {e}", path.display())))
}

/// Background as opaque RGB, whatever its stored pixel format.
pub fn read_background(path: &Path) -> GazerResult<RgbImage> {
    let img = read_image(path)?;
    let rgb = img.to_rgb8();
    image_dimensions(&rgb)?;
    Ok(rgb)
}

pub fn read_rgba(path: &Path) -> GazerResult<RgbaImage> {
    Ok(read_image(path)?.to_rgba8())
}

pub fn write_image(img: &DynamicImage, path: &Path) -> GazerResult<()> {
    let format = ImageFormat::from_path(path).unwrap_or(ImageFormat::Png);
    img.save_with_format(path, format)
        .map_err(|e| GazerError::resource(format!("write image '{}': {e}", path.display())))
}

/// Dimensions of a decoded image, rejecting empty rasters.
pub fn image_dimensions<I: image::GenericImageView>(img: &I) -> GazerResult<Dimensions> {
    let (width, height) = img.dimensions();
    Dimensions::new(width, height)
        .map_err(|_| GazerError::input(format!("image has empty size {width}x{height}")))
}

/// Whether `path` has an extension `image` can encode to.
pub fn has_image_extension(path: &Path) -> bool {
    ImageFormat::from_path(path).is_ok_and(|f| f.can_write())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/io.rs"]
mod tests;
