//! 8-bit raster export and import of patches
//!
//! The output format is chosen by the `image` crate from the file extension.

use crate::io::configuration::PATCH_CHANNELS;
use crate::io::error::{PatchError, Result, invalid_parameter};
use crate::spatial::raster::Patch;
use image::{GrayImage, Luma, Rgb, RgbImage};
use ndarray::{Array2, Array3};
use std::path::Path;

/// Quantize a value in `[0, 1]` to a byte, rounding to nearest
pub fn to_byte(value: f32) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Convert a patch to an 8-bit RGB image
///
/// # Errors
///
/// Returns an error if the patch does not have 3 channels or is too large
pub fn to_rgb8(patch: &Patch) -> Result<RgbImage> {
    let (rows, cols, channels) = patch.dim();
    if channels != PATCH_CHANNELS {
        return Err(invalid_parameter(
            "patch",
            &channels,
            &"only 3-channel patches can be written as RGB",
        ));
    }
    let width = u32::try_from(cols).map_err(|e| invalid_parameter("cols", &cols, &e))?;
    let height = u32::try_from(rows).map_err(|e| invalid_parameter("rows", &rows, &e))?;

    Ok(RgbImage::from_fn(width, height, |x, y| {
        let (row, col) = (y as usize, x as usize);
        let mut rgb = [0u8; 3];
        for (c, byte) in rgb.iter_mut().enumerate() {
            *byte = to_byte(patch.get((row, col, c)).copied().unwrap_or(0.0));
        }
        Rgb(rgb)
    }))
}

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|e| PatchError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })
        }
        _ => Ok(()),
    }
}

/// Write a patch as an 8-bit RGB image
///
/// # Errors
///
/// Returns an error if:
/// - The patch does not have 3 channels
/// - The parent directory cannot be created
/// - The image cannot be encoded or saved to the specified path
pub fn persist<P: AsRef<Path>>(patch: &Patch, path: P) -> Result<()> {
    let path = path.as_ref();
    let img = to_rgb8(patch)?;
    ensure_parent(path)?;
    img.save(path).map_err(|e| PatchError::ImageExport {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write a single-channel plane as an 8-bit grayscale image
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the image
/// cannot be saved
pub fn persist_plane<P: AsRef<Path>>(plane: &Array2<f32>, path: P) -> Result<()> {
    let path = path.as_ref();
    let (rows, cols) = plane.dim();
    let width = u32::try_from(cols).map_err(|e| invalid_parameter("cols", &cols, &e))?;
    let height = u32::try_from(rows).map_err(|e| invalid_parameter("rows", &rows, &e))?;

    let img = GrayImage::from_fn(width, height, |x, y| {
        Luma([to_byte(
            plane
                .get((y as usize, x as usize))
                .copied()
                .unwrap_or(0.0),
        )])
    });

    ensure_parent(path)?;
    img.save(path).map_err(|e| PatchError::ImageExport {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load any raster image as a patch with values in `[0, 1]`
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded
pub fn load_patch<P: AsRef<Path>>(path: P) -> Result<Patch> {
    let path_buf = path.as_ref().to_path_buf();
    let img = image::open(&path_buf).map_err(|e| PatchError::ImageLoad {
        path: path_buf,
        source: e,
    })?;
    let rgb = img.to_rgb8();

    let (width, height) = (rgb.width() as usize, rgb.height() as usize);
    let mut patch = Array3::zeros((height, width, PATCH_CHANNELS));
    for (x, y, pixel) in rgb.enumerate_pixels() {
        for (c, &byte) in pixel.0.iter().enumerate() {
            if let Some(value) = patch.get_mut((y as usize, x as usize, c)) {
                *value = f32::from(byte) / 255.0;
            }
        }
    }
    Ok(patch)
}
