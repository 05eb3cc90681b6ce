//! Mask-driven alpha blending of a color pair

use crate::io::configuration::PATCH_CHANNELS;
use crate::spatial::raster::{Mask, Patch};
use crate::synthesis::palette::ColorPair;
use ndarray::{Array3, Axis};

/// Blend `mask * background + (1 - mask) * foreground` per pixel
///
/// Values are not clamped; a blurred or out-of-range mask passes through.
pub fn colorize(mask: &Mask, colors: &ColorPair) -> Patch {
    let (rows, cols) = mask.dim();
    let mut patch = Array3::zeros((rows, cols, PATCH_CHANNELS));

    for (mut pixel, &m) in patch.lanes_mut(Axis(2)).into_iter().zip(mask.iter()) {
        for ((out, &bg), &fg) in pixel
            .iter_mut()
            .zip(&colors.background)
            .zip(&colors.foreground)
        {
            *out = m.mul_add(bg, (1.0 - m) * fg);
        }
    }

    patch
}
