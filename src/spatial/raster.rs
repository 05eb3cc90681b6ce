//! Raster types shared by synthesis, analysis and I/O
//!
//! Patches are stored row-major as `(rows, cols, channels)` so a pixel's
//! channels are contiguous; masks are single-channel `(rows, cols)` grids.

use crate::io::configuration::{MAX_BATCH_VALUES, MAX_PATCH_SIZE, PATCH_CHANNELS};
use crate::io::error::{Result, invalid_parameter};
use ndarray::{Array2, Array3, Array4, ArrayBase, ArrayView3, Axis, Data, Ix3};

/// Square 3-channel floating-point image
pub type Patch = Array3<f32>;

/// Single-channel blend weight grid
pub type Mask = Array2<f32>;

/// Stack of patches shaped `(count, rows, cols, channels)`
pub type PatchBatch = Array4<f32>;

/// Check a requested patch edge length
///
/// # Errors
///
/// Returns an error if the size is zero or exceeds [`MAX_PATCH_SIZE`]
pub fn validate_size(size: usize) -> Result<()> {
    if size == 0 {
        return Err(invalid_parameter(
            "size",
            &size,
            &"patch edge length must be positive",
        ));
    }
    if size > MAX_PATCH_SIZE {
        return Err(invalid_parameter(
            "size",
            &size,
            &format!("patch edge length must not exceed {MAX_PATCH_SIZE}"),
        ));
    }
    Ok(())
}

/// Check that a batch of `count` patches of edge `size` fits the value limit
///
/// # Errors
///
/// Returns an error if the size is invalid or the batch would hold more than
/// [`MAX_BATCH_VALUES`] values
pub fn validate_batch(count: usize, size: usize) -> Result<()> {
    validate_size(size)?;
    let values = size
        .checked_mul(size)
        .and_then(|pixels| pixels.checked_mul(PATCH_CHANNELS))
        .and_then(|per_patch| per_patch.checked_mul(count));
    match values {
        Some(n) if n <= MAX_BATCH_VALUES => Ok(()),
        _ => Err(invalid_parameter(
            "count",
            &count,
            &format!("batch of {size}x{size} patches must not exceed {MAX_BATCH_VALUES} values"),
        )),
    }
}

/// Create a patch with every pixel set to one color
pub fn solid_patch(rows: usize, cols: usize, color: [f32; 3]) -> Patch {
    Array3::from_shape_fn((rows, cols, PATCH_CHANNELS), |(_, _, c)| {
        color.get(c).copied().unwrap_or(0.0)
    })
}

/// Read one pixel as an RGB triple
pub fn pixel<S: Data<Elem = f32>>(patch: &ArrayBase<S, Ix3>, row: usize, col: usize) -> [f32; 3] {
    let mut out = [0.0; 3];
    for (c, value) in out.iter_mut().enumerate() {
        *value = patch.get((row, col, c)).copied().unwrap_or(0.0);
    }
    out
}

/// Stack equally shaped patches into a batch
///
/// # Errors
///
/// Returns an error if the patches do not share one shape
pub fn stack_patches(patches: &[Patch]) -> Result<PatchBatch> {
    let views: Vec<ArrayView3<'_, f32>> = patches.iter().map(Array3::view).collect();
    if views.is_empty() {
        return Ok(Array4::zeros((0, 0, 0, PATCH_CHANNELS)));
    }
    ndarray::stack(Axis(0), &views).map_err(|e| {
        invalid_parameter("patches", &patches.len(), &format!("cannot stack: {e}"))
    })
}
