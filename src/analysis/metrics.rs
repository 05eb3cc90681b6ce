//! Image quality metrics: mean squared error, PSNR and the zipper artifact ratio

use crate::io::configuration::ZIPPER_THRESHOLD;
use crate::io::error::{Result, invalid_parameter, shape_mismatch};
use crate::math::color::patch_srgb_to_lab;
use crate::spatial::raster::PatchBatch;
use ndarray::{ArrayBase, ArrayView3, Axis, Data, Ix3};

fn check_shapes<S, T>(
    operation: &'static str,
    a: &ArrayBase<S, Ix3>,
    b: &ArrayBase<T, Ix3>,
) -> Result<()>
where
    S: Data<Elem = f32>,
    T: Data<Elem = f32>,
{
    if a.shape() == b.shape() {
        Ok(())
    } else {
        Err(shape_mismatch(operation, a.shape(), b.shape()))
    }
}

/// Mean of squared differences over every value
///
/// # Errors
///
/// Returns an error if the shapes differ or the rasters are empty
pub fn mean_squared_error<S, T>(a: &ArrayBase<S, Ix3>, b: &ArrayBase<T, Ix3>) -> Result<f64>
where
    S: Data<Elem = f32>,
    T: Data<Elem = f32>,
{
    check_shapes("mean squared error", a, b)?;
    if a.is_empty() {
        return Err(invalid_parameter("raster", &0, &"raster has no values"));
    }

    let total: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(&x, &y)| {
            let d = f64::from(x) - f64::from(y);
            d * d
        })
        .sum();
    Ok(total / a.len() as f64)
}

/// Peak signal-to-noise ratio in dB for values in `[0, 1]`
///
/// Identical inputs give positive infinity.
///
/// # Errors
///
/// Returns an error if the shapes differ or the rasters are empty
pub fn psnr<S, T>(a: &ArrayBase<S, Ix3>, b: &ArrayBase<T, Ix3>) -> Result<f64>
where
    S: Data<Elem = f32>,
    T: Data<Elem = f32>,
{
    let mse = mean_squared_error(a, b)?;
    Ok(-10.0 * mse.log10())
}

/// PSNR from a Euclidean loss `sum(d^2) / (2N)`, i.e. half the MSE
pub fn psnr_from_euclidean_loss(loss: f64) -> f64 {
    -10.0 * (loss * 2.0).log10()
}

fn squared_distance(
    image: &ArrayView3<'_, f32>,
    a: (usize, usize),
    b: (usize, usize),
) -> f64 {
    let channels = image.dim().2;
    (0..channels)
        .map(|c| {
            let va = image.get((a.0, a.1, c)).copied().unwrap_or(0.0);
            let vb = image.get((b.0, b.1, c)).copied().unwrap_or(0.0);
            let d = f64::from(va) - f64::from(vb);
            d * d
        })
        .sum()
}

/// Fraction of pixels whose contrast to their most similar neighbor grew
///
/// For every interior pixel the 8-neighbor closest to it in `reference` is
/// found (first strict minimum in row-major order). The pixel counts as
/// zippered when the distance to that same neighbor in `source` exceeds the
/// reference distance by more than `threshold`. The count is divided by all
/// `rows * cols` pixels, borders included.
///
/// # Errors
///
/// Returns an error if the shapes differ or the rasters are empty
pub fn zipper_ratio<S, T>(
    source: &ArrayBase<S, Ix3>,
    reference: &ArrayBase<T, Ix3>,
    threshold: f64,
) -> Result<f64>
where
    S: Data<Elem = f32>,
    T: Data<Elem = f32>,
{
    check_shapes("zipper ratio", source, reference)?;
    let (rows, cols, _) = source.dim();
    if rows == 0 || cols == 0 {
        return Err(invalid_parameter("raster", &0, &"raster has no pixels"));
    }

    let source = source.view();
    let reference = reference.view();
    let mut zippered = 0usize;

    for y in 1..rows.saturating_sub(1) {
        for x in 1..cols.saturating_sub(1) {
            let mut min_delta = f64::MAX;
            let mut nearest = (y, x);

            for y2 in y - 1..=y + 1 {
                for x2 in x - 1..=x + 1 {
                    if y2 == y && x2 == x {
                        continue;
                    }
                    let delta = squared_distance(&reference, (y, x), (y2, x2));
                    if delta < min_delta {
                        min_delta = delta;
                        nearest = (y2, x2);
                    }
                }
            }

            let source_delta = squared_distance(&source, (y, x), nearest);
            if source_delta.sqrt() - min_delta.sqrt() > threshold {
                zippered += 1;
            }
        }
    }

    Ok(zippered as f64 / (rows * cols) as f64)
}

/// [`zipper_ratio`] on two sRGB patches measured in CIE Lab at [`ZIPPER_THRESHOLD`]
///
/// # Errors
///
/// Returns an error if the shapes differ, the patches are empty or they do not
/// have exactly 3 channels
pub fn lab_zipper_ratio<S, T>(
    source: &ArrayBase<S, Ix3>,
    reference: &ArrayBase<T, Ix3>,
) -> Result<f64>
where
    S: Data<Elem = f32>,
    T: Data<Elem = f32>,
{
    check_shapes("lab zipper ratio", source, reference)?;
    let source = patch_srgb_to_lab(source)?;
    let reference = patch_srgb_to_lab(reference)?;
    zipper_ratio(&source, &reference, ZIPPER_THRESHOLD)
}

/// Average [`zipper_ratio`] over two batches shaped `(count, rows, cols, channels)`
///
/// # Errors
///
/// Returns an error if the batch shapes differ or the batches are empty
pub fn mean_zipper_ratio(
    source: &PatchBatch,
    reference: &PatchBatch,
    threshold: f64,
) -> Result<f64> {
    if source.shape() != reference.shape() {
        return Err(shape_mismatch(
            "mean zipper ratio",
            source.shape(),
            reference.shape(),
        ));
    }
    let count = source.len_of(Axis(0));
    if count == 0 {
        return Err(invalid_parameter("batch", &count, &"batch is empty"));
    }

    let mut total = 0.0;
    for (src, refr) in source.axis_iter(Axis(0)).zip(reference.axis_iter(Axis(0))) {
        total += zipper_ratio(&src, &refr, threshold)?;
    }
    Ok(total / count as f64)
}
