//! Additive Gaussian noise with optional spatial correlation

use crate::io::configuration::{MAX_BLUR_SIGMA, NOISE_MAX_AMPLITUDE, PATCH_CHANNELS};
use crate::math::random::RandomSource;
use crate::spatial::geometry::gaussian_blur_channels;
use crate::spatial::raster::Patch;
use ndarray::Array3;

/// Sampled noise settings for one patch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseParams {
    /// One field shared by all channels instead of one per channel
    pub monochromatic: bool,
    /// Standard deviation of the added noise
    pub amplitude: f32,
    /// Gaussian blur sigma applied to the noise field (0 disables)
    pub blur_sigma: u32,
}

impl NoiseParams {
    /// Draw the monochromatic flag, amplitude and blur sigma in that order
    pub fn sample(rng: &mut RandomSource) -> Self {
        let monochromatic = rng.below(2) == 1;
        let amplitude = (rng.uniform() * NOISE_MAX_AMPLITUDE) as f32;
        let blur_sigma = rng.below(MAX_BLUR_SIGMA + 1);
        Self {
            monochromatic,
            amplitude,
            blur_sigma,
        }
    }

    /// Number of independent noise fields
    pub const fn field_channels(&self) -> usize {
        if self.monochromatic {
            1
        } else {
            PATCH_CHANNELS
        }
    }
}

/// Standard-normal field shaped `(rows, cols, channels)`, filled row-major
pub fn normal_field(
    rng: &mut RandomSource,
    rows: usize,
    cols: usize,
    channels: usize,
) -> Array3<f32> {
    let mut field = Array3::zeros((rows, cols, channels));
    for value in &mut field {
        *value = rng.normal() as f32;
    }
    field
}

/// Add `amplitude * field` to a patch and clamp every value to `[0, 1]`
///
/// A single-channel field is broadcast to all patch channels.
pub fn apply_noise(patch: &mut Patch, field: &Array3<f32>, amplitude: f32) {
    let single = field.dim().2 == 1;
    for ((row, col, channel), value) in patch.indexed_iter_mut() {
        let source = if single { 0 } else { channel };
        let n = field.get((row, col, source)).copied().unwrap_or(0.0);
        *value = amplitude.mul_add(n, *value).clamp(0.0, 1.0);
    }
}

/// Synthesize, blur and add a noise field as described by `params`
pub fn add_noise(patch: &mut Patch, params: &NoiseParams, rng: &mut RandomSource) {
    let (rows, cols, _) = patch.dim();
    let mut field = normal_field(rng, rows, cols, params.field_channels());
    if params.blur_sigma > 0 {
        field = gaussian_blur_channels(&field, params.blur_sigma as f32);
    }
    apply_noise(patch, &field, params.amplitude);
}
