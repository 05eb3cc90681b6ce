//! Bayer color filter array simulation
//!
//! Sites follow the GRBG layout:
//!
//! ```text
//! G R G R
//! B G B G
//! G R G R
//! ```

use crate::io::configuration::PATCH_CHANNELS;
use crate::io::error::{Result, invalid_parameter};
use crate::math::random::RandomSource;
use crate::spatial::raster::Patch;
use ndarray::Array3;

/// Color sampled at one sensor site
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BayerSite {
    /// Red filter
    Red,
    /// Green filter
    Green,
    /// Blue filter
    Blue,
}

impl BayerSite {
    /// Channel index of this color in an RGB patch
    pub const fn channel(self) -> usize {
        match self {
            Self::Red => 0,
            Self::Green => 1,
            Self::Blue => 2,
        }
    }
}

/// Filter color at a pixel position
pub const fn bayer_site(row: usize, col: usize) -> BayerSite {
    match (row % 2, col % 2) {
        (0, 1) => BayerSite::Red,
        (1, 0) => BayerSite::Blue,
        _ => BayerSite::Green,
    }
}

/// Layout of the mosaic output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MosaicOptions {
    /// Write each sample into its own color plane instead of one shared plane
    pub separate_channels: bool,
    /// Append three 0/1 planes marking the red, green and blue sites
    pub store_pattern: bool,
}

impl MosaicOptions {
    /// Number of output channels
    pub const fn output_channels(self) -> usize {
        let data = if self.separate_channels { 3 } else { 1 };
        let pattern = if self.store_pattern { 3 } else { 0 };
        data + pattern
    }

    const fn pattern_start(self) -> usize {
        if self.separate_channels { 3 } else { 1 }
    }
}

/// Sample an RGB patch through the Bayer filter
///
/// # Errors
///
/// Returns an error if the patch does not have exactly 3 channels
pub fn mosaic(patch: &Patch, options: MosaicOptions) -> Result<Array3<f32>> {
    let (rows, cols, channels) = patch.dim();
    if channels != PATCH_CHANNELS {
        return Err(invalid_parameter(
            "patch",
            &channels,
            &"mosaic input must have 3 channels",
        ));
    }

    let mut out = Array3::zeros((rows, cols, options.output_channels()));
    for row in 0..rows {
        for col in 0..cols {
            let site = bayer_site(row, col);
            let value = patch
                .get((row, col, site.channel()))
                .copied()
                .unwrap_or(0.0);

            let plane = if options.separate_channels {
                site.channel()
            } else {
                0
            };
            if let Some(dst) = out.get_mut((row, col, plane)) {
                *dst = value;
            }

            if options.store_pattern {
                let marker = options.pattern_start() + site.channel();
                if let Some(dst) = out.get_mut((row, col, marker)) {
                    *dst = 1.0;
                }
            }
        }
    }

    Ok(out)
}

/// Shift a raster down and right by `(dx, dy)`, replicating the top and left edges
pub fn phase_shift(patch: &Array3<f32>, dx: usize, dy: usize) -> Array3<f32> {
    if dx == 0 && dy == 0 {
        return patch.clone();
    }
    Array3::from_shape_fn(patch.dim(), |(row, col, channel)| {
        patch
            .get((row.saturating_sub(dy), col.saturating_sub(dx), channel))
            .copied()
            .unwrap_or(0.0)
    })
}

/// Shift by a random 0 or 1 pixel offset in x and then y
///
/// Returns the shifted raster and the `(dx, dy)` offset that was drawn.
pub fn random_phase_shift(
    patch: &Array3<f32>,
    rng: &mut RandomSource,
) -> (Array3<f32>, (usize, usize)) {
    let dx = rng.below(2) as usize;
    let dy = rng.below(2) as usize;
    (phase_shift(patch, dx, dy), (dx, dy))
}
