//! Color augmentations applied to finished patches
//!
//! Each random variant draws its decision first and its parameters second,
//! so two sources with the same seed make the same choices.

use crate::io::configuration::{HSV_JITTER_RANGE, PATCH_CHANNELS};
use crate::io::error::{Result, invalid_parameter};
use crate::math::color::{hsv_to_rgb, map_pixels, rgb_to_hsv};
use crate::math::random::RandomSource;
use crate::spatial::raster::Patch;
use ndarray::Axis;

/// Per-patch HSV offsets
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HsvJitter {
    /// Hue rotation as a fraction of a full turn, in `[0, 1)`
    pub hue_shift: f32,
    /// Added to saturation before clamping
    pub saturation_offset: f32,
    /// Added to value before clamping
    pub value_offset: f32,
}

impl HsvJitter {
    /// Draw hue, saturation and value offsets in that order
    pub fn sample(rng: &mut RandomSource) -> Self {
        let hue_shift = rng.uniform() as f32;
        let saturation_offset = symmetric(rng, HSV_JITTER_RANGE);
        let value_offset = symmetric(rng, HSV_JITTER_RANGE);
        Self {
            hue_shift,
            saturation_offset,
            value_offset,
        }
    }
}

fn symmetric(rng: &mut RandomSource, range: f64) -> f32 {
    rng.uniform().mul_add(2.0 * range, -range) as f32
}

fn check_ratio(ratio: f64) -> Result<()> {
    if (0.0..=1.0).contains(&ratio) {
        Ok(())
    } else {
        Err(invalid_parameter(
            "ratio",
            &ratio,
            &"probability must lie in [0, 1]",
        ))
    }
}

fn check_channels(patch: &Patch) -> Result<()> {
    let channels = patch.dim().2;
    if channels == PATCH_CHANNELS {
        Ok(())
    } else {
        Err(invalid_parameter(
            "patch",
            &channels,
            &"augmentations need exactly 3 channels",
        ))
    }
}

/// Rotate hue and offset saturation and value of every pixel
///
/// Hue wraps around; saturation and value are clamped to `[0, 1]`.
///
/// # Errors
///
/// Returns an error if the patch does not have exactly 3 channels
pub fn jitter_hsv(patch: &Patch, jitter: &HsvJitter) -> Result<Patch> {
    map_pixels(patch, |rgb| {
        let [hue, saturation, value] = rgb_to_hsv(rgb);
        hsv_to_rgb([
            jitter.hue_shift.mul_add(360.0, hue).rem_euclid(360.0),
            (saturation + jitter.saturation_offset).clamp(0.0, 1.0),
            (value + jitter.value_offset).clamp(0.0, 1.0),
        ])
    })
}

/// Draw a jitter and apply it
///
/// # Errors
///
/// Returns an error if the patch does not have exactly 3 channels
pub fn random_jitter_hsv(patch: &Patch, rng: &mut RandomSource) -> Result<(Patch, HsvJitter)> {
    let jitter = HsvJitter::sample(rng);
    jitter_hsv(patch, &jitter).map(|out| (out, jitter))
}

/// Move input channel `c` to output channel `order[c]`
///
/// # Errors
///
/// Returns an error if `order` is not a permutation of `0..3` or the patch
/// does not have exactly 3 channels
pub fn permute_channels(patch: &Patch, order: [usize; 3]) -> Result<Patch> {
    check_channels(patch)?;
    let mut seen = [false; 3];
    for &target in &order {
        match seen.get_mut(target) {
            Some(flag) if !*flag => *flag = true,
            _ => {
                return Err(invalid_parameter(
                    "order",
                    &format!("{order:?}"),
                    &"channel order must be a permutation of 0, 1, 2",
                ));
            }
        }
    }

    let mut out = patch.clone();
    for (source, &target) in order.iter().enumerate() {
        out.index_axis_mut(Axis(2), target)
            .assign(&patch.index_axis(Axis(2), source));
    }
    Ok(out)
}

/// Uniformly random channel order (Fisher-Yates on the random source)
pub fn sample_permutation(rng: &mut RandomSource) -> [usize; 3] {
    let mut order = [0, 1, 2];
    for i in (1..order.len()).rev() {
        let j = rng.below(i as u32 + 1) as usize;
        order.swap(i, j);
    }
    order
}

/// With probability `ratio`, shuffle the channels of a patch
///
/// Returns the order applied, or `None` when the patch was left unchanged.
///
/// # Errors
///
/// Returns an error if `ratio` is outside `[0, 1]` or the patch does not
/// have exactly 3 channels
pub fn random_permute(
    patch: &Patch,
    rng: &mut RandomSource,
    ratio: f64,
) -> Result<(Patch, Option<[usize; 3]>)> {
    check_ratio(ratio)?;
    check_channels(patch)?;
    if rng.uniform() < ratio {
        let order = sample_permutation(rng);
        permute_channels(patch, order).map(|out| (out, Some(order)))
    } else {
        Ok((patch.clone(), None))
    }
}

/// Zero one channel of a patch
///
/// # Errors
///
/// Returns an error if `channel` is not a channel of the patch
pub fn kill_channel(patch: &Patch, channel: usize) -> Result<Patch> {
    let channels = patch.dim().2;
    if channel >= channels {
        return Err(invalid_parameter(
            "channel",
            &channel,
            &format!("patch has {channels} channels"),
        ));
    }
    let mut out = patch.clone();
    out.index_axis_mut(Axis(2), channel).fill(0.0);
    Ok(out)
}

/// With probability `ratio`, zero a uniformly chosen channel
///
/// Returns the channel that was zeroed, or `None` when the patch was left
/// unchanged.
///
/// # Errors
///
/// Returns an error if `ratio` is outside `[0, 1]` or the patch does not
/// have exactly 3 channels
pub fn random_kill(
    patch: &Patch,
    rng: &mut RandomSource,
    ratio: f64,
) -> Result<(Patch, Option<usize>)> {
    check_ratio(ratio)?;
    check_channels(patch)?;
    if rng.uniform() < ratio {
        let channel = rng.below(PATCH_CHANNELS as u32) as usize;
        kill_channel(patch, channel).map(|out| (out, Some(channel)))
    } else {
        Ok((patch.clone(), None))
    }
}
