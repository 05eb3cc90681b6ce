//! Foreground/background color pair sampling

use crate::math::color::{hsv_to_rgb, rgb_to_hsv};
use crate::math::random::RandomSource;

/// Colors blended by a mask
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorPair {
    /// Color where the mask is 0
    pub foreground: [f32; 3],
    /// Color where the mask is 1
    pub background: [f32; 3],
    /// Both colors share one hue and differ only in saturation and value
    pub monochrome: bool,
}

fn random_rgb(rng: &mut RandomSource) -> [f32; 3] {
    [
        rng.uniform() as f32,
        rng.uniform() as f32,
        rng.uniform() as f32,
    ]
}

/// Scale saturation and then value by independent uniform factors
pub fn retone(rgb: [f32; 3], rng: &mut RandomSource) -> [f32; 3] {
    let [hue, saturation, value] = rgb_to_hsv(rgb);
    let saturation = saturation * rng.uniform() as f32;
    let value = value * rng.uniform() as f32;
    hsv_to_rgb([hue, saturation, value])
}

impl ColorPair {
    /// Draw a color pair
    ///
    /// Half the pairs are tonal: one color is a copy of the other with its
    /// saturation and value rescaled, and a second coin decides which side
    /// gets rescaled. The other half use two independent colors.
    pub fn sample(rng: &mut RandomSource) -> Self {
        let mut foreground = random_rgb(rng);

        if rng.coin() {
            let mut background = foreground;
            if rng.coin() {
                background = retone(background, rng);
            } else {
                foreground = retone(foreground, rng);
            }
            Self {
                foreground,
                background,
                monochrome: true,
            }
        } else {
            Self {
                foreground,
                background: random_rgb(rng),
                monochrome: false,
            }
        }
    }
}
