//! Mask synthesis strategies: sine grating, stroke and ellipse
//!
//! Sampling draws every parameter of a shape from the random source up
//! front; rendering is then a pure function of the shape and patch size.
//! A mask value of 1 selects the background color, 0 the foreground.

use crate::io::configuration::{
    ANGLE_RANGE_DEGREES, ANGLE_SNAP_DEGREES, MAX_BLUR_SIGMA, SINE_END_PERIOD, SINE_START_PERIOD,
    STROKE_MAX_WIDTH,
};
use crate::io::error::PatchError;
use crate::math::random::RandomSource;
use crate::spatial::geometry::{draw_ellipse, fill_rect, gaussian_blur, rotate};
use crate::spatial::raster::Mask;
use ndarray::Array2;
use std::f32::consts::{PI, SQRT_2};
use std::fmt;
use std::str::FromStr;

/// Texture family of a generated patch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatchKind {
    /// Chirped sine grating
    Sine,
    /// Rotated straight bar
    Stroke,
    /// Filled or outlined ellipse
    Ellipse,
}

impl PatchKind {
    /// Every supported kind in generation order
    pub const ALL: [Self; 3] = [Self::Sine, Self::Stroke, Self::Ellipse];

    /// Lowercase name used in filenames and on the command line
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sine => "sine",
            Self::Stroke => "stroke",
            Self::Ellipse => "ellipse",
        }
    }
}

impl fmt::Display for PatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PatchKind {
    type Err = PatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sine" => Ok(Self::Sine),
            "stroke" => Ok(Self::Stroke),
            "ellipse" => Ok(Self::Ellipse),
            _ => Err(PatchError::UnsupportedKind {
                kind: s.to_string(),
            }),
        }
    }
}

/// Sampled parameters of an ellipse mask
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EllipseShape {
    /// Center as `(x, y)` pixel coordinates
    pub center: (i64, i64),
    /// Trace only a one-pixel outline instead of filling
    pub boundary_only: bool,
    /// Semi-axes along x and y
    pub radii: (u32, u32),
    /// Gaussian blur sigma applied to the mask (0 disables)
    pub blur_sigma: u32,
}

/// Fully sampled mask description
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaskShape {
    /// Sine grating oriented at `angle` degrees
    Sine {
        /// Orientation in degrees
        angle: f32,
    },
    /// Bar of `width` pixels rotated by `angle` degrees
    Stroke {
        /// Bar width in pixels
        width: u32,
        /// Rotation in degrees
        angle: f32,
    },
    /// Ellipse with its drawing parameters
    Ellipse(EllipseShape),
}

/// Orientation in `[0, 180)` degrees, snapped to a multiple of 45 half the time
pub fn sample_angle(rng: &mut RandomSource) -> f32 {
    let angle = (rng.uniform() * ANGLE_RANGE_DEGREES) as f32;
    if rng.coin() {
        (angle / ANGLE_SNAP_DEGREES + 0.5).floor() * ANGLE_SNAP_DEGREES
    } else {
        angle
    }
}

impl MaskShape {
    /// Draw the parameters of a mask of the given kind
    pub fn sample(kind: PatchKind, rng: &mut RandomSource, size: usize) -> Self {
        match kind {
            PatchKind::Sine => Self::Sine {
                angle: sample_angle(rng),
            },
            PatchKind::Stroke => {
                let angle = sample_angle(rng);
                let width = rng.randint(1, STROKE_MAX_WIDTH);
                Self::Stroke { width, angle }
            }
            PatchKind::Ellipse => {
                let half = (size / 2) as u32;
                let center_x = i64::from(rng.below(2) + half);
                let center_y = i64::from(rng.below(2) + half);
                let boundary_only = rng.below(2) == 1;
                let radius_x = rng.below(half);
                let radius_y = rng.below(half);
                let blur_sigma = rng.below(MAX_BLUR_SIGMA + 1);
                Self::Ellipse(EllipseShape {
                    center: (center_x, center_y),
                    boundary_only,
                    radii: (radius_x, radius_y),
                    blur_sigma,
                })
            }
        }
    }

    /// Kind this shape belongs to
    pub const fn kind(&self) -> PatchKind {
        match self {
            Self::Sine { .. } => PatchKind::Sine,
            Self::Stroke { .. } => PatchKind::Stroke,
            Self::Ellipse(_) => PatchKind::Ellipse,
        }
    }

    /// Render the `size x size` mask
    pub fn render(&self, size: usize) -> Mask {
        match *self {
            Self::Sine { angle } => sine_mask(size, angle),
            Self::Stroke { width, angle } => stroke_mask(size, width, angle),
            Self::Ellipse(shape) => ellipse_mask(size, &shape),
        }
    }
}

/// Frequency-swept sine grating
///
/// The spatial frequency starts at `2π / 64` at the origin and rises
/// linearly along the grating direction so the period approaches 4 pixels
/// at the far corner.
pub fn sine_mask(size: usize, angle: f32) -> Mask {
    let b = 2.0 * PI / SINE_START_PERIOD;
    let a = (2.0 * PI / SINE_END_PERIOD - b) / (size as f32 * SQRT_2);
    let theta = 2.0 * PI * angle / 360.0;
    let (sin, cos) = theta.sin_cos();

    Array2::from_shape_fn((size, size), |(row, col)| {
        let v = cos.mul_add(col as f32, sin * row as f32);
        0.5 + (v * a.mul_add(v, b)).sin() / 2.0
    })
}

/// Vertical bar through the center, rotated about the center
pub fn stroke_mask(size: usize, width: u32, angle: f32) -> Mask {
    let mut stroke = Mask::ones((size, size));

    let width = width as usize;
    let col_start = (size / 2).saturating_sub(width / 2);
    let col_end = (size / 2 + width).saturating_sub(width / 2);
    fill_rect(
        &mut stroke,
        size / 4..size - size / 4,
        col_start..col_end,
        0.0,
    );

    rotate(&stroke, angle)
}

/// Ellipse drawn as zeros on a background of ones, optionally blurred
pub fn ellipse_mask(size: usize, shape: &EllipseShape) -> Mask {
    let mut mask = Mask::ones((size, size));
    draw_ellipse(
        &mut mask,
        shape.center,
        shape.radii,
        !shape.boundary_only,
        0.0,
    );

    if shape.blur_sigma > 0 {
        gaussian_blur(&mask, shape.blur_sigma as f32)
    } else {
        mask
    }
}
