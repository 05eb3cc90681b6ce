//! Procedural patch synthesis: masks, colors, noise and the generator that chains them

/// HSV jitter, channel permutation and channel dropout
pub mod augment;
/// Mask-driven alpha blending
pub mod colorize;
/// Patch generator and sampled-parameter records
pub mod generator;
/// Sine, stroke and ellipse mask strategies
pub mod masks;
/// Additive Gaussian noise injection
pub mod noise;
/// Foreground/background color pair sampling
pub mod palette;

pub use generator::{PatchGenerator, PatchSample};
pub use masks::{MaskShape, PatchKind};
