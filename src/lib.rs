//! Procedural generator of synthetic image patches for training and evaluating image restoration models
//!
//! Patches are square, 3-channel and floating point in `[0, 1]`. Each one shows a
//! chirped sine grating, a rotated stroke or an ellipse, blended between a sampled
//! foreground/background color pair and corrupted with Gaussian noise. Generation is
//! fully determined by the generator's seed.

#![forbid(unsafe_code)]

/// Bayer mosaicking and image quality metrics
pub mod analysis;
/// Input/output operations, configuration and error handling
pub mod io;
/// Random source and colorspace conversions
pub mod math;
/// Raster types and geometry utilities
pub mod spatial;
/// Mask synthesis, colorization, noise, color augmentation and the patch generator
pub mod synthesis;

pub use io::error::{PatchError, Result};
pub use spatial::{Mask, Patch, PatchBatch};
pub use synthesis::{PatchGenerator, PatchKind, PatchSample};
