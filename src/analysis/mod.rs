//! Analysis of generated patches: Bayer mosaicking and quality metrics

/// Image quality metrics (MSE, PSNR, zipper ratio)
pub mod metrics;
/// Bayer color filter array simulation
pub mod mosaic;
