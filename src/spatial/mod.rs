//! Spatial data structures and raster manipulation
//!
//! This module contains spatial-related functionality including:
//! - Patch, mask and batch raster types
//! - Rotation, blur and shape drawing on masks

/// Rectangle fills, rotation, Gaussian blur and ellipse drawing
pub mod geometry;
/// Raster type aliases and construction helpers
pub mod raster;

pub use raster::{Mask, Patch, PatchBatch};
