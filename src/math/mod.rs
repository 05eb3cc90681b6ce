//! Mathematical utilities for patch synthesis

/// Colorspace conversions (HSV, sRGB companding)
pub mod color;
/// Seeded random source with legacy integer semantics
pub mod random;
