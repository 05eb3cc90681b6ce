//! Input/output operations, configuration and error handling

/// Command-line interface and batch writer
pub mod cli;
/// Generation constants and defaults
pub mod configuration;
/// Error types and helpers
pub mod error;
/// 8-bit raster export and import
pub mod image;
/// Progress display for batch generation
pub mod progress;
