//! Generation constants and runtime configuration defaults

// Sine grating chirp: the period shrinks from the start to the end value
/// Period in pixels of the grating at the origin
pub const SINE_START_PERIOD: f32 = 64.0;
/// Period in pixels the grating approaches at the far corner
pub const SINE_END_PERIOD: f32 = 4.0;

/// Orientation angles are drawn uniformly from `[0, ANGLE_RANGE_DEGREES)`
pub const ANGLE_RANGE_DEGREES: f64 = 180.0;
/// Snapped angles are rounded to a multiple of this value
pub const ANGLE_SNAP_DEGREES: f32 = 45.0;

/// Widest stroke in pixels (widths are drawn from `1..=STROKE_MAX_WIDTH`)
pub const STROKE_MAX_WIDTH: u32 = 8;

/// Largest blur sigma drawn for masks and noise fields (inclusive)
pub const MAX_BLUR_SIGMA: u32 = 8;

/// Upper bound (exclusive) of the noise amplitude
pub const NOISE_MAX_AMPLITUDE: f64 = 0.1;

/// Half-width of a Gaussian kernel in multiples of sigma
pub const GAUSSIAN_KERNEL_SPAN: f32 = 4.0;

/// Angular step used to trace ellipse outlines
pub const ELLIPSE_STEP_DEGREES: usize = 1;

/// Saturation and value jitter offsets are drawn from `[-range, range)`
pub const HSV_JITTER_RANGE: f64 = 0.3;

/// Contrast increase counted as a zipper artifact (JND in Lab units)
pub const ZIPPER_THRESHOLD: f64 = 2.3;

/// Number of channels in every patch
pub const PATCH_CHANNELS: usize = 3;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed patch edge length
pub const MAX_PATCH_SIZE: usize = 10_000;
/// Maximum number of `f32` values in one generated batch (1 GiB)
pub const MAX_BATCH_VALUES: usize = 1 << 28;

// Default values for configurable parameters
/// Default patch edge length for the CLI
pub const DEFAULT_PATCH_SIZE: usize = 64;
/// Default number of patches written by the CLI
pub const DEFAULT_PATCH_COUNT: usize = 16;

// Output settings
/// Extension of written patches
pub const OUTPUT_EXTENSION: &str = "png";
/// Suffix added to mosaic companion filenames
pub const MOSAIC_SUFFIX: &str = "_mosaic";
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
