//! Procedural patch generator
//!
//! Each call runs the full pipeline on the generator's own random stream:
//!
//! 1. mask shape parameters (sine: angle, snap coin; stroke: angle, snap
//!    coin, width; ellipse: center x, center y, boundary flag, two radii,
//!    blur sigma)
//! 2. color pair
//! 3. noise parameters, then the noise field itself
//!
//! Two generators built from the same seed and fed the same sequence of
//! calls therefore produce identical patches.

use crate::io::configuration::PATCH_CHANNELS;
use crate::io::error::Result;
use crate::math::random::RandomSource;
use crate::spatial::raster::{Patch, PatchBatch, validate_batch, validate_size};
use crate::synthesis::colorize::colorize;
use crate::synthesis::masks::{MaskShape, PatchKind};
use crate::synthesis::noise::{NoiseParams, add_noise};
use crate::synthesis::palette::ColorPair;
use ndarray::{Array4, Axis};

/// A generated patch with the parameters that produced it
#[derive(Debug, Clone)]
pub struct PatchSample {
    /// Sampled mask shape (also identifies the kind)
    pub shape: MaskShape,
    /// Sampled color pair
    pub colors: ColorPair,
    /// Sampled noise settings
    pub noise: NoiseParams,
    /// Final patch shaped `(size, size, 3)` with values in `[0, 1]`
    pub patch: Patch,
}

impl PatchSample {
    /// Kind of the generated texture
    pub const fn kind(&self) -> PatchKind {
        self.shape.kind()
    }
}

/// Synthetic patch generator owning one random stream
#[derive(Debug, Clone)]
pub struct PatchGenerator {
    rng: RandomSource,
}

impl PatchGenerator {
    /// Create a deterministic generator
    pub fn new(seed: u64) -> Self {
        Self::with_source(RandomSource::new(seed))
    }

    /// Create a generator from an optional seed, using OS entropy when absent
    pub fn seeded(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::new)
    }

    /// Create a generator seeded from the operating system entropy pool
    pub fn from_entropy() -> Self {
        Self::with_source(RandomSource::from_entropy())
    }

    /// Create a generator around an existing random source
    pub const fn with_source(rng: RandomSource) -> Self {
        Self { rng }
    }

    /// Access the underlying random stream
    pub const fn source_mut(&mut self) -> &mut RandomSource {
        &mut self.rng
    }

    /// Generate one patch of the given kind and edge length
    ///
    /// # Errors
    ///
    /// Returns an error if `size` is zero or larger than the allowed maximum.
    /// No random draws are consumed in that case.
    pub fn generate(&mut self, kind: PatchKind, size: usize) -> Result<Patch> {
        self.generate_sample(kind, size).map(|sample| sample.patch)
    }

    /// Generate one patch from a kind name such as `"sine"`
    ///
    /// # Errors
    ///
    /// Returns an error if the name is not a supported kind or the size is invalid
    pub fn generate_named(&mut self, kind: &str, size: usize) -> Result<Patch> {
        let kind: PatchKind = kind.parse()?;
        self.generate(kind, size)
    }

    /// Generate a sine grating patch
    ///
    /// # Errors
    ///
    /// Returns an error if the size is invalid
    pub fn generate_sine(&mut self, size: usize) -> Result<Patch> {
        self.generate(PatchKind::Sine, size)
    }

    /// Generate a stroke patch
    ///
    /// # Errors
    ///
    /// Returns an error if the size is invalid
    pub fn generate_stroke(&mut self, size: usize) -> Result<Patch> {
        self.generate(PatchKind::Stroke, size)
    }

    /// Generate an ellipse patch
    ///
    /// # Errors
    ///
    /// Returns an error if the size is invalid
    pub fn generate_ellipse(&mut self, size: usize) -> Result<Patch> {
        self.generate(PatchKind::Ellipse, size)
    }

    /// Generate one patch and keep its sampled parameters
    ///
    /// # Errors
    ///
    /// Returns an error if the size is invalid
    pub fn generate_sample(&mut self, kind: PatchKind, size: usize) -> Result<PatchSample> {
        validate_size(size)?;

        let shape = MaskShape::sample(kind, &mut self.rng, size);
        let mask = shape.render(size);
        let colors = ColorPair::sample(&mut self.rng);
        let mut patch = colorize(&mask, &colors);

        let noise = NoiseParams::sample(&mut self.rng);
        add_noise(&mut patch, &noise, &mut self.rng);

        log::debug!("generated {kind} patch of size {size}: {shape:?} {colors:?} {noise:?}");

        Ok(PatchSample {
            shape,
            colors,
            noise,
            patch,
        })
    }

    /// Generate `count` patches of one kind stacked as `(count, size, size, 3)`
    ///
    /// # Errors
    ///
    /// Returns an error if the size is invalid or the batch exceeds the value
    /// limit. No random draws are consumed in either case.
    pub fn generate_batch(
        &mut self,
        kind: PatchKind,
        size: usize,
        count: usize,
    ) -> Result<PatchBatch> {
        validate_batch(count, size)?;

        let mut batch = Array4::zeros((count, size, size, PATCH_CHANNELS));
        for mut slot in batch.axis_iter_mut(Axis(0)) {
            let patch = self.generate(kind, size)?;
            slot.assign(&patch);
        }
        Ok(batch)
    }
}
