//! Seeded random source with the draw semantics used by the patch generator
//!
//! Integer draws are 31-bit values, matching a C `rand()` with
//! `RAND_MAX = 2^31 - 1`, so that modulo-based helpers keep their
//! historical ranges. Every call advances the single owned stream.

use rand::{Rng, RngCore, SeedableRng, rngs::StdRng};
use std::f64::consts::TAU;

/// Largest value returned by [`RandomSource::draw`]
pub const RAND_MAX: u32 = i32::MAX as u32;

/// How [`RandomSource::normal`] uses the pair produced by Box-Muller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviateMode {
    /// Flip a coin to return one deviate and drop the other
    #[default]
    Discard,
    /// Return the first deviate and hand out the second on the next call
    ///
    /// Consumes fewer draws, so sequences differ from [`DeviateMode::Discard`].
    Cache,
}

/// Owned pseudo-random stream
///
/// Not shareable across threads without external locking; give every
/// concurrent context its own instance.
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: StdRng,
    mode: DeviateMode,
    spare: Option<f64>,
}

impl RandomSource {
    /// Create a deterministic source
    pub fn new(seed: u64) -> Self {
        Self::with_mode(seed, DeviateMode::default())
    }

    /// Create a deterministic source with an explicit normal-deviate mode
    pub fn with_mode(seed: u64, mode: DeviateMode) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            mode,
            spare: None,
        }
    }

    /// Create a source seeded from the operating system entropy pool
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            mode: DeviateMode::default(),
            spare: None,
        }
    }

    /// Active normal-deviate mode
    pub const fn mode(&self) -> DeviateMode {
        self.mode
    }

    /// Raw integer in `[0, RAND_MAX]`
    pub fn draw(&mut self) -> u32 {
        self.rng.next_u32() >> 1
    }

    /// Legacy two-argument integer draw
    ///
    /// With `max > 0` returns `min + draw % max` (wrapping on overflow);
    /// otherwise with `min > 0` returns `draw % min`; otherwise the raw draw.
    /// Low bits of the underlying stream carry no uniformity guarantee beyond
    /// the generator's.
    pub fn randint(&mut self, min: u32, max: u32) -> u32 {
        let r = self.draw();
        if max > 0 {
            min.wrapping_add(r % max)
        } else if min > 0 {
            r % min
        } else {
            r
        }
    }

    /// Integer in `[0, n)`, or `0` when `n == 0`
    ///
    /// Still consumes one draw for `n == 0` so draw order does not depend on `n`.
    pub fn below(&mut self, n: u32) -> u32 {
        let r = self.randint(n, 0);
        if n == 0 { 0 } else { r }
    }

    /// Fair coin: `true` when `below(2) == 0`
    pub fn coin(&mut self) -> bool {
        self.below(2) == 0
    }

    /// Uniform double in `[0, 1)`
    pub fn uniform(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// Standard normal deviate via the Box-Muller transform
    pub fn normal(&mut self) -> f64 {
        if self.mode == DeviateMode::Cache {
            if let Some(z) = self.spare.take() {
                return z;
            }
        }

        // Map [0,1) onto (0,1] so the logarithm stays finite
        let u1 = 1.0 - self.uniform();
        let u2 = self.uniform();
        let radius = (-2.0 * u1.ln()).sqrt();
        let z0 = radius * (TAU * u2).cos();
        let z1 = radius * (TAU * u2).sin();

        match self.mode {
            DeviateMode::Discard => {
                if self.coin() {
                    z0
                } else {
                    z1
                }
            }
            DeviateMode::Cache => {
                self.spare = Some(z1);
                z0
            }
        }
    }
}
