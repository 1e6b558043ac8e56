//! Random-in-range sampling.
//!
//! Every draw the engine makes goes through [`Sampler`], so production code
//! runs on a real RNG while tests pin the draws and get reproducible output.

use dashboard_core::{Band, DashboardError, DashboardResult};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Source of uniform draws.
pub trait Sampler {
    /// Uniform draw in `[0, 1)`. Implementations may return exactly `1.0`
    /// to pin the upper bound of a range.
    fn next_unit(&mut self) -> f64;

    /// Uniform value in `[min, max]`, floor-truncated to `decimals` places.
    fn sample(&mut self, min: f64, max: f64, decimals: u32) -> DashboardResult<f64> {
        // Also rejects NaN bounds.
        if !(min <= max) {
            return Err(DashboardError::InvalidRange { min, max });
        }
        let unit = self.next_unit().clamp(0.0, 1.0);
        Ok(truncate(min + unit * (max - min), decimals).clamp(min, max))
    }

    fn sample_band(&mut self, band: Band, decimals: u32) -> DashboardResult<f64> {
        self.sample(band.min, band.max, decimals)
    }

    /// True with the given probability.
    fn chance(&mut self, probability: f64) -> bool {
        self.next_unit() < probability
    }

    /// Uniform index into a collection of `len` items.
    fn pick_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let index = (self.next_unit().clamp(0.0, 1.0) * len as f64).floor() as usize;
        Some(index.min(len - 1))
    }
}

impl<S: Sampler + ?Sized> Sampler for &mut S {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

impl<S: Sampler + ?Sized> Sampler for Box<S> {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// Multiply by `10^decimals`, floor, divide back. Past the precision of an
/// `f64` there is nothing left to drop, so the value comes back unchanged.
pub fn truncate(value: f64, decimals: u32) -> f64 {
    let power = 10f64.powi(decimals.min(i32::MAX as u32) as i32);
    let scaled = value * power;
    if !power.is_finite() || !scaled.is_finite() {
        return value;
    }
    scaled.floor() / power
}

/// Production sampler backed by a `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSampler<R = StdRng> {
    rng: R,
}

impl RngSampler<StdRng> {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: RngCore> RngSampler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: RngCore> Sampler for RngSampler<R> {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Always returns the same unit draw. `FixedSampler::midpoint()` makes every
/// sampled value the (truncated) midpoint of its range.
#[derive(Debug, Clone, Copy)]
pub struct FixedSampler(pub f64);

impl FixedSampler {
    pub fn midpoint() -> Self {
        Self(0.5)
    }
}

impl Sampler for FixedSampler {
    fn next_unit(&mut self) -> f64 {
        self.0
    }
}

/// Replays a fixed list of unit draws, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct ScriptedSampler {
    draws: Vec<f64>,
    cursor: usize,
}

impl ScriptedSampler {
    pub fn new(draws: Vec<f64>) -> Self {
        Self { draws, cursor: 0 }
    }

    pub fn draws_taken(&self) -> usize {
        self.cursor
    }
}

impl Sampler for ScriptedSampler {
    fn next_unit(&mut self) -> f64 {
        if self.draws.is_empty() {
            return 0.0;
        }
        let draw = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        draw
    }
}
