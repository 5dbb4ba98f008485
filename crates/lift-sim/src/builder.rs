//! Fluent builder for constructing a [`Sim`].

use lift_core::{ArrivalSeed, BuildingConfig};
use lift_dispatch::{Building, LiftKernel};

use crate::{Sim, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Optional overrides
///
/// | Method             | Replaces                        |
/// |--------------------|---------------------------------|
/// | `.seeds(v)`        | `config.arrival_seeds`          |
/// | `.rng_seed(s)`     | `config.rng_seed`               |
/// | `.horizon(m)`      | `config.horizon`                |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config)
///     .seeds(load_seeds_csv(path)?)
///     .rng_seed(7)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config: BuildingConfig,
}

impl SimBuilder {
    pub fn new(config: BuildingConfig) -> Self {
        Self { config }
    }

    /// Release these passenger groups at time zero instead of running
    /// per-floor generators.
    pub fn seeds(mut self, seeds: Vec<ArrivalSeed>) -> Self {
        self.config.arrival_seeds = seeds;
        self
    }

    pub fn rng_seed(mut self, seed: u64) -> Self {
        self.config.rng_seed = seed;
        self
    }

    pub fn horizon(mut self, minutes: f64) -> Self {
        self.config.horizon = minutes;
        self
    }

    /// Validate the configuration, wire the kernel and spawn every initial
    /// process.  Nothing runs until [`Sim::run`].
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;
        let mut kernel = LiftKernel::new(self.config.horizon);
        let building = Building::install(&self.config, &mut kernel)?;
        Ok(Sim { config: self.config, kernel, building })
    }
}
