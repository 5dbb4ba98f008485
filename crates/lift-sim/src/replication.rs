//! Independent replications of one configuration.
//!
//! Each replication gets its own `BuildingConfig` copy with a different
//! `rng_seed`, so the runs share nothing and can go in parallel.

use lift_core::BuildingConfig;

use crate::{NoopObserver, SimBuilder, SimReport, SimResult};

/// Run `config` once per seed and return the reports in seed order.
///
/// With the `parallel` feature the runs are spread over Rayon's thread pool;
/// results are identical either way.
pub fn run_replications(config: &BuildingConfig, seeds: &[u64]) -> SimResult<Vec<SimReport>> {
    config.validate()?;

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        seeds.par_iter().map(|&seed| run_one(config, seed)).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        seeds.iter().map(|&seed| run_one(config, seed)).collect()
    }
}

fn run_one(config: &BuildingConfig, seed: u64) -> SimResult<SimReport> {
    let mut sim = SimBuilder::new(config.clone()).rng_seed(seed).build()?;
    sim.run(&mut NoopObserver)
}
