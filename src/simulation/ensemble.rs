//! Batch runs of one scenario over many seeds, e.g. to tune how often a
//! temperature setting reaches the singularity.

use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::domain::{EntityKind, Scenario};

use super::{clamp_temperature, Engine, StepContext};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnsembleOutcome {
    pub seed: u32,
    pub final_count: usize,
    pub merges: u32,
    pub sublimations: u32,
    pub singularities: u32,
    pub epiphanies_alive: usize,
    pub reached_singularity: bool,
}

/// Run every seed for `steps` frames at a fixed temperature. Seeds are
/// independent worlds; with the `parallel` feature they run on rayon's pool.
pub fn run_ensemble(scenario: Arc<Scenario>, seeds: &[u32], steps: u32, temperature: f32) -> Vec<EnsembleOutcome> {
    let engine = Engine::from_shared(scenario);
    let temperature = clamp_temperature(temperature);

    #[cfg(feature = "parallel")]
    {
        seeds
            .par_iter()
            .map(|&seed| run_one(&engine, seed, steps, temperature))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        seeds
            .iter()
            .map(|&seed| run_one(&engine, seed, steps, temperature))
            .collect()
    }
}

fn run_one(engine: &Engine, seed: u32, steps: u32, temperature: f32) -> EnsembleOutcome {
    let mut world = engine.reset_with_seed(seed);
    engine.set_temperature_in_place(&mut world, temperature);

    let mut outcome = EnsembleOutcome {
        seed,
        final_count: 0,
        merges: 0,
        sublimations: 0,
        singularities: 0,
        epiphanies_alive: 0,
        reached_singularity: false,
    };

    for _ in 0..steps {
        let report = engine.step_in_place(&mut world, StepContext::default());
        outcome.merges += report.merges;
        outcome.sublimations += report.sublimations;
        outcome.singularities += report.singularities;
    }

    outcome.final_count = world.entities.len();
    outcome.epiphanies_alive = world
        .entities
        .iter()
        .filter(|e| e.kind == EntityKind::Epiphany)
        .count();
    outcome.reached_singularity = world.entities.iter().any(|e| e.kind == EntityKind::Singularity);
    outcome
}
