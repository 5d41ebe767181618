//! Entropy simulation - world state and the engine that advances it
//!
//! The engine is a pure stepper: `Engine::step` takes a `WorldState` and
//! returns the next one. All randomness lives in `WorldState::rng_state`,
//! so a given world always steps to the same successor.
//!
//! Step order (see step/step.rs):
//! repulsion -> attraction -> thermal motion -> goal seeking ->
//! integration -> obstacle -> collisions -> sublimation

use std::sync::Arc;

use serde::Serialize;

use crate::core::rng::seed_state;
use crate::domain::{Entity, Genealogy, Scenario};
use crate::systems::{Phase, StepReport};

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "step/step.rs"]
mod step;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
#[path = "render/render_extract.rs"]
mod render_extract;
pub mod ensemble;
pub mod invariants;
mod facade;

pub use facade::World;
pub use perf_stats::PerfStats;
pub use render_extract::{Snapshot, SnapshotEntity};
pub use settings::{clamp_temperature, MAX_TEMPERATURE, MIN_TEMPERATURE};

use perf_timer::PerfTimer;

/// Per-call stepping parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepContext {
    /// Displacement scale; 1.0 is one animation frame
    pub dt: f32,
}

impl Default for StepContext {
    fn default() -> Self {
        StepContext { dt: 1.0 }
    }
}

/// Everything that changes while the simulation runs
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldState {
    pub entities: Vec<Entity>,
    /// Control input in [0, 100]
    pub temperature: f32,
    pub frame: u64,
    pub rng_state: u32,
    /// Serial for generated ids
    pub next_serial: u64,
    pub genealogy: Genealogy,
}

impl WorldState {
    /// World over an arbitrary entity list (custom setups and tests)
    pub fn from_entities(entities: Vec<Entity>, seed: u32) -> Self {
        WorldState {
            genealogy: Genealogy::from_entities(&entities),
            entities,
            temperature: 0.0,
            frame: 0,
            rng_state: seed_state(seed),
            next_serial: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn entity(&self, id: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }
}

/// Steps worlds for one scenario. Cheap to clone; the scenario is shared.
#[derive(Clone, Debug)]
pub struct Engine {
    scenario: Arc<Scenario>,
}

impl Engine {
    pub fn new(scenario: Scenario) -> Self {
        Self { scenario: Arc::new(scenario) }
    }

    pub fn from_shared(scenario: Arc<Scenario>) -> Self {
        Self { scenario }
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn shared_scenario(&self) -> Arc<Scenario> {
        Arc::clone(&self.scenario)
    }

    /// Fresh copy of the template at temperature 0
    pub fn reset(&self) -> WorldState {
        init::reset(&self.scenario, self.scenario.params().seed)
    }

    pub fn reset_with_seed(&self, seed: u32) -> WorldState {
        init::reset(&self.scenario, seed)
    }

    /// Next world state; `world` is left untouched
    pub fn step(&self, world: &WorldState, ctx: StepContext) -> WorldState {
        let mut next = world.clone();
        step::advance(&self.scenario, &mut next, ctx, None);
        next
    }

    pub fn step_in_place(&self, world: &mut WorldState, ctx: StepContext) -> StepReport {
        step::advance(&self.scenario, world, ctx, None)
    }

    /// In-place step that also fills `stats` with timings and counters
    pub fn step_with_stats(&self, world: &mut WorldState, ctx: StepContext, stats: &mut PerfStats) -> StepReport {
        step::advance(&self.scenario, world, ctx, Some(stats))
    }

    /// Copy of `world` with the temperature clamped to [0, 100]
    pub fn set_temperature(&self, world: &WorldState, temperature: f32) -> WorldState {
        let mut next = world.clone();
        settings::set_temperature(&mut next, temperature);
        next
    }

    pub fn set_temperature_in_place(&self, world: &mut WorldState, temperature: f32) {
        settings::set_temperature(world, temperature);
    }

    /// Nudge the temperature by `delta` (auto-increment drivers)
    pub fn heat(&self, world: &mut WorldState, delta: f32) {
        settings::heat(world, delta);
    }

    pub fn phase(&self, world: &WorldState) -> Phase {
        Phase::from_temperature(self.scenario.params(), world.temperature)
    }

    pub fn snapshot(&self, world: &WorldState) -> Snapshot {
        render_extract::extract(self.scenario.params(), world)
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
