use crate::core::rng::seed_state;
use crate::domain::{Genealogy, Scenario};

use super::WorldState;

/// Deep copy of the scenario template, cold, with the RNG seeded
pub(super) fn reset(scenario: &Scenario, seed: u32) -> WorldState {
    let entities = scenario.template().to_vec();
    WorldState {
        genealogy: Genealogy::from_entities(&entities),
        entities,
        temperature: 0.0,
        frame: 0,
        rng_state: seed_state(seed),
        next_serial: 0,
    }
}
