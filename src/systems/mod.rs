//! Per-step systems. Each one handles a single concern and is driven in a
//! fixed order by `simulation::step`.

pub mod collision;
pub mod forces;
pub mod integrate;
pub mod phase;

pub use phase::Phase;

use crate::domain::{Entity, Genealogy, RecipeBook, SimParams};

/// Shared state handed to systems that create entities or roll dice
/// during a step
pub struct SystemContext<'a> {
    pub params: &'a SimParams,
    pub recipes: &'a RecipeBook,
    pub epiphanies: &'a [String],
    pub temperature: f32,
    pub rng: &'a mut u32,
    pub next_serial: &'a mut u64,
    pub genealogy: &'a mut Genealogy,
}

/// Counters collected while stepping (feeds `PerfStats`)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    pub pair_checks: u32,
    pub merges: u32,
    pub bounces: u32,
    pub obstacle_bounces: u32,
    pub singularities: u32,
    pub sublimations: u32,
}

/// Next `"<prefix>-<serial>"` id not rejected by `taken`. Callers reject ids
/// of live entities and of every genealogy node, so an id names one entity
/// for the whole run.
pub(crate) fn fresh_id(prefix: &str, next_serial: &mut u64, taken: impl Fn(&str) -> bool) -> String {
    loop {
        let id = format!("{}-{}", prefix, *next_serial);
        *next_serial += 1;
        if !taken(&id) {
            return id;
        }
    }
}

/// Two distinct mutable entries of a slice (i < j)
#[inline]
pub(crate) fn pair_mut(entities: &mut [Entity], i: usize, j: usize) -> (&mut Entity, &mut Entity) {
    debug_assert!(i < j);
    let (head, tail) = entities.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}
