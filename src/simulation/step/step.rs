use crate::domain::Scenario;
use crate::systems::collision::resolve_collisions;
use crate::systems::forces::{apply_attraction, apply_goal_seeking, apply_repulsion, apply_thermal_motion};
use crate::systems::integrate::{integrate, resolve_obstacle};
use crate::systems::phase::sublimate;
use crate::systems::{StepReport, SystemContext};

use super::{PerfStats, PerfTimer, StepContext, WorldState};

pub(super) fn advance(
    scenario: &Scenario,
    world: &mut WorldState,
    ctx: StepContext,
    mut perf: Option<&mut PerfStats>,
) -> StepReport {
    let perf_on = perf.is_some();
    if let Some(stats) = perf.as_deref_mut() {
        stats.reset();
    }
    let mut clock = PerfTimer::start_if(perf_on);

    let params = scenario.params();
    let temperature = world.temperature;
    let dt = if ctx.dt.is_finite() { ctx.dt.max(0.0) } else { 0.0 };
    let mut report = StepReport::default();

    // === FORCES ===
    report.pair_checks += apply_repulsion(&mut world.entities, params);
    apply_attraction(&mut world.entities, scenario.recipes(), params, temperature);
    apply_thermal_motion(&mut world.entities, params, temperature, &mut world.rng_state);
    apply_goal_seeking(&mut world.entities, params);
    let forces_ms = clock.as_mut().map(PerfTimer::lap);

    // === INTEGRATION ===
    integrate(&mut world.entities, params, temperature, dt);
    report.obstacle_bounces = resolve_obstacle(&mut world.entities, params);
    let integrate_ms = clock.as_mut().map(PerfTimer::lap);

    let mut sys = SystemContext {
        params,
        recipes: scenario.recipes(),
        epiphanies: scenario.epiphanies(),
        temperature,
        rng: &mut world.rng_state,
        next_serial: &mut world.next_serial,
        genealogy: &mut world.genealogy,
    };

    // === COLLISIONS & MERGES ===
    resolve_collisions(&mut world.entities, &mut sys, &mut report);
    let collisions_ms = clock.as_mut().map(PerfTimer::lap);

    // === SUBLIMATION ===
    sublimate(&mut world.entities, &mut sys, &mut report);
    let phase_ms = clock.as_mut().map(PerfTimer::lap);

    world.frame += 1;

    if let Some(stats) = perf {
        stats.absorb(&report);
        stats.forces_ms = forces_ms.unwrap_or_default();
        stats.integrate_ms = integrate_ms.unwrap_or_default();
        stats.collisions_ms = collisions_ms.unwrap_or_default();
        stats.phase_ms = phase_ms.unwrap_or_default();
        stats.entity_count = world.entities.len() as u32;
        stats.temperature = temperature;
        if let Some(clock) = clock {
            stats.step_ms = clock.total_ms();
        }
    }

    report
}
