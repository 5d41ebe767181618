use wasm_bindgen::prelude::*;

use crate::systems::StepReport;

/// Timings and counters for the last step (zeros when perf is disabled)
#[wasm_bindgen]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PerfStats {
    pub(super) step_ms: f64,
    pub(super) forces_ms: f64,
    pub(super) integrate_ms: f64,
    pub(super) collisions_ms: f64,
    pub(super) phase_ms: f64,
    pub(super) pair_checks: u32,
    pub(super) merges: u32,
    pub(super) bounces: u32,
    pub(super) obstacle_bounces: u32,
    pub(super) singularities: u32,
    pub(super) sublimations: u32,
    pub(super) entity_count: u32,
    pub(super) temperature: f32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }

    pub(super) fn absorb(&mut self, report: &StepReport) {
        self.pair_checks = report.pair_checks;
        self.merges = report.merges;
        self.bounces = report.bounces;
        self.obstacle_bounces = report.obstacle_bounces;
        self.singularities = report.singularities;
        self.sublimations = report.sublimations;
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn forces_ms(&self) -> f64 { self.forces_ms }
    #[wasm_bindgen(getter)]
    pub fn integrate_ms(&self) -> f64 { self.integrate_ms }
    #[wasm_bindgen(getter)]
    pub fn collisions_ms(&self) -> f64 { self.collisions_ms }
    #[wasm_bindgen(getter)]
    pub fn phase_ms(&self) -> f64 { self.phase_ms }
    #[wasm_bindgen(getter)]
    pub fn pair_checks(&self) -> u32 { self.pair_checks }
    #[wasm_bindgen(getter)]
    pub fn merges(&self) -> u32 { self.merges }
    #[wasm_bindgen(getter)]
    pub fn bounces(&self) -> u32 { self.bounces }
    #[wasm_bindgen(getter)]
    pub fn obstacle_bounces(&self) -> u32 { self.obstacle_bounces }
    #[wasm_bindgen(getter)]
    pub fn singularities(&self) -> u32 { self.singularities }
    #[wasm_bindgen(getter)]
    pub fn sublimations(&self) -> u32 { self.sublimations }
    #[wasm_bindgen(getter)]
    pub fn entity_count(&self) -> u32 { self.entity_count }
    #[wasm_bindgen(getter)]
    pub fn temperature(&self) -> f32 { self.temperature }
}
