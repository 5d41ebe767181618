use wasm_bindgen::prelude::*;

use crate::core::console;
use crate::domain::Scenario;
use crate::export;

#[cfg(debug_assertions)]
use super::invariants;
use super::perf_stats::PerfStats;
use super::{Engine, StepContext, WorldState};

/// Browser-facing handle: one engine plus the live world it drives
#[wasm_bindgen]
pub struct World {
    engine: Engine,
    state: WorldState,
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl World {
    pub fn from_scenario(scenario: Scenario) -> Self {
        let engine = Engine::new(scenario);
        let state = engine.reset();
        Self {
            engine,
            state,
            perf_enabled: false,
            perf_stats: PerfStats::default(),
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn state(&self) -> &WorldState {
        &self.state
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl World {
    /// World running the built-in collision detector scenario
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::from_scenario(Scenario::tangent())
    }

    #[wasm_bindgen(js_name = fromPreset)]
    pub fn from_preset(name: &str) -> Result<World, JsValue> {
        let scenario = Scenario::preset(name)
            .ok_or_else(|| JsValue::from_str(&format!("unknown scenario preset: {}", name)))?;
        Ok(Self::from_scenario(scenario))
    }

    #[wasm_bindgen(js_name = fromBundle)]
    pub fn from_bundle(json: String) -> Result<World, JsValue> {
        let scenario = Scenario::from_bundle_json(&json).map_err(|e| JsValue::from_str(&e))?;
        Ok(Self::from_scenario(scenario))
    }

    /// Swap in a scenario bundle and reset. The current world is kept on error.
    pub fn load_scenario_bundle(&mut self, json: String) -> Result<(), JsValue> {
        let scenario = match Scenario::from_bundle_json(&json) {
            Ok(s) => s,
            Err(e) => {
                console::warn(&format!("scenario bundle rejected: {}", e));
                return Err(JsValue::from_str(&e));
            }
        };
        console::log(&format!(
            "scenario '{}' loaded: {} entities, {} recipes",
            scenario.name(),
            scenario.template().len(),
            scenario.recipes().len()
        ));
        *self = Self {
            perf_enabled: self.perf_enabled,
            ..Self::from_scenario(scenario)
        };
        Ok(())
    }

    #[wasm_bindgen(getter)]
    pub fn scenario_name(&self) -> String {
        self.engine.scenario().name().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 {
        self.state.frame
    }

    #[wasm_bindgen(getter)]
    pub fn temperature(&self) -> f32 {
        self.state.temperature
    }

    #[wasm_bindgen(getter)]
    pub fn entity_count(&self) -> usize {
        self.state.entities.len()
    }

    /// Clamped to [0, 100]
    pub fn set_temperature(&mut self, temperature: f32) {
        self.engine.set_temperature_in_place(&mut self.state, temperature);
    }

    pub fn heat(&mut self, delta: f32) {
        self.engine.heat(&mut self.state, delta);
    }

    /// Advance one animation frame
    pub fn step(&mut self) {
        self.step_scaled(1.0);
    }

    pub fn step_scaled(&mut self, dt: f32) {
        let ctx = StepContext { dt };
        if self.perf_enabled {
            self.engine.step_with_stats(&mut self.state, ctx, &mut self.perf_stats);
        } else {
            self.engine.step_in_place(&mut self.state, ctx);
        }

        #[cfg(debug_assertions)]
        if let Err(e) = invariants::check_world(self.engine.scenario().params(), &self.state) {
            console::warn(&format!("world invariant violated: {}", e));
        }
    }

    /// Back to the template at temperature 0
    pub fn reset(&mut self) {
        self.state = self.engine.reset();
        self.perf_stats.reset();
    }

    /// Reset with a different RNG seed
    pub fn reseed(&mut self, seed: u32) {
        self.state = self.engine.reset_with_seed(seed);
        self.perf_stats.reset();
    }

    pub fn phase_label(&self) -> String {
        self.engine.phase(&self.state).label().to_string()
    }

    pub fn phase_description(&self) -> String {
        self.engine.phase(&self.state).description().to_string()
    }

    pub fn has_epiphany(&self) -> bool {
        self.state.entities.iter().any(|e| e.is_terminal())
    }

    /// Entity list for the renderer as JSON
    pub fn snapshot_json(&self) -> String {
        self.engine.snapshot(&self.state).to_json()
    }

    pub fn lineage_mermaid(&self) -> String {
        export::to_mermaid(&self.state.genealogy)
    }

    pub fn lineage_dot(&self) -> String {
        export::to_dot(&self.state.genealogy)
    }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.perf_enabled = enabled;
        if !enabled {
            self.perf_stats.reset();
        }
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.perf_stats.clone()
    }
}
