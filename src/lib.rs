//! Entropy Engine - concept-collision particle simulation in WASM
//!
//! Architecture:
//! - core/       - Vector math, deterministic RNG, console logging
//! - domain/     - Entities, recipes, scenario configuration, lineage
//! - systems/    - Forces, integration, collisions, phase changes
//! - simulation/ - World state, stepping, snapshots, wasm facade
//! - export      - Lineage graph text (Mermaid, Graphviz)

pub mod core;
pub mod domain;
pub mod systems;
pub mod simulation;
pub mod export;

use wasm_bindgen::prelude::*;

// Re-export wasm-bindgen-rayon for thread pool initialization
#[cfg(feature = "parallel")]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    crate::core::console::log("Entropy engine initialized");
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use domain::{Entity, EntityKind, FallbackPolicy, Recipe, Scenario, SimParams};
pub use simulation::{Engine, Snapshot, StepContext, World, WorldState};
pub use systems::Phase;

// Export kind constants for JS
#[wasm_bindgen]
pub fn kind_base() -> u8 { EntityKind::Base as u8 }
#[wasm_bindgen]
pub fn kind_merged() -> u8 { EntityKind::Merged as u8 }
#[wasm_bindgen]
pub fn kind_epiphany() -> u8 { EntityKind::Epiphany as u8 }
#[wasm_bindgen]
pub fn kind_singularity() -> u8 { EntityKind::Singularity as u8 }

/// Temperature range accepted by `World::set_temperature`
#[wasm_bindgen]
pub fn max_temperature() -> f32 { simulation::MAX_TEMPERATURE }
