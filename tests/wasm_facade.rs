#![cfg(target_arch = "wasm32")]

use entropy_engine::World;
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn facade_steps_and_reports_in_wasm() {
    let mut world = World::from_preset("reactor").expect("reactor preset");
    assert_eq!(world.scenario_name(), "reactor");

    world.enable_perf_metrics(true);
    world.set_temperature(100.0);
    for _ in 0..120 {
        world.step();
    }
    assert_eq!(world.frame(), 120);
    assert!(world.get_perf_stats().step_ms() >= 0.0);
    assert_eq!(world.phase_label(), "PHASE 3: SUBLIMATION");
    assert!(world.snapshot_json().contains("\"entities\""));
}

#[wasm_bindgen_test]
fn facade_rejects_bad_input_in_wasm() {
    assert!(World::from_preset("nope").is_err());
    assert!(World::from_bundle("{ not json".to_string()).is_err());

    let mut world = World::new();
    assert!(world.load_scenario_bundle("[]".to_string()).is_err());
    assert_eq!(world.scenario_name(), "tangent");
    assert_eq!(world.entity_count(), 14);
}
