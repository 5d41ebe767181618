use std::fs;

use entropy_engine::{Engine, Scenario, StepContext};

#[test]
fn scenario_bundle_smoke_matches_builtin_preset() {
    let json = fs::read_to_string("content/tangent.json").expect("content/tangent.json should exist");

    let scenario = Scenario::from_bundle_json(&json).expect("tangent.json should parse");
    let builtin = Scenario::tangent();

    assert_eq!(scenario.name(), "tangent");
    assert_eq!(scenario.template(), builtin.template());
    assert_eq!(scenario.recipes().len(), builtin.recipes().len());
    assert_eq!(scenario.epiphanies(), builtin.epiphanies());
    assert_eq!(scenario.params(), builtin.params());

    // Same data, same seed: both engines produce the same history.
    let from_file = Engine::new(scenario);
    let compiled = Engine::new(builtin);
    let mut a = from_file.set_temperature(&from_file.reset(), 70.0);
    let mut b = compiled.set_temperature(&compiled.reset(), 70.0);
    for _ in 0..100 {
        from_file.step_in_place(&mut a, StepContext::default());
        compiled.step_in_place(&mut b, StepContext::default());
    }
    assert_eq!(a, b);
}

#[test]
fn scenario_bundle_rejects_bad_input() {
    assert!(Scenario::from_bundle_json("{ not json").is_err());

    let dup = r#"{
        "name": "dup",
        "entities": [
            { "id": "a", "label": "A", "x": 50, "y": 50 },
            { "id": "a", "label": "B", "x": 60, "y": 50 }
        ],
        "epiphanies": ["Insight"]
    }"#;
    let err = Scenario::from_bundle_json(dup).unwrap_err();
    assert!(err.contains("duplicate"), "unexpected error: {}", err);

    let outside = r#"{
        "name": "outside",
        "entities": [ { "id": "a", "label": "A", "x": 1, "y": 50 } ],
        "epiphanies": ["Insight"]
    }"#;
    assert!(Scenario::from_bundle_json(outside).is_err());
}
