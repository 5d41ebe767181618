use super::*;
use crate::core::Vec2;
use crate::domain::{EntityKind, Recipe, SimParams};
use crate::simulation::invariants::{check_transition, check_world};

fn at(id: &str, label: &str, x: f32, y: f32) -> Entity {
    Entity::base(id, label, Vec2::new(x, y), Vec2::zero())
}

fn tight_params() -> SimParams {
    SimParams {
        merge_radius: 5.0,
        repulsion_radius: 10.0,
        ..SimParams::default()
    }
}

fn pair_engine(params: SimParams, template: Vec<Entity>) -> Engine {
    let scenario = Scenario::new(
        "pair",
        params,
        template,
        vec![Recipe::new("a", "b", "C", "")],
        vec!["Insight".to_string()],
    )
    .expect("valid scenario");
    Engine::new(scenario)
}

fn epiphany(id: &str, x: f32, y: f32) -> Entity {
    at(id, id, x, y).with_kind(EntityKind::Epiphany)
}

#[test]
fn recipe_pair_merges_into_product() {
    let engine = pair_engine(tight_params(), vec![at("a", "A", 50.0, 50.0), at("b", "B", 53.0, 50.0)]);
    let world = engine.set_temperature(&engine.reset(), 50.0);

    let next = engine.step(&world, StepContext::default());

    assert_eq!(next.len(), 1);
    let product = &next.entities[0];
    assert_eq!(product.label, "C");
    assert_eq!(product.kind, EntityKind::Merged);
    assert!(product.scale > 1.0);
    assert!(product.lineage.contains(&"A".to_string()));
    assert!(product.lineage.contains(&"B".to_string()));

    let parents: Vec<&str> = next.genealogy.parents_of(&product.id).collect();
    assert_eq!(parents.len(), 2);
    assert!(parents.contains(&"a") && parents.contains(&"b"));
}

#[test]
fn cold_distant_pair_stays_put() {
    let engine = pair_engine(tight_params(), vec![at("a", "A", 40.0, 50.0), at("b", "B", 60.0, 50.0)]);
    let world = engine.reset();

    let next = engine.step(&world, StepContext::default());

    assert_eq!(next.entities[0].pos, Vec2::new(40.0, 50.0));
    assert_eq!(next.entities[1].pos, Vec2::new(60.0, 50.0));
    assert_eq!(next.frame, 1);
}

#[test]
fn temperature_is_clamped() {
    let engine = Engine::new(Scenario::tangent());
    let world = engine.reset();

    assert_eq!(engine.set_temperature(&world, 150.0).temperature, 100.0);
    assert_eq!(engine.set_temperature(&world, -20.0).temperature, 0.0);
    assert_eq!(engine.set_temperature(&world, f32::NAN).temperature, 0.0);

    let mut w = engine.set_temperature(&world, 95.0);
    engine.heat(&mut w, 10.0);
    assert_eq!(w.temperature, 100.0);
}

#[test]
fn epiphanies_form_one_singularity() {
    let engine = Engine::new(Scenario::tangent());
    let mut world = WorldState::from_entities(
        vec![epiphany("e1", 48.0, 15.0), epiphany("e2", 52.0, 15.0), epiphany("e3", 50.0, 22.0)],
        7,
    );
    engine.set_temperature_in_place(&mut world, 50.0);

    let report = engine.step_in_place(&mut world, StepContext::default());
    assert_eq!(report.singularities, 1);

    let singularities: Vec<&Entity> = world
        .entities
        .iter()
        .filter(|e| e.kind == EntityKind::Singularity)
        .collect();
    assert_eq!(singularities.len(), 1);
    assert_eq!(singularities[0].label, "TOTALITY");
    assert_eq!(singularities[0].pos, engine.scenario().params().anchor);

    // The third epiphany drifts onto the anchor but never fuses with TOTALITY
    for _ in 0..200 {
        let report = engine.step_in_place(&mut world, StepContext::default());
        assert_eq!(report.singularities, 0);
    }
    assert_eq!(world.len(), 2);
    assert!(world.entity("e3").is_some());
}

#[test]
fn reset_is_deterministic_and_leaves_template_alone() {
    let engine = Engine::new(Scenario::tangent());
    let first = engine.reset();

    let mut world = first.clone();
    engine.set_temperature_in_place(&mut world, 100.0);
    for _ in 0..300 {
        engine.step_in_place(&mut world, StepContext::default());
    }
    assert_ne!(world.entities, first.entities);

    let again = engine.reset();
    assert_eq!(again, first);
    assert_eq!(again.temperature, 0.0);
    assert_eq!(again.entities.as_slice(), engine.scenario().template());
}

#[test]
fn nothing_merges_while_cold() {
    let engine = Engine::new(Scenario::tangent());
    let mut world = engine.reset();
    let count = world.len();

    for _ in 0..500 {
        let report = engine.step_in_place(&mut world, StepContext::default());
        assert_eq!(report.merges, 0);
    }
    assert_eq!(world.len(), count);
    for (e, t) in world.entities.iter().zip(engine.scenario().template()) {
        assert_eq!(e.id, t.id);
        assert_eq!(e.pos, t.pos);
    }
}

#[test]
fn hot_runs_keep_world_invariants() {
    for scenario in [Scenario::tangent(), Scenario::reactor()] {
        let engine = Engine::new(scenario);
        let params = engine.scenario().params().clone();
        let mut world = engine.set_temperature(&engine.reset(), 100.0);

        for frame in 0..800 {
            let next = engine.step(&world, StepContext::default());
            if let Err(e) = check_world(&params, &next) {
                panic!("{} frame {}: {}", engine.scenario().name(), frame, e);
            }
            if let Err(e) = check_transition(&world, &next) {
                panic!("{} frame {}: {}", engine.scenario().name(), frame, e);
            }
            world = next;
        }
    }
}

#[test]
fn step_is_pure() {
    let engine = Engine::new(Scenario::tangent());
    let world = engine.set_temperature(&engine.reset(), 90.0);
    let before = world.clone();

    let a = engine.step(&world, StepContext::default());
    let b = engine.step(&world, StepContext::default());

    assert_eq!(a, b);
    assert_eq!(world, before);
    assert_ne!(a.rng_state, world.rng_state);
}

#[test]
fn same_seed_same_history() {
    let engine = Engine::new(Scenario::tangent());
    let run = |seed: u32| {
        let mut w = engine.set_temperature(&engine.reset_with_seed(seed), 90.0);
        for _ in 0..400 {
            engine.step_in_place(&mut w, StepContext::default());
        }
        w
    };

    assert_eq!(run(99), run(99));
}

#[test]
fn empty_and_single_entity_worlds() {
    let engine = Engine::new(Scenario::tangent());

    let mut empty = WorldState::from_entities(Vec::new(), 1);
    engine.set_temperature_in_place(&mut empty, 100.0);
    let report = engine.step_in_place(&mut empty, StepContext::default());
    assert!(empty.is_empty());
    assert_eq!(empty.frame, 1);
    assert_eq!(report, StepReport::default());

    let mut single = WorldState::from_entities(vec![at("solo", "Solo", 50.0, 50.0)], 1);
    engine.set_temperature_in_place(&mut single, 100.0);
    for _ in 0..200 {
        engine.step_in_place(&mut single, StepContext::default());
    }
    assert_eq!(single.len(), 1);
    assert!(check_world(engine.scenario().params(), &single).is_ok());
}

#[test]
fn zero_dt_freezes_positions() {
    let engine = Engine::new(Scenario::tangent());
    let world = engine.set_temperature(&engine.reset(), 30.0);

    let next = engine.step(&world, StepContext { dt: 0.0 });

    for (a, b) in world.entities.iter().zip(next.entities.iter()) {
        assert_eq!(a.pos, b.pos);
    }
}

#[test]
fn snapshot_reports_phase() {
    let engine = Engine::new(Scenario::tangent());
    let world = engine.set_temperature(&engine.reset(), 90.0);

    let snap = engine.snapshot(&world);
    assert_eq!(snap.phase_label, "PHASE 3: SUBLIMATION");
    assert_eq!(snap.entities.len(), world.len());
    assert!(!snap.has_epiphany());
    assert!(snap.to_json().contains("\"phaseLabel\":\"PHASE 3: SUBLIMATION\""));
}

#[test]
fn perf_stats_track_step() {
    let engine = Engine::new(Scenario::tangent());
    let mut world = engine.set_temperature(&engine.reset(), 60.0);
    let mut stats = PerfStats::default();

    engine.step_with_stats(&mut world, StepContext::default(), &mut stats);

    assert!(stats.step_ms() >= 0.0);
    assert!(stats.pair_checks() > 0);
    assert_eq!(stats.entity_count(), world.len() as u32);
    assert_eq!(stats.temperature(), 60.0);
}

#[test]
fn generated_ids_never_reuse_consumed_ones() {
    let engine = pair_engine(
        tight_params(),
        vec![
            at("merged-1", "Mx", 50.0, 50.0),
            at("b", "Beta", 53.0, 50.0),
            at("c", "Gamma", 20.0, 80.0),
            at("d", "Delta", 80.0, 80.0),
        ],
    );
    let mut world = engine.set_temperature(&engine.reset(), 50.0);

    let report = engine.step_in_place(&mut world, StepContext::default());
    assert_eq!(report.merges, 1);
    assert!(world.entity("merged-1").is_none());

    // Bring the second pair together once `merged-1` is gone
    for e in world.entities.iter_mut() {
        match e.id.as_str() {
            "c" => e.pos = Vec2::new(50.0, 80.0),
            "d" => e.pos = Vec2::new(53.0, 80.0),
            _ => {}
        }
    }
    let report = engine.step_in_place(&mut world, StepContext::default());
    assert_eq!(report.merges, 1);
    assert!(world.entity("merged-1").is_none());

    let mut ids: Vec<&str> = world.genealogy.nodes().iter().map(|n| n.id.as_str()).collect();
    let total = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), total, "genealogy ids must be unique");

    let mermaid = crate::export::to_mermaid(&world.genealogy);
    assert!(!mermaid.contains("c --> merged_1"));
}

#[test]
fn transition_check_rejects_downgrades() {
    let merged = at("m", "Compound", 50.0, 50.0).with_kind(EntityKind::Merged);
    let before = WorldState::from_entities(vec![merged.clone()], 1);

    let mut downgraded = before.clone();
    downgraded.entities[0].kind = EntityKind::Base;
    let err = check_transition(&before, &downgraded).unwrap_err();
    assert!(err.contains("reverted"), "{}", err);

    let mut demoted_child = before.clone();
    let child = at("child", "Lesser", 50.0, 50.0);
    demoted_child.genealogy.record(&child, &["m"]);
    demoted_child.entities = vec![child];
    let err = check_transition(&before, &demoted_child).unwrap_err();
    assert!(err.contains("ranks below"), "{}", err);

    let mut orphan = before.clone();
    orphan.entities.push(at("stray", "Stray", 20.0, 20.0));
    assert!(check_transition(&before, &orphan).is_err());

    assert!(check_transition(&before, &before).is_ok());
}
