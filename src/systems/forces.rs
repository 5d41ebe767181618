//! Velocity updates: pairwise repulsion, recipe attraction, thermal noise
//! with friction, and anchor seeking for terminal entities.

use crate::core::rng::next_centered;
use crate::core::Vec2;
use crate::domain::{Entity, RecipeBook, SimParams};

use super::pair_mut;

/// Below this separation a pair is treated as coincident and skipped
const MIN_SEPARATION: f32 = 0.1;

/// Push apart every pair closer than the repulsion radius. Force grows
/// linearly as the gap closes. Two terminal entities share the anchor and
/// don't repel each other. Returns the number of pairs examined.
pub fn apply_repulsion(entities: &mut [Entity], params: &SimParams) -> u32 {
    let radius = params.repulsion_radius;
    let radius_sq = radius * radius;
    let count = entities.len();
    let mut checks = 0u32;

    for i in 0..count {
        for j in (i + 1)..count {
            checks += 1;
            let (a, b) = pair_mut(entities, i, j);
            if a.is_terminal() && b.is_terminal() {
                continue;
            }

            let delta = a.pos - b.pos;
            let dist_sq = delta.length_squared();
            if dist_sq >= radius_sq || dist_sq <= MIN_SEPARATION * MIN_SEPARATION {
                continue;
            }

            let dist = dist_sq.sqrt();
            let force = (radius - dist) * params.repulsion_strength;
            let push = delta * (force / dist);

            a.vel += push;
            b.vel -= push;
        }
    }

    checks
}

/// Pull recipe partners together with a constant force once the field is
/// warm enough. Distance doesn't matter, only direction.
pub fn apply_attraction(entities: &mut [Entity], recipes: &RecipeBook, params: &SimParams, temperature: f32) {
    if temperature <= params.attraction_threshold || recipes.is_empty() {
        return;
    }

    let count = entities.len();
    for i in 0..count {
        for j in (i + 1)..count {
            let (a, b) = pair_mut(entities, i, j);
            if a.is_terminal() || b.is_terminal() {
                continue;
            }

            let delta = b.pos - a.pos;
            if delta.length_squared() <= MIN_SEPARATION * MIN_SEPARATION {
                continue;
            }
            if !recipes.pairs_with(a, b) {
                continue;
            }

            let pull = delta.normalize() * params.attraction_strength;
            a.vel += pull;
            b.vel -= pull;
        }
    }
}

/// Thermal jitter plus temperature-dependent friction for non-terminal entities
pub fn apply_thermal_motion(entities: &mut [Entity], params: &SimParams, temperature: f32, rng: &mut u32) {
    let amplitude = params.thermal_noise * temperature;
    let friction = params.friction(temperature);

    for e in entities.iter_mut().filter(|e| !e.is_terminal()) {
        if amplitude > 0.0 {
            e.vel += Vec2::new(next_centered(rng) * amplitude, next_centered(rng) * amplitude);
        }
        e.vel *= friction;
    }
}

/// Terminal entities spring toward the anchor with heavy damping so they
/// settle instead of oscillating
pub fn apply_goal_seeking(entities: &mut [Entity], params: &SimParams) {
    for e in entities.iter_mut().filter(|e| e.is_terminal()) {
        e.vel += (params.anchor - e.pos) * params.anchor_gain;
        e.vel *= params.anchor_damping;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EntityKind, Recipe};

    fn at(id: &str, x: f32, y: f32) -> Entity {
        Entity::base(id, id, Vec2::new(x, y), Vec2::zero())
    }

    #[test]
    fn repulsion_is_equal_and_opposite() {
        let params = SimParams::default();
        let mut es = vec![at("a", 50.0, 50.0), at("b", 55.0, 50.0)];
        let checks = apply_repulsion(&mut es, &params);

        assert_eq!(checks, 1);
        assert!(es[0].vel.x < 0.0);
        assert!((es[0].vel.x + es[1].vel.x).abs() < 1e-6);
        let expected = (params.repulsion_radius - 5.0) * params.repulsion_strength;
        assert!((es[1].vel.x - expected).abs() < 1e-5);
    }

    #[test]
    fn repulsion_skips_far_and_coincident_pairs() {
        let params = SimParams::default();
        let mut es = vec![at("a", 10.0, 10.0), at("b", 10.0, 10.0), at("c", 90.0, 90.0)];
        apply_repulsion(&mut es, &params);
        for e in &es {
            assert_eq!(e.vel, Vec2::zero());
        }
    }

    #[test]
    fn terminal_pairs_do_not_repel() {
        let params = SimParams::default();
        let mut es = vec![
            at("a", 50.0, 15.0).with_kind(EntityKind::Epiphany),
            at("b", 52.0, 15.0).with_kind(EntityKind::Epiphany),
        ];
        apply_repulsion(&mut es, &params);
        assert_eq!(es[0].vel, Vec2::zero());
    }

    #[test]
    fn attraction_only_for_recipe_partners_when_warm() {
        let params = SimParams::default();
        let recipes = RecipeBook::new(vec![Recipe::new("a", "b", "AB", "")]);
        let mut es = vec![at("a", 20.0, 50.0), at("b", 80.0, 50.0), at("c", 50.0, 80.0)];

        apply_attraction(&mut es, &recipes, &params, 10.0);
        assert_eq!(es[0].vel, Vec2::zero());

        apply_attraction(&mut es, &recipes, &params, 50.0);
        assert!((es[0].vel.x - params.attraction_strength).abs() < 1e-6);
        assert!((es[1].vel.x + params.attraction_strength).abs() < 1e-6);
        assert_eq!(es[2].vel, Vec2::zero());
    }

    #[test]
    fn cold_field_only_applies_friction() {
        let params = SimParams::default();
        let mut rng = 1u32;
        let mut es = vec![at("a", 50.0, 50.0)];
        es[0].vel = Vec2::new(1.0, 0.0);
        apply_thermal_motion(&mut es, &params, 0.0, &mut rng);
        assert!((es[0].vel.x - params.base_friction).abs() < 1e-6);
        assert_eq!(es[0].vel.y, 0.0);
        assert_eq!(rng, 1, "no noise drawn at zero temperature");
    }

    #[test]
    fn goal_seeking_heads_for_anchor() {
        let params = SimParams::default();
        let mut es = vec![at("e", 50.0, 60.0).with_kind(EntityKind::Epiphany)];
        apply_goal_seeking(&mut es, &params);
        assert!(es[0].vel.y < 0.0);
        assert_eq!(es[0].vel.x, 0.0);
    }
}
