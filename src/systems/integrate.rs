//! Position integration, wall handling and the optional central obstacle.

use crate::core::Vec2;
use crate::domain::{Entity, SimParams};

/// Used when an entity sits exactly on the obstacle centre
const FALLBACK_NORMAL: Vec2 = Vec2::new(0.0, -1.0);

/// Advance positions one frame. Non-terminal entities bounce off the
/// playfield walls; terminal entities are only clamped to the plane.
pub fn integrate(entities: &mut [Entity], params: &SimParams, temperature: f32, dt: f32) {
    let mobility = params.mobility(temperature) * dt;
    let terminal_mobility = params.terminal_mobility * dt;
    let (min, max) = (params.bound_min, params.bound_max);
    let (plane_min, plane_max) = (params.plane_min, params.plane_max);

    for e in entities.iter_mut() {
        e.vel = e.vel.clamp_length(params.max_speed);

        if e.is_terminal() {
            let next = e.pos + e.vel * terminal_mobility;
            e.pos = Vec2::new(next.x.clamp(plane_min, plane_max), next.y.clamp(plane_min, plane_max));
            continue;
        }

        let mut next = e.pos + e.vel * mobility;
        if next.x <= min || next.x >= max {
            e.vel.x = -e.vel.x;
        }
        if next.y <= min || next.y >= max {
            e.vel.y = -e.vel.y;
        }
        next.x = next.x.clamp(min, max);
        next.y = next.y.clamp(min, max);
        e.pos = next;
    }
}

/// Push non-terminal entities out of the obstacle and reflect inbound
/// velocity about the radial normal with an energy gain. Returns the number
/// of reflections.
pub fn resolve_obstacle(entities: &mut [Entity], params: &SimParams) -> u32 {
    let Some(obstacle) = params.obstacle else {
        return 0;
    };

    let mut bounces = 0u32;
    for e in entities.iter_mut().filter(|e| !e.is_terminal()) {
        let offset = e.pos - obstacle.center;
        let dist = offset.length();
        if dist >= obstacle.radius {
            continue;
        }

        let normal = if dist > 0.0001 { offset * (1.0 / dist) } else { FALLBACK_NORMAL };
        e.pos = obstacle.center + normal * obstacle.radius;

        if e.vel.dot(normal) < 0.0 {
            e.vel = (e.vel.reflect(normal) * obstacle.energy_gain).clamp_length(params.max_speed);
            bounces += 1;
        }

        e.pos.x = e.pos.x.clamp(params.bound_min, params.bound_max);
        e.pos.y = e.pos.y.clamp(params.bound_min, params.bound_max);
    }

    bounces
}
