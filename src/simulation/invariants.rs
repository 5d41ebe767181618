//! World invariants. A violation is an engine defect, not a recoverable
//! runtime condition: tests assert on these and debug builds of the facade
//! log them.

use std::collections::{HashMap, HashSet};

use crate::domain::{EntityKind, SimParams};

use super::settings::{MAX_TEMPERATURE, MIN_TEMPERATURE};
use super::WorldState;

/// Slack for float comparisons against bounds
const EPSILON: f32 = 1e-3;

/// Ids unique, coordinates finite and inside their bounds, speed capped,
/// temperature in range, at most one singularity
pub fn check_world(params: &SimParams, world: &WorldState) -> Result<(), String> {
    if !(MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&world.temperature) {
        return Err(format!("temperature {} out of range", world.temperature));
    }

    let singularities = world.entities.iter().filter(|e| e.kind == EntityKind::Singularity).count();
    if singularities > 1 {
        return Err(format!("{} singularities at frame {}", singularities, world.frame));
    }

    let mut ids = HashSet::with_capacity(world.entities.len());
    for e in world.entities.iter() {
        if !ids.insert(e.id.as_str()) {
            return Err(format!("duplicate id {} at frame {}", e.id, world.frame));
        }
        if !e.pos.is_finite() || !e.vel.is_finite() || !e.scale.is_finite() {
            return Err(format!("entity {} has non-finite state", e.id));
        }

        let (lo, hi) = if e.is_terminal() {
            (params.plane_min, params.plane_max)
        } else {
            (params.bound_min, params.bound_max)
        };
        let inside = |v: f32| v >= lo - EPSILON && v <= hi + EPSILON;
        if !inside(e.pos.x) || !inside(e.pos.y) {
            return Err(format!(
                "entity {} at ({}, {}) left [{}, {}]",
                e.id, e.pos.x, e.pos.y, lo, hi
            ));
        }
        if e.vel.length() > params.max_speed + EPSILON {
            return Err(format!("entity {} exceeds max speed ({})", e.id, e.vel.length()));
        }
        if e.scale > params.max_scale.max(1.0) + EPSILON {
            return Err(format!("entity {} grew past max scale ({})", e.id, e.scale));
        }
    }
    Ok(())
}

/// Kinds only move forward between two consecutive snapshots: surviving
/// entities keep or raise their kind, and every new entity outranks or
/// equals the parents it was produced from.
pub fn check_transition(before: &WorldState, after: &WorldState) -> Result<(), String> {
    let previous: HashMap<&str, _> = before.entities.iter().map(|e| (e.id.as_str(), e.kind)).collect();

    for e in after.entities.iter() {
        if let Some(&old) = previous.get(e.id.as_str()) {
            if e.kind < old {
                return Err(format!("entity {} reverted from {:?} to {:?}", e.id, old, e.kind));
            }
            continue;
        }

        let mut has_parent = false;
        for parent in after.genealogy.parents_of(&e.id) {
            has_parent = true;
            let parent_kind = previous
                .get(parent)
                .copied()
                .or_else(|| after.genealogy.node(parent).map(|n| n.kind));
            if let Some(pk) = parent_kind {
                if e.kind < pk {
                    return Err(format!(
                        "entity {} ({:?}) ranks below its parent {} ({:?})",
                        e.id, e.kind, parent, pk
                    ));
                }
            }
        }
        if !has_parent {
            return Err(format!("entity {} appeared without parents", e.id));
        }
    }
    Ok(())
}
