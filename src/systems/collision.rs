//! Collision resolution: recipe merges, the configured fallback for
//! unmatched pairs, and epiphanies coalescing into the singularity.

use crate::domain::{Entity, EntityKind, FallbackPolicy};

use super::{fresh_id, pair_mut, StepReport, SystemContext};

enum Contact {
    Apart,
    Merge(Entity),
    Bounce,
}

/// Resolve every touching pair once. Merged parents are removed and their
/// products appended after the survivors. No-op at or below the merge
/// threshold. A world holds at most one singularity.
pub fn resolve_collisions(entities: &mut Vec<Entity>, ctx: &mut SystemContext, report: &mut StepReport) {
    if ctx.temperature <= ctx.params.merge_threshold {
        return;
    }

    let count = entities.len();
    let mut consumed = vec![false; count];
    let mut spawned: Vec<Entity> = Vec::new();
    let mut singular = entities.iter().any(|e| e.kind == EntityKind::Singularity);

    for i in 0..count {
        if consumed[i] {
            continue;
        }
        for j in (i + 1)..count {
            if consumed[j] {
                continue;
            }
            report.pair_checks += 1;

            match contact(&entities[i], &entities[j], singular, ctx) {
                Contact::Apart => {}
                Contact::Bounce => {
                    let (a, b) = pair_mut(entities, i, j);
                    if bounce(a, b) {
                        report.bounces += 1;
                    }
                }
                Contact::Merge(mut child) => {
                    let genealogy = &*ctx.genealogy;
                    child.id = fresh_id(id_prefix(child.kind), ctx.next_serial, |candidate| {
                        genealogy.node(candidate).is_some()
                            || entities.iter().any(|e| e.id == candidate)
                            || spawned.iter().any(|e| e.id == candidate)
                    });
                    ctx.genealogy.record(&child, &[entities[i].id.as_str(), entities[j].id.as_str()]);

                    match child.kind {
                        EntityKind::Singularity => {
                            singular = true;
                            report.singularities += 1;
                        }
                        _ => report.merges += 1,
                    }
                    consumed[i] = true;
                    consumed[j] = true;
                    spawned.push(child);
                    break;
                }
            }
        }
    }

    if spawned.is_empty() {
        return;
    }

    let mut idx = 0;
    entities.retain(|_| {
        let keep = !consumed[idx];
        idx += 1;
        keep
    });
    entities.extend(spawned);
}

fn contact(a: &Entity, b: &Entity, singular: bool, ctx: &SystemContext) -> Contact {
    let p = ctx.params;
    let dist = a.pos.distance(b.pos);

    if a.is_terminal() || b.is_terminal() {
        // Only two epiphanies coalesce, and only while no singularity exists.
        let both_epiphanies = a.kind == EntityKind::Epiphany && b.kind == EntityKind::Epiphany;
        if both_epiphanies && !singular && dist < p.singularity_radius {
            return Contact::Merge(singularity(a, b, ctx));
        }
        return Contact::Apart;
    }

    if dist >= p.merge_radius {
        return Contact::Apart;
    }

    if let Some(recipe) = ctx.recipes.find(a, b) {
        let result = &recipe.result;
        let (kind, fallback_class) = if result.terminal {
            (EntityKind::Epiphany, &p.epiphany_class)
        } else {
            (EntityKind::Merged.max(a.kind).max(b.kind), &p.default_merge_class)
        };
        let class = if result.visual_class.is_empty() { fallback_class } else { &result.visual_class };
        return Contact::Merge(compound(a, b, result.label.clone(), kind, class.clone(), ctx));
    }

    match p.fallback {
        FallbackPolicy::GenericMerge if a.kind == EntityKind::Base && b.kind == EntityKind::Base => {
            let label = format!("{} + {}", first_word(&a.label), first_word(&b.label));
            let class = p.default_merge_class.clone();
            Contact::Merge(compound(a, b, label, EntityKind::Merged, class, ctx))
        }
        FallbackPolicy::Bounce => Contact::Bounce,
        _ => Contact::Apart,
    }
}

fn compound(a: &Entity, b: &Entity, label: String, kind: EntityKind, visual_class: String, ctx: &SystemContext) -> Entity {
    let p = ctx.params;
    Entity {
        id: String::new(),
        label,
        kind,
        visual_class,
        pos: a.pos.midpoint(b.pos),
        vel: a.vel.midpoint(b.vel),
        scale: grown_scale(a.scale.max(b.scale), p.merge_growth, p.max_scale),
        lineage: vec![a.label.clone(), b.label.clone()],
    }
}

fn singularity(a: &Entity, b: &Entity, ctx: &SystemContext) -> Entity {
    let p = ctx.params;
    Entity {
        id: String::new(),
        label: p.singularity_label.clone(),
        kind: EntityKind::Singularity,
        visual_class: a.visual_class.clone(),
        pos: p.anchor,
        vel: crate::core::Vec2::zero(),
        scale: grown_scale(a.scale.max(b.scale), p.singularity_growth, p.max_scale),
        lineage: vec![a.label.clone(), b.label.clone()],
    }
}

/// Products always outgrow their larger parent. Near the cap the step
/// shrinks to half the remaining headroom, so scale never passes `cap`.
fn grown_scale(parent: f32, growth: f32, cap: f32) -> f32 {
    if parent + growth < cap {
        parent + growth
    } else {
        parent + (cap - parent).max(0.0) * 0.5
    }
}

/// Reflect each entity's velocity away from the other if it is closing in.
/// Returns true if either velocity changed.
fn bounce(a: &mut Entity, b: &mut Entity) -> bool {
    let normal = (a.pos - b.pos).normalize();
    if normal.length_squared() == 0.0 {
        return false;
    }

    let mut changed = false;
    if a.vel.dot(normal) < 0.0 {
        a.vel = a.vel.reflect(normal);
        changed = true;
    }
    if b.vel.dot(normal) > 0.0 {
        b.vel = b.vel.reflect(normal);
        changed = true;
    }
    changed
}

fn id_prefix(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Singularity => "singularity",
        EntityKind::Epiphany => "epiphany",
        _ => "merged",
    }
}

fn first_word(label: &str) -> &str {
    label.split_whitespace().next().unwrap_or(label)
}
