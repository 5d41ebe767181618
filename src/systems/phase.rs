//! Temperature phases and sublimation.
//!
//! Phases only label the regime for the UI. The behaviour switches
//! (attraction, merging, sublimation) read their own thresholds from
//! `SimParams`.

use serde::Serialize;

use crate::core::rng::{next_f32, next_index};
use crate::core::Vec2;
use crate::domain::{Entity, EntityKind, SimParams};

use super::{fresh_id, StepReport, SystemContext};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Static concepts, potential energy only
    Lattice,
    /// Collisions create compounds
    Fusion,
    /// Compounds boil off into epiphanies
    Sublimation,
}

impl Phase {
    pub fn from_temperature(params: &SimParams, temperature: f32) -> Self {
        if temperature > params.sublimation_phase_above {
            Phase::Sublimation
        } else if temperature > params.fusion_phase_above {
            Phase::Fusion
        } else {
            Phase::Lattice
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::Lattice => "PHASE 1: LATTICE",
            Phase::Fusion => "PHASE 2: FUSION",
            Phase::Sublimation => "PHASE 3: SUBLIMATION",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Phase::Lattice => "Static concepts. Potential energy only.",
            Phase::Fusion => "Collisions create new compounds.",
            Phase::Sublimation => "Solid -> Gas. Epiphanies form.",
        }
    }
}

/// Above the sublimation threshold each merged compound may spontaneously
/// turn into an epiphany drawn from the pool. The new entity gets a fresh id
/// and records the compound it came from.
pub fn sublimate(entities: &mut [Entity], ctx: &mut SystemContext, report: &mut StepReport) {
    let p = ctx.params;
    if ctx.temperature <= p.sublimation_threshold || ctx.epiphanies.is_empty() {
        return;
    }

    for i in 0..entities.len() {
        if entities[i].kind != EntityKind::Merged {
            continue;
        }
        if next_f32(ctx.rng) >= p.sublimation_probability {
            continue;
        }

        let label = ctx.epiphanies[next_index(ctx.rng, ctx.epiphanies.len())].clone();
        let genealogy = &*ctx.genealogy;
        let id = fresh_id("epiphany", ctx.next_serial, |candidate| {
            genealogy.node(candidate).is_some() || entities.iter().any(|e| e.id == candidate)
        });

        let e = &mut entities[i];
        let parent_id = std::mem::replace(&mut e.id, id);
        let previous_label = std::mem::replace(&mut e.label, label);
        e.kind = EntityKind::Epiphany;
        e.lineage = vec![previous_label];
        e.scale = e.scale.max(p.sublimation_scale);
        e.vel = Vec2::zero();
        e.visual_class = p.epiphany_class.clone();

        ctx.genealogy.record(e, &[parent_id.as_str()]);
        report.sublimations += 1;
    }
}
