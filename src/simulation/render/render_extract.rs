//! Snapshot extraction for the external renderer.

use serde::Serialize;

use crate::domain::{EntityKind, SimParams};
use crate::systems::Phase;

use super::WorldState;

/// One drawable entity
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotEntity {
    pub id: String,
    pub label: String,
    pub kind: EntityKind,
    pub visual_class: String,
    pub x: f32,
    pub y: f32,
    pub scale: f32,
}

/// What the renderer needs for one frame
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub frame: u64,
    pub temperature: f32,
    pub phase: Phase,
    pub phase_label: &'static str,
    pub entities: Vec<SnapshotEntity>,
}

impl Snapshot {
    /// Any epiphany or singularity on screen (drives the insight banner)
    pub fn has_epiphany(&self) -> bool {
        self.entities.iter().any(|e| e.kind.is_terminal())
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

pub(super) fn extract(params: &SimParams, world: &WorldState) -> Snapshot {
    let phase = Phase::from_temperature(params, world.temperature);
    Snapshot {
        frame: world.frame,
        temperature: world.temperature,
        phase,
        phase_label: phase.label(),
        entities: world
            .entities
            .iter()
            .map(|e| SnapshotEntity {
                id: e.id.clone(),
                label: e.label.clone(),
                kind: e.kind,
                visual_class: e.visual_class.clone(),
                x: e.pos.x,
                y: e.pos.y,
                scale: e.scale,
            })
            .collect(),
    }
}
