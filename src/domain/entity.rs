use serde::{Deserialize, Serialize};

use crate::core::Vec2;

/// Lifecycle tier of an entity. Ordered: a derived entity never has a lower
/// kind than its parents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum EntityKind {
    /// Initial concept from the scenario template
    #[default]
    Base = 0,
    /// Product of a collision
    Merged = 1,
    /// High-order product (also called a core). Goal-seeks the anchor.
    Epiphany = 2,
    /// Coalesced epiphanies. Never merges again.
    Singularity = 3,
}

impl EntityKind {
    /// Terminal kinds ignore walls and temperature-driven motion
    pub fn is_terminal(self) -> bool {
        matches!(self, EntityKind::Epiphany | EntityKind::Singularity)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Base => "base",
            EntityKind::Merged => "merged",
            EntityKind::Epiphany => "epiphany",
            EntityKind::Singularity => "singularity",
        }
    }
}

/// A simulated concept particle
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub id: String,
    pub label: String,
    pub kind: EntityKind,
    /// Opaque hint for the renderer (CSS classes in the web app)
    pub visual_class: String,
    pub pos: Vec2,
    pub vel: Vec2,
    pub scale: f32,
    /// Labels of the entities this one was produced from, in merge order
    pub lineage: Vec<String>,
}

impl Entity {
    pub fn base(id: impl Into<String>, label: impl Into<String>, pos: Vec2, vel: Vec2) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind: EntityKind::Base,
            visual_class: String::new(),
            pos,
            vel,
            scale: 1.0,
            lineage: Vec::new(),
        }
    }

    pub fn with_kind(mut self, kind: EntityKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_visual_class(mut self, class: impl Into<String>) -> Self {
        self.visual_class = class.into();
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.kind.is_terminal()
    }

    /// True if a recipe ingredient names this entity by id or label
    #[inline]
    pub fn answers_to(&self, ingredient: &str) -> bool {
        self.id == ingredient || self.label == ingredient
    }
}
