use std::collections::HashSet;

use serde::Deserialize;

use crate::core::Vec2;

use super::entity::{Entity, EntityKind};
use super::params::SimParams;
use super::recipe::{Recipe, RecipeBook};

/// Static configuration of one simulation: physics constants, the starting
/// entities, the recipe table and the epiphany label pool.
#[derive(Clone, Debug)]
pub struct Scenario {
    name: String,
    params: SimParams,
    template: Vec<Entity>,
    recipes: RecipeBook,
    epiphanies: Vec<String>,
}

impl Scenario {
    pub fn new(
        name: impl Into<String>,
        params: SimParams,
        template: Vec<Entity>,
        recipes: Vec<Recipe>,
        epiphanies: Vec<String>,
    ) -> Result<Self, String> {
        let scenario = Self {
            name: name.into(),
            params,
            template,
            recipes: RecipeBook::new(recipes),
            epiphanies,
        };
        scenario.validate()?;
        Ok(scenario)
    }

    /// Assemble compiled-in data without validation (covered by preset tests)
    pub(super) fn from_parts(
        name: &str,
        params: SimParams,
        template: Vec<Entity>,
        recipes: RecipeBook,
        epiphanies: Vec<String>,
    ) -> Self {
        Self {
            name: name.to_string(),
            params,
            template,
            recipes,
            epiphanies,
        }
    }

    pub fn from_bundle_json(json: &str) -> Result<Self, String> {
        let bundle: BundleRoot = serde_json::from_str(json).map_err(|e| e.to_string())?;
        Self::from_bundle(bundle)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    pub fn template(&self) -> &[Entity] {
        &self.template
    }

    pub fn recipes(&self) -> &RecipeBook {
        &self.recipes
    }

    pub fn epiphanies(&self) -> &[String] {
        &self.epiphanies
    }

    /// Same scenario with a different RNG seed
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.params.seed = seed;
        self
    }

    fn from_bundle(bundle: BundleRoot) -> Result<Self, String> {
        let default_class = bundle.base_class.unwrap_or_default();
        let template = bundle
            .entities
            .into_iter()
            .map(|e| Entity {
                id: e.id,
                label: e.label,
                kind: e.kind,
                visual_class: e.visual_class.unwrap_or_else(|| default_class.clone()),
                pos: Vec2::new(e.x, e.y),
                vel: Vec2::new(e.vx, e.vy),
                scale: e.scale,
                lineage: Vec::new(),
            })
            .collect();

        Self::new(bundle.name, bundle.params, template, bundle.recipes, bundle.epiphanies)
    }

    fn validate(&self) -> Result<(), String> {
        let p = &self.params;
        p.validate()?;
        self.recipes.validate()?;

        let mut seen = HashSet::with_capacity(self.template.len());
        for e in self.template.iter() {
            if e.id.is_empty() {
                return Err(format!("entity '{}' has an empty id", e.label));
            }
            if e.label.is_empty() {
                return Err(format!("entity {} has an empty label", e.id));
            }
            if !seen.insert(e.id.as_str()) {
                return Err(format!("duplicate entity id: {}", e.id));
            }
            if !e.pos.is_finite() || !e.vel.is_finite() {
                return Err(format!("entity {} has a non-finite position or velocity", e.id));
            }
            if !(e.scale.is_finite() && e.scale > 0.0) {
                return Err(format!("entity {} needs a positive scale", e.id));
            }
            if e.kind != EntityKind::Singularity && e.scale >= p.max_scale {
                return Err(format!("entity {} starts at or above the max scale {}", e.id, p.max_scale));
            }
            let (lo, hi) = if e.is_terminal() {
                (p.plane_min, p.plane_max)
            } else {
                (p.bound_min, p.bound_max)
            };
            if e.pos.x < lo || e.pos.x > hi || e.pos.y < lo || e.pos.y > hi {
                return Err(format!(
                    "entity {} at ({}, {}) starts outside [{}, {}]",
                    e.id, e.pos.x, e.pos.y, lo, hi
                ));
            }
        }

        let can_sublimate = p.sublimation_probability > 0.0 && p.sublimation_threshold < 100.0;
        if can_sublimate && self.epiphanies.is_empty() {
            return Err("sublimation is enabled but the epiphany pool is empty".to_string());
        }
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BundleRoot {
    name: String,
    #[serde(default)]
    params: SimParams,
    /// Visual class for entities that don't set their own
    #[serde(default)]
    base_class: Option<String>,
    entities: Vec<BundleEntity>,
    #[serde(default)]
    recipes: Vec<Recipe>,
    #[serde(default)]
    epiphanies: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BundleEntity {
    id: String,
    label: String,
    #[serde(default)]
    kind: EntityKind,
    x: f32,
    y: f32,
    #[serde(default)]
    vx: f32,
    #[serde(default)]
    vy: f32,
    #[serde(default = "default_scale")]
    scale: f32,
    #[serde(default)]
    visual_class: Option<String>,
}

fn default_scale() -> f32 {
    1.0
}
