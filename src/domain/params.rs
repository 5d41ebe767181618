//! Tunable physics constants for a scenario.
//!
//! Defaults reproduce the interactive collision detector: a [5,95] playfield
//! inside the [0,100] plane, merging above 40 degrees, sublimation above 85.

use serde::{Deserialize, Serialize};

use crate::core::Vec2;

/// What happens when two entities touch but no recipe combines them
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FallbackPolicy {
    /// Two base entities fuse into a compound with a synthesized label
    #[default]
    GenericMerge,
    /// Elastic bounce along the line of centres, both entities survive
    Bounce,
    /// Entities pass through each other
    Ignore,
}

/// Fixed central body that entities ricochet off
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Obstacle {
    pub center: Vec2,
    pub radius: f32,
    /// Speed multiplier applied on every bounce (> 1 keeps the field lively)
    pub energy_gain: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimParams {
    // Playfield for non-terminal entities
    pub bound_min: f32,
    pub bound_max: f32,
    // Whole plane, used to clamp terminal entities
    pub plane_min: f32,
    pub plane_max: f32,

    pub repulsion_radius: f32,
    pub repulsion_strength: f32,

    pub attraction_threshold: f32,
    pub attraction_strength: f32,

    /// Velocity retained per frame at zero temperature
    pub base_friction: f32,
    /// Extra damping per degree
    pub heat_damping: f32,
    /// Noise amplitude per degree
    pub thermal_noise: f32,

    /// Displacement per unit velocity: base + thermal * temperature
    pub base_mobility: f32,
    pub thermal_mobility: f32,
    pub terminal_mobility: f32,
    pub max_speed: f32,

    pub anchor: Vec2,
    pub anchor_gain: f32,
    pub anchor_damping: f32,

    pub obstacle: Option<Obstacle>,

    pub merge_threshold: f32,
    pub merge_radius: f32,
    pub singularity_radius: f32,
    pub fallback: FallbackPolicy,
    pub merge_growth: f32,
    pub singularity_growth: f32,
    pub max_scale: f32,
    pub singularity_label: String,
    pub default_merge_class: String,

    pub sublimation_threshold: f32,
    pub sublimation_probability: f32,
    pub sublimation_scale: f32,
    pub epiphany_class: String,

    /// Display thresholds for the phase banner
    pub fusion_phase_above: f32,
    pub sublimation_phase_above: f32,

    pub seed: u32,
}

impl Default for SimParams {
    fn default() -> Self {
        SimParams {
            bound_min: 5.0,
            bound_max: 95.0,
            plane_min: 0.0,
            plane_max: 100.0,
            repulsion_radius: 15.0,
            repulsion_strength: 0.08,
            attraction_threshold: 20.0,
            attraction_strength: 0.01,
            base_friction: 0.95,
            heat_damping: 0.0005,
            thermal_noise: 0.02,
            base_mobility: 0.0,
            thermal_mobility: 0.008,
            terminal_mobility: 0.2,
            max_speed: 5.0,
            anchor: Vec2::new(50.0, 15.0),
            anchor_gain: 0.05,
            anchor_damping: 0.8,
            obstacle: None,
            merge_threshold: 40.0,
            merge_radius: 8.0,
            singularity_radius: 10.0,
            fallback: FallbackPolicy::GenericMerge,
            merge_growth: 0.2,
            singularity_growth: 0.5,
            max_scale: 3.0,
            singularity_label: "TOTALITY".to_string(),
            default_merge_class: "bg-gray-100 text-ink".to_string(),
            sublimation_threshold: 85.0,
            sublimation_probability: 0.02,
            sublimation_scale: 1.5,
            epiphany_class: "bg-accent text-ink".to_string(),
            fusion_phase_above: 40.0,
            sublimation_phase_above: 80.0,
            seed: 12345,
        }
    }
}

impl SimParams {
    /// Velocity multiplier for the current temperature (stronger damping when hot)
    #[inline]
    pub fn friction(&self, temperature: f32) -> f32 {
        (self.base_friction - self.heat_damping * temperature).clamp(0.0, 1.0)
    }

    #[inline]
    pub fn mobility(&self, temperature: f32) -> f32 {
        self.base_mobility + self.thermal_mobility * temperature
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        let scalars = [
            ("boundMin", self.bound_min),
            ("boundMax", self.bound_max),
            ("planeMin", self.plane_min),
            ("planeMax", self.plane_max),
            ("repulsionRadius", self.repulsion_radius),
            ("repulsionStrength", self.repulsion_strength),
            ("attractionThreshold", self.attraction_threshold),
            ("attractionStrength", self.attraction_strength),
            ("baseFriction", self.base_friction),
            ("heatDamping", self.heat_damping),
            ("thermalNoise", self.thermal_noise),
            ("baseMobility", self.base_mobility),
            ("thermalMobility", self.thermal_mobility),
            ("terminalMobility", self.terminal_mobility),
            ("maxSpeed", self.max_speed),
            ("anchorGain", self.anchor_gain),
            ("anchorDamping", self.anchor_damping),
            ("mergeThreshold", self.merge_threshold),
            ("mergeRadius", self.merge_radius),
            ("singularityRadius", self.singularity_radius),
            ("mergeGrowth", self.merge_growth),
            ("singularityGrowth", self.singularity_growth),
            ("maxScale", self.max_scale),
            ("sublimationThreshold", self.sublimation_threshold),
            ("sublimationProbability", self.sublimation_probability),
            ("sublimationScale", self.sublimation_scale),
        ];
        for (name, v) in scalars {
            if !v.is_finite() {
                return Err(format!("{} must be finite", name));
            }
            if v < 0.0 {
                return Err(format!("{} must not be negative (got {})", name, v));
            }
        }

        if !(self.plane_min <= self.bound_min && self.bound_min < self.bound_max && self.bound_max <= self.plane_max) {
            return Err(format!(
                "bounds [{}, {}] must lie inside plane [{}, {}]",
                self.bound_min, self.bound_max, self.plane_min, self.plane_max
            ));
        }
        if self.merge_radius >= self.repulsion_radius {
            return Err(format!(
                "mergeRadius ({}) must be smaller than repulsionRadius ({})",
                self.merge_radius, self.repulsion_radius
            ));
        }
        if self.sublimation_probability > 1.0 {
            return Err("sublimationProbability must be within [0, 1]".to_string());
        }
        if self.max_speed == 0.0 {
            return Err("maxSpeed must be positive".to_string());
        }
        if !self.anchor.is_finite()
            || self.anchor.x < self.plane_min
            || self.anchor.x > self.plane_max
            || self.anchor.y < self.plane_min
            || self.anchor.y > self.plane_max
        {
            return Err("anchor must lie inside the plane".to_string());
        }
        if let Some(ob) = &self.obstacle {
            if !ob.center.is_finite() || !ob.radius.is_finite() || !ob.energy_gain.is_finite() {
                return Err("obstacle values must be finite".to_string());
            }
            if ob.radius <= 0.0 || ob.energy_gain <= 0.0 {
                return Err("obstacle radius and energyGain must be positive".to_string());
            }
            let fits = ob.center.x - ob.radius > self.bound_min
                && ob.center.x + ob.radius < self.bound_max
                && ob.center.y - ob.radius > self.bound_min
                && ob.center.y + ob.radius < self.bound_max;
            if !fits {
                return Err(format!(
                    "obstacle (r={}) at ({}, {}) must fit inside the bounds",
                    ob.radius, ob.center.x, ob.center.y
                ));
            }
        }
        Ok(())
    }
}
