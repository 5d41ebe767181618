//! Built-in scenarios compiled into the engine.

use crate::core::Vec2;

use super::entity::Entity;
use super::params::{FallbackPolicy, Obstacle, SimParams};
use super::recipe::{Recipe, RecipeBook};
use super::scenario::Scenario;

const BASE_CLASS: &str = "bg-paper text-ink";
const COMPOUND_CLASS: &str = "bg-gray-100 text-ink";

/// (id, label, x, y, vx, vy)
const CONCEPTS: [(&str, &str, f32, f32, f32, f32); 14] = [
    ("alpha", "AlphaFold 3 Weights", 10.0, 15.0, 0.15, 0.05),
    ("towel", "Terry Cloth Physics", 80.0, 20.0, -0.1, 0.15),
    ("gpu", "H100 Grid", 20.0, 80.0, 0.1, -0.1),
    ("origami", "Riemannian Geometry", 85.0, 75.0, -0.05, -0.15),
    ("laundry", "Domestic Chores", 50.0, 50.0, 0.05, 0.05),
    ("kafka", "Kafka Streams", 30.0, 40.0, 0.12, -0.08),
    ("jazz", "Jazz Improvisation", 60.0, 30.0, -0.08, 0.12),
    ("fungi", "Mycelium Network", 40.0, 70.0, 0.08, 0.08),
    ("brutal", "Brutalist Concrete", 70.0, 60.0, -0.1, -0.05),
    ("quantum", "Quantum Entanglement", 15.0, 35.0, 0.09, -0.04),
    ("sourdough", "Sourdough Starter", 75.0, 85.0, -0.06, 0.03),
    ("supply", "Supply Chain", 55.0, 10.0, 0.04, 0.1),
    ("dopamine", "Dopamine Receptors", 25.0, 65.0, -0.07, -0.09),
    ("synth", "Vintage Synths", 90.0, 45.0, -0.1, 0.02),
];

const RECIPES: [(&str, &str, &str); 12] = [
    ("alpha", "towel", "Predictive Linen Folding"),
    ("gpu", "laundry", "High-Performance Washing"),
    ("origami", "towel", "Topo-Textiles"),
    ("kafka", "jazz", "Event-Driven Syncopation"),
    ("fungi", "gpu", "Biological Compute"),
    ("brutal", "origami", "Folded Concrete Structures"),
    ("jazz", "laundry", "Rhythmic Tumbling"),
    ("quantum", "supply", "Teleportation Logistics"),
    ("sourdough", "fungi", "Hyper-Active Yeast"),
    ("synth", "jazz", "Analog Improvisation"),
    ("dopamine", "gpu", "Addictive Compute"),
    ("brutal", "sourdough", "Edible Architecture"),
];

const EPIPHANIES: [&str; 6] = [
    "The Optimal Towel State",
    "Self-Organizing Laundry",
    "Entropic Fabric Singularity",
    "Sentient Concrete",
    "Fungal Cloud Infrastructure",
    "Infinite Bread Loops",
];

fn concepts() -> Vec<Entity> {
    CONCEPTS
        .iter()
        .map(|&(id, label, x, y, vx, vy)| {
            Entity::base(id, label, Vec2::new(x, y), Vec2::new(vx, vy)).with_visual_class(BASE_CLASS)
        })
        .collect()
}

fn recipes() -> RecipeBook {
    RecipeBook::new(
        RECIPES
            .iter()
            .map(|&(a, b, label)| Recipe::new(a, b, label, COMPOUND_CLASS))
            .collect(),
    )
}

fn epiphanies() -> Vec<String> {
    EPIPHANIES.iter().map(|s| s.to_string()).collect()
}

impl Scenario {
    /// The collision detector: fourteen concepts, twelve recipes, any two
    /// unrelated base concepts fuse generically.
    pub fn tangent() -> Self {
        Scenario::from_parts("tangent", SimParams::default(), concepts(), recipes(), epiphanies())
    }

    /// Same concepts orbiting a fixed core: entities ricochet off a central
    /// obstacle and unrelated pairs bounce apart instead of fusing.
    pub fn reactor() -> Self {
        let params = SimParams {
            repulsion_radius: 10.0,
            merge_radius: 6.0,
            fallback: FallbackPolicy::Bounce,
            obstacle: Some(Obstacle {
                center: Vec2::new(50.0, 50.0),
                radius: 12.0,
                energy_gain: 1.05,
            }),
            ..SimParams::default()
        };

        // The centre concept would start inside the core.
        let template = concepts()
            .into_iter()
            .map(|mut e| {
                if e.id == "laundry" {
                    e.pos = Vec2::new(50.0, 70.0);
                }
                e
            })
            .collect();

        Scenario::from_parts("reactor", params, template, recipes(), epiphanies())
    }

    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "tangent" => Some(Self::tangent()),
            "reactor" => Some(Self::reactor()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_pass_validation() {
        for name in ["tangent", "reactor"] {
            let s = Scenario::preset(name).expect("preset exists");
            let rebuilt = Scenario::new(
                s.name(),
                s.params().clone(),
                s.template().to_vec(),
                s.recipes().iter().cloned().collect(),
                s.epiphanies().to_vec(),
            );
            assert!(rebuilt.is_ok(), "{}: {:?}", name, rebuilt.err());
        }
    }

    #[test]
    fn reactor_keeps_concepts_out_of_the_core() {
        let s = Scenario::reactor();
        let ob = s.params().obstacle.expect("reactor has a core");
        for e in s.template() {
            assert!(e.pos.distance(ob.center) > ob.radius, "{} starts inside the core", e.id);
        }
    }

    #[test]
    fn unknown_preset_is_none() {
        assert!(Scenario::preset("nope").is_none());
    }
}
