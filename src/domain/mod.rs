//! Domain model: entities, recipes, scenario configuration and lineage.

pub mod entity;
pub mod genealogy;
pub mod params;
pub mod presets;
pub mod recipe;
pub mod scenario;

pub use entity::{Entity, EntityKind};
pub use genealogy::{Genealogy, GenealogyEdge, GenealogyNode};
pub use params::{FallbackPolicy, Obstacle, SimParams};
pub use recipe::{Recipe, RecipeBook, RecipeResult};
pub use scenario::Scenario;
