use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// What a matching collision produces
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeResult {
    pub label: String,
    #[serde(default)]
    pub visual_class: String,
    /// Result is an epiphany (core) rather than an ordinary compound
    #[serde(default)]
    pub terminal: bool,
}

/// Unordered ingredient pair -> result. Ingredients match an entity's id or label.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub ingredients: [String; 2],
    pub result: RecipeResult,
}

impl Recipe {
    pub fn new(a: &str, b: &str, label: &str, visual_class: &str) -> Self {
        Self {
            ingredients: [a.to_string(), b.to_string()],
            result: RecipeResult {
                label: label.to_string(),
                visual_class: visual_class.to_string(),
                terminal: false,
            },
        }
    }

    pub fn terminal(mut self) -> Self {
        self.result.terminal = true;
        self
    }

    pub fn matches(&self, a: &Entity, b: &Entity) -> bool {
        let [x, y] = &self.ingredients;
        (a.answers_to(x) && b.answers_to(y)) || (a.answers_to(y) && b.answers_to(x))
    }
}

/// Immutable recipe table. Lookup is a linear membership scan in declaration
/// order; tables hold a dozen entries.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecipeBook {
    recipes: Vec<Recipe>,
}

impl RecipeBook {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter()
    }

    /// First recipe combining `a` and `b`
    pub fn find(&self, a: &Entity, b: &Entity) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.matches(a, b))
    }

    pub fn pairs_with(&self, a: &Entity, b: &Entity) -> bool {
        self.find(a, b).is_some()
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        for (i, r) in self.recipes.iter().enumerate() {
            let [a, b] = &r.ingredients;
            if a.is_empty() || b.is_empty() {
                return Err(format!("recipe {} has an empty ingredient", i));
            }
            if a == b {
                return Err(format!("recipe {} combines '{}' with itself", i, a));
            }
            if r.result.label.is_empty() {
                return Err(format!("recipe {} ({} + {}) has an empty result label", i, a, b));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Vec2;

    fn entity(id: &str, label: &str) -> Entity {
        Entity::base(id, label, Vec2::zero(), Vec2::zero())
    }

    #[test]
    fn lookup_is_unordered_and_accepts_labels() {
        let book = RecipeBook::new(vec![Recipe::new("alpha", "towel", "Predictive Linen Folding", "")]);
        let alpha = entity("alpha", "AlphaFold 3 Weights");
        let towel = entity("t-1", "towel");
        let jazz = entity("jazz", "Jazz Improvisation");

        assert_eq!(
            book.find(&towel, &alpha).map(|r| r.result.label.as_str()),
            Some("Predictive Linen Folding")
        );
        assert!(book.pairs_with(&alpha, &towel));
        assert!(!book.pairs_with(&alpha, &jazz));
    }

    #[test]
    fn validate_rejects_self_pairs() {
        let book = RecipeBook::new(vec![Recipe::new("gpu", "gpu", "Bigger Grid", "")]);
        assert!(book.validate().is_err());
    }
}
