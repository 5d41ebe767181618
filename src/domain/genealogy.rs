use serde::Serialize;

use super::entity::{Entity, EntityKind};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenealogyNode {
    pub id: String,
    pub label: String,
    pub kind: EntityKind,
}

/// Parent -> child edge between entity ids
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GenealogyEdge {
    pub parent: String,
    pub child: String,
}

/// Every entity created during a run and how each derived one was produced.
/// Nodes are never removed, so consumed parents stay visible.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Genealogy {
    nodes: Vec<GenealogyNode>,
    edges: Vec<GenealogyEdge>,
}

impl Genealogy {
    pub fn from_entities(entities: &[Entity]) -> Self {
        let mut g = Genealogy::default();
        for e in entities {
            g.add_node(e);
        }
        g
    }

    pub fn nodes(&self) -> &[GenealogyNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GenealogyEdge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&GenealogyNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn parents_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.edges
            .iter()
            .filter(move |e| e.child == id)
            .map(|e| e.parent.as_str())
    }

    pub(crate) fn record(&mut self, child: &Entity, parent_ids: &[&str]) {
        self.add_node(child);
        for parent in parent_ids {
            self.edges.push(GenealogyEdge {
                parent: (*parent).to_string(),
                child: child.id.clone(),
            });
        }
    }

    fn add_node(&mut self, e: &Entity) {
        self.nodes.push(GenealogyNode {
            id: e.id.clone(),
            label: e.label.clone(),
            kind: e.kind,
        });
    }
}
