//! Lineage graph export for diagram renderers.
//!
//! Nodes are every entity ever created in a run; edges point from parent to
//! the entity it produced.

use std::collections::{HashMap, HashSet};
use std::fmt::Write;

use crate::domain::{EntityKind, Genealogy};

/// Mermaid flowchart (`graph TD`). Node shape encodes the kind.
pub fn to_mermaid(genealogy: &Genealogy) -> String {
    let ids = mermaid_ids(genealogy);
    let lookup = |id: &str| ids.get(id).cloned().unwrap_or_else(|| mermaid_id(id));

    let mut out = String::from("graph TD\n");
    for node in genealogy.nodes() {
        let id = lookup(&node.id);
        let label = mermaid_label(&node.label);
        let _ = match node.kind {
            EntityKind::Base => writeln!(out, "    {}[\"{}\"]", id, label),
            EntityKind::Merged => writeln!(out, "    {}(\"{}\")", id, label),
            EntityKind::Epiphany => writeln!(out, "    {}{{{{\"{}\"}}}}", id, label),
            EntityKind::Singularity => writeln!(out, "    {}((\"{}\"))", id, label),
        };
    }
    for edge in genealogy.edges() {
        let _ = writeln!(out, "    {} --> {}", lookup(&edge.parent), lookup(&edge.child));
    }
    out
}

/// Graphviz digraph
pub fn to_dot(genealogy: &Genealogy) -> String {
    let mut out = String::from("digraph lineage {\n    rankdir=TB;\n");
    for node in genealogy.nodes() {
        let shape = match node.kind {
            EntityKind::Base => "box",
            EntityKind::Merged => "ellipse",
            EntityKind::Epiphany => "hexagon",
            EntityKind::Singularity => "doublecircle",
        };
        let _ = writeln!(
            out,
            "    \"{}\" [label=\"{}\", shape={}];",
            dot_escape(&node.id),
            dot_escape(&node.label),
            shape
        );
    }
    for edge in genealogy.edges() {
        let _ = writeln!(out, "    \"{}\" -> \"{}\";", dot_escape(&edge.parent), dot_escape(&edge.child));
    }
    out.push_str("}\n");
    out
}

/// One Mermaid identifier per entity id. Ids that sanitize to the same
/// identifier (`a-b`, `a_b`) get a numeric suffix in node order.
fn mermaid_ids(genealogy: &Genealogy) -> HashMap<&str, String> {
    let mut used = HashSet::new();
    let mut ids = HashMap::new();
    for node in genealogy.nodes() {
        if ids.contains_key(node.id.as_str()) {
            continue;
        }
        let base = mermaid_id(&node.id);
        let mut candidate = base.clone();
        let mut suffix = 1;
        while !used.insert(candidate.clone()) {
            candidate = format!("{}_{}", base, suffix);
            suffix += 1;
        }
        ids.insert(node.id.as_str(), candidate);
    }
    ids
}

/// Mermaid ids must be plain identifiers
fn mermaid_id(id: &str) -> String {
    id.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

fn mermaid_label(label: &str) -> String {
    label.replace('"', "#quot;")
}

fn dot_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
