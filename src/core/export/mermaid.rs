//! Mermaid flowchart exporter
//!
//! Prerequisites are solid arrows, corequisites dashed. Nodes are filled with
//! their category color and in-plan courses get a heavy border.

use super::{ExportError, ViewExporter};
use crate::core::models::RelationKind;
use crate::core::view::{GraphView, NodeView};
use std::collections::HashMap;
use std::fmt::Write;

/// Exporter for Mermaid flowchart syntax
#[derive(Debug, Default, Clone, Copy)]
pub struct MermaidExporter;

impl MermaidExporter {
    /// Create a new Mermaid exporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Flowchart text for a view
    ///
    /// Node ids are `c0`, `c1`, ... in view order; course ids only appear in
    /// labels, so ids differing only in punctuation stay distinct.
    #[must_use]
    pub fn flowchart(view: &GraphView) -> String {
        let mut output = String::from("flowchart TB\n");
        output.push_str("    classDef inPlan stroke:#111827,stroke-width:4px\n");

        let mut node_ids: HashMap<&str, String> = HashMap::with_capacity(view.nodes.len());
        for (index, node) in view.nodes.iter().enumerate() {
            let node_id = Self::node_id(index);
            let _ = writeln!(output, "    {node_id}[\"{}\"]", Self::label(node));
            let _ = writeln!(output, "    style {node_id} fill:{},color:#ffffff", node.color);
            if node.in_plan {
                let _ = writeln!(output, "    class {node_id} inPlan");
            }
            node_ids.insert(node.id.as_str(), node_id);
        }

        if !view.edges.is_empty() {
            output.push('\n');
        }
        for edge in &view.edges {
            let (Some(source), Some(target)) = (
                node_ids.get(edge.source.as_str()),
                node_ids.get(edge.target.as_str()),
            ) else {
                continue;
            };
            let arrow = match edge.kind {
                RelationKind::Prerequisite => "-->",
                RelationKind::Corequisite => "-.->",
            };
            let _ = writeln!(output, "    {source} {arrow} {target}");
        }

        output
    }

    fn label(node: &NodeView) -> String {
        let label = node
            .name
            .as_ref()
            .map_or_else(|| node.id.clone(), |name| format!("{}<br/>{name}", node.id));
        label.replace('"', "#quot;")
    }

    fn node_id(index: usize) -> String {
        format!("c{index}")
    }
}

impl ViewExporter for MermaidExporter {
    fn render(&self, view: &GraphView) -> Result<String, ExportError> {
        Ok(Self::flowchart(view))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::layout::LayoutMode;
    use crate::core::view::EdgeView;

    fn node(id: &str, name: Option<&str>, in_plan: bool) -> NodeView {
        NodeView {
            id: id.to_string(),
            name: name.map(ToString::to_string),
            category: "Software Engineering".to_string(),
            color: "#16a34a",
            in_plan,
            credits: None,
            position: None,
        }
    }

    #[test]
    fn test_flowchart() {
        let view = GraphView {
            mode: LayoutMode::Force,
            category: None,
            nodes: vec![
                node("EECE 2160", Some("Embedded \"Design\""), true),
                node("EECE 2161", None, false),
                node("CS 2500", None, false),
            ],
            edges: vec![
                EdgeView {
                    source: "EECE 2161".to_string(),
                    target: "EECE 2160".to_string(),
                    kind: RelationKind::Corequisite,
                },
                EdgeView {
                    source: "CS 2500".to_string(),
                    target: "EECE 2160".to_string(),
                    kind: RelationKind::Prerequisite,
                },
            ],
        };

        let chart = MermaidExporter::flowchart(&view);
        assert!(chart.starts_with("flowchart TB\n"));
        assert!(chart.contains("c0[\"EECE 2160<br/>Embedded #quot;Design#quot;\"]"));
        assert!(chart.contains("class c0 inPlan"));
        assert!(!chart.contains("class c1 inPlan"));
        assert!(chart.contains("c1 -.-> c0"));
        assert!(chart.contains("c2 --> c0"));
        assert!(chart.contains("style c2 fill:#16a34a"));
    }

    #[test]
    fn test_punctuation_variants_stay_distinct() {
        let view = GraphView {
            mode: LayoutMode::Force,
            category: None,
            nodes: vec![node("EECE 2150", None, false), node("EECE-2150", None, false)],
            edges: vec![EdgeView {
                source: "EECE 2150".to_string(),
                target: "EECE-2150".to_string(),
                kind: RelationKind::Prerequisite,
            }],
        };

        let chart = MermaidExporter::flowchart(&view);
        assert!(chart.contains("c0[\"EECE 2150\"]"));
        assert!(chart.contains("c1[\"EECE-2150\"]"));
        assert!(chart.contains("c0 --> c1"));
    }
}
