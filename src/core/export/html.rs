//! Standalone HTML snapshot rendered with askama
//!
//! The page lists the rendered courses and requisites and embeds the view
//! JSON in a `<script type="application/json">` block for client scripts.

use super::{ExportError, ViewExporter};
use crate::core::category::short_label;
use crate::core::layout::LayoutMode;
use crate::core::models::RelationKind;
use crate::core::view::GraphView;
use askama::Template;

struct LegendEntry<'a> {
    label: &'a str,
    color: &'a str,
}

struct CourseRow<'a> {
    id: &'a str,
    name: &'a str,
    category: &'a str,
    color: &'a str,
    credits: String,
    in_plan: bool,
}

struct EdgeRow<'a> {
    source: &'a str,
    target: &'a str,
    corequisite: bool,
}

#[derive(Template)]
#[template(path = "graph.html")]
struct GraphPage<'a> {
    title: &'a str,
    mode: &'a str,
    category: &'a str,
    plan_count: usize,
    legend: Vec<LegendEntry<'a>>,
    rows: Vec<CourseRow<'a>>,
    edges: Vec<EdgeRow<'a>>,
    view_json: String,
}

/// HTML page exporter
#[derive(Debug, Clone)]
pub struct HtmlExporter {
    title: String,
}

impl HtmlExporter {
    /// Create an exporter with the given page title
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl ViewExporter for HtmlExporter {
    fn render(&self, view: &GraphView) -> Result<String, ExportError> {
        let mut legend: Vec<LegendEntry> = Vec::new();
        for node in &view.nodes {
            let label = short_label(&node.category);
            if !legend.iter().any(|l| l.label == label) {
                legend.push(LegendEntry {
                    label,
                    color: node.color,
                });
            }
        }

        let rows = view
            .nodes
            .iter()
            .map(|n| CourseRow {
                id: &n.id,
                name: n.name.as_deref().unwrap_or_default(),
                category: &n.category,
                color: n.color,
                credits: n.credits.map(|c| c.to_string()).unwrap_or_default(),
                in_plan: n.in_plan,
            })
            .collect();

        let edges = view
            .edges
            .iter()
            .map(|e| EdgeRow {
                source: &e.source,
                target: &e.target,
                corequisite: e.kind == RelationKind::Corequisite,
            })
            .collect();

        let page = GraphPage {
            title: &self.title,
            mode: match view.mode {
                LayoutMode::Force => "force",
                LayoutMode::Rearranged => "rearranged",
            },
            category: view.category.as_deref().unwrap_or("All"),
            plan_count: view.nodes.iter().filter(|n| n.in_plan).count(),
            legend,
            rows,
            edges,
            // Keep "</script>" inside string values from closing the data block
            view_json: serde_json::to_string(view)?.replace("</", "<\\/"),
        };

        Ok(page.render()?)
    }
}
