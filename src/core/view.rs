//! Renderer-facing snapshots of the session
//!
//! Edges are plain id pairs; the renderer keeps its own id → node lookup.

use crate::core::category::color_for;
use crate::core::layout::{LayoutMode, LayoutState, Position};
use crate::core::models::{Course, CourseGraph, RelationKind};
use crate::core::resolver::{PlanState, Resolver};
use serde::Serialize;
use std::collections::HashSet;

/// A rendered course node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeView {
    /// Course id
    pub id: String,
    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Category tag
    pub category: String,
    /// Fill color keyed by category
    pub color: &'static str,
    /// Whether the course is in the plan (highlight)
    pub in_plan: bool,
    /// Credit count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credits: Option<u32>,
    /// Fixed coordinate, present for rearranged or dragged nodes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// A rendered edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeView {
    /// Dependency course id
    pub source: String,
    /// Dependent course id
    pub target: String,
    /// Relation kind
    pub kind: RelationKind,
}

/// Everything the renderer needs to draw the current graph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphView {
    /// Layout mode
    pub mode: LayoutMode,
    /// Active category filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Rendered nodes in graph load order
    pub nodes: Vec<NodeView>,
    /// Edges between rendered nodes
    pub edges: Vec<EdgeView>,
}

impl GraphView {
    /// Node by id
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&NodeView> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Ids of rendered nodes
    #[must_use]
    pub fn node_ids(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.id.as_str()).collect()
    }
}

/// Entry in the side course list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseListEntry {
    /// Course id
    pub id: String,
    /// "ID: Name" label
    pub label: String,
    /// Category tag
    pub category: String,
    /// Category color
    pub color: &'static str,
    /// In the plan
    pub in_plan: bool,
    /// Currently drawn
    pub visible: bool,
}

/// Detail panel for one course
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseDetail {
    /// The course
    pub course: Course,
    /// Category color
    pub color: &'static str,
    /// In the plan
    pub in_plan: bool,
    /// Currently drawn
    pub visible: bool,
    /// All direct prerequisites
    pub prerequisites: Vec<String>,
    /// All direct corequisites
    pub corequisites: Vec<String>,
    /// Courses requiring this one
    pub dependents: Vec<String>,
    /// Requisites surfaced when this course is added to the plan
    pub representative: Vec<String>,
}

fn in_category(course: &Course, category: Option<&str>) -> bool {
    category.is_none_or(|c| course.category == c)
}

/// Build the graph view for the visible set, optionally restricted to one category
#[must_use]
pub fn graph_view(
    graph: &CourseGraph,
    plan: &PlanState,
    layout: &LayoutState,
    category: Option<&str>,
) -> GraphView {
    let nodes: Vec<NodeView> = graph
        .courses()
        .iter()
        .filter(|c| plan.is_visible(&c.id) && in_category(c, category))
        .map(|c| NodeView {
            id: c.id.clone(),
            name: c.name.clone(),
            category: c.category.clone(),
            color: color_for(&c.category),
            in_plan: plan.is_selected(&c.id),
            credits: c.credits,
            position: layout.position_of(&c.id),
        })
        .collect();

    let rendered: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
    let edges = graph
        .relations()
        .iter()
        .filter(|r| rendered.contains(r.source.as_str()) && rendered.contains(r.target.as_str()))
        .map(|r| EdgeView {
            source: r.source.clone(),
            target: r.target.clone(),
            kind: r.kind,
        })
        .collect();

    GraphView {
        mode: layout.mode(),
        category: category.map(ToString::to_string),
        nodes,
        edges,
    }
}

/// Course list for the side panel: every course in the category (all when `None`)
#[must_use]
pub fn course_list(
    graph: &CourseGraph,
    plan: &PlanState,
    category: Option<&str>,
) -> Vec<CourseListEntry> {
    graph
        .courses()
        .iter()
        .filter(|c| in_category(c, category))
        .map(|c| CourseListEntry {
            id: c.id.clone(),
            label: c.label(),
            category: c.category.clone(),
            color: color_for(&c.category),
            in_plan: plan.is_selected(&c.id),
            visible: plan.is_visible(&c.id),
        })
        .collect()
}

/// Detail panel contents, `None` for unknown ids
#[must_use]
pub fn course_detail(
    graph: &CourseGraph,
    resolver: &Resolver,
    plan: &PlanState,
    id: &str,
) -> Option<CourseDetail> {
    let course = graph.course(id)?;
    let mut representative = resolver.closure(id);
    representative.retain(|rep| rep != id);

    Some(CourseDetail {
        course: course.clone(),
        color: color_for(&course.category),
        in_plan: plan.is_selected(id),
        visible: plan.is_visible(id),
        prerequisites: graph.prerequisites_of(id).to_vec(),
        corequisites: graph.corequisites_of(id).to_vec(),
        dependents: graph.dependents_of(id).to_vec(),
        representative,
    })
}
