//! Course dependency graph

use super::{Course, Relation, RelationKind};
use crate::debug;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Raw graph payload as served by the data source: `{nodes, links}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphData {
    /// Course nodes
    pub nodes: Vec<Course>,
    /// Requisite edges
    #[serde(default)]
    pub links: Vec<Relation>,
}

/// Read-only course graph loaded once per session
///
/// Adjacency is kept in three association lists:
/// - `prerequisites`: course -> prerequisite sources
/// - `corequisites`: course -> corequisite sources
/// - `dependents`: course -> courses requiring it (either kind)
///
/// Every list preserves input order, which the policy evaluator relies on
/// when it samples "the first N" prerequisites.
#[derive(Debug, Clone, Default)]
pub struct CourseGraph {
    courses: Vec<Course>,
    index: HashMap<String, usize>,
    relations: Vec<Relation>,
    prerequisites: HashMap<String, Vec<String>>,
    corequisites: HashMap<String, Vec<String>>,
    dependents: HashMap<String, Vec<String>>,
}

impl CourseGraph {
    /// Create an empty graph
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from raw data
    ///
    /// Duplicate course ids keep their first occurrence. Relations whose
    /// endpoints have no course node are dropped, as are repeated relations.
    #[must_use]
    pub fn from_data(data: GraphData) -> Self {
        let mut graph = Self::new();

        for course in data.nodes {
            let id = course.id.clone();
            if !graph.add_course(course) {
                debug!("Duplicate course '{id}' ignored");
            }
        }

        let mut dropped = 0usize;
        for relation in data.links {
            if !graph.contains(&relation.source) || !graph.contains(&relation.target) {
                debug!(
                    "Dropping {} {} -> {}: endpoint not in graph",
                    relation.kind, relation.source, relation.target
                );
                dropped += 1;
                continue;
            }
            graph.add_relation(relation);
        }

        if dropped > 0 {
            debug!("{dropped} malformed relation(s) filtered while building graph");
        }

        graph
    }

    fn add_course(&mut self, course: Course) -> bool {
        if self.index.contains_key(&course.id) {
            return false;
        }
        self.index.insert(course.id.clone(), self.courses.len());
        self.courses.push(course);
        true
    }

    fn add_relation(&mut self, relation: Relation) {
        if self.relations.contains(&relation) {
            return;
        }

        let sources = match relation.kind {
            RelationKind::Prerequisite => &mut self.prerequisites,
            RelationKind::Corequisite => &mut self.corequisites,
        };
        sources
            .entry(relation.target.clone())
            .or_default()
            .push(relation.source.clone());

        let dependents = self.dependents.entry(relation.source.clone()).or_default();
        if !dependents.contains(&relation.target) {
            dependents.push(relation.target.clone());
        }

        self.relations.push(relation);
    }

    /// Look up a course by id
    #[must_use]
    pub fn course(&self, id: &str) -> Option<&Course> {
        self.index.get(id).map(|&idx| &self.courses[idx])
    }

    /// Check if a course exists in the graph
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All courses in load order
    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// All relations that survived validation, in load order
    #[must_use]
    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// Direct prerequisite sources of a course, in input order
    #[must_use]
    pub fn prerequisites_of(&self, id: &str) -> &[String] {
        self.prerequisites.get(id).map_or(&[], Vec::as_slice)
    }

    /// Direct corequisite sources of a course, in input order
    #[must_use]
    pub fn corequisites_of(&self, id: &str) -> &[String] {
        self.corequisites.get(id).map_or(&[], Vec::as_slice)
    }

    /// Courses that list this course as a prerequisite or corequisite
    #[must_use]
    pub fn dependents_of(&self, id: &str) -> &[String] {
        self.dependents.get(id).map_or(&[], Vec::as_slice)
    }

    /// Distinct categories in first-seen order
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.courses
            .iter()
            .map(|c| c.category.as_str())
            .filter(|category| seen.insert(*category))
            .collect()
    }

    /// Number of courses in the graph
    #[must_use]
    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    /// Subgraph restricted to one category, keeping only edges between its courses
    #[must_use]
    pub fn filtered_by_category(&self, category: &str) -> Self {
        let nodes: Vec<Course> = self
            .courses
            .iter()
            .filter(|c| c.category == category)
            .cloned()
            .collect();
        Self::from_data(GraphData {
            nodes,
            links: self.relations.clone(),
        })
    }

    /// Raw `{nodes, links}` form of the graph
    #[must_use]
    pub fn to_data(&self) -> GraphData {
        GraphData {
            nodes: self.courses.clone(),
            links: self.relations.clone(),
        }
    }
}

impl std::fmt::Display for CourseGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Course graph ({} courses, {} relations):",
            self.courses.len(),
            self.relations.len()
        )?;
        writeln!(f)?;

        for course in &self.courses {
            let prereqs = self.prerequisites_of(&course.id);
            let coreqs = self.corequisites_of(&course.id);
            if prereqs.is_empty() && coreqs.is_empty() {
                writeln!(f, "  {} ← (no requisites)", course.id)?;
                continue;
            }
            write!(f, "  {} ← {}", course.id, prereqs.join(", "))?;
            if !coreqs.is_empty() {
                write!(f, " [coreq: {}]", coreqs.join(", "))?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
