//! Selection/visibility resolution
//!
//! Visible courses are the selected courses plus each one's representative
//! prerequisites and corequisites (see [`crate::core::policy`]). Adding a
//! course only unions its closure into the visible set; removing one
//! rebuilds the set from scratch, since another selected course may still
//! need a shared prerequisite.

use crate::core::models::{CourseGraph, PolicyTable};
use crate::core::policy::representative_prereqs;
use crate::debug;
use std::collections::HashSet;

/// Plan selection and the derived visible set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanState {
    /// Courses explicitly added to the plan
    pub selected: HashSet<String>,
    /// Courses currently rendered
    pub visible: HashSet<String>,
}

impl PlanState {
    /// Empty plan
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a course was explicitly added to the plan
    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Whether a course is rendered
    #[must_use]
    pub fn is_visible(&self, id: &str) -> bool {
        self.visible.contains(id)
    }
}

/// Pure resolution functions over a graph and its policy table
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    graph: &'a CourseGraph,
    policy: &'a PolicyTable,
    home_prefix: &'a str,
}

impl<'a> Resolver<'a> {
    /// Create a resolver
    #[must_use]
    pub const fn new(graph: &'a CourseGraph, policy: &'a PolicyTable, home_prefix: &'a str) -> Self {
        Self {
            graph,
            policy,
            home_prefix,
        }
    }

    /// The course itself plus its representative requisites; empty for unknown ids
    #[must_use]
    pub fn closure(&self, id: &str) -> Vec<String> {
        if !self.graph.contains(id) {
            return Vec::new();
        }
        let mut closure = vec![id.to_string()];
        for rep in representative_prereqs(id, self.graph, self.policy, self.home_prefix) {
            if rep != id {
                closure.push(rep);
            }
        }
        closure
    }

    /// Union of the closures of every selected course
    #[must_use]
    pub fn resolve_visible<'s, I>(&self, selected: I) -> HashSet<String>
    where
        I: IntoIterator<Item = &'s String>,
    {
        selected
            .into_iter()
            .flat_map(|id| self.closure(id))
            .collect()
    }

    /// Add a course to the plan and union its closure into the visible set
    ///
    /// Existing visible entries are left untouched. Returns `false` (and does
    /// nothing) when the course is not in the graph.
    pub fn add_to_plan(&self, state: &mut PlanState, id: &str) -> bool {
        if !self.graph.contains(id) {
            debug!("Ignoring add of unknown course '{id}'");
            return false;
        }
        state.selected.insert(id.to_string());
        state.visible.extend(self.closure(id));
        true
    }

    /// Remove a course from the plan and rebuild the visible set
    ///
    /// Returns `false` when the course was not selected.
    pub fn remove_from_plan(&self, state: &mut PlanState, id: &str) -> bool {
        if !state.selected.remove(id) {
            return false;
        }
        state.visible = self.resolve_visible(&state.selected);
        true
    }

    /// Remove the course if selected, otherwise add it. Returns whether it is now selected.
    pub fn toggle_plan(&self, state: &mut PlanState, id: &str) -> bool {
        if state.is_selected(id) {
            self.remove_from_plan(state, id);
            false
        } else {
            self.add_to_plan(state, id)
        }
    }

    /// Initial plan: each mandatory course in the graph is added in order
    ///
    /// Mandatory ids missing from the graph are skipped.
    #[must_use]
    pub fn bootstrap<S: AsRef<str>>(&self, mandatory: &[S]) -> PlanState {
        let mut state = PlanState::new();
        for id in mandatory {
            let id = id.as_ref();
            if !self.add_to_plan(&mut state, id) {
                debug!("Mandatory course '{id}' not in graph; skipped");
            }
        }
        state
    }
}
