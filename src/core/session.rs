//! Interactive planning session
//!
//! [`PlanSession`] owns the loaded graph and policy table together with the
//! mutable plan, layout and filter state. Every user action goes through
//! `&mut self`; views are rebuilt on demand.

use crate::config::{LayoutConfig, PlanConfig};
use crate::core::layout::{LayoutState, Position};
use crate::core::models::{Course, CourseGraph, PolicyTable};
use crate::core::policy::unmatched_references;
use crate::core::resolver::{PlanState, Resolver};
use crate::core::view::{self, CourseDetail, CourseListEntry, GraphView};
use crate::{debug, info, warn};

/// Session state for one user
#[derive(Debug, Clone)]
pub struct PlanSession {
    graph: CourseGraph,
    policy: PolicyTable,
    home_prefix: String,
    plan: PlanState,
    layout: LayoutState,
    category: Option<String>,
    detail: Option<String>,
}

/// Courses currently drawn, in graph order
fn rendered<'g>(graph: &'g CourseGraph, plan: &PlanState, category: Option<&str>) -> Vec<&'g Course> {
    graph
        .courses()
        .iter()
        .filter(|c| plan.is_visible(&c.id) && category.is_none_or(|cat| c.category == cat))
        .collect()
}

impl PlanSession {
    /// Start a session with the plan bootstrapped from `settings.mandatory`
    #[must_use]
    pub fn new(
        graph: CourseGraph,
        policy: PolicyTable,
        settings: &PlanConfig,
        layout: LayoutConfig,
    ) -> Self {
        for issue in unmatched_references(&graph, &policy) {
            debug!("{issue}");
        }
        let plan = Resolver::new(&graph, &policy, &settings.home_prefix).bootstrap(&settings.mandatory);
        info!(
            "Session started: {} of {} mandatory courses in plan, {} visible",
            plan.selected.len(),
            settings.mandatory.len(),
            plan.visible.len()
        );

        Self {
            graph,
            policy,
            home_prefix: settings.home_prefix.clone(),
            plan,
            layout: LayoutState::new(layout),
            category: None,
            detail: None,
        }
    }

    /// The loaded course graph
    #[must_use]
    pub const fn graph(&self) -> &CourseGraph {
        &self.graph
    }

    /// The loaded policy table
    #[must_use]
    pub const fn policy(&self) -> &PolicyTable {
        &self.policy
    }

    /// Current selection and visible set
    #[must_use]
    pub const fn plan(&self) -> &PlanState {
        &self.plan
    }

    /// Current layout state
    #[must_use]
    pub const fn layout(&self) -> &LayoutState {
        &self.layout
    }

    /// Active category filter
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Course whose detail panel is open
    #[must_use]
    pub fn detail_focus(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Resolver over this session's graph and policies
    #[must_use]
    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.graph, &self.policy, &self.home_prefix)
    }

    /// Restrict the view to one category, or clear the filter with `None`
    ///
    /// Unknown categories are ignored and return `false`.
    pub fn select_category(&mut self, category: Option<String>) -> bool {
        if let Some(name) = &category {
            if !self.graph.categories().contains(&name.as_str()) {
                warn!("Unknown category '{name}'");
                return false;
            }
        }
        debug!("Category filter: {category:?}");
        self.category = category;
        self.refresh_layout();
        true
    }

    /// Open the detail panel for a course
    pub fn open_detail(&mut self, id: &str) -> Option<CourseDetail> {
        let detail = self.detail(id)?;
        self.detail = Some(id.to_string());
        Some(detail)
    }

    /// Close the detail panel
    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    /// Detail for a course without changing focus
    #[must_use]
    pub fn detail(&self, id: &str) -> Option<CourseDetail> {
        view::course_detail(&self.graph, &self.resolver(), &self.plan, id)
    }

    /// Add a course to the plan; `false` for unknown ids
    pub fn add_to_plan(&mut self, id: &str) -> bool {
        let added = Resolver::new(&self.graph, &self.policy, &self.home_prefix)
            .add_to_plan(&mut self.plan, id);
        if added {
            self.refresh_layout();
        }
        added
    }

    /// Remove a course from the plan; `false` when it was not selected
    pub fn remove_from_plan(&mut self, id: &str) -> bool {
        let removed = Resolver::new(&self.graph, &self.policy, &self.home_prefix)
            .remove_from_plan(&mut self.plan, id);
        if removed {
            self.refresh_layout();
        }
        removed
    }

    /// Flip a course's membership. Returns whether it is now in the plan.
    pub fn toggle_plan(&mut self, id: &str) -> bool {
        let was_selected = self.plan.is_selected(id);
        let selected = Resolver::new(&self.graph, &self.policy, &self.home_prefix)
            .toggle_plan(&mut self.plan, id);
        if selected != was_selected {
            self.refresh_layout();
        }
        selected
    }

    /// Switch to the rearranged grid for the rendered nodes
    pub fn rearrange(&mut self) {
        let courses = rendered(&self.graph, &self.plan, self.category.as_deref());
        debug!("Rearranging {} nodes", courses.len());
        self.layout.rearrange(&courses);
    }

    /// Return to force-directed layout and drop every pin
    pub fn reset_layout(&mut self) {
        self.layout.reset();
    }

    /// Pin a node at a dragged position; `false` for unknown ids
    pub fn drag_node(&mut self, id: &str, position: Position) -> bool {
        if !self.graph.contains(id) {
            return false;
        }
        self.layout.drag(id, position);
        true
    }

    /// Snapshot of what the renderer should draw
    #[must_use]
    pub fn view(&self) -> GraphView {
        view::graph_view(&self.graph, &self.plan, &self.layout, self.category.as_deref())
    }

    /// Side panel course list under the active filter
    #[must_use]
    pub fn course_list(&self) -> Vec<CourseListEntry> {
        view::course_list(&self.graph, &self.plan, self.category.as_deref())
    }

    fn refresh_layout(&mut self) {
        let courses = rendered(&self.graph, &self.plan, self.category.as_deref());
        self.layout.refresh(&courses);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::layout::LayoutMode;
    use crate::core::models::{GraphData, Relation};

    const HW: &str = "Electrical Engineering/Hardware";
    const SW: &str = "Software Engineering";

    fn session(mandatory: &[&str]) -> PlanSession {
        let graph = CourseGraph::from_data(GraphData {
            nodes: vec![
                Course::new("EECE 2150").with_category(HW),
                Course::new("EECE 2531").with_category(HW),
                Course::new("EECE 2560").with_category(SW),
                Course::new("EECE 2160").with_category(SW),
                Course::new("MATH 1341"),
            ],
            links: vec![
                Relation::prerequisite("EECE 2150", "EECE 2531"),
                Relation::prerequisite("MATH 1341", "EECE 2531"),
                Relation::prerequisite("EECE 2160", "EECE 2560"),
            ],
        });
        let settings = PlanConfig {
            mandatory: mandatory.iter().map(ToString::to_string).collect(),
            home_prefix: "EECE".to_string(),
        };
        PlanSession::new(graph, PolicyTable::new(), &settings, LayoutConfig::default())
    }

    #[test]
    fn test_new_bootstraps_mandatory() {
        let session = session(&["EECE 2140", "EECE 2150"]);
        assert!(session.plan().is_selected("EECE 2150"));
        assert!(!session.plan().is_visible("EECE 2140"));
        assert_eq!(session.view().node_ids(), vec!["EECE 2150"]);
    }

    #[test]
    fn test_toggle_round_trip() {
        let mut session = session(&[]);
        assert!(session.toggle_plan("EECE 2531"));
        assert_eq!(session.view().nodes.len(), 3);
        assert!(!session.toggle_plan("EECE 2531"));
        assert!(session.view().nodes.is_empty());
    }

    #[test]
    fn test_toggle_refreshes_rearranged_grid() {
        let mut session = session(&["EECE 2150"]);
        session.rearrange();

        assert!(session.toggle_plan("EECE 2560"));
        let view = session.view();
        assert!(view.node("EECE 2560").unwrap().position.is_some());
        assert!(view.node("EECE 2160").unwrap().position.is_some());

        assert!(!session.toggle_plan("EECE 2560"));
        assert!(session.layout().position_of("EECE 2160").is_none());
        assert!(!session.toggle_plan("EECE 9999"));
    }

    #[test]
    fn test_category_filter() {
        let mut session = session(&["EECE 2531", "EECE 2560"]);
        assert!(session.select_category(Some(SW.to_string())));
        assert_eq!(session.view().node_ids(), vec!["EECE 2560", "EECE 2160"]);
        assert_eq!(session.course_list().len(), 2);

        assert!(!session.select_category(Some("Basket Weaving".to_string())));
        assert_eq!(session.category(), Some(SW));

        assert!(session.select_category(None));
        assert_eq!(session.view().nodes.len(), 5);
    }

    #[test]
    fn test_rearrange_and_additions() {
        let mut session = session(&["EECE 2150"]);
        session.rearrange();
        assert_eq!(session.layout().mode(), LayoutMode::Rearranged);
        assert!(session.view().node("EECE 2150").unwrap().position.is_some());

        session.add_to_plan("EECE 2560");
        let view = session.view();
        assert!(view.node("EECE 2560").unwrap().position.is_some());
        assert!(view.node("EECE 2160").unwrap().position.is_some());
    }

    #[test]
    fn test_drag_survives_rearrange_until_reset() {
        let mut session = session(&["EECE 2531"]);
        let pinned = Position::new(12.0, -4.0);
        assert!(session.drag_node("MATH 1341", pinned));
        assert!(!session.drag_node("EECE 9999", pinned));

        session.rearrange();
        assert_eq!(session.view().node("MATH 1341").unwrap().position, Some(pinned));

        session.reset_layout();
        let view = session.view();
        assert_eq!(view.mode, LayoutMode::Force);
        assert!(view.nodes.iter().all(|n| n.position.is_none()));
    }

    #[test]
    fn test_open_detail() {
        let mut session = session(&[]);
        let detail = session.open_detail("EECE 2531").unwrap();
        assert_eq!(detail.prerequisites, vec!["EECE 2150", "MATH 1341"]);
        assert_eq!(session.detail_focus(), Some("EECE 2531"));

        assert!(session.open_detail("EECE 9999").is_none());
        assert_eq!(session.detail_focus(), Some("EECE 2531"));
        session.close_detail();
        assert!(session.detail_focus().is_none());
    }
}
