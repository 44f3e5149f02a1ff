//! WASM bindings exported to JavaScript/TypeScript
//!
//! The browser renderer owns fetching and drawing; it hands the raw graph and
//! policy payloads to [`WasmPlanner`] and reads views back as JSON strings.

use crate::config::{split_course_list, LayoutConfig, PlanConfig};
use crate::core::layout::Position;
use crate::core::loader::{parse_graph_json, parse_policy_json};
use crate::core::models::{CourseGraph, PolicyTable};
use crate::core::session::PlanSession;
use crate::get_version;
use wasm_bindgen::prelude::*;

/// Returns the current `CoursePlanner` version for the WASM build.
#[wasm_bindgen]
pub fn get_wasm_version() -> String {
    format!("CoursePlanner WASM v{}", get_version())
}

fn to_js<E: std::fmt::Display>(e: E) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Planning session handle for the browser
#[wasm_bindgen]
pub struct WasmPlanner {
    session: PlanSession,
}

#[wasm_bindgen]
impl WasmPlanner {
    /// Build a session from graph JSON, policy JSON (may be empty) and a
    /// comma-separated mandatory course list
    ///
    /// # Errors
    /// Rejects with the parse error message when a payload is malformed
    #[wasm_bindgen(constructor)]
    pub fn new(
        graph_json: &str,
        policy_json: &str,
        mandatory: &str,
        home_prefix: &str,
    ) -> Result<WasmPlanner, JsValue> {
        let graph = CourseGraph::from_data(parse_graph_json(graph_json).map_err(to_js)?);
        let policy = if policy_json.trim().is_empty() {
            PolicyTable::new()
        } else {
            parse_policy_json(policy_json).map_err(to_js)?
        };
        let settings = PlanConfig {
            mandatory: split_course_list(mandatory),
            home_prefix: home_prefix.to_string(),
        };

        Ok(Self {
            session: PlanSession::new(graph, policy, &settings, LayoutConfig::default()),
        })
    }

    /// Flip a course in or out of the plan; returns whether it is now selected
    pub fn toggle(&mut self, id: &str) -> bool {
        self.session.toggle_plan(id)
    }

    /// Add a course to the plan
    pub fn add(&mut self, id: &str) -> bool {
        self.session.add_to_plan(id)
    }

    /// Remove a course from the plan
    pub fn remove(&mut self, id: &str) -> bool {
        self.session.remove_from_plan(id)
    }

    /// Filter by category; an empty string clears the filter
    pub fn select_category(&mut self, category: &str) -> bool {
        let category = (!category.is_empty()).then(|| category.to_string());
        self.session.select_category(category)
    }

    /// Switch to the rearranged grid
    pub fn rearrange(&mut self) {
        self.session.rearrange();
    }

    /// Back to force-directed layout
    pub fn reset_layout(&mut self) {
        self.session.reset_layout();
    }

    /// Record the final position of a dragged node
    pub fn drag(&mut self, id: &str, x: f64, y: f64) -> bool {
        self.session.drag_node(id, Position::new(x, y))
    }

    /// Current graph view as JSON
    ///
    /// # Errors
    /// Rejects if serialization fails
    pub fn view_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.view()).map_err(to_js)
    }

    /// Course list under the active filter as JSON
    ///
    /// # Errors
    /// Rejects if serialization fails
    pub fn course_list_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.course_list()).map_err(to_js)
    }

    /// Detail panel for a course as JSON (`null` for unknown ids)
    ///
    /// # Errors
    /// Rejects if serialization fails
    pub fn detail_json(&mut self, id: &str) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.open_detail(id)).map_err(to_js)
    }
}
