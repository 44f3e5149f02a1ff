//! Plan command handler

use super::open_session;
use course_planner::config::Config;
use course_planner::core::export::ExportFormat;
use course_planner::core::layout::Position;
use course_planner::core::session::PlanSession;
use course_planner::{verbose, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Options collected from the `plan` subcommand
#[derive(Debug, Default)]
pub struct PlanOptions {
    /// Courses to add
    pub add: Vec<String>,
    /// Courses to remove
    pub remove: Vec<String>,
    /// Skip the mandatory bootstrap
    pub no_mandatory: bool,
    /// Category filter
    pub category: Option<String>,
    /// Switch to the rearranged grid
    pub rearrange: bool,
    /// Manual node positions
    pub pins: Vec<(String, Position)>,
    /// Output format name
    pub format: String,
    /// Output path (`-` for stdout)
    pub output: Option<PathBuf>,
}

/// Apply the requested actions to a session in their documented order
pub fn apply(session: &mut PlanSession, options: &PlanOptions) -> Result<(), String> {
    if let Some(category) = &options.category {
        if !session.select_category(Some(category.clone())) {
            return Err(format!("Unknown category '{category}'"));
        }
    }
    for id in &options.add {
        if !session.add_to_plan(id) {
            warn!("Course '{id}' not found; not added");
        }
    }
    for id in &options.remove {
        if !session.remove_from_plan(id) {
            warn!("Course '{id}' is not in the plan; not removed");
        }
    }
    for (id, position) in &options.pins {
        if !session.drag_node(id, *position) {
            warn!("Course '{id}' not found; pin ignored");
        }
    }
    if options.rearrange {
        session.rearrange();
    }
    Ok(())
}

fn default_output(out_dir: &str, format: ExportFormat) -> PathBuf {
    Path::new(out_dir).join(format!("plan.{}", format.extension()))
}

/// Build the plan and write the exported view
pub fn run(config: &Config, options: &PlanOptions) -> Result<(), String> {
    let format: ExportFormat = options.format.parse()?;
    let mut session = open_session(config, options.no_mandatory)?;
    apply(&mut session, options)?;

    let view = session.view();
    verbose!(
        "Plan: {} selected, {} nodes, {} edges",
        session.plan().selected.len(),
        view.nodes.len(),
        view.edges.len()
    );

    let rendered = format.render(&view).map_err(|e| e.to_string())?;
    match options.output.as_deref() {
        Some(path) if path == Path::new("-") => {
            println!("{rendered}");
        }
        output => {
            let path = output.map_or_else(
                || default_output(&config.paths.out_dir, format),
                Path::to_path_buf,
            );
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
            }
            fs::write(&path, rendered)
                .map_err(|e| format!("Failed to write {}: {e}", path.display()))?;
            println!("✓ {format} view written: {}", path.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use course_planner::config::{LayoutConfig, PlanConfig};
    use course_planner::core::layout::LayoutMode;
    use course_planner::core::models::{Course, CourseGraph, GraphData, PolicyTable, Relation};

    fn session() -> PlanSession {
        let graph = CourseGraph::from_data(GraphData {
            nodes: vec![
                Course::new("EECE 2150"),
                Course::new("EECE 2531"),
                Course::new("MATH 2341"),
            ],
            links: vec![
                Relation::prerequisite("EECE 2150", "EECE 2531"),
                Relation::prerequisite("MATH 2341", "EECE 2150"),
            ],
        });
        let settings = PlanConfig {
            mandatory: vec!["EECE 2150".to_string()],
            home_prefix: "EECE".to_string(),
        };
        PlanSession::new(graph, PolicyTable::new(), &settings, LayoutConfig::default())
    }

    #[test]
    fn test_apply_runs_actions_in_order() {
        let mut session = session();
        let pin = Position::new(5.0, 6.0);
        let options = PlanOptions {
            add: vec!["EECE 2531".to_string(), "EECE 9999".to_string()],
            remove: vec!["EECE 2150".to_string()],
            pins: vec![("MATH 2341".to_string(), pin)],
            rearrange: true,
            ..PlanOptions::default()
        };

        apply(&mut session, &options).unwrap();
        let view = session.view();
        assert_eq!(view.mode, LayoutMode::Rearranged);
        assert_eq!(view.node_ids(), vec!["EECE 2150", "EECE 2531"]);
        assert!(!view.node("EECE 2150").unwrap().in_plan);
        assert_eq!(session.layout().position_of("MATH 2341"), Some(pin));
    }

    #[test]
    fn test_apply_rejects_unknown_category() {
        let mut session = session();
        let options = PlanOptions {
            category: Some("Basket Weaving".to_string()),
            ..PlanOptions::default()
        };
        assert!(apply(&mut session, &options).is_err());
    }

    #[test]
    fn test_default_output() {
        assert_eq!(
            default_output("out", ExportFormat::Mermaid),
            PathBuf::from("out/plan.mmd")
        );
    }
}
