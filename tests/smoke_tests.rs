//! Integration smoke tests for `course_planner`

use course_planner::core::export::ExportFormat;
use course_planner::core::loader::{load_graph, load_policy};
use course_planner::core::policy::unmatched_references;
use course_planner::get_version;

#[test]
fn version_is_not_empty() {
    let v = get_version();
    assert!(!v.trim().is_empty());
}

#[test]
fn bundled_sample_data_loads() {
    let graph = load_graph("data/eece_courses.json").expect("sample graph");
    let policy = load_policy("data/eece_policy.json").expect("sample policy");

    assert!(graph.contains("EECE 2140"));
    assert!(graph.contains("EECE 5641"));
    assert_eq!(graph.relations().len(), graph.to_data().links.len());
    assert_eq!(unmatched_references(&graph, &policy), Vec::<String>::new());
    assert_eq!(ExportFormat::default(), ExportFormat::Json);
}
