//! Prerequisite policy evaluation
//!
//! Chooses the *representative* prerequisites shown when a course enters the
//! plan. The result is a display simplification, not a validity check:
//!
//! - no rule, or an `and` rule: every direct prerequisite
//! - `or` rule: up to 3 home-department prerequisites, or up to 2 others when
//!   none carry the home prefix
//! - `complex` rule: walk the tree; an OR contributes only its first child
//!   as authored, an AND the union of its children
//!
//! The OR choice is positional, not ranked. Policy authors decide which
//! alternative is shown by ordering the children; the intended ordering
//! (easiest vs. most common) is not recorded in the data.
//!
//! Policy output is intersected with the course's actual prerequisite edges,
//! and corequisites are always appended unfiltered.

use crate::core::models::course::course_prefix;
use crate::core::models::{CourseGraph, LogicNode, PolicyRule, PolicyTable};

/// Sample size for an OR pool with home-department prerequisites
pub const OR_HOME_SAMPLE: usize = 3;

/// Sample size for an OR pool with no home-department prerequisites
pub const OR_OTHER_SAMPLE: usize = 2;

/// Representative prerequisite and corequisite sources for a course
///
/// Returns ids in display order without duplicates. Unknown courses yield an
/// empty list; policy leaves without a matching edge are dropped.
#[must_use]
pub fn representative_prereqs(
    course_id: &str,
    graph: &CourseGraph,
    policy: &PolicyTable,
    home_prefix: &str,
) -> Vec<String> {
    if !graph.contains(course_id) {
        return Vec::new();
    }

    let prereqs = graph.prerequisites_of(course_id);

    let chosen: Vec<&str> = match policy.get(course_id) {
        None | Some(PolicyRule::And) => prereqs.iter().map(String::as_str).collect(),
        Some(PolicyRule::Or) => sample_or_pool(prereqs, home_prefix),
        Some(PolicyRule::Complex { logic }) => {
            let mut picked = Vec::new();
            collect_representatives(logic, &mut picked);
            picked
        }
    };

    let mut result: Vec<String> = Vec::new();
    for id in chosen {
        if prereqs.iter().any(|p| p == id) && !result.iter().any(|r| r == id) {
            result.push(id.to_string());
        }
    }

    for coreq in graph.corequisites_of(course_id) {
        if !result.contains(coreq) {
            result.push(coreq.clone());
        }
    }

    result
}

/// Whether an id belongs to the home department namespace
///
/// The id's namespace token must equal `home_prefix`; "CSE 1" is not in "CS".
#[must_use]
pub fn has_home_prefix(id: &str, home_prefix: &str) -> bool {
    !home_prefix.is_empty() && course_prefix(id) == home_prefix
}

/// Policy references that can never be displayed, sorted by course id
///
/// Reports rules keyed by courses missing from the graph and complex-rule
/// leaves with no prerequisite edge into their course. Evaluation drops both
/// silently; this is for diagnostics only.
#[must_use]
pub fn unmatched_references(graph: &CourseGraph, policy: &PolicyTable) -> Vec<String> {
    let mut courses: Vec<&String> = policy.course_ids().collect();
    courses.sort();

    let mut issues = Vec::new();
    for course_id in courses {
        if !graph.contains(course_id) {
            issues.push(format!("policy rule for unknown course '{course_id}'"));
            continue;
        }
        if let Some(PolicyRule::Complex { logic }) = policy.get(course_id) {
            let prereqs = graph.prerequisites_of(course_id);
            for leaf in logic.course_ids() {
                if !prereqs.iter().any(|p| p == leaf) {
                    issues.push(format!(
                        "policy for '{course_id}' names '{leaf}', which is not one of its prerequisites"
                    ));
                }
            }
        }
    }
    issues
}

fn sample_or_pool<'a>(prereqs: &'a [String], home_prefix: &str) -> Vec<&'a str> {
    let (home, other): (Vec<&str>, Vec<&str>) = prereqs
        .iter()
        .map(String::as_str)
        .partition(|id| has_home_prefix(id, home_prefix));

    if home.is_empty() {
        other.into_iter().take(OR_OTHER_SAMPLE).collect()
    } else {
        home.into_iter().take(OR_HOME_SAMPLE).collect()
    }
}

fn collect_representatives<'a>(node: &'a LogicNode, picked: &mut Vec<&'a str>) {
    match node {
        LogicNode::Course(id) => picked.push(id),
        LogicNode::Any { or: children } => {
            if let Some(first) = children.first() {
                collect_representatives(first, picked);
            }
        }
        LogicNode::All { and: children } => {
            for child in children {
                collect_representatives(child, picked);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Course, GraphData, Relation};

    fn graph_with_prereqs(target: &str, sources: &[&str]) -> CourseGraph {
        let mut nodes: Vec<Course> = sources.iter().map(|s| Course::new(*s)).collect();
        nodes.push(Course::new(target));
        let links = sources
            .iter()
            .map(|s| Relation::prerequisite(*s, target))
            .collect();
        CourseGraph::from_data(GraphData { nodes, links })
    }

    #[test]
    fn test_no_rule_returns_all_prereqs() {
        let graph = graph_with_prereqs("EECE 2531", &["EECE 2150", "MATH 2341"]);
        let reps = representative_prereqs("EECE 2531", &graph, &PolicyTable::new(), "EECE");
        assert_eq!(reps, vec!["EECE 2150", "MATH 2341"]);
    }

    #[test]
    fn test_and_rule_returns_all_prereqs() {
        let graph = graph_with_prereqs("EECE 2560", &["EECE 2160", "CS 2500"]);
        let mut policy = PolicyTable::new();
        policy.insert("EECE 2560", PolicyRule::And);
        let reps = representative_prereqs("EECE 2560", &graph, &policy, "EECE");
        assert_eq!(reps, vec!["EECE 2160", "CS 2500"]);
    }

    #[test]
    fn test_or_rule_prefers_home_prefix() {
        let graph = graph_with_prereqs(
            "EECE 4534",
            &["CS 3650", "EECE 2160", "EECE 2322", "EECE 3324", "EECE 2560"],
        );
        let mut policy = PolicyTable::new();
        policy.insert("EECE 4534", PolicyRule::Or);

        let reps = representative_prereqs("EECE 4534", &graph, &policy, "EECE");
        assert_eq!(reps, vec!["EECE 2160", "EECE 2322", "EECE 3324"]);
    }

    #[test]
    fn test_or_rule_without_home_prefix_takes_two() {
        let graph = graph_with_prereqs("EECE 4792", &["PHYS 1155", "MATH 2321", "CHEM 1211"]);
        let mut policy = PolicyTable::new();
        policy.insert("EECE 4792", PolicyRule::Or);

        let reps = representative_prereqs("EECE 4792", &graph, &policy, "EECE");
        assert_eq!(reps, vec!["PHYS 1155", "MATH 2321"]);
    }

    #[test]
    fn test_or_rule_small_pool() {
        let graph = graph_with_prereqs("EECE 4534", &["CS 3650", "EECE 2160"]);
        let mut policy = PolicyTable::new();
        policy.insert("EECE 4534", PolicyRule::Or);

        let reps = representative_prereqs("EECE 4534", &graph, &policy, "EECE");
        assert_eq!(reps, vec!["EECE 2160"]);
    }

    #[test]
    fn test_complex_rule_first_or_branch() {
        let graph = graph_with_prereqs(
            "EECE 5641",
            &["EECE 2540", "EECE 4534", "EECE 3324", "EECE 2560", "EECE 3326"],
        );
        let mut policy = PolicyTable::new();
        policy.insert(
            "EECE 5641",
            PolicyRule::Complex {
                logic: LogicNode::any(vec![
                    LogicNode::all(vec![
                        LogicNode::course("EECE 2540"),
                        LogicNode::any(vec![
                            LogicNode::course("EECE 4534"),
                            LogicNode::course("EECE 3324"),
                        ]),
                    ]),
                    LogicNode::all(vec![
                        LogicNode::course("EECE 2560"),
                        LogicNode::course("EECE 3326"),
                    ]),
                ]),
            },
        );

        let reps = representative_prereqs("EECE 5641", &graph, &policy, "EECE");
        assert_eq!(reps, vec!["EECE 2540", "EECE 4534"]);
    }

    #[test]
    fn test_complex_rule_drops_ids_without_edges() {
        let graph = graph_with_prereqs("EECE 5644", &["EECE 2560"]);
        let mut policy = PolicyTable::new();
        policy.insert(
            "EECE 5644",
            PolicyRule::Complex {
                logic: LogicNode::all(vec![
                    LogicNode::course("EECE 2560"),
                    LogicNode::course("MATH 3081"),
                ]),
            },
        );

        let reps = representative_prereqs("EECE 5644", &graph, &policy, "EECE");
        assert_eq!(reps, vec!["EECE 2560"]);
    }

    #[test]
    fn test_empty_or_node_contributes_nothing() {
        let graph = graph_with_prereqs("EECE 5644", &["EECE 2560"]);
        let mut policy = PolicyTable::new();
        policy.insert(
            "EECE 5644",
            PolicyRule::Complex {
                logic: LogicNode::any(Vec::new()),
            },
        );

        assert!(representative_prereqs("EECE 5644", &graph, &policy, "EECE").is_empty());
    }

    #[test]
    fn test_corequisites_never_filtered() {
        let graph = CourseGraph::from_data(GraphData {
            nodes: vec![
                Course::new("EECE 2160"),
                Course::new("EECE 2161"),
                Course::new("EECE 2140"),
                Course::new("CS 2500"),
            ],
            links: vec![
                Relation::prerequisite("EECE 2140", "EECE 2160"),
                Relation::prerequisite("CS 2500", "EECE 2160"),
                Relation::corequisite("EECE 2161", "EECE 2160"),
            ],
        });
        let mut policy = PolicyTable::new();
        policy.insert(
            "EECE 2160",
            PolicyRule::Complex {
                logic: LogicNode::any(vec![
                    LogicNode::course("EECE 2140"),
                    LogicNode::course("CS 2500"),
                ]),
            },
        );

        let reps = representative_prereqs("EECE 2160", &graph, &policy, "EECE");
        assert_eq!(reps, vec!["EECE 2140", "EECE 2161"]);
    }

    #[test]
    fn test_unknown_course_is_empty() {
        let graph = graph_with_prereqs("EECE 2531", &["EECE 2150"]);
        assert!(representative_prereqs("EECE 9999", &graph, &PolicyTable::new(), "EECE").is_empty());
    }

    #[test]
    fn test_unmatched_references() {
        let graph = graph_with_prereqs("EECE 5644", &["EECE 2560"]);
        let mut policy = PolicyTable::new();
        policy.insert(
            "EECE 5644",
            PolicyRule::Complex {
                logic: LogicNode::any(vec![
                    LogicNode::course("EECE 2560"),
                    LogicNode::course("MATH 3081"),
                ]),
            },
        );
        policy.insert("EECE 9999", PolicyRule::Or);

        assert_eq!(
            unmatched_references(&graph, &policy),
            vec![
                "policy for 'EECE 5644' names 'MATH 3081', which is not one of its prerequisites"
                    .to_string(),
                "policy rule for unknown course 'EECE 9999'".to_string(),
            ]
        );

        let mut clean = PolicyTable::new();
        clean.insert("EECE 5644", PolicyRule::And);
        assert!(unmatched_references(&graph, &clean).is_empty());
    }

    #[test]
    fn test_has_home_prefix() {
        assert!(has_home_prefix("EECE 2150", "EECE"));
        assert!(has_home_prefix("CS2500", "CS"));
        assert!(!has_home_prefix("MATH 1341", "EECE"));
        assert!(!has_home_prefix("EECE 2150", ""));
        assert!(!has_home_prefix("CSE 1", "CS"));
        assert!(!has_home_prefix("EECE 2150", "EEC"));
    }

    #[test]
    fn test_or_rule_longer_namespace_is_not_home() {
        let graph = graph_with_prereqs("T 1", &["CSE 1", "CSE 2", "CSE 3", "MATH 1"]);
        let mut policy = PolicyTable::new();
        policy.insert("T 1", PolicyRule::Or);

        let reps = representative_prereqs("T 1", &graph, &policy, "CS");
        assert_eq!(reps, vec!["CSE 1", "CSE 2"]);

        let graph = graph_with_prereqs("T 1", &["MATH 1", "CSE 1", "CS 2", "CSE 2"]);
        let reps = representative_prereqs("T 1", &graph, &policy, "CS");
        assert_eq!(reps, vec!["CS 2"]);
    }
}
