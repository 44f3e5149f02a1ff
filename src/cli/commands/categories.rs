//! Categories command handler

use super::open_session;
use course_planner::config::Config;
use course_planner::core::category::{color_for, short_label};
use course_planner::core::models::CourseGraph;

/// One row of the category listing
#[derive(Debug, PartialEq, Eq)]
pub struct CategorySummary {
    /// Full category name
    pub name: String,
    /// Courses tagged with the category
    pub courses: usize,
    /// Requisite links with both ends inside the category
    pub internal_links: usize,
}

/// Per-category counts in first-seen order
pub fn summaries(graph: &CourseGraph) -> Vec<CategorySummary> {
    graph
        .categories()
        .into_iter()
        .map(|category| {
            let subgraph = graph.filtered_by_category(category);
            CategorySummary {
                name: category.to_string(),
                courses: subgraph.course_count(),
                internal_links: subgraph.relations().len(),
            }
        })
        .collect()
}

/// Print each category with its color and course count
pub fn run(config: &Config) -> Result<(), String> {
    let session = open_session(config, true)?;

    println!("\n=== Categories ===\n");
    for summary in summaries(session.graph()) {
        println!(
            "  {:<9} {:<24} {:>3} courses {:>3} internal links  ({})",
            color_for(&summary.name),
            short_label(&summary.name),
            summary.courses,
            summary.internal_links,
            summary.name
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use course_planner::core::models::{Course, GraphData, Relation};

    #[test]
    fn test_summaries_count_links_inside_category() {
        let sw = "Software Engineering";
        let graph = CourseGraph::from_data(GraphData {
            nodes: vec![
                Course::new("EECE 2560").with_category(sw),
                Course::new("EECE 2540").with_category(sw),
                Course::new("EECE 2160").with_category("Embedded/Firmware Engineering"),
                Course::new("CS 2500"),
            ],
            links: vec![
                Relation::prerequisite("EECE 2560", "EECE 2540"),
                Relation::prerequisite("EECE 2160", "EECE 2560"),
                Relation::prerequisite("CS 2500", "EECE 2560"),
            ],
        });

        let rows = summaries(&graph);
        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[0],
            CategorySummary {
                name: sw.to_string(),
                courses: 2,
                internal_links: 1,
            }
        );
        assert_eq!(rows[1].courses, 1);
        assert_eq!(rows[1].internal_links, 0);
        assert_eq!(rows[2].name, "General/Uncategorized");
    }
}
