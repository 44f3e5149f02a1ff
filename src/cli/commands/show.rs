//! Show command handler

use super::open_session;
use course_planner::config::Config;

fn list(ids: &[String]) -> String {
    if ids.is_empty() {
        "none".to_string()
    } else {
        ids.join(", ")
    }
}

/// Print the detail panel for one course
pub fn run(config: &Config, id: &str) -> Result<(), String> {
    let mut session = open_session(config, false)?;
    let detail = session
        .open_detail(id)
        .ok_or_else(|| format!("Course '{id}' not found"))?;
    let course = &detail.course;

    println!("\n=== {} ===\n", course.label());
    println!("Category:      {}", course.category);
    if let Some(credits) = course.credits {
        println!("Credits:       {credits}");
    }
    println!(
        "In plan:       {}",
        if detail.in_plan { "yes" } else { "no" }
    );
    println!("Prerequisites: {}", list(&detail.prerequisites));
    println!("Corequisites:  {}", list(&detail.corequisites));
    println!("Required by:   {}", list(&detail.dependents));
    println!("Shown on add:  {}", list(&detail.representative));
    if let Some(description) = &course.description {
        println!("\n{description}");
    }
    Ok(())
}
