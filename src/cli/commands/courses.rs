//! Courses command handler

use super::open_session;
use course_planner::config::Config;

/// Print the course list; `✓` marks plan courses, `·` courses they pull in
pub fn run(config: &Config, category: Option<&str>) -> Result<(), String> {
    let mut session = open_session(config, false)?;
    if let Some(name) = category {
        if !session.select_category(Some(name.to_string())) {
            return Err(format!("Unknown category '{name}'"));
        }
    }

    let entries = session.course_list();
    for entry in &entries {
        let marker = if entry.in_plan {
            '✓'
        } else if entry.visible {
            '·'
        } else {
            ' '
        };
        println!("{marker} {}", entry.label);
    }
    println!(
        "\n{} courses, {} in plan",
        entries.len(),
        entries.iter().filter(|e| e.in_plan).count()
    );
    Ok(())
}
