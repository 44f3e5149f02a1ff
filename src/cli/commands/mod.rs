//! CLI command handlers for `CoursePlanner`.
//!
//! This module provides handlers for various CLI subcommands.
//! Each command is implemented in its own submodule.

pub mod categories;
pub mod config;
pub mod courses;
pub mod plan;
pub mod show;

use course_planner::config::{Config, PlanConfig};
use course_planner::core::loader::{load_graph_with_retry, load_policy};
use course_planner::core::session::PlanSession;
use course_planner::error;
use std::path::Path;

/// Load the configured graph and policies and start a session
///
/// With `no_mandatory` the plan starts empty.
pub fn open_session(config: &Config, no_mandatory: bool) -> Result<PlanSession, String> {
    if config.paths.graph_file.is_empty() {
        return Err("No course graph configured (set `graph_file` or pass --graph)".to_string());
    }
    if !Path::new(&config.paths.graph_file).exists() {
        return Err(format!(
            "Course graph {} not found. Pass --graph data/eece_courses.json --policy data/eece_policy.json \
             to use the bundled sample, or `courseplanner config set graph_file PATH`",
            config.paths.graph_file
        ));
    }

    let graph = load_graph_with_retry(&config.paths.graph_file, config.loading).map_err(|e| {
        error!("{e}");
        e.to_string()
    })?;
    let policy = load_policy(&config.paths.policy_file).map_err(|e| {
        error!("{e}");
        e.to_string()
    })?;

    let settings = if no_mandatory {
        PlanConfig {
            mandatory: Vec::new(),
            home_prefix: config.plan.home_prefix.clone(),
        }
    } else {
        config.plan.clone()
    };

    Ok(PlanSession::new(graph, policy, &settings, config.layout))
}
