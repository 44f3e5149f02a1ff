//! Command-line interface entry point for `CoursePlanner`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use course_planner::config::Config;
use course_planner::info;
use course_planner::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag overrides config logging.level; fallback warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| config.logging.level.parse().ok())
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    // Verbose: enable if CLI flag OR config has verbose=true
    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    if !config.logging.file.is_empty() {
        let log_path = std::path::PathBuf::from(&config.logging.file);
        if let Some(parent) = log_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let display_path = log_path.to_string_lossy();
        if init_file_logging(&log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    let result = match args.command {
        Command::Config { subcommand } => commands::config::run(subcommand, &mut config, &defaults),
        Command::Categories => commands::categories::run(&config),
        Command::Courses { category } => commands::courses::run(&config, category.as_deref()),
        Command::Show { id } => commands::show::run(&config, &id),
        Command::Plan {
            add,
            remove,
            no_mandatory,
            category,
            rearrange,
            pins,
            format,
            output,
        } => commands::plan::run(
            &config,
            &commands::plan::PlanOptions {
                add,
                remove,
                no_mandatory,
                category,
                rearrange,
                pins,
                format,
                output,
            },
        ),
    };

    if let Err(message) = result {
        eprintln!("✗ {message}");
        std::process::exit(1);
    }
}
