//! CLI argument definitions for `CoursePlanner`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use course_planner::config::ConfigOverrides;
use course_planner::core::layout::Position;
use course_planner::logger::Level;

/// CLI log level argument
///
/// Represents log levels that can be passed via CLI arguments. Converts to lowercase
/// strings for config storage and to `logger::Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

/// Parse a `--pin` value of the form `ID=X,Y`
pub fn parse_pin(value: &str) -> Result<(String, Position), String> {
    let (id, coords) = value
        .rsplit_once('=')
        .ok_or_else(|| format!("Invalid pin '{value}' (expected ID=X,Y)"))?;
    let (x, y) = coords
        .split_once(',')
        .ok_or_else(|| format!("Invalid pin '{value}' (expected ID=X,Y)"))?;
    let x: f64 = x
        .trim()
        .parse()
        .map_err(|_| format!("Invalid x coordinate in pin '{value}'"))?;
    let y: f64 = y
        .trim()
        .parse()
        .map_err(|_| format!("Invalid y coordinate in pin '{value}'"))?;
    let id = id.trim();
    if id.is_empty() {
        return Err(format!("Missing course id in pin '{value}'"));
    }
    Ok((id.to_string(), Position::new(x, y)))
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `graph_file`, `mandatory`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set (comma-separated for `mandatory`)
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// List course categories with their colors and course counts.
    Categories,
    /// List courses, marking those in the starting plan.
    Courses {
        /// Only list courses in this category
        #[arg(short, long, value_name = "CATEGORY")]
        category: Option<String>,
    },
    /// Show a course's requisites and what adding it would display.
    Show {
        /// Course id (e.g., "EECE 2150")
        #[arg(value_name = "ID")]
        id: String,
    },
    /// Build a plan and export the resulting graph view.
    ///
    /// Steps run in order: category filter, additions, removals, pins, rearrange.
    Plan {
        /// Course to add to the plan (repeatable)
        #[arg(short, long = "add", value_name = "ID")]
        add: Vec<String>,

        /// Course to remove from the plan (repeatable)
        #[arg(short, long = "remove", value_name = "ID")]
        remove: Vec<String>,

        /// Start from an empty plan instead of the mandatory courses
        #[arg(long)]
        no_mandatory: bool,

        /// Only show courses in this category
        #[arg(short, long, value_name = "CATEGORY")]
        category: Option<String>,

        /// Lay nodes out on the level/category grid
        #[arg(long)]
        rearrange: bool,

        /// Pin a node at a fixed position, e.g. "EECE 2150=120,40" (repeatable)
        #[arg(long = "pin", value_name = "ID=X,Y", value_parser = parse_pin)]
        pins: Vec<(String, Position)>,

        /// Output format: json, mermaid, or html
        #[arg(short, long, value_name = "FORMAT", default_value = "json")]
        format: String,

        /// Output file (`-` for stdout; defaults to `plan.<ext>` in the config `out_dir`)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "courseplanner",
    about = "Course dependency graph planner",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override the course graph source (.json file or CSV bundle directory)
    #[arg(long = "graph", value_name = "PATH")]
    pub graph: Option<PathBuf>,

    /// Override the prerequisite policy file
    #[arg(long = "policy", value_name = "PATH")]
    pub policy: Option<PathBuf>,

    /// Override config output directory
    #[arg(long = "out-dir", value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

fn path_string(path: Option<&PathBuf>) -> Option<String> {
    path.map(|p| p.to_string_lossy().to_string())
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// # Returns
    /// A `ConfigOverrides` struct with values from CLI flags, where `None` means no override.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: path_string(self.log_file.as_ref()),
            verbose: self.config_verbose,
            graph_file: path_string(self.graph.as_ref()),
            policy_file: path_string(self.policy.as_ref()),
            out_dir: path_string(self.out_dir.as_ref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(command: Command) -> Cli {
        Cli {
            log_level: None,
            verbose: false,
            debug_flag: false,
            log_file: None,
            config_level: None,
            config_verbose: None,
            graph: None,
            policy: None,
            out_dir: None,
            command,
        }
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Warn), Level::Warn);
        assert_eq!(Level::from(LogLevelArg::Info), Level::Info);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let overrides = cli(Command::Categories).to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.graph_file.is_none());
        assert!(overrides.policy_file.is_none());
        assert!(overrides.out_dir.is_none());
    }

    #[test]
    fn test_to_config_overrides_with_values() {
        let mut args = cli(Command::Config { subcommand: None });
        args.config_level = Some(LogLevelArg::Debug);
        args.log_file = Some(PathBuf::from("/tmp/test.log"));
        args.config_verbose = Some(true);
        args.graph = Some(PathBuf::from("/data/catalog"));
        args.policy = Some(PathBuf::from("/data/policy.json"));
        args.out_dir = Some(PathBuf::from("/output"));

        let overrides = args.to_config_overrides();
        assert_eq!(overrides.level, Some("debug".to_string()));
        assert_eq!(overrides.file, Some("/tmp/test.log".to_string()));
        assert_eq!(overrides.verbose, Some(true));
        assert_eq!(overrides.graph_file, Some("/data/catalog".to_string()));
        assert_eq!(overrides.policy_file, Some("/data/policy.json".to_string()));
        assert_eq!(overrides.out_dir, Some("/output".to_string()));
    }

    #[test]
    fn test_parse_pin() {
        let (id, pos) = parse_pin("EECE 2150=120,-40.5").unwrap();
        assert_eq!(id, "EECE 2150");
        assert_eq!(pos, Position::new(120.0, -40.5));

        assert!(parse_pin("EECE 2150").is_err());
        assert!(parse_pin("EECE 2150=1").is_err());
        assert!(parse_pin("EECE 2150=a,2").is_err());
        assert!(parse_pin("=1,2").is_err());
    }

    #[test]
    fn test_plan_args_parse() {
        let args = Cli::try_parse_from([
            "courseplanner",
            "--graph",
            "data/eece_courses.json",
            "plan",
            "--add",
            "EECE 2531",
            "-a",
            "EECE 5641",
            "--pin",
            "EECE 2150=10,20",
            "--rearrange",
            "-f",
            "mermaid",
        ])
        .unwrap();

        assert_eq!(args.graph, Some(PathBuf::from("data/eece_courses.json")));
        match args.command {
            Command::Plan {
                add,
                pins,
                rearrange,
                format,
                no_mandatory,
                ..
            } => {
                assert_eq!(add, vec!["EECE 2531", "EECE 5641"]);
                assert_eq!(pins.len(), 1);
                assert!(rearrange);
                assert!(!no_mandatory);
                assert_eq!(format, "mermaid");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
