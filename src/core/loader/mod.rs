//! Graph and policy loading
//!
//! A graph source is either a `.json` file holding `{nodes, links}` or a
//! directory with the catalog CSV bundle (`nodes.csv`, `connections.csv`,
//! optional `descriptions.csv`).

pub mod csv_parser;
pub mod json;
pub mod policy;

use crate::config::LoadingConfig;
use crate::core::models::CourseGraph;
use crate::{info, warn};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub use csv_parser::{load_csv_bundle, parse_csv_line};
pub use json::{load_graph_json, parse_graph_json};
pub use policy::{load_policy, parse_policy_json};

/// Failure while loading a graph or policy source
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
    /// The JSON payload did not match the expected shape
    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        /// Path being parsed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },
    /// A CSV file was missing a column or had a bad row
    #[error("{}:{line}: {message}", path.display())]
    Csv {
        /// Path being parsed
        path: PathBuf,
        /// 1-based line number
        line: usize,
        /// What went wrong
        message: String,
    },
    /// Neither a `.json` file nor a directory
    #[error("unsupported graph source {}: expected a .json file or a CSV bundle directory", .0.display())]
    UnsupportedFormat(PathBuf),
}

impl LoadError {
    /// Whether another attempt could succeed
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Load a course graph, choosing the parser from the path
///
/// # Errors
/// Returns a [`LoadError`] when the source is unreadable or malformed
pub fn load_graph<P: AsRef<Path>>(path: P) -> Result<CourseGraph, LoadError> {
    let path = path.as_ref();
    let data = if path.is_dir() {
        load_csv_bundle(path)?
    } else if path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
    {
        load_graph_json(path)?
    } else {
        return Err(LoadError::UnsupportedFormat(path.to_path_buf()));
    };

    let graph = CourseGraph::from_data(data);
    info!(
        "Loaded {} courses and {} relations from {}",
        graph.course_count(),
        graph.relations().len(),
        path.display()
    );
    Ok(graph)
}

/// [`load_graph`] with bounded retries on I/O failures
///
/// Attempt `n` (1-based) waits `n * backoff_ms` before retrying. Parse
/// errors are returned immediately.
///
/// # Errors
/// Returns the last [`LoadError`] once attempts are exhausted
pub fn load_graph_with_retry<P: AsRef<Path>>(
    path: P,
    settings: LoadingConfig,
) -> Result<CourseGraph, LoadError> {
    let path = path.as_ref();
    let mut attempt: u32 = 0;
    loop {
        match load_graph(path) {
            Ok(graph) => return Ok(graph),
            Err(e) if e.is_retryable() && attempt < settings.retries => {
                attempt += 1;
                warn!("{e}; retrying ({attempt}/{})", settings.retries);
                std::thread::sleep(Duration::from_millis(
                    settings.backoff_ms.saturating_mul(u64::from(attempt)),
                ));
            }
            Err(e) => return Err(e),
        }
    }
}
