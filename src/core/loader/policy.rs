//! Policy table source (JSON object keyed by course id)

use super::LoadError;
use crate::core::models::PolicyTable;
use crate::{debug, warn};
use std::fs;
use std::path::Path;

/// Parse a policy table
///
/// # Errors
/// Returns the serde error for malformed rules
pub fn parse_policy_json(content: &str) -> Result<PolicyTable, serde_json::Error> {
    serde_json::from_str(content)
}

/// Load a policy table; an empty path yields an empty table
///
/// # Errors
/// Returns [`LoadError::Io`] or [`LoadError::Json`]
pub fn load_policy<P: AsRef<Path>>(path: P) -> Result<PolicyTable, LoadError> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        debug!("No policy file configured; every course shows all prerequisites");
        return Ok(PolicyTable::new());
    }

    let content = fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
    let table = parse_policy_json(&content).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    if table.is_empty() {
        warn!("Policy file {} has no rules", path.display());
    }
    Ok(table)
}
