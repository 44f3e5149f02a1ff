//! JSON graph source: `{ "nodes": [...], "links": [...] }`

use super::LoadError;
use crate::core::models::GraphData;
use std::fs;
use std::path::Path;

/// Parse a graph payload
///
/// # Errors
/// Returns the serde error when the payload does not match [`GraphData`]
pub fn parse_graph_json(content: &str) -> Result<GraphData, serde_json::Error> {
    serde_json::from_str(content)
}

/// Read and parse a graph JSON file
///
/// # Errors
/// Returns [`LoadError::Io`] or [`LoadError::Json`]
pub fn load_graph_json(path: &Path) -> Result<GraphData, LoadError> {
    let content = fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
    parse_graph_json(&content).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::RelationKind;

    #[test]
    fn test_parse_graph_json() {
        let data = parse_graph_json(
            r#"{
                "nodes": [
                    {"id": "EECE 2150", "name": "Circuits and Signals", "category": "Electrical Engineering/Hardware", "credits": 4},
                    {"code": "MATH 2341"}
                ],
                "links": [
                    {"source": "MATH 2341", "target": "EECE 2150", "type": "prereq"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(data.nodes.len(), 2);
        assert_eq!(data.nodes[0].credits, Some(4));
        assert_eq!(data.nodes[1].id, "MATH 2341");
        assert_eq!(data.nodes[1].category, "General/Uncategorized");
        assert_eq!(data.links[0].kind, RelationKind::Prerequisite);
    }

    #[test]
    fn test_links_optional() {
        let data = parse_graph_json(r#"{"nodes": [{"id": "EECE 2150"}]}"#).unwrap();
        assert!(data.links.is_empty());
    }

    #[test]
    fn test_bad_kind_rejected() {
        let result = parse_graph_json(
            r#"{"nodes": [], "links": [{"source": "A 1", "target": "B 2", "kind": "antirequisite"}]}"#,
        );
        assert!(result.is_err());
    }
}
