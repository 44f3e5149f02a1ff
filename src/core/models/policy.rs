//! Prerequisite policy table
//!
//! Per-course rules deciding which upstream courses are *displayed* when the
//! course enters a plan. Policies never gate plan validity.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Boolean expression over course ids
///
/// JSON form: a bare string is a leaf, `{"and": [...]}` requires every child,
/// `{"or": [...]}` is satisfied by any one child.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LogicNode {
    /// A single course id
    Course(String),
    /// All children required
    All {
        /// Child expressions
        and: Vec<LogicNode>,
    },
    /// Any one child suffices
    Any {
        /// Child expressions
        or: Vec<LogicNode>,
    },
}

impl LogicNode {
    /// Leaf node
    #[must_use]
    pub fn course(id: impl Into<String>) -> Self {
        Self::Course(id.into())
    }

    /// AND node
    #[must_use]
    pub const fn all(children: Vec<Self>) -> Self {
        Self::All { and: children }
    }

    /// OR node
    #[must_use]
    pub const fn any(children: Vec<Self>) -> Self {
        Self::Any { or: children }
    }

    /// Every course id mentioned anywhere in the tree, in authored order
    #[must_use]
    pub fn course_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        self.collect_ids(&mut ids);
        ids
    }

    fn collect_ids<'a>(&'a self, ids: &mut Vec<&'a str>) {
        match self {
            Self::Course(id) => ids.push(id),
            Self::All { and: children } | Self::Any { or: children } => {
                for child in children {
                    child.collect_ids(ids);
                }
            }
        }
    }
}

/// Override rule for one course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PolicyRule {
    /// Every direct prerequisite is required (same as having no rule)
    And,
    /// Large elective pool: show a small deterministic sample
    Or,
    /// Explicit AND/OR tree
    Complex {
        /// Root of the tree
        logic: LogicNode,
    },
}

/// Policy rules keyed by course id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolicyTable {
    rules: HashMap<String, PolicyRule>,
}

impl PolicyTable {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the rule for a course
    pub fn insert(&mut self, course_id: impl Into<String>, rule: PolicyRule) {
        self.rules.insert(course_id.into(), rule);
    }

    /// Rule for a course, if any
    #[must_use]
    pub fn get(&self, course_id: &str) -> Option<&PolicyRule> {
        self.rules.get(course_id)
    }

    /// Number of rules
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table has no rules
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Course ids that have a rule
    pub fn course_ids(&self) -> impl Iterator<Item = &String> {
        self.rules.keys()
    }
}

impl FromIterator<(String, PolicyRule)> for PolicyTable {
    fn from_iter<I: IntoIterator<Item = (String, PolicyRule)>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_table() {
        let json = r#"{
            "EECE 4534": {"kind": "or"},
            "EECE 2560": {"kind": "and"},
            "EECE 5641": {
                "kind": "complex",
                "logic": {"or": [
                    {"and": ["EECE 2540", {"or": ["EECE 4534", "EECE 3324"]}]},
                    {"and": ["EECE 2560", "EECE 3326"]}
                ]}
            }
        }"#;

        let table: PolicyTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.get("EECE 4534"), Some(&PolicyRule::Or));
        assert_eq!(table.get("EECE 2560"), Some(&PolicyRule::And));

        let expected = LogicNode::any(vec![
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
        ]);
        assert_eq!(
            table.get("EECE 5641"),
            Some(&PolicyRule::Complex { logic: expected })
        );
        assert!(table.get("EECE 2150").is_none());
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let json = r#"{"EECE 4534": {"kind": "xor"}}"#;
        assert!(serde_json::from_str::<PolicyTable>(json).is_err());
    }

    #[test]
    fn test_course_ids_in_authored_order() {
        let tree = LogicNode::any(vec![
            LogicNode::course("B 2"),
            LogicNode::all(vec![LogicNode::course("A 1"), LogicNode::course("C 3")]),
        ]);
        assert_eq!(tree.course_ids(), vec!["B 2", "A 1", "C 3"]);
    }

    #[test]
    fn test_serialize_round_trip_shape() {
        let mut table = PolicyTable::new();
        table.insert("EECE 4534", PolicyRule::Or);
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"{"EECE 4534":{"kind":"or"}}"#);
    }
}
