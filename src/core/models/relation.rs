//! Relation (edge) model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of requisite relation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
    /// Source must be completed before the target
    #[serde(alias = "prereq")]
    Prerequisite,
    /// Source must be taken with (or before) the target
    #[serde(alias = "coreq")]
    Corequisite,
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prerequisite => write!(f, "prerequisite"),
            Self::Corequisite => write!(f, "corequisite"),
        }
    }
}

/// A directed requisite edge: `source` is the dependency, `target` the course requiring it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relation {
    /// Course taken first (or concurrently)
    pub source: String,
    /// Course that requires the source
    pub target: String,
    /// Relation kind
    #[serde(alias = "type")]
    pub kind: RelationKind,
}

impl Relation {
    /// Prerequisite edge `dependency → dependent`
    #[must_use]
    pub fn prerequisite(dependency: impl Into<String>, dependent: impl Into<String>) -> Self {
        Self {
            source: dependency.into(),
            target: dependent.into(),
            kind: RelationKind::Prerequisite,
        }
    }

    /// Corequisite edge `dependency → dependent`
    #[must_use]
    pub fn corequisite(dependency: impl Into<String>, dependent: impl Into<String>) -> Self {
        Self {
            source: dependency.into(),
            target: dependent.into(),
            kind: RelationKind::Corequisite,
        }
    }
}
