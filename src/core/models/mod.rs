//! Data models for `CoursePlanner`

pub mod course;
pub mod graph;
pub mod policy;
pub mod relation;

pub use course::Course;
pub use graph::{CourseGraph, GraphData};
pub use policy::{LogicNode, PolicyRule, PolicyTable};
pub use relation::{Relation, RelationKind};
