//! Layout state: force-directed vs. rearranged grid, plus manual pins
//!
//! The force simulation itself belongs to the renderer. This module only
//! tracks which nodes have fixed coordinates and computes the rearranged grid:
//! rows are course levels (`floor(number / 1000) * 1000`), columns are
//! categories, and nodes sharing a cell are spread on a small sub-grid with a
//! little deterministic jitter.

use crate::config::LayoutConfig;
use crate::core::category;
use crate::core::models::course::{course_number, Course};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Active layout mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Continuous physics relaxation driven by the renderer
    #[default]
    Force,
    /// Deterministic level/category grid
    Rearranged,
}

/// A node coordinate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Position {
    /// Create a position
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Level bucket of a course id; ids without digits fall in level 0
#[must_use]
pub fn level_of(id: &str) -> u32 {
    course_number(id).map_or(0, |n| n / 1000 * 1000)
}

/// Frozen coordinates and manual pins for the current session
#[derive(Debug, Clone, Default)]
pub struct LayoutState {
    mode: LayoutMode,
    frozen: HashMap<String, Position>,
    manually_positioned: HashSet<String>,
    settings: LayoutConfig,
}

impl LayoutState {
    /// Force-directed layout with the given grid settings
    #[must_use]
    pub fn new(settings: LayoutConfig) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Current mode
    #[must_use]
    pub const fn mode(&self) -> LayoutMode {
        self.mode
    }

    /// Frozen coordinate of a node, if any
    #[must_use]
    pub fn position_of(&self, id: &str) -> Option<Position> {
        self.frozen.get(id).copied()
    }

    /// Whether the node's coordinate was last set by a drag
    #[must_use]
    pub fn is_manually_positioned(&self, id: &str) -> bool {
        self.manually_positioned.contains(id)
    }

    /// Ids pinned by dragging
    #[must_use]
    pub const fn manually_positioned(&self) -> &HashSet<String> {
        &self.manually_positioned
    }

    /// Switch to the rearranged grid
    ///
    /// Every node not manually positioned is frozen at its grid coordinate;
    /// dragged nodes keep their coordinate verbatim. Unpinned coordinates of
    /// nodes no longer in `courses` are dropped.
    pub fn rearrange(&mut self, courses: &[&Course]) {
        self.mode = LayoutMode::Rearranged;
        let rendered: HashSet<&str> = courses.iter().map(|c| c.id.as_str()).collect();
        let pinned = &self.manually_positioned;
        self.frozen
            .retain(|id, _| rendered.contains(id.as_str()) || pinned.contains(id));
        for (id, position) in grid_positions(courses, &self.settings) {
            if !self.manually_positioned.contains(&id) {
                self.frozen.insert(id, position);
            }
        }
    }

    /// Re-run grid placement after the node set changed, if rearranged
    pub fn refresh(&mut self, courses: &[&Course]) {
        if self.mode == LayoutMode::Rearranged {
            self.rearrange(courses);
        }
    }

    /// Back to force-directed layout; clears frozen coordinates and pins
    pub fn reset(&mut self) {
        self.mode = LayoutMode::Force;
        self.frozen.clear();
        self.manually_positioned.clear();
    }

    /// Record a user drag in either mode
    pub fn drag(&mut self, id: &str, position: Position) {
        self.frozen.insert(id.to_string(), position);
        self.manually_positioned.insert(id.to_string());
    }
}

/// Grid coordinates for a set of courses
///
/// Nodes in a cell keep the order they were given.
#[must_use]
pub fn grid_positions(courses: &[&Course], settings: &LayoutConfig) -> Vec<(String, Position)> {
    let mut seen_categories: Vec<&str> = Vec::new();
    for course in courses {
        if !seen_categories.contains(&course.category.as_str()) {
            seen_categories.push(&course.category);
        }
    }
    let columns = category::ordered(&seen_categories);

    let mut cells: BTreeMap<(u32, usize), Vec<&Course>> = BTreeMap::new();
    for &course in courses {
        let column = columns
            .iter()
            .position(|c| *c == course.category)
            .unwrap_or_default();
        cells
            .entry((level_of(&course.id), column))
            .or_default()
            .push(course);
    }

    let rows: Vec<u32> = {
        let mut levels: Vec<u32> = cells.keys().map(|(level, _)| *level).collect();
        levels.dedup();
        levels
    };

    let mut positions = Vec::with_capacity(courses.len());
    for ((level, column), members) in &cells {
        let row = rows.iter().position(|l| l == level).unwrap_or_default();
        let origin_x = to_f64(*column) * settings.column_spacing;
        let origin_y = to_f64(row) * settings.row_spacing;
        let per_row = cell_width(members.len());

        for (k, course) in members.iter().enumerate() {
            let x = origin_x + to_f64(k % per_row) * settings.node_spacing;
            let y = origin_y + to_f64(k / per_row) * settings.node_spacing;
            positions.push((
                course.id.clone(),
                Position::new(
                    x + jitter(&course.id, 0) * settings.jitter,
                    y + jitter(&course.id, 1) * settings.jitter,
                ),
            ));
        }
    }

    positions
}

/// Columns of the square-ish sub-grid used for `count` nodes
fn cell_width(count: usize) -> usize {
    let mut width = 1;
    while width * width < count {
        width += 1;
    }
    width
}

#[allow(clippy::cast_precision_loss)]
fn to_f64(value: usize) -> f64 {
    value as f64
}

/// Deterministic offset in [-1, 1] derived from the id (FNV-1a)
#[allow(clippy::cast_precision_loss)]
fn jitter(id: &str, axis: u8) -> f64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in id.bytes().chain(std::iter::once(axis)) {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0100_0000_01b3);
    }
    (hash % 2001) as f64 / 1000.0 - 1.0
}
