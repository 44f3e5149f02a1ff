//! Course model

use serde::{Deserialize, Serialize};

/// Category assigned when the source data carries none
pub const DEFAULT_CATEGORY: &str = "General/Uncategorized";

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// Represents a course node in the dependency graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Globally unique identifier (e.g., "EECE 2150")
    #[serde(alias = "code")]
    pub id: String,

    /// Display name; absent for courses outside the home department
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Category tag used for color-coding and filtering
    #[serde(default = "default_category")]
    pub category: String,

    /// Credit count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits: Option<u32>,

    /// Catalog description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Course {
    /// Create a course with only an identifier, in the default category
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            category: default_category(),
            credits: None,
            description: None,
        }
    }

    /// Set the display name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the category
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the credit count
    #[must_use]
    pub const fn with_credits(mut self, credits: u32) -> Self {
        self.credits = Some(credits);
        self
    }

    /// Set the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Label for lists and detail panels: "EECE 2150: Circuits and Signals"
    #[must_use]
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => format!("{}: {name}", self.id),
            None => self.id.clone(),
        }
    }
}

/// Department namespace of a course identifier: everything before the first
/// digit or whitespace ("CS" for both "CS 2500" and "CS2500")
#[must_use]
pub fn course_prefix(id: &str) -> &str {
    let end = id
        .find(|c: char| c.is_ascii_digit() || c.is_whitespace())
        .unwrap_or(id.len());
    &id[..end]
}

/// Parse the first run of ASCII digits in a course identifier
#[must_use]
pub fn course_number(id: &str) -> Option<u32> {
    let start = id.find(|c: char| c.is_ascii_digit())?;
    let digits: String = id[start..]
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}
