//! JSON exporter

use super::{ExportError, ViewExporter};
use crate::core::view::GraphView;

/// Pretty-printed JSON of the view
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonExporter;

impl JsonExporter {
    /// Create a new JSON exporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ViewExporter for JsonExporter {
    fn render(&self, view: &GraphView) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(view)?)
    }
}
