//! Renderings of a [`GraphView`] for the presentation layer
//!
//! JSON is the renderer's native input; Mermaid and HTML are static
//! snapshots for documentation and quick inspection.

pub mod html;
pub mod json;
pub mod mermaid;

pub use html::HtmlExporter;
pub use json::JsonExporter;
pub use mermaid::MermaidExporter;

use crate::core::view::GraphView;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Failure while rendering or writing a view
#[derive(Debug, Error)]
pub enum ExportError {
    /// JSON serialization failed
    #[error("failed to serialize view: {0}")]
    Json(#[from] serde_json::Error),
    /// Template rendering failed
    #[error("failed to render template: {0}")]
    Template(#[from] askama::Error),
    /// Writing the output failed
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Supported export formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    /// Renderer-ready JSON
    #[default]
    Json,
    /// Mermaid flowchart
    Mermaid,
    /// Standalone HTML page
    Html,
}

impl ExportFormat {
    /// File extension for this format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Mermaid => "mmd",
            Self::Html => "html",
        }
    }

    /// Render a view in this format
    ///
    /// # Errors
    /// Returns an [`ExportError`] if rendering fails
    pub fn render(self, view: &GraphView) -> Result<String, ExportError> {
        match self {
            Self::Json => JsonExporter::new().render(view),
            Self::Mermaid => MermaidExporter::new().render(view),
            Self::Html => HtmlExporter::new("Course Plan").render(view),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "mermaid" | "mmd" => Ok(Self::Mermaid),
            "html" | "htm" => Ok(Self::Html),
            _ => Err(format!("Unknown export format: {s}")),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Mermaid => write!(f, "mermaid"),
            Self::Html => write!(f, "html"),
        }
    }
}

/// Trait for view exporters
pub trait ViewExporter {
    /// Render the view as a string
    ///
    /// # Errors
    /// Returns an error if rendering fails
    fn render(&self, view: &GraphView) -> Result<String, ExportError>;

    /// Render the view into a file
    ///
    /// # Errors
    /// Returns an error if rendering or writing fails
    fn export(&self, view: &GraphView, output_path: &Path) -> Result<(), ExportError> {
        fs::write(output_path, self.render(view)?)?;
        Ok(())
    }
}
