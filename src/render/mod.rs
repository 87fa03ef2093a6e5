//! Rendering module for previewing and persisting documents.

mod markdown;
mod options;
mod text;

pub use markdown::{to_markdown, MarkdownRenderer};
pub use options::{RenderOptions, TableMode};
pub use text::to_text;

use crate::error::Result;
use crate::model::Document;
use std::io::Write;

/// Output format for rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Markdown preview
    #[default]
    Markdown,

    /// Plain text
    Text,

    /// JSON document structure
    Json,
}

/// Layout of serialized document JSON. Both layouts load back identically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonFormat {
    /// Indented, one field per line
    #[default]
    Pretty,
    /// Single line
    Compact,
}

impl JsonFormat {
    /// Stream a document to `writer` in this layout.
    pub fn write_to<W: Write>(self, doc: &Document, writer: W) -> Result<()> {
        match self {
            JsonFormat::Pretty => serde_json::to_writer_pretty(writer, doc)?,
            JsonFormat::Compact => serde_json::to_writer(writer, doc)?,
        }
        Ok(())
    }
}

/// Serialize a document to a JSON string.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    Ok(match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(doc)?,
        JsonFormat::Compact => serde_json::to_string(doc)?,
    })
}

/// Render a document in the given format.
pub fn render(doc: &Document, format: OutputFormat, options: &RenderOptions) -> Result<String> {
    match format {
        OutputFormat::Markdown => to_markdown(doc, options),
        OutputFormat::Text => to_text(doc),
        OutputFormat::Json => to_json(doc, JsonFormat::Pretty),
    }
}
