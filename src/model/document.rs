//! Document-level types.

use super::{Block, Container, StyleCatalog, StyleRegistry};
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A structured document: metadata, known styles and a body of blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata (title, author, etc.)
    #[serde(default)]
    pub metadata: Metadata,

    /// Style names the destination document defines
    #[serde(default = "StyleRegistry::standard")]
    pub styles: StyleRegistry,

    /// Top-level content
    #[serde(default)]
    pub body: Body,
}

impl Document {
    /// Create a new empty document with the standard style set.
    pub fn new() -> Self {
        Self::with_styles(StyleRegistry::standard())
    }

    /// Create a new empty document with an explicit style set.
    pub fn with_styles(styles: StyleRegistry) -> Self {
        Self {
            metadata: Metadata::default(),
            styles,
            body: Body::default(),
        }
    }

    /// Decode a document from its JSON form.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Number of top-level blocks.
    pub fn block_count(&self) -> usize {
        self.body.blocks.len()
    }

    /// Check if the document has no content.
    pub fn is_empty(&self) -> bool {
        self.body.blocks.is_empty()
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.body
            .blocks
            .iter()
            .map(Block::plain_text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Container for Document {
    fn blocks(&self) -> &[Block] {
        &self.body.blocks
    }

    fn blocks_mut(&mut self) -> &mut Vec<Block> {
        &mut self.body.blocks
    }
}

impl StyleCatalog for Document {
    fn style_exists(&self, name: &str) -> bool {
        self.styles.style_exists(name)
    }
}

/// The top-level container of a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Body {
    /// Blocks in document order
    pub blocks: Vec<Block>,
}

impl Body {
    /// Create a body from blocks.
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }
}

impl Container for Body {
    fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    fn blocks_mut(&mut self) -> &mut Vec<Block> {
        &mut self.blocks
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Document author
    pub author: Option<String>,

    /// Document subject
    pub subject: Option<String>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,

    /// Last modification date
    pub modified: Option<DateTime<Utc>>,
}

impl Metadata {
    /// Convert metadata to YAML frontmatter format.
    pub fn to_yaml_frontmatter(&self) -> String {
        let mut lines = vec!["---".to_string()];

        if let Some(ref title) = self.title {
            lines.push(format!("title: \"{}\"", escape_yaml(title)));
        }
        if let Some(ref author) = self.author {
            lines.push(format!("author: \"{}\"", escape_yaml(author)));
        }
        if let Some(ref subject) = self.subject {
            lines.push(format!("subject: \"{}\"", escape_yaml(subject)));
        }
        if let Some(ref created) = self.created {
            lines.push(format!("created: {}", created.to_rfc3339()));
        }
        if let Some(ref modified) = self.modified {
            lines.push(format!("modified: {}", modified.to_rfc3339()));
        }

        lines.push("---".to_string());
        lines.push(String::new());

        lines.join("\n")
    }

    /// Stamp the modification time with the current instant.
    pub fn touch(&mut self) {
        self.modified = Some(Utc::now());
    }
}

/// Escape special characters for YAML strings.
fn escape_yaml(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
