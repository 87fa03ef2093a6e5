//! Block-level document nodes and the container abstraction.

use super::{Paragraph, Table};
use serde::{Deserialize, Serialize};

/// A content block: the node type held by every container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A paragraph of text
    Paragraph(Paragraph),

    /// A table
    Table(Table),
}

impl Block {
    /// Check if this block is a paragraph.
    pub fn is_paragraph(&self) -> bool {
        matches!(self, Block::Paragraph(_))
    }

    /// Check if this block is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, Block::Table(_))
    }

    /// Borrow the paragraph, if this is one.
    pub fn as_paragraph(&self) -> Option<&Paragraph> {
        match self {
            Block::Paragraph(p) => Some(p),
            Block::Table(_) => None,
        }
    }

    /// Borrow the table, if this is one.
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Block::Table(t) => Some(t),
            Block::Paragraph(_) => None,
        }
    }

    /// Get plain text content of the block.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Paragraph(p) => p.visible_text(),
            Block::Table(t) => t.plain_text(),
        }
    }
}

impl From<Paragraph> for Block {
    fn from(paragraph: Paragraph) -> Self {
        Block::Paragraph(paragraph)
    }
}

impl From<Table> for Block {
    fn from(table: Table) -> Self {
        Block::Table(table)
    }
}

/// Anything owning an ordered sequence of blocks: a document body or a
/// table cell.
pub trait Container {
    /// Child blocks in document order.
    fn blocks(&self) -> &[Block];

    /// Mutable access to the child sequence.
    fn blocks_mut(&mut self) -> &mut Vec<Block>;

    /// Direct child paragraphs with their block index.
    fn paragraphs(&self) -> impl Iterator<Item = (usize, &Paragraph)> {
        self.blocks()
            .iter()
            .enumerate()
            .filter_map(|(i, b)| b.as_paragraph().map(|p| (i, p)))
    }

    /// Direct child tables with their block index.
    fn tables(&self) -> impl Iterator<Item = (usize, &Table)> {
        self.blocks()
            .iter()
            .enumerate()
            .filter_map(|(i, b)| b.as_table().map(|t| (i, t)))
    }

    /// Append a block.
    fn push(&mut self, block: impl Into<Block>) {
        self.blocks_mut().push(block.into());
    }
}
