//! Document model types.
//!
//! A document is a tree of containers: the [`Body`] and every
//! [`TableCell`] own an ordered sequence of [`Block`]s, and tables may nest
//! inside cells to any depth. Nodes are owned by exactly one container;
//! moving a node between containers is a move, never a copy.

mod block;
mod document;
mod length;
mod paragraph;
mod style;
mod table;

pub use block::{Block, Container};
pub use document::{Body, Document, Metadata};
pub use length::Length;
pub use paragraph::{Alignment, Paragraph, ParagraphStyle, TextRun, TextStyle};
pub use style::{StyleCatalog, StyleRegistry};
pub use table::{Table, TableCell, TableRow, VerticalAlignment};
