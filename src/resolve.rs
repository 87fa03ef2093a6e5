//! Marker search over the document tree.
//!
//! Traversal is depth-first with paragraphs before tables at every level: a
//! container's direct paragraphs are checked in order, then each direct
//! table is walked row by row, cell by cell, and every cell is searched as a
//! container of its own.

use crate::error::{Error, Result};
use crate::model::{Block, Container};
use regex::Regex;
use serde::Serialize;

/// Address of one cell: the table's block index in its container, then the
/// row and cell indices inside the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellAddress {
    /// Index of the table in its container
    pub block: usize,
    /// Row index in the table
    pub row: usize,
    /// Cell index in the row
    pub cell: usize,
}

/// Where a marker paragraph lives: the cell path from the root to its owning
/// container, and its index inside that container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerLocation {
    /// Cells to descend through; empty for a top-level paragraph
    pub path: Vec<CellAddress>,
    /// Block index of the paragraph in the owning container
    pub index: usize,
}

impl MarkerLocation {
    /// Table nesting depth of the owning container (0 = root).
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// Resolve the owning container's block list inside `root`.
    pub fn container_mut<'a>(&self, root: &'a mut Vec<Block>) -> Result<&'a mut Vec<Block>> {
        let mut current = root;
        for address in &self.path {
            current = match current.get_mut(address.block) {
                Some(Block::Table(table)) => table
                    .rows
                    .get_mut(address.row)
                    .and_then(|row| row.cells.get_mut(address.cell))
                    .map(|cell| &mut cell.content)
                    .ok_or_else(|| Error::StaleLocation(self.to_string()))?,
                _ => return Err(Error::StaleLocation(self.to_string())),
            };
        }
        if self.index < current.len() {
            Ok(current)
        } else {
            Err(Error::StaleLocation(self.to_string()))
        }
    }
}

impl std::fmt::Display for MarkerLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("body")?;
        for a in &self.path {
            write!(f, " > block {} row {} cell {}", a.block, a.row, a.cell)?;
        }
        write!(f, " > block {}", self.index)
    }
}

/// A marker paragraph found by pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FoundMarker {
    /// Trimmed paragraph text
    pub text: String,
    /// Its location
    pub location: MarkerLocation,
}

/// Find the first paragraph whose trimmed visible text equals `marker`.
///
/// Returns `None` when the whole tree has been searched without a match.
pub fn find_marker<C: Container + ?Sized>(root: &C, marker: &str) -> Option<MarkerLocation> {
    let mut path = Vec::new();
    let index = search(root.blocks(), marker, &mut path)?;
    Some(MarkerLocation { path, index })
}

fn search(blocks: &[Block], marker: &str, path: &mut Vec<CellAddress>) -> Option<usize> {
    let direct = blocks.iter().position(|block| match block {
        Block::Paragraph(p) => p.matches_marker(marker),
        Block::Table(_) => false,
    });
    if direct.is_some() {
        return direct;
    }

    for (block, table) in tables(blocks) {
        for (row, table_row) in table.rows.iter().enumerate() {
            for (cell, table_cell) in table_row.cells.iter().enumerate() {
                path.push(CellAddress { block, row, cell });
                if let Some(index) = search(&table_cell.content, marker, path) {
                    return Some(index);
                }
                path.pop();
            }
        }
    }
    None
}

/// Find every paragraph whose trimmed text fully matches `pattern`, in the
/// same order [`find_marker`] would visit them.
///
/// The whole text must match, so alternations such as `<<T|<<T1>>` still
/// report `<<T1>>` even though their leftmost match is shorter.
pub fn find_markers<C: Container + ?Sized>(
    root: &C,
    pattern: &Regex,
) -> Result<Vec<FoundMarker>> {
    let anchored = anchored(pattern)?;
    let mut found = Vec::new();
    collect(root.blocks(), &anchored, &mut Vec::new(), &mut found);
    Ok(found)
}

/// Wrap a pattern so it only matches the entire input.
pub fn anchored(pattern: &Regex) -> Result<Regex> {
    Ok(Regex::new(&format!(r"\A(?:{})\z", pattern.as_str()))?)
}

fn collect(
    blocks: &[Block],
    pattern: &Regex,
    path: &mut Vec<CellAddress>,
    found: &mut Vec<FoundMarker>,
) {
    for (index, block) in blocks.iter().enumerate() {
        let Block::Paragraph(p) = block else {
            continue;
        };
        let text = p.visible_text();
        let text = text.trim();
        if pattern.is_match(text) {
            found.push(FoundMarker {
                text: text.to_string(),
                location: MarkerLocation {
                    path: path.clone(),
                    index,
                },
            });
        }
    }

    for (block, table) in tables(blocks) {
        for (row, table_row) in table.rows.iter().enumerate() {
            for (cell, table_cell) in table_row.cells.iter().enumerate() {
                path.push(CellAddress { block, row, cell });
                collect(&table_cell.content, pattern, path, found);
                path.pop();
            }
        }
    }
}

fn tables(blocks: &[Block]) -> impl Iterator<Item = (usize, &crate::model::Table)> {
    blocks
        .iter()
        .enumerate()
        .filter_map(|(i, b)| b.as_table().map(|t| (i, t)))
}
