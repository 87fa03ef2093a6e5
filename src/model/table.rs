//! Table types.

use super::{Alignment, Block, Container, Length, Paragraph};
use serde::{Deserialize, Serialize};

/// A table structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Rows in the table
    pub rows: Vec<TableRow>,

    /// Number of header rows (0 = no header)
    #[serde(default)]
    pub header_rows: u8,

    /// Named table style, if the destination document knows it
    #[serde(default)]
    pub style: Option<String>,

    /// Horizontal placement of the table on the page
    #[serde(default)]
    pub alignment: Alignment,

    /// Whether the consumer may resize columns to fit content
    #[serde(default = "default_autofit")]
    pub autofit: bool,
}

fn default_autofit() -> bool {
    true
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            header_rows: 0,
            style: None,
            alignment: Alignment::Left,
            autofit: true,
        }
    }

    /// Create a table with header.
    pub fn with_header(header_rows: u8) -> Self {
        Self {
            header_rows,
            ..Self::new()
        }
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns (based on first row).
    pub fn column_count(&self) -> usize {
        self.rows.first().map(|r| r.cells.len()).unwrap_or(0)
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get header rows.
    pub fn header(&self) -> &[TableRow] {
        let end = (self.header_rows as usize).min(self.rows.len());
        &self.rows[..end]
    }

    /// Get body rows (non-header).
    pub fn body(&self) -> &[TableRow] {
        let start = (self.header_rows as usize).min(self.rows.len());
        &self.rows[start..]
    }

    /// Cells of column `index`, top to bottom.
    pub fn column(&self, index: usize) -> impl Iterator<Item = &TableCell> + '_ {
        self.rows.iter().filter_map(move |row| row.cells.get(index))
    }

    /// Whether any cell holds a nested table.
    pub fn has_nested_tables(&self) -> bool {
        self.rows
            .iter()
            .flat_map(|r| &r.cells)
            .any(|c| c.tables().next().is_some())
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

/// A table row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells in the row
    pub cells: Vec<TableCell>,

    /// Whether this is a header row
    #[serde(default)]
    pub is_header: bool,
}

impl TableRow {
    /// Create a new row with cells.
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self {
            cells,
            is_header: false,
        }
    }

    /// Create a header row.
    pub fn header(cells: Vec<TableCell>) -> Self {
        Self {
            cells,
            is_header: true,
        }
    }

    /// Create a row from text values.
    pub fn from_strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::new(values.into_iter().map(TableCell::text).collect())
    }

    /// Get plain text representation.
    pub fn plain_text(&self) -> String {
        self.cells
            .iter()
            .map(|c| c.plain_text())
            .collect::<Vec<_>>()
            .join("\t")
    }
}

/// A table cell. Cells are containers and may hold nested tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    /// Cell content
    #[serde(default)]
    pub content: Vec<Block>,

    /// Preferred cell width
    #[serde(default)]
    pub width: Option<Length>,

    /// Vertical alignment
    #[serde(default)]
    pub vertical_alignment: VerticalAlignment,
}

impl TableCell {
    /// Create a new cell with text content.
    pub fn text(text: impl Into<String>) -> Self {
        Self::with_content(vec![Block::Paragraph(Paragraph::with_text(text))])
    }

    /// Create an empty cell.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a cell with the given blocks.
    pub fn with_content(content: Vec<Block>) -> Self {
        Self {
            content,
            ..Self::default()
        }
    }

    /// Set the width and return self.
    pub fn width(mut self, width: Length) -> Self {
        self.width = Some(width);
        self
    }

    /// Set vertical alignment and return self.
    pub fn valign(mut self, alignment: VerticalAlignment) -> Self {
        self.vertical_alignment = alignment;
        self
    }

    /// Alignment of the cell's first paragraph, if any.
    pub fn alignment(&self) -> Option<Alignment> {
        self.paragraphs().next().map(|(_, p)| p.alignment())
    }

    /// Get plain text content.
    pub fn plain_text(&self) -> String {
        self.content
            .iter()
            .map(|block| block.plain_text())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Check if the cell is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty() || self.plain_text().trim().is_empty()
    }
}

impl Container for TableCell {
    fn blocks(&self) -> &[Block] {
        &self.content
    }

    fn blocks_mut(&mut self) -> &mut Vec<Block> {
        &mut self.content
    }
}

/// Vertical alignment for table cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlignment {
    /// Top alignment
    #[default]
    Top,
    /// Middle/center alignment
    Center,
    /// Bottom alignment
    Bottom,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_new() {
        let table = Table::new();
        assert!(table.is_empty());
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 0);
        assert!(table.header().is_empty());
        assert!(table.body().is_empty());
    }

    #[test]
    fn test_table_with_data() {
        let mut table = Table::with_header(1);
        table.add_row(TableRow::header(vec![
            TableCell::text("Name"),
            TableCell::text("Age"),
        ]));
        table.add_row(TableRow::from_strings(["Alice", "30"]));
        table.add_row(TableRow::from_strings(["Bob", "25"]));

        assert_eq!(table.row_count(), 3);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.header().len(), 1);
        assert_eq!(table.body().len(), 2);
        assert_eq!(
            table.column(1).map(|c| c.plain_text()).collect::<Vec<_>>(),
            vec!["Age", "30", "25"]
        );
    }

    #[test]
    fn test_nested_tables() {
        let mut inner = Table::new();
        inner.add_row(TableRow::from_strings(["x"]));

        let mut outer = Table::new();
        outer.add_row(TableRow::new(vec![TableCell::with_content(vec![
            Block::Table(inner),
        ])]));

        assert!(outer.has_nested_tables());
        assert_eq!(outer.plain_text(), "x");
    }

    #[test]
    fn test_cell_text() {
        let cell = TableCell::text("Hello");
        assert_eq!(cell.plain_text(), "Hello");
        assert_eq!(cell.alignment(), Some(Alignment::Left));
        assert!(!cell.is_empty());
        assert!(TableCell::empty().is_empty());
    }
}
