//! Summary of a splice pass.

use crate::resolve::FoundMarker;
use serde::Serialize;

/// One table inserted by a splice pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplicedTable {
    /// Marker that was replaced
    pub marker: String,

    /// Table nesting depth of the container that held the marker
    pub depth: usize,

    /// Body rows written (header excluded)
    pub body_rows: usize,

    /// Columns written
    pub columns: usize,

    /// Dataset rows that were padded or truncated before rendering
    pub repaired_rows: usize,

    /// Applied table style, if the document knew the requested one
    pub style: Option<String>,
}

/// Result of a splice pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SpliceReport {
    /// Inserted tables, in binding order
    pub tables: Vec<SplicedTable>,

    /// Marker-shaped paragraphs still present after the pass
    pub leftover_markers: Vec<FoundMarker>,
}

impl SpliceReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tables inserted.
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Total body rows across all inserted tables.
    pub fn total_rows(&self) -> usize {
        self.tables.iter().map(|t| t.body_rows).sum()
    }

    /// Check if any marker-shaped paragraph remains.
    pub fn has_leftovers(&self) -> bool {
        !self.leftover_markers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals() {
        let mut report = SpliceReport::new();
        for rows in [2, 5] {
            report.tables.push(SplicedTable {
                marker: format!("<<T{}>>", rows),
                depth: 0,
                body_rows: rows,
                columns: 3,
                repaired_rows: 0,
                style: None,
            });
        }
        assert_eq!(report.table_count(), 2);
        assert_eq!(report.total_rows(), 7);
        assert!(!report.has_leftovers());
    }
}
