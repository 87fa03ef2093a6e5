//! Per-table column layout policy.

use crate::model::{Alignment, Length, VerticalAlignment};
use serde::{Deserialize, Serialize};

/// Default width of the first column, in centimetres.
pub const DEFAULT_FIRST_COLUMN_WIDTH_CM: f32 = 8.0;

/// Default width of every other column, in centimetres.
pub const DEFAULT_OTHER_COLUMN_WIDTH_CM: f32 = 2.5;

/// Default table style name.
pub const DEFAULT_TABLE_STYLE: &str = "Table Grid";

/// Widths, alignment and style for a synthesized table.
///
/// The first column is the label column: wider and left-aligned. Every
/// other column shares one width and is centered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnLayout {
    /// Width of column 0
    pub first_column_width: Length,

    /// Width of columns 1..
    pub other_column_width: Length,

    /// Explicit widths by column index; columns past the end fall back to
    /// the first/other rule
    #[serde(default)]
    pub column_widths: Option<Vec<Length>>,

    /// Requested table style name
    #[serde(default)]
    pub style: Option<String>,
}

impl ColumnLayout {
    /// Create a layout with the default widths and style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the first column width.
    pub fn with_first_column_width(mut self, width: Length) -> Self {
        self.first_column_width = width;
        self
    }

    /// Set the width shared by all other columns.
    pub fn with_other_column_width(mut self, width: Length) -> Self {
        self.other_column_width = width;
        self
    }

    /// Set explicit per-column widths.
    pub fn with_column_widths(mut self, widths: Vec<Length>) -> Self {
        self.column_widths = Some(widths);
        self
    }

    /// Request a named table style.
    pub fn with_style(mut self, name: impl Into<String>) -> Self {
        self.style = Some(name.into());
        self
    }

    /// Do not request any table style.
    pub fn without_style(mut self) -> Self {
        self.style = None;
        self
    }

    /// Width of the column at `index`.
    pub fn width_for(&self, index: usize) -> Length {
        if let Some(width) = self.column_widths.as_ref().and_then(|w| w.get(index)) {
            return *width;
        }
        if index == 0 {
            self.first_column_width
        } else {
            self.other_column_width
        }
    }

    /// Horizontal alignment of body cells in the column at `index`.
    pub fn alignment_for(&self, index: usize) -> Alignment {
        if index == 0 {
            Alignment::Left
        } else {
            Alignment::Center
        }
    }

    /// Vertical alignment of every cell.
    pub fn vertical_alignment(&self) -> VerticalAlignment {
        VerticalAlignment::Center
    }
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            first_column_width: Length::cm(DEFAULT_FIRST_COLUMN_WIDTH_CM),
            other_column_width: Length::cm(DEFAULT_OTHER_COLUMN_WIDTH_CM),
            column_widths: None,
            style: Some(DEFAULT_TABLE_STYLE.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let layout = ColumnLayout::default();
        assert_eq!(layout.width_for(0), Length::cm(8.0));
        assert_eq!(layout.width_for(1), Length::cm(2.5));
        assert_eq!(layout.width_for(7), Length::cm(2.5));
        assert_eq!(layout.style.as_deref(), Some("Table Grid"));
    }

    #[test]
    fn test_alignment_policy() {
        let layout = ColumnLayout::new();
        assert_eq!(layout.alignment_for(0), Alignment::Left);
        assert_eq!(layout.alignment_for(1), Alignment::Center);
        assert_eq!(layout.alignment_for(3), Alignment::Center);
        assert_eq!(layout.vertical_alignment(), VerticalAlignment::Center);
    }

    #[test]
    fn test_explicit_widths_fall_back() {
        let layout = ColumnLayout::new()
            .with_other_column_width(Length::cm(3.0))
            .with_column_widths(vec![Length::cm(6.0), Length::cm(4.0)]);

        assert_eq!(layout.width_for(0), Length::cm(6.0));
        assert_eq!(layout.width_for(1), Length::cm(4.0));
        assert_eq!(layout.width_for(2), Length::cm(3.0));
    }

    #[test]
    fn test_without_style() {
        let layout = ColumnLayout::new().with_style("Fancy").without_style();
        assert!(layout.style.is_none());
    }
}
