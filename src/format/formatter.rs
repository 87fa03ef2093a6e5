//! Display strings for column labels and cell values.

use crate::data::CellValue;

/// Header pattern for date-like column labels, e.g. `05-Jan-24`.
pub const DEFAULT_DATE_HEADER_FORMAT: &str = "%d-%b-%y";

const CELL_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Renders headers and cell values to text.
#[derive(Debug, Clone)]
pub struct ColumnFormatter {
    date_header_format: String,
}

impl ColumnFormatter {
    /// Create a formatter with the default date header pattern.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different chrono pattern for date-like column labels.
    pub fn with_date_header_format(mut self, format: impl Into<String>) -> Self {
        self.date_header_format = format.into();
        self
    }

    /// Render a column label.
    pub fn format_header(&self, label: &CellValue) -> String {
        match label {
            CellValue::Date(dt) => dt.format(&self.date_header_format).to_string(),
            other => self.format_cell(other),
        }
    }

    /// Render a cell value. Missing values render as an empty string.
    pub fn format_cell(&self, value: &CellValue) -> String {
        match value {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Integer(i) => i.to_string(),
            CellValue::Number(n) if n.is_nan() => String::new(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Boolean(true) => "True".to_string(),
            CellValue::Boolean(false) => "False".to_string(),
            CellValue::Date(dt) => dt.format(CELL_DATE_FORMAT).to_string(),
        }
    }
}

/// Floats keep a fractional part even when integral (`10.0`), so a float
/// column never reads like an integer column.
fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e16 {
        format!("{:.1}", n)
    } else {
        n.to_string()
    }
}

impl Default for ColumnFormatter {
    fn default() -> Self {
        Self {
            date_header_format: DEFAULT_DATE_HEADER_FORMAT.to_string(),
        }
    }
}
