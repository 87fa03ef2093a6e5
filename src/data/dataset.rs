//! In-memory tabular datasets.

use super::CellValue;
use serde::{Deserialize, Serialize};

/// An ordered set of named columns and positionally aligned rows.
///
/// Every row holds exactly [`column_count`](Self::column_count) values:
/// short rows are padded with [`CellValue::Empty`] and over-long rows are
/// truncated when they are added.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TabularDataset {
    /// Optional dataset name (e.g. the sheet it came from)
    pub name: Option<String>,

    columns: Vec<CellValue>,
    rows: Vec<Vec<CellValue>>,

    #[serde(skip)]
    repaired_rows: usize,
}

impl TabularDataset {
    /// Create an empty dataset with the given column labels.
    pub fn new<C: Into<CellValue>>(columns: impl IntoIterator<Item = C>) -> Self {
        Self {
            name: None,
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
            repaired_rows: 0,
        }
    }

    /// Create a dataset and add every row, normalizing as needed.
    pub fn from_rows<C, V, R>(columns: impl IntoIterator<Item = C>, rows: R) -> Self
    where
        C: Into<CellValue>,
        V: Into<CellValue>,
        R: IntoIterator,
        R::Item: IntoIterator<Item = V>,
    {
        let mut dataset = Self::new(columns);
        for row in rows {
            dataset.push_row(row);
        }
        dataset
    }

    /// Set the dataset name and return self.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add a row, padding or truncating it to the column count.
    pub fn push_row<V: Into<CellValue>>(&mut self, values: impl IntoIterator<Item = V>) {
        let mut row: Vec<CellValue> = values.into_iter().map(Into::into).collect();
        let expected = self.columns.len();

        if row.len() != expected {
            let index = self.rows.len();
            if row.len() < expected {
                log::debug!(
                    "Padding row {} from {} to {} values",
                    index,
                    row.len(),
                    expected
                );
            } else {
                log::warn!(
                    "Row {} has {} values for {} columns; dropping the extra values",
                    index,
                    row.len(),
                    expected
                );
            }
            row.resize(expected, CellValue::Empty);
            self.repaired_rows += 1;
        }

        self.rows.push(row);
    }

    /// Column labels in order.
    pub fn columns(&self) -> &[CellValue] {
        &self.columns
    }

    /// Rows in order.
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of data rows (header excluded).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the dataset has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows that had to be padded or truncated.
    pub fn repaired_rows(&self) -> usize {
        self.repaired_rows
    }
}

#[derive(Deserialize)]
struct RawDataset {
    #[serde(default)]
    name: Option<String>,
    columns: Vec<CellValue>,
    #[serde(default)]
    rows: Vec<Vec<CellValue>>,
}

impl<'de> Deserialize<'de> for TabularDataset {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawDataset::deserialize(deserializer)?;
        let mut dataset = TabularDataset::new(raw.columns);
        dataset.name = raw.name;
        for row in raw.rows {
            dataset.push_row(row);
        }
        Ok(dataset)
    }
}
