//! Delimited-text dataset loader.

use super::{CellValue, DatasetLoader, TabularDataset};
use crate::error::Result;

/// Loads datasets from CSV: the first record holds column labels, every
/// following record is a row. Field types are inferred per value.
#[derive(Debug, Clone)]
pub struct CsvLoader {
    delimiter: u8,
}

impl CsvLoader {
    /// Create a comma-delimited loader.
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    /// Use a different field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

impl Default for CsvLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetLoader for CsvLoader {
    fn supported_extensions(&self) -> &[&str] {
        &["csv", "tsv"]
    }

    fn name(&self) -> &str {
        "csv"
    }

    fn load_bytes(&self, bytes: &[u8]) -> Result<TabularDataset> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .has_headers(true)
            .from_reader(bytes);

        let columns: Vec<CellValue> = reader.headers()?.iter().map(CellValue::label).collect();
        let mut dataset = TabularDataset::new(columns);

        for record in reader.records() {
            let record = record?;
            dataset.push_row(record.iter().map(CellValue::infer));
        }

        log::debug!(
            "Read CSV dataset: {} columns, {} rows",
            dataset.column_count(),
            dataset.row_count()
        );
        Ok(dataset)
    }

    fn load(&self, path: &std::path::Path) -> Result<TabularDataset> {
        let delimiter = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("tsv") => b'\t',
            _ => self.delimiter,
        };
        let bytes = std::fs::read(path)?;
        let dataset = self.clone().with_delimiter(delimiter).load_bytes(&bytes)?;
        Ok(match path.file_stem() {
            Some(stem) => dataset.named(stem.to_string_lossy()),
            None => dataset,
        })
    }
}
