//! Excel workbook dataset loader.

use super::{CellValue, DatasetLoader, TabularDataset};
use crate::error::{Error, Result};
use calamine::{open_workbook_auto_from_rs, Data, DataType, Range, Reader, Sheets};
use std::io::Cursor;
use std::path::Path;

/// Loads datasets from `.xlsx`/`.xls`/`.ods` workbooks.
///
/// The first row of a sheet holds column labels; date-formatted label cells
/// become date labels. Whole-number floats read as integers, matching how
/// spreadsheet tools store integer columns.
#[derive(Debug, Clone, Default)]
pub struct XlsxLoader;

impl XlsxLoader {
    /// Create a new workbook loader.
    pub fn new() -> Self {
        Self
    }
}

fn open(bytes: &[u8]) -> Result<Sheets<Cursor<&[u8]>>> {
    open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| Error::Dataset(format!("invalid workbook: {}", e)))
}

fn read_sheet(workbook: &mut Sheets<Cursor<&[u8]>>, sheet: &str) -> Result<TabularDataset> {
    let range = workbook
        .worksheet_range(sheet)
        .map_err(|e| Error::Dataset(format!("sheet '{}': {}", sheet, e)))?;
    let dataset = to_dataset(&range).named(sheet);

    log::debug!(
        "Read sheet '{}': {} columns, {} rows",
        sheet,
        dataset.column_count(),
        dataset.row_count()
    );
    Ok(dataset)
}

fn to_dataset(range: &Range<Data>) -> TabularDataset {
    let mut rows = range.rows();
    let columns: Vec<CellValue> = rows
        .next()
        .map(|header| header.iter().map(header_value).collect())
        .unwrap_or_default();

    let mut dataset = TabularDataset::new(columns);
    for row in rows {
        dataset.push_row(row.iter().map(cell_value));
    }
    dataset
}

fn header_value(cell: &Data) -> CellValue {
    match cell {
        Data::String(s) => CellValue::label(s),
        other => cell_value(other),
    }
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Integer(*i),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
            CellValue::Integer(*f as i64)
        }
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Boolean(*b),
        Data::DateTime(_) | Data::DateTimeIso(_) => cell
            .as_datetime()
            .map(CellValue::Date)
            .unwrap_or_else(|| CellValue::Text(cell.to_string())),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

impl DatasetLoader for XlsxLoader {
    fn supported_extensions(&self) -> &[&str] {
        &["xlsx", "xlsm", "xls", "ods"]
    }

    fn name(&self) -> &str {
        "xlsx"
    }

    /// Reads the first sheet.
    fn load_bytes(&self, bytes: &[u8]) -> Result<TabularDataset> {
        let mut workbook = open(bytes)?;
        let first = workbook
            .sheet_names()
            .into_iter()
            .next()
            .ok_or_else(|| Error::Dataset("workbook has no sheets".into()))?;
        read_sheet(&mut workbook, &first)
    }

    fn load_sheet(&self, path: &Path, sheet: &str) -> Result<Option<TabularDataset>> {
        let bytes = std::fs::read(path)?;
        let mut workbook = open(&bytes)?;
        if !workbook.sheet_names().iter().any(|name| name == sheet) {
            return Ok(None);
        }
        read_sheet(&mut workbook, sheet).map(Some)
    }
}
