//! Dataset loaders and the extension-dispatching registry.

use super::{CellValue, TabularDataset};
use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Reads a [`TabularDataset`] from some source format.
pub trait DatasetLoader: Send + Sync {
    /// File extensions handled by this loader (lowercase, without dot).
    fn supported_extensions(&self) -> &[&str];

    /// Loader name for display and lookup.
    fn name(&self) -> &str;

    /// Decode a dataset from bytes.
    fn load_bytes(&self, bytes: &[u8]) -> Result<TabularDataset>;

    /// Load a dataset from a file. The file stem becomes the dataset name.
    fn load(&self, path: &Path) -> Result<TabularDataset> {
        let bytes = std::fs::read(path)?;
        let dataset = self.load_bytes(&bytes)?;
        Ok(match (dataset.name.is_some(), path.file_stem()) {
            (false, Some(stem)) => dataset.named(stem.to_string_lossy()),
            _ => dataset,
        })
    }

    /// Load one named sheet of a multi-sheet source. `Ok(None)` means the
    /// source has no sheet by that name.
    fn load_sheet(&self, path: &Path, sheet: &str) -> Result<Option<TabularDataset>> {
        let _ = sheet;
        Err(Error::UnsupportedSource(format!(
            "{} sources have no sheets ({})",
            self.name(),
            path.display()
        )))
    }

    /// Check if this loader handles the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions()
            .iter()
            .any(|e| e.eq_ignore_ascii_case(&ext_lower))
    }
}

/// Registry of dataset loaders keyed by file extension.
#[derive(Default)]
pub struct LoaderRegistry {
    loaders: Vec<Arc<dyn DatasetLoader>>,
    by_extension: HashMap<String, usize>,
}

impl LoaderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in loaders.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(JsonLoader::new()));
        #[cfg(feature = "csv")]
        registry.register(Arc::new(super::CsvLoader::new()));
        #[cfg(feature = "xlsx")]
        registry.register(Arc::new(super::XlsxLoader::new()));
        registry
    }

    /// Register a loader. Later registrations win for shared extensions.
    pub fn register(&mut self, loader: Arc<dyn DatasetLoader>) {
        let index = self.loaders.len();
        for ext in loader.supported_extensions() {
            self.by_extension.insert(ext.to_lowercase(), index);
        }
        self.loaders.push(loader);
    }

    /// Find the loader for an extension (case-insensitive).
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn DatasetLoader>> {
        self.by_extension
            .get(&ext.to_lowercase())
            .and_then(|&i| self.loaders.get(i))
            .cloned()
    }

    /// Find a loader by name (case-insensitive).
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn DatasetLoader>> {
        self.loaders
            .iter()
            .find(|l| l.name().eq_ignore_ascii_case(name))
            .cloned()
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.by_extension.contains_key(&ext.to_lowercase())
    }

    /// Load a dataset, choosing the loader from the file extension.
    pub fn load(&self, path: &Path) -> Result<TabularDataset> {
        let loader = self.loader_for(path)?;
        log::debug!("Loading {} with the {} loader", path.display(), loader.name());
        loader.load(path)
    }

    /// Load one sheet of a workbook, choosing the loader from the file
    /// extension. `Ok(None)` when the workbook has no such sheet.
    pub fn load_sheet(&self, path: &Path, sheet: &str) -> Result<Option<TabularDataset>> {
        let loader = self.loader_for(path)?;
        log::debug!(
            "Loading sheet '{}' of {} with the {} loader",
            sheet,
            path.display(),
            loader.name()
        );
        loader.load_sheet(path, sheet)
    }

    fn loader_for(&self, path: &Path) -> Result<Arc<dyn DatasetLoader>> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::UnsupportedSource(path.display().to_string()))?;

        self.get_by_extension(ext)
            .ok_or_else(|| Error::UnsupportedSource(format!("no loader for .{}", ext)))
    }
}

/// Loads datasets from JSON of the form
/// `{"name": "...", "columns": [...], "rows": [[...], ...]}`.
///
/// Values keep their native JSON types; string column labels that look like
/// dates become date labels.
#[derive(Debug, Clone, Default)]
pub struct JsonLoader;

impl JsonLoader {
    /// Create a new JSON loader.
    pub fn new() -> Self {
        Self
    }
}

#[derive(Deserialize)]
struct JsonDataset {
    #[serde(default)]
    name: Option<String>,
    columns: Vec<serde_json::Value>,
    #[serde(default)]
    rows: Vec<Vec<serde_json::Value>>,
}

impl DatasetLoader for JsonLoader {
    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn name(&self) -> &str {
        "json"
    }

    fn load_bytes(&self, bytes: &[u8]) -> Result<TabularDataset> {
        let raw: JsonDataset = serde_json::from_slice(bytes)
            .map_err(|e| Error::Dataset(format!("invalid JSON dataset: {}", e)))?;

        let columns = raw.columns.into_iter().map(|value| match value {
            serde_json::Value::String(s) => CellValue::label(&s),
            other => CellValue::from(other),
        });

        let mut dataset = TabularDataset::from_rows(columns, raw.rows);
        dataset.name = raw.name;
        Ok(dataset)
    }
}
