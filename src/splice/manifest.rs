//! JSON manifest describing the bindings of one splice pass.
//!
//! ```json
//! {
//!   "defaults": {"first_column_width_cm": 8.0, "other_column_width_cm": 2.5, "style": "Table Grid"},
//!   "tables": [
//!     {"marker": "<<DOMESTIC_WATER_TABLE>>", "source": "domestic.csv"},
//!     {"marker": "<<STORM_WATER_TABLE>>", "source": "storm.json", "style": null, "optional": true},
//!     {"marker": "<<SUMMARY_TABLE>>", "source": "report.xlsx", "sheet": "Summary", "optional": true}
//!   ]
//! }
//! ```
//!
//! Sources resolve relative to the manifest's directory.

use super::TableBinding;
use crate::data::LoaderRegistry;
use crate::error::{Error, Result};
use crate::format::ColumnLayout;
use crate::model::Length;
use serde::{Deserialize, Deserializer};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Layout overrides; absent fields inherit.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LayoutConfig {
    /// First column width in centimetres
    #[serde(default)]
    pub first_column_width_cm: Option<f32>,

    /// Width of every other column in centimetres
    #[serde(default)]
    pub other_column_width_cm: Option<f32>,

    /// Explicit per-column widths in centimetres
    #[serde(default)]
    pub column_widths_cm: Option<Vec<f32>>,

    /// Table style; `null` disables styling, absence inherits
    #[serde(default, deserialize_with = "present")]
    pub style: Option<Option<String>>,
}

impl LayoutConfig {
    /// Reject widths that cannot size a column; `owner` names the source in
    /// the error.
    pub fn validate(&self, owner: &str) -> Result<()> {
        let widths = [self.first_column_width_cm, self.other_column_width_cm]
            .into_iter()
            .flatten()
            .chain(self.column_widths_cm.iter().flatten().copied());
        for cm in widths {
            if !(cm.is_finite() && cm > 0.0) {
                return Err(Error::Manifest(format!(
                    "{}: column width {} cm must be a positive number",
                    owner, cm
                )));
            }
        }
        Ok(())
    }

    /// Apply these overrides on top of `base`.
    pub fn apply(&self, mut base: ColumnLayout) -> ColumnLayout {
        if let Some(cm) = self.first_column_width_cm {
            base.first_column_width = Length::cm(cm);
        }
        if let Some(cm) = self.other_column_width_cm {
            base.other_column_width = Length::cm(cm);
        }
        if let Some(ref widths) = self.column_widths_cm {
            base.column_widths = Some(widths.iter().copied().map(Length::cm).collect());
        }
        if let Some(ref style) = self.style {
            base.style = style.clone();
        }
        base
    }
}

fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// One marker → dataset source entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TableEntry {
    /// Marker paragraph text
    pub marker: String,

    /// Dataset file, relative to the manifest
    pub source: PathBuf,

    /// Worksheet to read when the source is a workbook
    #[serde(default)]
    pub sheet: Option<String>,

    /// Skip this entry (with a warning) when the source file or sheet is missing
    #[serde(default)]
    pub optional: bool,

    /// Per-table layout overrides
    #[serde(flatten)]
    pub layout: LayoutConfig,
}

/// A parsed manifest.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Manifest {
    /// Layout applied to every table before per-table overrides
    #[serde(default)]
    pub defaults: LayoutConfig,

    /// Tables in processing order
    #[serde(default)]
    pub tables: Vec<TableEntry>,

    #[serde(skip)]
    base_dir: PathBuf,
}

impl Manifest {
    /// Parse a manifest; relative sources resolve against `base_dir`.
    pub fn parse(json: &str, base_dir: impl Into<PathBuf>) -> Result<Self> {
        let mut manifest: Manifest = serde_json::from_str(json)
            .map_err(|e| Error::Manifest(format!("invalid manifest: {}", e)))?;
        manifest.base_dir = base_dir.into();
        manifest.validate()?;
        Ok(manifest)
    }

    /// Read and parse a manifest file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Self::parse(&json, base_dir)
    }

    fn validate(&self) -> Result<()> {
        self.defaults.validate("defaults")?;
        let mut seen = HashSet::new();
        for entry in &self.tables {
            if entry.marker.trim().is_empty() {
                return Err(Error::Manifest("table entry with an empty marker".into()));
            }
            entry.layout.validate(&entry.marker)?;
            if !seen.insert(entry.marker.as_str()) {
                return Err(Error::Manifest(format!(
                    "marker '{}' is listed more than once",
                    entry.marker
                )));
            }
        }
        Ok(())
    }

    /// Directory that relative sources resolve against.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolved path of an entry's source.
    pub fn source_path(&self, entry: &TableEntry) -> PathBuf {
        self.base_dir.join(&entry.source)
    }

    /// Final layout for an entry: built-in defaults, then manifest defaults,
    /// then the entry's own overrides.
    pub fn layout_for(&self, entry: &TableEntry) -> ColumnLayout {
        entry
            .layout
            .apply(self.defaults.apply(ColumnLayout::default()))
    }

    /// Load every entry's dataset and build the bindings.
    pub fn bindings(&self, loaders: &LoaderRegistry) -> Result<Vec<TableBinding>> {
        let mut bindings = Vec::with_capacity(self.tables.len());
        for entry in &self.tables {
            let path = self.source_path(entry);
            if !path.exists() {
                if entry.optional {
                    log::warn!(
                        "Skipping '{}': source {} not found",
                        entry.marker,
                        path.display()
                    );
                    continue;
                }
                return Err(Error::Dataset(format!(
                    "source {} for marker '{}' not found",
                    path.display(),
                    entry.marker
                )));
            }

            let dataset = match entry.sheet {
                Some(ref sheet) => match loaders.load_sheet(&path, sheet)? {
                    Some(dataset) => dataset,
                    None if entry.optional => {
                        log::warn!(
                            "Skipping '{}': sheet '{}' not found in {}",
                            entry.marker,
                            sheet,
                            path.display()
                        );
                        continue;
                    }
                    None => {
                        return Err(Error::Dataset(format!(
                            "sheet '{}' for marker '{}' not found in {}",
                            sheet,
                            entry.marker,
                            path.display()
                        )))
                    }
                },
                None => loaders.load(&path)?,
            };
            let layout = self.layout_for(entry);
            bindings.push(TableBinding::new(entry.marker.clone(), dataset).with_layout(layout));
        }
        Ok(bindings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_inheritance() {
        let manifest = Manifest::parse(
            r#"{
                "defaults": {"first_column_width_cm": 6.0, "style": "Custom"},
                "tables": [
                    {"marker": "<<A>>", "source": "a.csv"},
                    {"marker": "<<B>>", "source": "b.csv", "other_column_width_cm": 3.0, "style": null}
                ]
            }"#,
            "/data",
        )
        .unwrap();

        let a = manifest.layout_for(&manifest.tables[0]);
        assert_eq!(a.first_column_width, Length::cm(6.0));
        assert_eq!(a.other_column_width, Length::cm(2.5));
        assert_eq!(a.style.as_deref(), Some("Custom"));

        let b = manifest.layout_for(&manifest.tables[1]);
        assert_eq!(b.other_column_width, Length::cm(3.0));
        assert!(b.style.is_none());

        assert_eq!(
            manifest.source_path(&manifest.tables[0]),
            PathBuf::from("/data/a.csv")
        );
    }

    #[test]
    fn test_duplicate_markers_rejected() {
        let err = Manifest::parse(
            r#"{"tables": [{"marker": "<<A>>", "source": "a.csv"},
                           {"marker": "<<A>>", "source": "b.csv"}]}"#,
            ".",
        )
        .unwrap_err();
        assert!(matches!(err, Error::Manifest(_)));
    }

    #[test]
    fn test_empty_marker_rejected() {
        let err = Manifest::parse(r#"{"tables": [{"marker": " ", "source": "a.csv"}]}"#, ".")
            .unwrap_err();
        assert!(matches!(err, Error::Manifest(_)));
    }

    #[test]
    fn test_bad_widths_rejected() {
        for json in [
            r#"{"tables": [{"marker": "<<A>>", "source": "a.csv", "first_column_width_cm": 0}]}"#,
            r#"{"tables": [{"marker": "<<A>>", "source": "a.csv", "other_column_width_cm": -2.5}]}"#,
            r#"{"tables": [{"marker": "<<A>>", "source": "a.csv", "column_widths_cm": [3.0, 0.0]}]}"#,
            r#"{"defaults": {"first_column_width_cm": -1}, "tables": []}"#,
        ] {
            let err = Manifest::parse(json, ".").unwrap_err();
            assert!(matches!(err, Error::Manifest(_)), "accepted {}", json);
        }
    }

    #[test]
    fn test_non_finite_width_rejected() {
        let layout = LayoutConfig {
            other_column_width_cm: Some(f32::NAN),
            ..LayoutConfig::default()
        };
        assert!(matches!(layout.validate("<<A>>"), Err(Error::Manifest(_))));

        let layout = LayoutConfig {
            column_widths_cm: Some(vec![2.0, f32::INFINITY]),
            ..LayoutConfig::default()
        };
        assert!(matches!(layout.validate("<<A>>"), Err(Error::Manifest(_))));
    }

    #[test]
    fn test_sheet_entry_parsed() {
        let manifest = Manifest::parse(
            r#"{"tables": [{"marker": "<<A>>", "source": "report.xlsx", "sheet": "StormWater"}]}"#,
            ".",
        )
        .unwrap();
        assert_eq!(manifest.tables[0].sheet.as_deref(), Some("StormWater"));
        assert!(!manifest.tables[0].optional);
    }

    #[test]
    fn test_missing_sources() {
        let manifest = Manifest::parse(
            r#"{"tables": [{"marker": "<<A>>", "source": "missing.json", "optional": true}]}"#,
            "/nonexistent-docsplice-dir",
        )
        .unwrap();
        let bindings = manifest.bindings(&LoaderRegistry::with_defaults()).unwrap();
        assert!(bindings.is_empty());

        let manifest = Manifest::parse(
            r#"{"tables": [{"marker": "<<A>>", "source": "missing.json"}]}"#,
            "/nonexistent-docsplice-dir",
        )
        .unwrap();
        let err = manifest
            .bindings(&LoaderRegistry::with_defaults())
            .unwrap_err();
        assert!(matches!(err, Error::Dataset(_)));
    }
}
