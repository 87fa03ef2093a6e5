//! Marker-to-table splicing.
//!
//! Each [`TableBinding`] pairs a marker string with a dataset and a layout.
//! For every binding, in order, the marker paragraph is located, a table is
//! synthesized from the dataset and inserted directly after the paragraph,
//! and the paragraph is removed: the table takes its place in document
//! order. A marker that cannot be found is always an error.
//!
//! # Example
//!
//! ```
//! use docsplice::model::{Container, Document, Paragraph};
//! use docsplice::splice::SpliceEngine;
//! use docsplice::data::TabularDataset;
//!
//! let mut doc = Document::new();
//! doc.push(Paragraph::with_text("<<T1>>"));
//!
//! let data = TabularDataset::from_rows(["Month", "Value"], vec![vec!["Jan", "10"]]);
//! let report = SpliceEngine::new().bind("<<T1>>", data).run(&mut doc)?;
//!
//! assert_eq!(report.table_count(), 1);
//! assert!(doc.blocks()[0].is_table());
//! # Ok::<(), docsplice::Error>(())
//! ```

mod batch;
mod manifest;
mod report;

pub use batch::splice_batch;
pub use manifest::{LayoutConfig, Manifest, TableEntry};
pub use report::{SplicedTable, SpliceReport};

use crate::data::TabularDataset;
use crate::error::{Error, Result};
use crate::format::{ColumnFormatter, ColumnLayout};
use crate::model::{Block, Container, Document, StyleCatalog};
use crate::resolve::{find_marker, find_markers};
use crate::synth::TableSynthesizer;
use regex::Regex;

/// Default pattern for marker-shaped paragraphs, e.g. `<<STORM_WATER_TABLE>>`.
pub const DEFAULT_MARKER_PATTERN: &str = r"<<[^<>]+>>";

/// A marker paired with the dataset and layout that replace it.
#[derive(Debug, Clone)]
pub struct TableBinding {
    /// Exact paragraph text to replace
    pub marker: String,
    /// Table content
    pub dataset: TabularDataset,
    /// Table formatting
    pub layout: ColumnLayout,
}

impl TableBinding {
    /// Bind a marker to a dataset with the default layout.
    pub fn new(marker: impl Into<String>, dataset: TabularDataset) -> Self {
        Self {
            marker: marker.into(),
            dataset,
            layout: ColumnLayout::default(),
        }
    }

    /// Set the layout and return self.
    pub fn with_layout(mut self, layout: ColumnLayout) -> Self {
        self.layout = layout;
        self
    }
}

/// What to do with marker-shaped paragraphs left after all bindings ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeftoverCheck {
    /// Do not look for leftovers
    Ignore,
    /// Log a warning per leftover and list them in the report
    #[default]
    Warn,
    /// Fail with [`Error::UnresolvedMarkers`]
    Deny,
}

/// Options for a splice pass.
#[derive(Debug, Clone)]
pub struct SpliceOptions {
    /// Work on a staged copy and commit only if every binding succeeds
    pub transactional: bool,

    /// Leftover marker policy
    pub leftover_check: LeftoverCheck,

    /// Pattern a paragraph's whole trimmed text must match to count as a
    /// leftover marker
    pub marker_pattern: String,
}

impl SpliceOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable transactional mode.
    pub fn with_transactional(mut self, transactional: bool) -> Self {
        self.transactional = transactional;
        self
    }

    /// Set the leftover marker policy.
    pub fn with_leftover_check(mut self, check: LeftoverCheck) -> Self {
        self.leftover_check = check;
        self
    }

    /// Set the leftover marker pattern.
    pub fn with_marker_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.marker_pattern = pattern.into();
        self
    }
}

impl Default for SpliceOptions {
    fn default() -> Self {
        Self {
            transactional: true,
            leftover_check: LeftoverCheck::Warn,
            marker_pattern: DEFAULT_MARKER_PATTERN.to_string(),
        }
    }
}

/// Replace every bound marker in `root` with its synthesized table.
///
/// Bindings run in order and the tree is mutated as they go; the first
/// marker that cannot be found aborts the pass with
/// [`Error::MarkerNotFound`].
pub fn splice_container<C: Container + ?Sized>(
    root: &mut C,
    styles: &dyn StyleCatalog,
    bindings: &[TableBinding],
) -> Result<SpliceReport> {
    splice_with(root, styles, bindings, &TableSynthesizer::new())
}

/// Splice bindings into a document using default options.
pub fn splice(doc: &mut Document, bindings: &[TableBinding]) -> Result<SpliceReport> {
    run(doc, bindings, &SpliceOptions::default(), &TableSynthesizer::new())
}

fn splice_with<C: Container + ?Sized>(
    root: &mut C,
    styles: &dyn StyleCatalog,
    bindings: &[TableBinding],
    synthesizer: &TableSynthesizer,
) -> Result<SpliceReport> {
    let mut report = SpliceReport::new();
    for binding in bindings {
        report
            .tables
            .push(apply_binding(root, styles, binding, synthesizer)?);
    }
    Ok(report)
}

fn apply_binding<C: Container + ?Sized>(
    root: &mut C,
    styles: &dyn StyleCatalog,
    binding: &TableBinding,
    synthesizer: &TableSynthesizer,
) -> Result<SplicedTable> {
    let location = find_marker(&*root, &binding.marker)
        .ok_or_else(|| Error::MarkerNotFound(binding.marker.clone()))?;

    let table = synthesizer.synthesize(&binding.dataset, &binding.layout, styles);
    let spliced = SplicedTable {
        marker: binding.marker.clone(),
        depth: location.depth(),
        body_rows: table.body().len(),
        columns: binding.dataset.column_count(),
        repaired_rows: binding.dataset.repaired_rows(),
        style: table.style.clone(),
    };

    let blocks = location.container_mut(root.blocks_mut())?;
    blocks.insert(location.index + 1, Block::Table(table));
    blocks.remove(location.index);

    log::info!(
        "Replaced marker '{}' at {} with a {}x{} table",
        spliced.marker,
        location,
        spliced.body_rows + 1,
        spliced.columns
    );
    Ok(spliced)
}

fn run(
    doc: &mut Document,
    bindings: &[TableBinding],
    options: &SpliceOptions,
    synthesizer: &TableSynthesizer,
) -> Result<SpliceReport> {
    let pattern = match options.leftover_check {
        LeftoverCheck::Ignore => None,
        _ => Some(Regex::new(&options.marker_pattern)?),
    };

    let Document { styles, body, .. } = doc;
    let styles: &dyn StyleCatalog = &*styles;
    let report = if options.transactional {
        let mut staged = body.clone();
        let report = splice_with(&mut staged, styles, bindings, synthesizer)?;
        let leftovers = check_leftovers(&staged, pattern.as_ref(), options.leftover_check)?;
        *body = staged;
        SpliceReport {
            leftover_markers: leftovers,
            ..report
        }
    } else {
        let mut report = splice_with(&mut *body, styles, bindings, synthesizer)?;
        report.leftover_markers =
            check_leftovers(&*body, pattern.as_ref(), options.leftover_check)?;
        report
    };

    Ok(report)
}

fn check_leftovers<C: Container + ?Sized>(
    root: &C,
    pattern: Option<&Regex>,
    check: LeftoverCheck,
) -> Result<Vec<crate::resolve::FoundMarker>> {
    let Some(pattern) = pattern else {
        return Ok(Vec::new());
    };
    let leftovers = find_markers(root, pattern)?;
    if leftovers.is_empty() {
        return Ok(leftovers);
    }

    match check {
        LeftoverCheck::Deny => Err(Error::UnresolvedMarkers(
            leftovers.into_iter().map(|m| m.text).collect(),
        )),
        _ => {
            for marker in &leftovers {
                log::warn!(
                    "Marker '{}' left unresolved at {}",
                    marker.text,
                    marker.location
                );
            }
            Ok(leftovers)
        }
    }
}

/// Holds bindings and options for repeated splice passes.
#[derive(Debug, Clone, Default)]
pub struct SpliceEngine {
    bindings: Vec<TableBinding>,
    options: SpliceOptions,
    synthesizer: TableSynthesizer,
}

impl SpliceEngine {
    /// Create an engine with no bindings and default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set options.
    pub fn with_options(mut self, options: SpliceOptions) -> Self {
        self.options = options;
        self
    }

    /// Use a custom formatter for headers and cells.
    pub fn with_formatter(mut self, formatter: ColumnFormatter) -> Self {
        self.synthesizer = TableSynthesizer::with_formatter(formatter);
        self
    }

    /// Bind a marker to a dataset with the default layout.
    pub fn bind(self, marker: impl Into<String>, dataset: TabularDataset) -> Self {
        self.with_binding(TableBinding::new(marker, dataset))
    }

    /// Bind a marker to a dataset with a custom layout.
    pub fn bind_with_layout(
        self,
        marker: impl Into<String>,
        dataset: TabularDataset,
        layout: ColumnLayout,
    ) -> Self {
        self.with_binding(TableBinding::new(marker, dataset).with_layout(layout))
    }

    /// Add a binding and return self.
    pub fn with_binding(mut self, binding: TableBinding) -> Self {
        self.bindings.push(binding);
        self
    }

    /// Add many bindings and return self.
    pub fn with_bindings(mut self, bindings: impl IntoIterator<Item = TableBinding>) -> Self {
        self.bindings.extend(bindings);
        self
    }

    /// Bindings in processing order.
    pub fn bindings(&self) -> &[TableBinding] {
        &self.bindings
    }

    /// Current options.
    pub fn options(&self) -> &SpliceOptions {
        &self.options
    }

    /// Run every binding against `doc`.
    pub fn run(&self, doc: &mut Document) -> Result<SpliceReport> {
        run(doc, &self.bindings, &self.options, &self.synthesizer)
    }
}
