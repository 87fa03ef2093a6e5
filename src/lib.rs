//! # docsplice
//!
//! Marker-based table splicing for structured documents.
//!
//! A template document carries placeholder paragraphs such as
//! `<<DOMESTIC_WATER_TABLE>>`. This library finds each placeholder anywhere in
//! the document tree (including inside table cells), builds a formatted table
//! from a tabular dataset, and puts the table exactly where the placeholder
//! was.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docsplice::{load_document, save_document, JsonFormat, SpliceEngine};
//! use docsplice::data::TabularDataset;
//!
//! fn main() -> docsplice::Result<()> {
//!     let mut doc = load_document("report.json")?;
//!
//!     let data = TabularDataset::from_rows(
//!         ["Month", "Value"],
//!         vec![vec!["Jan", "10"], vec!["Feb", "20"]],
//!     );
//!     let report = SpliceEngine::new().bind("<<T1>>", data).run(&mut doc)?;
//!     println!("spliced {} tables", report.table_count());
//!
//!     save_document(&doc, "report.out.json", JsonFormat::Pretty)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Recursive marker search**: body and nested table cells, first match wins
//! - **Deterministic formatting**: fixed column widths, alignment and header styling
//! - **Transactional splicing**: a failed pass leaves the document untouched
//! - **Dataset loaders**: CSV/TSV (`csv` feature), Excel workbooks with sheet
//!   selection (`xlsx` feature) and JSON
//! - **Manifests**: JSON files binding markers to dataset sources
//! - **Previews**: Markdown, plain text and JSON rendering

pub mod data;
pub mod error;
pub mod format;
pub mod model;
pub mod render;
pub mod resolve;
pub mod splice;
pub mod synth;

// Re-export commonly used types
pub use data::{CellValue, DatasetLoader, LoaderRegistry, TabularDataset};
pub use error::{Error, Result};
pub use format::{ColumnFormatter, ColumnLayout};
pub use model::{
    Alignment, Block, Body, Container, Document, Length, Metadata, Paragraph, StyleCatalog,
    StyleRegistry, Table, TableCell, TableRow, TextRun, VerticalAlignment,
};
pub use render::{JsonFormat, OutputFormat, RenderOptions, TableMode};
pub use resolve::{find_marker, find_markers, CellAddress, FoundMarker, MarkerLocation};
pub use splice::{
    splice, splice_batch, LeftoverCheck, Manifest, SpliceEngine, SpliceOptions, SpliceReport,
    TableBinding,
};
pub use synth::{synthesize, TableSynthesizer};

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Load a document from its JSON representation on disk.
///
/// # Example
///
/// ```no_run
/// use docsplice::load_document;
///
/// let doc = load_document("template.json").unwrap();
/// println!("Blocks: {}", doc.block_count());
/// ```
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<Document> {
    let path = path.as_ref();
    log::debug!("Loading document from {}", path.display());
    let json = std::fs::read_to_string(path)?;
    Document::from_json(&json)
}

/// Load a document without blocking the async runtime.
#[cfg(feature = "async")]
pub async fn load_document_async<P: AsRef<Path>>(path: P) -> Result<Document> {
    let json = tokio::fs::read_to_string(path.as_ref()).await?;
    Document::from_json(&json)
}

/// Write a document to disk as JSON.
pub fn save_document<P: AsRef<Path>>(doc: &Document, path: P, format: JsonFormat) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    format.write_to(doc, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Splice every table a manifest lists into a document file and write the
/// result to `output`.
///
/// # Example
///
/// ```no_run
/// use docsplice::splice_file;
///
/// let report = splice_file("template.json", "tables.json", "report.json").unwrap();
/// println!("Rows written: {}", report.total_rows());
/// ```
pub fn splice_file<P, M, O>(document: P, manifest: M, output: O) -> Result<SpliceReport>
where
    P: AsRef<Path>,
    M: AsRef<Path>,
    O: AsRef<Path>,
{
    let result = Docsplice::new()
        .with_manifest(Manifest::from_path(manifest)?)
        .splice(document)?;
    result.save(output, JsonFormat::Pretty)?;
    Ok(result.report)
}

/// Builder for loading, splicing and rendering a document.
///
/// # Example
///
/// ```no_run
/// use docsplice::{Docsplice, LeftoverCheck, TabularDataset};
///
/// let markdown = Docsplice::new()
///     .bind("<<T1>>", TabularDataset::from_rows(["A"], vec![vec!["1"]]))
///     .leftovers(LeftoverCheck::Deny)
///     .with_frontmatter()
///     .splice("template.json")?
///     .to_markdown()?;
/// # Ok::<(), docsplice::Error>(())
/// ```
pub struct Docsplice {
    manifest: Option<Manifest>,
    loaders: LoaderRegistry,
    bindings: Vec<TableBinding>,
    options: SpliceOptions,
    render_options: RenderOptions,
}

impl Docsplice {
    /// Create a new builder with the default loaders.
    pub fn new() -> Self {
        Self {
            manifest: None,
            loaders: LoaderRegistry::with_defaults(),
            bindings: Vec::new(),
            options: SpliceOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Take bindings from a manifest; its entries run before explicit bindings.
    pub fn with_manifest(mut self, manifest: Manifest) -> Self {
        self.manifest = Some(manifest);
        self
    }

    /// Replace the loader registry used for manifest sources.
    pub fn with_loaders(mut self, loaders: LoaderRegistry) -> Self {
        self.loaders = loaders;
        self
    }

    /// Bind a marker to a dataset with the default layout.
    pub fn bind(mut self, marker: impl Into<String>, dataset: TabularDataset) -> Self {
        self.bindings.push(TableBinding::new(marker, dataset));
        self
    }

    /// Add a fully configured binding.
    pub fn with_binding(mut self, binding: TableBinding) -> Self {
        self.bindings.push(binding);
        self
    }

    /// Set splice options.
    pub fn with_options(mut self, options: SpliceOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the leftover marker policy.
    pub fn leftovers(mut self, check: LeftoverCheck) -> Self {
        self.options = self.options.with_leftover_check(check);
        self
    }

    /// Enable frontmatter in Markdown output.
    pub fn with_frontmatter(mut self) -> Self {
        self.render_options = self.render_options.with_frontmatter(true);
        self
    }

    /// Set the table mode for Markdown output.
    pub fn with_table_mode(mut self, mode: TableMode) -> Self {
        self.render_options = self.render_options.with_table_mode(mode);
        self
    }

    /// Load a document from disk and splice it.
    pub fn splice<P: AsRef<Path>>(self, path: P) -> Result<SplicedDocument> {
        let document = load_document(path)?;
        self.splice_document(document)
    }

    /// Splice an in-memory document.
    pub fn splice_document(self, mut document: Document) -> Result<SplicedDocument> {
        let engine = self.engine()?;
        let report = engine.run(&mut document)?;
        document.metadata.touch();
        Ok(SplicedDocument {
            document,
            report,
            render_options: self.render_options,
        })
    }

    fn engine(&self) -> Result<SpliceEngine> {
        let mut bindings = match self.manifest {
            Some(ref manifest) => manifest.bindings(&self.loaders)?,
            None => Vec::new(),
        };
        bindings.extend(self.bindings.iter().cloned());
        Ok(SpliceEngine::new()
            .with_options(self.options.clone())
            .with_bindings(bindings))
    }
}

impl Default for Docsplice {
    fn default() -> Self {
        Self::new()
    }
}

/// A spliced document together with its report.
pub struct SplicedDocument {
    /// The spliced document
    pub document: Document,
    /// What the splice pass did
    pub report: SpliceReport,
    render_options: RenderOptions,
}

impl SplicedDocument {
    /// Convert to Markdown.
    pub fn to_markdown(&self) -> Result<String> {
        render::to_markdown(&self.document, &self.render_options)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.document)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Write the document to disk as JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P, format: JsonFormat) -> Result<()> {
        save_document(&self.document, path, format)
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}
