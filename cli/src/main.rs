//! docsplice CLI - splice data tables into document templates

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docsplice::model::Container;
use docsplice::splice::{LayoutConfig, DEFAULT_MARKER_PATTERN};
use docsplice::{
    find_marker, find_markers, load_document, render, ColumnLayout, Document, JsonFormat,
    LeftoverCheck, LoaderRegistry, Manifest, RenderOptions, SpliceEngine, SpliceOptions,
    TableBinding,
};
use regex::Regex;

type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "docsplice")]
#[command(version)]
#[command(about = "Replace marker paragraphs in documents with data tables", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replace marker paragraphs with tables built from datasets
    Splice {
        /// Input document (JSON)
        #[arg(value_name = "DOC")]
        input: PathBuf,

        /// Manifest binding markers to dataset sources
        #[arg(short, long, value_name = "FILE", env = "DOCSPLICE_MANIFEST")]
        manifest: Option<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Extra binding, e.g. "<<T1>>=data.csv"
        #[arg(short, long = "table", value_name = "MARKER=PATH")]
        tables: Vec<String>,

        /// First column width in centimetres
        #[arg(long, value_name = "CM")]
        first_width: Option<f32>,

        /// Width of the other columns in centimetres
        #[arg(long, value_name = "CM")]
        other_width: Option<f32>,

        /// Table style name
        #[arg(long, value_name = "NAME", conflicts_with = "no_style")]
        style: Option<String>,

        /// Insert tables without a style
        #[arg(long)]
        no_style: bool,

        /// Fail if marker-shaped paragraphs remain after splicing
        #[arg(long)]
        deny_leftovers: bool,

        /// Print the splice report as JSON to stderr
        #[arg(long)]
        report: bool,
    },

    /// Locate a marker paragraph
    Find {
        /// Input document (JSON)
        #[arg(value_name = "DOC")]
        input: PathBuf,

        /// Exact marker text
        #[arg(value_name = "MARKER")]
        marker: String,
    },

    /// List marker-shaped paragraphs
    Markers {
        /// Input document (JSON)
        #[arg(value_name = "DOC")]
        input: PathBuf,

        /// Pattern the whole paragraph text must match
        #[arg(long, default_value = DEFAULT_MARKER_PATTERN)]
        pattern: String,
    },

    /// Render a document preview
    Render {
        /// Input document (JSON)
        #[arg(value_name = "DOC")]
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "markdown")]
        format: Format,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Include YAML frontmatter
        #[arg(long)]
        frontmatter: bool,

        /// Table rendering mode
        #[arg(long, value_enum, default_value = "markdown")]
        table_mode: TableMode,
    },

    /// Show document information
    Info {
        /// Input document (JSON)
        #[arg(value_name = "DOC")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Format {
    Markdown,
    Text,
    Json,
}

impl From<Format> for render::OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Markdown => render::OutputFormat::Markdown,
            Format::Text => render::OutputFormat::Text,
            Format::Json => render::OutputFormat::Json,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum TableMode {
    /// Standard Markdown tables
    Markdown,
    /// HTML tables
    Html,
}

impl From<TableMode> for docsplice::TableMode {
    fn from(mode: TableMode) -> Self {
        match mode {
            TableMode::Markdown => docsplice::TableMode::Markdown,
            TableMode::Html => docsplice::TableMode::Html,
        }
    }
}

/// Layout flags shared by every binding of one run.
struct LayoutFlags {
    first_width: Option<f32>,
    other_width: Option<f32>,
    style: Option<String>,
    no_style: bool,
}

impl LayoutFlags {
    fn to_config(&self) -> LayoutConfig {
        let style = if self.no_style {
            Some(None)
        } else {
            self.style.clone().map(Some)
        };
        LayoutConfig {
            first_column_width_cm: self.first_width,
            other_column_width_cm: self.other_width,
            column_widths_cm: None,
            style,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Splice {
            input,
            manifest,
            output,
            tables,
            first_width,
            other_width,
            style,
            no_style,
            deny_leftovers,
            report,
        } => cmd_splice(
            &input,
            manifest.as_deref(),
            output.as_deref(),
            &tables,
            &LayoutFlags {
                first_width,
                other_width,
                style,
                no_style,
            },
            deny_leftovers,
            report,
        ),
        Commands::Find { input, marker } => cmd_find(&input, &marker),
        Commands::Markers { input, pattern } => cmd_markers(&input, &pattern),
        Commands::Render {
            input,
            format,
            output,
            frontmatter,
            table_mode,
        } => cmd_render(&input, format, output.as_deref(), frontmatter, table_mode),
        Commands::Info { input } => cmd_info(&input),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Split a `MARKER=PATH` argument at the last `=`.
fn parse_table_arg(arg: &str) -> CliResult<(String, PathBuf)> {
    match arg.rsplit_once('=') {
        Some((marker, path)) if !marker.trim().is_empty() && !path.is_empty() => {
            Ok((marker.trim().to_string(), PathBuf::from(path)))
        }
        _ => Err(format!("Invalid table binding '{}', expected MARKER=PATH", arg).into()),
    }
}

fn collect_bindings(
    manifest: Option<&Path>,
    tables: &[String],
    flags: &LayoutFlags,
    loaders: &LoaderRegistry,
) -> CliResult<Vec<TableBinding>> {
    let overrides = flags.to_config();
    overrides.validate("command line")?;
    let mut bindings = Vec::new();

    if let Some(path) = manifest {
        let mut manifest = Manifest::from_path(path)?;
        // Flags replace manifest defaults; per-table entries still win.
        manifest.defaults = merge(&manifest.defaults, &overrides);
        bindings.extend(manifest.bindings(loaders)?);
    }

    for arg in tables {
        let (marker, path) = parse_table_arg(arg)?;
        let dataset = loaders.load(&path)?;
        let layout = overrides.apply(ColumnLayout::default());
        bindings.push(TableBinding::new(marker, dataset).with_layout(layout));
    }

    Ok(bindings)
}

fn merge(base: &LayoutConfig, overrides: &LayoutConfig) -> LayoutConfig {
    LayoutConfig {
        first_column_width_cm: overrides
            .first_column_width_cm
            .or(base.first_column_width_cm),
        other_column_width_cm: overrides
            .other_column_width_cm
            .or(base.other_column_width_cm),
        column_widths_cm: overrides
            .column_widths_cm
            .clone()
            .or_else(|| base.column_widths_cm.clone()),
        style: overrides.style.clone().or_else(|| base.style.clone()),
    }
}

fn cmd_splice(
    input: &Path,
    manifest: Option<&Path>,
    output: Option<&Path>,
    tables: &[String],
    flags: &LayoutFlags,
    deny_leftovers: bool,
    print_report: bool,
) -> CliResult {
    if manifest.is_none() && tables.is_empty() {
        return Err("Nothing to splice: pass --manifest or at least one --table".into());
    }

    let pb = ProgressBar::new(4);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Loading document...");
    let mut doc = load_document(input)?;
    pb.inc(1);

    pb.set_message("Loading datasets...");
    let loaders = LoaderRegistry::with_defaults();
    let bindings = collect_bindings(manifest, tables, flags, &loaders)?;
    pb.inc(1);

    pb.set_message("Splicing tables...");
    let check = if deny_leftovers {
        LeftoverCheck::Deny
    } else {
        LeftoverCheck::Warn
    };
    let engine = SpliceEngine::new()
        .with_options(SpliceOptions::new().with_leftover_check(check))
        .with_bindings(bindings);
    let report = match engine.run(&mut doc) {
        Ok(report) => report,
        Err(e) => {
            pb.abandon_with_message("Splice failed");
            return Err(e.into());
        }
    };
    doc.metadata.touch();
    pb.inc(1);

    pb.set_message("Writing output...");
    let json = render::to_json(&doc, JsonFormat::Pretty)?;
    match output {
        Some(path) => fs::write(path, &json)?,
        None => println!("{}", json),
    }
    pb.inc(1);
    pb.finish_and_clear();

    eprintln!(
        "{} {} tables, {} rows",
        "Spliced".green().bold(),
        report.table_count(),
        report.total_rows()
    );
    for table in &report.tables {
        eprintln!(
            "  {} {} ({} x {})",
            "├─".dimmed(),
            table.marker,
            table.body_rows,
            table.columns
        );
    }
    for leftover in &report.leftover_markers {
        eprintln!(
            "  {} {} at {}",
            "Unresolved".yellow(),
            leftover.text,
            leftover.location
        );
    }
    if let Some(path) = output {
        eprintln!("{} {}", "Saved to".green(), path.display());
    }
    if print_report {
        eprintln!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

fn cmd_find(input: &Path, marker: &str) -> CliResult {
    let doc = load_document(input)?;
    match find_marker(&doc, marker) {
        Some(location) => {
            println!("{} {}", "Found".green(), location);
            Ok(())
        }
        None => Err(docsplice::Error::MarkerNotFound(marker.to_string()).into()),
    }
}

fn cmd_markers(input: &Path, pattern: &str) -> CliResult {
    let doc = load_document(input)?;
    let pattern = Regex::new(pattern)?;
    let found = find_markers(&doc, &pattern)?;

    if found.is_empty() {
        println!("{}", "No markers found".dimmed());
        return Ok(());
    }
    for marker in &found {
        println!("{}  {}", marker.text.cyan(), marker.location.to_string().dimmed());
    }
    println!("\n{} markers", found.len());
    Ok(())
}

fn cmd_render(
    input: &Path,
    format: Format,
    output: Option<&Path>,
    frontmatter: bool,
    table_mode: TableMode,
) -> CliResult {
    let doc = load_document(input)?;
    let options = RenderOptions::new()
        .with_frontmatter(frontmatter)
        .with_table_mode(table_mode.into());
    let content = render::render(&doc, format.into(), &options)?;

    if let Some(path) = output {
        fs::write(path, &content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }

    Ok(())
}

/// Block counts for the whole tree.
#[derive(Debug, Default, PartialEq)]
struct TreeStats {
    paragraphs: usize,
    tables: usize,
    nested_tables: usize,
    max_depth: usize,
}

fn tree_stats<C: Container>(root: &C) -> TreeStats {
    let mut stats = TreeStats::default();
    walk(root, 0, &mut stats);
    stats
}

fn walk<C: Container>(container: &C, depth: usize, stats: &mut TreeStats) {
    stats.max_depth = stats.max_depth.max(depth);
    for block in container.blocks() {
        if block.is_paragraph() {
            stats.paragraphs += 1;
        } else if let Some(table) = block.as_table() {
            stats.tables += 1;
            if depth > 0 {
                stats.nested_tables += 1;
            }
            for cell in table.rows.iter().flat_map(|row| &row.cells) {
                walk(cell, depth + 1, stats);
            }
        }
    }
}

fn cmd_info(input: &Path) -> CliResult {
    let doc: Document = load_document(input)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    if let Some(ref title) = doc.metadata.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(ref author) = doc.metadata.author {
        println!("{}: {}", "Author".bold(), author);
    }
    if let Some(ref subject) = doc.metadata.subject {
        println!("{}: {}", "Subject".bold(), subject);
    }
    if let Some(ref created) = doc.metadata.created {
        println!("{}: {}", "Created".bold(), created);
    }
    if let Some(ref modified) = doc.metadata.modified {
        println!("{}: {}", "Modified".bold(), modified);
    }
    println!(
        "{}: {}",
        "Styles".bold(),
        doc.styles.iter().collect::<Vec<_>>().join(", ")
    );

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let stats = tree_stats(&doc);
    let pattern = Regex::new(DEFAULT_MARKER_PATTERN)?;
    let markers = find_markers(&doc, &pattern)?.len();
    let text = doc.plain_text();

    println!("{}: {}", "Top-level blocks".bold(), doc.block_count());
    println!("{}: {}", "Paragraphs".bold(), stats.paragraphs);
    println!("{}: {}", "Tables".bold(), stats.tables);
    println!("{}: {}", "Nested tables".bold(), stats.nested_tables);
    println!("{}: {}", "Max nesting".bold(), stats.max_depth);
    println!("{}: {}", "Markers".bold(), markers);
    println!("{}: {}", "Words".bold(), text.split_whitespace().count());

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "docsplice".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Marker-based table splicing for structured documents");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsplice::{Length, Paragraph, Table, TableCell, TableRow};
    use std::io::Write;

    #[test]
    fn test_parse_table_arg() {
        let (marker, path) = parse_table_arg("<<T1>>=data/t1.csv").unwrap();
        assert_eq!(marker, "<<T1>>");
        assert_eq!(path, PathBuf::from("data/t1.csv"));

        assert!(parse_table_arg("<<T1>>").is_err());
        assert!(parse_table_arg("=x.csv").is_err());
        assert!(parse_table_arg("<<T1>>=").is_err());
    }

    #[test]
    fn test_flags_to_config() {
        let flags = LayoutFlags {
            first_width: Some(5.0),
            other_width: None,
            style: None,
            no_style: true,
        };
        let layout = flags.to_config().apply(ColumnLayout::default());
        assert_eq!(layout.first_column_width, Length::cm(5.0));
        assert_eq!(layout.other_column_width, Length::cm(2.5));
        assert!(layout.style.is_none());
    }

    #[test]
    fn test_merge_prefers_flags() {
        let base = LayoutConfig {
            first_column_width_cm: Some(6.0),
            other_column_width_cm: Some(3.0),
            column_widths_cm: None,
            style: Some(Some("Custom".into())),
        };
        let flags = LayoutConfig {
            first_column_width_cm: Some(4.0),
            ..LayoutConfig::default()
        };
        let merged = merge(&base, &flags);
        assert_eq!(merged.first_column_width_cm, Some(4.0));
        assert_eq!(merged.other_column_width_cm, Some(3.0));
        assert_eq!(merged.style, Some(Some("Custom".into())));
    }

    #[test]
    fn test_collect_bindings_from_table_args() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"columns": ["A", "B"], "rows": [["x", 1]]}}"#).unwrap();
        let arg = format!("<<T1>>={}", file.path().display());

        let flags = LayoutFlags {
            first_width: None,
            other_width: None,
            style: Some("Light List".into()),
            no_style: false,
        };
        let bindings =
            collect_bindings(None, &[arg], &flags, &LoaderRegistry::with_defaults()).unwrap();

        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings[0].marker, "<<T1>>");
        assert_eq!(bindings[0].dataset.row_count(), 1);
        assert_eq!(bindings[0].layout.style.as_deref(), Some("Light List"));
    }

    #[test]
    fn test_collect_bindings_rejects_bad_width_flag() {
        let flags = LayoutFlags {
            first_width: None,
            other_width: Some(-1.0),
            style: None,
            no_style: false,
        };
        let err = collect_bindings(None, &[], &flags, &LoaderRegistry::with_defaults())
            .unwrap_err();
        assert!(err.to_string().contains("command line"));
    }

    #[test]
    fn test_tree_stats() {
        let mut inner = Table::new();
        inner.add_row(TableRow::from_strings(["a"]));
        let mut cell = TableCell::text("<<T2>>");
        cell.push(inner);
        let mut outer = Table::new();
        outer.add_row(TableRow::new(vec![cell]));

        let mut doc = Document::new();
        doc.push(Paragraph::with_text("Intro"));
        doc.push(outer);

        let stats = tree_stats(&doc);
        assert_eq!(stats.tables, 2);
        assert_eq!(stats.nested_tables, 1);
        assert_eq!(stats.paragraphs, 3);
        assert_eq!(stats.max_depth, 2);
    }
}
