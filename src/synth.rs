//! Table synthesis from datasets.

use crate::data::TabularDataset;
use crate::format::{ColumnFormatter, ColumnLayout};
use crate::model::{
    Alignment, Block, Paragraph, StyleCatalog, Table, TableCell, TableRow, TextRun,
};

/// Builds detached [`Table`]s from datasets.
#[derive(Debug, Clone, Default)]
pub struct TableSynthesizer {
    formatter: ColumnFormatter,
}

impl TableSynthesizer {
    /// Create a synthesizer with the default formatter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a synthesizer using a custom formatter.
    pub fn with_formatter(formatter: ColumnFormatter) -> Self {
        Self { formatter }
    }

    /// The formatter used for headers and cells.
    pub fn formatter(&self) -> &ColumnFormatter {
        &self.formatter
    }

    /// Build a table: one bold, centered header row followed by one body
    /// row per dataset row, in dataset order.
    ///
    /// The layout's style is applied only when `styles` knows it; otherwise
    /// the table carries no style.
    pub fn synthesize(
        &self,
        dataset: &TabularDataset,
        layout: &ColumnLayout,
        styles: &dyn StyleCatalog,
    ) -> Table {
        let mut table = Table::with_header(1);
        table.autofit = false;
        table.alignment = Alignment::Left;
        table.style = resolve_style(layout, styles);

        let header = dataset
            .columns()
            .iter()
            .enumerate()
            .map(|(col, label)| {
                let text = self.formatter.format_header(label);
                let mut paragraph = Paragraph::new().align(Alignment::Center);
                paragraph.add_run(TextRun::bold(text));
                self.cell(paragraph, col, layout)
            })
            .collect();
        table.add_row(TableRow::header(header));

        for row in dataset.rows() {
            let cells = row
                .iter()
                .enumerate()
                .map(|(col, value)| {
                    let text = self.formatter.format_cell(value);
                    let paragraph = Paragraph::with_text(text).align(layout.alignment_for(col));
                    self.cell(paragraph, col, layout)
                })
                .collect();
            table.add_row(TableRow::new(cells));
        }

        log::debug!(
            "Synthesized table: {} columns, {} body rows, style {:?}",
            dataset.column_count(),
            dataset.row_count(),
            table.style
        );
        table
    }

    fn cell(&self, paragraph: Paragraph, col: usize, layout: &ColumnLayout) -> TableCell {
        TableCell::with_content(vec![Block::Paragraph(paragraph)])
            .width(layout.width_for(col))
            .valign(layout.vertical_alignment())
    }
}

/// Build a table with the default formatter.
pub fn synthesize(
    dataset: &TabularDataset,
    layout: &ColumnLayout,
    styles: &dyn StyleCatalog,
) -> Table {
    TableSynthesizer::new().synthesize(dataset, layout, styles)
}

fn resolve_style(layout: &ColumnLayout, styles: &dyn StyleCatalog) -> Option<String> {
    let name = layout.style.as_deref()?;
    if styles.style_exists(name) {
        Some(name.to_string())
    } else {
        log::debug!("Style '{}' not defined by the document; using default", name);
        None
    }
}
