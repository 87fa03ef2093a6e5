//! Markdown preview rendering.

use crate::error::Result;
use crate::model::{Alignment, Block, Document, Paragraph, Table, TableCell, TableRow, TextRun};

use super::{RenderOptions, TableMode};

/// Convert a document to Markdown.
pub fn to_markdown(doc: &Document, options: &RenderOptions) -> Result<String> {
    MarkdownRenderer::new(options.clone()).render(doc)
}

/// Markdown renderer.
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a document to Markdown.
    pub fn render(&self, doc: &Document) -> Result<String> {
        let mut output = String::new();

        if self.options.include_frontmatter {
            output.push_str(&doc.metadata.to_yaml_frontmatter());
        }

        for block in &doc.body.blocks {
            self.render_block(&mut output, block);
        }

        Ok(output.trim().to_string())
    }

    fn render_block(&self, output: &mut String, block: &Block) {
        match block {
            Block::Paragraph(p) => self.render_paragraph(output, p),
            Block::Table(t) => self.render_table(output, t),
        }
    }

    fn render_paragraph(&self, output: &mut String, para: &Paragraph) {
        if para.is_empty() {
            return;
        }

        if let Some(level) = para.style.name.as_deref().and_then(heading_level) {
            output.push_str(&"#".repeat(level));
            output.push(' ');
        }
        self.render_runs(output, &para.runs);
        output.push_str("\n\n");
    }

    fn render_runs(&self, output: &mut String, runs: &[TextRun]) {
        for run in runs {
            let text = if self.options.escape_special_chars {
                escape_markdown(&run.text)
            } else {
                run.text.clone()
            };

            // Emphasis markers must hug the text, so surrounding spaces stay outside.
            let trimmed = text.trim();
            if trimmed.is_empty() || !(run.style.bold || run.style.italic) {
                output.push_str(&text);
                continue;
            }
            let leading = &text[..text.len() - text.trim_start().len()];
            let trailing = &text[text.trim_end().len()..];
            let marker = match (run.style.bold, run.style.italic) {
                (true, true) => "***",
                (true, false) => "**",
                _ => "*",
            };
            output.push_str(leading);
            output.push_str(marker);
            output.push_str(trimmed);
            output.push_str(marker);
            output.push_str(trailing);
        }
    }

    fn render_table(&self, output: &mut String, table: &Table) {
        if table.is_empty() {
            return;
        }

        // Pipe tables cannot hold block content.
        if self.options.table_mode == TableMode::Html || table.has_nested_tables() {
            self.render_table_html(output, table);
            output.push('\n');
            return;
        }

        self.render_table_markdown(output, table);
    }

    fn render_table_markdown(&self, output: &mut String, table: &Table) {
        let col_count = table.column_count();
        if col_count == 0 {
            return;
        }

        let header_end = (table.header_rows as usize).max(1);
        for (i, row) in table.rows.iter().enumerate() {
            output.push('|');
            for col in 0..col_count {
                let content = row
                    .cells
                    .get(col)
                    .map(|cell| self.inline_cell(cell))
                    .unwrap_or_default();
                output.push_str(&format!(" {} |", content));
            }
            output.push('\n');

            if i + 1 == header_end {
                output.push('|');
                for col in 0..col_count {
                    output.push_str(separator(column_alignment(table, col)));
                }
                output.push('\n');
            }
        }

        output.push('\n');
    }

    fn inline_cell(&self, cell: &TableCell) -> String {
        let text = cell.plain_text().replace('\n', " ");
        let text = text.trim();
        if self.options.escape_special_chars {
            escape_markdown(text)
        } else {
            text.replace('|', "\\|")
        }
    }

    fn render_table_html(&self, output: &mut String, table: &Table) {
        output.push_str("<table>\n");

        if table.header_rows > 0 {
            output.push_str("<thead>\n");
            for row in table.header() {
                self.render_html_row(output, row, true);
            }
            output.push_str("</thead>\n");
        }

        output.push_str("<tbody>\n");
        for row in table.body() {
            self.render_html_row(output, row, false);
        }
        output.push_str("</tbody>\n");

        output.push_str("</table>\n");
    }

    fn render_html_row(&self, output: &mut String, row: &TableRow, is_header: bool) {
        let tag = if is_header { "th" } else { "td" };
        output.push_str("<tr>");

        for cell in &row.cells {
            match cell.alignment() {
                Some(Alignment::Center) => output.push_str(&format!("<{} align=\"center\">", tag)),
                Some(Alignment::Right) => output.push_str(&format!("<{} align=\"right\">", tag)),
                _ => output.push_str(&format!("<{}>", tag)),
            }
            self.render_html_cell(output, cell);
            output.push_str(&format!("</{}>", tag));
        }

        output.push_str("</tr>\n");
    }

    fn render_html_cell(&self, output: &mut String, cell: &TableCell) {
        let mut first = true;
        for block in &cell.content {
            match block {
                Block::Paragraph(p) => {
                    if p.is_empty() {
                        continue;
                    }
                    if !first {
                        output.push_str("<br>");
                    }
                    output.push_str(&escape_html(p.visible_text().trim()));
                }
                Block::Table(t) => {
                    output.push('\n');
                    self.render_table_html(output, t);
                }
            }
            first = false;
        }
    }
}

/// Alignment shown for a column: the first body cell that states one,
/// falling back to the header.
fn column_alignment(table: &Table, col: usize) -> Alignment {
    table
        .body()
        .iter()
        .chain(table.header())
        .filter_map(|row| row.cells.get(col))
        .find_map(TableCell::alignment)
        .unwrap_or_default()
}

fn separator(alignment: Alignment) -> &'static str {
    match alignment {
        Alignment::Left | Alignment::Justify => " --- |",
        Alignment::Center => " :---: |",
        Alignment::Right => " ---: |",
    }
}

/// `Heading N` style names map to Markdown heading levels 1-6.
fn heading_level(style: &str) -> Option<usize> {
    let level: usize = style.strip_prefix("Heading ")?.trim().parse().ok()?;
    (1..=6).contains(&level).then_some(level)
}

/// Escape characters that would be read as Markdown syntax.
fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '`' | '*' | '_' | '[' | ']' | '|' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
