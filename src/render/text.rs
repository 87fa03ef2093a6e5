//! Plain text rendering for documents.

use crate::error::Result;
use crate::model::Document;

/// Convert a document to plain text.
///
/// Blocks are separated by blank lines; table cells by tabs.
pub fn to_text(doc: &Document) -> Result<String> {
    Ok(doc.plain_text().trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Container, Paragraph, Table, TableRow};

    #[test]
    fn test_to_text() {
        let mut doc = Document::new();
        doc.push(Paragraph::with_text("Hello, world!"));
        let mut table = Table::new();
        table.add_row(TableRow::from_strings(["Jan", "10"]));
        doc.push(table);

        let result = to_text(&doc).unwrap();
        assert_eq!(result, "Hello, world!\n\nJan\t10");
    }
}
