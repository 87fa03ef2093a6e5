//! Integration tests for marker splicing.

use docsplice::model::StyleRegistry;
use docsplice::splice::DEFAULT_MARKER_PATTERN;
use docsplice::{
    synthesize, Alignment, Block, ColumnLayout, Container, Document, Error, LeftoverCheck,
    Length, Paragraph, SpliceEngine, SpliceOptions, TabularDataset, Table, TableBinding,
    TableCell, TableRow, VerticalAlignment,
};

fn month_values() -> TabularDataset {
    TabularDataset::from_rows(
        ["Month", "Value"],
        vec![vec!["Jan", "10"], vec!["Feb", "20"]],
    )
}

fn cell_text(table: &Table, row: usize, col: usize) -> String {
    table.rows[row].cells[col].plain_text()
}

fn first_paragraph(cell: &TableCell) -> &Paragraph {
    cell.content[0]
        .as_paragraph()
        .expect("cell should start with a paragraph")
}

/// Body: "Intro", outer table whose single cell holds "<<T2>>", "<<T1>>".
fn nested_template() -> Document {
    let mut outer = Table::new();
    outer.add_row(TableRow::new(vec![
        TableCell::text("Label"),
        TableCell::text("<<T2>>"),
    ]));

    let mut doc = Document::new();
    doc.push(Paragraph::with_text("Intro"));
    doc.push(outer);
    doc.push(Paragraph::with_text("<<T1>>"));
    doc
}

#[test]
fn test_splice_top_level_marker() {
    let mut doc = Document::new();
    doc.push(Paragraph::with_text("Intro"));
    doc.push(Paragraph::with_text("<<T1>>"));
    doc.push(Paragraph::with_text("Outro"));

    let report = SpliceEngine::new()
        .bind("<<T1>>", month_values())
        .run(&mut doc)
        .unwrap();

    assert_eq!(report.table_count(), 1);
    assert_eq!(report.tables[0].depth, 0);
    assert_eq!(doc.block_count(), 3);
    assert_eq!(doc.blocks()[0].plain_text(), "Intro");
    assert_eq!(doc.blocks()[2].plain_text(), "Outro");

    let table = doc.blocks()[1].as_table().unwrap();
    assert_eq!(table.row_count(), 3);
    assert_eq!(cell_text(table, 0, 0), "Month");
    assert_eq!(cell_text(table, 0, 1), "Value");
    assert_eq!(cell_text(table, 1, 0), "Jan");
    assert_eq!(cell_text(table, 1, 1), "10");
    assert_eq!(cell_text(table, 2, 0), "Feb");
    assert_eq!(cell_text(table, 2, 1), "20");
    assert_eq!(table.style.as_deref(), Some("Table Grid"));
    assert!(!table.autofit);
}

#[test]
fn test_splice_marker_inside_table_cell() {
    let mut doc = nested_template();

    let report = SpliceEngine::new()
        .bind("<<T2>>", month_values())
        .run(&mut doc)
        .unwrap();

    assert_eq!(report.tables[0].depth, 1);
    let outer = doc.blocks()[1].as_table().unwrap();
    let cell = &outer.rows[0].cells[1];
    assert_eq!(cell.content.len(), 1);
    let inner = cell.content[0].as_table().unwrap();
    assert_eq!(inner.row_count(), 3);
    assert_eq!(cell_text(inner, 2, 0), "Feb");

    // Untouched siblings
    assert_eq!(outer.rows[0].cells[0].plain_text(), "Label");
    assert_eq!(doc.blocks()[2].plain_text(), "<<T1>>");
}

#[test]
fn test_splice_multiple_bindings_in_order() {
    let mut doc = nested_template();

    let report = SpliceEngine::new()
        .bind("<<T1>>", month_values())
        .bind(
            "<<T2>>",
            TabularDataset::from_rows(["K"], vec![vec!["a"], vec!["b"], vec!["c"]]),
        )
        .run(&mut doc)
        .unwrap();

    assert_eq!(report.table_count(), 2);
    assert_eq!(report.tables[0].marker, "<<T1>>");
    assert_eq!(report.tables[1].marker, "<<T2>>");
    assert_eq!(report.total_rows(), 5);
    assert!(!report.has_leftovers());
    assert!(doc.blocks()[2].is_table());
}

#[test]
fn test_missing_marker_is_an_error() {
    let mut doc = nested_template();
    let before = doc.clone();

    let result = SpliceEngine::new()
        .bind("<<T1>>", month_values())
        .bind("<<MISSING>>", month_values())
        .run(&mut doc);

    match result {
        Err(Error::MarkerNotFound(marker)) => assert_eq!(marker, "<<MISSING>>"),
        other => panic!("expected MarkerNotFound, got {:?}", other),
    }
    // Transactional by default: nothing committed
    assert_eq!(doc, before);
}

#[test]
fn test_non_transactional_keeps_earlier_tables() {
    let mut doc = nested_template();

    let result = SpliceEngine::new()
        .with_options(SpliceOptions::new().with_transactional(false))
        .bind("<<T1>>", month_values())
        .bind("<<MISSING>>", month_values())
        .run(&mut doc);

    assert!(matches!(result, Err(Error::MarkerNotFound(_))));
    assert!(doc.blocks()[2].is_table());
}

#[test]
fn test_second_splice_of_same_marker_fails() {
    let mut doc = nested_template();
    let engine = SpliceEngine::new().bind("<<T1>>", month_values());

    engine.run(&mut doc).unwrap();
    let err = engine.run(&mut doc).unwrap_err();
    assert!(matches!(err, Error::MarkerNotFound(ref m) if m == "<<T1>>"));
}

#[test]
fn test_marker_with_surrounding_whitespace() {
    let mut doc = Document::new();
    doc.push(Paragraph::with_text("  <<T1>>\t"));

    SpliceEngine::new()
        .bind("<<T1>>", month_values())
        .run(&mut doc)
        .unwrap();
    assert!(doc.blocks()[0].is_table());
}

#[test]
fn test_marker_as_substring_is_not_matched() {
    let mut doc = Document::new();
    doc.push(Paragraph::with_text("See <<T1>> below"));

    let err = SpliceEngine::new()
        .bind("<<T1>>", month_values())
        .run(&mut doc)
        .unwrap_err();
    assert!(matches!(err, Error::MarkerNotFound(_)));
}

#[test]
fn test_duplicate_markers_first_wins() {
    let mut doc = Document::new();
    doc.push(Paragraph::with_text("<<T1>>"));
    doc.push(Paragraph::with_text("<<T1>>"));

    let report = SpliceEngine::new()
        .bind("<<T1>>", month_values())
        .run(&mut doc)
        .unwrap();

    assert!(doc.blocks()[0].is_table());
    assert!(doc.blocks()[1].is_paragraph());
    assert_eq!(report.leftover_markers.len(), 1);
    assert_eq!(report.leftover_markers[0].location.index, 1);
}

#[test]
fn test_leftover_markers_denied() {
    let mut doc = nested_template();
    let before = doc.clone();

    let err = SpliceEngine::new()
        .with_options(SpliceOptions::new().with_leftover_check(LeftoverCheck::Deny))
        .bind("<<T1>>", month_values())
        .run(&mut doc)
        .unwrap_err();

    match err {
        Error::UnresolvedMarkers(markers) => assert_eq!(markers, vec!["<<T2>>".to_string()]),
        other => panic!("expected UnresolvedMarkers, got {:?}", other),
    }
    assert_eq!(doc, before);
}

#[test]
fn test_leftover_alternation_pattern_denied() {
    let mut doc = Document::new();
    doc.push(Paragraph::with_text("<<T1>>"));
    doc.push(Paragraph::with_text("<<LEFT>>"));
    let before = doc.clone();

    let err = SpliceEngine::new()
        .with_options(
            SpliceOptions::new()
                .with_leftover_check(LeftoverCheck::Deny)
                .with_marker_pattern("<<L|<<[A-Z]+>>"),
        )
        .bind("<<T1>>", month_values())
        .run(&mut doc)
        .unwrap_err();

    assert!(matches!(err, Error::UnresolvedMarkers(ref m) if m == &["<<LEFT>>"]));
    assert_eq!(doc, before);
}

#[test]
fn test_leftover_markers_ignored() {
    let mut doc = nested_template();

    let report = SpliceEngine::new()
        .with_options(SpliceOptions::new().with_leftover_check(LeftoverCheck::Ignore))
        .bind("<<T1>>", month_values())
        .run(&mut doc)
        .unwrap();
    assert!(!report.has_leftovers());
}

#[test]
fn test_column_alignment_policy() {
    for columns in [1usize, 4] {
        let labels: Vec<String> = (0..columns).map(|i| format!("C{}", i)).collect();
        let row: Vec<String> = (0..columns).map(|i| format!("v{}", i)).collect();
        let dataset = TabularDataset::from_rows(labels, vec![row]);

        let table = synthesize(
            &dataset,
            &ColumnLayout::default(),
            &StyleRegistry::standard(),
        );
        assert_eq!(table.column_count(), columns);

        for (col, header) in table.rows[0].cells.iter().enumerate() {
            let para = first_paragraph(header);
            assert!(para.is_bold(), "header {} should be bold", col);
            assert_eq!(para.alignment(), Alignment::Center);
            assert_eq!(header.vertical_alignment, VerticalAlignment::Center);
        }
        for (col, cell) in table.rows[1].cells.iter().enumerate() {
            let expected = if col == 0 {
                Alignment::Left
            } else {
                Alignment::Center
            };
            assert_eq!(first_paragraph(cell).alignment(), expected);
            assert!(!first_paragraph(cell).is_bold());
        }
    }
}

#[test]
fn test_column_widths() {
    let dataset = TabularDataset::from_rows(["A", "B", "C"], vec![vec!["1", "2", "3"]]);
    let table = synthesize(
        &dataset,
        &ColumnLayout::default(),
        &StyleRegistry::standard(),
    );

    for row in &table.rows {
        assert_eq!(row.cells[0].width, Some(Length::cm(8.0)));
        assert_eq!(row.cells[1].width, Some(Length::cm(2.5)));
        assert_eq!(row.cells[2].width, Some(Length::cm(2.5)));
    }
}

#[test]
fn test_short_row_is_padded() {
    let dataset = TabularDataset::from_rows(["Month", "Value"], vec![vec!["Mar"]]);
    let table = synthesize(
        &dataset,
        &ColumnLayout::default(),
        &StyleRegistry::standard(),
    );

    assert_eq!(table.rows[1].cells.len(), 2);
    assert_eq!(cell_text(&table, 1, 0), "Mar");
    assert_eq!(cell_text(&table, 1, 1), "");
}

#[test]
fn test_header_only_dataset() {
    let mut doc = Document::new();
    doc.push(Paragraph::with_text("<<EMPTY>>"));

    let report = SpliceEngine::new()
        .bind("<<EMPTY>>", TabularDataset::new(["Month", "Value"]))
        .run(&mut doc)
        .unwrap();

    let table = doc.blocks()[0].as_table().unwrap();
    assert_eq!(table.row_count(), 1);
    assert!(table.body().is_empty());
    assert_eq!(report.total_rows(), 0);
}

#[test]
fn test_unknown_style_degrades_to_none() {
    let mut doc = Document::new();
    doc.push(Paragraph::with_text("<<T1>>"));

    let layout = ColumnLayout::default().with_style("Fancy Grid");
    let report = SpliceEngine::new()
        .with_binding(TableBinding::new("<<T1>>", month_values()).with_layout(layout))
        .run(&mut doc)
        .unwrap();

    assert!(report.tables[0].style.is_none());
    assert!(doc.blocks()[0].as_table().unwrap().style.is_none());
}

#[test]
fn test_custom_pattern_for_leftovers() {
    let mut doc = Document::new();
    doc.push(Paragraph::with_text("{{TODO_TABLE}}"));
    doc.push(Paragraph::with_text("<<T1>>"));

    let report = SpliceEngine::new()
        .with_options(SpliceOptions::new().with_marker_pattern(r"\{\{[A-Z_]+\}\}"))
        .bind("<<T1>>", month_values())
        .run(&mut doc)
        .unwrap();

    assert_eq!(report.leftover_markers.len(), 1);
    assert_eq!(report.leftover_markers[0].text, "{{TODO_TABLE}}");
    assert_ne!(DEFAULT_MARKER_PATTERN, r"\{\{[A-Z_]+\}\}");
}

#[test]
fn test_spliced_table_is_a_moved_block() {
    let mut doc = Document::new();
    doc.push(Paragraph::with_text("<<T1>>"));

    SpliceEngine::new()
        .bind("<<T1>>", month_values())
        .run(&mut doc)
        .unwrap();

    let expected = synthesize(&month_values(), &ColumnLayout::default(), &doc.styles);
    assert_eq!(doc.blocks(), &[Block::Table(expected)]);
}
