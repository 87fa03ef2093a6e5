//! Benchmarks for docsplice.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use docsplice::{
    find_marker, synthesize, ColumnLayout, Container, Document, Paragraph, SpliceEngine,
    StyleRegistry, TabularDataset, Table, TableCell, TableRow,
};

/// Build a dataset with the given number of rows and six columns.
fn create_dataset(rows: usize) -> TabularDataset {
    let columns = ["Site", "Jan", "Feb", "Mar", "Apr", "May"];
    let data: Vec<Vec<String>> = (0..rows)
        .map(|r| {
            std::iter::once(format!("Site {}", r))
                .chain((1..columns.len()).map(|c| (r * c).to_string()))
                .collect()
        })
        .collect();
    TabularDataset::from_rows(columns, data)
}

/// Build a document with `sections` paragraphs and tables, and the marker
/// buried in the last table's last cell.
fn create_document(sections: usize) -> Document {
    let mut doc = Document::new();
    for i in 0..sections {
        doc.push(Paragraph::with_text(format!("Section {}", i)));
        let mut table = Table::new();
        for r in 0..4 {
            table.add_row(TableRow::from_strings([format!("r{}", r), "x".to_string()]));
        }
        if i + 1 == sections {
            table.rows[3].cells[1] = TableCell::text("<<TARGET>>");
        }
        doc.push(table);
    }
    doc
}

/// Benchmark marker search through documents of various sizes.
fn bench_find_marker(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_marker");

    for sections in [10, 100, 1000].iter() {
        let doc = create_document(*sections);
        group.bench_function(format!("{}_sections", sections), |b| {
            b.iter(|| find_marker(black_box(&doc), "<<TARGET>>"));
        });
    }

    group.finish();
}

/// Benchmark table synthesis at various dataset sizes.
fn bench_synthesize(c: &mut Criterion) {
    let mut group = c.benchmark_group("synthesize");
    let layout = ColumnLayout::default();
    let styles = StyleRegistry::standard();

    for rows in [10, 100, 1000].iter() {
        let dataset = create_dataset(*rows);
        group.bench_function(format!("{}_rows", rows), |b| {
            b.iter(|| synthesize(black_box(&dataset), &layout, &styles));
        });
    }

    group.finish();
}

/// Benchmark a full transactional splice pass.
fn bench_splice(c: &mut Criterion) {
    let template = create_document(100);
    let engine = SpliceEngine::new().bind("<<TARGET>>", create_dataset(100));

    c.bench_function("splice_transactional", |b| {
        b.iter(|| {
            let mut doc = template.clone();
            engine.run(black_box(&mut doc)).is_ok()
        });
    });
}

criterion_group!(benches, bench_find_marker, bench_synthesize, bench_splice);
criterion_main!(benches);
