//! Benchmarks for style resolution and rendering.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use unidoc::model::{
    Block, Composition, Document, DocumentCase, DocumentItem, Paragraph, Scope, Table, TableCell,
    TableHeaderRow, TableRow,
};
use unidoc::style::{Color, LayoutStyle, Style, StyleCondition, StyleService, TextStyle};
use unidoc::RenderOptions;

/// Creates a document with one table of the given size.
fn create_test_document(rows: usize, columns: usize) -> Document {
    let header = TableHeaderRow::from_strings((0..columns).map(|c| format!("col{}", c)));
    let rows = (0..rows)
        .map(|r| TableRow::from_strings((0..columns).map(|c| format!("{}", r * columns + c))))
        .collect();

    let mut case = DocumentCase::new();
    case.add_parts([
        Block::from(Paragraph::new("Benchmark table")),
        Block::from(Table::from_rows(header, rows)),
    ])
    .unwrap();
    let mut doc = Document::new();
    doc.add_part(case).unwrap();
    doc
}

fn create_style_service() -> StyleService {
    let mut styles = StyleService::new();
    styles.add_styles([
        Style::layout(LayoutStyle::new().with_background(Color::LIGHT_GRAY))
            .with_condition(StyleCondition::when(|row: &TableRow| row.parts().len() > 2)),
        Style::text(TextStyle::new().with_font_size(9.0))
            .with_condition(StyleCondition::for_kind::<TableCell>()),
        Style::text(TextStyle::new().bold())
            .with_condition(StyleCondition::when(|cell: &TableCell| cell.index() == 0)),
    ]);
    styles
}

/// Benchmark resolution of a single cell inside a styled row.
fn bench_extract_style(c: &mut Criterion) {
    let styles = create_style_service();
    let row = TableRow::from_strings(["a", "b", "c", "d"]);
    let row_scope = Scope::root(row.as_node());

    c.bench_function("extract_style_for_cell", |b| {
        b.iter(|| {
            let cell_scope = row_scope.child(row.parts()[0].as_node());
            styles.extract_style_for(black_box(&cell_scope))
        });
    });
}

/// Benchmark rendering at various table sizes.
fn bench_render(c: &mut Criterion) {
    let styles = create_style_service();
    let options = RenderOptions::default();
    let mut group = c.benchmark_group("render");

    for rows in [10, 100, 1000].iter() {
        let doc = create_test_document(*rows, 8);

        group.bench_function(format!("html_{}_rows", rows), |b| {
            b.iter(|| unidoc::render::render_html(black_box(&doc), &styles, &options));
        });
        group.bench_function(format!("text_{}_rows", rows), |b| {
            b.iter(|| unidoc::render::render_text(black_box(&doc), &styles, &options));
        });
    }

    group.finish();
}

/// Benchmark registry construction, including glue synthesis.
fn bench_service_creation(c: &mut Criterion) {
    c.bench_function("service_creation", |b| {
        b.iter(create_style_service);
    });
}

criterion_group!(
    benches,
    bench_extract_style,
    bench_render,
    bench_service_creation,
);
criterion_main!(benches);
