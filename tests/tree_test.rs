//! Integration tests for the composition tree: propagation and child storage.

use std::sync::Arc;

use unidoc::model::{
    Block, Composition, Document, DocumentCase, DocumentItem, NodeKind, Paragraph, Parts, Table,
    TableCell, TableHeaderRow, TableRow, Title,
};
use unidoc::style::{Style, StyleCondition, TextStyle};
use unidoc::Error;

/// Document > case > [title, table > (header > cells, rows > cells), paragraph]
fn create_test_document() -> Document {
    let table = Table::from_rows(
        TableHeaderRow::from_strings(["Name", "Value"]),
        vec![
            TableRow::from_strings(["alpha", "1"]),
            TableRow::from_strings(["beta", "2"]),
        ],
    );
    let mut case = DocumentCase::named("Sheet1");
    case.add_parts([
        Block::from(Title::new("Title")),
        Block::from(table),
        Block::from(Paragraph::new("closing")),
    ])
    .unwrap();
    let mut doc = Document::new();
    doc.add_part(case).unwrap();
    doc
}

fn table_of(case: &DocumentCase) -> &Table {
    case.tables().next().expect("test document has a table")
}

fn bold() -> Arc<Style> {
    Arc::new(Style::text(TextStyle::new().bold()))
}

#[test]
fn test_spread_depth_zero_is_noop() {
    let mut doc = create_test_document();
    doc.spread_style_to_parts(&bold(), 0);

    let case = &doc.cases()[0];
    assert!(!case.has_style());
    assert!(case.parts().iter().all(|b| !b.has_style()));
}

#[test]
fn test_spread_is_bounded_by_depth() {
    let mut doc = create_test_document();
    let style = bold();
    doc.spread_style_to_parts(&style, 2);

    // The call site itself is never styled
    assert!(!doc.has_style());

    // Level 1 and 2 receive the style
    let case = &doc.cases()[0];
    assert!(case.style().is_some_and(|s| Arc::ptr_eq(s, &style)));
    assert!(case.parts().iter().all(|b| b.has_style()));

    // Level 3 and below are untouched
    let table = table_of(case);
    assert!(!table.header().unwrap().has_style());
    assert!(table.rows().iter().all(|r| !r.has_style()));
    assert!(table.rows()[0].parts().iter().all(|c| !c.has_style()));
}

#[test]
fn test_spread_unlimited_reaches_every_descendant() {
    let mut doc = create_test_document();
    let style = bold();
    doc.spread_style_to_parts(&style, -1);

    let case = &doc.cases()[0];
    let table = table_of(case);
    let header = table.header().unwrap();
    assert!(header.has_style());
    assert!(header.parts().iter().all(|c| c.has_style()));
    for row in table.rows() {
        assert!(row.has_style());
        assert!(row
            .parts()
            .iter()
            .all(|c| c.style().is_some_and(|s| Arc::ptr_eq(s, &style))));
    }
}

#[test]
fn test_spread_never_overrides_existing_style() {
    let mut doc = create_test_document();
    let own = Arc::new(Style::text(TextStyle::new().italic()));

    {
        let case = &mut doc.parts_mut()[0];
        if let Block::Table(table) = &mut case.parts_mut()[1] {
            table.parts_mut()[0].parts_mut()[1].set_style(Some(Arc::clone(&own)));
        }
        case.parts_mut()[2].set_style(Some(Arc::clone(&own)));
    }

    doc.spread_style_to_parts(&bold(), -1);

    let case = &doc.cases()[0];
    let cell = &table_of(case).rows()[0].parts()[1];
    assert!(Arc::ptr_eq(cell.style().unwrap(), &own));
    assert!(Arc::ptr_eq(case.parts()[2].style().unwrap(), &own));
    // Siblings of the pre-styled cell still receive the spread style
    assert!(table_of(case).rows()[0].parts()[0]
        .style()
        .is_some_and(|s| s.text_style().is_some_and(|t| t.bold)));
}

#[test]
fn test_spread_respects_condition_tag() {
    let mut doc = create_test_document();
    let cell_only = Arc::new(
        Style::text(TextStyle::new().with_font_size(8.0))
            .with_condition(StyleCondition::for_kind::<TableCell>()),
    );
    doc.spread_style_to_parts(&cell_only, -1);

    let case = &doc.cases()[0];
    assert!(!case.has_style());
    let table = table_of(case);
    assert!(!table.has_style());
    assert!(!table.header().unwrap().parts()[0].has_style());
    for row in table.rows() {
        // Rows are skipped but their cells are still reached
        assert!(!row.has_style());
        assert!(row.parts().iter().all(|c| c.has_style()));
    }
}

#[test]
fn test_add_after_sealed_parts_fails() {
    let mut row = TableRow::new();
    row.set_parts_sealed([TableCell::new(0, "a"), TableCell::new(1, "b")]);

    let err = row.add_part(TableCell::new(2, "c")).unwrap_err();
    assert!(matches!(
        err,
        Error::NotAppendable {
            kind: NodeKind::TableRow
        }
    ));
    assert_eq!(row.parts().len(), 2);

    let err = row.add_parts([TableCell::new(2, "c")]).unwrap_err();
    assert!(matches!(err, Error::NotAppendable { .. }));
    assert_eq!(row.parts().len(), 2);
}

#[test]
fn test_set_parts_from_boxed_slice_is_sealed() {
    let mut case = DocumentCase::new();
    let blocks: Box<[Block]> = vec![Block::from(Paragraph::new("only"))].into_boxed_slice();
    case.set_parts(blocks);

    assert!(case.add_part(Paragraph::new("more").into()).is_err());
    assert_eq!(case.parts().len(), 1);

    // Replacing with a Vec makes the store appendable again
    case.set_parts(vec![Block::from(Paragraph::new("first"))]);
    case.add_part(Paragraph::new("second").into()).unwrap();
    assert_eq!(case.parts().len(), 2);
}

#[test]
fn test_parts_store_states() {
    let appendable: Parts<u8> = vec![1, 2].into();
    let sealed: Parts<u8> = Parts::sealed([1, 2]);
    assert!(appendable.is_appendable());
    assert!(!sealed.is_appendable());
    assert_eq!(appendable.as_slice(), sealed.as_slice());
}

#[test]
fn test_style_mut_is_copy_on_write() {
    let shared = bold();
    let mut a = Paragraph::new("a").with_style(Arc::clone(&shared));
    let b = Paragraph::new("b").with_style(Arc::clone(&shared));

    if let Some(style) = a.style_mut() {
        style.value = Style::text(TextStyle::new().italic()).value;
    }

    assert!(a.style().unwrap().text_style().unwrap().italic);
    assert!(b.style().unwrap().text_style().unwrap().bold);
    assert!(Arc::ptr_eq(b.style().unwrap(), &shared));
}

#[test]
fn test_plain_text() {
    let doc = create_test_document();
    assert_eq!(doc.plain_text(), "Title\n\nalpha\t1\nbeta\t2\n\nclosing");
}
