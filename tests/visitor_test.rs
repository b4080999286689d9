//! Integration tests for the visitor protocol.

use std::fmt;

use unidoc::model::{
    Block, Composition, Document, DocumentCase, DocumentItem, Heading, NodeKind, Paragraph,
    Picture, Scope, Separator, Table, TableCell, TableHeaderRow, TableRow, Title,
};
use unidoc::render::{walk, DocumentVisitor, RecordingVisitor};
use unidoc::style::BorderStyle;

fn create_table_document() -> Document {
    let table = Table::from_rows(
        TableHeaderRow::from_strings(["Name", "Value"]),
        vec![
            TableRow::from_strings(["alpha", "1"]),
            TableRow::from_strings(["beta", "2"]),
        ],
    );
    let mut case = DocumentCase::new();
    case.add_part(table.into()).unwrap();
    let mut doc = Document::new();
    doc.add_part(case).unwrap();
    doc
}

#[test]
fn test_traversal_order() {
    let doc = create_table_document();
    let mut recorder = RecordingVisitor::new();
    walk(&doc, &mut recorder).unwrap();

    use NodeKind::*;
    assert_eq!(
        recorder.kinds(),
        vec![
            Document,
            DocumentCase,
            Table,
            TableHeaderRow,
            TableHeaderCell,
            TableHeaderCell,
            TableRow,
            TableCell,
            TableCell,
            TableRow,
            TableCell,
            TableCell,
        ]
    );
}

#[test]
fn test_traversal_depths() {
    let doc = create_table_document();
    let mut recorder = RecordingVisitor::new();
    doc.walk(&mut recorder).unwrap();

    let depths: Vec<usize> = recorder.events().iter().map(|(_, d)| *d).collect();
    assert_eq!(depths, vec![0, 1, 2, 3, 4, 4, 3, 4, 4, 3, 4, 4]);
}

#[test]
fn test_every_variant_dispatches_to_its_operation() {
    let mut case = DocumentCase::new();
    case.add_parts([
        Block::from(Title::new("T")),
        Block::from(Heading::new("H", 1)),
        Block::from(Paragraph::new("P")),
        Block::from(Separator::new(BorderStyle::Thin)),
        Block::from(Picture::new(vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A])),
        Block::from(unidoc::model::Footer::new("F")),
    ])
    .unwrap();
    let mut doc = Document::new();
    doc.add_part(case).unwrap();

    let mut recorder = RecordingVisitor::new();
    doc.walk(&mut recorder).unwrap();

    assert_eq!(
        recorder.kinds(),
        vec![
            NodeKind::Document,
            NodeKind::DocumentCase,
            NodeKind::Title,
            NodeKind::Heading,
            NodeKind::Paragraph,
            NodeKind::Separator,
            NodeKind::Picture,
            NodeKind::Footer,
        ]
    );
}

#[test]
fn test_accept_on_subtree() {
    let row = TableRow::from_strings(["a", "b", "c"]);
    let mut recorder = RecordingVisitor::new();
    row.accept(&mut recorder, None).unwrap();

    assert_eq!(recorder.count(NodeKind::TableRow), 1);
    assert_eq!(recorder.count(NodeKind::TableCell), 3);
    assert_eq!(recorder.events()[0], (NodeKind::TableRow, 0));
}

/// Error type unknown to the library.
#[derive(Debug, PartialEq)]
struct CellRejected {
    row_cells: usize,
    text: String,
}

impl fmt::Display for CellRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rejected cell {:?}", self.text)
    }
}

/// Visitor that fails on the first empty cell and sees the enclosing row.
#[derive(Default)]
struct RejectEmptyCells {
    seen: Vec<String>,
}

impl DocumentVisitor for RejectEmptyCells {
    type Error = CellRejected;

    fn visit_table_cell(&mut self, cell: &TableCell, scope: &Scope<'_>) -> Result<(), CellRejected> {
        if cell.is_empty() {
            let row_cells = scope
                .parent_node()
                .and_then(|n| match n {
                    unidoc::model::NodeRef::TableRow(row) => Some(row.parts().len()),
                    _ => None,
                })
                .unwrap_or(0);
            return Err(CellRejected {
                row_cells,
                text: cell.text().to_string(),
            });
        }
        self.seen.push(cell.text().to_string());
        Ok(())
    }
}

#[test]
fn test_visitor_error_propagates_unchanged() {
    let table = Table::from_rows(
        TableHeaderRow::from_strings(["k", "v"]),
        vec![
            TableRow::from_strings(["a", "1"]),
            TableRow::from_strings(["b", ""]),
            TableRow::from_strings(["c", "3"]),
        ],
    );
    let mut case = DocumentCase::new();
    case.add_part(table.into()).unwrap();
    let mut doc = Document::new();
    doc.add_part(case).unwrap();

    let mut visitor = RejectEmptyCells::default();
    let err = walk(&doc, &mut visitor).unwrap_err();

    assert_eq!(
        err,
        CellRejected {
            row_cells: 2,
            text: String::new(),
        }
    );
    // Traversal stopped at the failing cell
    assert_eq!(visitor.seen, vec!["a", "1", "b"]);
}

#[test]
fn test_default_operations_reach_leaves() {
    struct CellCounter(usize);

    impl DocumentVisitor for CellCounter {
        type Error = std::convert::Infallible;

        fn visit_table_cell(
            &mut self,
            _cell: &TableCell,
            _scope: &Scope<'_>,
        ) -> Result<(), Self::Error> {
            self.0 += 1;
            Ok(())
        }
    }

    let doc = create_table_document();
    let mut counter = CellCounter(0);
    doc.walk(&mut counter).unwrap();
    // Header cells go to a different operation
    assert_eq!(counter.0, 4);
}
