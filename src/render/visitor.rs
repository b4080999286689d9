//! Double-dispatch visitor protocol over the composition tree.
//!
//! Every node variant has one `visit_*` operation. [`NodeRef::accept`] picks
//! the operation matching the node's concrete type, so a renderer only
//! overrides the operations it cares about. Composite operations default to
//! visiting their children in order; leaf operations default to doing
//! nothing.
//!
//! # Example
//!
//! ```
//! use std::convert::Infallible;
//! use unidoc::model::{Composition, Document, DocumentCase, Paragraph, Scope};
//! use unidoc::render::DocumentVisitor;
//!
//! struct WordCounter(usize);
//!
//! impl DocumentVisitor for WordCounter {
//!     type Error = Infallible;
//!
//!     fn visit_paragraph(&mut self, para: &Paragraph, _scope: &Scope<'_>) -> Result<(), Infallible> {
//!         self.0 += para.text().split_whitespace().count();
//!         Ok(())
//!     }
//! }
//!
//! let mut case = DocumentCase::new();
//! case.add_part(Paragraph::new("two words").into()).unwrap();
//! let mut doc = Document::new();
//! doc.add_part(case).unwrap();
//!
//! let mut counter = WordCounter(0);
//! doc.walk(&mut counter).unwrap();
//! assert_eq!(counter.0, 2);
//! ```
//!
//! [`NodeRef::accept`]: crate::model::NodeRef::accept

use std::convert::Infallible;

use crate::model::{
    Composition, Document, DocumentCase, Footer, Heading, NodeKind, Paragraph, Picture, Scope,
    Separator, Table, TableCell, TableHeaderCell, TableHeaderRow, TableRow, Title,
};

/// One operation per concrete node variant.
///
/// `Error` is the renderer's own error type; traversal hands it back to the
/// caller unchanged.
pub trait DocumentVisitor {
    /// Error raised by the visitor.
    type Error;

    /// Visit the root. Visits the cases by default.
    fn visit_document(&mut self, document: &Document, scope: &Scope<'_>) -> Result<(), Self::Error> {
        document.visit_composition(self, scope)
    }

    /// Visit a case. Visits its blocks by default.
    fn visit_document_case(
        &mut self,
        case: &DocumentCase,
        scope: &Scope<'_>,
    ) -> Result<(), Self::Error> {
        case.visit_composition(self, scope)
    }

    fn visit_title(&mut self, title: &Title, scope: &Scope<'_>) -> Result<(), Self::Error> {
        let _ = (title, scope);
        Ok(())
    }

    fn visit_heading(&mut self, heading: &Heading, scope: &Scope<'_>) -> Result<(), Self::Error> {
        let _ = (heading, scope);
        Ok(())
    }

    fn visit_paragraph(&mut self, para: &Paragraph, scope: &Scope<'_>) -> Result<(), Self::Error> {
        let _ = (para, scope);
        Ok(())
    }

    fn visit_footer(&mut self, footer: &Footer, scope: &Scope<'_>) -> Result<(), Self::Error> {
        let _ = (footer, scope);
        Ok(())
    }

    fn visit_separator(
        &mut self,
        separator: &Separator,
        scope: &Scope<'_>,
    ) -> Result<(), Self::Error> {
        let _ = (separator, scope);
        Ok(())
    }

    fn visit_picture(&mut self, picture: &Picture, scope: &Scope<'_>) -> Result<(), Self::Error> {
        let _ = (picture, scope);
        Ok(())
    }

    /// Visit a table. Visits the header row, then the data rows, by default.
    fn visit_table(&mut self, table: &Table, scope: &Scope<'_>) -> Result<(), Self::Error> {
        table.visit_composition(self, scope)
    }

    /// Visit a header row. Visits its cells by default.
    fn visit_table_header_row(
        &mut self,
        row: &TableHeaderRow,
        scope: &Scope<'_>,
    ) -> Result<(), Self::Error> {
        row.visit_composition(self, scope)
    }

    fn visit_table_header_cell(
        &mut self,
        cell: &TableHeaderCell,
        scope: &Scope<'_>,
    ) -> Result<(), Self::Error> {
        let _ = (cell, scope);
        Ok(())
    }

    /// Visit a data row. Visits its cells by default.
    fn visit_table_row(&mut self, row: &TableRow, scope: &Scope<'_>) -> Result<(), Self::Error> {
        row.visit_composition(self, scope)
    }

    fn visit_table_cell(&mut self, cell: &TableCell, scope: &Scope<'_>) -> Result<(), Self::Error> {
        let _ = (cell, scope);
        Ok(())
    }
}

/// Walk `document` with `visitor`, starting at the root.
pub fn walk<V: DocumentVisitor + ?Sized>(
    document: &Document,
    visitor: &mut V,
) -> Result<(), V::Error> {
    document.walk(visitor)
}

/// Visitor that records the kind and depth of every node it sees.
#[derive(Debug, Clone, Default)]
pub struct RecordingVisitor {
    events: Vec<(NodeKind, usize)>,
}

impl RecordingVisitor {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Visited kinds in visit order.
    pub fn kinds(&self) -> Vec<NodeKind> {
        self.events.iter().map(|(kind, _)| *kind).collect()
    }

    /// Visited kinds with their depth below the root.
    pub fn events(&self) -> &[(NodeKind, usize)] {
        &self.events
    }

    /// Number of visited nodes of `kind`.
    pub fn count(&self, kind: NodeKind) -> usize {
        self.events.iter().filter(|(k, _)| *k == kind).count()
    }

    fn record(&mut self, scope: &Scope<'_>) {
        self.events.push((scope.kind(), scope.depth()));
    }
}

impl DocumentVisitor for RecordingVisitor {
    type Error = Infallible;

    fn visit_document(&mut self, document: &Document, scope: &Scope<'_>) -> Result<(), Infallible> {
        self.record(scope);
        document.visit_composition(self, scope)
    }

    fn visit_document_case(
        &mut self,
        case: &DocumentCase,
        scope: &Scope<'_>,
    ) -> Result<(), Infallible> {
        self.record(scope);
        case.visit_composition(self, scope)
    }

    fn visit_title(&mut self, _title: &Title, scope: &Scope<'_>) -> Result<(), Infallible> {
        self.record(scope);
        Ok(())
    }

    fn visit_heading(&mut self, _heading: &Heading, scope: &Scope<'_>) -> Result<(), Infallible> {
        self.record(scope);
        Ok(())
    }

    fn visit_paragraph(&mut self, _para: &Paragraph, scope: &Scope<'_>) -> Result<(), Infallible> {
        self.record(scope);
        Ok(())
    }

    fn visit_footer(&mut self, _footer: &Footer, scope: &Scope<'_>) -> Result<(), Infallible> {
        self.record(scope);
        Ok(())
    }

    fn visit_separator(
        &mut self,
        _separator: &Separator,
        scope: &Scope<'_>,
    ) -> Result<(), Infallible> {
        self.record(scope);
        Ok(())
    }

    fn visit_picture(&mut self, _picture: &Picture, scope: &Scope<'_>) -> Result<(), Infallible> {
        self.record(scope);
        Ok(())
    }

    fn visit_table(&mut self, table: &Table, scope: &Scope<'_>) -> Result<(), Infallible> {
        self.record(scope);
        table.visit_composition(self, scope)
    }

    fn visit_table_header_row(
        &mut self,
        row: &TableHeaderRow,
        scope: &Scope<'_>,
    ) -> Result<(), Infallible> {
        self.record(scope);
        row.visit_composition(self, scope)
    }

    fn visit_table_header_cell(
        &mut self,
        _cell: &TableHeaderCell,
        scope: &Scope<'_>,
    ) -> Result<(), Infallible> {
        self.record(scope);
        Ok(())
    }

    fn visit_table_row(&mut self, row: &TableRow, scope: &Scope<'_>) -> Result<(), Infallible> {
        self.record(scope);
        row.visit_composition(self, scope)
    }

    fn visit_table_cell(&mut self, _cell: &TableCell, scope: &Scope<'_>) -> Result<(), Infallible> {
        self.record(scope);
        Ok(())
    }
}
