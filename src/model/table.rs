//! Table types.

use std::sync::Arc;

use super::node::node_variant;
use super::parts::spread_into;
use super::{Composition, DocumentItem, Parts, Scope};
use crate::render::DocumentVisitor;
use crate::style::Style;

/// A table with an optional header row followed by data rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    label: Option<String>,
    header: Option<TableHeaderRow>,
    rows: Parts<TableRow>,
    style: Option<Arc<Style>>,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table from a header and data rows.
    pub fn from_rows(header: TableHeaderRow, rows: Vec<TableRow>) -> Self {
        Self {
            header: Some(header),
            rows: rows.into(),
            ..Self::default()
        }
    }

    /// Set the caption and return self.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the header row and return self.
    pub fn with_header(mut self, header: TableHeaderRow) -> Self {
        self.header = Some(header);
        self
    }

    /// Table caption.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Header row.
    pub fn header(&self) -> Option<&TableHeaderRow> {
        self.header.as_ref()
    }

    /// Mutable header row.
    pub fn header_mut(&mut self) -> Option<&mut TableHeaderRow> {
        self.header.as_mut()
    }

    /// Replace the header row.
    pub fn set_header(&mut self, header: Option<TableHeaderRow>) {
        self.header = header;
    }

    /// Data rows.
    pub fn rows(&self) -> &[TableRow] {
        self.rows.as_slice()
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns, from the header or else the first row.
    pub fn column_count(&self) -> usize {
        self.header
            .as_ref()
            .map(|h| h.parts().len())
            .or_else(|| self.rows.as_slice().first().map(|r| r.parts().len()))
            .unwrap_or(0)
    }

    /// Check if the table has neither header nor rows.
    pub fn is_empty(&self) -> bool {
        self.header.is_none() && self.rows.is_empty()
    }

    /// Column index of the header cell carrying `alias`.
    pub fn column_index(&self, alias: &str) -> Option<usize> {
        self.header
            .as_ref()?
            .parts()
            .iter()
            .find(|c| c.alias() == Some(alias))
            .map(|c| c.index())
    }
}

node_variant!(composite Table);

impl Composition for Table {
    type Part = TableRow;

    fn parts_store(&self) -> &Parts<TableRow> {
        &self.rows
    }

    fn parts_store_mut(&mut self) -> &mut Parts<TableRow> {
        &mut self.rows
    }

    fn spread_style_to_parts(&mut self, style: &Arc<Style>, depth: i32) {
        if depth == 0 {
            return;
        }
        let next = if depth < 0 { -1 } else { depth - 1 };
        if let Some(header) = self.header.as_mut() {
            spread_into(header, style, next);
        }
        for row in self.rows.as_mut_slice() {
            spread_into(row, style, next);
        }
    }

    fn visit_composition<V: DocumentVisitor + ?Sized>(
        &self,
        visitor: &mut V,
        scope: &Scope<'_>,
    ) -> Result<(), V::Error> {
        if let Some(header) = &self.header {
            header.accept(visitor, Some(scope))?;
        }
        for row in self.rows.iter() {
            row.accept(visitor, Some(scope))?;
        }
        Ok(())
    }
}

/// Header row of a table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableHeaderRow {
    cells: Parts<TableHeaderCell>,
    style: Option<Arc<Style>>,
}

impl TableHeaderRow {
    /// Create an empty header row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a header row from text values, indexing cells by position.
    pub fn from_strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self {
            cells: values
                .into_iter()
                .enumerate()
                .map(|(i, v)| TableHeaderCell::new(i, v))
                .collect(),
            style: None,
        }
    }
}

node_variant!(composite TableHeaderRow);

impl Composition for TableHeaderRow {
    type Part = TableHeaderCell;

    fn parts_store(&self) -> &Parts<TableHeaderCell> {
        &self.cells
    }

    fn parts_store_mut(&mut self) -> &mut Parts<TableHeaderCell> {
        &mut self.cells
    }
}

/// Cell of a header row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableHeaderCell {
    index: usize,
    text: String,
    alias: Option<String>,
    style: Option<Arc<Style>>,
}

impl TableHeaderCell {
    /// Create a header cell at column `index`.
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
            alias: None,
            style: None,
        }
    }

    /// Set the external column identifier and return self.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Column index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Cell text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// External column identifier.
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }
}

node_variant!(TableHeaderCell);

/// Data row of a table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableRow {
    cells: Parts<TableCell>,
    style: Option<Arc<Style>>,
}

impl TableRow {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a row from text values, indexing cells by position.
    pub fn from_strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self {
            cells: values
                .into_iter()
                .enumerate()
                .map(|(i, v)| TableCell::new(i, v))
                .collect(),
            style: None,
        }
    }

    /// Plain text of the row, tab separated.
    pub fn plain_text(&self) -> String {
        self.cells
            .iter()
            .map(|c| c.text())
            .collect::<Vec<_>>()
            .join("\t")
    }
}

node_variant!(composite TableRow);

impl Composition for TableRow {
    type Part = TableCell;

    fn parts_store(&self) -> &Parts<TableCell> {
        &self.cells
    }

    fn parts_store_mut(&mut self) -> &mut Parts<TableCell> {
        &mut self.cells
    }
}

/// Cell of a data row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableCell {
    index: usize,
    text: String,
    style: Option<Arc<Style>>,
}

impl TableCell {
    /// Create a cell at column `index`.
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
            style: None,
        }
    }

    /// Column index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Cell text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Check if the cell holds only whitespace.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

node_variant!(TableCell);
