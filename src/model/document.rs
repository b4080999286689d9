//! Document-level types.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::node::node_variant;
use super::{
    Composition, DocumentItem, Footer, Heading, NodeKind, NodeRef, Paragraph, Parts, Picture,
    Separator, Table, Title,
};
use crate::render::DocumentVisitor;
use crate::style::Style;

/// Root of the composition tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Document metadata (label, author, etc.)
    pub metadata: Metadata,

    cases: Parts<DocumentCase>,
    style: Option<Arc<Style>>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document with a label.
    pub fn with_label(label: impl Into<String>) -> Self {
        Self {
            metadata: Metadata {
                label: Some(label.into()),
                ..Default::default()
            },
            ..Self::default()
        }
    }

    /// Cases (pages or sheets) of the document.
    pub fn cases(&self) -> &[DocumentCase] {
        self.cases.as_slice()
    }

    /// Number of cases.
    pub fn case_count(&self) -> usize {
        self.cases.len()
    }

    /// Check if the document has no cases.
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Walk the tree with `visitor`, starting at the root.
    pub fn walk<V: DocumentVisitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        self.accept(visitor, None)
    }

    /// Plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.cases
            .iter()
            .map(|case| case.plain_text())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

node_variant!(composite Document);

impl Composition for Document {
    type Part = DocumentCase;

    fn parts_store(&self) -> &Parts<DocumentCase> {
        &self.cases
    }

    fn parts_store_mut(&mut self) -> &mut Parts<DocumentCase> {
        &mut self.cases
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    /// Document label (used as the title of the output)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Document author
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Free-form description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Creation date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
}

impl Metadata {
    /// Set the author and return self.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set the description and return self.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the creation date and return self.
    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }
}

/// A page or sheet boundary holding block items.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentCase {
    name: Option<String>,
    blocks: Parts<Block>,
    style: Option<Arc<Style>>,
}

impl DocumentCase {
    /// Create an empty case.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty named case (e.g. a sheet name).
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Case name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Tables in this case, in order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Table(t) => Some(t),
            _ => None,
        })
    }

    /// Plain text content of the case.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .filter_map(Block::plain_text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

node_variant!(composite DocumentCase);

impl Composition for DocumentCase {
    type Part = Block;

    fn parts_store(&self) -> &Parts<Block> {
        &self.blocks
    }

    fn parts_store_mut(&mut self) -> &mut Parts<Block> {
        &mut self.blocks
    }
}

/// A block item inside a case.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Document title
    Title(Title),
    /// Section heading
    Heading(Heading),
    /// Body paragraph
    Paragraph(Paragraph),
    /// Footer text
    Footer(Footer),
    /// Separator line
    Separator(Separator),
    /// Image
    Picture(Picture),
    /// Table
    Table(Table),
}

macro_rules! with_block {
    ($block:expr, $b:ident => $body:expr) => {
        match $block {
            Block::Title($b) => $body,
            Block::Heading($b) => $body,
            Block::Paragraph($b) => $body,
            Block::Footer($b) => $body,
            Block::Separator($b) => $body,
            Block::Picture($b) => $body,
            Block::Table($b) => $body,
        }
    };
}

impl Block {
    /// Check if this block is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, Block::Table(_))
    }

    /// Plain text of the block, if it carries any.
    pub fn plain_text(&self) -> Option<String> {
        match self {
            Block::Title(t) => Some(t.text().to_string()),
            Block::Heading(h) => Some(h.text().to_string()),
            Block::Paragraph(p) => Some(p.text().to_string()),
            Block::Footer(f) => Some(f.text().to_string()),
            Block::Table(t) => Some(
                t.rows()
                    .iter()
                    .map(|r| r.plain_text())
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            Block::Separator(_) | Block::Picture(_) => None,
        }
    }
}

impl DocumentItem for Block {
    fn kind(&self) -> NodeKind {
        with_block!(self, b => b.kind())
    }

    fn style_slot(&self) -> &Option<Arc<Style>> {
        with_block!(self, b => b.style_slot())
    }

    fn style_slot_mut(&mut self) -> &mut Option<Arc<Style>> {
        with_block!(self, b => b.style_slot_mut())
    }

    fn as_node(&self) -> NodeRef<'_> {
        with_block!(self, b => b.as_node())
    }

    fn spread_style(&mut self, style: &Arc<Style>, depth: i32) {
        with_block!(self, b => b.spread_style(style, depth))
    }
}

macro_rules! block_from {
    ($($ty:ident),*) => {
        $(
            impl From<$ty> for Block {
                fn from(item: $ty) -> Self {
                    Block::$ty(item)
                }
            }
        )*
    };
}

block_from!(Title, Heading, Paragraph, Footer, Separator, Picture, Table);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NodeTag, TableRow};
    use crate::style::TextStyle;

    #[test]
    fn test_document_new() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.case_count(), 0);
        assert!(doc.parts().is_empty());
    }

    #[test]
    fn test_block_delegates_identity() {
        let block: Block = Paragraph::new("Hi").into();
        assert_eq!(block.kind(), NodeKind::Paragraph);
        assert!(block.is_a(NodeTag::Text));
        assert!(matches!(block.as_node(), NodeRef::Paragraph(_)));
    }

    #[test]
    fn test_block_style_slot() {
        let mut block: Block = Title::new("T").into();
        assert!(!block.has_style());
        block.set_style(Some(Arc::new(Style::text(TextStyle::default()))));
        assert!(block.has_style());
    }

    #[test]
    fn test_plain_text() {
        let mut case = DocumentCase::named("Sheet1");
        case.add_part(Title::new("Report").into()).unwrap();
        let mut table = Table::new();
        table.add_part(TableRow::from_strings(["a", "b"])).unwrap();
        case.add_part(table.into()).unwrap();

        let mut doc = Document::with_label("Doc");
        doc.add_part(case).unwrap();

        assert_eq!(doc.plain_text(), "Report\n\na\tb");
        assert_eq!(doc.cases()[0].tables().count(), 1);
        assert_eq!(doc.cases()[0].name(), Some("Sheet1"));
    }

    #[test]
    fn test_metadata_builder() {
        let meta = Metadata::default()
            .with_author("Jane")
            .with_description("Quarterly");
        assert_eq!(meta.author.as_deref(), Some("Jane"));
        assert_eq!(meta.description.as_deref(), Some("Quarterly"));
        assert!(meta.created.is_none());
    }
}
