//! Node identity, type tags and the borrowed traversal scope.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{
    Document, DocumentCase, Footer, Heading, Paragraph, Picture, Separator, Table, TableCell,
    TableHeaderCell, TableHeaderRow, TableRow, Title,
};
use crate::render::DocumentVisitor;
use crate::style::Style;

/// The closed set of concrete node variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Root of the tree
    Document,
    /// Page or sheet boundary
    DocumentCase,
    /// Document title
    Title,
    /// Section heading
    Heading,
    /// Body paragraph
    Paragraph,
    /// Footer text
    Footer,
    /// Horizontal separator
    Separator,
    /// Embedded image
    Picture,
    /// Table
    Table,
    /// Header row of a table
    TableHeaderRow,
    /// Cell of a header row
    TableHeaderCell,
    /// Data row of a table
    TableRow,
    /// Cell of a data row
    TableCell,
}

impl NodeKind {
    /// Every concrete variant, in traversal-friendly order.
    pub const ALL: [NodeKind; 13] = [
        NodeKind::Document,
        NodeKind::DocumentCase,
        NodeKind::Title,
        NodeKind::Heading,
        NodeKind::Paragraph,
        NodeKind::Footer,
        NodeKind::Separator,
        NodeKind::Picture,
        NodeKind::Table,
        NodeKind::TableHeaderRow,
        NodeKind::TableHeaderCell,
        NodeKind::TableRow,
        NodeKind::TableCell,
    ];

    /// Variant name.
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Document => "Document",
            NodeKind::DocumentCase => "DocumentCase",
            NodeKind::Title => "Title",
            NodeKind::Heading => "Heading",
            NodeKind::Paragraph => "Paragraph",
            NodeKind::Footer => "Footer",
            NodeKind::Separator => "Separator",
            NodeKind::Picture => "Picture",
            NodeKind::Table => "Table",
            NodeKind::TableHeaderRow => "TableHeaderRow",
            NodeKind::TableHeaderCell => "TableHeaderCell",
            NodeKind::TableRow => "TableRow",
            NodeKind::TableCell => "TableCell",
        }
    }

    /// Check if nodes of this kind own an ordered child sequence.
    pub fn is_composition(self) -> bool {
        matches!(
            self,
            NodeKind::Document
                | NodeKind::DocumentCase
                | NodeKind::Table
                | NodeKind::TableHeaderRow
                | NodeKind::TableRow
        )
    }

    /// Check if nodes of this kind carry text.
    pub fn is_text(self) -> bool {
        matches!(
            self,
            NodeKind::Title
                | NodeKind::Heading
                | NodeKind::Paragraph
                | NodeKind::Footer
                | NodeKind::TableHeaderCell
                | NodeKind::TableCell
        )
    }

    /// Check if nodes of this kind are data leaves (text or picture).
    pub fn is_data(self) -> bool {
        self.is_text() || self == NodeKind::Picture
    }

    /// Check if this kind is a member of the variant named by `tag`.
    pub fn is_a(self, tag: NodeTag) -> bool {
        tag.matches(self)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Target of a style condition.
///
/// Abstract tags match every concrete kind below them; a concrete tag matches
/// only its own kind. Header cells and data cells are siblings, so neither
/// tag matches the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeTag {
    /// Any node
    Any,
    /// Any composite node
    Composition,
    /// Any data leaf (text or picture)
    Data,
    /// Any text leaf
    Text,
    /// Exactly one concrete kind
    Kind(NodeKind),
}

impl NodeTag {
    /// Covariant membership check.
    pub fn matches(self, kind: NodeKind) -> bool {
        match self {
            NodeTag::Any => true,
            NodeTag::Composition => kind.is_composition(),
            NodeTag::Data => kind.is_data(),
            NodeTag::Text => kind.is_text(),
            NodeTag::Kind(k) => k == kind,
        }
    }

    /// The concrete kind, if this tag names exactly one.
    pub fn kind(self) -> Option<NodeKind> {
        match self {
            NodeTag::Kind(k) => Some(k),
            _ => None,
        }
    }
}

impl From<NodeKind> for NodeTag {
    fn from(kind: NodeKind) -> Self {
        NodeTag::Kind(kind)
    }
}

impl fmt::Display for NodeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeTag::Any => f.write_str("*"),
            NodeTag::Composition => f.write_str("Composition"),
            NodeTag::Data => f.write_str("Data"),
            NodeTag::Text => f.write_str("Text"),
            NodeTag::Kind(k) => write!(f, "{}", k),
        }
    }
}

/// A borrowed view of any node in the tree.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Document(&'a Document),
    DocumentCase(&'a DocumentCase),
    Title(&'a Title),
    Heading(&'a Heading),
    Paragraph(&'a Paragraph),
    Footer(&'a Footer),
    Separator(&'a Separator),
    Picture(&'a Picture),
    Table(&'a Table),
    TableHeaderRow(&'a TableHeaderRow),
    TableHeaderCell(&'a TableHeaderCell),
    TableRow(&'a TableRow),
    TableCell(&'a TableCell),
}

macro_rules! with_node {
    ($node:expr, $n:ident => $body:expr) => {
        match $node {
            NodeRef::Document($n) => $body,
            NodeRef::DocumentCase($n) => $body,
            NodeRef::Title($n) => $body,
            NodeRef::Heading($n) => $body,
            NodeRef::Paragraph($n) => $body,
            NodeRef::Footer($n) => $body,
            NodeRef::Separator($n) => $body,
            NodeRef::Picture($n) => $body,
            NodeRef::Table($n) => $body,
            NodeRef::TableHeaderRow($n) => $body,
            NodeRef::TableHeaderCell($n) => $body,
            NodeRef::TableRow($n) => $body,
            NodeRef::TableCell($n) => $body,
        }
    };
}

impl<'a> NodeRef<'a> {
    /// Concrete kind of the referenced node.
    pub fn kind(self) -> NodeKind {
        with_node!(self, n => n.kind())
    }

    /// Style attached directly to the node.
    pub fn style(self) -> Option<&'a Arc<Style>> {
        with_node!(self, n => n.style())
    }

    /// Check if the node is a member of the variant named by `tag`.
    pub fn is_a(self, tag: NodeTag) -> bool {
        tag.matches(self.kind())
    }

    /// Text content for text leaves.
    pub fn text(self) -> Option<&'a str> {
        match self {
            NodeRef::Title(n) => Some(n.text()),
            NodeRef::Heading(n) => Some(n.text()),
            NodeRef::Paragraph(n) => Some(n.text()),
            NodeRef::Footer(n) => Some(n.text()),
            NodeRef::TableHeaderCell(n) => Some(n.text()),
            NodeRef::TableCell(n) => Some(n.text()),
            _ => None,
        }
    }

    /// Dispatch to the visitor operation matching this node's variant.
    pub fn accept<V: DocumentVisitor + ?Sized>(
        self,
        visitor: &mut V,
        scope: &Scope<'_>,
    ) -> Result<(), V::Error> {
        match self {
            NodeRef::Document(n) => visitor.visit_document(n, scope),
            NodeRef::DocumentCase(n) => visitor.visit_document_case(n, scope),
            NodeRef::Title(n) => visitor.visit_title(n, scope),
            NodeRef::Heading(n) => visitor.visit_heading(n, scope),
            NodeRef::Paragraph(n) => visitor.visit_paragraph(n, scope),
            NodeRef::Footer(n) => visitor.visit_footer(n, scope),
            NodeRef::Separator(n) => visitor.visit_separator(n, scope),
            NodeRef::Picture(n) => visitor.visit_picture(n, scope),
            NodeRef::Table(n) => visitor.visit_table(n, scope),
            NodeRef::TableHeaderRow(n) => visitor.visit_table_header_row(n, scope),
            NodeRef::TableHeaderCell(n) => visitor.visit_table_header_cell(n, scope),
            NodeRef::TableRow(n) => visitor.visit_table_row(n, scope),
            NodeRef::TableCell(n) => visitor.visit_table_cell(n, scope),
        }
    }
}

/// A node together with the chain of its ancestors.
///
/// Scopes are built on the stack while the tree is walked, so the parent
/// relation is a borrow and never keeps a node alive.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    node: NodeRef<'a>,
    parent: Option<&'a Scope<'a>>,
    depth: usize,
}

impl<'a> Scope<'a> {
    /// Create a scope for `node` below `parent`.
    pub fn new(node: NodeRef<'a>, parent: Option<&'a Scope<'a>>) -> Self {
        Self {
            node,
            parent,
            depth: parent.map_or(0, |p| p.depth + 1),
        }
    }

    /// Create a root scope.
    pub fn root(node: NodeRef<'a>) -> Self {
        Self::new(node, None)
    }

    /// Create a scope for a child of this scope's node.
    pub fn child(&'a self, node: NodeRef<'a>) -> Scope<'a> {
        Scope::new(node, Some(self))
    }

    /// The node in scope.
    pub fn node(&self) -> NodeRef<'a> {
        self.node
    }

    /// Kind of the node in scope.
    pub fn kind(&self) -> NodeKind {
        self.node.kind()
    }

    /// The enclosing scope.
    pub fn parent(&self) -> Option<&'a Scope<'a>> {
        self.parent
    }

    /// The parent node.
    pub fn parent_node(&self) -> Option<NodeRef<'a>> {
        self.parent.map(|p| p.node)
    }

    /// Distance from the root (root = 0).
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Ancestor nodes, nearest first.
    pub fn ancestors(&self) -> impl Iterator<Item = NodeRef<'a>> {
        std::iter::successors(self.parent, |s| s.parent).map(|s| s.node)
    }

    /// Nearest ancestor matching `tag`.
    pub fn nearest(&self, tag: NodeTag) -> Option<NodeRef<'a>> {
        self.ancestors().find(|n| n.is_a(tag))
    }
}

/// Common behaviour of every node in the composition tree.
pub trait DocumentItem {
    /// Concrete kind of this node.
    fn kind(&self) -> NodeKind;

    /// Storage slot of the attached style.
    fn style_slot(&self) -> &Option<Arc<Style>>;

    /// Mutable storage slot of the attached style.
    fn style_slot_mut(&mut self) -> &mut Option<Arc<Style>>;

    /// Borrowed tagged view of this node.
    fn as_node(&self) -> NodeRef<'_>;

    /// Push `style` into unstyled descendants. Leaves have none.
    fn spread_style(&mut self, style: &Arc<Style>, depth: i32) {
        let _ = (style, depth);
    }

    /// Style attached to this node.
    fn style(&self) -> Option<&Arc<Style>> {
        self.style_slot().as_ref()
    }

    /// Attach a style, replacing any previous one.
    fn set_style(&mut self, style: Option<Arc<Style>>) {
        *self.style_slot_mut() = style;
    }

    /// Mutable access to the attached style.
    ///
    /// A style shared with other nodes is cloned first, so edits stay local.
    fn style_mut(&mut self) -> Option<&mut Style> {
        self.style_slot_mut().as_mut().map(Arc::make_mut)
    }

    /// Check if a style is attached.
    fn has_style(&self) -> bool {
        self.style_slot().is_some()
    }

    /// Check if this node is a member of the variant named by `tag`.
    fn is_a(&self, tag: NodeTag) -> bool {
        tag.matches(self.kind())
    }

    /// Builder form of [`DocumentItem::set_style`].
    fn with_style(mut self, style: impl Into<Arc<Style>>) -> Self
    where
        Self: Sized,
    {
        self.set_style(Some(style.into()));
        self
    }

    /// Dispatch this node to `visitor` below `parent`.
    fn accept<V: DocumentVisitor + ?Sized>(
        &self,
        visitor: &mut V,
        parent: Option<&Scope<'_>>,
    ) -> Result<(), V::Error>
    where
        Self: Sized,
    {
        let node = self.as_node();
        let scope = Scope::new(node, parent);
        node.accept(visitor, &scope)
    }
}

/// A concrete node type with a statically known kind.
pub trait NodeVariant: DocumentItem {
    /// Kind of every node of this type.
    const KIND: NodeKind;

    /// Downcast a tagged view to this type.
    fn from_node<'a>(node: NodeRef<'a>) -> Option<&'a Self>;
}

/// Implement [`DocumentItem`] and [`NodeVariant`] for a node struct with a
/// `style` field.
macro_rules! node_variant {
    ($ty:ident) => {
        node_variant!(@variant $ty);

        impl $crate::model::DocumentItem for $ty {
            fn kind(&self) -> $crate::model::NodeKind {
                $crate::model::NodeKind::$ty
            }

            fn style_slot(&self) -> &Option<std::sync::Arc<$crate::style::Style>> {
                &self.style
            }

            fn style_slot_mut(&mut self) -> &mut Option<std::sync::Arc<$crate::style::Style>> {
                &mut self.style
            }

            fn as_node(&self) -> $crate::model::NodeRef<'_> {
                $crate::model::NodeRef::$ty(self)
            }
        }
    };
    (composite $ty:ident) => {
        node_variant!(@variant $ty);

        impl $crate::model::DocumentItem for $ty {
            fn kind(&self) -> $crate::model::NodeKind {
                $crate::model::NodeKind::$ty
            }

            fn style_slot(&self) -> &Option<std::sync::Arc<$crate::style::Style>> {
                &self.style
            }

            fn style_slot_mut(&mut self) -> &mut Option<std::sync::Arc<$crate::style::Style>> {
                &mut self.style
            }

            fn as_node(&self) -> $crate::model::NodeRef<'_> {
                $crate::model::NodeRef::$ty(self)
            }

            fn spread_style(&mut self, style: &std::sync::Arc<$crate::style::Style>, depth: i32) {
                $crate::model::Composition::spread_style_to_parts(self, style, depth);
            }
        }
    };
    (@variant $ty:ident) => {
        impl $crate::model::NodeVariant for $ty {
            const KIND: $crate::model::NodeKind = $crate::model::NodeKind::$ty;

            fn from_node<'a>(node: $crate::model::NodeRef<'a>) -> Option<&'a Self> {
                match node {
                    $crate::model::NodeRef::$ty(n) => Some(n),
                    _ => None,
                }
            }
        }
    };
}

pub(crate) use node_variant;
