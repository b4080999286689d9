//! Composition tree of abstract document elements.
//!
//! The tree is renderer-independent: every node may carry a shared style,
//! composite nodes own their children in order, and traversal goes through
//! the [`DocumentVisitor`](crate::render::DocumentVisitor) protocol.

mod document;
mod node;
mod parts;
mod picture;
mod table;
mod text;

pub use document::{Block, Document, DocumentCase, Metadata};
pub use node::{DocumentItem, NodeKind, NodeRef, NodeTag, NodeVariant, Scope};
pub use parts::{Composition, Parts};
pub use picture::{Picture, PictureFormat};
pub use table::{Table, TableCell, TableHeaderCell, TableHeaderRow, TableRow};
pub use text::{Footer, Heading, Paragraph, Separator, Title};
