//! Style registry and resolver.
//!
//! The service keeps registered styles in order and answers "which style
//! applies to this node". Besides direct matches it synthesizes glue styles
//! that merge a row-level style with a cell-level style, so a cell inside a
//! styled row inherits the row's formatting while keeping its own overrides.

use std::sync::Arc;

use super::{merge, Style, StyleCondition, StyleValue};
use crate::model::{NodeKind, NodeRef, NodeTag, Scope};

/// Hook through which a renderer emits its representation of the styles
/// (e.g. a stylesheet header).
pub trait StyleSink {
    /// Error raised by the sink.
    type Error;

    /// Write the styles known to `styles`.
    fn write_styles(&mut self, styles: &StyleService) -> Result<(), Self::Error>;
}

/// A row style merged with a cell style.
#[derive(Debug, Clone)]
pub struct GlueStyle {
    style: Arc<Style>,
    row: StyleCondition,
    cell: StyleCondition,
}

impl GlueStyle {
    /// The merged style. Its condition is the cell style's condition.
    pub fn style(&self) -> &Arc<Style> {
        &self.style
    }

    /// Condition the enclosing row must satisfy.
    pub fn row_condition(&self) -> &StyleCondition {
        &self.row
    }

    /// Condition the cell itself must satisfy.
    pub fn cell_condition(&self) -> &StyleCondition {
        &self.cell
    }

    /// Check the cell condition on the scoped node and the row condition on
    /// its parent.
    pub fn matches(&self, scope: &Scope<'_>) -> bool {
        self.cell.matches(scope.node())
            && scope
                .parent_node()
                .is_some_and(|parent| self.row.matches(parent))
    }
}

/// Ordered registry of conditioned styles.
#[derive(Debug, Clone, Default)]
pub struct StyleService {
    styles: Vec<Arc<Style>>,
    glue: Vec<GlueStyle>,
}

impl StyleService {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one style.
    pub fn add_style(&mut self, style: impl Into<Arc<Style>>) {
        self.styles.push(style.into());
        self.rebuild_glue();
    }

    /// Register several styles, keeping their order.
    pub fn add_styles<I, S>(&mut self, styles: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<Style>>,
    {
        self.styles.extend(styles.into_iter().map(Into::into));
        self.rebuild_glue();
    }

    /// Registered styles in registration order.
    pub fn styles(&self) -> &[Arc<Style>] {
        &self.styles
    }

    /// Synthesized row/cell glue styles.
    pub fn glue_styles(&self) -> &[GlueStyle] {
        &self.glue
    }

    /// Number of registered styles.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Check if no style is registered.
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Resolve the style that applies to the node in `scope`.
    ///
    /// Registered styles are tried in order, then glue styles; the last one
    /// that matches wins. Without a match the node's own style is returned.
    pub fn extract_style_for(&self, scope: &Scope<'_>) -> Option<Arc<Style>> {
        let node = scope.node();
        let mut resolved = self.styles.iter().filter(|s| s.matches(node)).last();

        if is_cell(node.kind()) {
            if let Some(glue) = self.glue.iter().filter(|g| g.matches(scope)).last() {
                resolved = Some(&glue.style);
            }
        }

        match resolved {
            Some(style) => {
                log::trace!("resolved registered style for {}", node.kind());
                Some(Arc::clone(style))
            }
            None => node.style().cloned(),
        }
    }

    /// Resolve the style for a node without ancestor context.
    ///
    /// Glue styles never apply here because they need the enclosing row.
    pub fn extract_style_for_node(&self, node: NodeRef<'_>) -> Option<Arc<Style>> {
        self.extract_style_for(&Scope::root(node))
    }

    /// Let `sink` write its representation of the registered styles.
    pub fn write_styles<S: StyleSink + ?Sized>(&self, sink: &mut S) -> Result<(), S::Error> {
        sink.write_styles(self)
    }

    fn rebuild_glue(&mut self) {
        let mut glue = Vec::new();
        for row_style in &self.styles {
            let Some(row) = row_style.condition() else {
                continue;
            };
            let Some(cell_kind) = row.target().kind().and_then(cell_kind_of) else {
                continue;
            };
            for cell_style in &self.styles {
                let Some(cell) = cell_style.condition() else {
                    continue;
                };
                if cell.target() != NodeTag::Kind(cell_kind) {
                    continue;
                }

                let mut value = StyleValue::LayoutText(row_style.value.clone().into_layout_text());
                if let Err(err) = merge::join_with(&cell_style.value, &mut value) {
                    log::warn!("skipping row/cell glue: {}", err);
                    continue;
                }
                glue.push(GlueStyle {
                    style: Arc::new(Style {
                        condition: Some(cell.clone()),
                        value,
                    }),
                    row: row.clone(),
                    cell: cell.clone(),
                });
            }
        }
        log::debug!(
            "style service: {} registered, {} glue",
            self.styles.len(),
            glue.len()
        );
        self.glue = glue;
    }
}

fn cell_kind_of(row: NodeKind) -> Option<NodeKind> {
    match row {
        NodeKind::TableRow => Some(NodeKind::TableCell),
        NodeKind::TableHeaderRow => Some(NodeKind::TableHeaderCell),
        _ => None,
    }
}

fn is_cell(kind: NodeKind) -> bool {
    matches!(kind, NodeKind::TableCell | NodeKind::TableHeaderCell)
}
