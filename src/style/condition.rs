//! Style applicability conditions.

use std::fmt;
use std::sync::Arc;

use crate::model::{NodeKind, NodeRef, NodeTag, NodeVariant};

type Predicate = Arc<dyn for<'a> Fn(NodeRef<'a>) -> bool + Send + Sync>;

/// A target tag paired with an optional predicate over candidate nodes.
///
/// Predicates must be side-effect free; they receive a shared view of the
/// node and nothing else.
#[derive(Clone)]
pub struct StyleCondition {
    target: NodeTag,
    predicate: Option<Predicate>,
}

impl StyleCondition {
    /// Match every node covered by `tag`.
    pub fn for_tag(tag: impl Into<NodeTag>) -> Self {
        Self {
            target: tag.into(),
            predicate: None,
        }
    }

    /// Match every node of type `N`.
    pub fn for_kind<N: NodeVariant>() -> Self {
        Self::for_tag(N::KIND)
    }

    /// Match nodes of type `N` for which `predicate` holds.
    ///
    /// ```
    /// use unidoc::model::TableCell;
    /// use unidoc::style::StyleCondition;
    ///
    /// let first_column = StyleCondition::when(|cell: &TableCell| cell.index() == 0);
    /// ```
    pub fn when<N, F>(predicate: F) -> Self
    where
        N: NodeVariant + 'static,
        F: Fn(&N) -> bool + Send + Sync + 'static,
    {
        let predicate: Predicate =
            Arc::new(move |node: NodeRef<'_>| N::from_node(node).is_some_and(&predicate));
        Self {
            target: NodeTag::Kind(N::KIND),
            predicate: Some(predicate),
        }
    }

    /// Match nodes covered by `tag` for which `predicate` holds.
    pub fn matching<F>(tag: impl Into<NodeTag>, predicate: F) -> Self
    where
        F: for<'a> Fn(NodeRef<'a>) -> bool + Send + Sync + 'static,
    {
        Self {
            target: tag.into(),
            predicate: Some(Arc::new(predicate)),
        }
    }

    /// Target tag.
    pub fn target(&self) -> NodeTag {
        self.target
    }

    /// Check if a predicate is set.
    pub fn has_predicate(&self) -> bool {
        self.predicate.is_some()
    }

    /// Check if nodes of `kind` are covered by the target tag.
    pub fn applies_to(&self, kind: NodeKind) -> bool {
        self.target.matches(kind)
    }

    /// Evaluate the predicate; true when none is set.
    pub fn test(&self, node: NodeRef<'_>) -> bool {
        self.predicate.as_ref().map_or(true, |p| p(node))
    }

    /// Check both the target tag and the predicate.
    pub fn matches(&self, node: NodeRef<'_>) -> bool {
        self.applies_to(node.kind()) && self.test(node)
    }

    /// Same target, inverted predicate.
    ///
    /// Negating a condition without a predicate yields one that never holds.
    pub fn negate(&self) -> Self {
        let predicate: Predicate = match &self.predicate {
            Some(p) => {
                let p = Arc::clone(p);
                Arc::new(move |node: NodeRef<'_>| !p(node))
            }
            None => Arc::new(|_: NodeRef<'_>| false),
        };
        Self {
            target: self.target,
            predicate: Some(predicate),
        }
    }
}

impl PartialEq for StyleCondition {
    fn eq(&self, other: &Self) -> bool {
        self.target == other.target
            && match (&self.predicate, &other.predicate) {
                (None, None) => true,
                (Some(a), Some(b)) => Arc::ptr_eq(a, b),
                _ => false,
            }
    }
}

impl fmt::Debug for StyleCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleCondition")
            .field("target", &self.target)
            .field("predicate", &self.predicate.as_ref().map(|_| ".."))
            .finish()
    }
}
