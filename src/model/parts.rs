//! Child storage for composite nodes.

use std::sync::Arc;

use super::{DocumentItem, Scope};
use crate::error::{Error, Result};
use crate::render::DocumentVisitor;
use crate::style::Style;

/// Ordered child sequence of a composite node.
///
/// A fresh store is an empty `Vec`, which allocates nothing until the first
/// append. A sealed store holds a fixed sequence and rejects appends.
#[derive(Debug, Clone, PartialEq)]
pub enum Parts<C> {
    /// Growable sequence
    Appendable(Vec<C>),
    /// Fixed sequence, typically materialized from a lazy source
    Sealed(Box<[C]>),
}

impl<C> Parts<C> {
    /// Create an empty appendable store.
    pub fn new() -> Self {
        Parts::Appendable(Vec::new())
    }

    /// Materialize `items` into a sealed, non-appendable store.
    pub fn sealed<I: IntoIterator<Item = C>>(items: I) -> Self {
        Parts::Sealed(items.into_iter().collect())
    }

    /// Check if parts can be appended.
    pub fn is_appendable(&self) -> bool {
        matches!(self, Parts::Appendable(_))
    }

    /// Children in insertion order.
    pub fn as_slice(&self) -> &[C] {
        match self {
            Parts::Appendable(v) => v,
            Parts::Sealed(b) => b,
        }
    }

    /// Mutable children in insertion order.
    pub fn as_mut_slice(&mut self) -> &mut [C] {
        match self {
            Parts::Appendable(v) => v,
            Parts::Sealed(b) => b,
        }
    }

    /// Number of children.
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Check if there are no children.
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// Iterate over the children.
    pub fn iter(&self) -> std::slice::Iter<'_, C> {
        self.as_slice().iter()
    }

    /// Append one child, handing it back when the store is sealed.
    pub fn push(&mut self, item: C) -> std::result::Result<(), C> {
        match self {
            Parts::Appendable(v) => {
                v.push(item);
                Ok(())
            }
            Parts::Sealed(_) => Err(item),
        }
    }
}

impl<C> Default for Parts<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> From<Vec<C>> for Parts<C> {
    fn from(items: Vec<C>) -> Self {
        Parts::Appendable(items)
    }
}

impl<C, const N: usize> From<[C; N]> for Parts<C> {
    fn from(items: [C; N]) -> Self {
        Parts::Appendable(Vec::from(items))
    }
}

impl<C> From<Box<[C]>> for Parts<C> {
    fn from(items: Box<[C]>) -> Self {
        Parts::Sealed(items)
    }
}

impl<C> FromIterator<C> for Parts<C> {
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
        Parts::Appendable(iter.into_iter().collect())
    }
}

impl<'a, C> IntoIterator for &'a Parts<C> {
    type Item = &'a C;
    type IntoIter = std::slice::Iter<'a, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A node that owns an ordered sequence of child nodes.
pub trait Composition: DocumentItem {
    /// Type of the children.
    type Part: DocumentItem;

    /// Child storage.
    fn parts_store(&self) -> &Parts<Self::Part>;

    /// Mutable child storage.
    fn parts_store_mut(&mut self) -> &mut Parts<Self::Part>;

    /// Children in insertion order.
    fn parts(&self) -> &[Self::Part] {
        self.parts_store().as_slice()
    }

    /// Mutable children in insertion order.
    fn parts_mut(&mut self) -> &mut [Self::Part] {
        self.parts_store_mut().as_mut_slice()
    }

    /// Replace the children wholesale.
    ///
    /// A `Vec` (or array) keeps the store appendable; a boxed slice or
    /// [`Parts::sealed`] makes it fixed.
    fn set_parts(&mut self, parts: impl Into<Parts<Self::Part>>)
    where
        Self: Sized,
    {
        *self.parts_store_mut() = parts.into();
    }

    /// Replace the children with a fixed sequence drawn from `parts`.
    fn set_parts_sealed<I>(&mut self, parts: I)
    where
        I: IntoIterator<Item = Self::Part>,
        Self: Sized,
    {
        *self.parts_store_mut() = Parts::sealed(parts);
    }

    /// Append one child.
    ///
    /// Fails with [`Error::NotAppendable`] when the children were sealed.
    fn add_part(&mut self, part: Self::Part) -> Result<()> {
        let kind = self.kind();
        self.parts_store_mut()
            .push(part)
            .map_err(|_| Error::NotAppendable { kind })
    }

    /// Append several children.
    ///
    /// Nothing is appended when the children were sealed.
    fn add_parts<I>(&mut self, parts: I) -> Result<()>
    where
        I: IntoIterator<Item = Self::Part>,
        Self: Sized,
    {
        let kind = self.kind();
        match self.parts_store_mut() {
            Parts::Appendable(v) => {
                v.extend(parts);
                Ok(())
            }
            Parts::Sealed(_) => Err(Error::NotAppendable { kind }),
        }
    }

    /// Push a shared style down into unstyled descendants.
    ///
    /// `depth` of `-1` is unlimited; a positive depth counts levels below this
    /// node; `0` does nothing. A child receives the style only when it has
    /// none and its kind matches the style's condition target.
    fn spread_style_to_parts(&mut self, style: &Arc<Style>, depth: i32) {
        if depth == 0 {
            return;
        }
        let next = if depth < 0 { -1 } else { depth - 1 };
        for part in self.parts_mut() {
            spread_into(part, style, next);
        }
    }

    /// Dispatch every child to `visitor`, in order.
    fn visit_composition<V: DocumentVisitor + ?Sized>(
        &self,
        visitor: &mut V,
        scope: &Scope<'_>,
    ) -> std::result::Result<(), V::Error>
    where
        Self: Sized,
    {
        for part in self.parts() {
            part.accept(visitor, Some(scope))?;
        }
        Ok(())
    }
}

/// Assign `style` to `item` if eligible, then recurse with `next`.
pub(crate) fn spread_into<T: DocumentItem + ?Sized>(item: &mut T, style: &Arc<Style>, next: i32) {
    if !item.has_style() && style.applies_to(item.kind()) {
        log::trace!("spreading style onto {}", item.kind());
        item.set_style(Some(Arc::clone(style)));
    }
    item.spread_style(style, next);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parts_default_is_empty_and_appendable() {
        let parts: Parts<u32> = Parts::default();
        assert!(parts.is_empty());
        assert!(parts.is_appendable());
    }

    #[test]
    fn test_sealed_rejects_push() {
        let mut parts = Parts::sealed((1..=3).map(|i| i * 10));
        assert_eq!(parts.as_slice(), &[10, 20, 30]);
        assert_eq!(parts.push(40), Err(40));
        assert_eq!(parts.len(), 3);
    }

    #[test]
    fn test_from_conversions() {
        let appendable: Parts<u8> = vec![1, 2].into();
        assert!(appendable.is_appendable());

        let boxed: Box<[u8]> = vec![1, 2].into_boxed_slice();
        let sealed: Parts<u8> = boxed.into();
        assert!(!sealed.is_appendable());
    }
}
