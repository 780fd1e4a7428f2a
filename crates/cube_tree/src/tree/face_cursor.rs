//! FaceCursor - tree cursor that only descends into the children on one facet.
//!
//! For an octree keyed by cube corners, fixing `Face(+X)` restricts every
//! split to the 4 children whose corner has `x = 1`:
//!
//! ```text
//!   face corners (+X):   1, 3, 5, 7
//!   first_child()        child at corner 1
//!   next_sibling()       1 -> 3 -> 5 -> 7 -> null
//! ```
//!
//! The same cursor over a quadtree takes a square `Edge` and visits 2 of the
//! 4 children.

use std::fmt;

use crate::topology::Facet;

use super::{Node, NodeId, Tree};

type FacetNode<T, F, const CHILDREN: usize> = Node<T, <F as Facet>::Corner, CHILDREN>;

/// Position in a [`Tree`] restricted to the children on `facet`, or null.
pub struct FaceCursor<'a, T, F: Facet, const CHILDREN: usize> {
  tree: &'a Tree<T, F::Corner, CHILDREN>,
  current: Option<NodeId>,
  facet: F,
}

impl<'a, T, F: Facet, const CHILDREN: usize> FaceCursor<'a, T, F, CHILDREN> {
  /// Cursor at `id`, descending through `facet`.
  pub fn new(tree: &'a Tree<T, F::Corner, CHILDREN>, id: NodeId, facet: F) -> Self {
    Self {
      tree,
      current: Some(id),
      facet,
    }
  }

  /// Null cursor over `tree`.
  pub fn null(tree: &'a Tree<T, F::Corner, CHILDREN>, facet: F) -> Self {
    Self {
      tree,
      current: None,
      facet,
    }
  }

  #[inline]
  fn at(self, current: Option<NodeId>) -> Self {
    Self { current, ..self }
  }

  #[inline]
  pub fn facet(&self) -> F {
    self.facet
  }

  #[inline]
  pub fn id(&self) -> Option<NodeId> {
    self.current
  }

  #[inline]
  pub fn valid(&self) -> bool {
    self.current.is_some()
  }

  #[inline]
  pub fn reset(&mut self) {
    self.current = None;
  }

  pub fn try_node(&self) -> Option<&'a FacetNode<T, F, CHILDREN>> {
    self.current.map(|id| self.tree.node(id))
  }

  /// Node under the cursor. Panics on a null cursor.
  pub fn node(&self) -> &'a FacetNode<T, F, CHILDREN> {
    match self.try_node() {
      Some(node) => node,
      None => panic!("dereferenced a null face cursor"),
    }
  }

  #[inline]
  pub fn value(&self) -> &'a T {
    self.node().value()
  }

  pub fn parent(self) -> Self {
    let parent = self.try_node().and_then(Node::parent);
    self.at(parent)
  }

  /// Child at the facet's first corner; null on a leaf or a null cursor.
  pub fn first_child(self) -> Self {
    let first = self.facet.corners()[0];
    let child = self.try_node().and_then(|node| node.try_child(first));
    self.at(child)
  }

  /// Parent's child at the next facet corner; null past the last one.
  ///
  /// A cursor on a node whose corner is not on the facet has no facet
  /// sibling and also steps to null.
  ///
  /// Panics when the cursor sits on the root.
  pub fn next_sibling(self) -> Self {
    let Some(node) = self.try_node() else {
      return self;
    };
    let Some(parent) = node.parent() else {
      panic!("next_sibling on root node {:?}", node.id());
    };
    let corners = self.facet.corners();
    let sibling = corners
      .iter()
      .position(|&corner| corner == node.corner())
      .and_then(|position| corners.get(position + 1))
      .and_then(|&corner| self.tree.try_child(parent, corner));
    self.at(sibling)
  }

  /// True on the facet's last corner, on a corner off the facet, or on a
  /// null cursor.
  pub fn is_last_sibling(&self) -> bool {
    let corners = self.facet.corners();
    self.try_node().map_or(true, |node| {
      match corners.iter().position(|&corner| corner == node.corner()) {
        Some(position) => position + 1 == corners.len(),
        None => true,
      }
    })
  }

  pub fn has_children(&self) -> bool {
    self.try_node().is_some_and(Node::has_children)
  }

  pub fn is_child_of(&self, other: &Self) -> bool {
    match (self.try_node(), other.current) {
      (Some(node), Some(parent)) => node.parent() == Some(parent),
      _ => false,
    }
  }
}

impl<T, F: Facet, const CHILDREN: usize> Clone for FaceCursor<'_, T, F, CHILDREN> {
  fn clone(&self) -> Self {
    *self
  }
}

impl<T, F: Facet, const CHILDREN: usize> Copy for FaceCursor<'_, T, F, CHILDREN> {}

impl<T, F: Facet, const CHILDREN: usize> PartialEq for FaceCursor<'_, T, F, CHILDREN> {
  fn eq(&self, other: &Self) -> bool {
    std::ptr::eq(self.tree, other.tree) && self.current == other.current
  }
}

impl<T, F: Facet, const CHILDREN: usize> Eq for FaceCursor<'_, T, F, CHILDREN> {}

impl<T, F: Facet, const CHILDREN: usize> fmt::Debug for FaceCursor<'_, T, F, CHILDREN> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("FaceCursor")
      .field("facet", &self.facet)
      .field("current", &self.current)
      .finish()
  }
}

#[cfg(test)]
#[path = "face_cursor_test.rs"]
mod face_cursor_test;
