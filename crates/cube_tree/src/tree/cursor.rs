//! TreeCursor - nullable position in a tree with parent/child/sibling moves.
//!
//! Moves return a new cursor instead of mutating, so a walk can keep the
//! positions it still needs:
//!
//! ```text
//!   cursor.first_child()          child at corner 0
//!   cursor.next_sibling()         parent's child at corner.index() + 1
//!   cursor.parent()               null at the root
//! ```
//!
//! A null cursor stays null under every move and reports
//! `is_last_sibling() == true`, so sibling loops terminate on it.

use std::fmt;

use crate::topology::CornerKey;

use super::{Node, NodeId, Tree};

/// Position in a [`Tree`], or null.
pub struct TreeCursor<'a, T, C, const CHILDREN: usize> {
  tree: &'a Tree<T, C, CHILDREN>,
  current: Option<NodeId>,
}

impl<'a, T, C: CornerKey, const CHILDREN: usize> TreeCursor<'a, T, C, CHILDREN> {
  /// Cursor at `id`.
  pub fn new(tree: &'a Tree<T, C, CHILDREN>, id: NodeId) -> Self {
    Self {
      tree,
      current: Some(id),
    }
  }

  /// Null cursor over `tree`.
  pub fn null(tree: &'a Tree<T, C, CHILDREN>) -> Self {
    Self {
      tree,
      current: None,
    }
  }

  #[inline]
  fn at(self, current: Option<NodeId>) -> Self {
    Self {
      tree: self.tree,
      current,
    }
  }

  #[inline]
  pub fn id(&self) -> Option<NodeId> {
    self.current
  }

  #[inline]
  pub fn valid(&self) -> bool {
    self.current.is_some()
  }

  /// Make this cursor null.
  #[inline]
  pub fn reset(&mut self) {
    self.current = None;
  }

  pub fn try_node(&self) -> Option<&'a Node<T, C, CHILDREN>> {
    self.current.map(|id| self.tree.node(id))
  }

  /// Node under the cursor. Panics on a null cursor.
  pub fn node(&self) -> &'a Node<T, C, CHILDREN> {
    match self.try_node() {
      Some(node) => node,
      None => panic!("dereferenced a null tree cursor"),
    }
  }

  /// Payload under the cursor. Panics on a null cursor.
  #[inline]
  pub fn value(&self) -> &'a T {
    self.node().value()
  }

  /// Parent position; null at the root or on a null cursor.
  pub fn parent(self) -> Self {
    let parent = self.try_node().and_then(Node::parent);
    self.at(parent)
  }

  /// Child at the first corner; null on a leaf or a null cursor.
  pub fn first_child(self) -> Self {
    let child = self.try_node().and_then(|node| node.children().first().copied());
    self.at(child)
  }

  /// Parent's child at the next corner; null past the last sibling.
  ///
  /// Panics when the cursor sits on the root.
  pub fn next_sibling(self) -> Self {
    let Some(node) = self.try_node() else {
      return self;
    };
    let Some(parent) = node.parent() else {
      panic!("next_sibling on root node {:?}", node.id());
    };
    let sibling = self
      .tree
      .children(parent)
      .get(node.corner().index() + 1)
      .copied();
    self.at(sibling)
  }

  /// True on the highest-indexed corner, or on a null cursor.
  pub fn is_last_sibling(&self) -> bool {
    self
      .try_node()
      .map_or(true, |node| node.corner() == C::last())
  }

  pub fn has_children(&self) -> bool {
    self.try_node().is_some_and(Node::has_children)
  }

  /// True when both cursors are valid and `other` holds this node's parent.
  pub fn is_child_of(&self, other: &Self) -> bool {
    match (self.try_node(), other.current) {
      (Some(node), Some(parent)) => node.parent() == Some(parent),
      _ => false,
    }
  }
}

impl<T, C, const CHILDREN: usize> Clone for TreeCursor<'_, T, C, CHILDREN> {
  fn clone(&self) -> Self {
    *self
  }
}

impl<T, C, const CHILDREN: usize> Copy for TreeCursor<'_, T, C, CHILDREN> {}

impl<T, C, const CHILDREN: usize> PartialEq for TreeCursor<'_, T, C, CHILDREN> {
  fn eq(&self, other: &Self) -> bool {
    std::ptr::eq(self.tree, other.tree) && self.current == other.current
  }
}

impl<T, C, const CHILDREN: usize> Eq for TreeCursor<'_, T, C, CHILDREN> {}

impl<T, C, const CHILDREN: usize> fmt::Debug for TreeCursor<'_, T, C, CHILDREN> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("TreeCursor").field(&self.current).finish()
  }
}

#[cfg(test)]
#[path = "cursor_test.rs"]
mod cursor_test;
