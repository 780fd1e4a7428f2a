//! Tree - arena-backed subdivision tree keyed by corner.
//!
//! Every node lives in one slot of the owning [`Tree`]. A split node owns the
//! `CHILDREN` slots listed in its child array; `parent` and `root` are plain
//! [`NodeId`] back-references and never own anything.
//!
//! # Node States
//!
//! ```text
//!            split()
//!   leaf ─────────────► internal      children: [NodeId; CHILDREN]
//!        ◄─────────────               (one per corner, topology order)
//!            join()
//! ```
//!
//! Both transitions are idempotent. `join()` tears the subtree down with an
//! explicit work-list, so stack usage does not grow with tree depth.
//!
//! # Handles
//!
//! [`NodeId`] carries a slot generation. Releasing a slot bumps it, so a
//! handle to a joined node is rejected by [`Tree::get`] even after the slot
//! has been reused. It also carries the id of the tree that issued it, so a
//! handle passed to a different tree is rejected the same way.

use std::ops::{Index, IndexMut};
use std::sync::atomic::{AtomicU32, Ordering};

use crate::metrics::TreeMetrics;
use crate::topology::{cube, square, CornerKey, Facet};

use super::{FaceCursor, TreeCursor};

/// Quadtree over the unit square: 4 children per split.
pub type QuadTree<T> = Tree<T, square::Corner, 4>;

/// Octree over the unit cube: 8 children per split.
pub type Octree<T> = Tree<T, cube::Corner, 8>;

/// Source of per-tree ids. Every [`Tree::new`] takes the next one.
static NEXT_TREE_ID: AtomicU32 = AtomicU32::new(0);

/// Generational handle to a node of one [`Tree`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeId {
  tree: u32,
  slot: u32,
  generation: u32,
}

impl NodeId {
  /// Arena slot this handle refers to.
  #[inline]
  pub fn slot(self) -> usize {
    self.slot as usize
  }
}

/// A tree node: payload plus structural links.
#[derive(Debug)]
pub struct Node<T, C, const CHILDREN: usize> {
  id: NodeId,
  root: NodeId,
  parent: Option<NodeId>,
  value: T,
  level: usize,
  corner: C,
  children: Option<[NodeId; CHILDREN]>,
}

impl<T, C: CornerKey, const CHILDREN: usize> Node<T, C, CHILDREN> {
  #[inline]
  pub fn id(&self) -> NodeId {
    self.id
  }

  #[inline]
  pub fn value(&self) -> &T {
    &self.value
  }

  #[inline]
  pub fn value_mut(&mut self) -> &mut T {
    &mut self.value
  }

  /// Depth below the root (root = 0).
  #[inline]
  pub fn level(&self) -> usize {
    self.level
  }

  /// Slot among the siblings. The root carries the first corner.
  #[inline]
  pub fn corner(&self) -> C {
    self.corner
  }

  /// Parent handle, `None` for the root.
  #[inline]
  pub fn parent(&self) -> Option<NodeId> {
    self.parent
  }

  #[inline]
  pub fn root(&self) -> NodeId {
    self.root
  }

  #[inline]
  pub fn is_root(&self) -> bool {
    self.root == self.id
  }

  #[inline]
  pub fn is_child(&self) -> bool {
    self.parent.is_some()
  }

  #[inline]
  pub fn has_children(&self) -> bool {
    self.children.is_some()
  }

  /// Child handles in corner order; empty for a leaf.
  pub fn children(&self) -> &[NodeId] {
    match &self.children {
      Some(children) => children.as_slice(),
      None => &[],
    }
  }

  /// Child at `corner`, or `None` for a leaf.
  #[inline]
  pub fn try_child(&self, corner: C) -> Option<NodeId> {
    self.children.map(|children| children[corner.index()])
  }

  /// Child at `corner`. Panics on a leaf.
  pub fn child(&self, corner: C) -> NodeId {
    match self.try_child(corner) {
      Some(child) => child,
      None => panic!("child({corner:?}) on leaf node {:?}", self.id),
    }
  }

  /// True when `other` is the stored parent of this node. Nodes of
  /// different trees are never related.
  #[inline]
  pub fn is_child_of(&self, other: &Self) -> bool {
    self.parent == Some(other.id)
  }

  /// True when this node's child slot at `other`'s corner holds `other`.
  #[inline]
  pub fn is_parent_of(&self, other: &Self) -> bool {
    self.try_child(other.corner) == Some(other.id)
  }
}

struct Slot<T, C, const CHILDREN: usize> {
  generation: u32,
  node: Option<Node<T, C, CHILDREN>>,
}

/// Subdivision tree owning every node in a slot arena.
///
/// `CHILDREN` must equal `C::SIZE`; a mismatch fails at compile time when
/// [`Tree::new`] is instantiated.
pub struct Tree<T, C, const CHILDREN: usize> {
  id: u32,
  slots: Vec<Slot<T, C, CHILDREN>>,
  free: Vec<u32>,
  live: usize,
  root: NodeId,
  metrics: TreeMetrics,
}

impl<T, C: CornerKey, const CHILDREN: usize> Tree<T, C, CHILDREN> {
  const FAN_OUT_MATCHES: () = assert!(
    CHILDREN == C::SIZE,
    "CHILDREN must equal the corner count of the key type"
  );

  /// Create a tree holding a single leaf root with `value`.
  pub fn new(value: T) -> Self {
    let () = Self::FAN_OUT_MATCHES;

    let id = NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed);
    let mut tree = Self {
      id,
      slots: Vec::new(),
      free: Vec::new(),
      live: 0,
      root: NodeId {
        tree: id,
        slot: 0,
        generation: 0,
      },
      metrics: TreeMetrics::new(),
    };
    let corner = C::from_index(0);
    tree.root = tree.alloc(|id| Node {
      id,
      root: id,
      parent: None,
      value,
      level: 0,
      corner,
      children: None,
    });
    tree
  }

  #[inline]
  pub fn root(&self) -> NodeId {
    self.root
  }

  /// Number of live nodes, root included.
  #[inline]
  pub fn node_count(&self) -> usize {
    self.live
  }

  #[inline]
  pub fn contains(&self, id: NodeId) -> bool {
    self.get(id).is_some()
  }

  pub fn get(&self, id: NodeId) -> Option<&Node<T, C, CHILDREN>> {
    if id.tree != self.id {
      return None;
    }
    self
      .slots
      .get(id.slot())
      .filter(|slot| slot.generation == id.generation)
      .and_then(|slot| slot.node.as_ref())
  }

  pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<T, C, CHILDREN>> {
    if id.tree != self.id {
      return None;
    }
    self
      .slots
      .get_mut(id.slot())
      .filter(|slot| slot.generation == id.generation)
      .and_then(|slot| slot.node.as_mut())
  }

  /// Node behind `id`. Panics on a stale or foreign handle.
  pub fn node(&self, id: NodeId) -> &Node<T, C, CHILDREN> {
    match self.get(id) {
      Some(node) => node,
      None => panic!("stale or foreign node handle {id:?}"),
    }
  }

  /// Mutable node behind `id`. Panics on a stale or foreign handle.
  pub fn node_mut(&mut self, id: NodeId) -> &mut Node<T, C, CHILDREN> {
    match self.get_mut(id) {
      Some(node) => node,
      None => panic!("stale or foreign node handle {id:?}"),
    }
  }

  /// Subdivision statistics (all zero unless the `metrics` feature is on and
  /// collection was enabled when this tree was built).
  #[inline]
  pub fn metrics(&self) -> &TreeMetrics {
    &self.metrics
  }

  // =========================================================================
  // Split / join
  // =========================================================================

  /// Split a leaf into `CHILDREN` default-valued children.
  ///
  /// No-op on an internal node. Returns the child handles in corner order.
  pub fn split(&mut self, id: NodeId) -> [NodeId; CHILDREN]
  where
    T: Default,
  {
    self.split_with(id, |_| T::default())
  }

  /// Split a leaf, building each child's payload from its corner.
  ///
  /// Every payload is built before any slot is touched: if `make` panics the
  /// node stays a leaf and the arena is unchanged.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "tree::split"))]
  pub fn split_with(&mut self, id: NodeId, mut make: impl FnMut(C) -> T) -> [NodeId; CHILDREN] {
    let node = self.node(id);
    if let Some(children) = node.children {
      return children;
    }
    let (root, level) = (node.root, node.level + 1);

    let values: [T; CHILDREN] = std::array::from_fn(|i| make(C::from_index(i)));

    let mut children = [id; CHILDREN];
    for (i, value) in values.into_iter().enumerate() {
      let corner = C::from_index(i);
      children[i] = self.alloc(|child| Node {
        id: child,
        root,
        parent: Some(id),
        value,
        level,
        corner,
        children: None,
      });
    }
    self.node_mut(id).children = Some(children);
    self.metrics.record_split();

    #[cfg(feature = "tracing")]
    tracing::trace!(level, live = self.live, "split");

    children
  }

  /// Destroy the whole subtree below `id`, leaving it a leaf.
  ///
  /// No-op on a leaf. Returns the number of released nodes.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "tree::join"))]
  pub fn join(&mut self, id: NodeId) -> usize {
    let Some(children) = self.node_mut(id).children.take() else {
      return 0;
    };

    // Pre-order gather: every node lands after its ancestors.
    let mut pending = children.to_vec();
    let mut doomed = Vec::with_capacity(CHILDREN);
    while let Some(next) = pending.pop() {
      pending.extend_from_slice(self.node(next).children());
      doomed.push(next);
    }

    // Leaves first.
    for &dead in doomed.iter().rev() {
      self.release(dead);
    }
    self.metrics.record_join();

    #[cfg(feature = "tracing")]
    tracing::trace!(released = doomed.len(), live = self.live, "join");

    doomed.len()
  }

  fn alloc(&mut self, make: impl FnOnce(NodeId) -> Node<T, C, CHILDREN>) -> NodeId {
    let id = match self.free.pop() {
      Some(slot) => NodeId {
        tree: self.id,
        slot,
        generation: self.slots[slot as usize].generation,
      },
      None => {
        self.slots.push(Slot {
          generation: 0,
          node: None,
        });
        NodeId {
          tree: self.id,
          slot: (self.slots.len() - 1) as u32,
          generation: 0,
        }
      }
    };

    let node = make(id);
    self.metrics.record_created(node.level);
    self.slots[id.slot()].node = Some(node);
    self.live += 1;
    id
  }

  fn release(&mut self, id: NodeId) {
    let slot = &mut self.slots[id.slot()];
    if let Some(node) = slot.node.take() {
      slot.generation = slot.generation.wrapping_add(1);
      self.free.push(id.slot);
      self.live -= 1;
      self.metrics.record_released(node.level);
    }
  }

  // =========================================================================
  // Navigation
  // =========================================================================

  /// Child of `id` at `corner`. Panics if `id` is a leaf.
  #[inline]
  pub fn child(&self, id: NodeId, corner: C) -> NodeId {
    self.node(id).child(corner)
  }

  #[inline]
  pub fn try_child(&self, id: NodeId, corner: C) -> Option<NodeId> {
    self.node(id).try_child(corner)
  }

  #[inline]
  pub fn children(&self, id: NodeId) -> &[NodeId] {
    self.node(id).children()
  }

  #[inline]
  pub fn parent(&self, id: NodeId) -> Option<NodeId> {
    self.node(id).parent()
  }

  /// True when `parent` is the stored parent of `child`.
  pub fn is_child_of(&self, child: NodeId, parent: NodeId) -> bool {
    self.node(child).parent() == Some(parent)
  }

  /// True when `child` sits in one of `parent`'s child slots.
  pub fn is_parent_of(&self, parent: NodeId, child: NodeId) -> bool {
    self.node(parent).is_parent_of(self.node(child))
  }

  #[inline]
  pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
    self.node(id).children().first().copied()
  }

  #[inline]
  pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
    self.node(id).children().last().copied()
  }

  /// Sibling at the previous corner, `None` for the root or first child.
  pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
    let node = self.node(id);
    let index = node.corner().index().checked_sub(1)?;
    self.children(node.parent()?).get(index).copied()
  }

  /// Sibling at the next corner, `None` for the root or last child.
  pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
    let node = self.node(id);
    self
      .children(node.parent()?)
      .get(node.corner().index() + 1)
      .copied()
  }

  /// Whole-tree cursor positioned at `id`.
  pub fn cursor(&self, id: NodeId) -> TreeCursor<'_, T, C, CHILDREN> {
    TreeCursor::new(self, id)
  }

  /// Cursor restricted to the corners of `facet`, positioned at `id`.
  pub fn face_cursor<F>(&self, id: NodeId, facet: F) -> FaceCursor<'_, T, F, CHILDREN>
  where
    F: Facet<Corner = C>,
  {
    FaceCursor::new(self, id, facet)
  }
}

impl<T, C: CornerKey, const CHILDREN: usize> Index<NodeId> for Tree<T, C, CHILDREN> {
  type Output = T;

  fn index(&self, id: NodeId) -> &T {
    self.node(id).value()
  }
}

impl<T, C: CornerKey, const CHILDREN: usize> IndexMut<NodeId> for Tree<T, C, CHILDREN> {
  fn index_mut(&mut self, id: NodeId) -> &mut T {
    self.node_mut(id).value_mut()
  }
}

impl<T, C: CornerKey, const CHILDREN: usize> std::fmt::Debug for Tree<T, C, CHILDREN> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Tree")
      .field("root", &self.root)
      .field("nodes", &self.live)
      .field("slots", &self.slots.len())
      .finish()
  }
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
