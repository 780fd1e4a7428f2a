use std::panic::{catch_unwind, AssertUnwindSafe};

use super::*;
use crate::topology::{cube, square, Element};

// =========================================================================
// Construction
// =========================================================================

/// A new tree is a single leaf root at level 0 that points at itself.
#[test]
fn test_new_tree_is_single_leaf_root() {
  let tree = Octree::new(42u32);
  let root = tree.node(tree.root());

  assert_eq!(tree.node_count(), 1);
  assert_eq!(*root.value(), 42);
  assert_eq!(root.level(), 0);
  assert!(root.is_root());
  assert!(!root.is_child());
  assert!(!root.has_children());
  assert_eq!(root.parent(), None);
  assert_eq!(root.root(), tree.root());
  assert!(root.children().is_empty());
  assert_eq!(root.corner().index(), 0);
}

#[test]
fn test_index_operators_reach_payload() {
  let mut tree = QuadTree::new(String::from("root"));
  let root = tree.root();
  tree[root].push_str("!");
  assert_eq!(tree[root], "root!");

  *tree.node_mut(root).value_mut() = String::from("renamed");
  assert_eq!(tree.node(root).value(), "renamed");
}

// =========================================================================
// Split
// =========================================================================

/// Split yields CHILDREN children one level down, each keyed by its corner.
#[test]
fn test_split_creates_children_in_corner_order() {
  let mut tree = Octree::<u8>::new(0);
  let root = tree.root();
  let children = tree.split(root);

  assert_eq!(tree.node_count(), 9);
  assert!(tree.node(root).has_children());
  assert_eq!(tree.children(root), &children);

  for (i, &id) in children.iter().enumerate() {
    let child = tree.node(id);
    assert_eq!(child.corner().index(), i);
    assert_eq!(child.level(), 1);
    assert_eq!(child.parent(), Some(root));
    assert_eq!(child.root(), root);
    assert!(child.is_child());
    assert!(!child.is_root());
    assert!(child.is_child_of(tree.node(root)));
    assert!(tree.node(root).is_parent_of(child));
    assert_eq!(*child.value(), 0, "default payload");
  }
}

/// `child(corner).corner() == corner` for every corner right after split.
#[test]
fn test_child_corner_round_trip() {
  let mut tree = QuadTree::<()>::new(());
  let root = tree.root();
  tree.split(root);

  for &corner in square::Corner::all() {
    let child = tree.child(root, corner);
    assert_eq!(tree.node(child).corner(), corner);
    assert_eq!(tree.try_child(root, corner), Some(child));
  }
}

#[test]
fn test_split_with_builds_payload_from_corner() {
  let mut tree = Octree::new(usize::MAX);
  let root = tree.root();
  let children = tree.split_with(root, |corner| corner.index() * 10);

  for (i, &id) in children.iter().enumerate() {
    assert_eq!(tree[id], i * 10);
  }
}

/// Splitting an internal node changes nothing and returns the same children.
#[test]
fn test_split_is_idempotent() {
  let mut tree = Octree::<i32>::new(0);
  let root = tree.root();
  let first = tree.split(root);
  let second = tree.split_with(root, |_| panic!("payload must not be rebuilt"));

  assert_eq!(first, second);
  assert_eq!(tree.node_count(), 9);
}

/// A panicking payload constructor leaves the node a leaf.
#[test]
fn test_split_is_all_or_nothing() {
  let mut tree = Octree::<u32>::new(0);
  let root = tree.root();

  let result = catch_unwind(AssertUnwindSafe(|| {
    tree.split_with(root, |corner| {
      if corner.index() == 5 {
        panic!("payload construction failed");
      }
      1
    })
  }));

  assert!(result.is_err());
  assert!(!tree.node(root).has_children());
  assert_eq!(tree.node_count(), 1);

  // The tree is still usable afterwards
  tree.split(root);
  assert_eq!(tree.node_count(), 9);
}

#[test]
#[should_panic(expected = "on leaf node")]
fn test_child_on_leaf_panics() {
  let tree = Octree::<()>::new(());
  let _ = tree.child(tree.root(), cube::Corner::from_index(0));
}

#[test]
fn test_try_child_on_leaf_is_none() {
  let tree = QuadTree::<()>::new(());
  assert_eq!(tree.try_child(tree.root(), square::Corner::new(true, true)), None);
  assert_eq!(tree.first_child(tree.root()), None);
  assert_eq!(tree.last_child(tree.root()), None);
}

// =========================================================================
// Join
// =========================================================================

#[test]
fn test_join_releases_subtree() {
  let mut tree = Octree::<u8>::new(0);
  let root = tree.root();
  let children = tree.split(root);
  let grandchildren = tree.split(children[3]);

  assert_eq!(tree.node_count(), 17);
  assert_eq!(tree.join(root), 16);

  assert_eq!(tree.node_count(), 1);
  assert!(!tree.node(root).has_children());
  for id in children.into_iter().chain(grandchildren) {
    assert!(!tree.contains(id), "{id:?} should be released");
  }
}

#[test]
fn test_join_is_idempotent() {
  let mut tree = QuadTree::<u8>::new(0);
  let root = tree.root();
  assert_eq!(tree.join(root), 0);
  tree.split(root);
  assert_eq!(tree.join(root), 4);
  assert_eq!(tree.join(root), 0);
  assert_eq!(tree.node_count(), 1);
}

/// Joining an inner node only releases that node's descendants.
#[test]
fn test_join_inner_node_keeps_siblings() {
  let mut tree = QuadTree::<u8>::new(0);
  let root = tree.root();
  let children = tree.split(root);
  tree.split(children[0]);
  let kept = tree.split(children[1]);

  assert_eq!(tree.join(children[0]), 4);
  assert!(tree.node(children[1]).has_children());
  assert!(kept.iter().all(|&id| tree.contains(id)));
  assert_eq!(tree.node_count(), 1 + 4 + 4);
}

/// Handles to released nodes stay invalid after their slots are reused.
#[test]
fn test_stale_handles_are_rejected() {
  let mut tree = Octree::<u8>::new(0);
  let root = tree.root();
  let old = tree.split(root);
  tree.join(root);
  let new = tree.split(root);

  for (old, new) in old.iter().zip(new.iter()) {
    assert!(tree.get(*old).is_none());
    assert!(tree.get(*new).is_some());
  }
  // Slots are recycled rather than grown
  assert!(new.iter().all(|id| old.iter().any(|o| o.slot() == id.slot())));
}

#[test]
#[should_panic(expected = "stale or foreign node handle")]
fn test_node_on_stale_handle_panics() {
  let mut tree = QuadTree::<u8>::new(0);
  let root = tree.root();
  let children = tree.split(root);
  tree.join(root);
  let _ = tree.node(children[0]);
}

// =========================================================================
// Navigation
// =========================================================================

#[test]
fn test_sibling_navigation() {
  let mut tree = QuadTree::<u8>::new(0);
  let root = tree.root();
  let children = tree.split(root);

  assert_eq!(tree.first_child(root), Some(children[0]));
  assert_eq!(tree.last_child(root), Some(children[3]));

  assert_eq!(tree.next_sibling(children[0]), Some(children[1]));
  assert_eq!(tree.next_sibling(children[3]), None);
  assert_eq!(tree.previous_sibling(children[2]), Some(children[1]));
  assert_eq!(tree.previous_sibling(children[0]), None);

  assert_eq!(tree.next_sibling(root), None);
  assert_eq!(tree.previous_sibling(root), None);
}

#[test]
fn test_structural_identity_checks() {
  let mut tree = Octree::<u8>::new(0);
  let root = tree.root();
  let children = tree.split(root);
  let grandchildren = tree.split(children[2]);

  assert!(tree.is_child_of(children[2], root));
  assert!(tree.is_parent_of(root, children[2]));
  assert!(tree.is_parent_of(children[2], grandchildren[0]));
  assert!(!tree.is_child_of(grandchildren[0], root));
  assert!(!tree.is_parent_of(children[1], grandchildren[1]));
  assert!(!tree.is_child_of(root, root));
  assert_eq!(tree.parent(grandchildren[7]), Some(children[2]));
  assert_eq!(tree.parent(root), None);
}

/// Equal payloads do not make nodes related.
#[test]
fn test_identity_is_not_payload_equality() {
  let mut tree = QuadTree::<u8>::new(7);
  let root = tree.root();
  let children = tree.split_with(root, |_| 7);
  let a = tree.node(children[0]);
  let b = tree.node(children[1]);
  assert!(!a.is_child_of(b));
  assert!(!b.is_parent_of(a));
}

/// A handle issued by one tree is rejected by every other tree.
#[test]
fn test_foreign_handles_are_rejected() {
  let mut a = Octree::<u32>::new(1);
  let mut b = Octree::<u32>::new(2);
  let (ra, rb) = (a.root(), b.root());

  // Same slot and generation, different tree
  assert_eq!(ra.slot(), rb.slot());
  assert_ne!(ra, rb);
  assert!(a.get(rb).is_none());
  assert!(b.get_mut(ra).is_none());
  assert!(!a.contains(rb));

  let ca = a.split(ra);
  b.split(rb);
  assert!(!a.node(ca[0]).is_child_of(b.node(rb)));
  assert!(!b.node(rb).is_parent_of(a.node(ca[0])));
  assert!(a.node(ca[0]).is_child_of(a.node(ra)));
}

#[test]
#[should_panic(expected = "stale or foreign node handle")]
fn test_node_on_foreign_handle_panics() {
  let a = QuadTree::<u8>::new(0);
  let b = QuadTree::<u8>::new(0);
  let _ = a.node(b.root());
}

#[cfg(feature = "metrics")]
#[test]
fn test_metrics_follow_split_and_join() {
  let mut tree = Octree::<u8>::new(0);
  let root = tree.root();
  let children = tree.split(root);
  tree.split(children[0]);
  tree.join(root);

  let metrics = tree.metrics();
  assert!(metrics.is_collecting());
  assert_eq!(metrics.splits, 2);
  assert_eq!(metrics.joins, 1);
  assert_eq!(metrics.nodes_created, 17);
  assert_eq!(metrics.nodes_released, 16);
  assert_eq!(metrics.live_nodes(), 1);
}
