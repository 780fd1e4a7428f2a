use super::*;
use crate::topology::cube::{self, Face};
use crate::topology::square;

type CubeCorners = ElementSet<cube::Corner>;

fn corner(index: usize) -> cube::Corner {
  cube::Corner::from_index(index)
}

// =========================================================================
// Membership
// =========================================================================

#[test]
fn test_new_set_is_empty() {
  let set = CubeCorners::new();
  assert!(set.is_empty());
  assert_eq!(set.len(), 0);
  assert_eq!(set.bits(), 0);
  assert_eq!(set.iter().next(), None);
  assert_eq!(set, CubeCorners::default());
}

#[test]
fn test_insert_reports_new_members() {
  let mut set = CubeCorners::new();
  assert!(set.insert(corner(3)));
  assert!(!set.insert(corner(3)), "second insert is a no-op");
  assert!(set.insert(corner(6)));

  assert_eq!(set.len(), 2);
  assert_eq!(set.bits(), 0b0100_1000);
  assert!(set.contains(corner(3)));
  assert!(!set.contains(corner(4)));
}

#[test]
fn test_contains_index() {
  let set: CubeCorners = [corner(0), corner(7)].into_iter().collect();
  assert!(set.contains_index(0));
  assert!(set.contains_index(7));
  assert!(!set.contains_index(5));
  assert_eq!(
    set.try_contains_index(8),
    Err(TopologyError::OutOfRange { index: 8, size: 8 })
  );
}

#[test]
#[should_panic(expected = "out of range")]
fn test_contains_index_panics_past_capacity() {
  let set = ElementSet::<square::Direction>::full();
  let _ = set.contains_index(4);
}

#[test]
fn test_full_and_clear() {
  let mut set = ElementSet::<cube::Edge>::full();
  assert_eq!(set.len(), 12);
  assert_eq!(set.bits(), 0xFFF);
  set.clear();
  assert!(set.is_empty());
}

// =========================================================================
// Union
// =========================================================================

#[test]
fn test_union_operators() {
  let a = CubeCorners::from(corner(1));
  let b = CubeCorners::from(corner(2));

  let both = a | b;
  assert_eq!(both, a.union(b));
  assert_eq!(both.len(), 2);

  let mut grown = a;
  grown |= b;
  grown |= corner(5);
  assert_eq!(grown, both | corner(5));
  assert_eq!(grown.len(), 3);

  // Union is idempotent
  assert_eq!(both | both, both);
}

/// Two opposite faces cover the whole cube.
#[test]
fn test_union_of_face_corner_sets() {
  let face = Face::all()[4];
  let union = face.corner_set() | face.opposite().corner_set();
  assert_eq!(union, CubeCorners::full());
}

// =========================================================================
// Iteration
// =========================================================================

/// Iteration skips unset indices and yields members in ascending order.
#[test]
fn test_iter_skips_non_members() {
  let set: CubeCorners = [corner(6), corner(1), corner(4)].into_iter().collect();
  let indices: Vec<usize> = set.iter().map(|c| c.index()).collect();
  assert_eq!(indices, vec![1, 4, 6]);

  let mut iter = set.iter();
  assert_eq!(iter.position(), Some(1));
  assert_eq!(iter.len(), 3);
  iter.next();
  assert_eq!(iter.position(), Some(4));
  assert_eq!(iter.len(), 2);
  iter.next();
  iter.next();
  assert!(iter.is_end());
  assert_eq!(iter.next(), None);
  assert_eq!(iter.next(), None);
}

#[test]
fn test_iter_on_last_index() {
  let set = CubeCorners::from(corner(7));
  let mut iter = set.iter();
  assert_eq!(iter.next(), Some(corner(7)));
  assert!(iter.is_end());
}

/// End cursors compare equal regardless of which set they walked.
#[test]
fn test_iter_equality() {
  let a: CubeCorners = [corner(2), corner(5)].into_iter().collect();
  let b = a;

  assert_eq!(a.iter(), a.iter());
  assert_ne!(a.iter(), b.iter(), "different sets at a live position");

  let mut end_a = a.iter();
  end_a.by_ref().for_each(drop);
  let empty = CubeCorners::new();
  assert_eq!(end_a, empty.iter());

  let mut advanced = a.iter();
  advanced.next();
  assert_ne!(advanced, a.iter());
}

#[test]
fn test_for_loop_over_reference() {
  let set = ElementSet::<square::Corner>::full();
  let mut count = 0;
  for member in &set {
    assert_eq!(member.index(), count);
    count += 1;
  }
  assert_eq!(count, 4);
}

#[test]
fn test_debug_lists_members() {
  let set = ElementSet::<square::Direction>::from(square::Direction::POS_X);
  assert_eq!(format!("{set:?}"), "{Direction(3)}");
}
