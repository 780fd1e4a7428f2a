//! Boundary topology of the unit square (N=2) and the unit cube (N=3).
//!
//! Every element (corner, direction, edge, face) is a small-integer newtype
//! whose `index()` is its position in the canonical `all()` table. The tables
//! are `const` data built at compile time, so they are immutable, initialized
//! before first use and safe to share between threads.
//!
//! # Module Structure
//!
//! - [`square`]: 4 corners, 4 directions, 4 edges
//! - [`cube`]: 8 corners, 6 directions, 6 faces, 12 edges
//! - [`set`]: `ElementSet` - fixed-capacity bit set over any element kind

pub mod cube;
pub mod set;
pub mod square;

use std::fmt::Debug;

use smallvec::SmallVec;

pub use set::{ElementSet, Iter};

use crate::error::TopologyError;

/// A canonically indexed topology element.
pub trait Element: Copy + Eq + Debug + 'static {
  /// Number of elements of this kind.
  const SIZE: usize;

  /// Position of this element in [`Element::all`].
  fn index(self) -> usize;

  /// Canonical enumeration, ordered by index.
  fn all() -> &'static [Self];

  /// Look up the element at `index`.
  fn try_from_index(index: usize) -> Result<Self, TopologyError> {
    TopologyError::check_index(index, Self::SIZE)?;
    Ok(Self::all()[index])
  }

  /// Look up the element at `index`, panicking when `index >= SIZE`.
  fn from_index(index: usize) -> Self {
    match Self::try_from_index(index) {
      Ok(element) => element,
      Err(err) => panic!("{err}"),
    }
  }
}

/// Corner type that keys the children of a subdivision tree node.
///
/// A tree keyed by `C` has exactly `C::SIZE` (= 2^N) children per split node.
pub trait CornerKey: Element {
  /// Corner with every coordinate flipped.
  fn opposite(self) -> Self;

  /// The N corners at Hamming distance 1.
  fn adjacent(self) -> SmallVec<[Self; 3]>;

  /// Highest-indexed corner; the last sibling in topology order.
  fn last() -> Self {
    Self::all()[Self::SIZE - 1]
  }
}

/// A boundary element that selects a subset of corners (a cube face, a
/// square edge). Used to restrict traversal to one side of a node.
pub trait Facet: Copy + Eq + Debug + 'static {
  type Corner: CornerKey;

  /// Corners lying on this facet, in ascending corner index.
  fn corners(self) -> &'static [Self::Corner];
}

/// Axis-vector check shared by both topologies: every component in
/// {-1, 0, 1} and exactly one of them nonzero.
pub(crate) fn check_axis_vector(x: i32, y: i32, z: i32) -> Result<(), TopologyError> {
  let unit = |c: i32| (-1..=1).contains(&c);
  let nonzero = [x, y, z].iter().filter(|&&c| c != 0).count();
  if unit(x) && unit(y) && unit(z) && nonzero == 1 {
    Ok(())
  } else {
    Err(TopologyError::InvalidDirection { x, y, z })
  }
}
