//! Unit square topology: 4 corners, 4 directions, 4 edges.
//!
//! # Square Layout
//!
//! ```text
//!     2─────────3        Corners (binary YX):
//!     │         │          0=(0,0)  1=(1,0)  2=(0,1)  3=(1,1)
//!     │         │
//!     │         │        +Y
//!     0─────────1         │
//!                         └───+X
//! ```
//!
//! # Direction Encoding
//!
//! Two bits, `[axis][sign]`: the axis bit is set for X and clear for Y, the
//! sign bit is set for the positive direction.
//!
//! ```text
//!   0 = -Y   1 = +Y   2 = -X   3 = +X
//! ```
//!
//! Edges are one-to-one with directions: the edge with index `i` is the side
//! of the square facing direction `i`.

use glam::{IVec2, UVec2};
use smallvec::SmallVec;

use super::{check_axis_vector, CornerKey, Element, ElementSet, Facet};
use crate::error::TopologyError;

pub type CornerSet = ElementSet<Corner>;
pub type DirectionSet = ElementSet<Direction>;
pub type EdgeSet = ElementSet<Edge>;

const SIGN_BIT: u8 = 0b01;
const X_AXIS_BIT: u8 = 0b10;

const CORNER_X_BIT: u8 = 0b01;
const CORNER_Y_BIT: u8 = 0b10;
const CORNER_MASK: u8 = 0b11;

// =========================================================================
// Direction
// =========================================================================

/// One of the 4 unit axis vectors of the plane.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Direction(u8);

impl Direction {
  pub const SIZE: usize = 4;

  pub const NEG_Y: Self = Self(0);
  pub const POS_Y: Self = Self(SIGN_BIT);
  pub const NEG_X: Self = Self(X_AXIS_BIT);
  pub const POS_X: Self = Self(X_AXIS_BIT | SIGN_BIT);

  const ALL: [Self; 4] = [Self::NEG_Y, Self::POS_Y, Self::NEG_X, Self::POS_X];

  /// Direction for the axis vector `(x, y)`.
  pub fn try_get(x: i32, y: i32) -> Result<Self, TopologyError> {
    check_axis_vector(x, y, 0)?;
    let axis = if x != 0 { X_AXIS_BIT } else { 0 };
    let sign = if x + y > 0 { SIGN_BIT } else { 0 };
    Ok(Self(axis | sign))
  }

  /// Direction for the axis vector `(x, y)`. Panics on an invalid vector.
  pub fn get(x: i32, y: i32) -> Self {
    match Self::try_get(x, y) {
      Ok(direction) => direction,
      Err(err) => panic!("{err}"),
    }
  }

  /// Direction along `axis` (0 = X, 1 = Y).
  pub fn try_from_axis(axis: usize, positive: bool) -> Result<Self, TopologyError> {
    TopologyError::check_index(axis, 2)?;
    Ok(Self::from_axis(axis, positive))
  }

  /// Direction along `axis` (0 = X, 1 = Y). Panics if `axis > 1`.
  pub const fn from_axis(axis: usize, positive: bool) -> Self {
    assert!(axis < 2, "axis out of range for 2 axes");
    let axis_bit = if axis == 0 { X_AXIS_BIT } else { 0 };
    Self(axis_bit | positive as u8)
  }

  #[inline]
  pub const fn all() -> &'static [Self; 4] {
    &Self::ALL
  }

  #[inline]
  pub const fn index(self) -> usize {
    self.0 as usize
  }

  #[inline]
  pub const fn positive(self) -> bool {
    self.0 & SIGN_BIT != 0
  }

  /// 0 for X, 1 for Y.
  #[inline]
  pub const fn axis(self) -> usize {
    if self.0 & X_AXIS_BIT != 0 {
      0
    } else {
      1
    }
  }

  #[inline]
  const fn sign(self) -> i32 {
    if self.positive() {
      1
    } else {
      -1
    }
  }

  pub const fn x(self) -> i32 {
    if self.axis() == 0 {
      self.sign()
    } else {
      0
    }
  }

  pub const fn y(self) -> i32 {
    if self.axis() == 1 {
      self.sign()
    } else {
      0
    }
  }

  #[inline]
  pub const fn opposite(self) -> Self {
    Self(self.0 ^ SIGN_BIT)
  }

  /// The two directions orthogonal to this one, in index order.
  pub const fn adjacent(self) -> [Self; 2] {
    let other_axis = (self.0 & X_AXIS_BIT) ^ X_AXIS_BIT;
    [Self(other_axis), Self(other_axis | SIGN_BIT)]
  }

  /// Side of the square facing this direction.
  #[inline]
  pub const fn edge(self) -> Edge {
    Edge(self)
  }

  pub fn to_ivec2(self) -> IVec2 {
    IVec2::new(self.x(), self.y())
  }
}

impl TryFrom<IVec2> for Direction {
  type Error = TopologyError;

  fn try_from(v: IVec2) -> Result<Self, TopologyError> {
    Self::try_get(v.x, v.y)
  }
}

impl Element for Direction {
  const SIZE: usize = 4;

  fn index(self) -> usize {
    Direction::index(self)
  }

  fn all() -> &'static [Self] {
    &Self::ALL
  }
}

// =========================================================================
// Corner
// =========================================================================

/// A vertex of the unit square, packed as `x | y << 1`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Corner(u8);

impl Corner {
  pub const SIZE: usize = 4;

  const ALL: [Self; 4] = [Self(0), Self(1), Self(2), Self(3)];

  pub const fn new(x: bool, y: bool) -> Self {
    Self(x as u8 | (y as u8) << 1)
  }

  #[inline]
  pub const fn all() -> &'static [Self; 4] {
    &Self::ALL
  }

  #[inline]
  pub const fn index(self) -> usize {
    self.0 as usize
  }

  #[inline]
  pub const fn x(self) -> bool {
    self.0 & CORNER_X_BIT != 0
  }

  #[inline]
  pub const fn y(self) -> bool {
    self.0 & CORNER_Y_BIT != 0
  }

  #[inline]
  pub const fn x_i(self) -> u32 {
    self.x() as u32
  }

  #[inline]
  pub const fn y_i(self) -> u32 {
    self.y() as u32
  }

  /// Corner diagonally across the square.
  #[inline]
  pub const fn opposite(self) -> Self {
    Self(!self.0 & CORNER_MASK)
  }

  /// Corners sharing an edge with this one: X flipped, then Y flipped.
  pub const fn adjacent(self) -> [Self; 2] {
    [Self(self.0 ^ CORNER_X_BIT), Self(self.0 ^ CORNER_Y_BIT)]
  }

  pub fn adjacent_set(self) -> CornerSet {
    self.adjacent().into_iter().collect()
  }

  /// Neighbor reached by flipping the coordinate along `direction`'s axis.
  pub const fn adjacent_toward(self, direction: Direction) -> Self {
    let flip = if direction.axis() == 0 {
      CORNER_X_BIT
    } else {
      CORNER_Y_BIT
    };
    Self(self.0 ^ flip)
  }

  /// The two edges meeting at this corner: the X side, then the Y side.
  pub const fn edges(self) -> [Edge; 2] {
    [
      Edge(Direction::from_axis(0, self.x())),
      Edge(Direction::from_axis(1, self.y())),
    ]
  }

  pub fn edge_set(self) -> EdgeSet {
    self.edges().into_iter().collect()
  }

  /// True when the corners differ in exactly one coordinate.
  #[inline]
  pub const fn is_adjacent(self, other: Self) -> bool {
    (self.0 ^ other.0).count_ones() == 1
  }

  /// Integer offset of this corner within the unit square.
  pub fn offset(self) -> UVec2 {
    UVec2::new(self.x_i(), self.y_i())
  }
}

impl Element for Corner {
  const SIZE: usize = 4;

  fn index(self) -> usize {
    Corner::index(self)
  }

  fn all() -> &'static [Self] {
    &Self::ALL
  }
}

impl CornerKey for Corner {
  fn opposite(self) -> Self {
    Corner::opposite(self)
  }

  fn adjacent(self) -> SmallVec<[Self; 3]> {
    SmallVec::from_slice(&Corner::adjacent(self))
  }
}

// =========================================================================
// Edge
// =========================================================================

/// Corner pairs of each edge, indexed by edge index.
static EDGE_CORNERS: [[Corner; 2]; 4] = generate_edge_corners();

/// Collect, per edge, the corners whose bit on the edge's axis matches its
/// sign. Every edge must end up with exactly 2 corners.
const fn generate_edge_corners() -> [[Corner; 2]; 4] {
  let mut table = [[Corner(0); 2]; 4];
  let mut edge = 0;

  while edge < 4 {
    let direction = Direction(edge as u8);
    let axis_bit = if direction.axis() == 0 {
      CORNER_X_BIT
    } else {
      CORNER_Y_BIT
    };
    let wanted = if direction.positive() { axis_bit } else { 0 };

    let mut found = 0;
    let mut corner = 0u8;
    while corner < 4 {
      if corner & axis_bit == wanted {
        assert!(found < 2, "square edge has more than 2 corners");
        table[edge][found] = Corner(corner);
        found += 1;
      }
      corner += 1;
    }
    assert!(found == 2, "square edge has fewer than 2 corners");

    edge += 1;
  }

  table
}

/// A side of the unit square, identified by the direction it faces.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Edge(Direction);

impl Edge {
  pub const SIZE: usize = 4;

  const ALL: [Self; 4] = [
    Self(Direction::ALL[0]),
    Self(Direction::ALL[1]),
    Self(Direction::ALL[2]),
    Self(Direction::ALL[3]),
  ];

  #[inline]
  pub const fn get(direction: Direction) -> Self {
    Self(direction)
  }

  #[inline]
  pub const fn all() -> &'static [Self; 4] {
    &Self::ALL
  }

  #[inline]
  pub const fn index(self) -> usize {
    self.0.index()
  }

  #[inline]
  pub const fn direction(self) -> Direction {
    self.0
  }

  #[inline]
  pub const fn opposite(self) -> Self {
    Self(self.0.opposite())
  }

  /// Edges sharing a corner with this one.
  pub const fn adjacent(self) -> [Self; 2] {
    let [a, b] = self.0.adjacent();
    [Self(a), Self(b)]
  }

  /// Endpoints of this edge, lower index first.
  #[inline]
  pub fn corners(self) -> &'static [Corner; 2] {
    &EDGE_CORNERS[self.index()]
  }

  pub fn corner_set(self) -> CornerSet {
    self.corners().iter().copied().collect()
  }
}

impl From<Direction> for Edge {
  fn from(direction: Direction) -> Self {
    Self(direction)
  }
}

impl Element for Edge {
  const SIZE: usize = 4;

  fn index(self) -> usize {
    Edge::index(self)
  }

  fn all() -> &'static [Self] {
    &Self::ALL
  }
}

impl Facet for Edge {
  type Corner = Corner;

  fn corners(self) -> &'static [Corner] {
    Edge::corners(self)
  }
}

#[cfg(test)]
#[path = "square_test.rs"]
mod square_test;
