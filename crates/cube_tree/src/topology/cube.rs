//! Unit cube topology: 8 corners, 6 directions, 6 faces, 12 edges.
//!
//! # Cube Layout
//!
//! ```text
//!       6──────7         Corners (binary ZYX):
//!      /│     /│           0=(0,0,0)  1=(1,0,0)  2=(0,1,0)  3=(1,1,0)
//!     4─┼────5 │           4=(0,0,1)  5=(1,0,1)  6=(0,1,1)  7=(1,1,1)
//!     │ 2────┼─3
//!     │/     │/          +Y
//!     0──────1            │  +Z
//!                         │ /
//!                         └───+X
//! ```
//!
//! # Direction Encoding
//!
//! Three bits, `[axis:2][sign:1]`. Axis code `10` is X, `01` is Y, `00` is
//! Z; the sign bit is set for the positive direction.
//!
//! ```text
//!   0 = -Z   1 = +Z   2 = -Y   3 = +Y   4 = -X   5 = +X
//! ```
//!
//! Faces share the direction index: face `i` is the side of the cube whose
//! outward normal is direction `i`.
//!
//! # Edge Enumeration
//!
//! Corners 7, 1, 4 and 2 are pairwise non-adjacent, so their three edges each
//! partition the 12 cube edges. Edge `3k + j` joins representative `k` to its
//! `j`-th adjacent corner (X flipped, Y flipped, Z flipped):
//!
//! ```text
//!   0:[6,7]  1:[5,7]  2:[3,7]     3:[0,1]  4:[1,3]   5:[1,5]
//!   6:[4,5]  7:[4,6]  8:[0,4]     9:[2,3] 10:[0,2]  11:[2,6]
//! ```

use glam::{IVec3, UVec3};
use smallvec::SmallVec;

use super::{check_axis_vector, CornerKey, Element, ElementSet, Facet};
use crate::error::TopologyError;

pub type CornerSet = ElementSet<Corner>;
pub type DirectionSet = ElementSet<Direction>;
pub type FaceSet = ElementSet<Face>;
pub type EdgeSet = ElementSet<Edge>;

const SIGN_BIT: u8 = 0b001;
const AXIS_SHIFT: u8 = 1;
const CORNER_MASK: u8 = 0b111;

/// Corner coordinate bit for an axis (0 = X, 1 = Y, 2 = Z).
#[inline]
const fn corner_axis_bit(axis: usize) -> u8 {
  1 << axis
}

/// Representative corners whose adjacent corners enumerate every edge once.
const EDGE_REPRESENTATIVES: [u8; 4] = [0b111, 0b001, 0b100, 0b010];

// =========================================================================
// Direction
// =========================================================================

/// One of the 6 unit axis vectors of space.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Direction(u8);

impl Direction {
  pub const SIZE: usize = 6;

  pub const NEG_Z: Self = Self(0);
  pub const POS_Z: Self = Self(1);
  pub const NEG_Y: Self = Self(2);
  pub const POS_Y: Self = Self(3);
  pub const NEG_X: Self = Self(4);
  pub const POS_X: Self = Self(5);

  const ALL: [Self; 6] = [
    Self::NEG_Z,
    Self::POS_Z,
    Self::NEG_Y,
    Self::POS_Y,
    Self::NEG_X,
    Self::POS_X,
  ];

  /// Direction for the axis vector `(x, y, z)`.
  pub fn try_get(x: i32, y: i32, z: i32) -> Result<Self, TopologyError> {
    check_axis_vector(x, y, z)?;
    let axis = if x != 0 {
      0
    } else if y != 0 {
      1
    } else {
      2
    };
    Ok(Self::from_axis(axis, x + y + z > 0))
  }

  /// Direction for the axis vector `(x, y, z)`. Panics on an invalid vector.
  pub fn get(x: i32, y: i32, z: i32) -> Self {
    match Self::try_get(x, y, z) {
      Ok(direction) => direction,
      Err(err) => panic!("{err}"),
    }
  }

  /// Direction along `axis` (0 = X, 1 = Y, 2 = Z).
  pub fn try_from_axis(axis: usize, positive: bool) -> Result<Self, TopologyError> {
    TopologyError::check_index(axis, 3)?;
    Ok(Self::from_axis(axis, positive))
  }

  /// Direction along `axis` (0 = X, 1 = Y, 2 = Z). Panics if `axis > 2`.
  pub const fn from_axis(axis: usize, positive: bool) -> Self {
    assert!(axis < 3, "axis out of range for 3 axes");
    let code = (2 - axis) as u8;
    Self(code << AXIS_SHIFT | positive as u8)
  }

  #[inline]
  pub const fn all() -> &'static [Self; 6] {
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

  /// 0 for X, 1 for Y, 2 for Z.
  #[inline]
  pub const fn axis(self) -> usize {
    2 - (self.0 >> AXIS_SHIFT) as usize
  }

  #[inline]
  const fn component(self, axis: usize) -> i32 {
    if self.axis() != axis {
      0
    } else if self.positive() {
      1
    } else {
      -1
    }
  }

  pub const fn x(self) -> i32 {
    self.component(0)
  }

  pub const fn y(self) -> i32 {
    self.component(1)
  }

  pub const fn z(self) -> i32 {
    self.component(2)
  }

  #[inline]
  pub const fn opposite(self) -> Self {
    Self(self.0 ^ SIGN_BIT)
  }

  /// The four directions orthogonal to this one, in index order.
  pub const fn adjacent(self) -> [Self; 4] {
    let mut result = [self; 4];
    let mut found = 0;
    let mut i = 0;
    while i < Self::SIZE {
      let candidate = Self::ALL[i];
      if candidate.axis() != self.axis() {
        result[found] = candidate;
        found += 1;
      }
      i += 1;
    }
    result
  }

  #[inline]
  pub const fn face(self) -> Face {
    Face(self)
  }

  pub fn to_ivec3(self) -> IVec3 {
    IVec3::new(self.x(), self.y(), self.z())
  }
}

impl TryFrom<IVec3> for Direction {
  type Error = TopologyError;

  fn try_from(v: IVec3) -> Result<Self, TopologyError> {
    Self::try_get(v.x, v.y, v.z)
  }
}

impl Element for Direction {
  const SIZE: usize = 6;

  fn index(self) -> usize {
    Direction::index(self)
  }

  fn all() -> &'static [Self] {
    &Self::ALL
  }
}

// =========================================================================
// Face
// =========================================================================

/// Corners of each face, ascending corner index.
static FACE_CORNERS: [[Corner; 4]; 6] = generate_face_corners();

/// Edges of each face, ascending edge index.
const FACE_EDGES: [[Edge; 4]; 6] = generate_face_edges();

/// Intersect every corner's coordinate bits with the face axis and keep the
/// corners whose bit agrees with the face sign. Exactly 4 must survive.
const fn generate_face_corners() -> [[Corner; 4]; 6] {
  let mut table = [[Corner(0); 4]; 6];
  let mut face = 0;

  while face < 6 {
    let direction = Direction(face as u8);
    let mut found = 0;
    let mut corner = 0u8;
    while corner < 8 {
      if Corner(corner).on_face(direction) {
        assert!(found < 4, "cube face has more than 4 corners");
        table[face][found] = Corner(corner);
        found += 1;
      }
      corner += 1;
    }
    assert!(found == 4, "cube face has fewer than 4 corners");

    face += 1;
  }

  table
}

const fn generate_face_edges() -> [[Edge; 4]; 6] {
  let mut table = [[Edge(0); 4]; 6];
  let mut face = 0;

  while face < 6 {
    let direction = Direction(face as u8);
    let mut found = 0;
    let mut edge = 0;
    while edge < 12 {
      let [a, b] = EDGE_PAIRS[edge];
      if a.on_face(direction) && b.on_face(direction) {
        assert!(found < 4, "cube face has more than 4 edges");
        table[face][found] = Edge(edge as u8);
        found += 1;
      }
      edge += 1;
    }
    assert!(found == 4, "cube face has fewer than 4 edges");

    face += 1;
  }

  table
}

/// A side of the unit cube, identified by its outward direction.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Face(Direction);

impl Face {
  pub const SIZE: usize = 6;

  const ALL: [Self; 6] = [
    Self(Direction::ALL[0]),
    Self(Direction::ALL[1]),
    Self(Direction::ALL[2]),
    Self(Direction::ALL[3]),
    Self(Direction::ALL[4]),
    Self(Direction::ALL[5]),
  ];

  #[inline]
  pub const fn get(direction: Direction) -> Self {
    Self(direction)
  }

  #[inline]
  pub const fn all() -> &'static [Self; 6] {
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

  /// Faces sharing an edge with this one.
  pub const fn adjacent(self) -> [Self; 4] {
    let [a, b, c, d] = self.0.adjacent();
    [Self(a), Self(b), Self(c), Self(d)]
  }

  /// The 4 corners on this face, ascending corner index.
  #[inline]
  pub fn corners(self) -> &'static [Corner; 4] {
    &FACE_CORNERS[self.index()]
  }

  pub fn corner_set(self) -> CornerSet {
    self.corners().iter().copied().collect()
  }

  /// The 4 edges bounding this face, ascending edge index.
  #[inline]
  pub fn edges(self) -> [Edge; 4] {
    FACE_EDGES[self.index()]
  }

  /// Outward unit normal.
  pub fn normal(self) -> IVec3 {
    self.0.to_ivec3()
  }
}

impl From<Direction> for Face {
  fn from(direction: Direction) -> Self {
    Self(direction)
  }
}

impl Element for Face {
  const SIZE: usize = 6;

  fn index(self) -> usize {
    Face::index(self)
  }

  fn all() -> &'static [Self] {
    &Self::ALL
  }
}

impl Facet for Face {
  type Corner = Corner;

  fn corners(self) -> &'static [Corner] {
    Face::corners(self)
  }
}

// =========================================================================
// Corner
// =========================================================================

/// A vertex of the unit cube, packed as `x | y << 1 | z << 2`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Corner(u8);

impl Corner {
  pub const SIZE: usize = 8;

  const ALL: [Self; 8] = [
    Self(0),
    Self(1),
    Self(2),
    Self(3),
    Self(4),
    Self(5),
    Self(6),
    Self(7),
  ];

  pub const fn new(x: bool, y: bool, z: bool) -> Self {
    Self(x as u8 | (y as u8) << 1 | (z as u8) << 2)
  }

  #[inline]
  pub const fn all() -> &'static [Self; 8] {
    &Self::ALL
  }

  #[inline]
  pub const fn index(self) -> usize {
    self.0 as usize
  }

  #[inline]
  const fn bit(self, axis: usize) -> bool {
    self.0 & corner_axis_bit(axis) != 0
  }

  #[inline]
  pub const fn x(self) -> bool {
    self.bit(0)
  }

  #[inline]
  pub const fn y(self) -> bool {
    self.bit(1)
  }

  #[inline]
  pub const fn z(self) -> bool {
    self.bit(2)
  }

  #[inline]
  pub const fn x_i(self) -> u32 {
    self.x() as u32
  }

  #[inline]
  pub const fn y_i(self) -> u32 {
    self.y() as u32
  }

  #[inline]
  pub const fn z_i(self) -> u32 {
    self.z() as u32
  }

  /// True when this corner lies on the face facing `direction`.
  #[inline]
  const fn on_face(self, direction: Direction) -> bool {
    self.bit(direction.axis()) == direction.positive()
  }

  /// Corner diagonally across the cube.
  #[inline]
  pub const fn opposite(self) -> Self {
    Self(!self.0 & CORNER_MASK)
  }

  /// Corners sharing an edge with this one: X, Y, then Z flipped.
  pub const fn adjacent(self) -> [Self; 3] {
    [
      Self(self.0 ^ corner_axis_bit(0)),
      Self(self.0 ^ corner_axis_bit(1)),
      Self(self.0 ^ corner_axis_bit(2)),
    ]
  }

  pub fn adjacent_set(self) -> CornerSet {
    self.adjacent().into_iter().collect()
  }

  /// Neighbor reached by flipping the coordinate along `direction`'s axis.
  #[inline]
  pub const fn adjacent_toward(self, direction: Direction) -> Self {
    Self(self.0 ^ corner_axis_bit(direction.axis()))
  }

  /// The three faces meeting at this corner: X side, Y side, Z side.
  pub const fn faces(self) -> [Face; 3] {
    [
      Face(Direction::from_axis(0, self.x())),
      Face(Direction::from_axis(1, self.y())),
      Face(Direction::from_axis(2, self.z())),
    ]
  }

  pub fn face_set(self) -> FaceSet {
    self.faces().into_iter().collect()
  }

  /// The three edges leaving this corner, in [`Corner::adjacent`] order.
  pub const fn edges(self) -> [Edge; 3] {
    let [a, b, c] = self.adjacent();
    [
      Edge::between(self, a),
      Edge::between(self, b),
      Edge::between(self, c),
    ]
  }

  /// Edge from this corner toward `direction`.
  #[inline]
  pub const fn edge_toward(self, direction: Direction) -> Edge {
    Edge::between(self, self.adjacent_toward(direction))
  }

  /// True when the corners differ in exactly one coordinate.
  #[inline]
  pub const fn is_adjacent(self, other: Self) -> bool {
    (self.0 ^ other.0).count_ones() == 1
  }

  /// Integer offset of this corner within the unit cube.
  pub fn offset(self) -> UVec3 {
    UVec3::new(self.x_i(), self.y_i(), self.z_i())
  }
}

impl Element for Corner {
  const SIZE: usize = 8;

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
    SmallVec::from_buf(Corner::adjacent(self))
  }
}

// =========================================================================
// Edge
// =========================================================================

/// Endpoints of each edge, lower corner index first.
const EDGE_PAIRS: [[Corner; 2]; 12] = generate_edge_corners();

static EDGE_CORNERS: [[Corner; 2]; 12] = EDGE_PAIRS;

const fn generate_edge_corners() -> [[Corner; 2]; 12] {
  let mut table = [[Corner(0); 2]; 12];
  let mut rep = 0;

  while rep < 4 {
    let from = Corner(EDGE_REPRESENTATIVES[rep]);
    let adjacent = from.adjacent();
    let mut j = 0;
    while j < 3 {
      let to = adjacent[j];
      table[rep * 3 + j] = if from.0 < to.0 { [from, to] } else { [to, from] };
      j += 1;
    }
    rep += 1;
  }

  table
}

/// Index of the edge joining two adjacent corners.
const fn edge_index(a: Corner, b: Corner) -> u8 {
  let (lo, hi) = if a.0 < b.0 { (a.0, b.0) } else { (b.0, a.0) };
  let mut edge = 0;
  while edge < 12 {
    let [first, second] = EDGE_PAIRS[edge];
    if first.0 == lo && second.0 == hi {
      return edge as u8;
    }
    edge += 1;
  }
  panic!("corner pair is not a cube edge")
}

/// An unordered pair of adjacent cube corners.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Edge(u8);

impl Edge {
  pub const SIZE: usize = 12;

  const ALL: [Self; 12] = [
    Self(0),
    Self(1),
    Self(2),
    Self(3),
    Self(4),
    Self(5),
    Self(6),
    Self(7),
    Self(8),
    Self(9),
    Self(10),
    Self(11),
  ];

  /// Caller guarantees adjacency.
  const fn between(a: Corner, b: Corner) -> Self {
    Self(edge_index(a, b))
  }

  /// Edge joining `a` and `b`; the corners must be distinct and adjacent.
  pub fn try_new(a: Corner, b: Corner) -> Result<Self, TopologyError> {
    if !a.is_adjacent(b) {
      return Err(TopologyError::NonAdjacentCorners {
        a: a.index(),
        b: b.index(),
      });
    }
    Ok(Self::between(a, b))
  }

  /// Edge joining `a` and `b`. Panics if they are not adjacent.
  pub fn new(a: Corner, b: Corner) -> Self {
    match Self::try_new(a, b) {
      Ok(edge) => edge,
      Err(err) => panic!("{err}"),
    }
  }

  #[inline]
  pub const fn all() -> &'static [Self; 12] {
    &Self::ALL
  }

  #[inline]
  pub const fn index(self) -> usize {
    self.0 as usize
  }

  /// Endpoints, lower corner index first.
  #[inline]
  pub fn corners(self) -> &'static [Corner; 2] {
    &EDGE_CORNERS[self.index()]
  }

  pub fn corner_set(self) -> CornerSet {
    self.corners().iter().copied().collect()
  }

  /// Axis the edge runs along (0 = X, 1 = Y, 2 = Z).
  pub fn axis(self) -> usize {
    let [a, b] = *self.corners();
    (a.0 ^ b.0).trailing_zeros() as usize
  }

  /// The 4 edges sharing exactly one corner with this one: those at the
  /// lower corner first, then those at the upper corner.
  pub fn adjacent(self) -> [Self; 4] {
    let mut result = [self; 4];
    let mut found = 0;
    for corner in self.corners() {
      for edge in corner.edges() {
        if edge != self {
          result[found] = edge;
          found += 1;
        }
      }
    }
    debug_assert_eq!(found, 4);
    result
  }

  /// The 2 faces containing this edge, ascending face index.
  pub fn faces(self) -> [Face; 2] {
    let axis = self.axis();
    let corner = self.corners()[0];
    let [a, b] = [(axis + 1) % 3, (axis + 2) % 3];
    let first = Face(Direction::from_axis(a, corner.bit(a)));
    let second = Face(Direction::from_axis(b, corner.bit(b)));
    if first.index() < second.index() {
      [first, second]
    } else {
      [second, first]
    }
  }
}

impl Element for Edge {
  const SIZE: usize = 12;

  fn index(self) -> usize {
    Edge::index(self)
  }

  fn all() -> &'static [Self] {
    &Self::ALL
  }
}

#[cfg(test)]
#[path = "cube_test.rs"]
mod cube_test;
