//! Contract violations raised by topology construction and indexing.
//!
//! All variants describe programmer errors. The plain constructors panic with
//! the `Display` text of these errors; the `try_*` forms hand them back so the
//! embedding application can pick its own abort boundary.

use thiserror::Error;

/// Invalid input to a topology constructor or index lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum TopologyError {
  /// Axis components must each be in {-1, 0, 1} with exactly one nonzero.
  #[error("invalid direction ({x}, {y}, {z}): expected exactly one component equal to +-1")]
  InvalidDirection { x: i32, y: i32, z: i32 },

  /// Edges connect two distinct corners that differ in exactly one coordinate.
  #[error("corners {a} and {b} are not adjacent")]
  NonAdjacentCorners { a: usize, b: usize },

  /// Element index outside `[0, size)`.
  #[error("index {index} out of range for {size} elements")]
  OutOfRange { index: usize, size: usize },
}

impl TopologyError {
  /// Range check shared by every `from_index` style lookup.
  #[inline]
  pub(crate) fn check_index(index: usize, size: usize) -> Result<(), TopologyError> {
    if index < size {
      Ok(())
    } else {
      Err(TopologyError::OutOfRange { index, size })
    }
  }
}
