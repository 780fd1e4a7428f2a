//! ElementSet - fixed-capacity membership set over one topology element kind.
//!
//! Membership is a bit pattern: bit `i` is set iff the element with
//! `index() == i` is a member. Capacity is `E::SIZE` (at most 32).

use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ops::{BitOr, BitOrAssign};

use super::Element;
use crate::error::TopologyError;

/// Set of topology elements of kind `E`.
pub struct ElementSet<E> {
  bits: u32,
  _marker: PhantomData<E>,
}

impl<E: Element> ElementSet<E> {
  const FITS_IN_MASK: () = assert!(E::SIZE <= 32, "element kind too large for ElementSet");

  /// Empty set.
  pub fn new() -> Self {
    let () = Self::FITS_IN_MASK;
    Self {
      bits: 0,
      _marker: PhantomData,
    }
  }

  /// Set holding every element of kind `E`.
  pub fn full() -> Self {
    E::all().iter().copied().collect()
  }

  /// Raw membership bits (bit `i` = element with index `i`).
  #[inline]
  pub fn bits(&self) -> u32 {
    self.bits
  }

  /// Add `element`. Returns true if it was not already present.
  pub fn insert(&mut self, element: E) -> bool {
    let index = element.index();
    debug_assert!(index < E::SIZE);
    let mask = 1u32 << index;
    let added = self.bits & mask == 0;
    self.bits |= mask;
    added
  }

  /// Union of two sets.
  #[inline]
  pub fn union(self, other: Self) -> Self {
    Self {
      bits: self.bits | other.bits,
      _marker: PhantomData,
    }
  }

  #[inline]
  pub fn contains(&self, element: E) -> bool {
    self.contains_index(element.index())
  }

  /// Membership by raw index. Panics if `index >= E::SIZE`.
  pub fn contains_index(&self, index: usize) -> bool {
    match self.try_contains_index(index) {
      Ok(found) => found,
      Err(err) => panic!("{err}"),
    }
  }

  /// Membership by raw index, rejecting `index >= E::SIZE`.
  pub fn try_contains_index(&self, index: usize) -> Result<bool, TopologyError> {
    TopologyError::check_index(index, E::SIZE)?;
    Ok(self.bits & (1u32 << index) != 0)
  }

  /// Number of members.
  #[inline]
  pub fn len(&self) -> usize {
    self.bits.count_ones() as usize
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.bits == 0
  }

  pub fn clear(&mut self) {
    self.bits = 0;
  }

  /// Members in ascending index order.
  pub fn iter(&self) -> Iter<'_, E> {
    Iter::new(self)
  }
}

impl<E> Clone for ElementSet<E> {
  fn clone(&self) -> Self {
    *self
  }
}

impl<E> Copy for ElementSet<E> {}

impl<E> PartialEq for ElementSet<E> {
  fn eq(&self, other: &Self) -> bool {
    self.bits == other.bits
  }
}

impl<E> Eq for ElementSet<E> {}

impl<E> Hash for ElementSet<E> {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.bits.hash(state);
  }
}

impl<E: Element> Default for ElementSet<E> {
  fn default() -> Self {
    Self::new()
  }
}

impl<E: Element> fmt::Debug for ElementSet<E> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_set().entries(self.iter()).finish()
  }
}

impl<E: Element> From<E> for ElementSet<E> {
  fn from(element: E) -> Self {
    let mut set = Self::new();
    set.insert(element);
    set
  }
}

impl<E: Element> FromIterator<E> for ElementSet<E> {
  fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
    let mut set = Self::new();
    set.extend(iter);
    set
  }
}

impl<E: Element> Extend<E> for ElementSet<E> {
  fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
    for element in iter {
      self.insert(element);
    }
  }
}

impl<E: Element> BitOr for ElementSet<E> {
  type Output = Self;

  fn bitor(self, rhs: Self) -> Self {
    self.union(rhs)
  }
}

impl<E: Element> BitOr<E> for ElementSet<E> {
  type Output = Self;

  fn bitor(mut self, rhs: E) -> Self {
    self.insert(rhs);
    self
  }
}

impl<E: Element> BitOrAssign for ElementSet<E> {
  fn bitor_assign(&mut self, rhs: Self) {
    self.bits |= rhs.bits;
  }
}

impl<E: Element> BitOrAssign<E> for ElementSet<E> {
  fn bitor_assign(&mut self, rhs: E) {
    self.insert(rhs);
  }
}

impl<'a, E: Element> IntoIterator for &'a ElementSet<E> {
  type Item = E;
  type IntoIter = Iter<'a, E>;

  fn into_iter(self) -> Iter<'a, E> {
    self.iter()
  }
}

/// Index-skipping cursor over the members of an [`ElementSet`].
///
/// Starts at the lowest member (or at the end position when the set is
/// empty). Two cursors are equal when they walk the same set and sit on the
/// same index, or when both are exhausted.
pub struct Iter<'a, E> {
  set: &'a ElementSet<E>,
  index: usize,
}

impl<'a, E: Element> Iter<'a, E> {
  fn new(set: &'a ElementSet<E>) -> Self {
    Self {
      set,
      index: Self::first_member_from(set.bits, 0),
    }
  }

  /// Lowest member index `>= start`, or `E::SIZE`.
  fn first_member_from(bits: u32, start: usize) -> usize {
    match bits.checked_shr(start as u32).unwrap_or(0) {
      0 => E::SIZE,
      rest => start + rest.trailing_zeros() as usize,
    }
  }

  /// Index of the member this cursor will yield next, if any.
  pub fn position(&self) -> Option<usize> {
    (self.index < E::SIZE).then_some(self.index)
  }

  pub fn is_end(&self) -> bool {
    self.index >= E::SIZE
  }
}

impl<E> Clone for Iter<'_, E> {
  fn clone(&self) -> Self {
    Self {
      set: self.set,
      index: self.index,
    }
  }
}

impl<E: Element> Iterator for Iter<'_, E> {
  type Item = E;

  fn next(&mut self) -> Option<E> {
    if self.is_end() {
      return None;
    }
    let current = E::from_index(self.index);
    self.index = Self::first_member_from(self.set.bits, self.index + 1);
    Some(current)
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    let remaining = self.set.bits.checked_shr(self.index as u32).unwrap_or(0).count_ones() as usize;
    (remaining, Some(remaining))
  }
}

impl<E: Element> ExactSizeIterator for Iter<'_, E> {}

impl<E: Element> FusedIterator for Iter<'_, E> {}

impl<E: Element> PartialEq for Iter<'_, E> {
  fn eq(&self, other: &Self) -> bool {
    (self.is_end() && other.is_end())
      || (std::ptr::eq(self.set, other.set) && self.index == other.index)
  }
}

impl<E: Element> fmt::Debug for Iter<'_, E> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Iter")
      .field("set", self.set)
      .field("position", &self.position())
      .finish()
  }
}

#[cfg(test)]
#[path = "set_test.rs"]
mod set_test;
