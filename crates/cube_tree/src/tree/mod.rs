//! Corner-keyed subdivision tree (quadtree / octree) and its cursors.
//!
//! A [`Tree`] starts as a single leaf root. `split()` gives a leaf one child
//! per corner of the key type; `join()` collapses a node back to a leaf.
//!
//! # Level Convention
//!
//! Level 0 = root, each split adds one level. A node at level `L` covers
//! `1 / 2^L` of its root's extent along every axis.
//!
//! # Module Structure
//!
//! - [`node`]: `Tree`, `Node`, `NodeId` - arena storage, split/join
//! - [`cursor`]: `TreeCursor` - parent / first child / next sibling over all
//!   children
//! - [`face_cursor`]: `FaceCursor` - the same moves restricted to the children
//!   on one facet (cube face or square edge)
//!
//! Full walks are composed from the cursor moves by the caller.

pub mod cursor;
pub mod face_cursor;
pub mod node;

// Re-exports
pub use cursor::TreeCursor;
pub use face_cursor::FaceCursor;
pub use node::{Node, NodeId, Octree, QuadTree, Tree};
