//! cube_tree - Square/cube boundary topology and corner-keyed subdivision
//!
//! This crate provides the geometric bookkeeping behind quadtree and octree
//! level-of-detail schemes: canonical indexing of the corners, directions,
//! edges and faces of the unit square and cube, and a subdivision tree whose
//! children are addressed by corner.
//!
//! # Features
//!
//! - **Topology**: `const` tables for the N=2 and N=3 boundary complex, with
//!   opposite/adjacent derivation by bit manipulation
//! - **ElementSet**: fixed-capacity bit set over any topology element
//! - **Tree**: arena-backed quadtree/octree with all-or-nothing `split()` and
//!   iterative `join()`
//! - **Cursors**: parent / first-child / next-sibling navigation over all
//!   children or over the children on one cube face
//!
//! # Example
//!
//! ```ignore
//! use cube_tree::topology::cube::{Corner, Direction};
//! use cube_tree::Octree;
//!
//! let mut tree = Octree::new(0u32);
//! let root = tree.root();
//! tree.split(root);
//!
//! let corner = tree.child(root, Corner::new(true, true, true));
//! tree[corner] = 7;
//!
//! // Walk the 4 children on the +X face
//! let mut cursor = tree.face_cursor(root, Direction::POS_X.face()).first_child();
//! while cursor.valid() {
//!     println!("{:?} -> {}", cursor.node().corner(), cursor.value());
//!     cursor = cursor.next_sibling();
//! }
//! ```

pub mod error;
pub mod topology;

// Re-export commonly used items
pub use error::TopologyError;
pub use topology::{CornerKey, Element, ElementSet, Facet};

// Subdivision tree and cursors
pub mod tree;
pub use tree::{FaceCursor, Node, NodeId, Octree, QuadTree, Tree, TreeCursor};

// Engine-agnostic statistics
pub mod metrics;
pub use metrics::TreeMetrics;
