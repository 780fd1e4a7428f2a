//! Benchmarks for subdivision tree workloads.
//!
//! - **split_join**: refine a full tree to a fixed depth, then collapse it
//! - **walk**: pre-order walk of a full tree built from cursor moves
//! - **face_walk**: descend only through one cube face

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use cube_tree::topology::cube::Direction;
use cube_tree::{NodeId, Octree, QuadTree};

/// Split every leaf until the tree is `depth` levels deep.
fn build_full_octree(depth: usize) -> Octree<u32> {
  let mut tree = Octree::new(0);
  let mut frontier = vec![tree.root()];
  for _ in 0..depth {
    let mut next = Vec::with_capacity(frontier.len() * 8);
    for id in frontier {
      next.extend(tree.split(id));
    }
    frontier = next;
  }
  tree
}

fn count_preorder(tree: &Octree<u32>, start: NodeId) -> usize {
  let mut count = 0;
  let mut stack = vec![tree.cursor(start)];
  while let Some(cursor) = stack.pop() {
    count += 1;
    let mut child = cursor.first_child();
    while child.valid() {
      stack.push(child);
      child = child.next_sibling();
    }
  }
  count
}

// ============================================================================
// Split / join
// ============================================================================

fn bench_split_join(c: &mut Criterion) {
  let mut group = c.benchmark_group("octree_split_join");

  for depth in [2usize, 3, 4] {
    let nodes = (0..=depth).map(|level| 8u64.pow(level as u32)).sum::<u64>();
    group.throughput(Throughput::Elements(nodes));
    group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
      b.iter(|| {
        let mut tree = build_full_octree(depth);
        let root = tree.root();
        black_box(tree.join(root))
      })
    });
  }

  group.finish();
}

/// Deep single-path refinement, the shape LOD refinement produces near a camera.
fn bench_deep_chain(c: &mut Criterion) {
  c.bench_function("quadtree_chain_1024", |b| {
    b.iter(|| {
      let mut tree = QuadTree::<u8>::new(0);
      let root = tree.root();
      let mut tip = root;
      for _ in 0..1024 {
        tip = tree.split(tip)[3];
      }
      black_box(tree.join(root))
    })
  });
}

// ============================================================================
// Traversal
// ============================================================================

fn bench_walk(c: &mut Criterion) {
  let tree = build_full_octree(4);
  let root = tree.root();

  c.bench_function("octree_preorder_depth_4", |b| {
    b.iter(|| black_box(count_preorder(&tree, root)))
  });

  c.bench_function("octree_face_walk_depth_4", |b| {
    b.iter(|| {
      let mut count = 0;
      let mut stack = vec![tree.face_cursor(root, Direction::POS_X.face())];
      while let Some(cursor) = stack.pop() {
        count += 1;
        let mut child = cursor.first_child();
        while child.valid() {
          stack.push(child);
          child = child.next_sibling();
        }
      }
      black_box(count)
    })
  });
}

criterion_group!(benches, bench_split_join, bench_deep_chain, bench_walk);
criterion_main!(benches);
