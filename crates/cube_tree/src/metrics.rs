//! Subdivision statistics for a single tree.
//!
//! Feature-gated and runtime-toggled to ensure zero overhead when disabled.
//!
//! # Usage
//!
//! ```ignore
//! use cube_tree::metrics::COLLECT_METRICS;
//!
//! // Compile with --features metrics
//! // Runtime toggle:
//! COLLECT_METRICS.store(false, Ordering::Relaxed);
//!
//! // Every tree records into its own TreeMetrics:
//! let live = tree.metrics().live_nodes();
//! ```
//!
//! The toggle is read once, when a tree is built. Flipping it later only
//! affects trees built afterwards, so a tree never counts half of its
//! creations and releases.

#[cfg(feature = "metrics")]
use std::sync::atomic::Ordering;
use std::sync::atomic::AtomicBool;

/// Number of per-level buckets. Deeper levels share the last bucket.
pub const LEVEL_BUCKETS: usize = 16;

/// Runtime toggle for metrics collection.
/// Set to false to disable metrics gathering at runtime.
pub static COLLECT_METRICS: AtomicBool = AtomicBool::new(true);

/// Check if metrics collection is enabled (both compile-time and runtime).
#[inline]
pub fn is_enabled() -> bool {
    #[cfg(feature = "metrics")]
    {
        COLLECT_METRICS.load(Ordering::Relaxed)
    }
    #[cfg(not(feature = "metrics"))]
    {
        false
    }
}

#[inline]
fn bucket(level: usize) -> usize {
    level.min(LEVEL_BUCKETS - 1)
}

/// Split/join counters and the live-node distribution across levels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeMetrics {
    /// Leaf -> internal transitions.
    pub splits: u64,
    /// Internal -> leaf transitions.
    pub joins: u64,
    /// Nodes allocated, root included.
    pub nodes_created: u64,
    /// Nodes released by joins.
    pub nodes_released: u64,
    /// Live nodes at each level (index = level).
    pub live_per_level: [u32; LEVEL_BUCKETS],
    /// Snapshot of [`is_enabled`] taken at construction.
    enabled: bool,
}

impl Default for TreeMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeMetrics {
    /// Create zeroed metrics, collecting if [`is_enabled`] right now.
    pub fn new() -> Self {
        Self::with_collection(is_enabled())
    }

    pub(crate) fn with_collection(enabled: bool) -> Self {
        Self {
            splits: 0,
            joins: 0,
            nodes_created: 0,
            nodes_released: 0,
            live_per_level: [0; LEVEL_BUCKETS],
            enabled,
        }
    }

    /// Whether this instance records anything.
    pub fn is_collecting(&self) -> bool {
        self.enabled
    }

    /// Reset all counters to zero. Collection stays as it was.
    pub fn reset(&mut self) {
        *self = Self::with_collection(self.enabled);
    }

    /// Record a node allocated at `level`.
    pub fn record_created(&mut self, level: usize) {
        if !self.enabled {
            return;
        }
        self.nodes_created += 1;
        self.live_per_level[bucket(level)] += 1;
    }

    pub fn record_split(&mut self) {
        if self.enabled {
            self.splits += 1;
        }
    }

    /// Record a node released from `level`.
    pub fn record_released(&mut self, level: usize) {
        if !self.enabled {
            return;
        }
        self.nodes_released += 1;
        let slot = &mut self.live_per_level[bucket(level)];
        *slot = slot.saturating_sub(1);
    }

    pub fn record_join(&mut self) {
        if self.enabled {
            self.joins += 1;
        }
    }

    /// Get the total live node count across all levels.
    pub fn live_nodes(&self) -> u32 {
        self.live_per_level.iter().sum()
    }

    /// Deepest bucket holding a live node.
    pub fn deepest_level(&self) -> Option<usize> {
        self.live_per_level.iter().rposition(|&count| count > 0)
    }
}
