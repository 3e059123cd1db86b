//! Build, query and verification parameters.

use crate::{MerkleRTreeError, SortOrder};

/// Fan-out used when none is given.
pub const DEFAULT_CAPACITY: usize = 16;

/// Verification objects nested deeper than this are rejected by default.
///
/// A capacity-2 tree over `u32::MAX` points is 32 levels high.
pub const MAX_PROOF_DEPTH: usize = 64;

/// Parameters for bulk loading.
#[derive(Debug, Clone, Copy)]
pub struct TreeConfig {
    /// Maximum number of points per leaf and of children per internal node.
    pub capacity: usize,
    /// Ordering applied to the points before they are chunked into leaves.
    pub order: SortOrder,
}

impl Default for TreeConfig {
    fn default() -> Self {
        TreeConfig {
            capacity: DEFAULT_CAPACITY,
            order: SortOrder::default(),
        }
    }
}

impl TreeConfig {
    /// Config with the given capacity and lexicographic ordering.
    pub fn new(capacity: usize) -> Self {
        TreeConfig {
            capacity,
            order: SortOrder::default(),
        }
    }

    /// Replace the ordering strategy.
    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    /// Check that a tree over `point_count` points can be built.
    ///
    /// A capacity of one never shrinks a level, so it is only accepted when
    /// there is at most one point.
    pub fn validate(&self, point_count: usize) -> Result<(), MerkleRTreeError> {
        if self.capacity == 0 {
            return Err(MerkleRTreeError::InvalidInput(
                "capacity must be at least 1".to_string(),
            ));
        }
        if self.capacity == 1 && point_count > 1 {
            return Err(MerkleRTreeError::InvalidInput(format!(
                "capacity 1 cannot index {} points, need at least 2",
                point_count
            )));
        }
        Ok(())
    }
}

/// What the proof generator does with a leaf.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LeafPolicy {
    /// Disclose every reached leaf in full, whether or not its rectangle
    /// meets the query. This is the compatible behaviour.
    #[default]
    AlwaysDisclose,
    /// Replace leaves whose rectangle misses the query with a
    /// rectangle + digest placeholder, like internal nodes.
    PruneDisjoint,
}

/// Parameters for proof generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryOptions {
    pub leaf_policy: LeafPolicy,
}

impl QueryOptions {
    /// Options that also prune leaves missing the query.
    pub fn strict() -> Self {
        QueryOptions {
            leaf_policy: LeafPolicy::PruneDisjoint,
        }
    }
}

/// Limits enforced while verifying a proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifyOptions {
    /// Maximum nesting of `Explored` nodes.
    pub max_depth: usize,
    /// When set, leaves with more points or `Explored` nodes with more
    /// children than this are malformed.
    pub max_fanout: Option<usize>,
}

impl Default for VerifyOptions {
    fn default() -> Self {
        VerifyOptions {
            max_depth: MAX_PROOF_DEPTH,
            max_fanout: None,
        }
    }
}

impl VerifyOptions {
    /// Options bounding fan-out by the capacity the tree was built with.
    pub fn for_capacity(capacity: usize) -> Self {
        VerifyOptions {
            max_fanout: Some(capacity),
            ..Default::default()
        }
    }
}
