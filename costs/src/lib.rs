#![deny(missing_docs)]
//! Counters describing the work done by tree construction, range proof
//! generation and proof verification.
//!
//! Every core operation of the Merkle R-tree hands its value back wrapped in
//! a [`CostContext`]. The counters are bookkeeping only: reading or
//! discarding them never changes the wrapped value.

mod context;

use std::ops::{Add, AddAssign};

pub use context::{CostContext, CostResult, CostsExt};

/// Work performed by a single operation (or an accumulation of several).
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct OperationCost {
    /// Nodes reached while walking the tree or a verification object.
    pub nodes_visited: u64,
    /// Subtrees replaced by (or consumed as) a rectangle + digest
    /// placeholder.
    pub nodes_pruned: u64,
    /// Points copied into a proof or checked against the query rectangle.
    pub points_examined: u64,
    /// Points that satisfied the query rectangle during verification.
    pub points_returned: u64,
    /// How many node digests were computed.
    pub hash_node_calls: u64,
    /// How many bytes were fed to the hash function.
    pub hashed_bytes: u64,
}

impl OperationCost {
    /// Helper function to build default `OperationCost` with different
    /// `nodes_visited`.
    pub fn with_nodes_visited(nodes_visited: u64) -> Self {
        OperationCost {
            nodes_visited,
            ..Default::default()
        }
    }

    /// Helper function to build default `OperationCost` with different
    /// `nodes_pruned`.
    pub fn with_nodes_pruned(nodes_pruned: u64) -> Self {
        OperationCost {
            nodes_pruned,
            ..Default::default()
        }
    }

    /// Cost of hashing one node whose canonical serialization is
    /// `hashed_bytes` long.
    pub fn with_node_hash(hashed_bytes: u64) -> Self {
        OperationCost {
            hash_node_calls: 1,
            hashed_bytes,
            ..Default::default()
        }
    }

    /// `nodes_pruned / (nodes_visited + nodes_pruned)`.
    ///
    /// A pruned node is counted as visited too, so a walk that prunes every
    /// node it reaches scores `0.5`. Returns `0.0` when nothing was reached.
    pub fn pruning_ratio(&self) -> f64 {
        let total = self.nodes_visited + self.nodes_pruned;
        if total == 0 {
            0.0
        } else {
            self.nodes_pruned as f64 / total as f64
        }
    }

    /// `true` if no counter was touched.
    pub fn is_zero(&self) -> bool {
        *self == OperationCost::default()
    }
}

impl Add for OperationCost {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        OperationCost {
            nodes_visited: self.nodes_visited + rhs.nodes_visited,
            nodes_pruned: self.nodes_pruned + rhs.nodes_pruned,
            points_examined: self.points_examined + rhs.points_examined,
            points_returned: self.points_returned + rhs.points_returned,
            hash_node_calls: self.hash_node_calls + rhs.hash_node_calls,
            hashed_bytes: self.hashed_bytes + rhs.hashed_bytes,
        }
    }
}

impl AddAssign for OperationCost {
    fn add_assign(&mut self, rhs: Self) {
        self.nodes_visited += rhs.nodes_visited;
        self.nodes_pruned += rhs.nodes_pruned;
        self.points_examined += rhs.points_examined;
        self.points_returned += rhs.points_returned;
        self.hash_node_calls += rhs.hash_node_calls;
        self.hashed_bytes += rhs.hashed_bytes;
    }
}
