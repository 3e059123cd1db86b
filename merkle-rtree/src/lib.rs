//! Merkle R-tree: an authenticated, bulk-loaded spatial index over 2D points.
//!
//! The party holding the tree answers axis-aligned range queries with a
//! [`VerificationObject`]. A client that only knows the root digest can
//! replay the hashing over that proof and learn exactly the points inside the
//! query, with any omission, fabrication or reordering showing up as a root
//! mismatch.
//!
//! Node digests use Blake3 over a canonical big-endian serialization:
//!
//! - leaf: `blake3(0x00 || id || x || y || ...)`
//! - internal: `blake3(0x01 || lx || ly || ux || uy || child_digest || ...)`
//!
//! ```
//! use merkle_rtree::{MerkleRTree, Point, Rect, TreeConfig};
//!
//! let points = vec![Point::new(1, 0, 0), Point::new(2, 10, 10), Point::new(3, 20, 20)];
//! let tree = MerkleRTree::build(points, TreeConfig::new(2)).unwrap().unwrap();
//! let trusted_root = tree.root_digest().unwrap();
//!
//! let query = Rect::new(5, 5, 15, 15).unwrap();
//! let proof = tree.query(&query).unwrap().unwrap().unwrap();
//! let result = proof.verify_against(&query, &trusted_root).unwrap().unwrap();
//! assert_eq!(result.points, vec![Point::new(2, 10, 10)]);
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod geometry;
pub mod hash;
mod node;
pub mod ordering;
pub(crate) mod proof;
pub(crate) mod tree;
mod verify;

#[cfg(test)]
pub(crate) mod test_utils;

pub use config::{
    DEFAULT_CAPACITY, LeafPolicy, MAX_PROOF_DEPTH, QueryOptions, TreeConfig, VerifyOptions,
};
pub use error::MerkleRTreeError;
pub use geometry::{Point, Rect};
pub use hash::{DIGEST_LEN, Digest};
pub use merkle_rtree_costs::{CostContext, CostResult, CostsExt, OperationCost};
pub use node::{InternalNode, LeafNode, Node, TreeStats};
pub use ordering::SortOrder;
pub use proof::{VerificationObject, range_query};
pub use tree::{MerkleRTree, build};
pub use verify::{VerificationResult, verify_range_proof};
