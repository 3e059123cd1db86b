//! Range proof generation.
//!
//! A `VerificationObject` mirrors the part of the tree a range query had to
//! look at. Reached leaves are disclosed in full, internal nodes whose
//! rectangle misses the query are cut down to their rectangle and digest, and
//! every other internal node is explored child by child, in order.
//!
//! Soundness of the cut rests on the node rectangle being the exact union of
//! its content: a subtree whose rectangle misses the query cannot hold a
//! matching point.
//!
//! The root is never cut. Its rectangle is not part of any digest, so a root
//! placeholder could claim any rectangle; an internal root is always explored
//! and a leaf root always disclosed.

use bincode::{Decode, Encode};
use merkle_rtree_costs::{CostResult, CostsExt, OperationCost};
use tracing::debug;

use crate::{LeafPolicy, MerkleRTreeError, Node, Point, QueryOptions, Rect, hash::Digest};


/// Upper bound accepted when decoding a proof.
const MAX_ENCODED_PROOF_BYTES: usize = 100 * 1024 * 1024;

/// The proof a server returns for a range query.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VerificationObject {
    /// Every point of a leaf, in stored order.
    DisclosedLeaf(Vec<Point>),
    /// A subtree that cannot contain a match, given by rectangle and digest.
    Pruned { rect: Rect, digest: Digest },
    /// One child proof per child of an internal node, in child order.
    Explored(Vec<VerificationObject>),
}

impl VerificationObject {
    /// Generate the proof answering `query` over the tree under `root`.
    ///
    /// The query rectangle is validated before anything else; an inverted
    /// rectangle is rejected with `InvalidInput`.
    pub fn generate(
        root: &Node,
        query: &Rect,
        options: &QueryOptions,
    ) -> CostResult<Self, MerkleRTreeError> {
        let mut cost = OperationCost::default();
        if let Err(e) = query.validate() {
            return Err(e).wrap_with_cost(cost);
        }
        let vo = generate_root(root, query, options, &mut cost);
        debug!(
            query = %query,
            visited = cost.nodes_visited,
            pruned = cost.nodes_pruned,
            disclosed_points = cost.points_examined,
            "generated range proof"
        );
        Ok(vo).wrap_with_cost(cost)
    }

    /// Number of points disclosed by the proof, matching or not.
    pub fn disclosed_point_count(&self) -> usize {
        match self {
            VerificationObject::DisclosedLeaf(points) => points.len(),
            VerificationObject::Pruned { .. } => 0,
            VerificationObject::Explored(children) => children
                .iter()
                .map(VerificationObject::disclosed_point_count)
                .sum(),
        }
    }

    /// Number of pruned placeholders in the proof.
    pub fn pruned_count(&self) -> usize {
        match self {
            VerificationObject::DisclosedLeaf(_) => 0,
            VerificationObject::Pruned { .. } => 1,
            VerificationObject::Explored(children) => {
                children.iter().map(VerificationObject::pruned_count).sum()
            }
        }
    }

    /// Nesting depth, counting a bare leaf or placeholder as 1.
    pub fn depth(&self) -> usize {
        match self {
            VerificationObject::Explored(children) => {
                1 + children
                    .iter()
                    .map(VerificationObject::depth)
                    .max()
                    .unwrap_or(0)
            }
            _ => 1,
        }
    }

    /// Encode to bytes using bincode.
    pub fn encode_to_vec(&self) -> Result<Vec<u8>, MerkleRTreeError> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_no_limit();
        bincode::encode_to_vec(self, config)
            .map_err(|e| MerkleRTreeError::EncodingError(format!("encode error: {}", e)))
    }

    /// Decode from bytes using bincode.
    ///
    /// Only the encoding is checked here; the shape is checked when the proof
    /// is verified.
    pub fn decode_from_slice(bytes: &[u8]) -> Result<Self, MerkleRTreeError> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_limit::<MAX_ENCODED_PROOF_BYTES>();
        let (vo, read): (Self, usize) = bincode::decode_from_slice(bytes, config)
            .map_err(|e| MerkleRTreeError::EncodingError(format!("decode error: {}", e)))?;
        if read != bytes.len() {
            return Err(MerkleRTreeError::EncodingError(format!(
                "{} trailing bytes after proof",
                bytes.len() - read
            )));
        }
        Ok(vo)
    }
}

/// Generate the proof answering `query` with the default leaf policy.
pub fn range_query(root: &Node, query: &Rect) -> CostResult<VerificationObject, MerkleRTreeError> {
    VerificationObject::generate(root, query, &QueryOptions::default())
}

fn generate_root(
    root: &Node,
    query: &Rect,
    options: &QueryOptions,
    cost: &mut OperationCost,
) -> VerificationObject {
    cost.nodes_visited += 1;
    match root {
        Node::Leaf(leaf) => {
            cost.points_examined += leaf.len() as u64;
            VerificationObject::DisclosedLeaf(leaf.points().to_vec())
        }
        Node::Internal(internal) => VerificationObject::Explored(
            internal
                .children()
                .iter()
                .map(|child| generate_node(child, query, options, cost))
                .collect(),
        ),
    }
}

fn generate_node(
    node: &Node,
    query: &Rect,
    options: &QueryOptions,
    cost: &mut OperationCost,
) -> VerificationObject {
    cost.nodes_visited += 1;
    match node {
        Node::Leaf(leaf) => {
            if options.leaf_policy == LeafPolicy::PruneDisjoint && !leaf.rect().intersects(query) {
                cost.nodes_pruned += 1;
                return VerificationObject::Pruned {
                    rect: *leaf.rect(),
                    digest: *leaf.digest(),
                };
            }
            cost.points_examined += leaf.len() as u64;
            VerificationObject::DisclosedLeaf(leaf.points().to_vec())
        }
        Node::Internal(internal) => {
            if !internal.rect().intersects(query) {
                cost.nodes_pruned += 1;
                return VerificationObject::Pruned {
                    rect: *internal.rect(),
                    digest: *internal.digest(),
                };
            }
            VerificationObject::Explored(
                internal
                    .children()
                    .iter()
                    .map(|child| generate_node(child, query, options, cost))
                    .collect(),
            )
        }
    }
}
