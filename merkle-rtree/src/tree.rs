//! Bulk loading.
//!
//! Points are sorted once, cut into leaves of at most `capacity` points, and
//! the tree is then built level by level: each level is cut into runs of at
//! most `capacity` nodes, one internal node per run, until a single node is
//! left. That node is the root.

use merkle_rtree_costs::{CostResult, CostsExt, OperationCost, cost_return_on_error};
use tracing::debug;

use crate::{
    InternalNode, LeafNode, MerkleRTreeError, Node, Point, QueryOptions, Rect, TreeConfig,
    TreeStats, VerificationObject, VerificationResult,
    hash::{Digest, digest_hex},
};

/// Build the tree for `points`.
///
/// Returns `Ok(None)` for an empty point set: that is an empty tree, not an
/// error. The same points in the same input order, with the same config,
/// always yield the same tree and digests.
pub fn build(points: Vec<Point>, config: &TreeConfig) -> CostResult<Option<Node>, MerkleRTreeError> {
    let mut cost = OperationCost::default();

    if let Err(e) = config.validate(points.len()) {
        return Err(e).wrap_with_cost(cost);
    }
    if points.is_empty() {
        return Ok(None).wrap_with_cost(cost);
    }

    let point_count = points.len();
    let capacity = config.capacity;
    let mut sorted = points;
    config.order.sort(&mut sorted);

    let mut level: Vec<Node> = Vec::with_capacity(point_count.div_ceil(capacity));
    for chunk in sorted.chunks(capacity) {
        let leaf = cost_return_on_error!(&mut cost, LeafNode::new(chunk.to_vec()));
        level.push(leaf.into());
    }
    let leaf_count = level.len();

    let mut height = 1;
    while level.len() > 1 {
        let mut next = Vec::with_capacity(level.len().div_ceil(capacity));
        let mut nodes = level.into_iter().peekable();
        while nodes.peek().is_some() {
            let chunk: Vec<Node> = nodes.by_ref().take(capacity).collect();
            let internal = cost_return_on_error!(&mut cost, InternalNode::new(chunk));
            next.push(internal.into());
        }
        level = next;
        height += 1;
    }

    let Some(root) = level.pop() else {
        return Ok(None).wrap_with_cost(cost);
    };
    debug!(
        points = point_count,
        leaves = leaf_count,
        height,
        root = %digest_hex(root.digest()),
        "built merkle r-tree"
    );
    Ok(Some(root)).wrap_with_cost(cost)
}

/// An owned, read-only Merkle R-tree.
///
/// Once built the tree never changes, so it can be shared between any number
/// of threads answering queries.
#[derive(Debug, Clone)]
pub struct MerkleRTree {
    root: Option<Node>,
    config: TreeConfig,
}

impl MerkleRTree {
    /// Bulk load `points` with `config`.
    pub fn build(points: Vec<Point>, config: TreeConfig) -> CostResult<Self, MerkleRTreeError> {
        build(points, &config).map_ok(|root| MerkleRTree { root, config })
    }

    /// The root node, `None` for an empty tree.
    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    /// The digest to publish to verifying clients, `None` for an empty tree.
    pub fn root_digest(&self) -> Option<Digest> {
        self.root.as_ref().map(|root| *root.digest())
    }

    /// Bounding rectangle of all points, [`Rect::EMPTY`] for an empty tree.
    pub fn bounds(&self) -> Rect {
        self.root.as_ref().map_or(Rect::EMPTY, |root| *root.rect())
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Number of indexed points.
    pub fn len(&self) -> usize {
        self.root.as_ref().map_or(0, Node::point_count)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn stats(&self) -> TreeStats {
        self.root.as_ref().map(Node::stats).unwrap_or_default()
    }

    /// Answer `query` with a verification object, using the default leaf
    /// policy. `None` for an empty tree.
    pub fn query(&self, query: &Rect) -> CostResult<Option<VerificationObject>, MerkleRTreeError> {
        self.query_with_options(query, &QueryOptions::default())
    }

    /// Answer `query` with a verification object. `None` for an empty tree.
    pub fn query_with_options(
        &self,
        query: &Rect,
        options: &QueryOptions,
    ) -> CostResult<Option<VerificationObject>, MerkleRTreeError> {
        match &self.root {
            Some(root) => VerificationObject::generate(root, query, options).map_ok(Some),
            None => query
                .validate()
                .map(|_| None)
                .wrap_with_cost(OperationCost::default()),
        }
    }

    /// Answer `query` and check the proof against `trusted_root` in one
    /// step. The cost covers both sides. `None` for an empty tree.
    pub fn query_and_verify(
        &self,
        query: &Rect,
        trusted_root: &Digest,
    ) -> CostResult<Option<VerificationResult>, MerkleRTreeError> {
        self.query(query).flat_map_ok(|vo| match vo {
            Some(vo) => vo.verify_against(query, trusted_root).map_ok(Some),
            None => Ok(None).wrap_with_cost(OperationCost::default()),
        })
    }
}
