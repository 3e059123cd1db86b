//! Authenticated tree nodes.
//!
//! A node's rectangle and digest are computed once, from its content, when it
//! is created, and nodes are immutable afterwards. Each internal node owns its
//! children outright.

use merkle_rtree_costs::{CostResult, CostsExt};

use crate::{
    MerkleRTreeError, Point, Rect,
    hash::{Digest, internal_digest, leaf_digest},
};

/// A leaf: an ordered run of points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafNode {
    rect: Rect,
    digest: Digest,
    points: Vec<Point>,
}

impl LeafNode {
    /// Create a leaf over `points`, kept in the given order.
    pub fn new(points: Vec<Point>) -> CostResult<Self, MerkleRTreeError> {
        if points.is_empty() {
            return Err(MerkleRTreeError::InvalidInput(
                "a leaf needs at least one point".to_string(),
            ))
            .wrap_with_cost(Default::default());
        }
        let rect = Rect::bounding(&points);
        let (digest, cost) = leaf_digest(&points);
        Ok(LeafNode {
            rect,
            digest,
            points,
        })
        .wrap_with_cost(cost)
    }

    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    pub fn digest(&self) -> &Digest {
        &self.digest
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// An internal node: an ordered run of child nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalNode {
    rect: Rect,
    digest: Digest,
    children: Vec<Node>,
}

impl InternalNode {
    /// Create an internal node over `children`, kept in the given order.
    pub fn new(children: Vec<Node>) -> CostResult<Self, MerkleRTreeError> {
        if children.is_empty() {
            return Err(MerkleRTreeError::InvalidInput(
                "an internal node needs at least one child".to_string(),
            ))
            .wrap_with_cost(Default::default());
        }
        let rect = children
            .iter()
            .fold(Rect::EMPTY, |rect, child| rect.enlarge(child.rect()));
        let (digest, cost) = internal_digest(children.iter().map(|c| (c.rect(), c.digest())));
        Ok(InternalNode {
            rect,
            digest,
            children,
        })
        .wrap_with_cost(cost)
    }

    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    pub fn digest(&self) -> &Digest {
        &self.digest
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// A node of the authenticated tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf(LeafNode),
    Internal(InternalNode),
}

/// Shape summary of a tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Levels from the root down to the leaves, both included.
    pub height: usize,
    pub leaf_count: usize,
    pub internal_count: usize,
    pub point_count: usize,
}

impl Node {
    /// Minimum bounding rectangle of everything under this node.
    pub fn rect(&self) -> &Rect {
        match self {
            Node::Leaf(leaf) => leaf.rect(),
            Node::Internal(internal) => internal.rect(),
        }
    }

    /// Commitment to everything under this node.
    pub fn digest(&self) -> &Digest {
        match self {
            Node::Leaf(leaf) => leaf.digest(),
            Node::Internal(internal) => internal.digest(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    /// Number of levels, counting a lone leaf as 1.
    pub fn height(&self) -> usize {
        match self {
            Node::Leaf(_) => 1,
            Node::Internal(internal) => {
                1 + internal
                    .children()
                    .iter()
                    .map(Node::height)
                    .max()
                    .unwrap_or(0)
            }
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf(_) => 1,
            Node::Internal(internal) => internal.children().iter().map(Node::leaf_count).sum(),
        }
    }

    pub fn internal_count(&self) -> usize {
        match self {
            Node::Leaf(_) => 0,
            Node::Internal(internal) => {
                1 + internal
                    .children()
                    .iter()
                    .map(Node::internal_count)
                    .sum::<usize>()
            }
        }
    }

    pub fn point_count(&self) -> usize {
        match self {
            Node::Leaf(leaf) => leaf.len(),
            Node::Internal(internal) => internal.children().iter().map(Node::point_count).sum(),
        }
    }

    /// Every stored point, depth-first, in leaf order.
    pub fn points(&self) -> Box<dyn Iterator<Item = &Point> + '_> {
        match self {
            Node::Leaf(leaf) => Box::new(leaf.points().iter()),
            Node::Internal(internal) => {
                Box::new(internal.children().iter().flat_map(|child| child.points()))
            }
        }
    }

    pub fn stats(&self) -> TreeStats {
        TreeStats {
            height: self.height(),
            leaf_count: self.leaf_count(),
            internal_count: self.internal_count(),
            point_count: self.point_count(),
        }
    }
}

impl From<LeafNode> for Node {
    fn from(leaf: LeafNode) -> Self {
        Node::Leaf(leaf)
    }
}

impl From<InternalNode> for Node {
    fn from(internal: InternalNode) -> Self {
        Node::Internal(internal)
    }
}
